//! Equity-parameter calibration.
//!
//! - [`calc_kappa`] — closed-form Kolm-Pollak calibration coefficient
//! - [`ede`] — Kolm-Pollak equally-distributed equivalent of a distribution
//! - [`Calibrator`] — derives the exponential rate `alpha` from a dataset

mod kappa;

pub use kappa::{calc_kappa, ede};

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::error::CalibrationError;
use crate::models::{Dataset, DestId};

/// Derives the exponential rate coefficient `alpha = -kappa` used by every
/// non-linear formulation, so that the Kolm-Pollak index of the baseline
/// facility distribution is consistent with the aversion parameter
/// `epsilon`.
///
/// `epsilon` follows the Kolm-Pollak sign convention: negative for
/// undesirable quantities such as travel distance (stronger aversion as the
/// magnitude grows). With `epsilon < 0` the resulting `alpha` is positive
/// and `exp(alpha * distance)` penalizes long distances superlinearly.
///
/// The baseline is the dataset's forced-open set. When nothing is open yet,
/// half of the candidate destinations (at least one) are sampled uniformly
/// from the supplied random source, which makes calibration non-deterministic
/// unless the caller pins a seed or supplies an explicit baseline via
/// [`calibrate_with_baseline`](Self::calibrate_with_baseline).
///
/// # Examples
///
/// ```
/// use equiloc::calibrate::Calibrator;
/// use equiloc::models::Dataset;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let grid = Dataset::grid(3);
/// let mut rng = StdRng::seed_from_u64(42);
/// let alpha = Calibrator::new(-1.0).calibrate(&grid, &mut rng).unwrap();
/// assert!(alpha > 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Calibrator {
    epsilon: f64,
}

impl Calibrator {
    /// Creates a calibrator for the given inequality-aversion parameter.
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Computes `alpha` against the dataset's own baseline, bootstrapping a
    /// random baseline when no facility is open.
    pub fn calibrate<R: Rng + ?Sized>(
        &self,
        dataset: &Dataset,
        rng: &mut R,
    ) -> Result<f64, CalibrationError> {
        let baseline = if dataset.existing().is_empty() {
            self.bootstrap_baseline(dataset, rng)?
        } else {
            dataset.existing().to_vec()
        };
        self.calibrate_with_baseline(dataset, &baseline)
    }

    /// Computes `alpha` against an explicit baseline open set.
    ///
    /// This path is a pure function of its inputs: identical dataset,
    /// baseline, and epsilon always yield an identical alpha.
    pub fn calibrate_with_baseline(
        &self,
        dataset: &Dataset,
        baseline: &[DestId],
    ) -> Result<f64, CalibrationError> {
        if baseline.is_empty() {
            return Err(CalibrationError::EmptyBaseline);
        }

        let mut nearest = Vec::with_capacity(dataset.num_origins());
        let mut weights = Vec::with_capacity(dataset.num_origins());
        for &o in dataset.origins() {
            let dist = dataset
                .nearest_distance(o, baseline)
                .ok_or(CalibrationError::UnreachableFromBaseline(o))?;
            nearest.push(dist);
            weights.push(dataset.population(o));
        }

        let kappa = calc_kappa(&nearest, &weights, self.epsilon)?;
        let alpha = -kappa;
        debug!(alpha, kappa, epsilon = self.epsilon, "calibrated equity coefficient");
        Ok(alpha)
    }

    /// Samples half of the candidate destinations (at least one) as a
    /// stand-in baseline for datasets with nothing open yet.
    fn bootstrap_baseline<R: Rng + ?Sized>(
        &self,
        dataset: &Dataset,
        rng: &mut R,
    ) -> Result<Vec<DestId>, CalibrationError> {
        let candidates = dataset.candidates();
        if candidates.is_empty() {
            return Err(CalibrationError::EmptyBaseline);
        }
        let count = (candidates.len() / 2).max(1);
        Ok(candidates.choose_multiple(rng, count).copied().collect())
    }
}
