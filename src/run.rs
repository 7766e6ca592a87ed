//! One-call optimization runs.
//!
//! Ties the pieces together in the order a siting study uses them:
//! calibrate `alpha` once against the dataset's baseline, derive the
//! open-facility target from the forced-open count, build the selected
//! formulation, and solve.
//!
//! # Examples
//!
//! ```
//! use equiloc::models::Dataset;
//! use equiloc::run::{optimize, FormulationKind, RunParams};
//! use equiloc::solver::MicrolpAdapter;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let grid = Dataset::grid(3);
//! let params = RunParams::new(FormulationKind::PMedian, -1.0, 2);
//! let mut solver = MicrolpAdapter::new();
//! let mut rng = StdRng::seed_from_u64(42);
//! let solution = optimize(&grid, &params, &mut solver, &mut rng).unwrap();
//! assert_eq!(solution.num_opened(), 2);
//! ```

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calibrate::Calibrator;
use crate::error::Error;
use crate::formulations::{
    self, Formulation, KolmPollakExact, KolmPollakLinear, MinFacilityCount, PMedian,
    PiecewiseLinear,
};
use crate::models::{Dataset, Solution};
use crate::solver::SolverAdapter;

/// Which formulation a run builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulationKind {
    /// Population-weighted mean distance, no equity term.
    PMedian,
    /// Exact exponential Kolm-Pollak objective (exp-capable backends only).
    KolmPollakExact,
    /// Kolm-Pollak objective linearized with precomputed coefficients.
    KolmPollakLinear,
    /// Tangent outer approximation of the Kolm-Pollak objective.
    PiecewiseLinear,
    /// Fewest facilities whose Kolm-Pollak cost stays under a budget.
    MinFacilityCount,
}

/// Parameters of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParams {
    /// The formulation to build.
    pub formulation: FormulationKind,
    /// Inequality-aversion parameter; negative for travel distance.
    pub epsilon: f64,
    /// New facilities to open on top of the forced-open set.
    pub num_to_open: usize,
    /// Equity budget for [`FormulationKind::MinFacilityCount`];
    /// unused elsewhere.
    pub kpcoef: f64,
    /// Advisory bound on solver time.
    pub time_limit: Option<Duration>,
}

impl RunParams {
    /// Creates run parameters with no equity budget and no time bound.
    pub fn new(formulation: FormulationKind, epsilon: f64, num_to_open: usize) -> Self {
        Self {
            formulation,
            epsilon,
            num_to_open,
            kpcoef: 0.0,
            time_limit: None,
        }
    }

    /// Sets the equity budget used by [`FormulationKind::MinFacilityCount`].
    pub fn with_kpcoef(mut self, kpcoef: f64) -> Self {
        self.kpcoef = kpcoef;
        self
    }

    /// Sets the advisory time bound.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }
}

/// Runs one calibrate-build-solve cycle.
///
/// The open-facility target is `existing + num_to_open`, so the forced-open
/// set never eats into the requested additions. `alpha` is calibrated once,
/// before the model is built, and only for the formulations that use it;
/// the random source feeds the bootstrap baseline when the dataset has no
/// facility open yet.
pub fn optimize<R, S>(
    dataset: &Dataset,
    params: &RunParams,
    solver: &mut S,
    rng: &mut R,
) -> Result<Solution, Error>
where
    R: Rng + ?Sized,
    S: SolverAdapter,
{
    let open_total = dataset.existing().len() + params.num_to_open;

    let formulation: Box<dyn Formulation> = match params.formulation {
        FormulationKind::PMedian => Box::new(PMedian::new(open_total)),
        kind => {
            let alpha = Calibrator::new(params.epsilon).calibrate(dataset, rng)?;
            info!(alpha, epsilon = params.epsilon, "calibrated");
            match kind {
                FormulationKind::KolmPollakExact => {
                    Box::new(KolmPollakExact::new(alpha, open_total))
                }
                FormulationKind::KolmPollakLinear => {
                    Box::new(KolmPollakLinear::new(alpha, open_total))
                }
                FormulationKind::PiecewiseLinear => {
                    Box::new(PiecewiseLinear::new(alpha, open_total))
                }
                FormulationKind::MinFacilityCount => {
                    Box::new(MinFacilityCount::new(alpha, params.kpcoef))
                }
                FormulationKind::PMedian => unreachable!(),
            }
        }
    };

    formulations::solve(dataset, formulation.as_ref(), solver, params.time_limit)
}
