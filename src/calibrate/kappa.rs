//! Kolm-Pollak index arithmetic.

use crate::error::CalibrationError;

/// Computes the Kolm-Pollak calibration coefficient kappa for a weighted
/// distribution and an aversion parameter epsilon:
///
/// ```text
/// kappa = epsilon * sum(w * x) / sum(w * x^2)
/// ```
///
/// Fails with [`CalibrationError::DegenerateBaseline`] when the weighted sum
/// of squares is zero (all weights zero, or every value zero), since kappa
/// is undefined there.
///
/// # Panics
///
/// Panics if `values` and `weights` differ in length.
pub fn calc_kappa(
    values: &[f64],
    weights: &[f64],
    epsilon: f64,
) -> Result<f64, CalibrationError> {
    assert_eq!(
        values.len(),
        weights.len(),
        "values and weights must be the same length"
    );

    let x_sum: f64 = values.iter().zip(weights).map(|(&x, &w)| w * x).sum();
    let x_sq_sum: f64 = values.iter().zip(weights).map(|(&x, &w)| w * x * x).sum();
    if x_sq_sum == 0.0 {
        return Err(CalibrationError::DegenerateBaseline);
    }
    Ok(epsilon * x_sum / x_sq_sum)
}

/// Kolm-Pollak equally-distributed equivalent of a weighted distribution:
///
/// ```text
/// ede = -ln( sum(w * exp(-kappa * x)) / sum(w) ) / kappa
/// ```
///
/// For an undesirable quantity (kappa < 0) the EDE is at least the weighted
/// mean and grows with inequality; lower is better.
///
/// # Panics
///
/// Panics if `values` and `weights` differ in length, or if `kappa` is zero.
pub fn ede(values: &[f64], weights: &[f64], kappa: f64) -> f64 {
    assert_eq!(
        values.len(),
        weights.len(),
        "values and weights must be the same length"
    );
    assert!(kappa != 0.0, "kappa must be non-zero");

    let total: f64 = weights.iter().sum();
    let sum: f64 = values
        .iter()
        .zip(weights)
        .map(|(&x, &w)| w * (-kappa * x).exp())
        .sum();
    -(sum / total).ln() / kappa
}
