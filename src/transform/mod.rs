//! Exponential distance transform.
//!
//! Precomputes `exp(alpha * distance)` outside the solver for formulations
//! that consume the exponential as a constant coefficient.

/// Precomputed exponential cost coefficients with a long-edge clamp.
///
/// Distances at or beyond the clamp threshold are evaluated at the threshold
/// instead: `coefficient(d) = exp(alpha * min(d, clamp))`. Without the clamp,
/// long edges push `exp(alpha * d)` outside the coefficient range MILP
/// solvers handle well, so the value is capped rather than rejected. The
/// default threshold of 63 distance units reproduces the documented
/// objective values; callers targeting a backend with a different numeric
/// tolerance can supply their own via [`with_clamp`](Self::with_clamp).
///
/// # Examples
///
/// ```
/// use equiloc::transform::ExpTransform;
///
/// let t = ExpTransform::new(-0.5);
/// assert!((t.coefficient(2.0) - (-1.0f64).exp()).abs() < 1e-12);
/// // long edges are capped at the clamp threshold
/// assert_eq!(t.coefficient(100.0), t.coefficient(63.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ExpTransform {
    alpha: f64,
    clamp: f64,
}

impl ExpTransform {
    /// Default clamp threshold, in input distance units.
    pub const DEFAULT_CLAMP: f64 = 63.0;

    /// Creates a transform with the default clamp threshold.
    pub fn new(alpha: f64) -> Self {
        Self::with_clamp(alpha, Self::DEFAULT_CLAMP)
    }

    /// Creates a transform with an explicit clamp threshold.
    pub fn with_clamp(alpha: f64, clamp: f64) -> Self {
        Self { alpha, clamp }
    }

    /// Largest clamp threshold for which `exp(alpha * d)` stays finite in
    /// `f64`, for callers deriving the threshold from the numeric range
    /// instead of using [`DEFAULT_CLAMP`](Self::DEFAULT_CLAMP).
    ///
    /// Returns infinity when `alpha` is zero (the coefficient is constant).
    pub fn safe_clamp(alpha: f64) -> f64 {
        if alpha == 0.0 {
            f64::INFINITY
        } else {
            // one exponent unit of headroom against rounding in the product
            (f64::MAX.ln() - 1.0) / alpha.abs()
        }
    }

    /// The rate coefficient this transform was built with.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The transformed coefficient for one distance.
    pub fn coefficient(&self, distance: f64) -> f64 {
        if distance < self.clamp {
            (self.alpha * distance).exp()
        } else {
            (self.alpha * self.clamp).exp()
        }
    }
}
