//! Piecewise-linear outer approximation of the Kolm-Pollak objective.

use tracing::info;

use super::{Formulation, VariableContext};
use crate::error::Error;
use crate::models::Dataset;
use crate::solver::{Direction, Sense, SolverAdapter};

/// Opens exactly `open_total` facilities minimizing a tangent-line
/// underestimate of the Kolm-Pollak cost.
///
/// The convex per-origin cost `population[o] * exp(alpha * z_o)` is
/// replaced by supporting tangents at four breakpoints of the origin's
/// reachable-distance range `[0, b_o]` (`b_o = max_d distance(o,d)`): at
/// `0`, `b_o/2`, `2*b_o/3`, and `b_o`. Each tangent
///
/// ```text
/// w[o] >= population[o] * exp(alpha*p) * (alpha*z_o - alpha*p + 1)
/// ```
///
/// is a valid global lower bound by convexity; their maximum is the
/// underestimate actually minimized. No exponential term ever reaches the
/// solver, at the cost of approximation error between breakpoints.
#[derive(Debug, Clone, Copy)]
pub struct PiecewiseLinear {
    alpha: f64,
    open_total: usize,
}

impl PiecewiseLinear {
    /// Creates the formulation for a calibrated `alpha` and a target
    /// facility count.
    pub fn new(alpha: f64, open_total: usize) -> Self {
        Self { alpha, open_total }
    }

    /// Tangent breakpoints over a reachable range `[0, b]`.
    fn breakpoints(b: f64) -> [f64; 4] {
        [0.0, b / 2.0, 2.0 * b / 3.0, b]
    }
}

impl Formulation for PiecewiseLinear {
    fn name(&self) -> &'static str {
        "piecewise_linear"
    }

    fn build(
        &self,
        dataset: &Dataset,
        ctx: &mut VariableContext,
        solver: &mut dyn SolverAdapter,
    ) -> Result<(), Error> {
        ctx.add_open_total(solver, self.open_total)?;

        let alpha = self.alpha;
        let mut objective = Vec::with_capacity(ctx.origins().len());
        for origin_vars in ctx.origins() {
            let pop = dataset.population(origin_vars.origin());
            let b = origin_vars
                .pairs()
                .iter()
                .map(|&(_, distance, _)| distance)
                .fold(0.0, f64::max);
            let w = solver.add_continuous(0.0, f64::INFINITY);

            for p in Self::breakpoints(b) {
                // w - scale*alpha*z >= scale*(1 - alpha*p),
                // scale = pop * exp(alpha*p)
                let scale = pop * (alpha * p).exp();
                let mut terms = vec![(w, 1.0)];
                for &(_, distance, y) in origin_vars.pairs() {
                    terms.push((y, -scale * alpha * distance));
                }
                solver.add_linear(&terms, Sense::Ge, scale * (1.0 - alpha * p));
            }

            objective.push((w, 1.0));
        }

        info!("set objective");
        solver.set_objective(&objective, Direction::Minimize);
        Ok(())
    }
}
