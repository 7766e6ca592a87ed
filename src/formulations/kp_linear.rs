//! Exact linearization of the Kolm-Pollak objective.

use tracing::info;

use super::{Formulation, VariableContext};
use crate::error::Error;
use crate::models::Dataset;
use crate::solver::{Direction, Sense, SolverAdapter};
use crate::transform::ExpTransform;

/// Opens exactly `open_total` facilities minimizing
/// `sum_o w[o]` with `w[o] = sum_d population[o] * exp(alpha *
/// distance(o,d)) * y[o,d]`.
///
/// The exponential is distributed over the assignment sum before
/// exponentiating each term, so every coefficient is a constant from
/// [`ExpTransform`] (including its long-edge clamp) and the whole model is
/// linear. Because each origin is assigned exactly one destination, this is
/// equivalent to [`KolmPollakExact`](super::KolmPollakExact) at integral
/// solutions while being far easier for a MILP backend to relax.
///
/// # Examples
///
/// ```
/// use equiloc::formulations::{solve, KolmPollakLinear};
/// use equiloc::models::Dataset;
/// use equiloc::solver::MicrolpAdapter;
///
/// let grid = Dataset::grid(3);
/// let mut solver = MicrolpAdapter::new();
/// let sol = solve(&grid, &KolmPollakLinear::new(1.0, 2), &mut solver, None).unwrap();
/// assert_eq!(sol.num_opened(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KolmPollakLinear {
    alpha: f64,
    open_total: usize,
}

impl KolmPollakLinear {
    /// Creates the formulation for a calibrated `alpha` and a target
    /// facility count.
    pub fn new(alpha: f64, open_total: usize) -> Self {
        Self { alpha, open_total }
    }
}

impl Formulation for KolmPollakLinear {
    fn name(&self) -> &'static str {
        "kp_linear_exact"
    }

    fn build(
        &self,
        dataset: &Dataset,
        ctx: &mut VariableContext,
        solver: &mut dyn SolverAdapter,
    ) -> Result<(), Error> {
        ctx.add_open_total(solver, self.open_total)?;

        let transform = ExpTransform::new(self.alpha);
        let mut objective = Vec::with_capacity(ctx.origins().len());
        for origin_vars in ctx.origins() {
            let pop = dataset.population(origin_vars.origin());
            let w = solver.add_continuous(0.0, f64::INFINITY);

            // w[o] - sum(pop * exp(alpha * dist) * y) == 0
            let mut terms = vec![(w, 1.0)];
            for &(_, distance, y) in origin_vars.pairs() {
                terms.push((y, -pop * transform.coefficient(distance)));
            }
            solver.add_linear(&terms, Sense::Eq, 0.0);

            objective.push((w, 1.0));
        }

        info!("set objective");
        solver.set_objective(&objective, Direction::Minimize);
        Ok(())
    }
}
