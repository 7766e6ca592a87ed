//! Exact Kolm-Pollak formulation.

use tracing::info;

use super::{Formulation, VariableContext};
use crate::error::Error;
use crate::models::Dataset;
use crate::solver::{Direction, SolverAdapter};

/// Opens exactly `open_total` facilities minimizing the exact Kolm-Pollak
/// cost `sum_o population[o] * exp(alpha * z_o)` where
/// `z_o = sum_d distance(o,d) * y[o,d]`.
///
/// The exponential is applied to a linear combination of assignment
/// variables, so the backend must support exponential-of-expression
/// constraints; linear-only backends such as
/// [`MicrolpAdapter`](crate::solver::MicrolpAdapter) fail the build with
/// [`SolverError::UnsupportedConstraint`](crate::error::SolverError). At
/// integral solutions the objective coincides with
/// [`KolmPollakLinear`](super::KolmPollakLinear), which any MILP backend
/// can solve.
#[derive(Debug, Clone, Copy)]
pub struct KolmPollakExact {
    alpha: f64,
    open_total: usize,
}

impl KolmPollakExact {
    /// Creates the formulation for a calibrated `alpha` and a target
    /// facility count.
    pub fn new(alpha: f64, open_total: usize) -> Self {
        Self { alpha, open_total }
    }
}

impl Formulation for KolmPollakExact {
    fn name(&self) -> &'static str {
        "kolmpollak"
    }

    fn build(
        &self,
        dataset: &Dataset,
        ctx: &mut VariableContext,
        solver: &mut dyn SolverAdapter,
    ) -> Result<(), Error> {
        ctx.add_open_total(solver, self.open_total)?;

        let mut objective = Vec::with_capacity(ctx.origins().len());
        for origin_vars in ctx.origins() {
            let pop = dataset.population(origin_vars.origin());
            let w = solver.add_continuous(0.0, f64::INFINITY);

            // w[o] == pop * exp(alpha * sum(dist * y))
            let z_terms: Vec<_> = origin_vars
                .pairs()
                .iter()
                .map(|&(_, distance, y)| (y, distance))
                .collect();
            solver.add_exponential(w, pop, self.alpha, &z_terms)?;

            objective.push((w, 1.0));
        }

        info!("set objective");
        solver.set_objective(&objective, Direction::Minimize);
        Ok(())
    }
}
