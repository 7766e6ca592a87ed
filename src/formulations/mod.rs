//! Facility location formulations.
//!
//! Five builders over one shared variable scaffold:
//!
//! - [`PMedian`] — classic population-weighted distance minimization
//! - [`KolmPollakExact`] — exact exponential Kolm-Pollak objective
//! - [`KolmPollakLinear`] — exact linearization with precomputed coefficients
//! - [`PiecewiseLinear`] — tangent outer approximation of the exponential
//! - [`MinFacilityCount`] — fewest facilities under an equity budget
//!
//! Every builder enforces the shared invariants (one assignment per origin,
//! assignments only to open facilities, forced-open facilities stay open)
//! through [`VariableContext`]; they differ only in the
//! constraints and objective they contribute via [`Formulation::build`].

mod kolm_pollak;
mod kp_linear;
mod min_count;
mod p_median;
mod piecewise;
pub(crate) mod scaffold;

pub use kolm_pollak::KolmPollakExact;
pub use kp_linear::KolmPollakLinear;
pub use min_count::MinFacilityCount;
pub use p_median::PMedian;
pub use piecewise::PiecewiseLinear;
pub use scaffold::{OriginVars, VariableContext};

use std::time::Duration;

use tracing::{debug, info};

use crate::error::Error;
use crate::models::{Assignment, Dataset, Solution};
use crate::solver::SolverAdapter;

/// One formulation's contribution on top of the shared scaffold.
///
/// Implementations receive the dataset, the already-declared variable
/// context, and the adapter, and add their own constraints and objective.
pub trait Formulation {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Adds this formulation's constraints and objective to the model.
    fn build(
        &self,
        dataset: &Dataset,
        ctx: &mut VariableContext,
        solver: &mut dyn SolverAdapter,
    ) -> Result<(), Error>;
}

/// Builds a formulation against the dataset, runs one blocking optimize,
/// and decodes the opened facility set.
///
/// Validation and build errors abort before the solver call; solver-reported
/// infeasibility or failure is translated into the error taxonomy. The
/// returned [`Solution`] is decoded only from a terminal optimal or
/// feasible state.
pub fn solve<F, S>(
    dataset: &Dataset,
    formulation: &F,
    solver: &mut S,
    time_limit: Option<Duration>,
) -> Result<Solution, Error>
where
    F: Formulation + ?Sized,
    S: SolverAdapter,
{
    dataset.validate()?;

    info!(formulation = formulation.name(), "set variables");
    let mut ctx = scaffold::build_skeleton(dataset, solver);

    info!("set constraints");
    formulation.build(dataset, &mut ctx, solver)?;

    info!("optimizing");
    let status = solver.optimize(time_limit)?;

    let solution = decode(dataset, &ctx, solver, status);
    debug!(
        opened = solution.num_opened(),
        objective = solution.objective(),
        "optimization complete"
    );
    Ok(solution)
}

/// Reads the solved variables back into a [`Solution`], rounding binaries
/// to the nearest integer.
fn decode(
    dataset: &Dataset,
    ctx: &VariableContext,
    solver: &dyn SolverAdapter,
    status: crate::solver::SolveStatus,
) -> Solution {
    let opened: Vec<_> = ctx
        .open_vars()
        .iter()
        .filter(|&&(_, var)| solver.value(var).round() >= 1.0)
        .map(|&(d, _)| d)
        .collect();

    let mut assignments = Vec::with_capacity(dataset.num_origins());
    let mut weighted_dist = 0.0;
    let mut total_weight = 0.0;
    for origin_vars in ctx.origins() {
        let pop = dataset.population(origin_vars.origin);
        total_weight += pop;
        for &(destination, distance, var) in &origin_vars.pairs {
            if solver.value(var).round() >= 1.0 {
                weighted_dist += pop * distance;
                assignments.push(Assignment {
                    origin: origin_vars.origin,
                    destination,
                    distance,
                });
                break;
            }
        }
    }

    let mean_distance = if total_weight > 0.0 {
        weighted_dist / total_weight
    } else {
        0.0
    };

    Solution::new(
        opened,
        assignments,
        solver.objective_value(),
        status,
        mean_distance,
    )
}
