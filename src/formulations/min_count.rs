//! Fewest facilities under an equity budget.

use tracing::info;

use super::{Formulation, VariableContext};
use crate::error::Error;
use crate::models::Dataset;
use crate::solver::{Direction, Sense, SolverAdapter};
use crate::transform::ExpTransform;

/// Minimizes the number of opened facilities subject to the aggregate
/// Kolm-Pollak budget
///
/// ```text
/// sum_o sum_d population[o] * exp(alpha * distance(o,d)) * y[o,d] <= kpcoef
/// ```
///
/// The facility count is the decision here, so there is no `open_total`
/// row; forced-open facilities still count toward the total. The
/// exponential coefficients are constants from [`ExpTransform`].
///
/// # Examples
///
/// ```
/// use equiloc::formulations::{solve, MinFacilityCount};
/// use equiloc::models::Dataset;
/// use equiloc::solver::MicrolpAdapter;
///
/// let grid = Dataset::grid(3);
/// // a generous budget is met by a single facility
/// let mut solver = MicrolpAdapter::new();
/// let sol = solve(&grid, &MinFacilityCount::new(1.0, 200.0), &mut solver, None).unwrap();
/// assert_eq!(sol.num_opened(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MinFacilityCount {
    alpha: f64,
    kpcoef: f64,
}

impl MinFacilityCount {
    /// Creates the formulation for a calibrated `alpha` and an equity
    /// budget `kpcoef`.
    pub fn new(alpha: f64, kpcoef: f64) -> Self {
        Self { alpha, kpcoef }
    }
}

impl Formulation for MinFacilityCount {
    fn name(&self) -> &'static str {
        "set_kpcoef"
    }

    fn build(
        &self,
        dataset: &Dataset,
        ctx: &mut VariableContext,
        solver: &mut dyn SolverAdapter,
    ) -> Result<(), Error> {
        let transform = ExpTransform::new(self.alpha);

        // single aggregate Kolm-Pollak budget row
        let mut budget = Vec::new();
        for origin_vars in ctx.origins() {
            let pop = dataset.population(origin_vars.origin());
            for &(_, distance, y) in origin_vars.pairs() {
                budget.push((y, pop * transform.coefficient(distance)));
            }
        }
        solver.add_linear(&budget, Sense::Le, self.kpcoef);

        info!("set objective");
        let objective: Vec<_> = ctx.open_vars().iter().map(|&(_, x)| (x, 1.0)).collect();
        solver.set_objective(&objective, Direction::Minimize);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InfeasibleModelError;
    use crate::formulations::scaffold::build_skeleton;
    use crate::formulations::solve;
    use crate::models::DestId;
    use crate::solver::testing::RecordingAdapter;
    use crate::solver::MicrolpAdapter;
    use std::collections::HashMap;

    fn kp_cost(ds: &Dataset, open: &[DestId], alpha: f64) -> f64 {
        let t = ExpTransform::new(alpha);
        ds.origins()
            .iter()
            .map(|&o| ds.population(o) * t.coefficient(ds.nearest_distance(o, open).unwrap()))
            .sum()
    }

    fn line_instance() -> Dataset {
        let origins = vec![0, 1, 2, 3, 4];
        let positions: [f64; 5] = [0.0, 1.0, 2.0, 3.0, 20.0];
        let destinations = vec![11, 12, 30];
        let dest_pos = [(11, 1.0), (12, 2.0), (30, 20.0)];
        let mut populations = HashMap::new();
        let mut distances = HashMap::new();
        for (i, &o) in origins.iter().enumerate() {
            let pop = match i {
                0 => 1.2,
                4 => 0.05,
                _ => 1.0,
            };
            populations.insert(o, pop);
            for &(d, pos) in &dest_pos {
                distances.insert((o, d), (positions[i] - pos).abs());
            }
        }
        Dataset::new(origins, destinations, populations, distances, vec![])
    }

    #[test]
    fn test_no_open_total_row_and_budget_shape() {
        let grid = Dataset::grid(2);
        let mut rec = RecordingAdapter::new();
        let mut ctx = build_skeleton(&grid, &mut rec);
        MinFacilityCount::new(0.5, 100.0)
            .build(&grid, &mut ctx, &mut rec)
            .unwrap();

        // exactly one extra row: the aggregate budget over all 16 pairs
        assert_eq!(rec.linear.len(), 21);
        let row = rec.linear.last().unwrap();
        assert_eq!(row.sense, Sense::Le);
        assert_eq!(row.rhs, 100.0);
        assert_eq!(row.terms.len(), 16);

        // objective counts open variables
        let (terms, direction) = rec.objective.unwrap();
        assert_eq!(direction, Direction::Minimize);
        assert_eq!(terms.len(), 4);
    }

    #[test]
    fn test_opens_fewest_facilities_meeting_budget() {
        let ds = line_instance();
        let alpha = 1.0;

        // no single site meets a budget of 15, but {11, 30} does
        let kpcoef = 15.0;
        for d in ds.destinations() {
            assert!(kp_cost(&ds, &[*d], alpha) > kpcoef);
        }
        assert!(kp_cost(&ds, &[11, 30], alpha) <= kpcoef);

        let mut solver = MicrolpAdapter::new();
        let sol = solve(&ds, &MinFacilityCount::new(alpha, kpcoef), &mut solver, None).unwrap();
        assert_eq!(sol.num_opened(), 2);
        assert!(kp_cost(&ds, sol.opened(), alpha) <= kpcoef);
    }

    #[test]
    fn test_unmeetable_budget_is_infeasible() {
        let ds = line_instance();
        let everything = kp_cost(&ds, ds.destinations(), 1.0);
        let mut solver = MicrolpAdapter::new();
        let err = solve(
            &ds,
            &MinFacilityCount::new(1.0, everything * 0.5),
            &mut solver,
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::Infeasible(InfeasibleModelError::SolverReported)
        );
    }
}
