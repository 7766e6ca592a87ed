//! P-median: minimize population-weighted travel distance.

use tracing::info;

use super::{Formulation, VariableContext};
use crate::error::Error;
use crate::models::Dataset;
use crate::solver::{Direction, SolverAdapter};

/// Opens exactly `open_total` facilities minimizing
/// `sum(population[o] * distance(o,d) * y[o,d])`.
///
/// Fully linear; needs no equity coefficient and no distance transform.
///
/// # Examples
///
/// ```
/// use equiloc::formulations::{solve, PMedian};
/// use equiloc::models::Dataset;
/// use equiloc::solver::MicrolpAdapter;
///
/// let grid = Dataset::grid(3);
/// let mut solver = MicrolpAdapter::new();
/// let sol = solve(&grid, &PMedian::new(2), &mut solver, None).unwrap();
/// assert_eq!(sol.num_opened(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PMedian {
    open_total: usize,
}

impl PMedian {
    /// Creates a p-median formulation targeting `open_total` open
    /// facilities (existing plus newly opened).
    pub fn new(open_total: usize) -> Self {
        Self { open_total }
    }
}

impl Formulation for PMedian {
    fn name(&self) -> &'static str {
        "pmedian"
    }

    fn build(
        &self,
        dataset: &Dataset,
        ctx: &mut VariableContext,
        solver: &mut dyn SolverAdapter,
    ) -> Result<(), Error> {
        ctx.add_open_total(solver, self.open_total)?;

        info!("set objective");
        let mut objective = Vec::new();
        for origin_vars in ctx.origins() {
            let pop = dataset.population(origin_vars.origin());
            for &(_, distance, y) in origin_vars.pairs() {
                objective.push((y, pop * distance));
            }
        }
        solver.set_objective(&objective, Direction::Minimize);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InfeasibleModelError;
    use crate::formulations::solve;
    use crate::models::DestId;
    use crate::solver::testing::RecordingAdapter;
    use crate::solver::MicrolpAdapter;

    /// Total population-weighted distance of serving every origin from its
    /// nearest member of `open`.
    fn total_cost(ds: &Dataset, open: &[DestId]) -> f64 {
        ds.origins()
            .iter()
            .map(|&o| ds.population(o) * ds.nearest_distance(o, open).unwrap())
            .sum()
    }

    #[test]
    fn test_objective_coefficients() {
        let grid = Dataset::grid(2);
        let mut rec = RecordingAdapter::new();
        let mut ctx = crate::formulations::scaffold::build_skeleton(&grid, &mut rec);
        PMedian::new(1).build(&grid, &mut ctx, &mut rec).unwrap();

        let (terms, direction) = rec.objective.unwrap();
        assert_eq!(direction, Direction::Minimize);
        // one term per assignment variable, weighted by population * distance
        assert_eq!(terms.len(), 16);
        let (_, _, y01) = ctx.origins()[0].pairs()[1];
        let coeff = terms.iter().find(|&&(v, _)| v == y01).unwrap().1;
        assert!((coeff - grid.distance(0, 1).unwrap()).abs() < 1e-12);
    }

    #[test]
    fn test_grid_matches_exhaustive_enumeration() {
        // 3x3 grid, two facilities: check against all C(9,2) = 36 pairs
        let grid = Dataset::grid(3);
        let mut best = f64::INFINITY;
        for a in 0..9u64 {
            for b in (a + 1)..9 {
                best = best.min(total_cost(&grid, &[a, b]));
            }
        }

        let mut solver = MicrolpAdapter::new();
        let sol = solve(&grid, &PMedian::new(2), &mut solver, None).unwrap();
        assert_eq!(sol.num_opened(), 2);
        assert!((total_cost(&grid, sol.opened()) - best).abs() < 1e-6);
        assert!((sol.objective() - best).abs() < 1e-6);
    }

    #[test]
    fn test_existing_facilities_stay_open() {
        let base = Dataset::grid(3);
        let distances = base
            .origins()
            .iter()
            .flat_map(|&o| {
                let base = &base;
                base.destinations()
                    .iter()
                    .map(move |&d| ((o, d), base.distance(o, d).unwrap()))
            })
            .collect();
        let grid = Dataset::new(
            base.origins().to_vec(),
            base.destinations().to_vec(),
            base.origins().iter().map(|&o| (o, 1.0)).collect(),
            distances,
            vec![0],
        );

        let mut solver = MicrolpAdapter::new();
        let sol = solve(&grid, &PMedian::new(2), &mut solver, None).unwrap();
        assert!(sol.is_open(0), "forced-open corner must stay open");
        assert_eq!(sol.num_opened(), 2);
    }

    #[test]
    fn test_open_total_too_large_fails_before_solve() {
        let grid = Dataset::grid(2);
        let mut solver = MicrolpAdapter::new();
        let err = solve(&grid, &PMedian::new(10), &mut solver, None).unwrap_err();
        assert!(matches!(
            err,
            Error::Infeasible(InfeasibleModelError::OpenTargetExceedsDestinations { .. })
        ));
    }
}
