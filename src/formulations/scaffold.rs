//! Shared variable and constraint skeleton.
//!
//! All five formulations share the same decision variables and base
//! invariants; building them in one place keeps the forced-open and linking
//! rows from diverging between variants.

use crate::error::{Error, InfeasibleModelError};
use crate::models::{Dataset, DestId, OriginId};
use crate::solver::{Sense, SolverAdapter, VarId};

/// Assignment variables of one origin: `(destination, distance, y[o,d])`
/// for every reachable pair, in destination order.
#[derive(Debug, Clone)]
pub struct OriginVars {
    pub(crate) origin: OriginId,
    pub(crate) pairs: Vec<(DestId, f64, VarId)>,
}

impl OriginVars {
    /// The origin these variables belong to.
    pub fn origin(&self) -> OriginId {
        self.origin
    }

    /// Reachable `(destination, distance, variable)` triples.
    pub fn pairs(&self) -> &[(DestId, f64, VarId)] {
        &self.pairs
    }
}

/// The variable skeleton shared by every formulation: open variables `x[d]`
/// for each destination and sparse assignment variables `y[o,d]` for each
/// reachable pair, wired with the base invariants.
#[derive(Debug, Clone)]
pub struct VariableContext {
    open: Vec<(DestId, VarId)>,
    origins: Vec<OriginVars>,
    num_existing: usize,
}

impl VariableContext {
    /// `(destination, x[d])` in destination order.
    pub fn open_vars(&self) -> &[(DestId, VarId)] {
        &self.open
    }

    /// Per-origin assignment variables, in origin order.
    pub fn origins(&self) -> &[OriginVars] {
        &self.origins
    }

    /// Adds the facility-count row `sum(x) == open_total`, pre-checking the
    /// target against the destination universe and the forced-open set.
    pub fn add_open_total(
        &self,
        solver: &mut dyn SolverAdapter,
        open_total: usize,
    ) -> Result<(), Error> {
        if open_total > self.open.len() {
            return Err(InfeasibleModelError::OpenTargetExceedsDestinations {
                requested: open_total,
                available: self.open.len(),
            }
            .into());
        }
        if open_total < self.num_existing {
            return Err(InfeasibleModelError::OpenTargetBelowExisting {
                requested: open_total,
                existing: self.num_existing,
            }
            .into());
        }
        let terms: Vec<_> = self.open.iter().map(|&(_, var)| (var, 1.0)).collect();
        solver.add_linear(&terms, Sense::Eq, open_total as f64);
        Ok(())
    }
}

/// Declares the shared variables and adds the base invariants:
/// one assignment per origin, `y[o,d] <= x[d]` linking, and `x[d] = 1`
/// for every forced-open destination.
///
/// The dataset must already be validated; every origin is guaranteed at
/// least one reachable pair.
pub(crate) fn build_skeleton(
    dataset: &Dataset,
    solver: &mut dyn SolverAdapter,
) -> VariableContext {
    let open: Vec<(DestId, VarId)> = dataset
        .destinations()
        .iter()
        .map(|&d| (d, solver.add_binary()))
        .collect();

    let mut origins = Vec::with_capacity(dataset.num_origins());
    for &o in dataset.origins() {
        let pairs: Vec<(DestId, f64, VarId)> = dataset
            .reachable(o)
            .into_iter()
            .map(|(d, dist)| (d, dist, solver.add_binary()))
            .collect();

        // each origin is served by exactly one destination
        let assignment_terms: Vec<_> = pairs.iter().map(|&(_, _, var)| (var, 1.0)).collect();
        solver.add_linear(&assignment_terms, Sense::Eq, 1.0);

        origins.push(OriginVars { origin: o, pairs });
    }

    // an origin cannot be assigned an unopen destination
    for origin_vars in &origins {
        for &(d, _, y) in &origin_vars.pairs {
            let x = open
                .iter()
                .find(|&&(dest, _)| dest == d)
                .map(|&(_, var)| var)
                .expect("reachable pair references a known destination");
            solver.add_linear(&[(y, 1.0), (x, -1.0)], Sense::Le, 0.0);
        }
    }

    // destinations that are already open stay open
    let mut num_existing = 0;
    for &d in dataset.existing() {
        if let Some(&(_, x)) = open.iter().find(|&&(dest, _)| dest == d) {
            solver.add_linear(&[(x, 1.0)], Sense::Eq, 1.0);
            num_existing += 1;
        }
    }

    VariableContext {
        open,
        origins,
        num_existing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::testing::RecordingAdapter;

    #[test]
    fn test_skeleton_variable_and_row_counts() {
        let grid = Dataset::grid(2);
        let mut rec = RecordingAdapter::new();
        let ctx = build_skeleton(&grid, &mut rec);

        // 4 open vars + 16 assignment vars
        assert_eq!(rec.num_binary, 20);
        assert_eq!(rec.num_continuous, 0);
        assert_eq!(ctx.open_vars().len(), 4);
        assert_eq!(ctx.origins().len(), 4);

        // 4 one-assignment rows + 16 linking rows, no forced-open rows
        assert_eq!(rec.linear.len(), 20);
    }

    #[test]
    fn test_forced_open_rows() {
        use std::collections::HashMap;
        let origins = vec![0];
        let destinations = vec![10, 20];
        let populations = HashMap::from([(0, 1.0)]);
        let distances = HashMap::from([((0, 10), 1.0), ((0, 20), 2.0)]);
        let ds = Dataset::new(origins, destinations, populations, distances, vec![20]);

        let mut rec = RecordingAdapter::new();
        let ctx = build_skeleton(&ds, &mut rec);

        // last row pins x[20] to 1
        let row = rec.linear.last().unwrap();
        assert_eq!(row.sense, Sense::Eq);
        assert_eq!(row.rhs, 1.0);
        assert_eq!(row.terms, vec![(ctx.open_vars()[1].1, 1.0)]);
    }

    #[test]
    fn test_sparse_pairs_skip_unreachable() {
        use std::collections::HashMap;
        let origins = vec![0, 1];
        let destinations = vec![10, 20];
        let populations = HashMap::from([(0, 1.0), (1, 1.0)]);
        // origin 1 can only reach destination 20
        let distances =
            HashMap::from([((0, 10), 1.0), ((0, 20), 2.0), ((1, 20), 3.0)]);
        let ds = Dataset::new(origins, destinations, populations, distances, vec![]);

        let mut rec = RecordingAdapter::new();
        let ctx = build_skeleton(&ds, &mut rec);
        assert_eq!(ctx.origins()[0].pairs().len(), 2);
        assert_eq!(ctx.origins()[1].pairs().len(), 1);
        // 2 open + 3 assignment variables
        assert_eq!(rec.num_binary, 5);
    }

    #[test]
    fn test_open_total_prechecks() {
        let grid = Dataset::grid(2);
        let mut rec = RecordingAdapter::new();
        let ctx = build_skeleton(&grid, &mut rec);

        let err = ctx.add_open_total(&mut rec, 5).unwrap_err();
        assert!(matches!(
            err,
            Error::Infeasible(InfeasibleModelError::OpenTargetExceedsDestinations {
                requested: 5,
                available: 4,
            })
        ));

        assert!(ctx.add_open_total(&mut rec, 2).is_ok());
        let row = rec.linear.last().unwrap();
        assert_eq!(row.sense, Sense::Eq);
        assert_eq!(row.rhs, 2.0);
        assert_eq!(row.terms.len(), 4);
    }

    #[test]
    fn test_open_total_below_existing() {
        use std::collections::HashMap;
        let origins = vec![0];
        let destinations = vec![10, 20, 30];
        let populations = HashMap::from([(0, 1.0)]);
        let distances =
            HashMap::from([((0, 10), 1.0), ((0, 20), 2.0), ((0, 30), 3.0)]);
        let ds = Dataset::new(origins, destinations, populations, distances, vec![10, 20]);

        let mut rec = RecordingAdapter::new();
        let ctx = build_skeleton(&ds, &mut rec);
        let err = ctx.add_open_total(&mut rec, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::Infeasible(InfeasibleModelError::OpenTargetBelowExisting {
                requested: 1,
                existing: 2,
            })
        ));
    }
}
