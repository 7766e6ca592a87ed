//! Solved facility selections.

use serde::{Deserialize, Serialize};

use super::{DestId, OriginId};
use crate::solver::SolveStatus;

/// One origin's assignment in a solved model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// The assigned origin.
    pub origin: OriginId,
    /// The destination serving it.
    pub destination: DestId,
    /// Travel distance of the pair.
    pub distance: f64,
}

/// The set of opened facilities decoded from a terminal solver state.
///
/// Always a superset of the dataset's forced-open destinations. The solution
/// is the only artifact that outlives an optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    opened: Vec<DestId>,
    assignments: Vec<Assignment>,
    objective: f64,
    status: SolveStatus,
    mean_distance: f64,
}

impl Solution {
    pub(crate) fn new(
        opened: Vec<DestId>,
        assignments: Vec<Assignment>,
        objective: f64,
        status: SolveStatus,
        mean_distance: f64,
    ) -> Self {
        Self {
            opened,
            assignments,
            objective,
            status,
            mean_distance,
        }
    }

    /// Ids of the opened destinations, in destination order.
    pub fn opened(&self) -> &[DestId] {
        &self.opened
    }

    /// Whether a destination was opened.
    pub fn is_open(&self, destination: DestId) -> bool {
        self.opened.contains(&destination)
    }

    /// Number of opened destinations.
    pub fn num_opened(&self) -> usize {
        self.opened.len()
    }

    /// Per-origin assignments, in origin order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// The assignment of one origin, if it appears in the model.
    pub fn assignment(&self, origin: OriginId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.origin == origin)
    }

    /// Objective value reported by the solver.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Terminal solver status this solution was decoded from.
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Population-weighted mean assigned distance.
    pub fn mean_distance(&self) -> f64 {
        self.mean_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let sol = Solution::new(
            vec![3, 7],
            vec![
                Assignment {
                    origin: 1,
                    destination: 3,
                    distance: 2.0,
                },
                Assignment {
                    origin: 2,
                    destination: 7,
                    distance: 1.0,
                },
            ],
            3.0,
            SolveStatus::Optimal,
            1.5,
        );
        assert_eq!(sol.num_opened(), 2);
        assert!(sol.is_open(3));
        assert!(!sol.is_open(4));
        assert_eq!(sol.assignment(2).unwrap().destination, 7);
        assert!(sol.assignment(9).is_none());
        assert_eq!(sol.status(), SolveStatus::Optimal);
        assert!((sol.mean_distance() - 1.5).abs() < 1e-12);
    }
}
