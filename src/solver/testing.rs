//! Test double that records every adapter call without solving.

use std::time::Duration;

use super::{Direction, Sense, SolveStatus, SolverAdapter, VarId};
use crate::error::{Error, SolverError};

/// A recorded linear constraint.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LinearRow {
    pub terms: Vec<(VarId, f64)>,
    pub sense: Sense,
    pub rhs: f64,
}

/// A recorded exponential constraint `target == scale * exp(rate * terms)`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExpRow {
    pub target: VarId,
    pub scale: f64,
    pub rate: f64,
    pub terms: Vec<(VarId, f64)>,
}

/// Records declarations and constraints so builder tests can inspect the
/// model a formulation emits. `optimize` always fails.
#[derive(Debug, Default)]
pub(crate) struct RecordingAdapter {
    pub num_binary: usize,
    pub num_continuous: usize,
    pub linear: Vec<LinearRow>,
    pub exponential: Vec<ExpRow>,
    pub objective: Option<(Vec<(VarId, f64)>, Direction)>,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_var(&self) -> VarId {
        VarId(self.num_binary + self.num_continuous)
    }
}

impl SolverAdapter for RecordingAdapter {
    fn add_binary(&mut self) -> VarId {
        let id = self.next_var();
        self.num_binary += 1;
        id
    }

    fn add_continuous(&mut self, _min: f64, _max: f64) -> VarId {
        let id = self.next_var();
        self.num_continuous += 1;
        id
    }

    fn add_linear(&mut self, terms: &[(VarId, f64)], sense: Sense, rhs: f64) {
        self.linear.push(LinearRow {
            terms: terms.to_vec(),
            sense,
            rhs,
        });
    }

    fn add_exponential(
        &mut self,
        target: VarId,
        scale: f64,
        rate: f64,
        terms: &[(VarId, f64)],
    ) -> Result<(), Error> {
        self.exponential.push(ExpRow {
            target,
            scale,
            rate,
            terms: terms.to_vec(),
        });
        Ok(())
    }

    fn set_objective(&mut self, terms: &[(VarId, f64)], direction: Direction) {
        self.objective = Some((terms.to_vec(), direction));
    }

    fn optimize(&mut self, _time_limit: Option<Duration>) -> Result<SolveStatus, Error> {
        Err(SolverError::Numerical("recording adapter cannot solve".to_string()).into())
    }

    fn value(&self, _var: VarId) -> f64 {
        0.0
    }

    fn objective_value(&self) -> f64 {
        0.0
    }
}
