//! The solver-primitive contract.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Opaque handle to a declared decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Position of the variable in declaration order.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Comparison sense of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Left-hand side `<=` right-hand side.
    Le,
    /// Left-hand side `>=` right-hand side.
    Ge,
    /// Left-hand side `==` right-hand side.
    Eq,
}

/// Objective direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Minimize,
    Maximize,
}

/// Terminal state a solution may be decoded from.
///
/// Anything else (infeasible, unbounded, interrupted without an incumbent)
/// surfaces as an error instead; no partial results are ever returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Proven optimal.
    Optimal,
    /// Feasible incumbent accepted by the caller (e.g. at a time bound).
    Feasible,
}

/// A MILP/MINLP engine reduced to the primitives the formulations need.
///
/// Implementations own one model. Formulations declare variables, add
/// constraints over `(variable, coefficient)` terms, set a linear objective,
/// and run one blocking `optimize`; afterwards `value` reads each variable
/// back (binaries are subject to floating tolerance and are rounded by the
/// caller).
pub trait SolverAdapter {
    /// Declares a binary decision variable.
    fn add_binary(&mut self) -> VarId;

    /// Declares a continuous decision variable with the given bounds.
    fn add_continuous(&mut self, min: f64, max: f64) -> VarId;

    /// Adds the linear constraint `sum(terms) <sense> rhs`.
    fn add_linear(&mut self, terms: &[(VarId, f64)], sense: Sense, rhs: f64);

    /// Adds the constraint `target == scale * exp(rate * sum(terms))`,
    /// composing the exponential with a linear expression.
    ///
    /// Linear-only backends fail with
    /// [`SolverError::UnsupportedConstraint`](crate::error::SolverError).
    fn add_exponential(
        &mut self,
        target: VarId,
        scale: f64,
        rate: f64,
        terms: &[(VarId, f64)],
    ) -> Result<(), Error>;

    /// Sets the linear objective and its direction.
    fn set_objective(&mut self, terms: &[(VarId, f64)], direction: Direction);

    /// Runs the solver, blocking until a terminal state.
    ///
    /// A time bound without a feasible incumbent is a
    /// [`SolverError::Timeout`](crate::error::SolverError); solver-proven
    /// infeasibility is an
    /// [`InfeasibleModelError`](crate::error::InfeasibleModelError).
    fn optimize(&mut self, time_limit: Option<Duration>) -> Result<SolveStatus, Error>;

    /// Solved value of a variable. Only meaningful after `optimize`
    /// returned a terminal state.
    fn value(&self, var: VarId) -> f64;

    /// Objective value of the solved model.
    fn objective_value(&self) -> f64;
}
