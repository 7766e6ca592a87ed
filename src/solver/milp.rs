//! MILP backend over the pure-Rust `microlp` solver.

use std::time::Duration;

use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};
use tracing::debug;

use super::{Direction, Sense, SolveStatus, SolverAdapter, VarId};
use crate::error::{Error, InfeasibleModelError, SolverError};

#[derive(Debug, Clone, Copy)]
enum VarSpec {
    Binary,
    Continuous { min: f64, max: f64 },
}

#[derive(Debug, Clone)]
struct Row {
    terms: Vec<(usize, f64)>,
    sense: Sense,
    rhs: f64,
}

/// [`SolverAdapter`] over [`microlp`].
///
/// microlp fixes objective coefficients at variable creation, so this
/// adapter buffers all declarations and builds the `microlp::Problem` once
/// `optimize` runs. Exponential-of-expression constraints are not supported
/// by a linear backend and fail with
/// [`SolverError::UnsupportedConstraint`]. microlp has no interruption hook,
/// so the time bound is advisory: the solve always runs to completion and
/// never returns a partial solution.
///
/// # Examples
///
/// ```
/// use equiloc::solver::{Direction, MicrolpAdapter, Sense, SolveStatus, SolverAdapter};
///
/// let mut solver = MicrolpAdapter::new();
/// let a = solver.add_binary();
/// let b = solver.add_binary();
/// solver.add_linear(&[(a, 1.0), (b, 1.0)], Sense::Eq, 1.0);
/// solver.set_objective(&[(a, 2.0), (b, 1.0)], Direction::Minimize);
/// assert_eq!(solver.optimize(None).unwrap(), SolveStatus::Optimal);
/// assert!(solver.value(b) > 0.5);
/// ```
#[derive(Debug, Default)]
pub struct MicrolpAdapter {
    vars: Vec<VarSpec>,
    rows: Vec<Row>,
    objective: Vec<(usize, f64)>,
    direction: Direction,
    values: Option<Vec<f64>>,
    objective_value: f64,
}

impl MicrolpAdapter {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SolverAdapter for MicrolpAdapter {
    fn add_binary(&mut self) -> VarId {
        self.vars.push(VarSpec::Binary);
        VarId(self.vars.len() - 1)
    }

    fn add_continuous(&mut self, min: f64, max: f64) -> VarId {
        self.vars.push(VarSpec::Continuous { min, max });
        VarId(self.vars.len() - 1)
    }

    fn add_linear(&mut self, terms: &[(VarId, f64)], sense: Sense, rhs: f64) {
        self.rows.push(Row {
            terms: terms.iter().map(|&(v, c)| (v.0, c)).collect(),
            sense,
            rhs,
        });
    }

    fn add_exponential(
        &mut self,
        _target: VarId,
        _scale: f64,
        _rate: f64,
        _terms: &[(VarId, f64)],
    ) -> Result<(), Error> {
        Err(SolverError::UnsupportedConstraint(
            "exponential-of-expression constraints".to_string(),
        )
        .into())
    }

    fn set_objective(&mut self, terms: &[(VarId, f64)], direction: Direction) {
        self.objective = terms.iter().map(|&(v, c)| (v.0, c)).collect();
        self.direction = direction;
    }

    fn optimize(&mut self, _time_limit: Option<Duration>) -> Result<SolveStatus, Error> {
        let direction = match self.direction {
            Direction::Minimize => OptimizationDirection::Minimize,
            Direction::Maximize => OptimizationDirection::Maximize,
        };
        let mut problem = Problem::new(direction);

        let mut obj_coeffs = vec![0.0; self.vars.len()];
        for &(idx, coeff) in &self.objective {
            obj_coeffs[idx] = coeff;
        }

        let handles: Vec<microlp::Variable> = self
            .vars
            .iter()
            .enumerate()
            .map(|(idx, spec)| match *spec {
                VarSpec::Binary => problem.add_binary_var(obj_coeffs[idx]),
                VarSpec::Continuous { min, max } => problem.add_var(obj_coeffs[idx], (min, max)),
            })
            .collect();

        for row in &self.rows {
            let mut expr = LinearExpr::empty();
            for &(idx, coeff) in &row.terms {
                expr.add(handles[idx], coeff);
            }
            let op = match row.sense {
                Sense::Le => ComparisonOp::Le,
                Sense::Ge => ComparisonOp::Ge,
                Sense::Eq => ComparisonOp::Eq,
            };
            problem.add_constraint(expr, op, row.rhs);
        }

        debug!(
            vars = self.vars.len(),
            rows = self.rows.len(),
            "solving MILP"
        );
        let solution = problem.solve().map_err(|e| -> Error {
            match e {
                microlp::Error::Infeasible => InfeasibleModelError::SolverReported.into(),
                microlp::Error::Unbounded => SolverError::Unbounded.into(),
                other => SolverError::Numerical(other.to_string()).into(),
            }
        })?;

        self.objective_value = solution.objective();
        self.values = Some(handles.iter().map(|&h| solution[h]).collect());
        Ok(SolveStatus::Optimal)
    }

    fn value(&self, var: VarId) -> f64 {
        self.values
            .as_ref()
            .expect("optimize() must succeed before reading values")[var.0]
    }

    fn objective_value(&self) -> f64 {
        self.objective_value
    }
}
