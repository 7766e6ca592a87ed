//! Solver adapter layer.
//!
//! - [`SolverAdapter`] — the primitive-level contract formulations build
//!   against (declare variables, add constraints, set objective, optimize,
//!   read back values)
//! - [`MicrolpAdapter`] — pure-Rust MILP backend over `microlp`
//!
//! One adapter instance holds one model and lives for one optimize call.

mod adapter;
mod milp;

pub use adapter::{Direction, Sense, SolveStatus, SolverAdapter, VarId};
pub use milp::MicrolpAdapter;

#[cfg(test)]
pub(crate) mod testing;
