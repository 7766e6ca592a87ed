//! Error taxonomy for dataset validation, calibration, and solving.

use thiserror::Error;

use crate::models::{DestId, OriginId};

/// Problems with the input dataset, detected before any model is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    /// The dataset has no origins.
    #[error("dataset has no origins")]
    NoOrigins,

    /// The dataset has no destinations.
    #[error("dataset has no destinations")]
    NoDestinations,

    /// An origin has no entry in the distance table.
    #[error("origin {0} has no reachable destination")]
    UnreachableOrigin(OriginId),

    /// An origin has no population weight.
    #[error("origin {0} has no population weight")]
    MissingPopulation(OriginId),

    /// A population weight is negative.
    #[error("origin {origin} has negative population weight {weight}")]
    NegativeWeight { origin: OriginId, weight: f64 },

    /// A distance entry is negative.
    #[error("distance for pair ({origin}, {destination}) is negative: {distance}")]
    NegativeDistance {
        origin: OriginId,
        destination: DestId,
        distance: f64,
    },

    /// A forced-open destination is not in the destination set.
    #[error("forced-open destination {0} is not a known destination")]
    UnknownExisting(DestId),

    /// Every origin has zero population weight.
    #[error("all origins have zero population weight")]
    ZeroPopulation,
}

/// Failures while calibrating the equity coefficient alpha.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// No facilities are open and no candidates exist to bootstrap from.
    #[error("no baseline facilities available for calibration")]
    EmptyBaseline,

    /// An origin cannot reach any facility in the baseline set.
    #[error("origin {0} cannot reach any baseline facility")]
    UnreachableFromBaseline(OriginId),

    /// The weighted distance distribution carries no information
    /// (all weights zero, or every nearest distance is zero).
    #[error("degenerate baseline: weighted squared distances sum to zero")]
    DegenerateBaseline,
}

/// The model admits no feasible facility selection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InfeasibleModelError {
    /// More facilities requested than destinations exist.
    #[error("open target {requested} exceeds destination count {available}")]
    OpenTargetExceedsDestinations { requested: usize, available: usize },

    /// Fewer facilities requested than are already forced open.
    #[error("open target {requested} is below the {existing} forced-open facilities")]
    OpenTargetBelowExisting { requested: usize, existing: usize },

    /// The solver proved the model infeasible.
    #[error("solver reported the model infeasible")]
    SolverReported,
}

/// Solver-internal failure: the run terminated without a usable solution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// The objective is unbounded (indicates a malformed model).
    #[error("solver reported the model unbounded")]
    Unbounded,

    /// Numerical failure inside the solver.
    #[error("solver numerical failure: {0}")]
    Numerical(String),

    /// The time or iteration bound was exceeded without a feasible solution.
    #[error("solver exceeded its time or iteration bound")]
    Timeout,

    /// The backend does not support a constraint the formulation needs.
    #[error("solver backend does not support {0}")]
    UnsupportedConstraint(String),
}

/// Any failure surfaced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error(transparent)]
    Infeasible(#[from] InfeasibleModelError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}
