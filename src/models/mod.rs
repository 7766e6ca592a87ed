//! Domain model types for facility siting problems.
//!
//! Provides the core abstractions: a read-only dataset of origins, candidate
//! destinations, population weights, and sparse travel distances, plus the
//! solution type produced by the formulation solvers.

mod dataset;
mod solution;

pub use dataset::{Dataset, DestId, OriginId};
pub use solution::{Assignment, Solution};
