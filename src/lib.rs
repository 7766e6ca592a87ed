//! # equiloc
//!
//! Equity-aware facility location library providing MIP formulations,
//! Kolm-Pollak calibration, and a pluggable solver adapter for choosing
//! which facilities to open.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Dataset, Solution, Assignment)
//! - [`calibrate`] — Kolm-Pollak kappa/alpha calibration and EDE evaluation
//! - [`transform`] — Exponential distance coefficients with the long-edge clamp
//! - [`solver`] — Solver-primitive contract and the microlp backend
//! - [`formulations`] — The five formulation builders over a shared scaffold
//! - [`run`] — One-call calibrate-build-solve dispatch
//! - [`error`] — Error taxonomy

pub mod calibrate;
pub mod error;
pub mod formulations;
pub mod models;
pub mod run;
pub mod solver;
pub mod transform;
