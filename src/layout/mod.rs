//! Layout module orchestrator.
//!
//! The solver turns a fully built tree into concrete geometry: a top-down
//! grow-distribution pass followed by a top-down position pass. The
//! implementation lives in the private `core` module.

mod core;

pub use core::{SolveReport, solve};
