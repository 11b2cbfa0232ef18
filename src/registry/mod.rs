//! Registry module orchestrator.
//!
//! Damage tracking for named boxes across tree rebuilds: the host tags
//! boxes with stable names, rebuilds the tree on every resize, and the
//! registry works out which boxes actually need repainting.

mod core;

pub use core::{BoxRegistry, BoxState};
