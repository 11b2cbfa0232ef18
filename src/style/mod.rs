//! Style module orchestrator.
//!
//! Declarative box styling: per-axis sizing modes, child flow direction,
//! padding, gap, and colors. The implementation lives in the private
//! `core` module.

mod core;

pub use core::{BoxStyle, Direction, Padding, Rgb, Sizing};
