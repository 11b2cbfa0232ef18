//! Terminal module orchestrator.
//!
//! Host-side plumbing around the layout core: terminal size queries, the
//! raw-mode session guard, and resize detection. The core itself never
//! touches the terminal; these helpers feed it the root dimensions.

mod core;

pub use core::{TerminalSession, next_resize, terminal_size};
