//! Tree module orchestrator.
//!
//! Stack-based construction of the styled box tree: paired `open`/`close`
//! calls produce an arena-owned tree plus the post-order list that drives
//! bottom-up fit sizing. Implementation details live in the private `core`
//! module.

mod core;

pub use core::{BoxId, BoxNode, Tree, TreeBuilder};
