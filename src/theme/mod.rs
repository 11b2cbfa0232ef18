//! Theme module orchestrator.
//!
//! Named color palettes supplied by the host. Layout treats the values as
//! opaque data; only the renderer interprets them. Implementation details
//! live in the private `core` module.

mod core;

pub use core::Theme;
