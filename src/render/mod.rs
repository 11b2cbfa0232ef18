//! Render module orchestrator.
//!
//! ANSI emission of a solved tree: filled, colored rects for every styled
//! box, plus text blitting into named boxes. The renderer only reads the
//! tree; layout never depends on it.

mod core;

pub use core::{AnsiRenderer, RendererSettings};
