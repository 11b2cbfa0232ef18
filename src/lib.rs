//! Terminal box layout engine.
//!
//! A caller declares a tree of styled boxes with paired [`TreeBuilder::open`]
//! and [`TreeBuilder::close`] calls; closing a box folds its final size into
//! its parent, so `Fit` dimensions resolve bottom-up as the tree is built.
//! [`solve`] then distributes leftover space into `Grow` boxes and assigns
//! absolute positions, after which the tree is read-only geometry for the
//! renderer.
//!
//! Trees are cheap and short-lived by design: on every terminal resize the
//! host discards the tree, rebuilds it against the new root size, and solves
//! again. [`BoxRegistry`] keeps repaints incremental across those rebuilds
//! by tracking named boxes.

pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod render;
pub mod style;
pub mod terminal;
pub mod theme;
pub mod tree;
pub mod width;

pub use error::{LayoutError, Result};
pub use geometry::{Position, Rect, Size};
pub use layout::{SolveReport, solve};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, event_with_fields, json_kv,
};
pub use metrics::{LayoutMetrics, MetricSnapshot};
pub use registry::{BoxRegistry, BoxState};
pub use render::{AnsiRenderer, RendererSettings};
pub use style::{BoxStyle, Direction, Padding, Rgb, Sizing};
pub use terminal::{TerminalSession, next_resize, terminal_size};
pub use theme::Theme;
pub use tree::{BoxId, BoxNode, Tree, TreeBuilder};
pub use width::display_width;
