use thiserror::Error;

/// Unified result type for the boxflow crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced by the layout engine and its host-facing plumbing.
///
/// Precondition violations (solving a tree with a box still open, or an
/// empty tree) are programmer errors and assert instead of returning a
/// variant here.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("close() called with no open box")]
    NoOpenBox,
    #[error("box `{0}` not found")]
    BoxNotFound(String),
    #[error("color `{0}` not defined by the theme")]
    UnknownColor(String),
    #[error("terminal backend error: {0}")]
    Backend(String),
    #[error("theme parse error: {0}")]
    Theme(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
