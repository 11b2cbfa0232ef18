use std::io::stdout;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::ExecutableCommand;

use crate::error::{LayoutError, Result};
use crate::geometry::Size;

/// Query the attached terminal's dimensions, for use as the root box's
/// `Fixed` width and height.
pub fn terminal_size() -> Result<Size> {
    let (width, height) =
        crossterm::terminal::size().map_err(|err| LayoutError::Backend(err.to_string()))?;
    Ok(Size::new(width, height))
}

/// RAII guard for a full-screen session: raw mode plus alternate screen on
/// construction, both restored on drop.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn begin() -> Result<Self> {
        enable_raw_mode().map_err(|err| LayoutError::Backend(err.to_string()))?;
        if let Err(err) = stdout().execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(LayoutError::Backend(err.to_string()));
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Best effort: leave the user's terminal usable even if teardown
        // half-fails.
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Wait up to `timeout` for the terminal to be resized.
///
/// A burst of resize events is coalesced into the newest size. On resize
/// the host must discard its tree, rebuild it against the new root size,
/// and solve again; there is no incremental relayout.
pub fn next_resize(timeout: Duration) -> Result<Option<Size>> {
    let mut latest = None;

    let mut budget = timeout;
    loop {
        let ready =
            event::poll(budget).map_err(|err| LayoutError::Backend(err.to_string()))?;
        if !ready {
            break;
        }
        let event = event::read().map_err(|err| LayoutError::Backend(err.to_string()))?;
        if let Event::Resize(width, height) = event {
            latest = Some(Size::new(width, height));
        }
        // Drain whatever queued up without waiting again.
        budget = Duration::ZERO;
    }

    Ok(latest)
}
