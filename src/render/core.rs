use std::io::Write;

use crate::display_width;
use crate::error::Result;
use crate::geometry::Rect;
use crate::registry::BoxState;
use crate::style::Rgb;
use crate::tree::{BoxId, Tree};

/// Renderer runtime parameters.
#[derive(Debug, Clone, Default)]
pub struct RendererSettings {
    /// Cursor position to restore after a frame, as a 0-based (row, col).
    pub restore_cursor: Option<(u16, u16)>,
}

/// ANSI escape code renderer writing directly to a terminal handle.
pub struct AnsiRenderer {
    settings: RendererSettings,
}

impl AnsiRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(RendererSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut RendererSettings {
        &mut self.settings
    }

    /// Paint every box of a solved tree, parents before children so nested
    /// boxes draw over their ancestors.
    pub fn render(&mut self, writer: &mut impl Write, tree: &Tree) -> Result<()> {
        paint_box(writer, tree, tree.root())?;
        self.finish_frame(writer)
    }

    /// Write dirty content into its boxes, clipped and padded to each rect.
    pub fn blit(&mut self, writer: &mut impl Write, dirty: &[(String, BoxState)]) -> Result<()> {
        for (_name, state) in dirty {
            blit_content(writer, state)?;
        }
        self.finish_frame(writer)
    }

    fn finish_frame(&self, writer: &mut impl Write) -> Result<()> {
        if let Some((row, col)) = self.settings.restore_cursor {
            write!(writer, "\x1b[{};{}H", row + 1, col + 1)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn paint_box(writer: &mut impl Write, tree: &Tree, id: BoxId) -> Result<()> {
    let node = tree.node(id);
    fill_rect(writer, node.rect(), node.style.fg, node.style.bg)?;
    for child in &node.children {
        paint_box(writer, tree, *child)?;
    }
    Ok(())
}

fn fill_rect(
    writer: &mut impl Write,
    rect: Rect,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
) -> Result<()> {
    if rect.width == 0 || rect.height == 0 {
        return Ok(());
    }
    let sgr = sgr_prefix(fg, bg);
    if sgr.is_empty() {
        return Ok(());
    }

    let blank = " ".repeat(rect.width as usize);
    for row in 0..rect.height {
        write!(writer, "\x1b[{};{}H", rect.y + row + 1, rect.x + 1)?;
        write!(writer, "{sgr}{blank}\x1b[0m")?;
    }
    Ok(())
}

fn blit_content(writer: &mut impl Write, state: &BoxState) -> Result<()> {
    let Rect {
        x,
        y,
        width,
        height,
    } = state.rect;

    if width == 0 || height == 0 {
        return Ok(());
    }

    let sgr = sgr_prefix(state.fg, state.bg);

    let mut lines: Vec<String> = state
        .content
        .split('\n')
        .take(height as usize)
        .map(|line| clip_line(line, width))
        .collect();

    while lines.len() < height as usize {
        lines.push(String::new());
    }

    for (offset, line) in lines.iter_mut().enumerate() {
        pad_line(line, width);
        write!(writer, "\x1b[{};{}H", y + offset as u16 + 1, x + 1)?;
        if sgr.is_empty() {
            write!(writer, "{line}")?;
        } else {
            write!(writer, "{sgr}{line}\x1b[0m")?;
        }
    }

    Ok(())
}

fn sgr_prefix(fg: Option<Rgb>, bg: Option<Rgb>) -> String {
    let mut sgr = String::new();
    if let Some(Rgb(r, g, b)) = fg {
        sgr.push_str(&format!("\x1b[38;2;{r};{g};{b}m"));
    }
    if let Some(Rgb(r, g, b)) = bg {
        sgr.push_str(&format!("\x1b[48;2;{r};{g};{b}m"));
    }
    sgr
}

fn clip_line(line: &str, width: u16) -> String {
    let mut clipped = line.to_string();
    while display_width(&clipped) > width as usize {
        clipped.pop();
    }
    clipped
}

fn pad_line(line: &mut String, width: u16) {
    let mut display = display_width(line) as u16;
    while display < width {
        line.push(' ');
        display += 1;
    }
}
