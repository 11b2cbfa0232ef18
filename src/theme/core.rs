use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{LayoutError, Result};
use crate::style::Rgb;

/// A mapping of color names to RGB triples.
///
/// Theme files are flat JSON objects, e.g.
/// `{"surface": [30, 30, 46], "accent": [137, 180, 250]}`.
#[derive(Debug, Clone)]
pub struct Theme {
    colors: HashMap<String, Rgb>,
}

impl Theme {
    /// Empty theme with no colors defined.
    pub fn empty() -> Self {
        Self {
            colors: HashMap::new(),
        }
    }

    /// Parse a theme from a JSON object of `[r, g, b]` triples.
    pub fn from_json(source: &str) -> Result<Self> {
        let colors: HashMap<String, Rgb> = serde_json::from_str(source)?;
        Ok(Self { colors })
    }

    /// Load a theme file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// Resolve a named color.
    pub fn color(&self, name: &str) -> Result<Rgb> {
        self.colors
            .get(name)
            .copied()
            .ok_or_else(|| LayoutError::UnknownColor(name.to_string()))
    }

    /// Resolve a named color, falling back when the theme has no entry.
    pub fn color_or(&self, name: &str, fallback: Rgb) -> Rgb {
        self.colors.get(name).copied().unwrap_or(fallback)
    }

    pub fn set(&mut self, name: impl Into<String>, color: Rgb) {
        self.colors.insert(name.into(), color);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }
}

impl Default for Theme {
    /// Built-in dark palette used when the host supplies no theme file.
    fn default() -> Self {
        let mut theme = Self::empty();
        theme.set("background", Rgb(24, 24, 37));
        theme.set("surface", Rgb(30, 30, 46));
        theme.set("panel", Rgb(49, 50, 68));
        theme.set("text", Rgb(205, 214, 244));
        theme.set("muted", Rgb(127, 132, 156));
        theme.set("accent", Rgb(137, 180, 250));
        theme.set("warning", Rgb(249, 226, 175));
        theme.set("error", Rgb(243, 139, 168));
        theme
    }
}
