use serde::{Deserialize, Serialize};

/// How a box is sized along one axis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// Caller-specified cell count, never changed by the solver.
    Fixed(u16),
    /// Shrink to the accumulated size of children, padding, and gaps.
    #[default]
    Fit,
    /// Expand into a fair share of the parent's leftover space.
    Grow,
}

impl Sizing {
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    pub fn is_grow(&self) -> bool {
        matches!(self, Self::Grow)
    }
}

/// Axis along which a box lays out its children one after another.
///
/// `Row` flows children horizontally; `Column` flows them vertically. The
/// perpendicular axis is the cross axis, where children sit side by side
/// without stacking.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Row,
    Column,
}

/// Inset applied inside a box before its children are placed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl Padding {
    pub const fn new(left: u16, right: u16, top: u16, bottom: u16) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub const fn uniform(amount: u16) -> Self {
        Self::new(amount, amount, amount, amount)
    }

    pub fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

/// 24-bit color carried through layout for the renderer; the solver never
/// reads it. Serialized as a `[r, g, b]` triple in theme files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Full declarative configuration for one box in the tree.
#[derive(Debug, Default, Clone)]
pub struct BoxStyle {
    pub width: Sizing,
    pub height: Sizing,
    pub direction: Direction,
    pub padding: Padding,
    pub gap: u16,
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    /// Optional host-facing tag used to look the box up after layout and
    /// to key damage tracking. Ignored by the solver.
    pub name: Option<String>,
}

impl BoxStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row() -> Self {
        Self {
            direction: Direction::Row,
            ..Self::default()
        }
    }

    pub fn column() -> Self {
        Self {
            direction: Direction::Column,
            ..Self::default()
        }
    }

    pub fn with_width(mut self, sizing: Sizing) -> Self {
        self.width = sizing;
        self
    }

    pub fn with_height(mut self, sizing: Sizing) -> Self {
        self.height = sizing;
        self
    }

    pub fn with_fixed(mut self, width: u16, height: u16) -> Self {
        self.width = Sizing::Fixed(width);
        self.height = Sizing::Fixed(height);
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn with_bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
