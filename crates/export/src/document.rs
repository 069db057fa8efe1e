//! Page model: positioned drawing commands in millimetres, origin top-left.

/// A4 portrait
pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const GREY: Color = Color(148, 163, 184);
    pub const BLUE: Color = Color(37, 99, 235);
    pub const GREEN: Color = Color(22, 163, 74);
    pub const AMBER: Color = Color(217, 119, 6);
    pub const PURPLE: Color = Color(124, 58, 237);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points
    pub size: f64,
    pub bold: bool,
}

impl TextStyle {
    pub const fn normal(size: f64) -> Self {
        Self { size, bold: false }
    }

    pub const fn bold(size: f64) -> Self {
        Self { size, bold: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `y` is the baseline
    Text {
        x: f64,
        y: f64,
        text: String,
        style: TextStyle,
        align: Align,
        color: Color,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Color,
    },
    /// Filled rectangle; `(x, y)` is the top-left corner
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Color,
    },
    /// Filled closed polygon
    Polygon { points: Vec<(f64, f64)>, fill: Color },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub commands: Vec<Command>,
}

impl Page {
    /// All text drawn on the page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            Command::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    /// Index of the first page showing `needle`
    pub fn find_page(&self, needle: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.contains_text(needle))
    }
}
