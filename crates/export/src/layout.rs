//! Cursor-driven page writer shared by both documents.

use domain::entities::Subsection;

use crate::document::{Align, Color, Command, Page, TextStyle, PAGE_WIDTH};
use crate::fonts::text_width_mm;

pub const MARGIN: f64 = 20.0;
pub const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;
/// Body lines start a new page once the cursor passes this
pub const BODY_LIMIT: f64 = 270.0;
/// Subsection titles need room for at least a few lines under them
pub const SUBSECTION_LIMIT: f64 = 250.0;

pub const SECTION_TITLE: TextStyle = TextStyle::bold(16.0);
pub const BODY: TextStyle = TextStyle::normal(11.0);
pub const SUBSECTION_TITLE: TextStyle = TextStyle::bold(12.0);
pub const SUBSECTION_BODY: TextStyle = TextStyle::normal(10.0);

const BODY_LINE: f64 = 6.0;
const SUBSECTION_LINE: f64 = 5.0;
const SUBSECTION_INDENT: f64 = 5.0;

/// Greedy word wrap by estimated width. Explicit newlines start new lines;
/// a single word wider than `max_width` gets a line of its own.
pub fn wrap_text(text: &str, max_width: f64, style: TextStyle) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if !current.is_empty() && text_width_mm(&candidate, style.size, style.bold) > max_width {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Appends commands to the last page, breaking pages as the cursor moves down
#[derive(Debug)]
pub struct PageWriter {
    pages: Vec<Page>,
    cursor: f64,
}

impl Default for PageWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PageWriter {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            cursor: MARGIN,
        }
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn move_to(&mut self, y: f64) {
        self.cursor = y;
    }

    pub fn advance(&mut self, dy: f64) {
        self.cursor += dy;
    }

    /// Zero-based index of the page being written
    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = MARGIN;
    }

    pub fn push(&mut self, command: Command) {
        if let Some(page) = self.pages.last_mut() {
            page.commands.push(command);
        }
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, style: TextStyle, align: Align) {
        self.colored_text(x, y, text, style, align, Color::BLACK);
    }

    pub fn colored_text(
        &mut self,
        x: f64,
        y: f64,
        text: impl Into<String>,
        style: TextStyle,
        align: Align,
        color: Color,
    ) {
        self.push(Command::Text {
            x,
            y,
            text: text.into(),
            style,
            align,
            color,
        });
    }

    fn lines(&mut self, lines: Vec<String>, x: f64, style: TextStyle, line_height: f64) {
        for line in lines {
            if self.cursor > BODY_LIMIT {
                self.new_page();
            }
            let y = self.cursor;
            self.text(x, y, line, style, Align::Left);
            self.cursor += line_height;
        }
    }

    pub fn section_title(&mut self, title: &str) {
        let y = self.cursor;
        self.text(MARGIN, y, title, SECTION_TITLE, Align::Left);
        self.cursor += 15.0;
    }

    pub fn paragraph(&mut self, text: &str) {
        let lines = wrap_text(text, CONTENT_WIDTH, BODY);
        self.lines(lines, MARGIN, BODY, BODY_LINE);
    }

    /// Bulleted items, one wrapped paragraph each
    pub fn bullets(&mut self, items: &[String]) {
        for item in items {
            self.paragraph(&format!("• {item}"));
        }
    }

    pub fn subsection(&mut self, title: &str, content: &str) {
        if self.cursor > SUBSECTION_LIMIT {
            self.new_page();
        }
        let y = self.cursor;
        self.text(MARGIN, y, title, SUBSECTION_TITLE, Align::Left);
        self.cursor += 8.0;

        let lines = wrap_text(content, CONTENT_WIDTH - SUBSECTION_INDENT, SUBSECTION_BODY);
        self.lines(lines, MARGIN + SUBSECTION_INDENT, SUBSECTION_BODY, SUBSECTION_LINE);
        self.cursor += 5.0;
    }

    /// Title, body, then subsections when the list is present (even if empty)
    pub fn section(&mut self, title: &str, content: &str, subsections: Option<&[Subsection]>) {
        self.section_title(title);
        self.paragraph(content);
        if let Some(subsections) = subsections {
            self.cursor += 10.0;
            for subsection in subsections {
                self.subsection(&subsection.title, &subsection.content);
            }
        }
    }

    /// Claim `height` millimetres for a drawing, breaking the page first if
    /// it would run past the body limit. Returns the top of the claimed band.
    pub fn reserve(&mut self, height: f64) -> f64 {
        if self.cursor + height > BODY_LIMIT {
            self.new_page();
        }
        let top = self.cursor;
        self.cursor += height;
        top
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }
}
