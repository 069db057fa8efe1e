//! Minimal PDF 1.4 writer: base-14 Helvetica fonts, one uncompressed
//! content stream per page, classic cross-reference table.

use std::fmt::Write as _;

use crate::document::{Align, Color, Command, Document, Page, PAGE_HEIGHT, PAGE_WIDTH};
use crate::fonts::text_width_mm;

const POINTS_PER_MM: f64 = 72.0 / 25.4;
/// Objects 1-4 are the catalog, the page tree and the two fonts
const FIRST_PAGE_OBJECT: usize = 5;

fn pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

/// Page millimetres (top-left origin) to PDF points (bottom-left origin)
fn to_pdf(x: f64, y: f64) -> (f64, f64) {
    (pt(x), pt(PAGE_HEIGHT - y))
}

fn rgb(color: Color) -> String {
    let c = |v: u8| f64::from(v) / 255.0;
    format!("{:.3} {:.3} {:.3}", c(color.0), c(color.1), c(color.2))
}

/// WinAnsiEncoding byte for `c`, `?` when the glyph is missing
fn win_ansi(c: char) -> u8 {
    match c {
        '€' => 0x80,
        '…' => 0x85,
        'Œ' => 0x8C,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        'œ' => 0x9C,
        '\u{202f}' => 0xA0,
        c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
        _ => b'?',
    }
}

/// PDF literal string; non-ASCII bytes as octal escapes
fn literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for byte in text.chars().map(win_ansi) {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(byte as char);
            }
            0x20..=0x7E => out.push(byte as char),
            other => {
                let _ = write!(out, "\\{other:03o}");
            }
        }
    }
    out.push(')');
    out
}

fn content_stream(page: &Page) -> String {
    let mut out = String::new();
    for command in &page.commands {
        match command {
            Command::Text {
                x,
                y,
                text,
                style,
                align,
                color,
            } => {
                let width = text_width_mm(text, style.size, style.bold);
                let left = match align {
                    Align::Left => *x,
                    Align::Center => x - width / 2.0,
                    Align::Right => x - width,
                };
                let (px, py) = to_pdf(left, *y);
                let font = if style.bold { "F2" } else { "F1" };
                let _ = writeln!(
                    out,
                    "BT {} rg /{font} {:.1} Tf {px:.2} {py:.2} Td {} Tj ET",
                    rgb(*color),
                    style.size,
                    literal(text)
                );
            }
            Command::Line {
                from,
                to,
                width,
                color,
            } => {
                let (x1, y1) = to_pdf(from.0, from.1);
                let (x2, y2) = to_pdf(to.0, to.1);
                let _ = writeln!(
                    out,
                    "{} RG {:.2} w {x1:.2} {y1:.2} m {x2:.2} {y2:.2} l S",
                    rgb(*color),
                    pt(*width)
                );
            }
            Command::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                let (px, py) = to_pdf(*x, y + height);
                let _ = writeln!(
                    out,
                    "{} rg {px:.2} {py:.2} {:.2} {:.2} re f",
                    rgb(*fill),
                    pt(*width),
                    pt(*height)
                );
            }
            Command::Polygon { points, fill } => {
                let Some((first, rest)) = points.split_first() else {
                    continue;
                };
                let (fx, fy) = to_pdf(first.0, first.1);
                let _ = write!(out, "{} rg {fx:.2} {fy:.2} m", rgb(*fill));
                for point in rest {
                    let (px, py) = to_pdf(point.0, point.1);
                    let _ = write!(out, " {px:.2} {py:.2} l");
                }
                out.push_str(" h f\n");
            }
        }
    }
    out
}

/// Accumulates numbered objects and records their byte offsets
struct Writer {
    buffer: Vec<u8>,
    offsets: Vec<usize>,
}

impl Writer {
    fn new() -> Self {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buffer,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, body: &str) {
        self.offsets.push(self.buffer.len());
        let number = self.offsets.len();
        self.buffer
            .extend_from_slice(format!("{number} 0 obj\n{body}\nendobj\n").as_bytes());
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_at = self.buffer.len();
        let count = self.offsets.len() + 1;
        let mut table = format!("xref\n0 {count}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            let _ = writeln!(table, "{offset:010} 00000 n ");
        }
        let _ = write!(
            table,
            "trailer\n<< /Size {count} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n"
        );
        self.buffer.extend_from_slice(table.as_bytes());
        self.buffer
    }
}

pub(crate) fn serialize(document: &Document) -> Vec<u8> {
    let page_count = document.pages.len();
    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", FIRST_PAGE_OBJECT + 2 * i))
        .collect();

    let mut writer = Writer::new();
    writer.object("<< /Type /Catalog /Pages 2 0 R >>");
    writer.object(&format!(
        "<< /Type /Pages /Kids [{}] /Count {page_count} >>",
        kids.join(" ")
    ));
    writer.object("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>");
    writer.object(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
    );

    for (i, page) in document.pages.iter().enumerate() {
        let contents = FIRST_PAGE_OBJECT + 2 * i + 1;
        writer.object(&format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {contents} 0 R >>",
            pt(PAGE_WIDTH),
            pt(PAGE_HEIGHT)
        ));
        let stream = content_stream(page);
        writer.object(&format!(
            "<< /Length {} >>\nstream\n{stream}endstream",
            stream.len()
        ));
    }

    writer.finish()
}
