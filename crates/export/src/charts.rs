//! Bar, line and pie charts drawn from primitives into a reserved band.

use std::f64::consts::PI;

use crate::document::{Align, Color, Command, TextStyle};
use crate::layout::PageWriter;

const LABEL: TextStyle = TextStyle::normal(8.0);
const LEGEND: TextStyle = TextStyle::normal(9.0);
const PALETTE: [Color; 4] = [Color::BLUE, Color::GREEN, Color::AMBER, Color::PURPLE];
/// Vertical room left under the plot for category labels
const LABEL_BAND: f64 = 8.0;

/// Drawing area in page millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// One category with a company and a sector value
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub label: String,
    pub company: f64,
    pub sector: f64,
}

fn axis(writer: &mut PageWriter, frame: Frame) {
    writer.push(Command::Line {
        from: (frame.x, frame.bottom()),
        to: (frame.x + frame.width, frame.bottom()),
        width: 0.3,
        color: Color::GREY,
    });
    writer.push(Command::Line {
        from: (frame.x, frame.y),
        to: (frame.x, frame.bottom()),
        width: 0.3,
        color: Color::GREY,
    });
}

fn legend(writer: &mut PageWriter, x: f64, y: f64, entries: &[(String, Color)]) {
    for (i, (label, color)) in entries.iter().enumerate() {
        let row = y + i as f64 * 5.0;
        writer.push(Command::Rect {
            x,
            y: row - 3.0,
            width: 3.0,
            height: 3.0,
            fill: *color,
        });
        writer.text(x + 5.0, row, label.clone(), LEGEND, Align::Left);
    }
}

fn series_legend(writer: &mut PageWriter, frame: Frame) {
    legend(
        writer,
        frame.x + frame.width - 35.0,
        frame.y + 3.0,
        &[
            ("Entreprise".to_string(), Color::BLUE),
            ("Secteur".to_string(), Color::GREY),
        ],
    );
}

fn no_data(writer: &mut PageWriter, frame: Frame) {
    writer.text(
        frame.x + frame.width / 2.0,
        frame.y + frame.height / 2.0,
        "Aucune donnée",
        LEGEND,
        Align::Center,
    );
}

/// Grouped bars, company beside sector, scaled to the largest value.
/// Negative values are drawn as empty bars.
pub fn bar_chart(writer: &mut PageWriter, frame: Frame, pairs: &[Pair]) {
    if pairs.is_empty() {
        no_data(writer, frame);
        return;
    }
    let plot = Frame {
        height: frame.height - LABEL_BAND,
        ..frame
    };
    axis(writer, plot);

    let max = pairs
        .iter()
        .flat_map(|p| [p.company, p.sector])
        .fold(0.0_f64, f64::max);
    let scale = if max > 0.0 { plot.height * 0.85 / max } else { 0.0 };

    let slot = plot.width / pairs.len() as f64;
    let bar = slot * 0.3;
    for (i, pair) in pairs.iter().enumerate() {
        let left = plot.x + i as f64 * slot + slot * 0.15;
        for (offset, value, color) in [(0.0, pair.company, Color::BLUE), (bar, pair.sector, Color::GREY)] {
            let height = value.max(0.0) * scale;
            writer.push(Command::Rect {
                x: left + offset,
                y: plot.bottom() - height,
                width: bar,
                height,
                fill: color,
            });
        }
        writer.text(
            left + bar,
            plot.bottom() + 5.0,
            pair.label.clone(),
            LABEL,
            Align::Center,
        );
    }
    series_legend(writer, plot);
}

/// Two polylines over the shared value range of both series
pub fn line_chart(writer: &mut PageWriter, frame: Frame, pairs: &[Pair]) {
    if pairs.is_empty() {
        no_data(writer, frame);
        return;
    }
    let plot = Frame {
        height: frame.height - LABEL_BAND,
        ..frame
    };
    axis(writer, plot);

    let values = pairs.iter().flat_map(|p| [p.company, p.sector]);
    let (mut low, mut high) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if (high - low).abs() < f64::EPSILON {
        low -= 1.0;
        high += 1.0;
    }
    let usable = plot.height * 0.85;
    let y_of = |v: f64| plot.bottom() - (v - low) / (high - low) * usable;
    let step = if pairs.len() > 1 {
        plot.width * 0.9 / (pairs.len() - 1) as f64
    } else {
        0.0
    };
    let x_of = |i: usize| plot.x + plot.width * 0.05 + i as f64 * step;

    let series: [(fn(&Pair) -> f64, Color); 2] =
        [(|p| p.company, Color::BLUE), (|p| p.sector, Color::GREY)];
    for (pick, color) in series {
        let points: Vec<(f64, f64)> = pairs
            .iter()
            .enumerate()
            .map(|(i, p)| (x_of(i), y_of(pick(p))))
            .collect();
        for segment in points.windows(2) {
            writer.push(Command::Line {
                from: segment[0],
                to: segment[1],
                width: 0.8,
                color,
            });
        }
        for &(x, y) in &points {
            writer.push(Command::Rect {
                x: x - 0.8,
                y: y - 0.8,
                width: 1.6,
                height: 1.6,
                fill: color,
            });
        }
    }

    for (i, pair) in pairs.iter().enumerate() {
        writer.text(x_of(i), plot.bottom() + 5.0, pair.label.clone(), LABEL, Align::Center);
    }
    series_legend(writer, plot);
}

/// Wedges proportional to each value, approximated by polygons
pub fn pie_chart(writer: &mut PageWriter, frame: Frame, slices: &[(String, f64)]) {
    let total: f64 = slices.iter().map(|(_, v)| v.max(0.0)).sum();
    if total <= 0.0 {
        no_data(writer, frame);
        return;
    }

    let radius = (frame.height / 2.0).min(frame.width / 4.0) - 2.0;
    let center = (frame.x + radius + 2.0, frame.y + frame.height / 2.0);
    let mut start = -PI / 2.0;
    let mut entries = Vec::with_capacity(slices.len());

    for (i, (label, value)) in slices.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let sweep = value.max(0.0) / total * 2.0 * PI;
        if sweep > 0.0 {
            writer.push(Command::Polygon {
                points: wedge(center, radius, start, sweep),
                fill: color,
            });
        }
        start += sweep;
        entries.push((format!("{label} ({value:.0})"), color));
    }

    legend(writer, center.0 + radius + 10.0, frame.y + 8.0, &entries);
}

fn wedge(center: (f64, f64), radius: f64, start: f64, sweep: f64) -> Vec<(f64, f64)> {
    // Roughly one vertex per 5 degrees
    let steps = ((sweep / (PI / 36.0)).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for k in 0..=steps {
        let angle = start + sweep * k as f64 / steps as f64;
        points.push((
            center.0 + radius * angle.cos(),
            center.1 + radius * angle.sin(),
        ));
    }
    points
}
