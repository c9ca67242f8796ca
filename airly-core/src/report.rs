//! Plain-text rendering of a shaped report: a vertical bar chart in a rounded box.
//!
//! Output contains no terminal escapes; colouring is left to the caller.

use chrono::{DateTime, Utc};
use unicode_width::UnicodeWidthStr;

use crate::{InstallationInfo, ShapedMeasurement};

pub const CHART_TITLE: &str = "Particulate Matter (PM) in μg/m3:";
pub const GUIDELINE_HEADER: &str = "Air quality guidelines recommended by WHO (24-hour mean):";
pub const GUIDELINES: [&str; 2] = ["PM 10: 50 μg/m3", "PM 2.5: 25 μg/m3"];
pub const READ_MORE: &str = "Read more about air quality here: https://bit.ly/2tbIhek";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    /// Blank columns left of each bar.
    pub padding: usize,
    pub bar_width: usize,
    /// Rows used by the tallest bar.
    pub height: usize,
    pub glyph: char,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self { padding: 3, bar_width: 5, height: 6, glyph: '+' }
    }
}

/// A shaped, ready-to-render report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub measurements: Vec<ShapedMeasurement>,
    pub installation: InstallationInfo,
    pub from: Option<DateTime<Utc>>,
    pub till: Option<DateTime<Utc>>,
}

impl Report {
    /// True when filtering left nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn caption(&self) -> String {
        caption(&self.installation)
    }

    /// Averaging window of the current values, when upstream reported one.
    pub fn window(&self) -> Option<String> {
        let (from, till) = (self.from?, self.till?);
        Some(format!(
            "Measured {}-{} UTC ({})",
            from.format("%H:%M"),
            till.format("%H:%M"),
            till.format("%Y-%m-%d")
        ))
    }

    pub fn render(&self, style: &ChartStyle) -> String {
        let mut body = vec![CHART_TITLE.to_string(), String::new()];
        body.extend(render_chart(&self.measurements, style).lines().map(str::to_string));
        body.push(String::new());
        body.push(self.caption());
        body.extend(self.window());

        boxed(&body)
    }
}

pub fn caption(info: &InstallationInfo) -> String {
    let place = match &info.street {
        Some(street) => format!("{street}, {}, {}", info.city, info.country),
        None => format!("{}, {}", info.city, info.country),
    };
    format!("[Data from sensor nr. {} located in {place}]", info.id)
}

fn format_value(value: f64) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Writes `text` centred over the cell `[start, start + width)`.
///
/// Text wider than the cell spills into the neighbouring padding rather than being cut.
fn place(row: &mut Vec<char>, start: usize, width: usize, text: &str) {
    let len = text.chars().count();
    let from = if len <= width { start + (width - len) / 2 } else { start.saturating_sub((len - width) / 2) };

    if row.len() < from + len {
        row.resize(from + len, ' ');
    }
    for (offset, c) in text.chars().enumerate() {
        row[from + offset] = c;
    }
}

fn finish(row: Vec<char>) -> String {
    row.into_iter().collect::<String>().trim_end().to_string()
}

pub fn render_chart(data: &[ShapedMeasurement], style: &ChartStyle) -> String {
    if data.is_empty() {
        return "(no measurements to chart)".to_string();
    }

    let max = data.iter().map(|m| m.value).fold(0.0_f64, f64::max);
    let heights: Vec<usize> = data
        .iter()
        .map(|m| {
            if max <= 0.0 || m.value <= 0.0 {
                0
            } else {
                ((m.value / max) * style.height as f64).round().max(1.0) as usize
            }
        })
        .collect();

    let column = style.padding + style.bar_width;
    let bar: String = std::iter::repeat_n(style.glyph, style.bar_width).collect();
    let blank_row = || vec![' '; data.len() * column];

    let mut lines = Vec::with_capacity(style.height + 2);

    // One extra row on top so the tallest bar still gets its value label.
    for level in (1..=style.height + 1).rev() {
        let mut row = blank_row();
        for (i, (m, &h)) in data.iter().zip(&heights).enumerate() {
            let start = i * column + style.padding;
            if h >= level {
                place(&mut row, start, style.bar_width, &bar);
            } else if h + 1 == level {
                place(&mut row, start, style.bar_width, &format_value(m.value));
            }
        }
        lines.push(finish(row));
    }

    let mut keys = blank_row();
    for (i, m) in data.iter().enumerate() {
        place(&mut keys, i * column + style.padding, style.bar_width, &m.key);
    }
    lines.push(finish(keys));

    lines.join("\n")
}

/// Wraps lines in a rounded border with one blank row and three blank columns of padding.
///
/// Widths are terminal columns, so wide characters in place names keep the border straight.
pub fn boxed(lines: &[String]) -> String {
    const PAD_X: usize = 3;

    let inner = lines.iter().map(|l| l.width()).max().unwrap_or(0) + 2 * PAD_X;
    let mut out = Vec::with_capacity(lines.len() + 4);

    out.push(format!("╭{}╮", "─".repeat(inner)));
    out.push(format!("│{}│", " ".repeat(inner)));
    for line in lines {
        let fill = inner - PAD_X - line.width();
        out.push(format!("│{}{}{}│", " ".repeat(PAD_X), line, " ".repeat(fill)));
    }
    out.push(format!("│{}│", " ".repeat(inner)));
    out.push(format!("╰{}╯", "─".repeat(inner)));

    out.join("\n")
}
