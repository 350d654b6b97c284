//! Page skeletons
//!
//! Each layout has a default token set, a stylesheet and a body writer. Bodies
//! are written from a [`RenderContext`] only; chart fragments arrive
//! prerendered and are placed in the fixed report order.

pub mod hud;
pub mod minimal;
pub mod risograph;

use super::context::{CountStyle, TableRow};
use super::format::FormattedDelta;
use crate::charts::html_escape;
use core::fmt::{self, Write};

/// Commands shown in the quick commands card.
pub const QUICK_COMMANDS: [&str; 2] = ["trendboard report", "trendboard report --layout hud --theme dark"];

/// How a layout presents the latest-values table.
#[derive(Debug, Clone, Copy)]
pub struct TableStyle<'a> {
    pub title: &'a str,
    pub recorded_header: &'a str,
    pub counts: CountStyle,

    /// Wrap values in `<strong>`.
    pub strong_values: bool,
}

pub fn write_table<W: Write>(writer: &mut W, rows: &[TableRow], style: &TableStyle<'_>) -> fmt::Result {
    writeln!(writer, "        <div class=\"chart-title\">{}</div>", style.title)?;
    writeln!(writer, "        <table>")?;
    writeln!(writer, "          <thead>")?;
    writeln!(writer, "            <tr>")?;
    writeln!(writer, "              <th>Metric</th>")?;
    writeln!(writer, "              <th>Value</th>")?;
    writeln!(writer, "              <th>{}</th>", style.recorded_header)?;
    writeln!(writer, "            </tr>")?;
    writeln!(writer, "          </thead>")?;
    writeln!(writer, "          <tbody>")?;

    for row in rows {
        let value = html_escape(&row.value.render(style.counts));
        writeln!(writer, "            <tr>")?;
        writeln!(writer, "              <td>{}</td>", html_escape(&row.label))?;
        if style.strong_values {
            writeln!(writer, "              <td><strong>{value}</strong></td>")?;
        } else {
            writeln!(writer, "              <td>{value}</td>")?;
        }
        writeln!(writer, "              <td>{}</td>", html_escape(row.recorded_text()))?;
        writeln!(writer, "            </tr>")?;
    }

    writeln!(writer, "          </tbody>")?;
    writeln!(writer, "        </table>")
}

/// Writes a delta badge with the given extra classes.
pub fn write_delta<W: Write>(writer: &mut W, indent: usize, classes: &str, delta: &FormattedDelta) -> fmt::Result {
    writeln!(
        writer,
        "{:indent$}<div class=\"{classes} {}\">{}</div>",
        "",
        delta.class,
        html_escape(&delta.text)
    )
}

pub fn write_quick_commands<W: Write>(writer: &mut W, prompt: &str) -> fmt::Result {
    writeln!(writer, "        <div class=\"code\">")?;
    for command in QUICK_COMMANDS {
        writeln!(writer, "          {prompt}{command}<br />")?;
    }
    writeln!(writer, "        </div>")
}

/// Clamps a progress bar fill to `0..=100` percent.
#[must_use]
pub fn fill_percent(value: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, 100.0) } else { 0.0 }
}

/// Log-scaled fill for code line counts; `scale` percent per decade.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "the bar only needs a rough magnitude")]
pub fn code_lines_fill(total: Option<u64>, scale: f64) -> f64 {
    let total = total.unwrap_or(1).max(1) as f64;
    fill_percent(total.log10() * scale)
}
