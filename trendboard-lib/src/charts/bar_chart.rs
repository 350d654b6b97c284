use super::svg::{self, EMPTY_PLACEHOLDER, Num, html_escape, to_fixed};
use super::{BarItem, ChartGeometry};
use core::fmt::{self, Write};

const GRID_FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// One horizontal bar per item, scaled against a fixed maximum.
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub items: Vec<BarItem>,
    pub y_max: f64,

    /// Appended to grid and value labels, e.g. `%` for percentage metrics.
    pub unit: &'static str,
}

impl BarChart {
    /// Renders the chart; its height grows with the number of items.
    ///
    /// Values are clamped to `0..=y_max`. Without items, or without a positive
    /// maximum, the result is the empty placeholder.
    #[must_use]
    pub fn render(&self, geometry: &ChartGeometry) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = self.write(geometry, &mut out);
        out
    }

    #[expect(clippy::cast_precision_loss, reason = "row counts stay far below 2^52")]
    fn write<W: Write>(&self, geometry: &ChartGeometry, writer: &mut W) -> fmt::Result {
        if self.items.is_empty() || !self.y_max.is_finite() || self.y_max <= 0.0 {
            return writer.write_str(EMPTY_PLACEHOLDER);
        }

        let pad = geometry.bar.padding;
        let row_height = geometry.bar.row_height;
        let width = geometry.width;
        let height = pad.vertical() + self.items.len() as f64 * row_height;
        let inner_width = width - pad.horizontal();

        svg::write_header(writer, &self.title, None)?;
        svg::write_svg_open(writer, &self.title, width, height)?;

        for fraction in GRID_FRACTIONS {
            let x = pad.left + fraction * inner_width;
            writeln!(
                writer,
                "    <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" class=\"grid\" />",
                Num(x),
                Num(pad.top - 6.0),
                Num(x),
                Num(height - pad.bottom)
            )?;
            writeln!(
                writer,
                "    <text x=\"{}\" y=\"{}\" class=\"axis-label\" text-anchor=\"middle\">{}{}</text>",
                Num(x),
                Num(height - 4.0),
                Num(fraction * self.y_max),
                self.unit
            )?;
        }

        for (index, item) in self.items.iter().enumerate() {
            let y = pad.top + index as f64 * row_height;
            let value = if item.value.is_finite() { item.value.clamp(0.0, self.y_max) } else { 0.0 };
            let bar_width = value / self.y_max * inner_width;

            writeln!(
                writer,
                "    <text x=\"{}\" y=\"{}\" class=\"axis-label\" text-anchor=\"end\">{}</text>",
                Num(pad.left - 8.0),
                Num(y + 18.0),
                html_escape(&item.label)
            )?;
            writeln!(
                writer,
                "    <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"12\" rx=\"6\" fill=\"{}\" />",
                Num(pad.left),
                Num(y + 6.0),
                Num(bar_width),
                html_escape(&item.color)
            )?;
            writeln!(
                writer,
                "    <text x=\"{}\" y=\"{}\" class=\"axis-label\">{}{}</text>",
                Num(pad.left + bar_width + 6.0),
                Num(y + 18.0),
                to_fixed(value, 2),
                self.unit
            )?;
        }

        svg::write_footer(writer)
    }
}
