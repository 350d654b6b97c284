use super::NamedSeries;
use core::fmt::{self, Display, Write};

/// Markup rendered in place of a chart that has nothing to plot.
pub const EMPTY_PLACEHOLDER: &str = r#"<div class="empty">No data</div>"#;

/// A coordinate or value written in shortest round-trip form.
#[derive(Debug, Clone, Copy)]
pub struct Num(pub f64);

impl Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Adding zero turns -0 into 0.
        write!(f, "{}", self.0 + 0.0)
    }
}

/// Formats `value` with exactly `decimals` fractional digits.
///
/// Exact ties round away from zero, so `0.125` becomes `0.13` and `-2.5`
/// becomes `-3`. Any negative input keeps its sign, even when the digits
/// round to zero.
#[must_use]
pub fn to_fixed(value: f64, decimals: usize) -> String {
    const GUARD_DIGITS: usize = 20;

    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    let wide = format!("{magnitude:.precision$}", precision = decimals + GUARD_DIGITS);
    let split = wide.len() - GUARD_DIGITS;
    let is_tie = wide
        .get(split..)
        .is_some_and(|tail| tail.starts_with('5') && tail.bytes().skip(1).all(|b| b == b'0'));

    let digits = if is_tie {
        let truncated = wide.get(..split).unwrap_or_default().trim_end_matches('.');
        increment_last_digit(truncated)
    } else {
        format!("{magnitude:.decimals$}")
    };

    if value < 0.0 { format!("-{digits}") } else { digits }
}

fn increment_last_digit(number: &str) -> String {
    let mut digits = number.as_bytes().to_vec();

    for digit in digits.iter_mut().rev() {
        match *digit {
            b'.' => {}
            b'9' => *digit = b'0',
            other => {
                *digit = other + 1;
                return String::from_utf8(digits).unwrap_or_default();
            }
        }
    }

    format!("1{}", String::from_utf8(digits).unwrap_or_default())
}

/// Escapes text for use in HTML content and attribute values.
#[must_use]
pub fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// X position of every run, spread evenly across the plot.
#[expect(clippy::cast_precision_loss, reason = "point counts stay far below 2^52")]
pub(super) fn x_positions(count: usize, left: f64, inner_width: f64) -> Vec<f64> {
    let step = if count > 1 { inner_width / (count - 1) as f64 } else { 0.0 };
    (0..count).map(|i| i as f64 * step + left).collect()
}

pub(super) fn write_header<W: Write>(writer: &mut W, title: &str, legend: Option<&[&NamedSeries]>) -> fmt::Result {
    let title = html_escape(title);

    writeln!(writer, "<div class=\"chart\">")?;
    writeln!(writer, "  <div class=\"chart-title\">{title}</div>")?;

    if let Some(series) = legend {
        write!(writer, "  <div class=\"legend\">")?;
        for s in series {
            write!(
                writer,
                "<span class=\"legend-item\"><span class=\"legend-dot\" style=\"background:{}\"></span>{}</span>",
                html_escape(&s.color),
                html_escape(&s.name)
            )?;
        }
        writeln!(writer, "</div>")?;
    }

    Ok(())
}

pub(super) fn write_svg_open<W: Write>(writer: &mut W, title: &str, width: f64, height: f64) -> fmt::Result {
    writeln!(
        writer,
        "  <svg viewBox=\"0 0 {} {}\" role=\"img\" aria-label=\"{}\">",
        Num(width),
        Num(height),
        html_escape(title)
    )
}

pub(super) fn write_footer<W: Write>(writer: &mut W) -> fmt::Result {
    writeln!(writer, "  </svg>")?;
    writeln!(writer, "</div>")
}

/// Horizontal gridline with its tick label on the left.
pub(super) fn write_grid_row<W: Write>(writer: &mut W, left: f64, right: f64, y: f64, label: f64) -> fmt::Result {
    writeln!(
        writer,
        "    <g><line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" class=\"grid\" /><text x=\"{}\" y=\"{}\" class=\"axis-label\" text-anchor=\"end\">{}</text></g>",
        Num(left),
        Num(y),
        Num(right),
        Num(y),
        Num(left - 8.0),
        Num(y + 4.0),
        to_fixed(label, 2)
    )
}

pub(super) fn write_axis_line<W: Write>(writer: &mut W, x1: f64, y1: f64, x2: f64, y2: f64) -> fmt::Result {
    writeln!(
        writer,
        "    <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" class=\"axis\" />",
        Num(x1),
        Num(y1),
        Num(x2),
        Num(y2)
    )
}

/// Polylines for one series, one per contiguous run of present values.
pub(super) fn write_polylines<W, F>(writer: &mut W, series: &NamedSeries, xs: &[f64], scale: F) -> fmt::Result
where
    W: Write,
    F: Fn(f64) -> f64,
{
    let color = html_escape(&series.color);
    let mut run = Vec::new();

    for (point, &x) in series.points.iter().zip(xs) {
        match point.value.filter(|v| v.is_finite()) {
            Some(value) => run.push(format!("{},{}", Num(x), Num(scale(value)))),
            None if !run.is_empty() => {
                write_polyline(writer, &color, &run)?;
                run.clear();
            }
            None => {}
        }
    }

    if !run.is_empty() {
        write_polyline(writer, &color, &run)?;
    }

    Ok(())
}

fn write_polyline<W: Write>(writer: &mut W, color: &str, coordinates: &[String]) -> fmt::Result {
    writeln!(
        writer,
        "    <polyline fill=\"none\" stroke=\"{color}\" stroke-width=\"2\" points=\"{}\" />",
        coordinates.join(" ")
    )
}

pub(super) fn write_dots<W, F>(writer: &mut W, series: &NamedSeries, xs: &[f64], scale: F) -> fmt::Result
where
    W: Write,
    F: Fn(f64) -> f64,
{
    let color = html_escape(&series.color);

    for (point, &x) in series.points.iter().zip(xs) {
        if let Some(value) = point.value.filter(|v| v.is_finite()) {
            writeln!(
                writer,
                "    <circle cx=\"{}\" cy=\"{}\" r=\"2.5\" fill=\"{color}\" />",
                Num(x),
                Num(scale(value))
            )?;
        }
    }

    Ok(())
}

/// X-axis labels at a regular stride, always including the last one.
pub(super) fn write_x_labels<W: Write>(writer: &mut W, labels: &[&str], xs: &[f64], max_labels: usize, baseline: f64) -> fmt::Result {
    let stride = labels.len().div_ceil(max_labels.max(1)).max(1);
    let last = labels.len().saturating_sub(1);

    for (index, (label, &x)) in labels.iter().zip(xs).enumerate() {
        if index % stride != 0 && index != last {
            continue;
        }

        writeln!(
            writer,
            "    <text x=\"{}\" y=\"{}\" class=\"axis-label\" text-anchor=\"middle\">{}</text>",
            Num(x),
            Num(baseline),
            html_escape(label)
        )?;
    }

    Ok(())
}
