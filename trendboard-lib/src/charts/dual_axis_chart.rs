use super::svg::{self, EMPTY_PLACEHOLDER, Num};
use super::{ChartGeometry, LinearScale, NamedSeries};
use core::fmt::{self, Write};

/// Two groups of series over the same runs, each with its own y axis.
#[derive(Debug, Clone)]
pub struct DualAxisChart {
    pub title: String,
    pub left: Vec<NamedSeries>,
    pub right: Vec<NamedSeries>,
    pub y_left_min: Option<f64>,
    pub y_left_max: Option<f64>,
    pub y_right_min: Option<f64>,
    pub y_right_max: Option<f64>,
}

impl DualAxisChart {
    /// Renders the chart with the right axis labelled on the right edge.
    ///
    /// The x labels come from the first left series, or the first right series
    /// when there are no left series.
    #[must_use]
    pub fn render(&self, geometry: &ChartGeometry) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = self.write(geometry, &mut out);
        out
    }

    fn write<W: Write>(&self, geometry: &ChartGeometry, writer: &mut W) -> fmt::Result {
        let labels: Vec<&str> = self
            .left
            .first()
            .or_else(|| self.right.first())
            .map(|s| s.points.iter().map(|p| p.label.as_str()).collect())
            .unwrap_or_default();

        if labels.is_empty() {
            return writer.write_str(EMPTY_PLACEHOLDER);
        }

        let geometry = geometry.with_dual_axis_padding();
        let pad = geometry.padding;
        let inner_height = geometry.inner_height();
        let right_edge = geometry.width - pad.right;
        let bottom = geometry.height - pad.bottom;

        let left: Vec<&NamedSeries> = self.left.iter().collect();
        let right: Vec<&NamedSeries> = self.right.iter().collect();
        let left_scale = LinearScale::infer(self.y_left_min, self.y_left_max, &left);
        let right_scale = LinearScale::infer(self.y_right_min, self.y_right_max, &right);
        let project_left = |value: f64| left_scale.project(value, pad.top, inner_height);
        let project_right = |value: f64| right_scale.project(value, pad.top, inner_height);
        let xs = svg::x_positions(labels.len(), pad.left, geometry.inner_width());

        let legend: Vec<&NamedSeries> = left.iter().chain(&right).copied().collect();
        svg::write_header(writer, &self.title, Some(legend.as_slice()))?;
        svg::write_svg_open(writer, &self.title, geometry.width, geometry.height)?;

        for tick in left_scale.ticks(geometry.y_ticks) {
            svg::write_grid_row(writer, pad.left, right_edge, project_left(tick), tick)?;
        }

        svg::write_axis_line(writer, pad.left, pad.top, pad.left, bottom)?;
        svg::write_axis_line(writer, right_edge, pad.top, right_edge, bottom)?;
        svg::write_axis_line(writer, pad.left, bottom, right_edge, bottom)?;

        for series in &self.left {
            svg::write_polylines(writer, series, &xs, project_left)?;
        }
        for series in &self.right {
            svg::write_polylines(writer, series, &xs, project_right)?;
        }
        for series in &self.left {
            svg::write_dots(writer, series, &xs, project_left)?;
        }
        for series in &self.right {
            svg::write_dots(writer, series, &xs, project_right)?;
        }

        svg::write_x_labels(writer, &labels, &xs, geometry.max_labels, geometry.height - 10.0)?;

        for tick in right_scale.ticks(geometry.y_ticks) {
            writeln!(
                writer,
                "    <text x=\"{}\" y=\"{}\" class=\"axis-label\" text-anchor=\"start\">{}</text>",
                Num(right_edge + 8.0),
                Num(project_right(tick) + 4.0),
                svg::to_fixed(tick, 2)
            )?;
        }

        svg::write_footer(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::SeriesPoint;

    fn series(name: &str, color: &str, values: &[Option<f64>]) -> NamedSeries {
        NamedSeries::new(
            name,
            color,
            values.iter().enumerate().map(|(i, v)| SeriesPoint::new(format!("run {i}"), *v)).collect(),
        )
    }

    fn pass_rate_vs_duration(durations: &[Option<f64>], right_max: Option<f64>) -> DualAxisChart {
        DualAxisChart {
            title: "Tests pass rate vs duration".to_string(),
            left: vec![series("Pass rate (%)", "#59a14f", &vec![Some(100.0); durations.len()])],
            right: vec![series("Duration (s)", "#edc949", durations)],
            y_left_min: Some(0.0),
            y_left_max: Some(100.0),
            y_right_min: Some(0.0),
            y_right_max: right_max,
        }
    }

    #[test]
    fn test_empty() {
        let chart = DualAxisChart {
            title: "t".to_string(),
            left: vec![],
            right: vec![],
            y_left_min: None,
            y_left_max: None,
            y_right_min: None,
            y_right_max: None,
        };
        assert_eq!(chart.render(&ChartGeometry::default()), EMPTY_PLACEHOLDER);
    }

    #[test]
    fn test_labels_fall_back_to_right_series() {
        let mut chart = pass_rate_vs_duration(&[Some(1.0), Some(2.0)], None);
        chart.left.clear();
        let svg = chart.render(&ChartGeometry::default());

        assert!(svg.contains(">run 0</text>"));
        assert!(svg.contains(">run 1</text>"));
    }

    #[test]
    fn test_right_axis_labels() {
        let svg = pass_rate_vs_duration(&[Some(4.5)], Some(5.0)).render(&ChartGeometry::default());

        assert!(svg.contains("text-anchor=\"start\">5.00</text>"));
        assert!(svg.contains("text-anchor=\"start\">0.00</text>"));
        assert!(svg.contains("text-anchor=\"end\">100.00</text>"));
        assert_eq!(svg.matches("text-anchor=\"start\"").count(), 6);
    }

    #[test]
    fn test_uses_dual_axis_padding() {
        let svg = pass_rate_vs_duration(&[Some(1.0), Some(2.0)], Some(5.0)).render(&ChartGeometry::default());

        // 900 wide with 60 on each side.
        assert!(svg.contains("<line x1=\"840\" y1=\"28\" x2=\"840\" y2=\"218\" class=\"axis\" />"));
        assert!(svg.contains("<text x=\"848\""));
    }

    #[test]
    fn test_independent_scales() {
        let svg = pass_rate_vs_duration(&[Some(5.0)], Some(5.0)).render(&ChartGeometry::default());

        // 100% on the left and 5s on the right both sit at the top of the plot.
        assert_eq!(svg.matches("cy=\"28\"").count(), 2);
    }

    #[test]
    fn test_legend_order() {
        let svg = pass_rate_vs_duration(&[Some(1.0)], None).render(&ChartGeometry::default());
        let pass = svg.find("Pass rate (%)").unwrap();
        let duration = svg.find("Duration (s)").unwrap();
        assert!(pass < duration);
    }

    #[test]
    fn test_null_duration_gap() {
        let svg = pass_rate_vs_duration(&[Some(1.0), None, Some(3.0)], Some(5.0)).render(&ChartGeometry::default());

        // One polyline for pass rate, two for the split duration line.
        assert_eq!(svg.matches("<polyline").count(), 3);
        assert_eq!(svg.matches("<circle").count(), 5);
    }
}
