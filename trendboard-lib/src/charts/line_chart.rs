use super::svg::{self, EMPTY_PLACEHOLDER};
use super::{ChartGeometry, LinearScale, NamedSeries};
use core::fmt::{self, Write};

/// Several series sharing one y axis.
#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: String,
    pub series: Vec<NamedSeries>,

    /// Pinned axis bounds; `None` takes the bound from the data.
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

impl LineChart {
    /// Renders the chart as an HTML fragment with an inline SVG.
    ///
    /// The first series supplies the x labels; when it has no points the
    /// result is the empty placeholder.
    #[must_use]
    pub fn render(&self, geometry: &ChartGeometry) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = self.write(geometry, &mut out);
        out
    }

    fn write<W: Write>(&self, geometry: &ChartGeometry, writer: &mut W) -> fmt::Result {
        let Some(labels) = self.series.first().map(|s| s.points.iter().map(|p| p.label.as_str()).collect::<Vec<_>>()) else {
            return writer.write_str(EMPTY_PLACEHOLDER);
        };

        if labels.is_empty() {
            return writer.write_str(EMPTY_PLACEHOLDER);
        }

        let pad = geometry.padding;
        let inner_height = geometry.inner_height();
        let right = geometry.width - pad.right;
        let bottom = geometry.height - pad.bottom;

        let all: Vec<&NamedSeries> = self.series.iter().collect();
        let scale = LinearScale::infer(self.y_min, self.y_max, &all);
        let project = |value: f64| scale.project(value, pad.top, inner_height);
        let xs = svg::x_positions(labels.len(), pad.left, geometry.inner_width());

        svg::write_header(writer, &self.title, Some(all.as_slice()))?;
        svg::write_svg_open(writer, &self.title, geometry.width, geometry.height)?;

        for tick in scale.ticks(geometry.y_ticks) {
            svg::write_grid_row(writer, pad.left, right, project(tick), tick)?;
        }

        svg::write_axis_line(writer, pad.left, pad.top, pad.left, bottom)?;
        svg::write_axis_line(writer, pad.left, bottom, right, bottom)?;

        for series in &self.series {
            svg::write_polylines(writer, series, &xs, project)?;
        }

        for series in &self.series {
            svg::write_dots(writer, series, &xs, project)?;
        }

        svg::write_x_labels(writer, &labels, &xs, geometry.max_labels, geometry.height - 10.0)?;
        svg::write_footer(writer)
    }
}
