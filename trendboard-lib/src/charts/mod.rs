//! Static SVG charts
//!
//! Three renderers turn numeric series into self-contained HTML fragments: a
//! multi-line chart, a dual-axis chart and a horizontal bar chart. Each is a
//! plain struct with a `render` method taking the shared [`ChartGeometry`];
//! rendering never fails, and input with nothing to plot produces the
//! [`EMPTY_PLACEHOLDER`].
//!
//! Missing values (`None`) take no part in axis scaling but still occupy their
//! x position. In line charts they break the line, so each contiguous run of
//! present values is drawn as its own polyline.
//!
//! Axis maxima for code line counts and durations are picked from fixed
//! ladders by the [`tiering`] functions, so axes land on round numbers
//! without configuration.

mod bar_chart;
mod dual_axis_chart;
mod geometry;
mod line_chart;
mod scale;
mod series;
mod svg;
pub mod tiering;

pub use bar_chart::BarChart;
pub use dual_axis_chart::DualAxisChart;
pub use geometry::{BarGeometry, ChartGeometry, Padding};
pub use line_chart::LineChart;
pub use scale::LinearScale;
pub use series::{BarItem, NamedSeries, SeriesPoint, max_value};
pub use svg::{EMPTY_PLACEHOLDER, Num, html_escape, to_fixed};
