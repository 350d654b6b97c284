use serde::{Deserialize, Serialize};

/// Space reserved around a plot for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    #[must_use]
    pub const fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub const fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Layout of the horizontal bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BarGeometry {
    pub row_height: f64,
    pub padding: Padding,
}

impl Default for BarGeometry {
    fn default() -> Self {
        Self {
            row_height: 28.0,
            padding: Padding::new(28.0, 24.0, 20.0, 140.0),
        }
    }
}

/// Canvas settings shared by all charts in a report.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,

    /// Number of intervals on the y axis; gridlines are drawn at `y_ticks + 1` positions.
    pub y_ticks: usize,

    /// Upper bound on the number of x-axis labels.
    pub max_labels: usize,

    /// Right padding of the dual-axis chart, which needs room for the second axis.
    pub dual_axis_padding_right: f64,
    pub bar: BarGeometry,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 260.0,
            padding: Padding::new(28.0, 16.0, 42.0, 60.0),
            y_ticks: 5,
            max_labels: 8,
            dual_axis_padding_right: 60.0,
            bar: BarGeometry::default(),
        }
    }
}

impl ChartGeometry {
    #[must_use]
    pub const fn inner_width(&self) -> f64 {
        self.width - self.padding.horizontal()
    }

    #[must_use]
    pub const fn inner_height(&self) -> f64 {
        self.height - self.padding.vertical()
    }

    /// The same canvas with the dual-axis chart's right padding.
    #[must_use]
    pub const fn with_dual_axis_padding(&self) -> Self {
        let mut geometry = *self;
        geometry.padding.right = self.dual_axis_padding_right;
        geometry
    }

    /// Describes the first inconsistency found, if any.
    #[must_use]
    pub fn problem(&self) -> Option<String> {
        let sizes = [
            ("width", self.width),
            ("height", self.height),
            ("bar.row_height", self.bar.row_height),
        ];

        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Some(format!("chart {name} must be a positive number, found {value}"));
            }
        }

        let paddings = [
            ("padding", &self.padding),
            ("bar.padding", &self.bar.padding),
        ];

        for (name, padding) in paddings {
            let sides = [padding.top, padding.right, padding.bottom, padding.left];
            if sides.iter().any(|side| !side.is_finite() || *side < 0.0) {
                return Some(format!("chart {name} values must be non-negative numbers"));
            }
        }

        if self.padding.horizontal() >= self.width || self.padding.vertical() >= self.height {
            return Some("chart padding leaves no room for the plot".to_string());
        }

        if !self.dual_axis_padding_right.is_finite()
            || self.dual_axis_padding_right < 0.0
            || self.padding.left + self.dual_axis_padding_right >= self.width
        {
            return Some("chart dual_axis_padding_right leaves no room for the plot".to_string());
        }

        if self.bar.padding.horizontal() >= self.width {
            return Some("chart bar.padding leaves no room for the bars".to_string());
        }

        if self.y_ticks == 0 {
            return Some("chart y_ticks must be at least 1".to_string());
        }

        if self.max_labels == 0 {
            return Some("chart max_labels must be at least 1".to_string());
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let geometry = ChartGeometry::default();

        assert!((geometry.inner_width() - 824.0).abs() < f64::EPSILON);
        assert!((geometry.inner_height() - 190.0).abs() < f64::EPSILON);
        assert!((geometry.with_dual_axis_padding().inner_width() - 780.0).abs() < f64::EPSILON);
        assert_eq!(geometry.problem(), None);
    }

    #[test]
    fn test_problems() {
        let mut geometry = ChartGeometry::default();
        geometry.width = 0.0;
        assert!(geometry.problem().unwrap().contains("width"));

        let mut geometry = ChartGeometry::default();
        geometry.padding.top = 200.0;
        geometry.padding.bottom = 100.0;
        assert!(geometry.problem().unwrap().contains("no room"));

        let mut geometry = ChartGeometry::default();
        geometry.y_ticks = 0;
        assert!(geometry.problem().unwrap().contains("y_ticks"));

        let mut geometry = ChartGeometry::default();
        geometry.bar.padding.left = -1.0;
        assert!(geometry.problem().unwrap().contains("bar.padding"));
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result = toml::from_str::<Padding>("top = 1.0\nright = 1.0\nbottom = 1.0\nleft = 1.0\nmiddle = 2.0");
        let _ = result.unwrap_err();
    }
}
