/// One run's value; `None` when the run did not record it.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: Option<f64>,
}

impl SeriesPoint {
    #[must_use]
    pub const fn new(label: String, value: Option<f64>) -> Self {
        Self { label, value }
    }

    /// The value when it can be plotted.
    #[must_use]
    pub fn finite_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }
}

/// A line in a chart; series order is legend order.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    pub color: String,
    pub points: Vec<SeriesPoint>,
}

impl NamedSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            points,
        }
    }

    /// Largest plottable value, if any.
    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().filter_map(SeriesPoint::finite_value).reduce(f64::max)
    }
}

/// Largest plottable value across several series.
#[must_use]
pub fn max_value(series: &[NamedSeries]) -> Option<f64> {
    series.iter().filter_map(NamedSeries::max_value).reduce(f64::max)
}

/// One row of a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarItem {
    pub label: String,
    pub value: f64,
    pub color: String,
}

impl BarItem {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.into(),
        }
    }
}
