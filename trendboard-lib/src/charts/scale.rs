use super::{NamedSeries, SeriesPoint};

/// Maps data values onto the vertical extent of a plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub min: f64,
    pub max: f64,
}

impl LinearScale {
    /// Uses the pinned bounds where given and the data range elsewhere.
    ///
    /// With no plottable values the range falls back to 0..1, and a flat range
    /// is widened by one unit on each side.
    #[must_use]
    #[expect(clippy::float_cmp, reason = "only an exactly flat range needs widening")]
    pub fn infer(pinned_min: Option<f64>, pinned_max: Option<f64>, series: &[&NamedSeries]) -> Self {
        let values = || series.iter().flat_map(|s| s.points.iter()).filter_map(SeriesPoint::finite_value);

        let mut min = pinned_min.unwrap_or_else(|| values().fold(f64::INFINITY, f64::min));
        let mut max = pinned_max.unwrap_or_else(|| values().fold(f64::NEG_INFINITY, f64::max));

        if !min.is_finite() {
            min = 0.0;
        }
        if !max.is_finite() {
            max = 1.0;
        }

        if min == max {
            min -= 1.0;
            max += 1.0;
        }

        Self { min, max }
    }

    /// Y coordinate of `value` in a plot starting at `top` and `inner_height` tall.
    #[must_use]
    pub fn project(&self, value: f64, top: f64, inner_height: f64) -> f64 {
        top + (inner_height - ((value - self.min) / (self.max - self.min)) * inner_height)
    }

    /// Values at `ticks + 1` evenly spaced gridlines, bottom to top.
    #[expect(clippy::cast_precision_loss, reason = "tick counts are small")]
    #[must_use]
    pub fn ticks(&self, ticks: usize) -> Vec<f64> {
        let ticks = ticks.max(1);
        (0..=ticks)
            .map(|i| self.min + ((self.max - self.min) * i as f64) / ticks as f64)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[Option<f64>]) -> NamedSeries {
        NamedSeries::new(
            "s",
            "#000",
            values.iter().map(|v| SeriesPoint::new(String::new(), *v)).collect(),
        )
    }

    #[test]
    fn test_pinned_bounds_win() {
        let s = series(&[Some(-5.0), Some(500.0)]);
        assert_eq!(LinearScale::infer(Some(0.0), Some(100.0), &[&s]), LinearScale { min: 0.0, max: 100.0 });
    }

    #[test]
    fn test_inferred_bounds() {
        let a = series(&[Some(3.0), None, Some(9.0)]);
        let b = series(&[Some(1.0)]);
        assert_eq!(LinearScale::infer(None, None, &[&a, &b]), LinearScale { min: 1.0, max: 9.0 });
    }

    #[test]
    fn test_no_values_falls_back() {
        let s = series(&[None, None]);
        assert_eq!(LinearScale::infer(None, None, &[&s]), LinearScale { min: 0.0, max: 1.0 });
    }

    #[test]
    fn test_flat_range_widens() {
        let s = series(&[Some(4.0), Some(4.0)]);
        assert_eq!(LinearScale::infer(None, None, &[&s]), LinearScale { min: 3.0, max: 5.0 });
        assert_eq!(LinearScale::infer(Some(0.0), Some(0.0), &[]), LinearScale { min: -1.0, max: 1.0 });
    }

    #[test]
    fn test_project() {
        let scale = LinearScale { min: 0.0, max: 100.0 };
        assert!((scale.project(0.0, 28.0, 190.0) - 218.0).abs() < 1e-9);
        assert!((scale.project(100.0, 28.0, 190.0) - 28.0).abs() < 1e-9);
        assert!((scale.project(50.0, 28.0, 190.0) - 123.0).abs() < 1e-9);
    }

    #[test]
    fn test_ticks() {
        let scale = LinearScale { min: 0.0, max: 5000.0 };
        assert_eq!(scale.ticks(5), vec![0.0, 1000.0, 2000.0, 3000.0, 4000.0, 5000.0]);
    }
}
