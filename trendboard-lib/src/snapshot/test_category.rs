use super::TestSummary;
use super::{lenient, lenient_number};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Per-category test results, e.g. `unit`, `api` or `e2e`.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCategory {
    pub name: String,
    pub file_count: u64,
    pub test_count: u64,
    pub coverage_pct: Option<f64>,
    pub results: Option<TestSummary>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawTestCategory {
    #[serde(default, deserialize_with = "lenient")]
    files: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    tests: Option<u64>,
    #[serde(default, deserialize_with = "lenient_number")]
    coverage_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    results: Option<TestSummary>,
}

impl RawTestCategory {
    pub(super) fn into_category(self, name: String) -> TestCategory {
        TestCategory {
            name,
            file_count: self.files.unwrap_or(0),
            test_count: self.tests.unwrap_or(0),
            coverage_pct: self.coverage_pct,
            results: self.results,
        }
    }
}

/// Which per-category value the category bar chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Deserialize, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CategoryMetric {
    CoveragePct,
    PassRate,
    DurationMs,
    DurationSeconds,
    Files,
    Tests,
}

impl CategoryMetric {
    /// Suffix for labels showing this metric.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::CoveragePct | Self::PassRate => "%",
            Self::DurationMs => " ms",
            Self::DurationSeconds => "s",
            Self::Files | Self::Tests => "",
        }
    }
}

impl TestCategory {
    /// Returns the requested value, or 0 when the category does not record it.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "file and test counts stay far below 2^52")]
    pub fn metric(&self, metric: CategoryMetric) -> f64 {
        let duration_ms = || self.results.as_ref().and_then(|results| results.duration_ms);

        match metric {
            CategoryMetric::CoveragePct => self.coverage_pct.unwrap_or(0.0),
            CategoryMetric::PassRate => self.results.as_ref().map_or(0.0, |results| results.pass_rate),
            CategoryMetric::DurationMs => duration_ms().unwrap_or(0.0),
            CategoryMetric::DurationSeconds => duration_ms().map_or(0.0, |ms| ms / 1000.0),
            CategoryMetric::Files => self.file_count as f64,
            CategoryMetric::Tests => self.test_count as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(json: &str) -> TestCategory {
        serde_json::from_str::<RawTestCategory>(json).unwrap().into_category("unit".to_string())
    }

    #[test]
    fn test_metrics_with_results() {
        let cat = category(r#"{"files": 4, "tests": 31, "coveragePct": 81.5, "results": {"total": 4, "passed": 3, "durationMs": 2500}}"#);

        assert!((cat.metric(CategoryMetric::CoveragePct) - 81.5).abs() < f64::EPSILON);
        assert!((cat.metric(CategoryMetric::PassRate) - 75.0).abs() < f64::EPSILON);
        assert!((cat.metric(CategoryMetric::DurationMs) - 2500.0).abs() < f64::EPSILON);
        assert!((cat.metric(CategoryMetric::DurationSeconds) - 2.5).abs() < f64::EPSILON);
        assert!((cat.metric(CategoryMetric::Files) - 4.0).abs() < f64::EPSILON);
        assert!((cat.metric(CategoryMetric::Tests) - 31.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_values_are_zero() {
        let cat = category(r#"{"results": null}"#);

        assert!(cat.metric(CategoryMetric::CoveragePct).abs() < f64::EPSILON);
        assert!(cat.metric(CategoryMetric::PassRate).abs() < f64::EPSILON);
        assert!(cat.metric(CategoryMetric::DurationSeconds).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metric_units() {
        assert_eq!(CategoryMetric::CoveragePct.unit(), "%");
        assert_eq!(CategoryMetric::PassRate.unit(), "%");
        assert_eq!(CategoryMetric::DurationSeconds.unit(), "s");
        assert_eq!(CategoryMetric::Tests.unit(), "");
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(CategoryMetric::DurationSeconds.to_string(), "duration_seconds");
        assert_eq!("coverage_pct".parse::<CategoryMetric>().unwrap(), CategoryMetric::CoveragePct);
    }
}
