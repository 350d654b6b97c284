use super::theme::token_problem;
use crate::charts::ChartGeometry;
use crate::snapshot::{CategoryMetric, CoverageKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything that shapes the generated page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSettings {
    pub title: String,

    /// Line under the title; `{date}` is replaced with the generation stamp.
    /// Each layout has its own text when this is unset.
    pub subtitle: Option<String>,

    /// Print dates in local time instead of UTC.
    pub use_local_time: bool,

    pub layout: String,
    pub theme: String,

    /// Individual CSS tokens that take precedence over the theme.
    #[serde(default)]
    pub theme_tokens: BTreeMap<String, String>,

    /// Additional named themes; a custom theme replaces a built-in of the same name.
    #[serde(default)]
    pub themes: BTreeMap<String, BTreeMap<String, String>>,

    pub chart: ChartGeometry,
    pub charts: ChartSettings,
    pub table: TableSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChartSettings {
    pub cloc: ClocChartSettings,
    pub coverage: CoverageChartSettings,
    pub pass_rate_duration: PassRateDurationSettings,
    pub test_categories: TestCategoriesSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClocChartSettings {
    pub enabled: bool,
    pub title: String,
    pub y_min: Option<f64>,

    /// Pinned axis maximum; picked from the code lines ladder when unset.
    pub y_max: Option<f64>,

    pub show_total: bool,
    pub total_color: String,

    /// Language buckets plotted next to the total, in legend order.
    #[serde(default)]
    pub buckets: Vec<ClocBucket>,
}

/// One language bucket from the line counter output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClocBucket {
    /// Member name in the snapshot's `cloc` object, e.g. `ts`.
    pub key: String,

    /// Legend entry, e.g. `TS code`.
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CoverageChartSettings {
    pub enabled: bool,
    pub title: String,
    pub metric: CoverageKind,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PassRateDurationSettings {
    pub enabled: bool,
    pub title: String,
    pub pass_rate_color: String,
    pub duration_color: String,
    pub y_left_min: Option<f64>,
    pub y_left_max: Option<f64>,
    pub y_right_min: Option<f64>,

    /// Pinned duration maximum in seconds; disables tiering.
    pub y_right_max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TestCategoriesSettings {
    pub enabled: bool,
    pub title: String,
    pub metric: CategoryMetric,
    pub y_max: f64,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TableSettings {
    pub enabled: bool,
    pub show_cloc: bool,
    pub show_coverage: bool,
    pub show_tests: bool,
}

impl ReportSettings {
    /// Describes the first inconsistency found, if any.
    #[must_use]
    pub fn problem(&self) -> Option<String> {
        if let Some(problem) = self.chart.problem() {
            return Some(problem);
        }

        let charts = &self.charts;
        let ranges = [
            ("charts.cloc", charts.cloc.y_min, charts.cloc.y_max),
            ("charts.coverage", charts.coverage.y_min, charts.coverage.y_max),
            (
                "charts.pass_rate_duration (left axis)",
                charts.pass_rate_duration.y_left_min,
                charts.pass_rate_duration.y_left_max,
            ),
            (
                "charts.pass_rate_duration (right axis)",
                charts.pass_rate_duration.y_right_min,
                charts.pass_rate_duration.y_right_max,
            ),
        ];

        for (name, min, max) in ranges {
            if let Some(problem) = range_problem(name, min, max) {
                return Some(problem);
            }
        }

        let y_max = charts.test_categories.y_max;
        if !y_max.is_finite() || y_max <= 0.0 {
            return Some(format!("charts.test_categories.y_max must be a positive number, found {y_max}"));
        }

        if let Some(problem) = token_problem("theme_tokens", &self.theme_tokens) {
            return Some(problem);
        }

        self.themes
            .iter()
            .find_map(|(name, tokens)| token_problem(&format!("themes.{name}"), tokens))
    }
}

fn range_problem(name: &str, min: Option<f64>, max: Option<f64>) -> Option<String> {
    for value in [min, max].into_iter().flatten() {
        if !value.is_finite() {
            return Some(format!("{name} axis bounds must be finite numbers, found {value}"));
        }
    }

    match (min, max) {
        (Some(min), Some(max)) if min >= max => Some(format!("{name}: y_min ({min}) must be less than y_max ({max})")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ReportSettings {
        ReportSettings {
            title: "Metrics Report".to_string(),
            subtitle: None,
            use_local_time: false,
            layout: "minimal".to_string(),
            theme: "default".to_string(),
            theme_tokens: BTreeMap::new(),
            themes: BTreeMap::new(),
            chart: ChartGeometry::default(),
            charts: ChartSettings {
                cloc: ClocChartSettings {
                    enabled: true,
                    title: "Code lines".to_string(),
                    y_min: Some(0.0),
                    y_max: None,
                    show_total: true,
                    total_color: "#4c78a8".to_string(),
                    buckets: Vec::new(),
                },
                coverage: CoverageChartSettings {
                    enabled: true,
                    title: "Coverage".to_string(),
                    metric: CoverageKind::Lines,
                    y_min: Some(0.0),
                    y_max: Some(100.0),
                    color: "#e45756".to_string(),
                },
                pass_rate_duration: PassRateDurationSettings {
                    enabled: true,
                    title: "Pass rate".to_string(),
                    pass_rate_color: "#59a14f".to_string(),
                    duration_color: "#edc949".to_string(),
                    y_left_min: Some(0.0),
                    y_left_max: Some(100.0),
                    y_right_min: Some(0.0),
                    y_right_max: None,
                },
                test_categories: TestCategoriesSettings {
                    enabled: true,
                    title: "Categories".to_string(),
                    metric: CategoryMetric::CoveragePct,
                    y_max: 100.0,
                    color: "#72b7b2".to_string(),
                },
            },
            table: TableSettings {
                enabled: true,
                show_cloc: true,
                show_coverage: true,
                show_tests: true,
            },
        }
    }

    #[test]
    fn test_consistent_settings_have_no_problem() {
        assert_eq!(settings().problem(), None);
    }

    #[test]
    fn test_inverted_range() {
        let mut s = settings();
        s.charts.coverage.y_min = Some(100.0);
        s.charts.coverage.y_max = Some(50.0);

        let problem = s.problem().unwrap();
        assert!(problem.starts_with("charts.coverage"), "{problem}");
    }

    #[test]
    fn test_bar_maximum_must_be_positive() {
        let mut s = settings();
        s.charts.test_categories.y_max = 0.0;
        assert!(s.problem().unwrap().contains("test_categories.y_max"));
    }

    #[test]
    fn test_unsafe_tokens() {
        let mut s = settings();
        let _ = s.theme_tokens.insert("bg".to_string(), "red; } body { display: none".to_string());
        assert!(s.problem().unwrap().contains("theme_tokens"));

        let mut s = settings();
        let _ = s
            .themes
            .insert("ocean".to_string(), BTreeMap::from([("bg".to_string(), "</style>".to_string())]));
        assert!(s.problem().unwrap().contains("themes.ocean"));
    }
}
