use super::{lenient, lenient_number, percentage};
use serde::Deserialize;

/// Suite-level counts, as reported by the test runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SuiteCounts {
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub passed: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub failed: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub skipped: Option<u64>,
}

/// Outcome of one test run, either the whole suite or a single category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawTestSummary")]
pub struct TestSummary {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub todo: u64,

    /// Passed tests as a percentage of all tests, 0 when there are none.
    pub pass_rate: f64,
    pub duration_ms: Option<f64>,
    pub success: bool,
    pub suite_counts: SuiteCounts,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTestSummary {
    #[serde(default, deserialize_with = "lenient")]
    total: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    passed: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    failed: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    skipped: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    todo: Option<u64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pass_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    duration_ms: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    success: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    suite_counts: Option<SuiteCounts>,
}

impl From<RawTestSummary> for TestSummary {
    fn from(raw: RawTestSummary) -> Self {
        let passed = raw.passed.unwrap_or(0);
        let failed = raw.failed.unwrap_or(0);
        let skipped = raw.skipped.unwrap_or(0);
        let todo = raw.todo.unwrap_or(0);
        let total = raw
            .total
            .unwrap_or_else(|| passed.saturating_add(failed).saturating_add(skipped).saturating_add(todo));

        Self {
            total,
            passed,
            failed,
            skipped,
            todo,
            pass_rate: raw.pass_rate.unwrap_or_else(|| percentage(passed, total)),
            duration_ms: raw.duration_ms,
            success: raw.success.unwrap_or(failed == 0),
            suite_counts: raw.suite_counts.unwrap_or_default(),
        }
    }
}
