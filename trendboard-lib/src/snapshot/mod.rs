//! Parsed metrics snapshots
//!
//! A snapshot is one JSON file capturing code-line counts, coverage totals and
//! test results for a single point in time. The producer writes the live file
//! (`metrics/metrics.json` by default) and a timestamped copy into the history
//! directory on every run.
//!
//! Extraction is permissive: absent or `null` members yield `None` or empty
//! collections instead of errors, so an older or partial snapshot still
//! contributes whatever it does contain. A member of the wrong type (a string
//! where a count belongs, an array where a section belongs) is treated as
//! absent. Only text that is not a JSON object fails to parse.
//!
//! Every percentage follows the same rule: a value stored in the snapshot is
//! used as-is, otherwise it is derived as `part / total * 100`, and it is 0
//! whenever `total` is 0.

mod code_lines;
mod coverage;
mod snapshot_record;
mod test_category;
mod test_summary;

pub use code_lines::CodeLines;
pub use coverage::{CoverageKind, CoverageMetric, CoverageOverall};
pub use snapshot_record::SnapshotRecord;
pub use test_category::{CategoryMetric, TestCategory};
pub use test_summary::{SuiteCounts, TestSummary};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Returns `part / total * 100`, or 0 when `total` is 0.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "test and line counts stay far below 2^52")]
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }

    part as f64 / total as f64 * 100.0
}

/// Accepts any JSON value and keeps it only if it converts to `T`.
fn lenient<'de, D, T>(deserializer: D) -> core::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Accepts any JSON value and keeps it only if it is a finite number.
///
/// Coverage tools write `"Unknown"` for percentages of empty files, and older
/// producers wrote `null` for durations they could not measure.
fn lenient_number<'de, D>(deserializer: D) -> core::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(serde_json::Value::as_f64).filter(|v| v.is_finite()))
}
