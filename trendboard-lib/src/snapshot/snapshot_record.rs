use super::test_category::RawTestCategory;
use super::{CodeLines, CoverageKind, CoverageOverall, TestCategory, TestSummary, lenient};
use crate::Result;
use camino::Utf8Path;
use chrono::{DateTime, Utc};
use ohno::IntoAppError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;

/// One parsed metrics file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotRecord {
    /// When the producer wrote the snapshot, if it recorded it.
    pub generated_at: Option<DateTime<Utc>>,

    /// `None` when the line counter was unavailable for the run.
    pub code_lines: Option<CodeLines>,
    pub coverage: Option<CoverageOverall>,

    /// Categories in the order the snapshot lists them.
    pub test_categories: Vec<TestCategory>,
    pub test_summary: Option<TestSummary>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default, deserialize_with = "lenient")]
    generated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    cloc: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    coverage: Option<RawCoverage>,
    #[serde(default, deserialize_with = "lenient")]
    tests: Option<RawTests>,
}

#[derive(Deserialize)]
struct RawCoverage {
    #[serde(default, deserialize_with = "lenient")]
    overall: Option<CoverageOverall>,
}

#[derive(Deserialize)]
struct RawTests {
    #[serde(default, deserialize_with = "lenient")]
    summary: Option<TestSummary>,
    #[serde(default, deserialize_with = "lenient")]
    categories: Option<Map<String, Value>>,
}

impl SnapshotRecord {
    /// Reads and parses a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error naming the file if it cannot be read or is not a valid snapshot.
    pub fn read(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading metrics snapshot '{path}'"))?;
        Self::from_json(&text).into_app_err_with(|| format!("parsing metrics snapshot '{path}'"))
    }

    /// Parses snapshot JSON text.
    ///
    /// Members of the wrong type are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object.
    pub fn from_json(text: &str) -> core::result::Result<Self, serde_json::Error> {
        let raw: RawSnapshot = serde_json::from_str(text)?;

        let generated_at = raw
            .generated_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|instant| instant.with_timezone(&Utc));

        let (test_summary, categories) = raw.tests.map_or((None, None), |tests| (tests.summary, tests.categories));

        let mut test_categories = Vec::new();
        for (name, value) in categories.unwrap_or_default() {
            if value.is_null() {
                continue;
            }

            let Ok(raw_category) = serde_json::from_value::<RawTestCategory>(value) else {
                continue;
            };
            test_categories.push(raw_category.into_category(name));
        }

        Ok(Self {
            generated_at,
            code_lines: raw.cloc.as_ref().map(CodeLines::from_section),
            coverage: raw.coverage.and_then(|coverage| coverage.overall),
            test_categories,
            test_summary,
        })
    }

    #[must_use]
    pub fn code_lines_total(&self) -> Option<u64> {
        self.code_lines.as_ref().and_then(CodeLines::total)
    }

    #[must_use]
    pub fn code_lines_bucket(&self, bucket: &str) -> Option<u64> {
        self.code_lines.as_ref().and_then(|lines| lines.bucket(bucket))
    }

    #[must_use]
    pub fn coverage_pct(&self, kind: CoverageKind) -> Option<f64> {
        self.coverage.as_ref().and_then(|coverage| coverage.pct(kind))
    }

    #[must_use]
    pub fn pass_rate(&self) -> Option<f64> {
        self.test_summary.as_ref().map(|summary| summary.pass_rate)
    }

    #[must_use]
    pub fn duration_ms(&self) -> Option<f64> {
        self.test_summary.as_ref().and_then(|summary| summary.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use chrono::TimeZone;

    const FULL_SNAPSHOT: &str = r#"{
        "schemaVersion": 1,
        "generatedAt": "2026-02-05T13:31:55.035Z",
        "cloc": {
            "total": { "files": 40, "blank": 300, "comment": 120, "code": 2978 },
            "ts": { "code": 2000 },
            "tsx": { "code": 978 }
        },
        "coverage": {
            "overall": {
                "lines": { "total": 200, "covered": 150, "pct": 75 },
                "branches": { "total": 0, "covered": 0, "pct": "Unknown" },
                "functions": { "total": 40, "covered": 30 },
                "statements": { "total": 210, "covered": 160, "pct": 76.19 }
            },
            "categories": {}
        },
        "tests": {
            "summary": { "total": 10, "passed": 9, "failed": 1, "skipped": 0, "todo": 0, "passRate": 90, "durationMs": 4500, "success": false },
            "categories": {
                "unit": { "files": 3, "tests": 8, "coveragePct": 70.5, "results": { "total": 8, "passed": 8 } },
                "api": { "files": 1, "tests": 2, "coveragePct": 12, "results": null },
                "e2e": null
            }
        }
    }"#;

    #[test]
    fn test_full_snapshot() {
        let record = SnapshotRecord::from_json(FULL_SNAPSHOT).unwrap();

        assert_eq!(
            record.generated_at,
            Some(Utc.with_ymd_and_hms(2026, 2, 5, 13, 31, 55).unwrap() + chrono::Duration::milliseconds(35))
        );
        assert_eq!(record.code_lines_total(), Some(2978));
        assert_eq!(record.code_lines_bucket("tsx"), Some(978));
        assert_eq!(record.coverage_pct(CoverageKind::Lines), Some(75.0));
        assert_eq!(record.coverage_pct(CoverageKind::Branches), Some(0.0));
        assert_eq!(record.coverage_pct(CoverageKind::Functions), Some(75.0));
        assert_eq!(record.pass_rate(), Some(90.0));
        assert_eq!(record.duration_ms(), Some(4500.0));

        let names: Vec<_> = record.test_categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["unit", "api"]);
    }

    #[test]
    fn test_absent_sections() {
        let record = SnapshotRecord::from_json(r#"{"cloc": null}"#).unwrap();

        assert_eq!(record, SnapshotRecord::default());
        assert_eq!(record.code_lines_total(), None);
        assert_eq!(record.pass_rate(), None);
    }

    #[test]
    fn test_unparseable_generated_at_is_ignored() {
        let record = SnapshotRecord::from_json(r#"{"generatedAt": "yesterday"}"#).unwrap();
        assert_eq!(record.generated_at, None);
    }

    #[test]
    fn test_mistyped_sections_are_ignored() {
        let record = SnapshotRecord::from_json(
            r#"{
                "generatedAt": 123,
                "cloc": [],
                "coverage": { "overall": "full" },
                "tests": { "summary": [1, 2], "categories": "none" }
            }"#,
        )
        .unwrap();

        assert_eq!(record, SnapshotRecord::default());
    }

    #[test]
    fn test_mistyped_leaves_keep_the_rest() {
        let record = SnapshotRecord::from_json(
            r#"{
                "cloc": { "total": { "code": "many" }, "ts": { "code": 120 } },
                "coverage": {
                    "overall": {
                        "lines": { "total": "200", "covered": 150, "pct": 75 },
                        "branches": 12
                    }
                },
                "tests": {
                    "summary": { "total": "5", "passed": 4, "failed": 1, "success": "yes", "suiteCounts": [] },
                    "categories": {
                        "unit": { "files": "three", "tests": 8, "results": { "passed": true } },
                        "api": 7
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(record.code_lines_total(), None);
        assert_eq!(record.code_lines_bucket("ts"), Some(120));
        assert_eq!(record.coverage_pct(CoverageKind::Lines), Some(75.0));
        assert_eq!(record.coverage_pct(CoverageKind::Branches), None);

        let summary = record.test_summary.as_ref().unwrap();
        assert_eq!(summary.total, 5);
        assert!(!summary.success);
        assert!((summary.pass_rate - 80.0).abs() < f64::EPSILON);

        let names: Vec<_> = record.test_categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["unit"]);
        assert_eq!(record.test_categories[0].file_count, 0);
        assert_eq!(record.test_categories[0].test_count, 8);
        assert_eq!(record.test_categories[0].results.as_ref().unwrap().passed, 0);
    }

    #[test]
    fn test_non_object_is_an_error() {
        let _ = SnapshotRecord::from_json("[1, 2, 3]").unwrap_err();
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let _ = SnapshotRecord::from_json("{ not json").unwrap_err();
    }

    #[test]
    fn test_read_reports_file_name() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("metrics.json")).unwrap();
        fs::write(&path, "{ broken").unwrap();

        let err = SnapshotRecord::read(&path).unwrap_err();
        assert!(format!("{err:#}").contains("metrics.json"), "error should name the file: {err:#}");
    }

    #[test]
    fn test_read_valid_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("metrics.json")).unwrap();
        fs::write(&path, FULL_SNAPSHOT).unwrap();

        let record = SnapshotRecord::read(&path).unwrap();
        assert_eq!(record.code_lines_total(), Some(2978));
    }
}
