use super::{HistoryPattern, list_history_files};
use crate::Result;
use crate::charts::SeriesPoint;
use crate::snapshot::SnapshotRecord;
use camino::Utf8Path;
use chrono::{DateTime, Local, Utc};

const LOG_TARGET: &str = "   history";

/// Formats an instant as `YYYY-MM-DD HH:MM`, in local time or UTC.
#[must_use]
pub fn short_date(instant: DateTime<Utc>, use_local_time: bool) -> String {
    const FORMAT: &str = "%Y-%m-%d %H:%M";

    if use_local_time {
        instant.with_timezone(&Local).format(FORMAT).to_string()
    } else {
        instant.format(FORMAT).to_string()
    }
}

/// One historical run.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPoint {
    /// The snapshot's own timestamp, or the one encoded in its file name.
    pub instant: DateTime<Utc>,
    pub label: String,
    pub record: SnapshotRecord,
}

/// All readable history snapshots, oldest first.
#[derive(Debug, Clone, Default)]
pub struct MetricsHistory {
    points: Vec<HistoryPoint>,
}

impl MetricsHistory {
    /// Reads every history file in `dir` that matches `pattern`.
    ///
    /// Files that cannot be read or parsed are dropped with a warning.
    pub fn load(dir: &Utf8Path, pattern: &HistoryPattern, use_local_time_labels: bool) -> Result<Self> {
        let mut points = Vec::new();

        for file in list_history_files(dir, pattern)? {
            match SnapshotRecord::read(&file.path) {
                Ok(record) => {
                    let instant = record.generated_at.unwrap_or(file.timestamp);
                    points.push(HistoryPoint {
                        instant,
                        label: short_date(instant, use_local_time_labels),
                        record,
                    });
                }
                Err(e) => log::warn!(target: LOG_TARGET, "Skipping history file '{}': {e}", file.path),
            }
        }

        log::debug!(target: LOG_TARGET, "Loaded {} history point(s) from '{dir}'", points.len());
        Ok(Self { points })
    }

    #[must_use]
    pub const fn from_points(points: Vec<HistoryPoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[HistoryPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&HistoryPoint> {
        self.points.last()
    }

    /// One point per run, labelled with the run's short date.
    pub fn series<F>(&self, extractor: F) -> Vec<SeriesPoint>
    where
        F: Fn(&SnapshotRecord) -> Option<f64>,
    {
        self.points
            .iter()
            .map(|point| SeriesPoint::new(point.label.clone(), extractor(&point.record)))
            .collect()
    }

    /// Change between the last two runs.
    ///
    /// `None` with fewer than two runs, or when either run lacks the value.
    pub fn delta<F>(&self, extractor: F) -> Option<f64>
    where
        F: Fn(&SnapshotRecord) -> Option<f64>,
    {
        let [.., previous, latest] = self.points.as_slice() else {
            return None;
        };

        Some(extractor(&latest.record)? - extractor(&previous.record)?)
    }

    /// Largest finite value across all runs.
    pub fn max_of<F>(&self, extractor: F) -> Option<f64>
    where
        F: Fn(&SnapshotRecord) -> Option<f64>,
    {
        self.points
            .iter()
            .filter_map(|point| extractor(&point.record))
            .filter(|value| value.is_finite())
            .reduce(f64::max)
    }
}

/// A latest value and when it was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Latest<T> {
    pub value: T,
    pub instant: Option<DateTime<Utc>>,
}

/// Picks a value from the current snapshot, falling back to the newest history run.
///
/// The fallback applies whenever the current snapshot is missing or does not
/// carry the value, so one absent section never hides history.
pub fn resolve_latest<T, F>(current: Option<&SnapshotRecord>, history: &MetricsHistory, extractor: F) -> Option<Latest<T>>
where
    F: Fn(&SnapshotRecord) -> Option<T>,
{
    if let Some(record) = current
        && let Some(value) = extractor(record)
    {
        return Some(Latest {
            value,
            instant: record.generated_at,
        });
    }

    history.last().and_then(|point| {
        extractor(&point.record).map(|value| Latest {
            value,
            instant: Some(point.instant),
        })
    })
}
