//! Snapshot history
//!
//! Every producer run leaves a timestamped copy of its snapshot in the history
//! directory, named from a pattern such as `metrics-{timestamp}.json`. This
//! module encodes and decodes those timestamps, lists the matching files in
//! chronological order, and assembles them into per-run series with deltas
//! between the last two runs.

mod history_file;
mod series;
mod timestamp_codec;

pub use history_file::{HistoryFile, HistoryPattern, TIMESTAMP_PLACEHOLDER, list_history_files};
pub use series::{HistoryPoint, Latest, MetricsHistory, resolve_latest, short_date};
pub use timestamp_codec::TimestampCodec;
