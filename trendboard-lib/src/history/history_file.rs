use super::TimestampCodec;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use ohno::IntoAppError;
use regex::Regex;

const LOG_TARGET: &str = "   history";

/// Placeholder for the encoded timestamp in a history file name pattern.
pub const TIMESTAMP_PLACEHOLDER: &str = "{timestamp}";

const JSON_EXTENSION: &str = ".json";

/// Recognizes history file names such as `metrics-01.02.25.12.30.00.json`.
#[derive(Debug, Clone)]
pub struct HistoryPattern {
    file_pattern: String,
    prefix: String,
    matcher: Regex,
    codec: TimestampCodec,
}

impl HistoryPattern {
    /// Builds a pattern from a file name template containing `{timestamp}`.
    ///
    /// The literal text before the placeholder is the required prefix. When
    /// `file_regex` is given it replaces the matcher derived from the template;
    /// its first capture group (or the whole match, if it has none) is handed
    /// to the codec.
    pub fn new(file_pattern: &str, file_regex: Option<&str>, codec: TimestampCodec) -> Result<Self> {
        let prefix = file_pattern.split(TIMESTAMP_PLACEHOLDER).next().unwrap_or_default().to_string();

        let source = match file_regex {
            Some(custom) => custom.to_string(),
            None => format!(
                "^{}$",
                regex::escape(file_pattern).replace(&regex::escape(TIMESTAMP_PLACEHOLDER), "(.+)")
            ),
        };

        let matcher = Regex::new(&source).into_app_err_with(|| format!("compiling history file pattern '{source}'"))?;

        Ok(Self {
            file_pattern: file_pattern.to_string(),
            prefix,
            matcher,
            codec,
        })
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub const fn codec(&self) -> &TimestampCodec {
        &self.codec
    }

    /// Returns the instant encoded in `name`, or `None` if the name is not a history file.
    #[must_use]
    pub fn parse_name(&self, name: &str) -> Option<DateTime<Utc>> {
        if !name.starts_with(&self.prefix) || !name.ends_with(JSON_EXTENSION) {
            return None;
        }

        let captures = self.matcher.captures(name)?;
        let encoded = captures.get(1).or_else(|| captures.get(0))?.as_str();
        self.codec.parse(encoded)
    }

    /// Returns the history file name for a run taken at `instant`.
    #[must_use]
    pub fn file_name(&self, instant: DateTime<Utc>) -> String {
        self.file_pattern.replace(TIMESTAMP_PLACEHOLDER, &self.codec.format(instant))
    }
}

/// A history file whose name carries a valid timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFile {
    pub path: Utf8PathBuf,
    pub timestamp: DateTime<Utc>,
}

/// Lists the history files in `dir`, oldest first.
///
/// Names that do not match the pattern are skipped, as are entries that cannot
/// be inspected, such as dangling links. Files with equal timestamps stay in
/// file name order. A missing directory has no history.
pub fn list_history_files(dir: &Utf8Path, pattern: &HistoryPattern) -> Result<Vec<HistoryFile>> {
    if !dir.is_dir() {
        log::debug!(target: LOG_TARGET, "No history directory at '{dir}'");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();

    for entry_result in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Skipping unreadable entry in '{dir}': {e}");
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };

        match pattern.parse_name(name) {
            Some(timestamp) => files.push(HistoryFile {
                path: dir.join(name),
                timestamp,
            }),
            None => log::debug!(target: LOG_TARGET, "Ignoring '{name}': not a history file"),
        }
    }

    files.sort_by_key(|file| file.timestamp);
    Ok(files)
}
