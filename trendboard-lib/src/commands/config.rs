use crate::Result;
use crate::history::{HistoryPattern, TIMESTAMP_PLACEHOLDER, TimestampCodec};
use crate::reports::{Layout, ReportSettings, ThemeRegistry};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use toml::{Table, Value};

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the project root
pub const CONFIG_FILE_NAME: &str = "trendboard.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Snapshot written by the most recent producer run
    pub metrics_file: Utf8PathBuf,

    /// Directory holding timestamped copies of earlier snapshots
    pub history_dir: Utf8PathBuf,

    /// Where the HTML report is written
    pub report_file: Utf8PathBuf,

    pub history: HistorySettings,
    pub report: ReportSettings,
}

/// How history files are named
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HistorySettings {
    /// Timestamp format built from `YYYY`, `YY`, `MM`, `DD`, `HH`, `mm` and `ss`
    pub timestamp_format: String,

    /// File name template containing `{timestamp}`
    pub file_pattern: String,

    /// Regex replacing the matcher derived from `file_pattern`
    pub file_regex: Option<String>,

    /// Encode timestamps in local time instead of UTC
    pub use_local_time: bool,
}

impl Config {
    /// Load configuration by layering the embedded defaults, the project's
    /// configuration file and `key.path=value` overrides
    ///
    /// Without an explicit `config_path`, `trendboard.toml` in `project_root`
    /// is used when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an override is
    /// malformed, or the resulting configuration is invalid
    pub fn load(project_root: &Utf8Path, config_path: Option<&Utf8PathBuf>, overrides: &[String]) -> Result<Self> {
        let mut merged: Table = toml::from_str(DEFAULT_CONFIG_TOML).into_app_err("parsing the embedded default configuration")?;

        let file = if let Some(path) = config_path {
            let path = project_root.join(path);
            let text = fs::read_to_string(&path).into_app_err_with(|| format!("reading trendboard configuration file '{path}'"))?;
            Some((path, text))
        } else {
            let path = project_root.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => Some((path, text)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                Err(e) => return Err(e).into_app_err_with(|| format!("reading trendboard configuration file '{path}'")),
            }
        };

        if let Some((path, text)) = file {
            let table: Table = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{path}'"))?;
            merge_tables(&mut merged, table);
        }

        for entry in overrides {
            apply_override(&mut merged, entry)?;
        }

        let config = Self::deserialize(Value::Table(merged)).into_app_err("invalid configuration")?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Compile the history timestamp format and file name pattern
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern lacks the timestamp placeholder or a regex does not compile
    pub fn history_pattern(&self) -> Result<HistoryPattern> {
        let history = &self.history;
        if !history.file_pattern.contains(TIMESTAMP_PLACEHOLDER) {
            bail!(
                "history.file_pattern must contain {TIMESTAMP_PLACEHOLDER}, got '{}'",
                history.file_pattern
            );
        }

        let codec = TimestampCodec::compile(&history.timestamp_format, history.use_local_time)?;
        HistoryPattern::new(&history.file_pattern, history.file_regex.as_deref(), codec)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the chart geometry is inconsistent, a token value is
    /// unsafe, the history pattern is unusable, or the layout or theme is unknown
    pub fn validate(&self) -> Result<()> {
        if let Some(problem) = self.report.problem() {
            return Err(app_err!("report.{problem}"));
        }

        let _ = self.history_pattern()?;
        let _ = Layout::resolve(&self.report.layout).map_err(|e| app_err!("{e}"))?;

        let registry = ThemeRegistry::new(&self.report.themes).map_err(|e| app_err!("{e}"))?;
        let _ = registry.resolve(&self.report.theme).map_err(|e| app_err!("{e}"))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

/// Merge `overlay` into `base`; nested tables merge, everything else is replaced
fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(existing)), Value::Table(nested)) => merge_tables(existing, nested),
            (_, value) => {
                let _ = base.insert(key, value);
            }
        }
    }
}

/// Apply one `key.path=value` override
///
/// The value is read as a TOML value when it parses as one, and as a plain
/// string otherwise, so `report.layout=hud` needs no quoting.
fn apply_override(table: &mut Table, entry: &str) -> Result<()> {
    let Some((key, raw)) = entry.split_once('=') else {
        bail!("invalid override '{entry}': expected key.path=value");
    };

    let key = key.trim();
    let segments: Vec<&str> = key.split('.').map(str::trim).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        bail!("invalid override '{entry}': empty key segment");
    }

    let Some((last, parents)) = segments.split_last() else {
        bail!("invalid override '{entry}': missing key");
    };

    let mut current = table;
    for segment in parents {
        let next = current.entry((*segment).to_string()).or_insert(Value::Table(Table::new()));
        let Value::Table(nested) = next else {
            bail!("invalid override '{entry}': '{segment}' is not a table");
        };
        current = nested;
    }

    let _ = current.insert((*last).to_string(), parse_override_value(raw.trim()));
    Ok(())
}

fn parse_override_value(raw: &str) -> Value {
    let parsed = toml::from_str::<Table>(&format!("value = {raw}"))
        .ok()
        .filter(|table| table.len() == 1)
        .and_then(|mut table| table.remove("value"));

    parsed.unwrap_or_else(|| Value::String(raw.to_string()))
}
