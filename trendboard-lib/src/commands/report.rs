use super::Host;
use super::common::{ColorMode, ProjectArgs};
use super::config::Config;
use crate::Result;
use crate::history::MetricsHistory;
use crate::reports::{build_context, generate_console, render_report};
use crate::snapshot::SnapshotRecord;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "    report";

#[derive(Parser, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Write the report to this path instead of the configured `report_file`
    #[arg(long, value_name = "PATH")]
    pub report_file: Option<Utf8PathBuf>,

    /// Page layout (overrides `report.layout`)
    #[arg(long, value_name = "NAME")]
    pub layout: Option<String>,

    /// Color theme (overrides `report.theme`)
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,

    /// Also print the latest values to the terminal
    #[arg(long)]
    pub summary: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,
}

/// Snapshots a report is built from
#[derive(Debug, Clone, Default)]
pub struct ReportInputs {
    pub history: MetricsHistory,

    /// The live metrics file, when present
    pub current: Option<SnapshotRecord>,
}

impl ReportInputs {
    /// Read the history directory and the live metrics file
    ///
    /// # Errors
    ///
    /// Returns an error if the history pattern is unusable, the history
    /// directory cannot be listed, or the live metrics file exists but cannot
    /// be read or parsed
    pub fn load(config: &Config, project_root: &Utf8Path) -> Result<Self> {
        let pattern = config.history_pattern()?;
        let history = MetricsHistory::load(&project_root.join(&config.history_dir), &pattern, config.report.use_local_time)?;

        let metrics_path = project_root.join(&config.metrics_file);
        let current = if metrics_path.exists() {
            Some(SnapshotRecord::read(&metrics_path)?)
        } else {
            log::debug!(target: LOG_TARGET, "No current metrics file at '{metrics_path}'");
            None
        };

        Ok(Self { history, current })
    }
}

/// Render the report and write it to the configured report file
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns an error if the layout or theme cannot be resolved or the file cannot be written
pub fn build_report(config: &Config, project_root: &Utf8Path, inputs: &ReportInputs, now: DateTime<Utc>) -> Result<Utf8PathBuf> {
    let html = render_report(&config.report, &inputs.history, inputs.current.as_ref(), now)?;

    let path = project_root.join(&config.report_file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_app_err_with(|| format!("creating report directory '{parent}'"))?;
    }
    fs::write(&path, html).into_app_err_with(|| format!("writing report to '{path}'"))?;

    log::info!(target: LOG_TARGET, "Wrote report to '{path}'");
    Ok(path)
}

pub fn generate_report<H: Host>(host: &mut H, args: &ReportArgs) -> Result<()> {
    let mut config = args.project.load_config()?;

    if let Some(path) = &args.report_file {
        config.report_file.clone_from(path);
    }
    if let Some(layout) = &args.layout {
        config.report.layout.clone_from(layout);
    }
    if let Some(theme) = &args.theme {
        config.report.theme.clone_from(theme);
    }

    let now = Utc::now();
    let inputs = ReportInputs::load(&config, &args.project.cwd)?;
    let path = build_report(&config, &args.project.cwd, &inputs, now)?;

    if args.summary {
        let ctx = build_context(&config.report, &inputs.history, inputs.current.as_ref(), now);
        let mut summary = String::new();
        generate_console(&ctx, args.color.use_colors(host.output_is_terminal()), &mut summary)?;
        let _ = write!(host.output(), "{summary}");
        let _ = writeln!(host.output());
    }

    let _ = writeln!(host.output(), "Report written to {path}");
    Ok(())
}
