//! Command dispatch logic for trendboard

use super::common::{LogLevel, init_logging};
use super::{InitArgs, LayoutsArgs, ReportArgs, ValidateArgs, generate_report, init_config, list_layouts, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "trendboard", version, author, long_about = None)]
#[command(about = "Chart project metrics snapshots over time as a self-contained HTML dashboard")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: TrendboardSubcommand,
}

#[derive(Subcommand, Debug)]
enum TrendboardSubcommand {
    /// Render the HTML report from the metrics history
    Report(Box<ReportArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate the configuration
    Validate(ValidateArgs),
    /// List the available layouts and themes
    Layouts(LayoutsArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    init_logging(cli.log_level);

    match &cli.command {
        TrendboardSubcommand::Report(report_args) => generate_report(host, report_args),
        TrendboardSubcommand::Init(init_args) => init_config(host, init_args),
        TrendboardSubcommand::Validate(validate_args) => validate_config(host, validate_args),
        TrendboardSubcommand::Layouts(layouts_args) => list_layouts(host, layouts_args),
    }
}
