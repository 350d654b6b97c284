use super::Host;
use super::common::ProjectArgs;
use super::config::CONFIG_FILE_NAME;
use crate::Result;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Load the layered configuration and report whether it is usable
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or fails validation
pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    match args.project.load_config() {
        Ok(config) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = &args.project.config {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else if args.project.cwd.join(CONFIG_FILE_NAME).exists() {
                let _ = writeln!(host.output(), "Config file: {}", args.project.cwd.join(CONFIG_FILE_NAME));
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file found)");
            }
            let _ = writeln!(
                host.output(),
                "Layout: {}, theme: {}",
                config.report.layout,
                config.report.theme
            );
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
