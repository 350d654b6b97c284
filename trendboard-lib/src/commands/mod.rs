//! Command-line interface and orchestration for trendboard
//!
//! This module implements the CLI commands and ties the snapshot, history and
//! report modules together. It handles argument parsing, configuration
//! layering, and reading and writing files; everything below it is pure.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **report**: Load the history directory and the live metrics file, render
//!   the dashboard and write it as a single HTML file
//! - **init**: Generate a default configuration file
//! - **validate**: Load the layered configuration and check it
//! - **layouts**: List the registered layouts and the selectable themes
//!
//! ## Configuration
//!
//! A [`Config`] is assembled from three layers, each deep-merged over the
//! previous one: the embedded defaults, the project's `trendboard.toml` (or
//! the file given with `--config`), and `--set key.path=value` overrides.
//! Unknown keys are rejected and the merged result is validated before any
//! command uses it.
//!
//! The `run` function parses command-line arguments using clap, installs the
//! logger, and routes to the appropriate command handler. All output goes
//! through a [`Host`] so commands can be exercised in tests.

mod common;
mod config;
mod host;
mod init;
mod layouts;
mod report;
mod run;
mod validate;

#[cfg(any(debug_assertions, test))]
pub use config::Config;

pub use host::Host;
pub use init::{InitArgs, init_config};
pub use layouts::{LayoutsArgs, list_layouts};
pub use report::{ReportArgs, generate_report};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
