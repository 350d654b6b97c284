#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for trendboard
//!
//! This library consolidates all functionality for the trendboard tool, which
//! turns a directory of metrics snapshots (line counts, coverage and test
//! results) into a self-contained HTML trend dashboard.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface, configuration and file IO
//! - [`snapshot`]: Parsing of individual metrics snapshots
//! - [`history`]: Timestamped snapshot files and the series derived from them
//! - [`charts`]: SVG line, dual-axis and bar charts
//! - [`reports`]: Layouts, themes and page assembly

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod charts;
#[cfg(not(any(debug_assertions, test)))]
mod charts;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod history;
#[cfg(not(any(debug_assertions, test)))]
mod history;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

#[cfg(any(debug_assertions, test))]
pub mod snapshot;
#[cfg(not(any(debug_assertions, test)))]
mod snapshot;

pub use crate::commands::{Host, run};
