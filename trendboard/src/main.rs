//! Render project metrics history as a static trend dashboard.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{IsTerminal, Write};
use std::io::{stderr, stdout};
use trendboard_lib::{Host, run};

/// Host backed by the process's standard streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn output_is_terminal(&self) -> bool {
        stdout().is_terminal()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args())
}
