use std::io::Write;

/// Where commands send their output, so they can run outside a real process
pub trait Host: Send + Sync {
    /// Report paths, summaries and listings
    fn output(&mut self) -> impl Write;

    /// Failure messages
    fn error(&mut self) -> impl Write;

    /// Whether `output` is an interactive terminal
    fn output_is_terminal(&self) -> bool {
        false
    }

    /// Request a process exit with the given status code.
    fn exit(&mut self, code: i32);
}

/// Captures output in memory and records the requested exit code
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
    pub terminal: bool,
}

#[cfg(test)]
impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn output_is_terminal(&self) -> bool {
        self.terminal
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
