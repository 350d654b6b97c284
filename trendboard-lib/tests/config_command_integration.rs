//! Integration tests for the `init`, `validate` and `layouts` commands.

use std::fs;
use std::io::Write;
use trendboard_lib::Host;

#[derive(Default)]
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_init_then_validate() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().to_str().unwrap();

    let mut host = TestHost::default();
    let result = trendboard_lib::run(&mut host, ["trendboard", "init", "--cwd", root]);
    assert!(result.is_ok(), "{result:?}");
    assert!(tmp.path().join("trendboard.toml").exists());

    let mut host = TestHost::default();
    let result = trendboard_lib::run(&mut host, ["trendboard", "validate", "--cwd", root]);
    assert!(result.is_ok(), "{result:?}");

    let output = String::from_utf8_lossy(&host.output_buf);
    assert!(output.contains("Configuration file is valid"), "{output}");
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_validate_reports_failures() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("trendboard.toml"), "[report.chart]\nwidth = 0\n").unwrap();

    let mut host = TestHost::default();
    let result = trendboard_lib::run(&mut host, ["trendboard", "validate", "--cwd", tmp.path().to_str().unwrap()]);

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));
    assert!(String::from_utf8_lossy(&host.error_buf).contains("width"));
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_layouts_lists_registries() {
    let tmp = tempfile::tempdir().unwrap();

    let mut host = TestHost::default();
    let result = trendboard_lib::run(&mut host, ["trendboard", "layouts", "--cwd", tmp.path().to_str().unwrap()]);
    assert!(result.is_ok(), "{result:?}");

    let output = String::from_utf8_lossy(&host.output_buf);
    for name in ["minimal", "hud", "risograph", "default", "dark", "light"] {
        assert!(output.contains(name), "{name} missing from {output}");
    }
}
