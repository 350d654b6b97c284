use super::Host;
use super::common::ProjectArgs;
use crate::Result;
use crate::reports::{Layout, ThemeRegistry};
use clap::Parser;
use ohno::app_err;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct LayoutsArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Print the registered layouts and the themes the configuration can select
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded
pub fn list_layouts<H: Host>(host: &mut H, args: &LayoutsArgs) -> Result<()> {
    let config = args.project.load_config()?;
    let registry = ThemeRegistry::new(&config.report.themes).map_err(|e| app_err!("{e}"))?;

    let mut out = host.output();

    let _ = writeln!(out, "Layouts:");
    for name in Layout::names() {
        let marker = if name == config.report.layout { " (selected)" } else { "" };
        let _ = writeln!(out, "  {name}{marker}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Themes:");
    for name in registry.names() {
        let marker = if name == config.report.theme { " (selected)" } else { "" };
        let _ = writeln!(out, "  {name}{marker}");
    }

    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use camino::Utf8PathBuf;
    use std::fs;

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_lists_builtin_and_custom_entries() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("trendboard.toml"),
            "[report]\ntheme = \"ocean\"\n\n[report.themes.ocean]\nbg = \"#0b1d2a\"\n",
        )
        .unwrap();

        let args = LayoutsArgs {
            project: ProjectArgs {
                cwd: Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap(),
                config: None,
                overrides: vec!["report.layout=hud".to_string()],
            },
        };

        let mut host = TestHost::new();
        list_layouts(&mut host, &args).unwrap();

        let output = String::from_utf8(host.output_buf).unwrap();
        insta::assert_snapshot!(output, @r"
        Layouts:
          minimal
          hud (selected)
          risograph

        Themes:
          dark
          default
          light
          ocean (selected)
        ");
    }
}
