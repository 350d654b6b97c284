use super::context::{CountStyle, RenderContext};
use super::format::{DeltaClass, FormattedDelta, MISSING, format_duration, format_fixed, group_thousands};
use crate::Result;
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Writes a terminal summary of the headline values and the latest-values table.
pub fn generate<W: Write>(ctx: &RenderContext, use_colors: bool, writer: &mut W) -> Result<()> {
    if use_colors {
        writeln!(writer, "{}", ctx.title.bold())?;
    } else {
        writeln!(writer, "{}", ctx.title)?;
    }
    writeln!(writer, "Generated {}", ctx.stamp)?;
    writeln!(writer)?;

    let hero = &ctx.hero;
    let percent = |value: Option<f64>| value.map_or_else(|| MISSING.to_string(), |v| format!("{}%", format_fixed(Some(v), 2)));
    let headline = [
        ("Coverage (lines)", percent(hero.coverage), &hero.coverage_delta),
        ("Pass rate", percent(hero.pass_rate), &hero.pass_rate_delta),
        ("Test duration", format_duration(hero.duration_ms), &hero.duration_delta),
        (
            "Code lines",
            hero.code_lines.map_or_else(|| MISSING.to_string(), group_thousands),
            &hero.code_lines_delta,
        ),
    ];

    let name_width = headline.iter().map(|(name, _, _)| name.len()).max().unwrap_or(0);
    let value_width = headline.iter().map(|(_, value, _)| value.len()).max().unwrap_or(0);

    for (name, value, delta) in &headline {
        writeln!(
            writer,
            "  {name:<name_width$} : {value:<value_width$}  {}",
            colored_delta(delta, use_colors)
        )?;
    }

    if let Some(rows) = &ctx.table {
        writeln!(writer)?;
        if use_colors {
            writeln!(writer, "{}", "Latest values".bold())?;
        } else {
            writeln!(writer, "Latest values")?;
        }

        let label_width = rows.iter().map(|row| row.label.len()).max().unwrap_or(0);
        for row in rows {
            writeln!(
                writer,
                "  {:<label_width$} : {} ({})",
                row.label,
                row.value.render(CountStyle::Grouped),
                row.recorded_text()
            )?;
        }
    }

    Ok(())
}

fn colored_delta(delta: &FormattedDelta, use_colors: bool) -> String {
    if !use_colors {
        return delta.text.clone();
    }

    match delta.class {
        DeltaClass::Up => delta.text.green().to_string(),
        DeltaClass::Down => delta.text.red().to_string(),
        DeltaClass::Flat => delta.text.dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::context::{ChartFragments, HeroValues, TableRow, TableValue};

    fn context() -> RenderContext {
        RenderContext {
            title: "Metrics Report".to_string(),
            subtitle: None,
            stamp: "2026-02-05 13:31".to_string(),
            hero: HeroValues {
                coverage: Some(84.5),
                pass_rate: None,
                duration_ms: Some(2_500.0),
                code_lines: Some(12_978),
                coverage_delta: FormattedDelta {
                    text: "+1.50%".to_string(),
                    class: DeltaClass::Up,
                },
                pass_rate_delta: FormattedDelta {
                    text: "-".to_string(),
                    class: DeltaClass::Flat,
                },
                duration_delta: FormattedDelta {
                    text: "+0.30s".to_string(),
                    class: DeltaClass::Down,
                },
                code_lines_delta: FormattedDelta {
                    text: "+12".to_string(),
                    class: DeltaClass::Flat,
                },
            },
            charts: ChartFragments::default(),
            table: Some(vec![TableRow {
                label: "Total code lines".to_string(),
                value: TableValue::Count(Some(12_978)),
                recorded: Some("2026-02-05 13:31".to_string()),
            }]),
        }
    }

    #[test]
    fn test_plain_summary() {
        let mut out = String::new();
        generate(&context(), false, &mut out).unwrap();

        insta::assert_snapshot!(out, @r"
        Metrics Report
        Generated 2026-02-05 13:31

          Coverage (lines) : 84.50%  +1.50%
          Pass rate        : -       -
          Test duration    : 2.50s   +0.30s
          Code lines       : 12,978  +12

        Latest values
          Total code lines : 12,978 (2026-02-05 13:31)
        ");
    }

    #[test]
    fn test_colored_summary_keeps_text() {
        let mut out = String::new();
        generate(&context(), true, &mut out).unwrap();

        assert!(out.contains("\u{1b}["));
        assert!(out.contains("+1.50%"));
        assert!(out.contains("12,978"));
    }

    #[test]
    fn test_summary_without_table() {
        let mut ctx = context();
        ctx.table = None;

        let mut out = String::new();
        generate(&ctx, false, &mut out).unwrap();
        assert!(!out.contains("Latest values"));
    }
}
