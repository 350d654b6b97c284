use super::{TableStyle, write_delta, write_quick_commands, write_table};
use crate::reports::context::{ChartCard, CountStyle, RenderContext};
use crate::reports::format::{FormattedDelta, MISSING, format_duration, format_fixed};
use crate::reports::theme::COLOR_SCHEME;
use core::fmt::{self, Write};

pub const DEFAULT_TOKENS: &[(&str, &str)] = &[
    (COLOR_SCHEME, "light"),
    ("bg", "#f4f2ec"),
    ("bg-panel", "#fbf8f1"),
    ("bg-card", "#f1ede6"),
    ("ink", "#1b1a17"),
    ("muted", "#6a665f"),
    ("grid", "#d7d1c6"),
    ("axis", "#a19a8e"),
    ("neon-cyan", "#1f6f5c"),
    ("neon-pink", "#a44f67"),
    ("neon-yellow", "#c5972e"),
    ("neon-green", "#2f855a"),
    ("neon-purple", "#6b5aa9"),
    ("neon-orange", "#d06b3d"),
    ("border", "rgba(27, 26, 23, 0.12)"),
    ("shadow", "0 24px 40px rgba(41, 36, 28, 0.12)"),
    ("radius", "8px"),
    ("code-bg", "#1e1b17"),
    ("code-ink", "#bfe5d2"),
];

pub const STYLESHEET: &str = include_str!("minimal.css");

const TABLE_STYLE: TableStyle<'static> = TableStyle {
    title: "Latest snapshot",
    recorded_header: "Timestamp",
    counts: CountStyle::Plain,
    strong_values: false,
};

pub fn write_body<W: Write>(writer: &mut W, ctx: &RenderContext) -> fmt::Result {
    let stamp = &ctx.stamp;
    let hero = &ctx.hero;

    writeln!(writer, "<main>")?;
    writeln!(writer, "  <header class=\"header\">")?;
    writeln!(writer, "    <div>")?;
    writeln!(writer, "      <div class=\"eyebrow\">Metrics report</div>")?;
    writeln!(writer, "      <h1>{}</h1>", ctx.escaped_title())?;
    writeln!(writer, "      <div class=\"sub\">{}</div>", ctx.subtitle_or(&format!("Generated {stamp}.")))?;
    writeln!(writer, "    </div>")?;
    writeln!(writer, "    <div class=\"stamp\">Generated {stamp}</div>")?;
    writeln!(writer, "  </header>")?;
    writeln!(writer)?;

    writeln!(writer, "  <section class=\"card\">")?;
    writeln!(writer, "    <div class=\"chart-title\">Overview</div>")?;
    writeln!(writer, "    <div class=\"overview\">")?;
    write_metric_row(writer, "Coverage (lines)", &percent(hero.coverage), &hero.coverage_delta, "Change vs previous run")?;
    write_metric_row(writer, "Pass rate", &percent(hero.pass_rate), &hero.pass_rate_delta, "Test success ratio")?;
    write_metric_row(writer, "Test duration", &format_duration(hero.duration_ms), &hero.duration_delta, "Lower is better")?;
    let code_lines = hero.code_lines.map_or_else(|| MISSING.to_string(), |v| v.to_string());
    write_metric_row(writer, "Code lines", &code_lines, &hero.code_lines_delta, "Total LOC snapshot")?;
    writeln!(writer, "    </div>")?;
    writeln!(writer, "  </section>")?;
    writeln!(writer)?;

    writeln!(writer, "  <div class=\"section-label\">Trends</div>")?;
    for card in ctx.charts.cards() {
        match card {
            ChartCard::Chart(_, fragment) => writeln!(writer, "  <div class=\"card\">{fragment}</div>")?,
            ChartCard::Notice(notice) => writeln!(writer, "  {notice}")?,
        }
    }

    if let Some(rows) = &ctx.table {
        writeln!(writer, "  <div class=\"card\">")?;
        write_table(writer, rows, &TABLE_STYLE)?;
        writeln!(writer, "  </div>")?;
    }

    writeln!(writer, "  <div class=\"card\">")?;
    writeln!(writer, "    <div class=\"chart-title\">Quick commands</div>")?;
    write_quick_commands(writer, "")?;
    writeln!(writer, "  </div>")?;
    writeln!(writer, "</main>")
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{}%", format_fixed(Some(v), 2)))
}

fn write_metric_row<W: Write>(writer: &mut W, label: &str, value: &str, delta: &FormattedDelta, note: &str) -> fmt::Result {
    writeln!(writer, "      <div class=\"metric-row\">")?;
    writeln!(writer, "        <div>")?;
    writeln!(writer, "          <div class=\"metric-label\">{label}</div>")?;
    writeln!(writer, "          <div class=\"metric-value\">{value}</div>")?;
    writeln!(writer, "        </div>")?;
    writeln!(writer, "        <div class=\"metric-meta\">")?;
    write_delta(writer, 10, "delta", delta)?;
    writeln!(writer, "          <div class=\"metric-note\">{note}</div>")?;
    writeln!(writer, "        </div>")?;
    writeln!(writer, "      </div>")
}
