use super::{TableStyle, code_lines_fill, fill_percent, write_delta, write_quick_commands, write_table};
use crate::charts::Num;
use crate::reports::context::{ChartCard, ChartSlot, CountStyle, RenderContext};
use crate::reports::format::{FormattedDelta, format_duration, format_fixed, group_thousands};
use crate::reports::theme::COLOR_SCHEME;
use core::fmt::{self, Write};

pub const DEFAULT_TOKENS: &[(&str, &str)] = &[
    (COLOR_SCHEME, "light"),
    ("bg", "#faf6f0"),
    ("bg-panel", "#fff9f2"),
    ("bg-card", "#ffffff"),
    ("ink", "#2a2825"),
    ("muted", "#7a756d"),
    ("grid", "#e8e2d9"),
    ("axis", "#c4bdb2"),
    ("coral", "#e94e3d"),
    ("teal", "#1a9e96"),
    ("gold", "#f2b632"),
    ("green", "#3d9e5c"),
    ("purple", "#7b5aa6"),
    ("orange", "#e97b3d"),
    ("border", "rgba(42, 40, 37, 0.12)"),
    ("shadow", "4px 4px 0 rgba(26, 158, 150, 0.15)"),
    ("radius", "12px"),
    ("progress-track", "rgba(42, 40, 37, 0.08)"),
    ("delta-up-bg", "rgba(61, 158, 92, 0.12)"),
    ("delta-up-border", "rgba(61, 158, 92, 0.35)"),
    ("delta-down-bg", "rgba(233, 78, 61, 0.12)"),
    ("delta-down-border", "rgba(233, 78, 61, 0.35)"),
    ("delta-flat-bg", "rgba(122, 117, 109, 0.1)"),
    ("delta-flat-border", "rgba(122, 117, 109, 0.25)"),
    ("code-bg", "#2a2825"),
    ("code-ink", "#f2b632"),
    ("table-hover", "rgba(26, 158, 150, 0.06)"),
];

pub const STYLESHEET: &str = include_str!("risograph.css");

const TABLE_STYLE: TableStyle<'static> = TableStyle {
    title: "Latest Metrics",
    recorded_header: "Recorded",
    counts: CountStyle::Grouped,
    strong_values: true,
};

const fn card_title(slot: ChartSlot) -> &'static str {
    match slot {
        ChartSlot::CodeLines => "Lines of Code Over Time",
        ChartSlot::Coverage => "Coverage Trend",
        ChartSlot::PassRateDuration => "Pass Rate &amp; Duration",
        ChartSlot::TestCategories => "Test Categories",
    }
}

pub fn write_body<W: Write>(writer: &mut W, ctx: &RenderContext) -> fmt::Result {
    let stamp = &ctx.stamp;
    let hero = &ctx.hero;

    writeln!(writer, "<main>")?;
    writeln!(writer, "  <header class=\"header\">")?;
    writeln!(writer, "    <div class=\"header-inner\">")?;
    writeln!(writer, "      <div>")?;
    writeln!(writer, "        <div class=\"eyebrow\">Metrics Dashboard</div>")?;
    writeln!(writer, "        <h1>{}</h1>", ctx.escaped_title())?;
    writeln!(writer, "        <div class=\"sub\">{}</div>", ctx.subtitle_or(&format!("Generated {stamp}")))?;
    writeln!(writer, "      </div>")?;
    writeln!(writer, "      <div class=\"stamp\">{stamp}</div>")?;
    writeln!(writer, "    </div>")?;
    writeln!(writer, "  </header>")?;
    writeln!(writer)?;

    writeln!(writer, "  <div class=\"stats-row\">")?;
    write_stat_block(
        writer,
        "Coverage",
        &format!("{}%", riso_fixed(hero.coverage)),
        &hero.coverage_delta,
        ("health", fill_percent(hero.coverage.unwrap_or(0.0))),
        "Line coverage",
    )?;
    write_stat_block(
        writer,
        "Pass Rate",
        &format!("{}%", riso_fixed(hero.pass_rate)),
        &hero.pass_rate_delta,
        ("energy", fill_percent(hero.pass_rate.unwrap_or(0.0))),
        "Test success",
    )?;
    write_stat_block(
        writer,
        "Duration",
        &hero.duration_ms.map_or_else(|| "--".to_string(), |ms| format_duration(Some(ms))),
        &hero.duration_delta,
        ("mana", fill_percent(hero.duration_ms.unwrap_or(0.0) / 100.0)),
        "Test runtime",
    )?;
    write_stat_block(
        writer,
        "Code Lines",
        &hero.code_lines.map_or_else(|| "--".to_string(), group_thousands),
        &hero.code_lines_delta,
        ("xp", code_lines_fill(hero.code_lines, 20.0)),
        "Total LOC",
    )?;
    writeln!(writer, "  </div>")?;
    writeln!(writer)?;

    writeln!(writer, "  <div class=\"layout\">")?;
    writeln!(writer, "    <div class=\"section-label\">Trend Charts</div>")?;
    for card in ctx.charts.cards() {
        match card {
            ChartCard::Chart(slot, fragment) => {
                writeln!(writer, "    <div class=\"card chart-full\">")?;
                writeln!(writer, "      <div class=\"chart-title\">{}</div>", card_title(slot))?;
                writeln!(writer, "      {fragment}")?;
                writeln!(writer, "    </div>")?;
            }
            ChartCard::Notice(notice) => writeln!(writer, "    {notice}")?,
        }
    }

    writeln!(writer, "    <div class=\"card chart-full card--gold\">")?;
    writeln!(writer, "      <div class=\"chart-title\">Quick Commands</div>")?;
    writeln!(writer, "      <p class=\"hint\">Run these to rebuild the report</p>")?;
    write_quick_commands(writer, "$ ")?;
    writeln!(writer, "    </div>")?;

    if let Some(rows) = &ctx.table {
        writeln!(writer, "    <div class=\"section-label\">Data Snapshot</div>")?;
        writeln!(writer, "    <div class=\"table-wrap\">")?;
        writeln!(writer, "      <div class=\"card card--coral\">")?;
        write_table(writer, rows, &TABLE_STYLE)?;
        writeln!(writer, "      </div>")?;
        writeln!(writer, "    </div>")?;
    }

    writeln!(writer, "  </div>")?;
    writeln!(writer, "</main>")
}

fn riso_fixed(value: Option<f64>) -> String {
    value.map_or_else(|| "--".to_string(), |v| format_fixed(Some(v), 1))
}

fn write_stat_block<W: Write>(
    writer: &mut W,
    label: &str,
    value: &str,
    delta: &FormattedDelta,
    (fill_class, fill): (&str, f64),
    note: &str,
) -> fmt::Result {
    writeln!(writer, "    <div class=\"stat-block pop\">")?;
    writeln!(writer, "      <div class=\"stat-label\">{label}</div>")?;
    writeln!(writer, "      <div class=\"stat-value\">{value}</div>")?;
    write_delta(writer, 6, "stat-delta", delta)?;
    writeln!(writer, "      <div class=\"progress-wrap\">")?;
    writeln!(writer, "        <div class=\"progress-bar\">")?;
    writeln!(writer, "          <div class=\"progress-fill {fill_class}\" style=\"width: {}%\"></div>", Num(fill))?;
    writeln!(writer, "        </div>")?;
    writeln!(writer, "      </div>")?;
    writeln!(writer, "      <div class=\"stat-note\">{note}</div>")?;
    writeln!(writer, "    </div>")
}
