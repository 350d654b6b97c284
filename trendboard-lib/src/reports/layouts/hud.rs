use super::{TableStyle, code_lines_fill, fill_percent, write_delta, write_quick_commands, write_table};
use crate::charts::Num;
use crate::reports::context::{ChartCard, CountStyle, RenderContext};
use crate::reports::format::{FormattedDelta, format_duration, format_fixed, group_thousands};
use crate::reports::theme::COLOR_SCHEME;
use core::fmt::{self, Write};

pub const DEFAULT_TOKENS: &[(&str, &str)] = &[
    (COLOR_SCHEME, "dark"),
    ("bg", "#0a0a0f"),
    ("bg-panel", "#12121a"),
    ("bg-card", "#1a1a25"),
    ("ink", "#e8e8f0"),
    ("muted", "#6b6b80"),
    ("grid", "#252535"),
    ("axis", "#3a3a50"),
    ("neon-cyan", "#00f5ff"),
    ("neon-pink", "#ff006e"),
    ("neon-yellow", "#ffea00"),
    ("neon-green", "#39ff14"),
    ("neon-purple", "#bf00ff"),
    ("neon-orange", "#ff6b35"),
    ("border", "rgba(0, 245, 255, 0.2)"),
    ("shadow", "0 0 40px rgba(0, 245, 255, 0.1)"),
    ("radius", "4px"),
    ("scanline", "rgba(0, 0, 0, 0.1)"),
    ("grid-line", "rgba(0, 245, 255, 0.03)"),
    ("title-glow", "rgba(0, 245, 255, 0.5)"),
    ("top-glow", "rgba(0, 245, 255, 0.05)"),
    ("eyebrow-glow", "rgba(0, 245, 255, 0.5)"),
    ("stamp-glow", "rgba(255, 234, 0, 0.1)"),
    ("section-glow", "rgba(191, 0, 255, 0.4)"),
    ("card-glow", "0 0 0 1px rgba(0, 245, 255, 0.1), inset 0 0 40px rgba(0, 245, 255, 0.02)"),
    ("panel-divider", "rgba(0, 245, 255, 0.2)"),
    ("stat-card-glow", "rgba(0, 245, 255, 0.05)"),
    ("stat-card-border", "rgba(0, 245, 255, 0.15)"),
    ("stat-card-border-hover", "rgba(0, 245, 255, 0.4)"),
    ("stat-card-shadow", "0 0 30px rgba(0, 245, 255, 0.1)"),
    ("progress-track", "rgba(0, 0, 0, 0.4)"),
    ("progress-border", "rgba(255, 255, 255, 0.1)"),
    ("progress-shimmer", "rgba(255, 255, 255, 0.3)"),
    ("progress-health", "linear-gradient(90deg, #ff4757, #ff6b81, #ff4757)"),
    ("progress-health-glow", "0 0 10px rgba(255, 71, 87, 0.5)"),
    ("progress-xp", "linear-gradient(90deg, #3742fa, #5352ed, #3742fa)"),
    ("progress-xp-glow", "0 0 10px rgba(55, 66, 250, 0.5)"),
    ("progress-energy", "linear-gradient(90deg, #2ed573, #7bed9f, #2ed573)"),
    ("progress-energy-glow", "0 0 10px rgba(46, 213, 115, 0.5)"),
    ("progress-mana", "linear-gradient(90deg, #00d2d3, #54a0ff, #00d2d3)"),
    ("progress-mana-glow", "0 0 10px rgba(0, 210, 211, 0.5)"),
    ("level-badge-bg", "rgba(255, 215, 0, 0.1)"),
    ("level-badge-border", "rgba(255, 215, 0, 0.3)"),
    ("level-badge-color", "#ffd700"),
    ("level-badge-glow", "rgba(255, 215, 0, 0.5)"),
    ("delta-up-bg", "rgba(57, 255, 20, 0.1)"),
    ("delta-up-border", "rgba(57, 255, 20, 0.3)"),
    ("delta-up-glow", "rgba(57, 255, 20, 0.5)"),
    ("delta-down-bg", "rgba(255, 0, 110, 0.1)"),
    ("delta-down-border", "rgba(255, 0, 110, 0.3)"),
    ("delta-down-glow", "rgba(255, 0, 110, 0.5)"),
    ("delta-flat-bg", "rgba(107, 107, 128, 0.1)"),
    ("delta-flat-border", "rgba(107, 107, 128, 0.3)"),
    ("code-bg", "#0d0d12"),
    ("code-ink", "#39ff14"),
    ("code-glow", "rgba(57, 255, 20, 0.3)"),
    ("table-border", "rgba(0, 245, 255, 0.1)"),
    ("table-hover", "rgba(0, 245, 255, 0.03)"),
    ("xp-bg", "linear-gradient(135deg, rgba(191, 0, 255, 0.08), transparent)"),
    ("xp-border", "rgba(191, 0, 255, 0.2)"),
    ("achievement-bg", "rgba(255, 234, 0, 0.05)"),
    ("achievement-border", "rgba(255, 234, 0, 0.15)"),
    ("achievement-icon-glow", "rgba(255, 234, 0, 0.3)"),
];

pub const STYLESHEET: &str = include_str!("hud.css");

/// Coverage at or above this unlocks the achievement card.
const GUARDIAN_THRESHOLD: f64 = 80.0;

const TABLE_STYLE: TableStyle<'static> = TableStyle {
    title: "Latest Snapshot Data",
    recorded_header: "Timestamp",
    counts: CountStyle::Grouped,
    strong_values: false,
};

/// Line coverage expressed as a level from 0 to 10 with a tier title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageLevel {
    pub level: u8,
    pub title: &'static str,
    pub color: &'static str,
}

/// Pass rate grade from S down to D.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassRateRank {
    pub rank: &'static str,
    pub color: &'static str,
}

const LEVEL_TITLES: [(f64, &str, &str); 4] = [
    (90.0, "LEGENDARY", "#ffd700"),
    (80.0, "EPIC", "#bf00ff"),
    (60.0, "RARE", "#00f5ff"),
    (40.0, "UNCOMMON", "#39ff14"),
];

const RANKS: [(f64, &str, &str); 4] = [(99.0, "S", "#ffd700"), (95.0, "A", "#39ff14"), (90.0, "B", "#00f5ff"), (75.0, "C", "#ffea00")];

#[must_use]
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "clamped to 0..=10 first")]
pub fn coverage_level(pct: Option<f64>) -> CoverageLevel {
    let pct = pct.filter(|v| v.is_finite()).unwrap_or(0.0);
    let level = (pct / 10.0).floor().clamp(0.0, 10.0) as u8;
    let (title, color) = LEVEL_TITLES
        .iter()
        .find(|(min, _, _)| pct >= *min)
        .map_or(("COMMON", "#6b6b80"), |(_, title, color)| (*title, *color));

    CoverageLevel { level, title, color }
}

#[must_use]
pub fn pass_rate_rank(pass_rate: Option<f64>) -> PassRateRank {
    let rate = pass_rate.filter(|v| v.is_finite()).unwrap_or(0.0);
    let (rank, color) = RANKS
        .iter()
        .find(|(min, _, _)| rate >= *min)
        .map_or(("D", "#ff006e"), |(_, rank, color)| (*rank, *color));

    PassRateRank { rank, color }
}

/// A stat card in the player stats rail.
struct StatCard<'a> {
    label: &'a str,
    badge: String,
    value: String,
    value_color: &'a str,
    delta: &'a FormattedDelta,
    fill_class: &'a str,
    fill: f64,
    meter_label: &'a str,
    meter_value: String,
}

pub fn write_body<W: Write>(writer: &mut W, ctx: &RenderContext) -> fmt::Result {
    let stamp = &ctx.stamp;
    let hero = &ctx.hero;
    let level = coverage_level(hero.coverage);
    let rank = pass_rate_rank(hero.pass_rate);

    writeln!(writer, "<main>")?;
    writeln!(writer, "  <div class=\"top reveal\">")?;
    writeln!(writer, "    <div>")?;
    writeln!(writer, "      <div class=\"eyebrow\">Developer Metrics HUD</div>")?;
    writeln!(writer, "      <h1 class=\"glitch\">{}</h1>", ctx.escaped_title())?;
    writeln!(writer, "      <div class=\"sub\">{}</div>", ctx.subtitle_or(&format!("Session recorded: {stamp}")))?;
    writeln!(writer, "    </div>")?;
    writeln!(writer, "    <div class=\"stamp pulse\">● LIVE // {stamp}</div>")?;
    writeln!(writer, "  </div>")?;
    writeln!(writer)?;

    writeln!(writer, "  <div class=\"layout\">")?;
    writeln!(writer, "    <aside class=\"rail\">")?;
    writeln!(writer, "      <div class=\"card reveal\">")?;
    writeln!(writer, "        <div class=\"panel-title\">")?;
    writeln!(writer, "          <span>Player Stats</span>")?;
    writeln!(
        writer,
        "          <span class=\"level-badge\"><span>LVL</span><span class=\"level-num\">{}</span></span>",
        level.level
    )?;
    writeln!(writer, "        </div>")?;
    writeln!(writer, "        <div class=\"stat-stack\">")?;

    let coverage = hero.coverage.unwrap_or(0.0);
    write_stat_card(
        writer,
        &StatCard {
            label: "Coverage Health",
            badge: format!("<span class=\"stat-rank\" style=\"color: {0}; text-shadow: 0 0 15px {0};\">{1}</span>", level.color, level.title),
            value: format!("{}%", hud_fixed(hero.coverage)),
            value_color: level.color,
            delta: &hero.coverage_delta,
            fill_class: "health",
            fill: fill_percent(coverage),
            meter_label: "HP",
            meter_value: format!("{}/100", Num(coverage.round())),
        },
    )?;

    let pass_rate = hero.pass_rate.unwrap_or(0.0);
    write_stat_card(
        writer,
        &StatCard {
            label: "Pass Rate Rank",
            badge: format!("<span class=\"stat-rank\" style=\"color: {0}; text-shadow: 0 0 15px {0};\">{1}</span>", rank.color, rank.rank),
            value: format!("{}%", hud_fixed(hero.pass_rate)),
            value_color: rank.color,
            delta: &hero.pass_rate_delta,
            fill_class: "energy",
            fill: fill_percent(pass_rate),
            meter_label: "XP",
            meter_value: format!("{}/100", Num(pass_rate.round())),
        },
    )?;

    let duration_ms = hero.duration_ms.unwrap_or(0.0);
    write_stat_card(
        writer,
        &StatCard {
            label: "Test Duration",
            badge: "<span class=\"stat-icon\">⏱</span>".to_string(),
            value: hero.duration_ms.map_or_else(|| "--".to_string(), |ms| format_duration(Some(ms))),
            value_color: "var(--neon-yellow)",
            delta: &hero.duration_delta,
            fill_class: "mana",
            fill: fill_percent(duration_ms / 100.0),
            meter_label: "MP",
            meter_value: format!("{}ms", Num(duration_ms)),
        },
    )?;

    write_stat_card(
        writer,
        &StatCard {
            label: "Code Score",
            badge: "<span class=\"stat-icon\">◆</span>".to_string(),
            value: hero.code_lines.map_or_else(|| "--".to_string(), group_thousands),
            value_color: "var(--neon-purple)",
            delta: &hero.code_lines_delta,
            fill_class: "xp",
            fill: code_lines_fill(hero.code_lines, 10.0),
            meter_label: "LINES",
            meter_value: group_thousands(hero.code_lines.unwrap_or(0)),
        },
    )?;

    writeln!(writer, "        </div>")?;
    writeln!(writer, "        <div class=\"divider\"></div>")?;
    writeln!(writer, "        <div class=\"muted-line\">◄ STATS COMPARED VS PREVIOUS RUN ►</div>")?;
    writeln!(writer, "      </div>")?;

    if hero.coverage.is_some_and(|pct| pct >= GUARDIAN_THRESHOLD) {
        writeln!(writer, "      <div class=\"card reveal\">")?;
        writeln!(writer, "        <div class=\"panel-title\">Achievement Unlocked</div>")?;
        writeln!(writer, "        <div class=\"achievement\">")?;
        writeln!(writer, "          <div class=\"achievement-icon\">★</div>")?;
        writeln!(writer, "          <div class=\"achievement-info\">")?;
        writeln!(writer, "            <div class=\"achievement-name\">Code Guardian</div>")?;
        writeln!(writer, "            <div class=\"achievement-desc\">Reach 80%+ coverage</div>")?;
        writeln!(writer, "          </div>")?;
        writeln!(writer, "        </div>")?;
        writeln!(writer, "      </div>")?;
    }

    writeln!(writer, "      <div class=\"card reveal\">")?;
    writeln!(writer, "        <div class=\"panel-title\">Command Terminal</div>")?;
    writeln!(writer, "        <div class=\"info\">Execute commands to rebuild the report</div>")?;
    write_quick_commands(writer, "&gt; ")?;
    writeln!(writer, "      </div>")?;
    writeln!(writer, "    </aside>")?;
    writeln!(writer)?;

    writeln!(writer, "    <section class=\"deck\">")?;
    writeln!(writer, "      <div class=\"section-label reveal\">Mission Trends</div>")?;
    for card in ctx.charts.cards() {
        match card {
            ChartCard::Chart(_, fragment) => writeln!(writer, "      <div class=\"card card--chart reveal\">{fragment}</div>")?,
            ChartCard::Notice(notice) => writeln!(writer, "      {notice}")?,
        }
    }

    if let Some(rows) = &ctx.table {
        writeln!(writer, "      <div class=\"card reveal\">")?;
        write_table(writer, rows, &TABLE_STYLE)?;
        writeln!(writer, "      </div>")?;
    }

    writeln!(writer, "    </section>")?;
    writeln!(writer, "  </div>")?;
    writeln!(writer, "</main>")
}

fn hud_fixed(value: Option<f64>) -> String {
    value.map_or_else(|| "--".to_string(), |v| format_fixed(Some(v), 1))
}

fn write_stat_card<W: Write>(writer: &mut W, card: &StatCard<'_>) -> fmt::Result {
    writeln!(writer, "          <div class=\"stat-card\">")?;
    writeln!(writer, "            <div class=\"stat-header\">")?;
    writeln!(writer, "              <span class=\"stat-label\">{}</span>", card.label)?;
    writeln!(writer, "              {}", card.badge)?;
    writeln!(writer, "            </div>")?;
    writeln!(writer, "            <div class=\"stat-value-row\">")?;
    writeln!(
        writer,
        "              <span class=\"stat-value\" style=\"color: {};\">{}</span>",
        card.value_color, card.value
    )?;
    write_delta(writer, 14, "delta", card.delta)?;
    writeln!(writer, "            </div>")?;
    writeln!(writer, "            <div class=\"progress-container\">")?;
    writeln!(writer, "              <div class=\"progress-bar\">")?;
    writeln!(
        writer,
        "                <div class=\"progress-fill {}\" style=\"width: {}%\"></div>",
        card.fill_class,
        Num(card.fill)
    )?;
    writeln!(writer, "              </div>")?;
    writeln!(writer, "              <div class=\"progress-header\">")?;
    writeln!(writer, "                <span>{}</span>", card.meter_label)?;
    writeln!(writer, "                <span>{}</span>", card.meter_value)?;
    writeln!(writer, "              </div>")?;
    writeln!(writer, "            </div>")?;
    writeln!(writer, "          </div>")
}
