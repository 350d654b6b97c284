use super::format::{FormattedDelta, MISSING, format_duration, format_fixed, group_thousands};
use crate::charts::html_escape;

/// Pass, fail and skip counts shown in the latest-values table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCounts {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
}

/// How large counts are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountStyle {
    Plain,
    Grouped,
}

impl CountStyle {
    #[must_use]
    pub fn format(self, value: u64) -> String {
        match self {
            Self::Plain => value.to_string(),
            Self::Grouped => group_thousands(value),
        }
    }
}

/// A cell value in the latest-values table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableValue {
    Count(Option<u64>),
    Percent(Option<f64>),
    Duration(Option<f64>),
    Tests(Option<TestCounts>),
}

impl TableValue {
    /// Formats the value as escaped HTML text.
    #[must_use]
    pub fn render(&self, style: CountStyle) -> String {
        match self {
            Self::Count(value) => value.map_or_else(|| MISSING.to_string(), |v| style.format(v)),
            Self::Percent(value) => value.map_or_else(|| MISSING.to_string(), |v| format!("{}%", format_fixed(Some(v), 2))),
            Self::Duration(ms) => format_duration(*ms),
            Self::Tests(counts) => counts.map_or_else(
                || MISSING.to_string(),
                |c| {
                    format!(
                        "{} ({}/{}/{})",
                        style.format(c.total),
                        style.format(c.passed),
                        style.format(c.failed),
                        style.format(c.skipped)
                    )
                },
            ),
        }
    }
}

/// One row of the latest-values table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: String,
    pub value: TableValue,

    /// Short date of the snapshot the value came from.
    pub recorded: Option<String>,
}

impl TableRow {
    #[must_use]
    pub fn recorded_text(&self) -> &str {
        self.recorded.as_deref().unwrap_or(MISSING)
    }
}

/// Chart fragments in report order; `None` for disabled charts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartFragments {
    pub cloc: Option<String>,

    /// Card shown in place of the cloc chart when no run counted code lines.
    pub cloc_missing: Option<String>,
    pub coverage: Option<String>,
    pub pass_rate_duration: Option<String>,
    pub test_categories: Option<String>,
}

/// Which chart a card holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSlot {
    CodeLines,
    Coverage,
    PassRateDuration,
    TestCategories,
}

/// One entry in the report's sequence of chart cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartCard<'a> {
    Chart(ChartSlot, &'a str),

    /// A complete card, emitted as is.
    Notice(&'a str),
}

impl ChartFragments {
    /// The enabled charts in their fixed report order.
    #[must_use]
    pub fn cards(&self) -> Vec<ChartCard<'_>> {
        let mut cards = Vec::with_capacity(4);

        if let Some(fragment) = &self.cloc {
            cards.push(ChartCard::Chart(ChartSlot::CodeLines, fragment));
        }
        if let Some(notice) = &self.cloc_missing {
            cards.push(ChartCard::Notice(notice));
        }
        if let Some(fragment) = &self.coverage {
            cards.push(ChartCard::Chart(ChartSlot::Coverage, fragment));
        }
        if let Some(fragment) = &self.pass_rate_duration {
            cards.push(ChartCard::Chart(ChartSlot::PassRateDuration, fragment));
        }
        if let Some(fragment) = &self.test_categories {
            cards.push(ChartCard::Chart(ChartSlot::TestCategories, fragment));
        }

        cards
    }
}

/// Latest headline values with their change since the previous run.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroValues {
    pub coverage: Option<f64>,
    pub pass_rate: Option<f64>,
    pub duration_ms: Option<f64>,
    pub code_lines: Option<u64>,
    pub coverage_delta: FormattedDelta,
    pub pass_rate_delta: FormattedDelta,
    pub duration_delta: FormattedDelta,
    pub code_lines_delta: FormattedDelta,
}

/// Everything a layout needs; layouts never derive chart data themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub title: String,

    /// Configured subtitle with `{date}` already substituted.
    pub subtitle: Option<String>,

    /// When the report was generated, as a short date.
    pub stamp: String,
    pub hero: HeroValues,
    pub charts: ChartFragments,

    /// `None` when the table is disabled.
    pub table: Option<Vec<TableRow>>,
}

impl RenderContext {
    #[must_use]
    pub fn escaped_title(&self) -> String {
        html_escape(&self.title)
    }

    /// The subtitle, or `fallback` when none is configured, escaped.
    #[must_use]
    pub fn subtitle_or(&self, fallback: &str) -> String {
        html_escape(self.subtitle.as_deref().unwrap_or(fallback))
    }
}
