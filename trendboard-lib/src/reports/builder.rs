use super::context::{ChartFragments, HeroValues, RenderContext, TableRow, TableValue, TestCounts};
use super::format::{Direction, format_delta};
use super::layout::Layout;
use super::settings::{ClocChartSettings, CoverageChartSettings, PassRateDurationSettings, ReportSettings, TestCategoriesSettings};
use super::theme::{ThemeRegistry, resolve_tokens};
use crate::Result;
use crate::charts::tiering::{code_lines_axis_max, duration_axis};
use crate::charts::{BarChart, BarItem, ChartGeometry, DualAxisChart, LineChart, NamedSeries, max_value};
use crate::history::{Latest, MetricsHistory, resolve_latest, short_date};
use crate::snapshot::{CoverageKind, SnapshotRecord};
use chrono::{DateTime, Utc};
use ohno::app_err;

const LOG_TARGET: &str = "   reports";

/// Card shown instead of the code lines chart when no run counted code lines.
pub const CLOC_MISSING_CARD: &str = r#"<div class="card"><div class="chart-title">Code lines</div><div class="empty">Install <code>cloc</code> to enable code lines metrics (https://github.com/AlDanial/cloc).</div></div>"#;

const TOTAL_CODE_SERIES: &str = "Total code";
const PASS_RATE_SERIES: &str = "Pass rate (%)";

const TABLE_COVERAGE_ROWS: [(CoverageKind, &str); 4] = [
    (CoverageKind::Lines, "Coverage (Lines%)"),
    (CoverageKind::Functions, "Coverage (Funcs%)"),
    (CoverageKind::Branches, "Coverage (Branch%)"),
    (CoverageKind::Statements, "Coverage (Stmts%)"),
];

/// Renders the complete HTML report.
///
/// The output depends only on the arguments, so two builds over the same
/// inputs with the same `now` are byte-identical.
///
/// # Errors
///
/// Fails when the configured layout or theme cannot be resolved.
pub fn render_report(
    settings: &ReportSettings,
    history: &MetricsHistory,
    current: Option<&SnapshotRecord>,
    now: DateTime<Utc>,
) -> Result<String> {
    let layout = Layout::resolve(&settings.layout).map_err(|e| app_err!("{e}"))?;
    let registry = ThemeRegistry::new(&settings.themes).map_err(|e| app_err!("{e}"))?;
    let theme = registry.resolve(&settings.theme).map_err(|e| app_err!("{e}"))?;
    let tokens = resolve_tokens(layout.default_tokens(), theme, &settings.theme_tokens);

    log::debug!(
        target: LOG_TARGET,
        "Rendering {} history point(s) with layout '{layout}' and theme '{}'",
        history.len(),
        settings.theme
    );

    let ctx = build_context(settings, history, current, now);
    Ok(layout.render(&ctx, &tokens))
}

/// Derives everything the layouts display: chart fragments, headline values and table rows.
#[must_use]
pub fn build_context(
    settings: &ReportSettings,
    history: &MetricsHistory,
    current: Option<&SnapshotRecord>,
    now: DateTime<Utc>,
) -> RenderContext {
    let stamp = short_date(now, settings.use_local_time);
    let charts = &settings.charts;
    let geometry = &settings.chart;

    let mut fragments = ChartFragments::default();
    if charts.cloc.enabled {
        match cloc_chart(&charts.cloc, history, geometry) {
            Some(chart) => fragments.cloc = Some(chart),
            None => fragments.cloc_missing = Some(CLOC_MISSING_CARD.to_string()),
        }
    }
    if charts.coverage.enabled {
        fragments.coverage = Some(coverage_chart(&charts.coverage, history, geometry));
    }
    if charts.pass_rate_duration.enabled {
        fragments.pass_rate_duration = Some(pass_rate_duration_chart(&charts.pass_rate_duration, history, geometry));
    }
    if charts.test_categories.enabled {
        fragments.test_categories = Some(test_categories_chart(&charts.test_categories, history, current, geometry));
    }

    RenderContext {
        title: settings.title.clone(),
        subtitle: settings.subtitle.as_ref().map(|subtitle| subtitle.replace("{date}", &stamp)),
        hero: hero_values(history, current),
        charts: fragments,
        table: settings.table.enabled.then(|| table_rows(settings, history, current)),
        stamp,
    }
}

#[expect(clippy::cast_precision_loss, reason = "line counts stay far below 2^52")]
const fn count(value: u64) -> f64 {
    value as f64
}

/// The code lines chart, or `None` when no run recorded a count.
fn cloc_chart(settings: &ClocChartSettings, history: &MetricsHistory, geometry: &ChartGeometry) -> Option<String> {
    let mut series = Vec::with_capacity(settings.buckets.len() + 1);

    if settings.show_total {
        series.push(NamedSeries::new(
            TOTAL_CODE_SERIES,
            &settings.total_color,
            history.series(|record| record.code_lines_total().map(count)),
        ));
    }

    for bucket in &settings.buckets {
        series.push(NamedSeries::new(
            &bucket.name,
            &bucket.color,
            history.series(|record| record.code_lines_bucket(&bucket.key).map(count)),
        ));
    }

    let observed = max_value(&series)?;
    let chart = LineChart {
        title: settings.title.clone(),
        series,
        y_min: settings.y_min,
        y_max: Some(code_lines_axis_max(Some(observed), settings.y_max)),
    };

    Some(chart.render(geometry))
}

fn coverage_chart(settings: &CoverageChartSettings, history: &MetricsHistory, geometry: &ChartGeometry) -> String {
    let metric = settings.metric;
    let chart = LineChart {
        title: settings.title.clone(),
        series: vec![NamedSeries::new(
            format!("{metric}%"),
            &settings.color,
            history.series(|record| record.coverage_pct(metric)),
        )],
        y_min: settings.y_min,
        y_max: settings.y_max,
    };

    chart.render(geometry)
}

fn pass_rate_duration_chart(settings: &PassRateDurationSettings, history: &MetricsHistory, geometry: &ChartGeometry) -> String {
    let axis = duration_axis(history.max_of(SnapshotRecord::duration_ms), settings.y_right_max);

    let chart = DualAxisChart {
        title: settings.title.clone(),
        left: vec![NamedSeries::new(
            PASS_RATE_SERIES,
            &settings.pass_rate_color,
            history.series(SnapshotRecord::pass_rate),
        )],
        right: vec![NamedSeries::new(
            format!("Duration ({})", axis.unit),
            &settings.duration_color,
            history.series(|record| record.duration_ms().map(|ms| axis.unit.from_ms(ms))),
        )],
        y_left_min: settings.y_left_min,
        y_left_max: settings.y_left_max,
        y_right_min: settings.y_right_min,
        y_right_max: Some(axis.max),
    };

    chart.render(geometry)
}

fn test_categories_chart(
    settings: &TestCategoriesSettings,
    history: &MetricsHistory,
    current: Option<&SnapshotRecord>,
    geometry: &ChartGeometry,
) -> String {
    let categories = resolve_latest(current, history, |record| {
        (!record.test_categories.is_empty()).then(|| record.test_categories.clone())
    })
    .map(|latest| latest.value)
    .unwrap_or_default();

    let chart = BarChart {
        title: settings.title.clone(),
        items: categories
            .iter()
            .map(|category| BarItem::new(&category.name, category.metric(settings.metric), &settings.color))
            .collect(),
        y_max: settings.y_max,
        unit: settings.metric.unit(),
    };

    chart.render(geometry)
}

fn hero_values(history: &MetricsHistory, current: Option<&SnapshotRecord>) -> HeroValues {
    let coverage = |record: &SnapshotRecord| record.coverage_pct(CoverageKind::Lines);
    let code_lines = |record: &SnapshotRecord| record.code_lines_total().map(count);

    HeroValues {
        coverage: resolve_latest(current, history, coverage).map(|latest| latest.value),
        pass_rate: resolve_latest(current, history, SnapshotRecord::pass_rate).map(|latest| latest.value),
        duration_ms: resolve_latest(current, history, SnapshotRecord::duration_ms).map(|latest| latest.value),
        code_lines: resolve_latest(current, history, SnapshotRecord::code_lines_total).map(|latest| latest.value),
        coverage_delta: format_delta(history.delta(coverage), 2, "%", Direction::Higher),
        pass_rate_delta: format_delta(history.delta(SnapshotRecord::pass_rate), 2, "%", Direction::Higher),
        duration_delta: format_delta(
            history.delta(SnapshotRecord::duration_ms).map(|ms| ms / 1000.0),
            2,
            "s",
            Direction::Lower,
        ),
        code_lines_delta: format_delta(history.delta(code_lines), 0, "", Direction::Neutral),
    }
}

fn table_rows(settings: &ReportSettings, history: &MetricsHistory, current: Option<&SnapshotRecord>) -> Vec<TableRow> {
    let table = settings.table;
    let local = settings.use_local_time;
    let mut rows = Vec::new();

    if table.show_cloc {
        let latest = resolve_latest(current, history, |record| record.code_lines.clone());
        let when = recorded(latest.as_ref(), local);
        let lines = latest.map(|latest| latest.value);

        rows.push(TableRow {
            label: "Total code lines".to_string(),
            value: TableValue::Count(lines.as_ref().and_then(|lines| lines.total())),
            recorded: when.clone(),
        });

        for bucket in &settings.charts.cloc.buckets {
            rows.push(TableRow {
                label: format!("{} lines", bucket.name),
                value: TableValue::Count(lines.as_ref().and_then(|lines| lines.bucket(&bucket.key))),
                recorded: when.clone(),
            });
        }
    }

    if table.show_coverage {
        let latest = resolve_latest(current, history, |record| record.coverage.clone());
        let when = recorded(latest.as_ref(), local);
        let coverage = latest.map(|latest| latest.value);

        for (kind, label) in TABLE_COVERAGE_ROWS {
            rows.push(TableRow {
                label: label.to_string(),
                value: TableValue::Percent(coverage.as_ref().and_then(|coverage| coverage.pct(kind))),
                recorded: when.clone(),
            });
        }
    }

    if table.show_tests {
        let latest = resolve_latest(current, history, |record| record.test_summary.clone());
        let when = recorded(latest.as_ref(), local);
        let summary = latest.map(|latest| latest.value);

        rows.push(TableRow {
            label: "Tests pass rate".to_string(),
            value: TableValue::Percent(summary.as_ref().map(|summary| summary.pass_rate)),
            recorded: when.clone(),
        });
        rows.push(TableRow {
            label: "Tests duration".to_string(),
            value: TableValue::Duration(summary.as_ref().and_then(|summary| summary.duration_ms)),
            recorded: when.clone(),
        });
        rows.push(TableRow {
            label: "Tests total (passed/failed/skipped)".to_string(),
            value: TableValue::Tests(summary.as_ref().map(|summary| TestCounts {
                total: summary.total,
                passed: summary.passed,
                failed: summary.failed,
                skipped: summary.skipped,
            })),
            recorded: when,
        });
    }

    rows
}

fn recorded<T>(latest: Option<&Latest<T>>, use_local_time: bool) -> Option<String> {
    latest
        .and_then(|latest| latest.instant)
        .map(|instant| short_date(instant, use_local_time))
}
