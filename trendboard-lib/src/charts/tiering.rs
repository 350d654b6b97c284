use strum::{Display, EnumString};

const LOG_TARGET: &str = "    charts";

/// Axis maxima for code line counts.
pub const CODE_LINES_TIERS: [f64; 10] = [
    2_000.0,
    5_000.0,
    10_000.0,
    25_000.0,
    50_000.0,
    100_000.0,
    250_000.0,
    500_000.0,
    1_000_000.0,
    2_000_000.0,
];

/// Axis maxima for durations shown in milliseconds.
pub const DURATION_MS_TIERS: [f64; 6] = [100.0, 250.0, 500.0, 1_000.0, 2_000.0, 3_000.0];

/// Axis maxima for durations shown in seconds.
pub const DURATION_S_TIERS: [f64; 8] = [5.0, 10.0, 20.0, 30.0, 60.0, 120.0, 300.0, 600.0];

/// Longest observed duration still plotted in milliseconds.
pub const DURATION_MS_THRESHOLD: f64 = 3_000.0;

/// Code lines axis maximum when there is nothing to tier.
pub const CODE_LINES_FALLBACK_MAX: f64 = 50_000.0;

/// Duration axis maximum, in seconds, when there is nothing to tier.
pub const DURATION_FALLBACK_MAX: f64 = 10.0;

/// Picks the smallest ladder value at or above `value`.
///
/// Values beyond the ladder get its last rung. Returns `None` for a missing
/// or non-finite value, or an empty ladder.
#[must_use]
pub fn tier(value: Option<f64>, ladder: &[f64]) -> Option<f64> {
    let value = value.filter(|v| v.is_finite())?;
    ladder.iter().copied().find(|&rung| value <= rung).or_else(|| ladder.last().copied())
}

/// Unit of the duration axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum DurationUnit {
    #[strum(serialize = "ms")]
    Milliseconds,
    #[strum(serialize = "s")]
    Seconds,
}

impl DurationUnit {
    /// Converts a millisecond duration into this unit.
    #[must_use]
    pub fn from_ms(self, ms: f64) -> f64 {
        match self {
            Self::Milliseconds => ms,
            Self::Seconds => ms / 1000.0,
        }
    }
}

/// Unit and upper bound of the duration axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationAxis {
    pub unit: DurationUnit,
    pub max: f64,
}

/// Chooses the duration axis for runs whose longest duration is `observed_max_ms`.
///
/// A pinned maximum is taken as seconds and disables tiering. Otherwise short
/// runs are plotted in milliseconds on the ms ladder, and longer ones in
/// seconds on the seconds ladder.
#[must_use]
pub fn duration_axis(observed_max_ms: Option<f64>, pinned_max: Option<f64>) -> DurationAxis {
    if let Some(max) = pinned_max {
        return DurationAxis {
            unit: DurationUnit::Seconds,
            max,
        };
    }

    let Some(observed) = observed_max_ms.filter(|v| v.is_finite()) else {
        return DurationAxis {
            unit: DurationUnit::Seconds,
            max: DURATION_FALLBACK_MAX,
        };
    };

    let (unit, ladder) = if observed < DURATION_MS_THRESHOLD {
        (DurationUnit::Milliseconds, DURATION_MS_TIERS.as_slice())
    } else {
        (DurationUnit::Seconds, DURATION_S_TIERS.as_slice())
    };

    let max = tier(Some(unit.from_ms(observed)), ladder).unwrap_or(DURATION_FALLBACK_MAX);
    log::debug!(target: LOG_TARGET, "Duration axis for {observed} ms: 0..{max} {unit}");

    DurationAxis { unit, max }
}

/// Chooses the code lines axis maximum for a largest observed count.
#[must_use]
pub fn code_lines_axis_max(observed_max: Option<f64>, pinned_max: Option<f64>) -> f64 {
    if let Some(max) = pinned_max {
        return max;
    }

    let max = tier(observed_max, &CODE_LINES_TIERS).unwrap_or(CODE_LINES_FALLBACK_MAX);
    log::debug!(target: LOG_TARGET, "Code lines axis for {observed_max:?}: 0..{max}");
    max
}
