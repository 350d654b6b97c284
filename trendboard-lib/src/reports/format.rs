use crate::charts::{Num, to_fixed};
use strum::{Display, IntoStaticStr};

/// Text shown for a value that no run recorded.
pub const MISSING: &str = "-";

/// Formats a duration for display: `12.34s`, `3m 4.5s` or `1h 2m`.
#[must_use]
pub fn format_duration(ms: Option<f64>) -> String {
    let Some(ms) = ms.filter(|v| !v.is_nan()) else {
        return MISSING.to_string();
    };

    let total_seconds = ms / 1000.0;
    if total_seconds < 60.0 {
        return format!("{}s", to_fixed(total_seconds, 2));
    }

    let minutes = (total_seconds / 60.0).floor();
    let seconds = total_seconds - minutes * 60.0;
    if minutes < 60.0 {
        return format!("{}m {}s", Num(minutes), to_fixed(seconds, 1));
    }

    let hours = (minutes / 60.0).floor();
    format!("{}h {}m", Num(hours), Num(minutes - hours * 60.0))
}

/// Formats a value with fixed decimals, or [`MISSING`].
#[must_use]
pub fn format_fixed(value: Option<f64>, decimals: usize) -> String {
    value.filter(|v| !v.is_nan()).map_or_else(|| MISSING.to_string(), |v| to_fixed(v, decimals))
}

/// Formats a count with comma thousands separators, e.g. `1,234,567`.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, c) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Which way a metric should move between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Higher,
    Lower,
    Neutral,
}

/// CSS class of a formatted delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum DeltaClass {
    #[strum(serialize = "delta-up")]
    Up,
    #[strum(serialize = "delta-down")]
    Down,
    #[strum(serialize = "delta-flat")]
    Flat,
}

/// A change between runs, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDelta {
    pub text: String,
    pub class: DeltaClass,
}

impl FormattedDelta {
    fn flat(text: &str) -> Self {
        Self {
            text: text.to_string(),
            class: DeltaClass::Flat,
        }
    }
}

/// Formats a delta with an explicit sign and unit.
///
/// A missing delta reads `-` and a zero delta reads `0`; both are flat.
/// Otherwise the class says whether the change moved in `direction`.
#[must_use]
pub fn format_delta(value: Option<f64>, decimals: usize, unit: &str, direction: Direction) -> FormattedDelta {
    let Some(value) = value.filter(|v| !v.is_nan()) else {
        return FormattedDelta::flat(MISSING);
    };

    if value == 0.0 {
        return FormattedDelta::flat("0");
    }

    let sign = if value > 0.0 { '+' } else { '-' };
    let text = format!("{sign}{}{unit}", to_fixed(value.abs(), decimals));

    let class = match direction {
        Direction::Neutral => DeltaClass::Flat,
        Direction::Higher if value > 0.0 => DeltaClass::Up,
        Direction::Lower if value < 0.0 => DeltaClass::Up,
        Direction::Higher | Direction::Lower => DeltaClass::Down,
    };

    FormattedDelta { text, class }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(None), "-");
        assert_eq!(format_duration(Some(f64::NAN)), "-");
        assert_eq!(format_duration(Some(12_340.0)), "12.34s");
        assert_eq!(format_duration(Some(0.0)), "0.00s");
        assert_eq!(format_duration(Some(184_500.0)), "3m 4.5s");
        assert_eq!(format_duration(Some(60_000.0)), "1m 0.0s");
        assert_eq!(format_duration(Some(3_725_000.0)), "1h 2m");
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(Some(75.0), 2), "75.00");
        assert_eq!(format_fixed(None, 2), "-");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(2978), "2,978");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(100_000), "100,000");
    }

    #[test]
    fn test_delta_missing_and_zero_are_flat() {
        assert_eq!(format_delta(None, 2, "%", Direction::Higher), FormattedDelta::flat("-"));
        assert_eq!(format_delta(Some(0.0), 2, "%", Direction::Higher), FormattedDelta::flat("0"));
        assert_eq!(format_delta(Some(-0.0), 2, "s", Direction::Lower), FormattedDelta::flat("0"));
    }

    #[test]
    fn test_delta_direction() {
        let up = format_delta(Some(2.5), 2, "%", Direction::Higher);
        assert_eq!(up.text, "+2.50%");
        assert_eq!(up.class, DeltaClass::Up);

        let down = format_delta(Some(-1.0), 2, "%", Direction::Higher);
        assert_eq!(down.text, "-1.00%");
        assert_eq!(down.class, DeltaClass::Down);

        let faster = format_delta(Some(-0.25), 2, "s", Direction::Lower);
        assert_eq!(faster.text, "-0.25s");
        assert_eq!(faster.class, DeltaClass::Up);

        let slower = format_delta(Some(0.25), 2, "s", Direction::Lower);
        assert_eq!(slower.class, DeltaClass::Down);
    }

    #[test]
    fn test_delta_neutral() {
        let delta = format_delta(Some(120.0), 0, "", Direction::Neutral);
        assert_eq!(delta.text, "+120");
        assert_eq!(delta.class, DeltaClass::Flat);
        assert_eq!(delta.class.to_string(), "delta-flat");
    }
}
