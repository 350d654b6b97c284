use crate::Result;
use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Timelike, Utc};
use core::fmt::Write;
use ohno::IntoAppError;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Leftmost-first alternation, so `YYYY` is never read as `YY` twice.
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new("YYYY|YY|MM|DD|HH|mm|ss").expect("invalid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Year,
    ShortYear,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Token {
    fn from_text(text: &str) -> Option<Self> {
        match text {
            "YYYY" => Some(Self::Year),
            "YY" => Some(Self::ShortYear),
            "MM" => Some(Self::Month),
            "DD" => Some(Self::Day),
            "HH" => Some(Self::Hour),
            "mm" => Some(Self::Minute),
            "ss" => Some(Self::Second),
            _ => None,
        }
    }

    const fn capture_pattern(self) -> &'static str {
        match self {
            Self::Year => "([0-9]{4})",
            _ => "([0-9]{2})",
        }
    }
}

/// A compiled timestamp format such as `DD.MM.YY.HH.mm.ss`.
///
/// The same codec names new snapshot files and reads instants back out of
/// existing names. Tokens are `YYYY`, `YY` (read as `2000 + YY`), `MM`, `DD`,
/// `HH`, `mm` and `ss`; every other character is a literal. Components a
/// format leaves out default to year 0, January, day 1, 00:00:00.
#[derive(Debug, Clone)]
pub struct TimestampCodec {
    format: String,
    pattern: Regex,
    tokens: Vec<Token>,
    use_local_time: bool,
}

#[derive(Default)]
struct Components {
    year: Option<i32>,
    short_year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
}

impl TimestampCodec {
    /// Compiles `format` into an anchored matcher.
    ///
    /// `use_local_time` selects whether parsed components are local wall-clock
    /// time or UTC, and which clock [`Self::format`] prints.
    pub fn compile(format: &str, use_local_time: bool) -> Result<Self> {
        let mut source = String::from("^");
        let mut tokens = Vec::new();
        let mut last_end = 0;

        for found in TOKEN_REGEX.find_iter(format) {
            let Some(token) = Token::from_text(found.as_str()) else {
                continue;
            };

            source.push_str(&regex::escape(format.get(last_end..found.start()).unwrap_or_default()));
            source.push_str(token.capture_pattern());
            tokens.push(token);
            last_end = found.end();
        }

        source.push_str(&regex::escape(format.get(last_end..).unwrap_or_default()));
        source.push('$');

        let pattern = Regex::new(&source).into_app_err_with(|| format!("compiling timestamp format '{format}'"))?;

        Ok(Self {
            format: format.to_string(),
            pattern,
            tokens,
            use_local_time,
        })
    }

    #[must_use]
    pub fn format_string(&self) -> &str {
        &self.format
    }

    #[must_use]
    pub const fn use_local_time(&self) -> bool {
        self.use_local_time
    }

    /// Parses `text` back into an instant.
    ///
    /// Returns `None` when the text does not match the format, or when the
    /// captured components do not name a real date and time (month 13, a
    /// local time skipped by a daylight-saving change, and so on). When a
    /// token appears more than once, its last occurrence wins. `YYYY` takes
    /// precedence over `YY` regardless of their order.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<DateTime<Utc>> {
        let captures = self.pattern.captures(text)?;
        let components = self.components(&captures)?;

        let year = components.year.or_else(|| components.short_year.map(|yy| 2000 + yy)).unwrap_or(0);
        let date = NaiveDate::from_ymd_opt(year, components.month.unwrap_or(1), components.day.unwrap_or(1))?;
        let naive = date.and_hms_opt(
            components.hour.unwrap_or(0),
            components.minute.unwrap_or(0),
            components.second.unwrap_or(0),
        )?;

        if self.use_local_time {
            Local.from_local_datetime(&naive).earliest().map(|instant| instant.with_timezone(&Utc))
        } else {
            Some(Utc.from_utc_datetime(&naive))
        }
    }

    fn components(&self, captures: &Captures<'_>) -> Option<Components> {
        let mut components = Components::default();

        for (index, token) in self.tokens.iter().enumerate() {
            let digits = captures.get(index + 1)?.as_str();
            let value: u32 = digits.parse().ok()?;

            match token {
                Token::Year => components.year = Some(i32::try_from(value).ok()?),
                Token::ShortYear => components.short_year = Some(i32::try_from(value).ok()?),
                Token::Month => components.month = Some(value),
                Token::Day => components.day = Some(value),
                Token::Hour => components.hour = Some(value),
                Token::Minute => components.minute = Some(value),
                Token::Second => components.second = Some(value),
            }
        }

        Some(components)
    }

    /// Renders `instant` using the format, zero-padding every two-digit token.
    #[must_use]
    pub fn format(&self, instant: DateTime<Utc>) -> String {
        if self.use_local_time {
            self.format_fields(&instant.with_timezone(&Local))
        } else {
            self.format_fields(&instant)
        }
    }

    fn format_fields<T: Datelike + Timelike>(&self, fields: &T) -> String {
        TOKEN_REGEX
            .replace_all(&self.format, |caps: &Captures<'_>| {
                let mut out = String::new();
                let _ = match Token::from_text(&caps[0]) {
                    Some(Token::Year) => write!(out, "{:04}", fields.year()),
                    Some(Token::ShortYear) => write!(out, "{:02}", fields.year().rem_euclid(100)),
                    Some(Token::Month) => write!(out, "{:02}", fields.month()),
                    Some(Token::Day) => write!(out, "{:02}", fields.day()),
                    Some(Token::Hour) => write!(out, "{:02}", fields.hour()),
                    Some(Token::Minute) => write!(out, "{:02}", fields.minute()),
                    Some(Token::Second) => write!(out, "{:02}", fields.second()),
                    None => write!(out, "{}", &caps[0]),
                };
                out
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_default_format_parses() {
        let codec = TimestampCodec::compile("DD.MM.YY.HH.mm.ss", false).unwrap();
        assert_eq!(codec.parse("01.02.25.12.30.00"), Some(utc(2025, 2, 1, 12, 30, 0)));
    }

    #[test]
    fn test_literals_are_escaped() {
        let codec = TimestampCodec::compile("DD.MM.YY", false).unwrap();
        assert_eq!(codec.parse("01x02x25"), None);
        assert_eq!(codec.parse("01.02.25"), Some(utc(2025, 2, 1, 0, 0, 0)));
    }

    #[test]
    fn test_four_digit_year_is_not_split() {
        let codec = TimestampCodec::compile("YYYY-MM-DD", false).unwrap();
        assert_eq!(codec.parse("2024-12-31"), Some(utc(2024, 12, 31, 0, 0, 0)));
        assert_eq!(codec.parse("24-12-31"), None);
    }

    #[test]
    fn test_anchored() {
        let codec = TimestampCodec::compile("YYYYMMDD", false).unwrap();
        assert_eq!(codec.parse("20240101x"), None);
        assert_eq!(codec.parse("x20240101"), None);
    }

    #[test]
    fn test_missing_components_default() {
        let codec = TimestampCodec::compile("HH:mm", false).unwrap();
        assert_eq!(codec.parse("07:45"), Some(utc(0, 1, 1, 7, 45, 0)));
    }

    #[test]
    fn test_no_tokens_matches_only_literal() {
        let codec = TimestampCodec::compile("latest", false).unwrap();
        assert_eq!(codec.parse("latest"), Some(utc(0, 1, 1, 0, 0, 0)));
        assert_eq!(codec.parse("latest2"), None);
    }

    #[test]
    fn test_invalid_components_do_not_match() {
        let codec = TimestampCodec::compile("YYYY-MM-DD", false).unwrap();
        assert_eq!(codec.parse("2024-13-01"), None);
        assert_eq!(codec.parse("2023-02-29"), None);
        assert_eq!(codec.parse("2024-02-29"), Some(utc(2024, 2, 29, 0, 0, 0)));
    }

    #[test]
    fn test_non_ascii_digits_do_not_match() {
        let codec = TimestampCodec::compile("YY", false).unwrap();
        assert_eq!(codec.parse("٢٥"), None);
    }

    #[test]
    fn test_format_pads() {
        let codec = TimestampCodec::compile("DD.MM.YY.HH.mm.ss", false).unwrap();
        assert_eq!(codec.format(utc(2026, 3, 4, 5, 6, 7)), "04.03.26.05.06.07");

        let codec = TimestampCodec::compile("YYYY/MM", false).unwrap();
        assert_eq!(codec.format(utc(2026, 11, 4, 5, 6, 7)), "2026/11");
    }

    #[test]
    fn test_round_trip_to_token_precision() {
        let instant = utc(2031, 7, 19, 23, 59, 58);

        let full = TimestampCodec::compile("YYYY-MM-DDTHH.mm.ss", false).unwrap();
        assert_eq!(full.parse(&full.format(instant)), Some(instant));

        let minutes = TimestampCodec::compile("DD.MM.YY.HH.mm", false).unwrap();
        assert_eq!(minutes.parse(&minutes.format(instant)), Some(utc(2031, 7, 19, 23, 59, 0)));
    }

    #[test]
    fn test_local_round_trip() {
        // Noon avoids daylight-saving gaps in any zone.
        let codec = TimestampCodec::compile("YYYY-MM-DD HH:mm:ss", true).unwrap();
        let instant = Local.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap().with_timezone(&Utc);
        assert_eq!(codec.parse(&codec.format(instant)), Some(instant));
    }

    #[test]
    fn test_repeated_token_last_wins() {
        let codec = TimestampCodec::compile("YYYY-YYYY", false).unwrap();
        assert_eq!(codec.parse("2020-2021"), Some(utc(2021, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_four_digit_year_beats_two_digit_year() {
        let codec = TimestampCodec::compile("YYYY-YY", false).unwrap();
        assert_eq!(codec.parse("2019-24"), Some(utc(2019, 1, 1, 0, 0, 0)));

        let codec = TimestampCodec::compile("YY-YYYY", false).unwrap();
        assert_eq!(codec.parse("24-2019"), Some(utc(2019, 1, 1, 0, 0, 0)));
    }
}
