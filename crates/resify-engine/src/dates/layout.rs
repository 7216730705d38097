use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// The precision a date was written at.
///
/// A date keeps the layout it was parsed with so that it is written back at
/// the same precision: `2012` stays `2012` rather than becoming
/// `2012-01-01 00:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateLayout {
    /// `2006-01-02 15:04:05 MST`
    SecondsZone,
    /// `2006-01-02 15:04:05`
    Seconds,
    /// `2006-01-02 15:04 MST`
    MinutesZone,
    /// `2006-01-02 15:04`
    Minutes,
    /// `2006-01-02`
    Date,
    /// `2006-01`
    YearMonth,
    /// `2006`
    Year,
}

impl DateLayout {
    /// Every layout, most specific first. Parsing takes the first match.
    pub const ALL: [DateLayout; 7] = [
        DateLayout::SecondsZone,
        DateLayout::Seconds,
        DateLayout::MinutesZone,
        DateLayout::Minutes,
        DateLayout::Date,
        DateLayout::YearMonth,
        DateLayout::Year,
    ];

    fn pattern(self) -> &'static str {
        match self {
            DateLayout::SecondsZone | DateLayout::Seconds => "%Y-%m-%d %H:%M:%S",
            DateLayout::MinutesZone | DateLayout::Minutes => "%Y-%m-%d %H:%M",
            DateLayout::Date => "%Y-%m-%d",
            DateLayout::YearMonth => "%Y-%m",
            DateLayout::Year => "%Y",
        }
    }

    pub fn has_zone(self) -> bool {
        matches!(self, DateLayout::SecondsZone | DateLayout::MinutesZone)
    }

    /// Parses `s` if it is written exactly in this layout.
    ///
    /// Anything that would not format back to `s` is rejected, so `2010-8`
    /// or `2012-01-01T00:00` never match.
    pub fn parse(self, s: &str) -> Option<(NaiveDateTime, Option<String>)> {
        let (naive, zone) = if self.has_zone() {
            let (naive, zone) = s.rsplit_once(' ')?;
            if !is_zone_abbreviation(zone) {
                return None;
            }
            (naive, Some(zone))
        } else {
            (s, None)
        };

        let at = match self {
            DateLayout::SecondsZone
            | DateLayout::Seconds
            | DateLayout::MinutesZone
            | DateLayout::Minutes => NaiveDateTime::parse_from_str(naive, self.pattern()).ok()?,
            DateLayout::Date => start_of_day(NaiveDate::parse_from_str(naive, "%Y-%m-%d").ok()?)?,
            DateLayout::YearMonth => {
                start_of_day(NaiveDate::parse_from_str(&format!("{naive}-01"), "%Y-%m-%d").ok()?)?
            }
            DateLayout::Year => {
                start_of_day(NaiveDate::parse_from_str(&format!("{naive}-01-01"), "%Y-%m-%d").ok()?)?
            }
        };

        (self.format(&at, zone) == s).then(|| (at, zone.map(str::to_string)))
    }

    pub fn format(self, at: &NaiveDateTime, zone: Option<&str>) -> String {
        let formatted = at.format(self.pattern()).to_string();
        match zone {
            Some(zone) if self.has_zone() => format!("{formatted} {zone}"),
            _ => formatted,
        }
    }

    /// Truncates `at` to the precision of this layout.
    pub fn truncate(self, at: &NaiveDateTime) -> NaiveDateTime {
        let date = at.date();
        let truncated = match self {
            DateLayout::SecondsZone | DateLayout::Seconds => at.with_nanosecond(0),
            DateLayout::MinutesZone | DateLayout::Minutes => {
                date.and_hms_opt(at.hour(), at.minute(), 0)
            }
            DateLayout::Date => date.and_hms_opt(0, 0, 0),
            DateLayout::YearMonth => date.with_day(1).and_then(|d| d.and_hms_opt(0, 0, 0)),
            DateLayout::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
        };
        truncated.unwrap_or(*at)
    }
}

impl fmt::Display for DateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = match self {
            DateLayout::SecondsZone => "YYYY-MM-DD hh:mm:ss ZONE",
            DateLayout::Seconds => "YYYY-MM-DD hh:mm:ss",
            DateLayout::MinutesZone => "YYYY-MM-DD hh:mm ZONE",
            DateLayout::Minutes => "YYYY-MM-DD hh:mm",
            DateLayout::Date => "YYYY-MM-DD",
            DateLayout::YearMonth => "YYYY-MM",
            DateLayout::Year => "YYYY",
        };
        f.write_str(layout)
    }
}

fn start_of_day(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)
}

/// Zone abbreviations such as `UTC`, `PST` or `AEST`.
fn is_zone_abbreviation(s: &str) -> bool {
    (3..=5).contains(&s.len()) && s.chars().all(|c| c.is_ascii_uppercase())
}
