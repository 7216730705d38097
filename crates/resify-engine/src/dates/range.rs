use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::layout::DateLayout;
use crate::scalar;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("field undefined")]
    Undefined,
    #[error("{0:?} does not match any supported date layout")]
    NoMatchingLayout(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("date range has neither a from nor a to date")]
    Empty,
    #[error("cannot parse either from or to date (from: {from}; to: {to})")]
    Unparseable {
        from: EndpointError,
        to: EndpointError,
    },
}

/// A point in time together with the layout it was written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moment {
    at: NaiveDateTime,
    zone: Option<String>,
    layout: DateLayout,
}

impl Moment {
    /// Creates a moment at `layout` precision; `at` is truncated to match.
    /// Zoned layouts are given `UTC`.
    pub fn new(at: NaiveDateTime, layout: DateLayout) -> Self {
        Self {
            at: layout.truncate(&at),
            zone: layout.has_zone().then(|| "UTC".to_string()),
            layout,
        }
    }

    pub fn from_date(date: NaiveDate, layout: DateLayout) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::default()), layout)
    }

    /// Tries every [`DateLayout`] in order and keeps the first that fits.
    pub fn parse(s: &str) -> Result<Self, EndpointError> {
        if s.is_empty() {
            return Err(EndpointError::Undefined);
        }

        DateLayout::ALL
            .iter()
            .find_map(|&layout| {
                layout
                    .parse(s)
                    .map(|(at, zone)| Self { at, zone, layout })
            })
            .ok_or_else(|| EndpointError::NoMatchingLayout(s.to_string()))
    }

    /// Zone abbreviation as written, for zoned layouts.
    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    pub fn layout(&self) -> DateLayout {
        self.layout
    }

    pub fn format(&self) -> String {
        self.layout.format(&self.at, self.zone.as_deref())
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// A span of time, open at either end.
///
/// Each end remembers its own layout, so `2010-08` to `2015-12-31` is
/// written back exactly as read. `DateRange::default()` is the deliberately
/// empty range, used when a record has no dates at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<Moment>,
    to: Option<Moment>,
}

impl DateRange {
    /// Parses both ends of a range. An empty string leaves that end open.
    ///
    /// Fails with [`DateError::Empty`] when both strings are empty, and with
    /// [`DateError::Unparseable`] when neither end yields a date. When only
    /// one end parses, the other is left open and a warning is logged.
    pub fn parse(from: &str, to: &str) -> Result<Self, DateError> {
        match (Moment::parse(from), Moment::parse(to)) {
            (Err(EndpointError::Undefined), Err(EndpointError::Undefined)) => Err(DateError::Empty),
            (Err(from), Err(to)) => Err(DateError::Unparseable { from, to }),
            (from, to) => Ok(Self {
                from: settle("from", from),
                to: settle("to", to),
            }),
        }
    }

    pub fn from(&self) -> Option<&Moment> {
        self.from.as_ref()
    }

    pub fn to(&self) -> Option<&Moment> {
        self.to.as_ref()
    }

    pub fn is_open_ended(&self) -> bool {
        self.from.is_some() && self.to.is_none()
    }

    pub fn is_unset(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Both ends in their original layouts; open ends are empty strings.
    pub fn format(&self) -> (String, String) {
        (
            self.from.as_ref().map(Moment::format).unwrap_or_default(),
            self.to.as_ref().map(Moment::format).unwrap_or_default(),
        )
    }
}

fn settle(end: &str, parsed: Result<Moment, EndpointError>) -> Option<Moment> {
    match parsed {
        Ok(moment) => Some(moment),
        Err(EndpointError::Undefined) => None,
        Err(err) => {
            log::warn!("ignoring {end} date: {err}");
            None
        }
    }
}

#[derive(Serialize)]
struct DateRangeOut {
    #[serde(skip_serializing_if = "String::is_empty")]
    from: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    to: String,
}

/// A bare year such as `from: 2012` is a YAML integer, hence [`scalar::text`].
#[derive(Deserialize)]
struct DateRangeIn {
    #[serde(default, deserialize_with = "scalar::text")]
    from: String,
    #[serde(default, deserialize_with = "scalar::text")]
    to: String,
}

impl Serialize for DateRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (from, to) = self.format();
        DateRangeOut { from, to }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Some(raw) = Option::<DateRangeIn>::deserialize(deserializer)? else {
            return Ok(Self::default());
        };
        DateRange::parse(&raw.from, &raw.to).map_err(de::Error::custom)
    }
}
