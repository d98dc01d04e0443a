//! # Pattern Recognizer
//!
//! Recovers dates and timestamps from strings produced by the projector.
//!
//! Recognition is a two-step filter: an anchored, precompiled pattern decides
//! whether a string has the right shape, then the captured fields are range
//! checked while building the chrono value. A string failing either step is
//! left alone. Recovery is best-effort and never returns an error.
//!
//! ## Grammar
//!
//! - Date: `YYYY-MM-DD`, optionally followed by `Z`.
//! - Timestamp: `YYYY-MM-DDTHH:MM:SS`, optional `.f` to `.ffffff`, optional
//!   suffix `Z` or `±HH:MM[:SS]`.
//!
//! Only ASCII digits match. A missing suffix or a bare `Z` yields a naive
//! timestamp; a numeric offset yields an offset-aware one.

use std::sync::OnceLock;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::value::Value;

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})Z?$").expect("date pattern is valid")
    })
}

fn datetime_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^([0-9]{4})-([0-9]{2})-([0-9]{2})",
            r"T([0-9]{2}):([0-9]{2}):([0-9]{2})",
            r"(?:\.([0-9]{1,6}))?",
            r"(Z|[+-][0-9]{2}:[0-9]{2}(?::[0-9]{2})?)?$",
        ))
        .expect("timestamp pattern is valid")
    })
}

/// Which kind of value to try first when both are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    /// Timestamps first; the timestamp grammar is the more specific one.
    #[default]
    DateTime,
    Date,
}

/// Configured recognizer for date and timestamp strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recognizer {
    pub parse_date: bool,
    pub parse_datetime: bool,
    pub prefer: Preference,
}

impl Default for Recognizer {
    fn default() -> Self {
        Self {
            parse_date: true,
            parse_datetime: true,
            prefer: Preference::DateTime,
        }
    }
}

impl Recognizer {
    pub fn new(parse_date: bool, parse_datetime: bool) -> Self {
        Self {
            parse_date,
            parse_datetime,
            prefer: Preference::default(),
        }
    }

    pub fn with_preference(mut self, prefer: Preference) -> Self {
        self.prefer = prefer;
        self
    }

    /// True when at least one kind of recovery is enabled.
    pub fn is_enabled(&self) -> bool {
        self.parse_date || self.parse_datetime
    }

    /// Try to recover a date or timestamp from `s`.
    ///
    /// Returns `None` when recovery is disabled for the matching kind, when
    /// no pattern matches, or when the fields are out of range.
    pub fn recognize(&self, s: &str) -> Option<Value> {
        match self.prefer {
            Preference::DateTime => self.try_datetime(s).or_else(|| self.try_date(s)),
            Preference::Date => self.try_date(s).or_else(|| self.try_datetime(s)),
        }
    }

    fn try_date(&self, s: &str) -> Option<Value> {
        if !self.parse_date {
            return None;
        }
        parse_date(s).map(Value::Date)
    }

    fn try_datetime(&self, s: &str) -> Option<Value> {
        if !self.parse_datetime {
            return None;
        }
        parse_datetime(s)
    }
}

/// Recover a calendar date, or `None` on a miss.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let caps = date_regex().captures(s)?;
    let date = build_date(&caps);
    if date.is_none() {
        tracing::trace!(input = s, "date pattern matched but fields are out of range");
    }
    date
}

/// Recover a naive or offset-aware timestamp, or `None` on a miss.
pub fn parse_datetime(s: &str) -> Option<Value> {
    let caps = datetime_regex().captures(s)?;
    let value = build_datetime(&caps);
    if value.is_none() {
        tracing::trace!(input = s, "timestamp pattern matched but fields are out of range");
    }
    value
}

fn field(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

fn build_date(caps: &Captures<'_>) -> Option<NaiveDate> {
    let year = i32::try_from(field(caps, 1)?).ok()?;
    NaiveDate::from_ymd_opt(year, field(caps, 2)?, field(caps, 3)?)
}

fn build_datetime(caps: &Captures<'_>) -> Option<Value> {
    let date = build_date(caps)?;
    let micros = match caps.get(7) {
        Some(m) => fraction_to_micros(m.as_str())?,
        None => 0,
    };
    let time = NaiveTime::from_hms_micro_opt(field(caps, 4)?, field(caps, 5)?, field(caps, 6)?, micros)?;
    let naive = NaiveDateTime::new(date, time);

    match caps.get(8).map(|m| m.as_str()) {
        None | Some("Z") => Some(Value::DateTime(naive)),
        Some(suffix) => {
            let offset = parse_offset(suffix)?;
            let aware = offset.from_local_datetime(&naive).single()?;
            Some(Value::DateTimeTz(aware))
        }
    }
}

/// `"5"` is half a second: pad the fraction to six digits before parsing.
fn fraction_to_micros(digits: &str) -> Option<u32> {
    let scale = 10u32.pow(6 - digits.len() as u32);
    Some(digits.parse::<u32>().ok()? * scale)
}

/// Parse `±HH:MM[:SS]` into a fixed offset.
fn parse_offset(suffix: &str) -> Option<FixedOffset> {
    let (sign, rest) = match suffix.as_bytes().first()? {
        b'+' => (1, &suffix[1..]),
        b'-' => (-1, &suffix[1..]),
        _ => return None,
    };
    let mut parts = rest.split(':').map(|p| p.parse::<i32>().ok());
    let hours = parts.next()??;
    let minutes = parts.next()??;
    let seconds = parts.next().unwrap_or(Some(0))?;
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60 + seconds))
}
