//! # Value Projector
//!
//! Turns a [`Value`] into a plain `serde_json::Value` by replacing every
//! special value with its canonical string and recursing through arrays and
//! objects. Object keys are never touched.
//!
//! ## Projection rules
//!
//! Evaluated in this order, with the fallback last:
//!
//! 1. JSON-native scalars pass through unchanged.
//! 2. Arrays and objects are projected element by element, keeping order.
//! 3. Offset-aware timestamps render as `YYYY-MM-DDTHH:MM:SS[.ffffff]±HH:MM`.
//!    The real offset is written, `+00:00` included; nothing is normalized
//!    to UTC.
//! 4. Naive timestamps render as `YYYY-MM-DDTHH:MM:SS[.ffffff]` with no
//!    suffix.
//! 5. Dates render as `YYYY-MM-DD`.
//! 6. Decimals render as exact base-10 text with no exponent.
//! 7. Object identifiers render as their 24 hex characters.
//! 8. Anything else goes to the fallback hook; with no hook, or when the
//!    hook declines, projection fails with
//!    [`SerializationError::Unsupported`].
//!
//! Fractional seconds are written with six digits and omitted when zero.
//! Precision below one microsecond is truncated.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use serde_json::Value as JsonValue;

use crate::error::SerializationError;
use crate::value::Value;

/// Hook consulted for values with no built-in projection. Returning `None`
/// declines the value.
pub type Fallback = fn(&Value) -> Option<JsonValue>;

/// Recursive projector from [`Value`] to plain JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct Projector {
    fallback: Option<Fallback>,
}

impl Projector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fallback for values the built-in rules do not cover.
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Project `value` into plain JSON.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError::Unsupported` naming the first value
    /// that neither a rule nor the fallback could represent.
    pub fn project(&self, value: &Value) -> Result<JsonValue, SerializationError> {
        let projected = match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => JsonValue::Number(n.clone()),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Array(items) => JsonValue::Array(
                items.iter().map(|item| self.project(item)).collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (key, item) in map {
                    out.insert(key.clone(), self.project(item)?);
                }
                JsonValue::Object(out)
            }
            Value::DateTimeTz(dt) => JsonValue::String(format_datetime_tz(dt)),
            Value::DateTime(dt) => JsonValue::String(format_datetime(dt)),
            Value::Date(d) => JsonValue::String(format_date(d)),
            Value::Decimal(d) => JsonValue::String(d.to_string()),
            Value::ObjectId(id) => JsonValue::String(id.to_hex()),
            other => return self.fall_back(other),
        };
        Ok(projected)
    }

    fn fall_back(&self, value: &Value) -> Result<JsonValue, SerializationError> {
        let unsupported = || SerializationError::Unsupported {
            type_name: value.type_name(),
        };
        let fallback = self.fallback.ok_or_else(unsupported)?;
        tracing::debug!(type_name = value.type_name(), "projecting value through fallback");
        fallback(value).ok_or_else(unsupported)
    }
}

/// Render a date as `YYYY-MM-DD`.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Render a naive timestamp as `YYYY-MM-DDTHH:MM:SS[.ffffff]`.
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    let mut out = dt.format("%Y-%m-%dT%H:%M:%S").to_string();
    // Leap seconds carry an extra second in the nanosecond field.
    let micros = (dt.nanosecond() % 1_000_000_000) / 1_000;
    if micros != 0 {
        let _ = write!(out, ".{micros:06}");
    }
    out
}

/// Render an offset-aware timestamp with its own offset, e.g. `+05:30`.
pub fn format_datetime_tz(dt: &DateTime<FixedOffset>) -> String {
    let mut out = format_datetime(&dt.naive_local());
    let offset = dt.offset().local_minus_utc();
    let sign = if offset < 0 { '-' } else { '+' };
    let secs = offset.unsigned_abs();
    let _ = write!(out, "{sign}{:02}:{:02}", secs / 3600, (secs % 3600) / 60);
    if secs % 60 != 0 {
        let _ = write!(out, ":{:02}", secs % 60);
    }
    out
}
