//! # Text Codec — `dumps` and `loads`
//!
//! `dumps` projects a [`Value`] and serializes the result with `serde_json`;
//! `loads` parses with `serde_json` and, unless disabled, recovers dates and
//! timestamps from string values.
//!
//! ## Debug output
//!
//! Debug mode fills in `indent`, `sort_keys = true` and
//! `ensure_ascii = false` wherever the caller left them unset. It is in
//! effect when the per-call `debug` option says so; without a per-call
//! choice the codec's configuration decides.
//!
//! ## Defaults
//!
//! Without debug, output keeps insertion order, has no indentation and
//! escapes non-ASCII characters, so consumers unaware of this crate see
//! ordinary JSON with special values as plain strings.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::config::CodecConfig;
use crate::error::{AsjsonError, ConfigError, ParseError, SerializationError};
use crate::format::DumpFormatter;
use crate::project::{Fallback, Projector};
use crate::recognize::Recognizer;
use crate::value::Value;

/// Formatting options for `dumps`. Unset fields take their defaults, or the
/// debug values when debug output is in effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpOptions {
    pub debug: Option<bool>,
    pub indent: Option<usize>,
    pub sort_keys: Option<bool>,
    pub ensure_ascii: Option<bool>,
    pub separators: Option<(String, String)>,
}

impl DumpOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }

    pub fn sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = Some(sort_keys);
        self
    }

    pub fn ensure_ascii(mut self, ensure_ascii: bool) -> Self {
        self.ensure_ascii = Some(ensure_ascii);
        self
    }

    pub fn separators(mut self, item: &str, key: &str) -> Self {
        self.separators = Some((item.to_string(), key.to_string()));
        self
    }
}

/// Recovery options for `loads`. `None` defers to the codec configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub parse_date: Option<bool>,
    pub parse_datetime: Option<bool>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_date(mut self, parse_date: bool) -> Self {
        self.parse_date = Some(parse_date);
        self
    }

    pub fn parse_datetime(mut self, parse_datetime: bool) -> Self {
        self.parse_datetime = Some(parse_datetime);
        self
    }

    /// Plain JSON semantics: recover nothing.
    pub fn plain() -> Self {
        Self::new().parse_date(false).parse_datetime(false)
    }
}

/// Fully resolved formatting, after debug defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Resolved {
    indent: Option<usize>,
    sort_keys: bool,
    ensure_ascii: bool,
}

/// JSON codec with support for dates, timestamps, decimals, and identifiers.
#[derive(Debug, Clone)]
pub struct Codec {
    config: CodecConfig,
    projector: Projector,
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            config: CodecConfig::default(),
            projector: Projector::new(),
        }
    }
}

impl Codec {
    /// Build a codec from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidIndent` if `debug_indent` exceeds
    /// [`MAX_INDENT`](crate::config::MAX_INDENT).
    pub fn new(config: CodecConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            projector: Projector::new(),
        })
    }

    /// Install a fallback for values with no built-in projection.
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.projector = self.projector.with_fallback(fallback);
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Project `value` to plain JSON without producing text.
    pub fn encode(&self, value: &Value) -> Result<JsonValue, AsjsonError> {
        Ok(self.projector.project(value)?)
    }

    /// Serialize `value` to JSON text with default options.
    pub fn dumps(&self, value: &Value) -> Result<String, AsjsonError> {
        self.dumps_with(value, &DumpOptions::default())
    }

    /// Serialize `value` to JSON text.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError::Unsupported` if the value contains
    /// something with no JSON projection.
    pub fn dumps_with(&self, value: &Value, options: &DumpOptions) -> Result<String, AsjsonError> {
        let projected = self.encode(value)?;
        let resolved = self.resolve(options);
        let projected = if resolved.sort_keys {
            sort_keys(projected)
        } else {
            projected
        };

        let separators = options
            .separators
            .as_ref()
            .map(|(item, key)| (item.as_str(), key.as_str()));
        let formatter = DumpFormatter::new(resolved.indent, separators, resolved.ensure_ascii);
        let mut out = Vec::with_capacity(128);
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        projected
            .serialize(&mut ser)
            .map_err(SerializationError::from)?;
        let text = String::from_utf8(out).map_err(SerializationError::from)?;
        Ok(text)
    }

    /// Parse JSON text, recovering dates and timestamps per configuration.
    pub fn loads(&self, text: &str) -> Result<Value, AsjsonError> {
        self.loads_with(text, &LoadOptions::default())
    }

    /// Parse JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` with `serde_json`'s line and column when `text`
    /// is not well-formed JSON.
    pub fn loads_with(&self, text: &str, options: &LoadOptions) -> Result<Value, AsjsonError> {
        let parsed: JsonValue = serde_json::from_str(text).map_err(ParseError::from)?;
        let mut recognizer = self.config.recognizer();
        if let Some(parse_date) = options.parse_date {
            recognizer.parse_date = parse_date;
        }
        if let Some(parse_datetime) = options.parse_datetime {
            recognizer.parse_datetime = parse_datetime;
        }
        if !recognizer.is_enabled() {
            return Ok(Value::from(parsed));
        }
        Ok(recover(parsed, &recognizer))
    }

    fn resolve(&self, options: &DumpOptions) -> Resolved {
        let debug = options.debug.unwrap_or(self.config.debug);
        if debug {
            tracing::debug!(indent = self.config.debug_indent, "debug formatting in effect");
        }
        Resolved {
            indent: options.indent.or(debug.then_some(self.config.debug_indent)),
            sort_keys: options.sort_keys.unwrap_or(debug),
            ensure_ascii: options.ensure_ascii.unwrap_or(!debug),
        }
    }
}

/// Convert parsed JSON to a [`Value`], replacing recognized strings.
/// Object keys are left as they are.
fn recover(json: JsonValue, recognizer: &Recognizer) -> Value {
    match json {
        JsonValue::String(s) => recognizer.recognize(&s).unwrap_or(Value::String(s)),
        JsonValue::Array(items) => Value::Array(
            items.into_iter().map(|item| recover(item, recognizer)).collect(),
        ),
        JsonValue::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, recover(item, recognizer)))
                .collect(),
        ),
        other => Value::from(other),
    }
}

/// Rebuild every object with its keys in sorted order.
fn sort_keys(json: JsonValue) -> JsonValue {
    match json {
        JsonValue::Array(items) => JsonValue::Array(items.into_iter().map(sort_keys).collect()),
        JsonValue::Object(map) => {
            let mut entries: Vec<(String, JsonValue)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            JsonValue::Object(
                entries
                    .into_iter()
                    .map(|(key, item)| (key, sort_keys(item)))
                    .collect(),
            )
        }
        other => other,
    }
}

/// Project `value` to plain JSON using the default codec.
pub fn encode(value: &Value) -> Result<JsonValue, AsjsonError> {
    Codec::default().encode(value)
}

/// Serialize `value` using the default codec.
pub fn dumps(value: &Value) -> Result<String, AsjsonError> {
    Codec::default().dumps(value)
}

/// Serialize `value` with explicit options using the default codec.
pub fn dumps_with(value: &Value, options: &DumpOptions) -> Result<String, AsjsonError> {
    Codec::default().dumps_with(value, options)
}

/// Parse `text` with date and timestamp recovery enabled.
pub fn loads(text: &str) -> Result<Value, AsjsonError> {
    Codec::default().loads(text)
}

/// Parse `text` with explicit recovery options.
pub fn loads_with(text: &str, options: &LoadOptions) -> Result<Value, AsjsonError> {
    Codec::default().loads_with(text, options)
}
