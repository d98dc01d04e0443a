//! # Codec Configuration
//!
//! `CodecConfig` holds the settings a [`Codec`](crate::Codec) is built with.
//! It deserializes from YAML or any serde format, with every field optional:
//!
//! ```yaml
//! debug: false
//! debug_indent: 2
//! parse_date: true
//! parse_datetime: true
//! prefer: datetime
//! ```
//!
//! ## Process-wide debug default
//!
//! `set_debug_default` installs a debug default once per process, typically
//! at startup. `CodecConfig::default()` and the free `dumps` functions pick
//! it up; a codec built from an explicit config or a per-call `debug` option
//! overrides it.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::recognize::{Preference, Recognizer};

/// Indentation used by debug output unless configured otherwise.
pub const DEFAULT_DEBUG_INDENT: usize = 2;

/// Largest accepted debug indentation.
pub const MAX_INDENT: usize = 16;

static DEBUG_DEFAULT: OnceLock<bool> = OnceLock::new();

/// Set the process-wide debug default.
///
/// # Errors
///
/// Returns `ConfigError::DebugDefaultAlreadySet` on any call after the first.
pub fn set_debug_default(enabled: bool) -> Result<(), ConfigError> {
    DEBUG_DEFAULT
        .set(enabled)
        .map_err(|_| ConfigError::DebugDefaultAlreadySet)?;
    tracing::debug!(enabled, "process-wide debug default set");
    Ok(())
}

/// The process-wide debug default, `false` until set.
pub fn debug_default() -> bool {
    DEBUG_DEFAULT.get().copied().unwrap_or(false)
}

/// Settings for a [`Codec`](crate::Codec).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Pretty-print with sorted keys and literal non-ASCII output.
    pub debug: bool,
    /// Spaces per level in debug output.
    pub debug_indent: usize,
    /// Recover `YYYY-MM-DD` strings as dates in `loads`.
    pub parse_date: bool,
    /// Recover ISO-8601 timestamp strings in `loads`.
    pub parse_datetime: bool,
    /// Which kind to try first.
    pub prefer: Preference,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            debug: debug_default(),
            debug_indent: DEFAULT_DEBUG_INDENT,
            parse_date: true,
            parse_datetime: true,
            prefer: Preference::default(),
        }
    }
}

impl CodecConfig {
    /// Parse and validate a YAML configuration document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debug_indent > MAX_INDENT {
            return Err(ConfigError::InvalidIndent(self.debug_indent));
        }
        Ok(())
    }

    pub fn recognizer(&self) -> Recognizer {
        Recognizer::new(self.parse_date, self.parse_datetime).with_preference(self.prefer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_recovery() {
        let config = CodecConfig::default();
        assert!(config.parse_date);
        assert!(config.parse_datetime);
        assert_eq!(config.debug_indent, DEFAULT_DEBUG_INDENT);
        assert_eq!(config.prefer, Preference::DateTime);
    }

    #[test]
    fn test_yaml_partial_document() {
        let config = CodecConfig::from_yaml_str("debug: true\nprefer: date\n").unwrap();
        assert!(config.debug);
        assert_eq!(config.prefer, Preference::Date);
        assert!(config.parse_date);
    }

    #[test]
    fn test_yaml_rejects_unknown_field() {
        let err = CodecConfig::from_yaml_str("colour: blue\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml(_)));
    }

    #[test]
    fn test_yaml_rejects_large_indent() {
        let err = CodecConfig::from_yaml_str("debug_indent: 64\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIndent(64)));
    }

    #[test]
    fn test_recognizer_follows_flags() {
        let config = CodecConfig {
            parse_date: false,
            ..CodecConfig::default()
        };
        let r = config.recognizer();
        assert!(!r.parse_date);
        assert!(r.parse_datetime);
    }
}
