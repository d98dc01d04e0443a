//! # Error Types
//!
//! Defines the error types returned by `encode`, `dumps`, and `loads`. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Parse errors carry the position reported by `serde_json`.
//! - Serialization errors name the type that had no JSON representation.
//! - Recognition misses are not errors; they never surface here.

use thiserror::Error;

/// Top-level error type for the codec.
#[derive(Error, Debug)]
pub enum AsjsonError {
    /// Input text is not well-formed JSON.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A value could not be projected or serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Codec configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Malformed JSON input, wrapping the diagnostic from `serde_json`.
#[derive(Error, Debug)]
#[error("invalid JSON: {source}")]
pub struct ParseError {
    #[source]
    source: serde_json::Error,
}

impl ParseError {
    /// Line of the offending input, 1-based.
    pub fn line(&self) -> usize {
        self.source.line()
    }

    /// Column of the offending input, 1-based.
    pub fn column(&self) -> usize {
        self.source.column()
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(source: serde_json::Error) -> Self {
        Self { source }
    }
}

/// Error while turning a value into JSON text.
#[derive(Error, Debug)]
pub enum SerializationError {
    /// No projector rule and no fallback accepted the value.
    #[error("value of type `{type_name}` has no JSON representation")]
    Unsupported {
        /// Name of the offending value type.
        type_name: &'static str,
    },

    /// The underlying JSON serializer failed.
    #[error("json serializer failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Serializer output was not valid UTF-8.
    #[error("serializer produced invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Error in codec configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The process-wide debug default may only be set once.
    #[error("process-wide debug default was already set")]
    DebugDefaultAlreadySet,

    /// Debug indentation outside the accepted range.
    #[error("debug indent {0} exceeds the maximum of {max}", max = crate::config::MAX_INDENT)]
    InvalidIndent(usize),

    /// YAML configuration could not be parsed.
    #[error("invalid YAML configuration: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}
