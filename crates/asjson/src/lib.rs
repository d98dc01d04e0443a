//! # asjson — JSON with Dates, Timestamps, Decimals, and Identifiers
//!
//! `dumps` and `loads` over `serde_json`, extended with value types JSON has
//! no native form for. Special values are written as plain strings, so the
//! output is ordinary JSON to any other reader; `loads` recognizes date and
//! timestamp strings and turns them back into typed values.
//!
//! ```
//! use asjson::{dumps, loads, LoadOptions, Value};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2013, 1, 27).unwrap();
//! let dt = date.and_hms_micro_opt(6, 48, 0, 38835).unwrap();
//! let src: Value = [("created", Value::from(vec![Value::from(dt), Value::from(date)]))]
//!     .into_iter()
//!     .collect();
//!
//! let text = dumps(&src).unwrap();
//! assert_eq!(text, r#"{"created": ["2013-01-27T06:48:00.038835", "2013-01-27"]}"#);
//! assert_eq!(loads(&text).unwrap(), src);
//!
//! let plain = asjson::loads_with(&text, &LoadOptions::plain()).unwrap();
//! assert_eq!(plain.get("created").unwrap().as_array().unwrap()[1], Value::from("2013-01-27"));
//! ```
//!
//! ## Round-trip guarantees
//!
//! - Dates and timestamps (naive or with a fixed offset) round-trip at
//!   microsecond precision.
//! - Decimals and object identifiers are one-way: they become strings and
//!   stay strings on the way back in.
//! - Object keys are never projected or recovered.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests; errors propagate as [`AsjsonError`].
//! - No global mutable state beyond the write-once debug default.

pub mod codec;
pub mod config;
pub mod error;
pub mod format;
pub mod object_id;
pub mod project;
pub mod recognize;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use codec::{dumps, dumps_with, encode, loads, loads_with, Codec, DumpOptions, LoadOptions};
pub use config::{debug_default, set_debug_default, CodecConfig};
pub use error::{AsjsonError, ConfigError, ParseError, SerializationError};
pub use object_id::{ObjectId, ObjectIdError};
pub use project::{Fallback, Projector};
pub use recognize::{Preference, Recognizer};
pub use value::{Map, Value};
