//! # Object Identifiers
//!
//! Opaque 12-byte identifiers rendered as 24 hexadecimal characters. The
//! codec attaches no meaning to the bytes; an `ObjectId` projects to its hex
//! text and is never recovered automatically, since a bare hex string cannot
//! be told apart from an ordinary one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of raw bytes in an identifier.
pub const OBJECT_ID_LEN: usize = 12;

/// A 12-byte opaque identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

/// Rejected identifier text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectIdError {
    /// Input was not exactly 24 characters long.
    #[error("object id must be 24 hex characters, got {0}")]
    InvalidLength(usize),

    /// Input contained a non-hex character.
    #[error("object id contains non-hex characters: {0:?}")]
    InvalidHex(String),
}

impl ObjectId {
    /// Wrap raw identifier bytes.
    pub const fn from_bytes(bytes: [u8; OBJECT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse an identifier from 24 hex characters (either case).
    pub fn parse_str(s: &str) -> Result<Self, ObjectIdError> {
        if s.len() != OBJECT_ID_LEN * 2 {
            return Err(ObjectIdError::InvalidLength(s.chars().count()));
        }
        let mut bytes = [0u8; OBJECT_ID_LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| ObjectIdError::InvalidHex(s.to_string()))?;
        Ok(Self(bytes))
    }

    /// Access the raw bytes.
    pub fn bytes(&self) -> &[u8; OBJECT_ID_LEN] {
        &self.0
    }

    /// Lowercase hex rendering, always 24 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl From<[u8; OBJECT_ID_LEN]> for ObjectId {
    fn from(bytes: [u8; OBJECT_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: ObjectId = "507f1f77bcf86cd799439011".parse().unwrap();
        assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
        assert_eq!(id.bytes()[0], 0x50);
    }

    #[test]
    fn test_uppercase_accepted_and_lowercased() {
        let id = ObjectId::parse_str("507F1F77BCF86CD799439011").unwrap();
        assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert_eq!(
            ObjectId::parse_str("507f1f77"),
            Err(ObjectIdError::InvalidLength(8))
        );
        assert!(ObjectId::parse_str("").is_err());
    }

    #[test]
    fn test_non_hex_rejected() {
        assert!(matches!(
            ObjectId::parse_str("zz7f1f77bcf86cd799439011"),
            Err(ObjectIdError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_from_bytes() {
        let id = ObjectId::from_bytes([0xab; OBJECT_ID_LEN]);
        assert_eq!(id.to_hex(), "ab".repeat(12));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let id = ObjectId::parse_str("0123456789abcdef01234567").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""0123456789abcdef01234567""#);
        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
