//! Opaque record identifiers.
//!
//! Records created by the server get a UUID v4 string. Records created on a
//! client without a server get a millisecond timestamp id. Both shapes are
//! carried as the same opaque string; nothing above the persistence adapter
//! inspects them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur with record IDs
#[derive(Error, Debug, PartialEq)]
pub enum RecordIdError {
    #[error("Record ID cannot be empty")]
    Empty,

    #[error("Record ID contains whitespace: {0:?}")]
    Whitespace(String),
}

/// Identifier of a single farm record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a new random (server-side) record ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Client-side fallback id derived from a timestamp (milliseconds since epoch).
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis().to_string())
    }

    /// Parse an id received from a user or another system.
    pub fn parse(s: &str) -> Result<Self, RecordIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(RecordIdError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(RecordIdError::Whitespace(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// Wire shapes an id may arrive in. Older client caches stored `Date.now()`
/// numbers, the server always writes strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecordId {
    Text(String),
    Integer(i64),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match RawRecordId::deserialize(deserializer)? {
            RawRecordId::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
            RawRecordId::Integer(n) => Ok(Self(n.to_string())),
        }
    }
}
