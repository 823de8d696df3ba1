//! Identifier types.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

/// Error when parsing a WixID string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid WixID format")]
pub struct ParseWixIdError {
    /// The rejected input, kept for log context.
    pub input: String,
}

/// Externally issued player identifier (a UUID minted by the Wix frontend).
///
/// Players are looked up by this key rather than a store-assigned id, so the
/// string form has to be stable everywhere it appears: JSON bodies, stored
/// documents, and query filters all carry the canonical hyphenated rendering.
/// Serde is hand-written (not derived) so the BSON serializer cannot pick a
/// binary UUID representation that would no longer match the JSON form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WixId(Uuid);

impl WixId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from the canonical string form.
    pub fn parse_str(input: &str) -> Result<Self, ParseWixIdError> {
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|_| ParseWixIdError {
                input: input.to_string(),
            })
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for WixId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WixId {
    type Err = ParseWixIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl From<Uuid> for WixId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<WixId> for Uuid {
    fn from(value: WixId) -> Self {
        value.0
    }
}

impl Serialize for WixId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WixId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_str(&s).map_err(de::Error::custom)
    }
}
