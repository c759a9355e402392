//! Entity identity - prefixed ULID identifiers
//!
//! Every master-data record carries an ID of the form `PREFIX-ULID`, e.g.
//! `UOM-01HQ5V2KRMJ0B9XYZ3NTWPGQ4E`. The prefix names the entity type and is
//! used to route record files back to the right schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use ulid::Ulid;

/// Entity type prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityPrefix {
    /// Item type
    Ity,
    /// Unit of measure
    Uom,
    /// Port of discharge
    Pod,
}

impl EntityPrefix {
    /// All known prefixes
    pub fn all() -> &'static [EntityPrefix] {
        &[EntityPrefix::Ity, EntityPrefix::Uom, EntityPrefix::Pod]
    }

    /// The uppercase prefix string used in IDs
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Ity => "ITY",
            EntityPrefix::Uom => "UOM",
            EntityPrefix::Pod => "POD",
        }
    }
}

impl fmt::Display for EntityPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ITY" => Ok(EntityPrefix::Ity),
            "UOM" => Ok(EntityPrefix::Uom),
            "POD" => Ok(EntityPrefix::Pod),
            other => Err(IdParseError::UnknownPrefix(other.to_string())),
        }
    }
}

/// Errors raised while parsing an entity ID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("invalid entity ID format '{0}' (expected PREFIX-ULID)")]
    InvalidFormat(String),

    #[error("unknown entity prefix '{0}'")]
    UnknownPrefix(String),

    #[error("invalid ULID '{0}'")]
    InvalidUlid(String),
}

/// A unique, prefixed entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    prefix: EntityPrefix,
    ulid: Ulid,
}

impl EntityId {
    /// Generate a fresh ID for the given entity type
    pub fn new(prefix: EntityPrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }

    pub fn prefix(&self) -> EntityPrefix {
        self.prefix
    }

    pub fn ulid(&self) -> Ulid {
        self.ulid
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, ulid) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::InvalidFormat(s.to_string()))?;

        let prefix: EntityPrefix = prefix.parse()?;
        let ulid =
            Ulid::from_string(ulid).map_err(|_| IdParseError::InvalidUlid(ulid.to_string()))?;

        Ok(Self { prefix, ulid })
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
