//! Entity kinds and their key layout.

use crate::callsign::Callsign;
use crate::cid::Cid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of tracked participant.
///
/// Controllers and pilots share the same record schema and operations but
/// live under disjoint key prefixes and have their own required attributes.
/// Callsign index entries are scoped per kind, so a pilot and a controller
/// may hold the same callsign without colliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Air traffic controller.
    Controller,
    /// Pilot flying on the network.
    Pilot,
}

impl EntityKind {
    /// Returns the lowercase name used in key prefixes and routes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::Pilot => "pilot",
        }
    }

    /// Returns the plural route segment for this kind.
    #[must_use]
    pub const fn route_segment(self) -> &'static str {
        match self {
            Self::Controller => "controllers",
            Self::Pilot => "pilots",
        }
    }

    /// Attributes that must be present (as non-empty strings) when an
    /// entity of this kind comes online.
    #[must_use]
    pub const fn required_attributes(self) -> &'static [&'static str] {
        match self {
            Self::Controller => &[],
            Self::Pilot => &["aircraft"],
        }
    }

    /// Store key for this kind's record of `cid`.
    #[must_use]
    pub fn record_key(self, cid: &Cid) -> String {
        format!("{}:{}", self.as_str(), cid)
    }

    /// Store key for a record given the CID in raw string form.
    ///
    /// Used when resolving an index entry, whose payload is the raw CID.
    #[must_use]
    pub fn record_key_raw(self, cid: &str) -> String {
        format!("{}:{}", self.as_str(), cid)
    }

    /// Prefix under which all records of this kind live.
    #[must_use]
    pub fn record_prefix(self) -> String {
        format!("{}:", self.as_str())
    }

    /// Store key for this kind's callsign index entry.
    #[must_use]
    pub fn callsign_key(self, callsign: &Callsign) -> String {
        format!("callsign:{}:{}", self.as_str(), callsign)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "controller" => Ok(Self::Controller),
            "pilot" => Ok(Self::Pilot),
            other => Err(format!("unknown entity kind {other:?}")),
        }
    }
}
