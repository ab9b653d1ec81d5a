//! Entity record schema.

use crate::callsign::Callsign;
use crate::cid::Cid;
use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Online/offline state of a tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Currently connected to the network.
    Online,
    /// Previously seen, currently disconnected.
    Offline,
}

/// One tracked participant, persisted as JSON under `"<kind>:<cid>"`.
///
/// The record is created on the first online transition and updated in
/// place afterwards; it is only erased by an explicit remove. `first_seen`
/// is set once and never overwritten. Kind-specific attributes (route,
/// aircraft, frequency, ...) are carried opaquely in `attributes` and
/// round-trip through serialization untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Canonical identifier.
    pub cid: Cid,
    /// Current normalized callsign.
    pub callsign: Callsign,
    /// Online/offline state.
    pub status: Status,
    /// First-ever online transition. Immutable once set.
    pub first_seen: DateTime<Utc>,
    /// Most recent transition into online.
    pub online_time: DateTime<Utc>,
    /// Most recent transition into offline, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offline_time: Option<DateTime<Utc>>,
    /// Most recent mutation of any kind.
    pub last_update: DateTime<Utc>,
    /// Kind-specific attributes, not interpreted by the tracker.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl EntityRecord {
    /// Returns true if the entity is currently online.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.status == Status::Online
    }

    /// Serializes the record to its stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns a malformed-record error if serialization fails (an
    /// attribute value that JSON cannot represent).
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self)
            .map_err(|e| CoreError::malformed(self.cid.as_str(), e.to_string()))
    }

    /// Deserializes a record from its stored JSON form.
    ///
    /// `key` is the store key the payload came from, reported on failure.
    ///
    /// # Errors
    ///
    /// Returns a malformed-record error if the payload does not decode.
    pub fn from_json(key: &str, raw: &str) -> CoreResult<Self> {
        serde_json::from_str(raw).map_err(|e| CoreError::malformed(key, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> EntityRecord {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut attributes = Map::new();
        attributes.insert("frequency".into(), Value::String("118.300".into()));
        EntityRecord {
            cid: Cid::parse("123").unwrap(),
            callsign: Callsign::parse("UAL1").unwrap(),
            status: Status::Online,
            first_seen: now,
            online_time: now,
            offline_time: None,
            last_update: now,
            attributes,
        }
    }

    #[test]
    fn json_round_trip_preserves_attributes() {
        let record = sample();
        let raw = record.to_json().unwrap();
        let decoded = EntityRecord::from_json("controller:123", &raw).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(
            decoded.attributes.get("frequency"),
            Some(&Value::String("118.300".into()))
        );
    }

    #[test]
    fn status_serializes_lowercase() {
        let raw = sample().to_json().unwrap();
        assert!(raw.contains("\"status\":\"online\""));
    }

    #[test]
    fn absent_offline_time_is_omitted() {
        let raw = sample().to_json().unwrap();
        assert!(!raw.contains("offline_time"));
    }

    #[test]
    fn attributes_flatten_to_top_level() {
        let raw = sample().to_json().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["frequency"], Value::String("118.300".into()));
    }

    #[test]
    fn malformed_payload_reports_key() {
        let err = EntityRecord::from_json("controller:9", "{not json").unwrap_err();
        assert!(err.to_string().contains("controller:9"));
    }
}
