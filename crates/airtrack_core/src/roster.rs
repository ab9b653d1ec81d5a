//! The presence roster: dual-index online/offline tracking.

use crate::callsign::Callsign;
use crate::cid::Cid;
use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, CoreResult};
use crate::kind::EntityKind;
use crate::record::{EntityRecord, Status};
use airtrack_store::KvStore;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Online/offline roster for one entity kind.
///
/// A roster keeps two linked families of keys in the shared store:
///
/// - `"<kind>:<cid>"` - the primary [`EntityRecord`], JSON-encoded
/// - `"callsign:<kind>:<CALLSIGN>"` - reverse index entry holding the raw
///   CID, present only while the owning entity is online
///
/// After every successful operation the two agree: an index entry for
/// callsign C exists exactly when some record is online with callsign C,
/// and points at that record's CID.
///
/// # Concurrency
///
/// The store offers no cross-key isolation, so the read-check-write
/// sequence in [`Roster::set_online`] is not serializable: two concurrent
/// calls claiming the same callsign can both pass the uniqueness check
/// before either writes. The index entry then goes to the last writer and
/// the loser's record carries a callsign it no longer owns until its next
/// transition. This window is an accepted trade of strictness for
/// availability; a store with compare-and-swap could close it.
///
/// Within one operation the record and index writes are a best-effort
/// dual write with no atomicity between them. A failure between the two
/// surfaces as a storage error and can leave a dangling index entry, which
/// lookups treat as not found (see [`Roster::get_by_callsign`]).
pub struct Roster {
    kind: EntityKind,
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
}

impl Roster {
    /// Creates a roster over the given store, using wall-clock time.
    pub fn new(kind: EntityKind, store: Arc<dyn KvStore>) -> Self {
        Self::with_clock(kind, store, Arc::new(SystemClock))
    }

    /// Creates a roster with an injected time source.
    pub fn with_clock(kind: EntityKind, store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { kind, store, clock }
    }

    /// Returns the entity kind this roster tracks.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Fetches the record for `cid`, if one exists.
    pub fn get(&self, cid: &Cid) -> CoreResult<Option<EntityRecord>> {
        self.load_record(&self.kind.record_key(cid))
    }

    /// Resolves a callsign to its current online holder.
    ///
    /// The input is normalized before lookup, so case does not matter.
    /// Returns `Ok(None)` when no entity holds the callsign. An index
    /// entry pointing at a missing record is treated the same way - the
    /// two keys can drift when a dual write is interrupted - and logged.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed callsign, or a storage
    /// error if the store fails.
    pub fn get_by_callsign(&self, raw: &str) -> CoreResult<Option<EntityRecord>> {
        let callsign = Callsign::parse(raw)?;
        let index_key = self.kind.callsign_key(&callsign);

        let Some(holder) = self.store.get(&index_key)? else {
            return Ok(None);
        };

        let record_key = self.kind.record_key_raw(&holder);
        let record = self.load_record(&record_key)?;
        if record.is_none() {
            warn!(
                kind = %self.kind,
                callsign = %callsign,
                holder = %holder,
                "callsign index entry points at a missing record"
            );
        }
        Ok(record)
    }

    /// Lists all currently online entities of this kind.
    ///
    /// This scans every record under the kind's prefix, so cost grows with
    /// the total number of tracked entities, not the online count. Results
    /// are ordered by `online_time` descending, ties broken by CID
    /// ascending so the order is deterministic.
    pub fn list_online(&self) -> CoreResult<Vec<EntityRecord>> {
        let keys = self.store.keys_with_prefix(&self.kind.record_prefix())?;

        let mut online = Vec::new();
        for key in keys {
            // A record can vanish between the scan and the fetch.
            if let Some(record) = self.load_record(&key)? {
                if record.is_online() {
                    online.push(record);
                }
            }
        }

        online.sort_by(|a, b| {
            b.online_time
                .cmp(&a.online_time)
                .then_with(|| a.cid.cmp(&b.cid))
        });
        Ok(online)
    }

    /// Marks an entity online under the given callsign.
    ///
    /// Creates the record on first sight, otherwise updates it in place:
    /// `first_seen` is carried forward, `online_time` and `last_update`
    /// are set to now, and the supplied attributes replace the previous
    /// ones. The callsign index entry is moved if the callsign changed.
    ///
    /// # Errors
    ///
    /// - Validation error if a kind-required attribute is missing or not a
    ///   non-empty string (nothing is persisted)
    /// - [`CoreError::CallsignInUse`] if a *different* CID currently holds
    ///   the callsign (nothing is persisted)
    /// - Storage error if any store call fails
    pub fn set_online(
        &self,
        cid: &Cid,
        callsign: &Callsign,
        attributes: Map<String, Value>,
    ) -> CoreResult<EntityRecord> {
        self.validate_attributes(&attributes)?;

        // Uniqueness guard: reject before mutating anything.
        let index_key = self.kind.callsign_key(callsign);
        if let Some(holder) = self.store.get(&index_key)? {
            if holder != cid.as_str() {
                return Err(CoreError::CallsignInUse {
                    callsign: callsign.to_string(),
                    holder,
                });
            }
        }

        let record_key = self.kind.record_key(cid);
        let existing = self.load_record(&record_key)?;

        // Moving to a new callsign: retire the old index entry, but only
        // if it still points at us. After a reassignment it may already
        // belong to another entity.
        if let Some(prev) = &existing {
            if prev.callsign != *callsign {
                self.delete_index_if_owned(&prev.callsign, cid)?;
            }
        }

        let now = self.clock.now();
        let record = EntityRecord {
            cid: cid.clone(),
            callsign: callsign.clone(),
            status: Status::Online,
            first_seen: existing.as_ref().map_or(now, |r| r.first_seen),
            online_time: now,
            offline_time: None,
            last_update: now,
            attributes,
        };

        // Best-effort dual write; not atomic against the store.
        self.store.put(&record_key, &record.to_json()?)?;
        self.store.put(&index_key, cid.as_str())?;

        debug!(kind = %self.kind, cid = %cid, callsign = %callsign, "entity online");
        Ok(record)
    }

    /// Marks an entity offline, retaining its record.
    ///
    /// The record keeps its callsign, attributes, and `first_seen` so
    /// history survives until an explicit [`Roster::remove`]. The callsign
    /// index entry is dropped, freeing the callsign for others.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no record exists for `cid`, or a
    /// storage error if the store fails.
    pub fn set_offline(&self, cid: &Cid) -> CoreResult<EntityRecord> {
        let record_key = self.kind.record_key(cid);
        let Some(mut record) = self.load_record(&record_key)? else {
            return Err(self.unknown(cid));
        };

        let now = self.clock.now();
        record.status = Status::Offline;
        record.offline_time = Some(now);
        record.last_update = now;

        self.store.put(&record_key, &record.to_json()?)?;
        self.delete_index_if_owned(&record.callsign, cid)?;

        debug!(kind = %self.kind, cid = %cid, "entity offline");
        Ok(record)
    }

    /// Permanently erases an entity and its index entry.
    ///
    /// This is the only operation that deletes a record.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no record exists for `cid`, or a
    /// storage error if the store fails.
    pub fn remove(&self, cid: &Cid) -> CoreResult<()> {
        let record_key = self.kind.record_key(cid);
        let Some(record) = self.load_record(&record_key)? else {
            return Err(self.unknown(cid));
        };

        self.store.delete(&record_key)?;
        if record.is_online() {
            self.delete_index_if_owned(&record.callsign, cid)?;
        }

        debug!(kind = %self.kind, cid = %cid, "entity removed");
        Ok(())
    }

    /// Fetches and decodes a record by store key.
    fn load_record(&self, key: &str) -> CoreResult<Option<EntityRecord>> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(EntityRecord::from_json(key, &raw)?)),
            None => Ok(None),
        }
    }

    /// Deletes the index entry for `callsign` only if it resolves to `cid`.
    ///
    /// An unconditional delete could erase another entity's entry after a
    /// callsign reassignment.
    fn delete_index_if_owned(&self, callsign: &Callsign, cid: &Cid) -> CoreResult<()> {
        let index_key = self.kind.callsign_key(callsign);
        if let Some(holder) = self.store.get(&index_key)? {
            if holder == cid.as_str() {
                self.store.delete(&index_key)?;
            }
        }
        Ok(())
    }

    fn validate_attributes(&self, attributes: &Map<String, Value>) -> CoreResult<()> {
        // Attributes share the record's top level when serialized, so the
        // record's own field names are off limits.
        const RESERVED: [&str; 7] = [
            "cid",
            "callsign",
            "status",
            "first_seen",
            "online_time",
            "offline_time",
            "last_update",
        ];
        if let Some(key) = attributes.keys().find(|k| RESERVED.contains(&k.as_str())) {
            return Err(CoreError::validation(format!(
                "attribute {key:?} collides with a record field"
            )));
        }

        for name in self.kind.required_attributes() {
            match attributes.get(*name) {
                Some(Value::String(s)) if !s.trim().is_empty() => {}
                Some(_) => {
                    return Err(CoreError::validation(format!(
                        "attribute {name:?} must be a non-empty string"
                    )));
                }
                None => {
                    return Err(CoreError::validation(format!(
                        "missing required attribute {name:?} for {}",
                        self.kind
                    )));
                }
            }
        }
        Ok(())
    }

    fn unknown(&self, cid: &Cid) -> CoreError {
        CoreError::not_found(format!("{} {} not found", self.kind, cid))
    }
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Roster")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
