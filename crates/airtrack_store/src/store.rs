//! Store trait definition.

use crate::error::StoreResult;

/// A shared key-value store for Airtrack.
///
/// Stores are **opaque string maps**. They provide simple operations for
/// reading, writing, and scanning keyed values. Airtrack owns all key
/// layout and payload interpretation - stores do not understand entity
/// records or callsign index entries.
///
/// # Invariants
///
/// - `get` returns exactly the value previously written under that key
/// - `put` overwrites silently; there is no compare-and-swap
/// - `keys_with_prefix` returns keys in a deterministic order
/// - Stores must be `Send + Sync`; methods take `&self` because many
///   request handlers share one store concurrently
///
/// There is **no multi-key atomicity**: a sequence of calls from one
/// logical operation can interleave with calls from another. Callers that
/// keep multiple keys consistent (record plus index entry) do so
/// best-effort and must tolerate observing the window between two writes.
///
/// # Implementors
///
/// - [`super::MemoryStore`] - For testing
/// - [`super::FileStore`] - For single-file persistence
pub trait KvStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or the read fails.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes the value under `key`.
    ///
    /// Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete(&self, key: &str) -> StoreResult<()>;

    /// Returns all keys beginning with `prefix`, in ascending key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails.
    fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>>;
}
