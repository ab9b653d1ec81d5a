//! # Airtrack Store
//!
//! Key-value store abstraction for Airtrack.
//!
//! This crate provides the lowest-level storage abstraction for the
//! presence tracker. Stores are **opaque string maps** - they do not
//! interpret the values they hold. Airtrack owns all key layout and
//! payload interpretation.
//!
//! ## Design Principles
//!
//! - Stores are simple keyed maps (get, put, delete, prefix scan)
//! - No knowledge of record schemas or index layout
//! - Must be `Send + Sync` for concurrent access
//! - No multi-key atomicity: callers own cross-key consistency
//!
//! ## Available Stores
//!
//! - [`MemoryStore`] - For testing and ephemeral deployments
//! - [`FileStore`] - Single-file persistence using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use airtrack_store::{KvStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.put("controller:123", "{}").unwrap();
//! assert!(store.get("controller:123").unwrap().is_some());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::KvStore;
