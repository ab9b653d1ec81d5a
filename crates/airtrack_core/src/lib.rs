//! # Airtrack Core
//!
//! Presence tracking engine for aviation network participants.
//!
//! This crate provides:
//! - Validated identifier types ([`Cid`], [`Callsign`])
//! - The [`EntityRecord`] schema shared by controllers and pilots
//! - Per-kind key layout and validation rules ([`EntityKind`])
//! - The [`Roster`]: online/offline state keyed by CID with a reverse
//!   callsign index, kept consistent across state transitions
//!
//! # Consistency
//!
//! A roster maintains two linked families of keys in one shared store: a
//! primary record per CID and, for every *online* entity, a reverse index
//! entry mapping its normalized callsign back to the CID. The roster
//! guarantees that after each successful operation the two agree; across
//! concurrent operations the dual write is best-effort (see [`Roster`]).

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod callsign;
mod cid;
mod clock;
mod error;
mod kind;
mod record;
mod roster;

pub use callsign::Callsign;
pub use cid::Cid;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, CoreResult};
pub use kind::EntityKind;
pub use record::{EntityRecord, Status};
pub use roster::Roster;
