//! Entity identifier.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical numeric identifier for a tracked entity.
///
/// A CID is a positive decimal integer kept in its canonical string form:
/// digits only, no sign, no leading zeros. It is assigned by the network,
/// never generated here, and is immutable for the lifetime of a record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cid(String);

impl Cid {
    /// Parses a CID from its string form.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless the input is a positive decimal
    /// integer with no leading zeros.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::validation(format!(
                "invalid CID {raw:?}: must be numeric"
            )));
        }
        if raw == "0" || raw.starts_with('0') {
            return Err(CoreError::validation(format!(
                "invalid CID {raw:?}: must be a positive integer without leading zeros"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
