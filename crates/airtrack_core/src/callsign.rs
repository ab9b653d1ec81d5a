//! Callsign identifier.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of characters in a callsign.
const MIN_LEN: usize = 2;

/// Human-assigned short identifier used as the reverse lookup key.
///
/// Callsigns are case-insensitive on the wire and stored normalized to
/// uppercase, so `ual123`, `UAL123`, and `Ual123` all name the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Callsign(String);

impl Callsign {
    /// Parses and normalizes a callsign.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the input is shorter than two
    /// characters.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        if raw.chars().count() < MIN_LEN {
            return Err(CoreError::validation(format!(
                "invalid callsign {raw:?}: must be at least {MIN_LEN} characters"
            )));
        }
        Ok(Self(raw.to_uppercase()))
    }

    /// Returns the normalized (uppercase) form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_to_uppercase() {
        assert_eq!(Callsign::parse("ual123").unwrap().as_str(), "UAL123");
        assert_eq!(Callsign::parse("Ual123").unwrap().as_str(), "UAL123");
        assert_eq!(Callsign::parse("UAL123").unwrap().as_str(), "UAL123");
    }

    #[test]
    fn parse_is_idempotent_under_case() {
        let a = Callsign::parse("dal456").unwrap();
        let b = Callsign::parse("DAL456").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parse_rejects_short_input() {
        for bad in ["", "A"] {
            assert!(matches!(
                Callsign::parse(bad),
                Err(CoreError::Validation { .. })
            ));
        }
        // Exactly two characters is the floor
        assert!(Callsign::parse("AB").is_ok());
    }
}
