//! Callsign command implementation.

use airtrack_core::Roster;

/// Runs the callsign command.
pub fn run(roster: &Roster, callsign: &str) -> Result<(), Box<dyn std::error::Error>> {
    match roster.get_by_callsign(callsign)? {
        Some(record) => super::print_record(&record),
        None => Err(format!(
            "no online {} with callsign {}",
            roster.kind(),
            callsign.to_uppercase()
        )
        .into()),
    }
}
