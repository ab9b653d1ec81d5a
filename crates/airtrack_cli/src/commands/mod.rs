//! CLI command implementations.

pub mod callsign;
pub mod get;
pub mod list;
pub mod offline;
pub mod online;
pub mod remove;

use airtrack_core::EntityRecord;

/// Prints a record as pretty JSON.
pub(crate) fn print_record(record: &EntityRecord) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
