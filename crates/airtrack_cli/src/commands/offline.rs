//! Offline command implementation.

use airtrack_core::{Cid, Roster};
use tracing::info;

/// Runs the offline command.
pub fn run(roster: &Roster, cid: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cid = Cid::parse(cid)?;
    let record = roster.set_offline(&cid)?;
    info!(kind = %roster.kind(), cid = %cid, "set offline");
    super::print_record(&record)
}
