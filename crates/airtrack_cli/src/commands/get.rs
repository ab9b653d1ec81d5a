//! Get command implementation.

use airtrack_core::{Cid, Roster};

/// Runs the get command.
pub fn run(roster: &Roster, cid: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cid = Cid::parse(cid)?;
    match roster.get(&cid)? {
        Some(record) => super::print_record(&record),
        None => Err(format!("{} {} not found", roster.kind(), cid).into()),
    }
}
