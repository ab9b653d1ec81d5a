//! Remove command implementation.

use airtrack_core::{Cid, Roster};
use tracing::info;

/// Runs the remove command.
pub fn run(roster: &Roster, cid: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cid = Cid::parse(cid)?;
    roster.remove(&cid)?;
    info!(kind = %roster.kind(), cid = %cid, "removed");
    println!("{} {} removed from tracking", roster.kind(), cid);
    Ok(())
}
