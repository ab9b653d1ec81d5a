//! List command implementation.

use airtrack_core::Roster;

/// Runs the list command.
pub fn run(roster: &Roster) -> Result<(), Box<dyn std::error::Error>> {
    let online = roster.list_online()?;
    println!("{} online {}(s)", online.len(), roster.kind());
    for record in &online {
        println!(
            "  {:>8}  {:<10}  online since {}",
            record.cid,
            record.callsign.as_str(),
            record.online_time.to_rfc3339()
        );
    }
    Ok(())
}
