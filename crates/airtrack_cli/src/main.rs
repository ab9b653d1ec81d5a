//! Airtrack CLI
//!
//! Command-line tools for the Airtrack presence tracker.
//!
//! # Commands
//!
//! - `online` - Mark an entity online under a callsign
//! - `offline` - Mark an entity offline
//! - `remove` - Erase an entity from tracking
//! - `get` - Show an entity by CID
//! - `callsign` - Show the online entity holding a callsign
//! - `list` - List online entities, most recent first
//!
//! State lives in a single JSON file (`--store`), one per deployment.

mod commands;

use airtrack_core::{EntityKind, Roster};
use airtrack_store::FileStore;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Airtrack command-line presence tools.
#[derive(Parser)]
#[command(name = "airtrack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the tracker store file
    #[arg(global = true, short, long, default_value = "airtrack.json")]
    store: PathBuf,

    /// Entity kind to operate on (controller, pilot)
    #[arg(global = true, short, long, default_value = "controller")]
    kind: String,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mark an entity online under a callsign
    Online {
        /// Entity CID
        cid: String,

        /// Callsign to claim (case-insensitive)
        callsign: String,

        /// Kind-specific attributes as key=value pairs
        #[arg(short, long)]
        attr: Vec<String>,
    },

    /// Mark an entity offline
    Offline {
        /// Entity CID
        cid: String,
    },

    /// Erase an entity from tracking
    Remove {
        /// Entity CID
        cid: String,
    },

    /// Show an entity by CID
    Get {
        /// Entity CID
        cid: String,
    },

    /// Show the online entity holding a callsign
    Callsign {
        /// Callsign to resolve (case-insensitive)
        callsign: String,
    },

    /// List online entities, most recent first
    List,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if matches!(cli.command, Commands::Version) {
        println!("Airtrack CLI v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let kind: EntityKind = cli.kind.parse()?;
    let store = Arc::new(FileStore::open_with_create_dirs(&cli.store)?);
    let roster = Roster::new(kind, store);

    match cli.command {
        Commands::Online {
            cid,
            callsign,
            attr,
        } => commands::online::run(&roster, &cid, &callsign, &attr)?,
        Commands::Offline { cid } => commands::offline::run(&roster, &cid)?,
        Commands::Remove { cid } => commands::remove::run(&roster, &cid)?,
        Commands::Get { cid } => commands::get::run(&roster, &cid)?,
        Commands::Callsign { callsign } => commands::callsign::run(&roster, &callsign)?,
        Commands::List => commands::list::run(&roster)?,
        Commands::Version => unreachable!("handled above"),
    }

    Ok(())
}
