//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Read-only monitor for OpenClaw sessions.
///
/// Lists active and recent sessions with their cost, and shows message
/// activity over the last 24 hours.
#[derive(Debug, Parser)]
#[command(name = "antenna", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// OpenClaw state directory (overrides config and `OPENCLAW_DIR`).
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List sessions with cost totals.
    Dashboard {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show hourly message activity for the last 24 hours.
    Activity {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Redraw the dashboard and activity periodically.
    Watch {
        /// Seconds between refreshes (defaults to the configured interval).
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stop after this many refreshes.
        #[arg(long)]
        count: Option<u64>,
    },

    /// Show which state files are present.
    Status,
}
