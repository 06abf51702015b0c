//! Command-line interface for the match server.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe match server with durable state
#[derive(Parser, Debug)]
#[command(name = "tictactoe_coordinator")]
#[command(about = "Single-match tic-tac-toe server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite file holding match snapshots
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP match server
    Serve {
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Keep snapshots in memory only
        #[arg(long)]
        ephemeral: bool,
    },

    /// Print the newest stored match as JSON
    Inspect {
        /// Print every stored snapshot instead of the newest
        #[arg(long)]
        history: bool,
    },

    /// Delete every stored snapshot
    Reset,
}
