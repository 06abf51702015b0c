//! Tic-tac-toe match server entry point.

use anyhow::Result;
use clap::Parser;
use tictactoe_coordinator::{
    Cli, Command, MatchStore, MemoryStore, ServerConfig, Snapshot, SnapshotRepository, serve,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    match cli.command {
        Command::Serve {
            port,
            host,
            ephemeral,
        } => {
            let config = config.with_overrides(host, port, cli.db_path);
            run_server(config, ephemeral).await
        }
        Command::Inspect { history } => {
            let config = config.with_overrides(None, None, cli.db_path);
            inspect(&config, history)
        }
        Command::Reset => {
            let config = config.with_overrides(None, None, cli.db_path);
            reset(&config)
        }
    }
}

/// Run the HTTP match server
#[instrument(skip(config), fields(address = %config.bind_address()))]
async fn run_server(config: ServerConfig, ephemeral: bool) -> Result<()> {
    let store: Box<dyn MatchStore> = if ephemeral {
        info!("Using in-memory snapshot store");
        Box::new(MemoryStore::new())
    } else {
        info!(path = %config.database_url(), "Using SQLite snapshot store");
        Box::new(SnapshotRepository::open(config.database_url().clone())?)
    };
    serve(&config, store).await
}

/// Print stored snapshots as JSON
#[instrument(skip(config))]
fn inspect(config: &ServerConfig, history: bool) -> Result<()> {
    let repo = SnapshotRepository::open(config.database_url().clone())?;
    if history {
        for row in repo.history()? {
            let state = Snapshot::from(row).restore()?;
            println!("{}", serde_json::to_string(&state)?);
        }
        return Ok(());
    }
    match repo.newest()? {
        Some(row) => {
            let state = Snapshot::from(row).restore()?;
            println!("{}", serde_json::to_string_pretty(&state)?);
            println!("\n{}", state.board().display());
        }
        None => println!("No stored match"),
    }
    Ok(())
}

/// Delete stored snapshots
#[instrument(skip(config))]
fn reset(config: &ServerConfig) -> Result<()> {
    let repo = SnapshotRepository::open(config.database_url().clone())?;
    let removed = repo.delete_all()?;
    println!("Removed {} snapshot(s)", removed);
    Ok(())
}
