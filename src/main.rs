//! Tic-tac-toe - unified CLI.

#![warn(missing_docs)]

mod cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tictactoe::{FileStore, Game, GameReport, MemoryStore, Settings, SnapshotStore, run_tui};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            store,
            no_auto_save,
            ephemeral,
        } => {
            // The log file location is itself a setting.
            let settings = load_settings(&cli.config)?;
            init_file_logging(settings.log_file())?;
            info!(config = %cli.config.display(), ?settings, "Settings loaded");
            run_play(settings, cli.config, store, no_auto_save, ephemeral)
        }
        Command::Show { store, json } => {
            init_stderr_logging();
            let settings = load_settings(&cli.config)?;
            run_show(&store_for(&settings, store), settings.slot(), json)
        }
        Command::Clear { store } => {
            init_stderr_logging();
            let settings = load_settings(&cli.config)?;
            run_clear(&mut store_for(&settings, store), settings.slot())
        }
    }
}

fn load_settings(path: &Path) -> Result<Settings> {
    let settings = Settings::from_file_or_default(path)
        .with_context(|| format!("Failed to load settings from '{}'", path.display()))?
        .apply_env()?;
    Ok(settings)
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

/// Logs to a file so output does not corrupt the terminal UI.
fn init_file_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file '{}'", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn store_for(settings: &Settings, store: Option<PathBuf>) -> FileStore {
    FileStore::new(store.unwrap_or_else(|| settings.store_path().clone()))
}

/// Run the terminal game.
fn run_play(
    mut settings: Settings,
    config_path: PathBuf,
    store: Option<PathBuf>,
    no_auto_save: bool,
    ephemeral: bool,
) -> Result<()> {
    info!("Starting tic-tac-toe");

    if let Some(path) = store {
        settings.set_store_path(path);
    }

    // A one-off flag must not be written back as the saved preference.
    let config_path = (!no_auto_save).then_some(config_path);
    if no_auto_save {
        settings.set_auto_save(false);
    }

    if ephemeral {
        info!("Using in-memory store");
        run_tui(settings, config_path, &mut MemoryStore::new())
    } else {
        let mut store = FileStore::new(settings.store_path());
        run_tui(settings, config_path, &mut store)
    }
}

/// Print the saved game.
#[instrument(skip(store))]
fn run_show(store: &impl SnapshotStore, slot: &str, json: bool) -> Result<()> {
    let Some(text) = store.load(slot)? else {
        println!("No saved game.");
        return Ok(());
    };

    let game = match Game::deserialize(&text) {
        Ok(game) => game,
        Err(e) => {
            warn!(error = %e, "Saved game is unreadable");
            anyhow::bail!("Saved game is unreadable: {}", e.reason);
        }
    };

    if json {
        let report = GameReport::from(&game);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{game}");
        println!();
        match game.winner() {
            Some(winner) => println!("{winner} won."),
            None if game.is_full() => println!("Draw."),
            None => println!("{} to move.", game.current_turn()),
        }
    }
    Ok(())
}

/// Delete the saved game.
#[instrument(skip(store))]
fn run_clear(store: &mut impl SnapshotStore, slot: &str) -> Result<()> {
    store.remove(slot).context("Failed to clear saved game")?;
    println!("Saved game cleared.");
    Ok(())
}
