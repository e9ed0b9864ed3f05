//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Two-player tic-tac-toe with auto-saved games
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Two-player tic-tac-toe in the terminal")]
#[command(long_about = tictactoe::ABOUT)]
#[command(version)]
pub struct Cli {
    /// Path to the settings file (created when settings change)
    #[arg(long, global = true, default_value = "tictactoe.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Override the save file
        #[arg(long)]
        store: Option<PathBuf>,

        /// Play without auto-save; clears any saved game
        #[arg(long)]
        no_auto_save: bool,

        /// Keep saves in memory only
        #[arg(long)]
        ephemeral: bool,
    },

    /// Print the saved game
    Show {
        /// Override the save file
        #[arg(long)]
        store: Option<PathBuf>,

        /// Print a JSON report instead of a grid
        #[arg(long)]
        json: bool,
    },

    /// Delete the saved game
    Clear {
        /// Override the save file
        #[arg(long)]
        store: Option<PathBuf>,
    },
}
