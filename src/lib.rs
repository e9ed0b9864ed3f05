//! Two-player tic-tac-toe with a terminal front end.
//!
//! # Architecture
//!
//! - **Model**: [`tictactoe_model`] holds the grid, turn, rules and snapshot format
//! - **Session**: owns one game and applies taps and lifecycle events to it
//! - **Store**: named snapshot slots that survive between runs
//! - **Config**: TOML settings with environment overrides
//! - **TUI**: ratatui board driven by keyboard and mouse
//!
//! # Example
//!
//! ```
//! use tictactoe::{MemoryStore, ResumeOutcome, Session, TapOutcome};
//!
//! let mut store = MemoryStore::new();
//! let mut session = Session::new(true, "GAME");
//! assert!(matches!(session.tap(1, 1), TapOutcome::Placed(_)));
//! session.suspend(&mut store)?;
//!
//! let mut next = Session::new(true, "GAME");
//! assert_eq!(next.resume(&mut store)?, ResumeOutcome::Restored);
//! assert_eq!(next.game(), session.game());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod report;
mod session;
mod store;
mod tui;

// Crate-level exports - Configuration
pub use config::{AUTO_SAVE_ENV, ConfigError, STORE_ENV, Settings};

// Crate-level exports - Reports
pub use report::GameReport;

// Crate-level exports - Session
pub use session::{ResumeOutcome, Session, TapOutcome};

// Crate-level exports - Storage
pub use store::{FileStore, MemoryStore, SnapshotStore, StoreError};

// Crate-level exports - Terminal UI
pub use tui::{App, AppAction, CellAreas, Screen, cell_areas, cell_at, run_tui};

// Crate-level exports - Game model
pub use tictactoe_model::{
    Cell, Coord, Game, MalformedSnapshot, MoveError, Player, VERSION_TAG,
};

/// Credits shown by `--help` and the about screen.
pub const ABOUT: &str = "Two player version of Tic Tac Toe.\n\n\
Take turns placing X and O; three in a row, column or diagonal wins.";
