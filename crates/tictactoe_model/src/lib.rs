//! Two-player tic-tac-toe game model.
//!
//! A [`Game`] is a 3x3 grid of [`Cell`]s plus the [`Player`] whose turn it
//! is. The model is a plain value: every operation is synchronous, and the
//! only I/O-facing piece is the versioned text snapshot used to persist a
//! game between sessions.
//!
//! ```
//! use tictactoe_model::{Game, Player};
//!
//! let mut game = Game::new();
//! game.apply_move(1, 1, Player::X)?;
//! assert!(!game.is_valid_move(1, 1));
//!
//! let restored = Game::deserialize(&game.serialize())?;
//! assert_eq!(restored, game);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod contracts;
mod error;
mod game;
mod invariants;
mod rules;
mod snapshot;
mod types;

pub use contracts::{CellIsOpen, Contract, Move, MoveContract, PlayersTurn};
pub use error::{MalformedSnapshot, MoveError};
pub use game::Game;
pub use invariants::{
    BalancedMarks, GameInvariants, Invariant, InvariantSet, InvariantViolation, TurnMatchesMarks,
    describe_violations,
};
pub use rules::{WIN_LINES, is_full, mark_counts, winner};
pub use snapshot::VERSION_TAG;
pub use types::{Cell, Coord, Grid, Player};
