//! Error types for the game model.

use crate::types::{Coord, Player};
use derive_more::{Display, Error};

/// Error that can occur when applying a move.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveError {
    /// Row or column outside `0..=2`.
    #[display("Cell ({}, {}) is off the grid", row, col)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The cell is already marked.
    #[display("{} is already occupied", _0)]
    CellOccupied(Coord),

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Player),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

/// Snapshot text that does not decode into a valid grid and turn.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Malformed snapshot {:?}: {}", input, reason)]
pub struct MalformedSnapshot {
    /// What was wrong with the input.
    pub reason: String,
    /// The offending input, truncated.
    pub input: String,
}

impl MalformedSnapshot {
    const MAX_ECHO: usize = 64;

    /// Creates a new error, keeping at most a short prefix of the input.
    pub fn new(reason: impl Into<String>, input: &str) -> Self {
        Self {
            reason: reason.into(),
            input: input.chars().take(Self::MAX_ECHO).collect(),
        }
    }
}
