//! Contract-based validation for moves.
//!
//! Contracts formalize Hoare-style reasoning: {P} action {Q}.
//! Preconditions are always checked; [`Game::apply_move`] checks the
//! postcondition in debug builds.

use crate::error::MoveError;
use crate::invariants::{GameInvariants, InvariantSet, describe_violations};
use crate::types::{Coord, Player};
use crate::Game;
use tracing::{instrument, warn};

/// A requested move: `player` marks the cell at `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Requested row, unchecked.
    pub row: usize,
    /// Requested column, unchecked.
    pub col: usize,
    /// Player making the move.
    pub player: Player,
}

impl Move {
    /// Creates a new move request.
    pub fn new(row: usize, col: usize, player: Player) -> Self {
        Self { row, col, player }
    }
}

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: the cell lies on the grid and is empty.
pub struct CellIsOpen;

impl CellIsOpen {
    /// Returns the checked coordinate of an open cell.
    #[instrument(skip(game))]
    pub fn check(mv: &Move, game: &Game) -> Result<Coord, MoveError> {
        let coord = Coord::new(mv.row, mv.col).ok_or(MoveError::OutOfBounds {
            row: mv.row,
            col: mv.col,
        })?;
        if game.grid()[coord.row()][coord.col()].is_empty() {
            Ok(coord)
        } else {
            Err(MoveError::CellOccupied(coord))
        }
    }
}

/// Precondition: it must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`MoveError::WrongPlayer`] unless `mv.player` is to move.
    #[instrument(skip(game))]
    pub fn check(mv: &Move, game: &Game) -> Result<(), MoveError> {
        if mv.player != game.current_turn() {
            Err(MoveError::WrongPlayer(mv.player))
        } else {
            Ok(())
        }
    }
}

/// Contract for move actions.
///
/// Preconditions:
/// - Cell is on the grid and empty
/// - It is the player's turn
///
/// Postconditions:
/// - No previously marked cell changed
/// - Exactly one new mark was placed
/// - Game invariants still hold
pub struct MoveContract;

impl Contract<Game, Move> for MoveContract {
    fn pre(game: &Game, action: &Move) -> Result<(), MoveError> {
        CellIsOpen::check(action, game)?;
        PlayersTurn::check(action, game)
    }

    fn post(before: &Game, after: &Game) -> Result<(), MoveError> {
        let cells = before.grid().iter().flatten().zip(after.grid().iter().flatten());

        let mut added = 0;
        for (old, new) in cells {
            match (old, new) {
                (a, b) if a == b => {}
                (old, _) if !old.is_empty() => {
                    warn!(?old, ?new, "Marked cell changed");
                    return Err(MoveError::InvariantViolation(
                        "a marked cell changed".to_string(),
                    ));
                }
                _ => added += 1,
            }
        }
        if added != 1 {
            warn!(added, "Move did not place exactly one mark");
            return Err(MoveError::InvariantViolation(format!(
                "expected one new mark, found {added}"
            )));
        }

        GameInvariants::check_all(after).map_err(|violations| {
            MoveError::InvariantViolation(describe_violations(&violations))
        })
    }
}
