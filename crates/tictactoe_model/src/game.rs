//! The game model: a 3x3 grid plus whose turn it is.

use crate::contracts::{Contract, Move, MoveContract};
use crate::error::{MalformedSnapshot, MoveError};
use crate::rules;
use crate::snapshot;
use crate::types::{Cell, Coord, Grid, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Complete game state.
///
/// A `Game` has no terminal state of its own. Once [`Game::check_win`]
/// holds the caller stops offering moves.
///
/// Serde goes through the snapshot string, so a deserialized `Game` always
/// satisfies the mark-count and turn invariants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Game {
    grid: Grid,
    current_turn: Player,
}

impl Game {
    /// Creates an empty game with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            grid: Grid::default(),
            current_turn: Player::X,
        }
    }

    /// Builds a game from raw parts without checking invariants.
    pub(crate) fn from_parts(grid: Grid, current_turn: Player) -> Self {
        Self { grid, current_turn }
    }

    /// Returns the grid, indexed `[row][col]`.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the player allowed to move next.
    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    /// Returns the cell at `(row, col)`, or `None` off the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        Coord::new(row, col).map(|c| self.grid[c.row()][c.col()])
    }

    /// Text a cell displays: `"X"`, `"O"`, or `""` for empty or off-grid cells.
    pub fn cell_text(&self, row: usize, col: usize) -> &'static str {
        match self.cell(row, col) {
            Some(Cell::Marked(Player::X)) => "X",
            Some(Cell::Marked(Player::O)) => "O",
            _ => "",
        }
    }

    /// True iff `(row, col)` is on the grid and the cell is empty.
    #[instrument(skip(self))]
    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some_and(Cell::is_empty)
    }

    /// Marks `(row, col)` for `player` and passes the turn.
    ///
    /// # Errors
    ///
    /// - [`MoveError::OutOfBounds`] if the cell is off the grid
    /// - [`MoveError::CellOccupied`] if the cell is already marked
    /// - [`MoveError::WrongPlayer`] if `player` is not to move
    ///
    /// Precondition failures leave the game untouched. Debug builds also
    /// verify the move postcondition and report
    /// [`MoveError::InvariantViolation`].
    #[instrument(skip(self), fields(turn = %self.current_turn))]
    pub fn apply_move(&mut self, row: usize, col: usize, player: Player) -> Result<(), MoveError> {
        let action = Move::new(row, col, player);
        MoveContract::pre(self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.grid[row][col] = Cell::Marked(player);
        self.current_turn = player.opponent();

        #[cfg(debug_assertions)]
        MoveContract::post(&before, self)?;

        debug!(row, col, %player, "Move applied");
        Ok(())
    }

    /// True iff one of the eight win lines is filled by a single player.
    #[instrument(skip(self))]
    pub fn check_win(&self) -> bool {
        self.winner().is_some()
    }

    /// Returns the owner of a completed win line, if any.
    pub fn winner(&self) -> Option<Player> {
        rules::winner(&self.grid)
    }

    /// True iff no empty cell remains.
    pub fn is_full(&self) -> bool {
        rules::is_full(&self.grid)
    }

    /// Empty cells in row-major order.
    pub fn valid_moves(&self) -> Vec<Coord> {
        Coord::ALL
            .into_iter()
            .filter(|c| self.grid[c.row()][c.col()].is_empty())
            .collect()
    }

    /// Number of marks on the grid.
    pub fn move_count(&self) -> usize {
        self.grid.iter().flatten().filter(|c| !c.is_empty()).count()
    }

    /// Clears the grid and gives the turn back to X.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        debug!("Restarting game");
        *self = Self::new();
    }

    /// Encodes the game as a versioned snapshot string.
    pub fn serialize(&self) -> String {
        snapshot::encode(self)
    }

    /// Decodes a snapshot produced by [`Game::serialize`].
    ///
    /// # Errors
    ///
    /// Returns [`MalformedSnapshot`] if `text` is not a valid snapshot or
    /// breaks the mark-count and turn invariants.
    pub fn deserialize(text: &str) -> Result<Self, MalformedSnapshot> {
        snapshot::decode(text)
    }

    #[cfg(test)]
    pub(crate) fn force_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.grid[row][col] = cell;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl std::str::FromStr for Game {
    type Err = MalformedSnapshot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s)
    }
}

impl TryFrom<String> for Game {
    type Error = MalformedSnapshot;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::deserialize(&value)
    }
}

impl From<Game> for String {
    fn from(game: Game) -> Self {
        game.serialize()
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.grid.iter().enumerate() {
            let symbols: Vec<String> = row
                .iter()
                .map(|cell| match cell.player() {
                    Some(player) => player.to_string(),
                    None => " ".to_string(),
                })
                .collect();
            write!(f, " {} ", symbols.join(" | "))?;
            if r < 2 {
                write!(f, "\n---+---+---\n")?;
            }
        }
        Ok(())
    }
}
