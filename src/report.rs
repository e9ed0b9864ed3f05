//! Machine-readable summary of a game.

use serde::{Deserialize, Serialize};
use tictactoe_model::{Game, Player};

/// JSON-friendly view of a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    /// Grid rows top to bottom, `.` for empty cells.
    pub rows: Vec<String>,
    /// Player to move next.
    pub turn: Player,
    /// Owner of a completed line.
    pub winner: Option<Player>,
    /// Full grid with no winner.
    pub draw: bool,
    /// Marks placed so far.
    pub moves: usize,
    /// Snapshot string the game was saved as.
    pub snapshot: String,
}

impl From<&Game> for GameReport {
    fn from(game: &Game) -> Self {
        let rows = (0..3)
            .map(|row| {
                (0..3)
                    .map(|col| match game.cell_text(row, col) {
                        "" => ".",
                        mark => mark,
                    })
                    .collect::<String>()
            })
            .collect();
        let winner = game.winner();

        Self {
            rows,
            turn: game.current_turn(),
            winner,
            draw: winner.is_none() && game.is_full(),
            moves: game.move_count(),
            snapshot: game.serialize(),
        }
    }
}
