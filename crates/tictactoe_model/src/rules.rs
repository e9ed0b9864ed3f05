//! Win and full-grid detection.
//!
//! Pure functions over a [`Grid`]. Draw detection is deliberately absent:
//! a full grid with no winner is a draw, and callers infer that themselves.

use crate::types::{Coord, Grid, Player};
use tracing::instrument;

const fn at(row: usize, col: usize) -> Coord {
    Coord::ALL[row * 3 + col]
}

/// The eight win lines: three rows, three columns, two diagonals.
pub const WIN_LINES: [[Coord; 3]; 8] = [
    // Rows
    [at(0, 0), at(0, 1), at(0, 2)],
    [at(1, 0), at(1, 1), at(1, 2)],
    [at(2, 0), at(2, 1), at(2, 2)],
    // Columns
    [at(0, 0), at(1, 0), at(2, 0)],
    [at(0, 1), at(1, 1), at(2, 1)],
    [at(0, 2), at(1, 2), at(2, 2)],
    // Diagonals
    [at(0, 0), at(1, 1), at(2, 2)],
    [at(0, 2), at(1, 1), at(2, 0)],
];

/// Returns the owner of the first complete win line, if any.
#[instrument(skip(grid))]
pub fn winner(grid: &Grid) -> Option<Player> {
    WIN_LINES.iter().find_map(|[a, b, c]| {
        let owner = grid[a.row()][a.col()].player()?;
        let b = grid[b.row()][b.col()].player();
        let c = grid[c.row()][c.col()].player();
        (b == Some(owner) && c == Some(owner)).then_some(owner)
    })
}

/// Checks if every cell is marked.
pub fn is_full(grid: &Grid) -> bool {
    grid.iter().flatten().all(|cell| !cell.is_empty())
}

/// Counts the marks each player has on the grid, as `(x, o)`.
pub fn mark_counts(grid: &Grid) -> (usize, usize) {
    grid.iter()
        .flatten()
        .fold((0, 0), |(x, o), cell| match cell.player() {
            Some(Player::X) => (x + 1, o),
            Some(Player::O) => (x, o + 1),
            None => (x, o),
        })
}
