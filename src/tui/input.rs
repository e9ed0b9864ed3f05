//! Keyboard navigation over the grid.

use crossterm::event::KeyCode;
use tictactoe_model::Coord;

/// Moves the cursor one cell for arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Coord, key: KeyCode) -> Coord {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Up => Coord::new(row.wrapping_sub(1), col),
        KeyCode::Down => Coord::new(row + 1, col),
        KeyCode::Left => Coord::new(row, col.wrapping_sub(1)),
        KeyCode::Right => Coord::new(row, col + 1),
        _ => None,
    };
    target.unwrap_or(cursor)
}

/// Maps digit keys `1`-`9` to cells in reading order.
pub fn digit_cell(key: KeyCode) -> Option<Coord> {
    match key {
        KeyCode::Char(c @ '1'..='9') => Coord::from_index(c as usize - '1' as usize),
        _ => None,
    }
}
