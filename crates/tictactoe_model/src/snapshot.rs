//! Versioned text snapshot of a [`Game`].
//!
//! Version 1 layout: `ttt1:<cells>:<turn>`
//!
//! - `<cells>` is nine symbols in row-major order: `.` empty, `X`, `O`
//! - `<turn>` is `X` or `O`
//!
//! ```text
//! ttt1:XO..X....:O
//! ```
//!
//! Decoding only accepts grid/turn pairs that satisfy the mark-count and
//! turn invariants (see [`crate::invariants`]). Every reachable game
//! passes, but so do a few grids where play went on past a win, since
//! the model itself does not stop moves after one.

use crate::Game;
use crate::error::MalformedSnapshot;
use crate::invariants::{GameInvariants, InvariantSet, describe_violations};
use crate::types::{Cell, Grid, Player};
use tracing::{debug, instrument};

/// Tag identifying the current format version.
pub const VERSION_TAG: &str = "ttt1";

const FIELD_SEPARATOR: char = ':';
const EMPTY_SYMBOL: char = '.';

fn cell_symbol(cell: Cell) -> char {
    match cell {
        Cell::Empty => EMPTY_SYMBOL,
        Cell::Marked(Player::X) => 'X',
        Cell::Marked(Player::O) => 'O',
    }
}

fn player_symbol(player: Player) -> char {
    match player {
        Player::X => 'X',
        Player::O => 'O',
    }
}

fn parse_cell(symbol: char) -> Option<Cell> {
    match symbol {
        EMPTY_SYMBOL => Some(Cell::Empty),
        'X' => Some(Cell::Marked(Player::X)),
        'O' => Some(Cell::Marked(Player::O)),
        _ => None,
    }
}

/// Encodes a game as a version 1 snapshot.
#[instrument(skip(game))]
pub fn encode(game: &Game) -> String {
    let mut out = String::with_capacity(VERSION_TAG.len() + 13);
    out.push_str(VERSION_TAG);
    out.push(FIELD_SEPARATOR);
    out.extend(game.grid().iter().flatten().map(|cell| cell_symbol(*cell)));
    out.push(FIELD_SEPARATOR);
    out.push(player_symbol(game.current_turn()));
    out
}

/// Decodes a snapshot produced by [`encode`].
///
/// # Errors
///
/// Returns [`MalformedSnapshot`] if the version tag is unknown, a field is
/// missing or extra, a symbol is not recognised, or the grid/turn pair
/// breaks the mark-count or turn invariants.
#[instrument(skip(text), fields(len = text.len()))]
pub fn decode(text: &str) -> Result<Game, MalformedSnapshot> {
    let trimmed = text.trim();
    let mut fields = trimmed.split(FIELD_SEPARATOR);

    let version = fields.next().unwrap_or_default();
    if version != VERSION_TAG {
        return Err(MalformedSnapshot::new(
            format!("unsupported version tag {version:?}"),
            text,
        ));
    }

    let cells = fields
        .next()
        .ok_or_else(|| MalformedSnapshot::new("missing cell field", text))?;
    let turn = fields
        .next()
        .ok_or_else(|| MalformedSnapshot::new("missing turn field", text))?;
    if fields.next().is_some() {
        return Err(MalformedSnapshot::new("unexpected trailing field", text));
    }

    let symbols: Vec<char> = cells.chars().collect();
    if symbols.len() != 9 {
        return Err(MalformedSnapshot::new(
            format!("expected 9 cells, found {}", symbols.len()),
            text,
        ));
    }

    let mut grid = Grid::default();
    for (i, symbol) in symbols.into_iter().enumerate() {
        grid[i / 3][i % 3] = parse_cell(symbol).ok_or_else(|| {
            MalformedSnapshot::new(format!("unknown cell symbol {symbol:?}"), text)
        })?;
    }

    let current_turn = match turn {
        "X" => Player::X,
        "O" => Player::O,
        other => {
            return Err(MalformedSnapshot::new(
                format!("unknown turn symbol {other:?}"),
                text,
            ));
        }
    };

    let game = Game::from_parts(grid, current_turn);
    GameInvariants::check_all(&game).map_err(|violations| {
        MalformedSnapshot::new(
            format!("impossible state: {}", describe_violations(&violations)),
            text,
        )
    })?;

    debug!(turn = %current_turn, "Snapshot decoded");
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty_game() {
        assert_eq!(encode(&Game::new()), "ttt1:.........:X");
    }

    #[test]
    fn test_encode_after_moves() {
        let mut game = Game::new();
        game.apply_move(0, 0, Player::X).unwrap();
        game.apply_move(0, 1, Player::O).unwrap();
        game.apply_move(1, 1, Player::X).unwrap();
        assert_eq!(encode(&game), "ttt1:XO..X....:O");
    }

    #[test]
    fn test_decode_ignores_surrounding_whitespace() {
        let game = decode("  ttt1:X........:O\n").unwrap();
        assert_eq!(game.cell(0, 0), Some(Cell::Marked(Player::X)));
        assert_eq!(game.current_turn(), Player::O);
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        let cases = [
            "",
            "ttt2:.........:X",
            "ttt1",
            "ttt1:.........",
            "ttt1:........:X",
            "ttt1:..........:X",
            "ttt1:....Z....:X",
            "ttt1:.........:Z",
            "ttt1:.........:X:extra",
            // O moved first
            "ttt1:O........:O",
            // X moved twice in a row
            "ttt1:XX.......:O",
            // turn disagrees with mark counts
            "ttt1:X........:X",
        ];
        for case in cases {
            assert!(decode(case).is_err(), "accepted {case:?}");
        }
    }

    #[test]
    fn test_decode_accepts_play_past_a_win() {
        // X completed the top row, then O was allowed to complete the middle one.
        let mut game = Game::new();
        for (row, col, player) in [
            (0, 0, Player::X),
            (1, 0, Player::O),
            (0, 1, Player::X),
            (1, 1, Player::O),
            (0, 2, Player::X),
            (1, 2, Player::O),
        ] {
            game.apply_move(row, col, player).unwrap();
        }

        let text = encode(&game);
        assert_eq!(text, "ttt1:XXXOOO...:X");
        assert_eq!(decode(&text).unwrap(), game);
    }

    #[test]
    fn test_error_reports_reason() {
        let err = decode("ttt1:....Z....:X").unwrap_err();
        assert!(err.reason.contains("'Z'"));
        assert_eq!(err.input, "ttt1:....Z....:X");
    }
}
