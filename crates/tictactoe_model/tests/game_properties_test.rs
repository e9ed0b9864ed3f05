//! Behavioural properties of the game model.

use std::collections::HashSet;

use tictactoe_model::{Cell, Coord, Game, MoveError, Player, WIN_LINES};

/// Every game reachable by legal play that stops at the first win.
fn reachable_games() -> HashSet<Game> {
    let mut seen = HashSet::new();
    let mut stack = vec![Game::new()];
    while let Some(game) = stack.pop() {
        if !seen.insert(game.clone()) || game.check_win() {
            continue;
        }
        for coord in game.valid_moves() {
            let mut next = game.clone();
            next.apply_move(coord.row(), coord.col(), game.current_turn())
                .expect("valid move");
            stack.push(next);
        }
    }
    seen
}

#[test]
fn test_every_cell_valid_on_empty_grid_then_taken() {
    for coord in Coord::ALL {
        let mut game = Game::new();
        assert!(game.is_valid_move(coord.row(), coord.col()));
        game.apply_move(coord.row(), coord.col(), Player::X).unwrap();
        assert!(!game.is_valid_move(coord.row(), coord.col()));
    }
}

#[test]
fn test_out_of_range_is_never_valid() {
    let game = Game::new();
    assert!(!game.is_valid_move(3, 0));
    assert!(!game.is_valid_move(0, 3));
    assert!(!game.is_valid_move(usize::MAX, usize::MAX));
}

#[test]
fn test_turn_alternates_strictly() {
    let mut game = Game::new();
    // Fills the grid without ever completing a line.
    let order = [(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)];
    for (n, (row, col)) in order.into_iter().enumerate() {
        assert_eq!(game.current_turn() == Player::X, n % 2 == 0);
        game.apply_move(row, col, game.current_turn()).unwrap();
    }
    assert_eq!(game.current_turn(), Player::O);
    assert!(game.is_full());
    assert!(!game.check_win(), "stalemate board must not win");
}

#[test]
fn test_wrong_player_rejected() {
    let mut game = Game::new();
    assert_eq!(
        game.apply_move(0, 0, Player::O),
        Err(MoveError::WrongPlayer(Player::O))
    );
    assert_eq!(game, Game::new());
}

#[test]
fn test_each_win_line_detected() {
    for line in WIN_LINES {
        let mut game = Game::new();
        let filler: Vec<Coord> = game
            .valid_moves()
            .into_iter()
            .filter(|c| !line.contains(c))
            .collect();

        // X takes the line, O plays elsewhere, avoiding an early O line.
        let mut spare = filler.into_iter();
        for (i, coord) in line.iter().enumerate() {
            assert!(!game.check_win());
            game.apply_move(coord.row(), coord.col(), Player::X).unwrap();
            if i < 2 {
                let other = spare.next().unwrap();
                game.apply_move(other.row(), other.col(), Player::O).unwrap();
            }
        }
        assert!(game.check_win(), "line {line:?} not detected");
        assert_eq!(game.winner(), Some(Player::X));
    }
}

#[test]
fn test_partial_boards_do_not_win() {
    let mut game = Game::new();
    game.apply_move(0, 0, Player::X).unwrap();
    game.apply_move(1, 1, Player::O).unwrap();
    game.apply_move(0, 1, Player::X).unwrap();
    assert!(!game.check_win());
}

#[test]
fn test_top_row_scenario() {
    let mut game = Game::new();
    let moves = [
        (0, 0, Player::X),
        (1, 1, Player::O),
        (0, 1, Player::X),
        (1, 2, Player::O),
    ];
    for (row, col, player) in moves {
        game.apply_move(row, col, player).unwrap();
        assert!(!game.check_win());
    }
    game.apply_move(0, 2, Player::X).unwrap();
    assert!(game.check_win());
    assert_eq!(game.current_turn().opponent(), Player::X);
}

#[test]
fn test_restart_always_yields_empty_x_turn() {
    for mut game in reachable_games().into_iter().take(200) {
        game.restart();
        assert_eq!(game, Game::new());
        assert!(game.grid().iter().flatten().all(|c| *c == Cell::Empty));
        assert_eq!(game.current_turn(), Player::X);
    }
}

#[test]
fn test_round_trip_for_every_reachable_game() {
    let games = reachable_games();
    // 5478 legal positions in tic-tac-toe.
    assert_eq!(games.len(), 5478);

    let mut encodings = HashSet::new();
    for game in &games {
        let text = game.serialize();
        assert_eq!(Game::deserialize(&text).as_ref(), Ok(game));
        assert!(encodings.insert(text), "encoding not injective");
    }
}

#[test]
fn test_serde_goes_through_snapshot() {
    let mut game = Game::new();
    game.apply_move(2, 2, Player::X).unwrap();

    let json = serde_json::to_string(&game).unwrap();
    assert_eq!(json, "\"ttt1:........X:O\"");
    let back: Game = serde_json::from_str(&json).unwrap();
    assert_eq!(back, game);

    assert!(serde_json::from_str::<Game>("\"ttt1:OO.......:X\"").is_err());
}
