//! Tests for the play session lifecycle against a store.

use tictactoe::{
    Game, MemoryStore, Player, ResumeOutcome, Session, SnapshotStore, TapOutcome,
};

fn play(session: &mut Session, moves: &[(usize, usize)]) {
    for &(row, col) in moves {
        assert_ne!(session.tap(row, col), TapOutcome::Ignored, "tap {row},{col}");
    }
}

#[test]
fn test_suspend_then_resume_restores_game() {
    let mut store = MemoryStore::new();
    let mut session = Session::new(true, "GAME");
    play(&mut session, &[(0, 0), (1, 1), (0, 1)]);
    session.suspend(&mut store).expect("Suspend failed");

    let mut resumed = Session::new(true, "GAME");
    let outcome = resumed.resume(&mut store).expect("Resume failed");
    assert_eq!(outcome, ResumeOutcome::Restored);
    assert_eq!(resumed.game(), session.game());
    assert_eq!(resumed.game().current_turn(), Player::O);
}

#[test]
fn test_resume_with_nothing_saved() {
    let mut store = MemoryStore::new();
    let mut session = Session::new(true, "GAME");
    let outcome = session.resume(&mut store).expect("Resume failed");
    assert_eq!(outcome, ResumeOutcome::NothingSaved);
    assert_eq!(session.game(), &Game::new());
}

#[test]
fn test_auto_save_off_clears_slot() {
    let mut store = MemoryStore::new();
    store.save("GAME", "ttt1:X........:O").expect("Save failed");

    let mut session = Session::new(false, "GAME");
    let outcome = session.resume(&mut store).expect("Resume failed");
    assert_eq!(outcome, ResumeOutcome::AutoSaveOff);
    assert_eq!(session.game().move_count(), 0);
    assert_eq!(store.load("GAME").expect("Load failed"), None);

    session.tap(1, 1);
    session.suspend(&mut store).expect("Suspend failed");
    assert_eq!(store.load("GAME").expect("Load failed"), None);
}

#[test]
fn test_malformed_save_discarded() {
    let mut store = MemoryStore::new();
    store.save("GAME", "not a game").expect("Save failed");

    let mut session = Session::new(true, "GAME");
    let outcome = session.resume(&mut store).expect("Resume failed");
    assert!(matches!(outcome, ResumeOutcome::Discarded(_)));
    assert_eq!(session.game(), &Game::new());
    assert_eq!(store.load("GAME").expect("Load failed"), None);
}

#[test]
fn test_slots_are_independent() {
    let mut store = MemoryStore::new();
    let mut first = Session::new(true, "A");
    first.tap(0, 0);
    first.suspend(&mut store).expect("Suspend failed");

    let mut second = Session::new(true, "B");
    assert_eq!(
        second.resume(&mut store).expect("Resume failed"),
        ResumeOutcome::NothingSaved
    );
}

#[test]
fn test_win_reports_player_who_moved() {
    let mut session = Session::new(true, "GAME");
    play(&mut session, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
    assert_eq!(session.tap(0, 2), TapOutcome::Won(Player::X));
    assert!(!session.accepting_input());
    assert_eq!(session.status_line(), "Hooray! X won!");
    assert_eq!(session.tap(2, 2), TapOutcome::Ignored);
}

#[test]
fn test_o_can_win() {
    let mut session = Session::new(true, "GAME");
    play(&mut session, &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2)]);
    assert_eq!(session.tap(1, 2), TapOutcome::Won(Player::O));
    assert_eq!(session.status_line(), "Hooray! O won!");
}

#[test]
fn test_draw() {
    // X O X
    // X O O
    // O X X
    let mut session = Session::new(true, "GAME");
    play(
        &mut session,
        &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0)],
    );
    assert_eq!(session.tap(2, 2), TapOutcome::Draw);
    assert_eq!(session.status_line(), "Draw!");
}

#[test]
fn test_restart_reenables_board() {
    let mut session = Session::new(true, "GAME");
    play(&mut session, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    assert!(!session.accepting_input());

    session.restart();
    assert!(session.accepting_input());
    assert_eq!(session.game(), &Game::new());
}

#[test]
fn test_instance_state_keeps_finished_game_disabled() {
    let mut session = Session::new(false, "GAME");
    play(&mut session, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    let state = session.save_instance_state();

    let mut recreated = Session::new(false, "GAME");
    recreated
        .restore_instance_state(&state)
        .expect("Restore failed");
    assert_eq!(recreated.game(), session.game());
    assert!(!recreated.accepting_input());
    assert_eq!(recreated.status_line(), "Hooray! X won!");
}

#[test]
fn test_bad_instance_state_starts_fresh() {
    let mut session = Session::new(true, "GAME");
    session.tap(1, 1);
    let result = session.restore_instance_state("ttt1:XXX......:O");
    assert!(result.is_err());
    assert_eq!(session.game(), &Game::new());
}
