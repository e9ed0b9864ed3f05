//! Play session: owns one game and drives it from taps and lifecycle events.
//!
//! The view never touches the grid directly. It forwards taps and
//! lifecycle callbacks here, then re-renders from [`Session::game`].

use tictactoe_model::{Game, MalformedSnapshot, Player};
use tracing::{debug, info, instrument, warn};

use crate::store::{SnapshotStore, StoreError};

/// Result of a tap on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Board disabled or cell not playable; nothing changed.
    Ignored,
    /// Mark placed, game continues.
    Placed(Player),
    /// Mark placed and it completed a line.
    Won(Player),
    /// Mark placed, grid full, nobody won.
    Draw,
}

/// What [`Session::resume`] found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// A saved game replaced the current one.
    Restored,
    /// Auto-save is on but nothing was saved.
    NothingSaved,
    /// The saved game was unreadable; it was dropped and a fresh game started.
    Discarded(MalformedSnapshot),
    /// Auto-save is off; any saved game was cleared.
    AutoSaveOff,
}

/// A single-screen play session.
#[derive(Debug, Clone)]
pub struct Session {
    game: Game,
    auto_save: bool,
    slot: String,
}

impl Session {
    /// Creates a session with a fresh game.
    #[instrument(skip(slot), fields(slot = %slot.as_ref()))]
    pub fn new(auto_save: bool, slot: impl AsRef<str>) -> Self {
        Self {
            game: Game::new(),
            auto_save,
            slot: slot.as_ref().to_string(),
        }
    }

    /// Current game, read-only.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Whether the game is saved on suspend.
    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    /// Turns auto-save on or off.
    #[instrument(skip(self))]
    pub fn set_auto_save(&mut self, auto_save: bool) {
        self.auto_save = auto_save;
    }

    /// Store slot the game is saved under.
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// False once somebody has won; the board stays disabled until restart.
    pub fn accepting_input(&self) -> bool {
        !self.game.check_win()
    }

    /// Plays the current player's mark at `(row, col)`.
    #[instrument(skip(self))]
    pub fn tap(&mut self, row: usize, col: usize) -> TapOutcome {
        if !self.accepting_input() || !self.game.is_valid_move(row, col) {
            debug!("Tap ignored");
            return TapOutcome::Ignored;
        }

        let player = self.game.current_turn();
        if let Err(e) = self.game.apply_move(row, col, player) {
            warn!(error = %e, "Move rejected after validity check");
            return TapOutcome::Ignored;
        }

        if self.game.check_win() {
            // The player who just moved is the one no longer on turn.
            let winner = self.game.current_turn().opponent();
            info!(%winner, "Hooray! {} won!", winner);
            TapOutcome::Won(winner)
        } else if self.game.is_full() {
            info!("Draw");
            TapOutcome::Draw
        } else {
            TapOutcome::Placed(player)
        }
    }

    /// Starts over with an empty grid and X to move.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.game.restart();
    }

    /// One-line status for the view.
    pub fn status_line(&self) -> String {
        match self.game.winner() {
            Some(winner) => format!("Hooray! {} won!", winner),
            None if self.game.is_full() => "Draw!".to_string(),
            None => format!("{} to move", self.game.current_turn()),
        }
    }

    /// Saves the game if auto-save is on; otherwise clears the slot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be written.
    #[instrument(skip(self, store), fields(auto_save = self.auto_save))]
    pub fn suspend(&self, store: &mut impl SnapshotStore) -> Result<(), StoreError> {
        if self.auto_save {
            store.save(&self.slot, &self.game.serialize())?;
            info!(moves = self.game.move_count(), "Game saved");
        } else {
            store.remove(&self.slot)?;
            debug!("Auto-save off, slot cleared");
        }
        Ok(())
    }

    /// Restores the saved game if auto-save is on; otherwise clears the slot.
    ///
    /// A malformed saved game is removed and the session keeps a fresh game.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read or written.
    #[instrument(skip(self, store), fields(auto_save = self.auto_save))]
    pub fn resume(&mut self, store: &mut impl SnapshotStore) -> Result<ResumeOutcome, StoreError> {
        if !self.auto_save {
            store.remove(&self.slot)?;
            return Ok(ResumeOutcome::AutoSaveOff);
        }

        let Some(text) = store.load(&self.slot)? else {
            debug!("Nothing saved");
            return Ok(ResumeOutcome::NothingSaved);
        };

        match Game::deserialize(&text) {
            Ok(game) => {
                info!(moves = game.move_count(), "Game restored");
                self.game = game;
                Ok(ResumeOutcome::Restored)
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable saved game");
                store.remove(&self.slot)?;
                self.game = Game::new();
                Ok(ResumeOutcome::Discarded(e))
            }
        }
    }

    /// Transient snapshot kept across view re-creation, independent of auto-save.
    pub fn save_instance_state(&self) -> String {
        self.game.serialize()
    }

    /// Restores a snapshot from [`Session::save_instance_state`].
    ///
    /// # Errors
    ///
    /// Returns [`MalformedSnapshot`] if `text` is unreadable; the session
    /// then holds a fresh game.
    #[instrument(skip(self, text))]
    pub fn restore_instance_state(&mut self, text: &str) -> Result<(), MalformedSnapshot> {
        match Game::deserialize(text) {
            Ok(game) => {
                self.game = game;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Instance state unreadable, starting fresh");
                self.game = Game::new();
                Err(e)
            }
        }
    }
}
