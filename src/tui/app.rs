//! Application state and input handling.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tictactoe_model::Coord;
use tracing::{debug, info, instrument, warn};

use super::input::{digit_cell, move_cursor};
use crate::config::Settings;
use crate::session::{ResumeOutcome, Session, TapOutcome};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// The grid.
    Board,
    /// Preferences.
    Settings,
    /// Credits overlay.
    About,
}

/// What the event loop should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Keep running.
    Continue,
    /// Leave the event loop.
    Quit,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    session: Session,
    settings: Settings,
    config_path: Option<PathBuf>,
    cursor: Coord,
    screen: Screen,
    message: Option<String>,
}

impl App {
    /// Creates an app around a session.
    ///
    /// When `config_path` is set, toggled preferences are written back to it.
    pub fn new(session: Session, settings: Settings, config_path: Option<PathBuf>) -> Self {
        Self {
            session,
            settings,
            config_path,
            cursor: Coord::ALL[4],
            screen: Screen::Board,
            message: None,
        }
    }

    /// The play session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Highlighted cell.
    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Showing screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Status bar text: a transient message, else the session status.
    pub fn status(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| self.session.status_line())
    }

    /// Reports what resuming found.
    pub fn note_resume(&mut self, outcome: &ResumeOutcome) {
        self.message = match outcome {
            ResumeOutcome::Restored => Some(format!(
                "Saved game restored. {}",
                self.session.status_line()
            )),
            ResumeOutcome::Discarded(_) => {
                Some("Saved game was unreadable; starting fresh.".to_string())
            }
            ResumeOutcome::NothingSaved | ResumeOutcome::AutoSaveOff => None,
        };
    }

    /// Handles a key press.
    #[instrument(skip(self), fields(screen = ?self.screen))]
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }
        match self.screen {
            Screen::Board => self.handle_board_key(key.code),
            Screen::Settings => self.handle_settings_key(key.code),
            Screen::About => {
                self.screen = Screen::Board;
                AppAction::Continue
            }
        }
    }

    /// Handles a left click on a grid cell.
    #[instrument(skip(self))]
    pub fn handle_click(&mut self, coord: Coord) {
        if self.screen == Screen::Board {
            self.cursor = coord;
            self.tap(coord);
        }
    }

    fn handle_board_key(&mut self, code: KeyCode) -> AppAction {
        match code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, code);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.tap(self.cursor),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.session.restart();
                self.message = Some("Game restarted. X to move".to_string());
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                debug!("Opening settings");
                self.screen = Screen::Settings;
            }
            KeyCode::Char('a') | KeyCode::Char('A') => self.screen = Screen::About,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                info!("Quit requested");
                return AppAction::Quit;
            }
            other => {
                if let Some(coord) = digit_cell(other) {
                    self.cursor = coord;
                    self.tap(coord);
                }
            }
        }
        AppAction::Continue
    }

    fn handle_settings_key(&mut self, code: KeyCode) -> AppAction {
        match code {
            KeyCode::Enter | KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                self.toggle_auto_save();
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('s') => {
                debug!("Leaving settings");
                self.screen = Screen::Board;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn tap(&mut self, coord: Coord) {
        let outcome = self.session.tap(coord.row(), coord.col());
        self.message = match outcome {
            TapOutcome::Ignored if !self.session.accepting_input() => {
                Some(format!("{} Press 'r' to play again.", self.session.status_line()))
            }
            TapOutcome::Ignored => Some(format!("{} is taken.", coord.label())),
            TapOutcome::Placed(_) | TapOutcome::Won(_) | TapOutcome::Draw => None,
        };
    }

    #[instrument(skip(self))]
    fn toggle_auto_save(&mut self) {
        let auto_save = !self.session.auto_save();
        self.session.set_auto_save(auto_save);
        self.settings.set_auto_save(auto_save);
        info!(auto_save, "Toggled auto-save");

        self.message = None;
        if let Some(path) = &self.config_path
            && let Err(e) = self.settings.save_to_file(path)
        {
            warn!(error = %e, "Could not persist settings");
            self.message = Some(format!("Could not save settings: {}", e.message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_model::Player;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(Session::new(true, "GAME"), Settings::default(), None)
    }

    #[test]
    fn test_enter_taps_cursor_cell() {
        let mut app = app();
        assert_eq!(app.handle_key(key(KeyCode::Enter)), AppAction::Continue);
        assert_eq!(app.session().game().cell_text(1, 1), "X");
    }

    #[test]
    fn test_digits_tap_cells() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Char('9')));
        assert_eq!(app.session().game().cell_text(0, 0), "X");
        assert_eq!(app.session().game().cell_text(2, 2), "O");
        assert_eq!(app.cursor(), Coord::ALL[8]);
    }

    #[test]
    fn test_taken_cell_reports_message() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.status(), "Center is taken.");
        assert_eq!(app.session().game().current_turn(), Player::O);
    }

    #[test]
    fn test_board_disabled_after_win() {
        let mut app = app();
        for digit in ['1', '4', '2', '5', '3'] {
            app.handle_key(key(KeyCode::Char(digit)));
        }
        assert_eq!(app.status(), "Hooray! X won!");
        assert!(!app.session().accepting_input());

        app.handle_click(Coord::ALL[8]);
        assert_eq!(app.session().game().cell_text(2, 2), "");
        assert!(app.status().contains("Press 'r'"));

        app.handle_key(key(KeyCode::Char('r')));
        assert!(app.session().accepting_input());
        assert_eq!(app.session().game().move_count(), 0);
    }

    #[test]
    fn test_settings_toggle_auto_save() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.screen(), Screen::Settings);

        app.handle_key(key(KeyCode::Enter));
        assert!(!app.session().auto_save());
        assert!(!*app.settings().auto_save());

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen(), Screen::Board);
    }

    #[test]
    fn test_about_overlay_closes_on_any_key() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.screen(), Screen::About);

        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), AppAction::Continue);
        assert_eq!(app.screen(), Screen::Board);
        assert_eq!(app.session().game().move_count(), 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), AppAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), AppAction::Quit);
    }
}
