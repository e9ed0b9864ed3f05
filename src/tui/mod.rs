//! Terminal UI: the presentation surface over a [`Session`].

mod app;
mod input;
mod ui;

pub use app::{App, AppAction, Screen};
pub use ui::{CellAreas, cell_areas, cell_at};

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info, instrument};

use crate::config::Settings;
use crate::session::Session;
use crate::store::SnapshotStore;

/// Restores the terminal when dropped, including on early return.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    }
}

/// Runs the game until the player quits.
///
/// Resumes from `store` on start and suspends into it on exit.
#[instrument(skip_all, fields(auto_save = *settings.auto_save()))]
pub fn run_tui(
    settings: Settings,
    config_path: Option<PathBuf>,
    store: &mut impl SnapshotStore,
) -> Result<()> {
    let mut session = Session::new(*settings.auto_save(), settings.slot());
    let resumed = session.resume(store).context("Failed to read saved game")?;
    info!(?resumed, "Session resumed");

    let mut app = App::new(session, settings, config_path);
    app.note_resume(&resumed);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let _guard = TerminalGuard;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut app);
    if let Err(e) = &result {
        error!(error = %e, "Event loop failed");
    }

    // Suspend even after a failed loop so the game is not lost.
    app.session()
        .suspend(store)
        .context("Failed to save game")?;
    terminal.show_cursor()?;
    result
}

fn event_loop<B>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B: ratatui::backend::Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let mut cells = CellAreas::default();
    loop {
        terminal.draw(|frame| cells = ui::draw(frame, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if app.handle_key(key) == AppAction::Quit {
                    info!("Leaving event loop");
                    return Ok(());
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some(coord) = cell_at(&cells, mouse.column, mouse.row) {
                    app.handle_click(coord);
                } else {
                    debug!(x = mouse.column, y = mouse.row, "Click outside grid");
                }
            }
            _ => {}
        }
    }
}
