//! Stateless UI rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use tictactoe_model::{Cell, Coord, Game, Player, WIN_LINES};

use super::app::{App, Screen};

/// Screen areas of the nine cells, indexed `[row][col]`.
pub type CellAreas = [[Rect; 3]; 3];

const CELL_WIDTH: u16 = 11;
const CELL_HEIGHT: u16 = 3;

/// Renders the current screen and returns where the cells were drawn.
pub fn draw(frame: &mut Frame, app: &App) -> CellAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Body
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let (cells, help) = match app.screen() {
        Screen::Board => {
            let cells = cell_areas(chunks[1]);
            draw_board(frame, &cells, app);
            (
                cells,
                "←↑↓→ move | Enter/1-9/click: play | r: restart | s: settings | a: about | q: quit",
            )
        }
        Screen::Settings => {
            draw_settings(frame, chunks[1], app);
            (CellAreas::default(), "←→ / Enter: toggle | Esc: back")
        }
        Screen::About => {
            let about = Paragraph::new(crate::ABOUT)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("About Tic Tac Toe"));
            frame.render_widget(about, center_rect(chunks[1], 50, 7));
            (CellAreas::default(), "Any key: back")
        }
    };

    let status = Paragraph::new(app.status())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);

    cells
}

/// Lays out the nine cells centred in `area`, separated by one-cell gutters.
pub fn cell_areas(area: Rect) -> CellAreas {
    let board = center_rect(area, CELL_WIDTH * 3 + 2, CELL_HEIGHT * 3 + 2);
    let mut cells = CellAreas::default();
    for coord in Coord::ALL {
        let x = board.x + coord.col() as u16 * (CELL_WIDTH + 1);
        let y = board.y + coord.row() as u16 * (CELL_HEIGHT + 1);
        cells[coord.row()][coord.col()] =
            Rect::new(x, y, CELL_WIDTH, CELL_HEIGHT).intersection(area);
    }
    cells
}

/// Returns the cell under screen position `(x, y)`, if any.
pub fn cell_at(cells: &CellAreas, x: u16, y: u16) -> Option<Coord> {
    Coord::ALL
        .into_iter()
        .find(|c| cells[c.row()][c.col()].contains(Position::new(x, y)))
}

fn draw_board(frame: &mut Frame, cells: &CellAreas, app: &App) {
    let game = app.session().game();
    let winning = winning_line(game);
    let disabled = !app.session().accepting_input();

    for coord in Coord::ALL {
        let area = cells[coord.row()][coord.col()];
        if area.is_empty() {
            continue;
        }

        let cell = game.grid()[coord.row()][coord.col()];
        let mut style = match cell {
            Cell::Empty => Style::default().fg(Color::DarkGray),
            Cell::Marked(Player::X) => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            Cell::Marked(Player::O) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        };
        if winning.is_some_and(|line| line.contains(&coord)) {
            style = style.fg(Color::Green);
        } else if disabled {
            style = style.add_modifier(Modifier::DIM);
        }
        if coord == app.cursor() && !disabled {
            style = style.bg(Color::White).fg(Color::Black);
        }

        let text = match game.cell_text(coord.row(), coord.col()) {
            "" => (coord.index() + 1).to_string(),
            mark => mark.to_string(),
        };
        let border = if coord == app.cursor() { Color::White } else { Color::DarkGray };
        let paragraph = Paragraph::new(Line::from(Span::styled(text, style)))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            );
        frame.render_widget(paragraph, area);
    }
}

fn draw_settings(frame: &mut Frame, area: Rect, app: &App) {
    let auto_save = if app.session().auto_save() { "On" } else { "Off" };
    let items = vec![
        ListItem::new(format!("Auto-save game    [ {} ]", auto_save)),
        ListItem::new(format!(
            "Save file          {}",
            app.settings().store_path().display()
        ))
        .style(Style::default().fg(Color::DarkGray)),
    ];

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Settings"))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(0));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn winning_line(game: &Game) -> Option<[Coord; 3]> {
    let winner = game.winner()?;
    WIN_LINES.into_iter().find(|line| {
        line.iter()
            .all(|c| game.grid()[c.row()][c.col()] == Cell::Marked(winner))
    })
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
