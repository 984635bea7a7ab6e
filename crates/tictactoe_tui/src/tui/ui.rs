//! Stateless UI rendering for tic-tac-toe.

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell as TableCell, Paragraph, Row, Table},
};
use tictactoe_engine::{Cell, GameState, GameStatus, Mark, Position};

use super::app::App;

const HELP: &str = "1-9/Enter: move  ←↑→↓: cursor  u: undo  n: new game  r: reset all  \
                    a: toggle AI  x/o: rename  q: quit";

/// Renders the whole screen from a state snapshot.
pub fn draw(frame: &mut Frame, state: &GameState, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Status
            Constraint::Min(12),   // Board and scores
            Constraint::Length(3), // Help
        ])
        .split(area);

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_status(frame, chunks[1], state, app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    draw_board(frame, body[0], state, app.cursor());

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(body[1]);
    draw_scores(frame, side[0], state, app);
    draw_history(frame, side[1], state);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}

fn draw_status(frame: &mut Frame, area: Rect, state: &GameState, app: &App) {
    let mut spans = vec![Span::styled(
        state.status_message(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )];
    if let Some(notice) = app.notice() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice.to_string(), Style::default().fg(Color::Red)));
    }

    let status = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn draw_board(frame: &mut Frame, area: Rect, state: &GameState, cursor: Position) {
    let board_area = center_rect(area, 23, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    let winning = state.winning_line();
    for (row, chunk) in [0, 2, 4].into_iter().enumerate() {
        let positions = [row * 3, row * 3 + 1, row * 3 + 2].map(Position::from_index);
        draw_row(frame, rows[chunk], state, cursor, winning.as_ref(), positions);
        if chunk < 4 {
            draw_separator(frame, rows[chunk + 1]);
        }
    }
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    state: &GameState,
    cursor: Position,
    winning: Option<&[Position; 3]>,
    positions: [Option<Position>; 3],
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(1),
            Constraint::Length(7),
            Constraint::Length(1),
            Constraint::Length(7),
        ])
        .split(area);

    for (i, pos) in positions.into_iter().flatten().enumerate() {
        let highlighted = winning.is_some_and(|line| line.contains(&pos));
        draw_cell(frame, cols[i * 2], state, cursor, highlighted, pos);
        if i < 2 {
            let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, cols[i * 2 + 1]);
        }
    }
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    state: &GameState,
    cursor: Position,
    highlighted: bool,
    pos: Position,
) {
    let (symbol, base_style) = match state.board().get(pos) {
        Cell::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Cell::Occupied(Mark::X) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Cell::Occupied(Mark::O) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if highlighted {
        base_style.fg(Color::Green)
    } else {
        base_style
    };
    let style = if pos == cursor && !state.status().is_over() {
        style.bg(Color::White).fg(Color::Black)
    } else {
        style
    };

    let paragraph = Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(format!(" {symbol} "), style)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("───────┼───────┼───────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn player_line(state: &GameState, app: &App, mark: Mark) -> Line<'static> {
    let name = match app.editing() {
        Some(edit) if edit.mark() == mark => Span::styled(
            format!("{}_", edit.buffer()),
            Style::default().add_modifier(Modifier::UNDERLINED),
        ),
        _ => Span::raw(state.names().display_name(mark)),
    };
    let ai = if mark == Mark::O && state.ai_enabled() {
        " (AI)"
    } else {
        ""
    };
    Line::from(vec![
        Span::styled(format!("{mark}: "), Style::default().add_modifier(Modifier::BOLD)),
        name,
        Span::raw(format!("{ai}  {}", state.scores().wins(mark))),
    ])
}

fn draw_scores(frame: &mut Frame, area: Rect, state: &GameState, app: &App) {
    let lines = vec![
        player_line(state, app, Mark::X),
        player_line(state, app, Mark::O),
        Line::raw(format!("Draws: {}", state.scores().draws())),
        Line::raw(format!("Games: {}", state.scores().total())),
    ];
    let scores = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Score"));
    frame.render_widget(scores, area);
}

fn draw_history(frame: &mut Frame, area: Rect, state: &GameState) {
    let total = state.history().len();
    let rows: Vec<Row> = state
        .history()
        .iter()
        .enumerate()
        .rev()
        .map(|(i, entry)| {
            let result = match entry.winner() {
                Some(mark) => format!("{} won", state.names().display_name(*mark)),
                None => "Draw".to_string(),
            };
            let finished = entry.finished_at().with_timezone(&Local).format("%H:%M:%S");
            Row::new(vec![
                TableCell::from(format!("#{}", i + 1)),
                TableCell::from(result),
                TableCell::from(finished.to_string()),
            ])
        })
        .collect();

    let title = format!("History ({total})");
    let table = Table::new(
        rows,
        [Constraint::Length(5), Constraint::Min(10), Constraint::Length(8)],
    )
    .header(
        Row::new(vec!["Game", "Result", "Time"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
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

/// Game status as a short label for the log.
pub fn status_label(status: &GameStatus) -> &'static str {
    match status {
        GameStatus::Playing => "playing",
        GameStatus::Won(_) => "won",
        GameStatus::Draw => "draw",
    }
}
