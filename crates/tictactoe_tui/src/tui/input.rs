//! Keyboard handling for the board view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tictactoe_engine::{GameState, Intent, Mark, Position};

use super::app::{Action, App, NameEdit};

/// Moves cursor based on arrow keys.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Right if col < 2 => (row, col + 1),
        KeyCode::Left if col > 0 => (row, col - 1),
        KeyCode::Down if row < 2 => (row + 1, col),
        KeyCode::Up if row > 0 => (row - 1, col),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

/// Translates a key press into an action against the current state.
pub fn handle_key(app: &mut App, state: &GameState, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if app.editing().is_some() {
        return handle_name_key(app, key.code);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            app.set_cursor(move_cursor(app.cursor(), key.code));
            Action::None
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            if let Some(pos) = Position::from_index(index) {
                app.set_cursor(pos);
            }
            click(app, state, index)
        }
        KeyCode::Enter | KeyCode::Char(' ') => click(app, state, app.cursor().to_index()),
        KeyCode::Char('u') => {
            if state.undo_depth() == 0 {
                app.set_notice("Nothing to undo");
                Action::None
            } else {
                Action::Send(Intent::Undo)
            }
        }
        KeyCode::Char('n') => Action::Send(Intent::ResetGame),
        KeyCode::Char('r') => Action::Send(Intent::ResetStats),
        KeyCode::Char('a') => Action::Send(Intent::SetAiEnabled(!state.ai_enabled())),
        KeyCode::Char('x') => begin_edit(app, state, Mark::X),
        KeyCode::Char('o') => begin_edit(app, state, Mark::O),
        _ => Action::None,
    }
}

fn click(app: &mut App, state: &GameState, index: usize) -> Action {
    match state.check_move(index) {
        Ok(_) => Action::Send(Intent::Click(index)),
        Err(rejection) => {
            app.set_notice(rejection.to_string());
            Action::None
        }
    }
}

fn begin_edit(app: &mut App, state: &GameState, mark: Mark) -> Action {
    let current = state.names().get(mark).to_string();
    app.start_edit(NameEdit::new(mark, current));
    Action::None
}

fn handle_name_key(app: &mut App, code: KeyCode) -> Action {
    let Some(edit) = app.editing_mut() else {
        return Action::None;
    };
    match code {
        KeyCode::Enter => {
            app.finish_edit();
            Action::None
        }
        KeyCode::Esc => {
            let intent = Intent::SetPlayerName(edit.mark(), edit.original().to_string());
            app.finish_edit();
            Action::Send(intent)
        }
        KeyCode::Backspace => {
            edit.pop();
            Action::Send(Intent::SetPlayerName(edit.mark(), edit.buffer().to_string()))
        }
        KeyCode::Char(c) => {
            edit.push(c);
            Action::Send(Intent::SetPlayerName(edit.mark(), edit.buffer().to_string()))
        }
        _ => Action::None,
    }
}
