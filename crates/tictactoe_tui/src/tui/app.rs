//! View-local state for the terminal UI.
//!
//! Game state lives in the session; the app only tracks what the engine
//! doesn't care about: the cursor, an in-progress name edit and a notice.

use tictactoe_engine::{Intent, Mark, Position};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to send.
    None,
    /// Forward an intent to the session.
    Send(Intent),
    /// Leave the UI.
    Quit,
}

/// A player name being edited in place.
#[derive(Debug, Clone)]
pub struct NameEdit {
    mark: Mark,
    buffer: String,
    original: String,
}

impl NameEdit {
    /// Starts editing with the current name in the buffer.
    pub fn new(mark: Mark, current: String) -> Self {
        Self {
            mark,
            buffer: current.clone(),
            original: current,
        }
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn pop(&mut self) {
        self.buffer.pop();
    }
}

/// Cursor, name editing and transient notices.
#[derive(Debug)]
pub struct App {
    cursor: Position,
    editing: Option<NameEdit>,
    notice: Option<String>,
}

impl App {
    /// Creates an app with the cursor on the center square.
    pub fn new() -> Self {
        Self {
            cursor: Position::Center,
            editing: None,
            notice: None,
        }
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    pub fn editing(&self) -> Option<&NameEdit> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut NameEdit> {
        self.editing.as_mut()
    }

    pub fn start_edit(&mut self, edit: NameEdit) {
        self.notice = None;
        self.editing = Some(edit);
    }

    pub fn finish_edit(&mut self) {
        self.editing = None;
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Clears the notice once the state moves on.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
