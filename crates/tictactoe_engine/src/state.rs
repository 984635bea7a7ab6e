//! Game state snapshot: board, turn, status, scores and histories.

use crate::{Board, Line, Mark, Position, Rejection, Win};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Default display name for X.
pub const DEFAULT_PLAYER_X: &str = "Pushpa Raj";
/// Default display name for O.
pub const DEFAULT_PLAYER_O: &str = "Appanna";

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    #[default]
    Playing,
    /// A line was completed. The line travels with the status.
    Won(Win),
    /// The board filled up with no line.
    Draw,
}

impl GameStatus {
    /// Returns true once the game has been won or drawn.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }

    /// The winning mark, if any.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameStatus::Won(win) => Some(win.winner()),
            _ => None,
        }
    }
}

/// Win and draw counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    x: u32,
    o: u32,
    draws: u32,
}

impl Scores {
    /// Games won by X.
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Games won by O.
    pub fn o(&self) -> u32 {
        self.o
    }

    /// Drawn games.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Games won by `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Total finished games.
    pub fn total(&self) -> u32 {
        self.x + self.o + self.draws
    }

    /// Counts one finished game; `None` is a draw.
    pub(crate) fn record(&mut self, winner: Option<Mark>) {
        match winner {
            Some(Mark::X) => self.x += 1,
            Some(Mark::O) => self.o += 1,
            None => self.draws += 1,
        }
    }
}

/// Record of one finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct HistoryEntry {
    /// Winner, or `None` for a draw.
    winner: Option<Mark>,
    /// Final position.
    board: Board,
    /// When the game ended.
    finished_at: DateTime<Utc>,
}

/// Board and turn captured just before a move, for undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct MoveSnapshot {
    /// Board before the move.
    board: Board,
    /// Mark that was about to move.
    next: Mark,
}

/// Display names for both marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlayerNames {
    /// Name for X.
    x: String,
    /// Name for O.
    o: String,
}

impl PlayerNames {
    /// Creates a name pair.
    pub fn new(x: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            o: o.into(),
        }
    }

    /// Name as entered for `mark`.
    pub fn get(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
        }
    }

    /// Name to show for `mark`; a blank name falls back to the mark itself.
    pub fn display_name(&self, mark: Mark) -> String {
        let name = self.get(mark).trim();
        if name.is_empty() {
            mark.to_string()
        } else {
            name.to_string()
        }
    }

    pub(crate) fn set(&mut self, mark: Mark, name: String) {
        match mark {
            Mark::X => self.x = name,
            Mark::O => self.o = name,
        }
    }
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_X, DEFAULT_PLAYER_O)
    }
}

/// Complete game state.
///
/// Observers receive clones of this value after every transition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) next: Mark,
    pub(crate) status: GameStatus,
    pub(crate) scores: Scores,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) moves: Vec<MoveSnapshot>,
    pub(crate) ai_enabled: bool,
    pub(crate) names: PlayerNames,
}

impl GameState {
    /// Fresh state with the given names.
    pub fn new(names: PlayerNames, ai_enabled: bool) -> Self {
        Self {
            names,
            ai_enabled,
            ..Self::default()
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark that moves next.
    pub fn next(&self) -> Mark {
        self.next
    }

    /// Game status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Winning line, present exactly when the game is won.
    pub fn winning_line(&self) -> Option<Line> {
        match self.status {
            GameStatus::Won(win) => Some(win.line()),
            _ => None,
        }
    }

    /// Score counters.
    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// Finished games, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Undo stack, oldest first.
    pub fn moves(&self) -> &[MoveSnapshot] {
        &self.moves
    }

    /// How many moves can be undone.
    pub fn undo_depth(&self) -> usize {
        self.moves.len()
    }

    /// Whether O is played by the random opponent.
    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    /// Player display names.
    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    /// Checks whether a move at `index` would be accepted.
    pub fn check_move(&self, index: usize) -> Result<Position, Rejection> {
        if self.status.is_over() {
            return Err(Rejection::GameOver);
        }
        let pos = Position::from_index(index).ok_or(Rejection::OutOfBounds(index))?;
        if !self.board.is_empty(pos) {
            return Err(Rejection::CellOccupied(pos));
        }
        Ok(pos)
    }

    /// One-line description of where the game stands.
    pub fn status_message(&self) -> String {
        match self.status {
            GameStatus::Won(win) => {
                format!("Player {} wins!", self.names.display_name(win.winner()))
            }
            GameStatus::Draw => "It's a draw!".to_string(),
            GameStatus::Playing => format!("Next player: {}", self.names.display_name(self.next)),
        }
    }
}
