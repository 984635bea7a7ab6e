//! First-class intents and move outcomes.
//!
//! Intents are what the presentation layer asks for. Outcomes describe what
//! the engine did with a move, including why it ignored one.

use crate::{Mark, Position, Win};
use serde::{Deserialize, Serialize};

/// A request from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Place the current mark at a board index (0-8).
    Click(usize),
    /// Take back the most recent move.
    Undo,
    /// Clear the board and start a new game.
    ResetGame,
    /// Start a new game and wipe scores and history.
    ResetStats,
    /// Turn the random opponent for O on or off.
    SetAiEnabled(bool),
    /// Rename a player.
    SetPlayerName(Mark, String),
}

/// Why a move was ignored.
///
/// None of these are errors; the board is simply left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Rejection {
    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// The index does not name a cell.
    #[display("Cell {} is off the board", _0)]
    OutOfBounds(usize),

    /// The cell already holds a mark.
    #[display("{} is already taken", _0)]
    CellOccupied(Position),
}

/// Result of asking the engine to apply a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Nothing changed.
    Ignored(Rejection),
    /// The mark was placed and the game goes on.
    Continued,
    /// The mark completed a line.
    Won(Win),
    /// The mark filled the board without completing a line.
    Drawn,
}

impl MoveOutcome {
    /// Returns true if the move was placed on the board.
    pub fn is_applied(&self) -> bool {
        !matches!(self, MoveOutcome::Ignored(_))
    }

    /// Returns true if the move ended the game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MoveOutcome::Won(_) | MoveOutcome::Drawn)
    }
}
