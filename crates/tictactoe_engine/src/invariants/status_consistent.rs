//! Status consistency invariant: the status agrees with the board.

use super::Invariant;
use crate::rules::{evaluate_winner, is_draw, is_full};
use crate::{Cell, GameState, GameStatus};

/// Invariant: the status is exactly what the board says it should be.
///
/// - `Playing`: no completed line and at least one empty cell.
/// - `Won`: the recorded line is held by the recorded winner and is the
///   first completed line.
/// - `Draw`: full board, no line.
pub struct StatusConsistentInvariant;

impl Invariant<GameState> for StatusConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        match state.status() {
            GameStatus::Playing => evaluate_winner(board).is_none() && !is_full(board),
            GameStatus::Won(win) => {
                win.line()
                    .iter()
                    .all(|pos| board.get(*pos) == Cell::Occupied(win.winner()))
                    && evaluate_winner(board) == Some(*win)
            }
            GameStatus::Draw => is_draw(board),
        }
    }

    fn description() -> &'static str {
        "Status and winning line agree with the board"
    }
}
