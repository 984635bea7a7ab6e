//! Draw detection logic for tic-tac-toe.

use super::win::evaluate_winner;
use crate::{Board, Cell};
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}

/// A full board with no winning line.
///
/// A full board that also completes a line is a win, never a draw.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && evaluate_winner(board).is_none()
}
