//! Win detection logic for tic-tac-toe.

use crate::{Board, Cell, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three collinear positions.
pub type Line = [Position; 3];

/// Every winning line, in evaluation order: rows, columns, diagonals.
pub const LINES: [Line; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed line and the mark that completed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Win {
    winner: Mark,
    line: Line,
}

impl Win {
    /// The mark occupying the whole line.
    pub fn winner(&self) -> Mark {
        self.winner
    }

    /// The winning line.
    pub fn line(&self) -> Line {
        self.line
    }

    /// Board indices of the winning line.
    pub fn indices(&self) -> [usize; 3] {
        self.line.map(Position::to_index)
    }
}

/// Returns the first line (in [`LINES`] order) held entirely by one mark.
#[instrument(skip(board))]
pub fn evaluate_winner(board: &Board) -> Option<Win> {
    LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        let first = board.get(a);
        match first {
            Cell::Occupied(mark) if board.get(b) == first && board.get(c) == first => {
                Some(Win::new(mark, line))
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_of(marks: &[(Position, Mark)]) -> Board {
        let mut board = Board::new();
        for (pos, mark) in marks {
            board.set(*pos, Cell::Occupied(*mark));
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(evaluate_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_of(&[
            (Position::TopLeft, Mark::X),
            (Position::TopCenter, Mark::X),
            (Position::TopRight, Mark::X),
        ]);
        let win = evaluate_winner(&board).expect("top row should win");
        assert_eq!(win.winner(), Mark::X);
        assert_eq!(win.indices(), [0, 1, 2]);
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_of(&[
            (Position::TopRight, Mark::O),
            (Position::Center, Mark::O),
            (Position::BottomLeft, Mark::O),
        ]);
        let win = evaluate_winner(&board).expect("diagonal should win");
        assert_eq!(win.winner(), Mark::O);
        assert_eq!(win.indices(), [2, 4, 6]);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_of(&[(Position::TopLeft, Mark::X), (Position::TopCenter, Mark::X)]);
        assert_eq!(evaluate_winner(&board), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_of(&[
            (Position::TopLeft, Mark::X),
            (Position::TopCenter, Mark::O),
            (Position::TopRight, Mark::X),
        ]);
        assert_eq!(evaluate_winner(&board), None);
    }

    #[test]
    fn test_first_line_in_order_is_reported() {
        // Top row and left column both complete; rows are checked first.
        let board = board_of(&[
            (Position::TopLeft, Mark::X),
            (Position::TopCenter, Mark::X),
            (Position::TopRight, Mark::X),
            (Position::MiddleLeft, Mark::X),
            (Position::BottomLeft, Mark::X),
        ]);
        assert_eq!(evaluate_winner(&board).map(|w| w.indices()), Some([0, 1, 2]));
    }
}
