//! Core domain types for tic-tac-toe.

use crate::position::Position;
use serde::{Deserialize, Serialize};

/// A player's mark.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
pub enum Mark {
    /// Mark X (always moves first).
    #[default]
    X,
    /// Mark O (the AI plays this mark when enabled).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Cell holding a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from cells in row-major order.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Gets the cell at a raw index, or `None` past the edge of the board.
    pub fn get_index(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Sets the cell at the given position.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Number of cells holding a mark.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Counts how many cells hold `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(mark))
            .count()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their index so the output doubles as a move prompt.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.cells[index] {
                    Cell::Empty => index.to_string(),
                    Cell::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}
