//! Random-move opponent.

use crate::{Board, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Picks an empty cell uniformly at random.
///
/// Returns `None` only when the board is full.
#[instrument(skip(board, rng))]
pub fn choose_ai_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    let choice = Position::valid_moves(board).choose(rng).copied();
    debug!(?choice, "AI chose position");
    choice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Mark};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_full_board_has_no_move() {
        let board = Board::from_cells([Cell::Occupied(Mark::X); 9]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(choose_ai_move(&board, &mut rng), None);
    }

    #[test]
    fn test_single_empty_cell_is_chosen() {
        let mut cells = [Cell::Occupied(Mark::O); 9];
        cells[5] = Cell::Empty;
        let board = Board::from_cells(cells);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(choose_ai_move(&board, &mut rng), Some(Position::MiddleRight));
        }
    }

    #[test]
    fn test_choices_are_roughly_uniform() {
        let mut board = Board::new();
        board.set(Position::Center, Cell::Occupied(Mark::X));
        board.set(Position::TopLeft, Cell::Occupied(Mark::O));

        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 9];
        let trials = 7_000;
        for _ in 0..trials {
            let pos = choose_ai_move(&board, &mut rng).expect("board has empty cells");
            assert!(board.is_empty(pos));
            counts[pos.to_index()] += 1;
        }

        // 7 empty cells, expected 1000 each.
        assert_eq!(counts[0], 0);
        assert_eq!(counts[4], 0);
        for (index, count) in counts.iter().enumerate() {
            if index != 0 && index != 4 {
                assert!((800..1200).contains(count), "cell {index} chosen {count} times");
            }
        }
    }
}
