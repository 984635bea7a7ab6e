//! Undo depth invariant: every mark on the board has an undo entry.

use super::Invariant;
use crate::GameState;

/// Invariant: the undo stack is exactly as deep as the number of filled cells.
///
/// Moves push one snapshot each; undo pops one and clears one cell; resets
/// clear both together.
pub struct UndoDepthInvariant;

impl Invariant<GameState> for UndoDepthInvariant {
    fn holds(state: &GameState) -> bool {
        state.board().filled_count() == state.undo_depth()
    }

    fn description() -> &'static str {
        "Undo depth matches number of filled cells"
    }
}
