//! Alternating turn invariant: X and O take turns, X first.

use super::Invariant;
use crate::{GameState, Mark};

/// Invariant: X has played as many marks as O, or one more.
///
/// The next mark is X exactly when the counts are equal. This holds in
/// terminal states too, since the turn flips before the status is settled.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        let x = state.board().count(Mark::X);
        let o = state.board().count(Mark::O);

        match state.next() {
            Mark::X => x == o,
            Mark::O => x == o + 1,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns starting with X"
    }
}
