//! Score bookkeeping invariant: counters agree with the game history.

use super::Invariant;
use crate::{GameState, Mark};

/// Invariant: each history entry is counted once, under the right counter.
pub struct ScoresMatchHistoryInvariant;

impl Invariant<GameState> for ScoresMatchHistoryInvariant {
    fn holds(state: &GameState) -> bool {
        let count = |winner: Option<Mark>| {
            state
                .history()
                .iter()
                .filter(|entry| *entry.winner() == winner)
                .count()
        };
        let scores = state.scores();

        count(Some(Mark::X)) == scores.x() as usize
            && count(Some(Mark::O)) == scores.o() as usize
            && count(None) == scores.draws() as usize
    }

    fn description() -> &'static str {
        "Scores match the finished-game history"
    }
}
