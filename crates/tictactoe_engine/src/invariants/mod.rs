//! First-class invariants for the game state.
//!
//! Invariants are logical properties that must hold after every transition.
//! The engine checks them in debug builds; tests check them directly.

use crate::GameState;
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

pub mod alternating_turn;
pub mod scores_match_history;
pub mod status_consistent;
pub mod undo_depth;

pub use alternating_turn::AlternatingTurnInvariant;
pub use scores_match_history::ScoresMatchHistoryInvariant;
pub use status_consistent::StatusConsistentInvariant;
pub use undo_depth::UndoDepthInvariant;

/// All game-state invariants as a composable set.
pub type GameInvariants = (
    UndoDepthInvariant,
    AlternatingTurnInvariant,
    StatusConsistentInvariant,
    ScoresMatchHistoryInvariant,
);

/// Asserts that all invariants hold (panics on violation in debug builds).
pub fn assert_invariants(state: &GameState) {
    if let Err(violations) = GameInvariants::check_all(state) {
        for v in &violations {
            warn!(violation = %v.description, "Invariant violated");
        }
        debug_assert!(false, "Invariants violated: {:?}", violations);
    }
}
