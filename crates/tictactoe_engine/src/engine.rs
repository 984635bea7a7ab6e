//! Game engine: every rule and state transition lives here.

use crate::ai::choose_ai_move;
use crate::invariants::assert_invariants;
use crate::rules::{evaluate_winner, is_full};
use crate::{
    Cell, GameConfig, GameState, GameStatus, HistoryEntry, Intent, Mark, MoveOutcome,
    MoveSnapshot, PlayerNames,
};
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

/// Tic-tac-toe engine.
///
/// Owns the state and the opponent's RNG. Invalid intents are no-ops;
/// nothing here returns an error.
#[derive(Debug, Clone)]
pub struct GameEngine {
    state: GameState,
    rng: StdRng,
}

impl GameEngine {
    /// Creates an engine with default names and an entropy-seeded opponent.
    #[instrument]
    pub fn new() -> Self {
        Self {
            state: GameState::new(PlayerNames::default(), false),
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an engine whose opponent is reproducible.
    #[instrument]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: GameState::new(PlayerNames::default(), false),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates an engine from configuration.
    #[instrument(skip(config))]
    pub fn from_config(config: &GameConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: GameState::new(config.names(), *config.ai_enabled()),
            rng,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Places the next mark at `index` (0-8).
    ///
    /// Ignored if the game is over, the index is off the board or the cell is
    /// taken. Otherwise the pre-move board is pushed for undo, the mark is
    /// written, the turn flips and the status is settled.
    #[instrument(skip(self), fields(next = %self.state.next))]
    pub fn apply_move(&mut self, index: usize) -> MoveOutcome {
        let pos = match self.state.check_move(index) {
            Ok(pos) => pos,
            Err(rejection) => {
                debug!(%rejection, "Move ignored");
                return MoveOutcome::Ignored(rejection);
            }
        };

        let mark = self.state.next;
        self.state.moves.push(MoveSnapshot::new(self.state.board, mark));
        self.state.board.set(pos, Cell::Occupied(mark));
        self.state.next = mark.opponent();

        let outcome = self.settle();
        assert_invariants(&self.state);
        outcome
    }

    /// Re-evaluates the status after a move, recording finished games.
    fn settle(&mut self) -> MoveOutcome {
        if let Some(win) = evaluate_winner(&self.state.board) {
            info!(winner = %win.winner(), line = ?win.indices(), "Game won");
            self.state.status = GameStatus::Won(win);
            self.record_finished(Some(win.winner()));
            MoveOutcome::Won(win)
        } else if is_full(&self.state.board) {
            info!("Game drawn");
            self.state.status = GameStatus::Draw;
            self.record_finished(None);
            MoveOutcome::Drawn
        } else {
            MoveOutcome::Continued
        }
    }

    fn record_finished(&mut self, winner: Option<Mark>) {
        self.state.scores.record(winner);
        self.state.history.push(HistoryEntry::new(winner, self.state.board, Utc::now()));
    }

    /// Takes back the most recent move.
    ///
    /// The status returns to playing even when undoing a finished game, but
    /// the finished game stays in the scores and history. Returns false when
    /// there is nothing to undo.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.state.moves.pop() else {
            debug!("Nothing to undo");
            return false;
        };

        self.state.board = *snapshot.board();
        self.state.next = *snapshot.next();
        self.state.status = GameStatus::Playing;
        debug!(depth = self.state.moves.len(), "Move undone");

        assert_invariants(&self.state);
        true
    }

    /// Clears the board for a new game. Scores and history are kept.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        self.state.board = Default::default();
        self.state.next = Mark::X;
        self.state.status = GameStatus::Playing;
        self.state.moves.clear();
        info!("New game");

        assert_invariants(&self.state);
    }

    /// Starts a new game and forgets all scores and finished games.
    #[instrument(skip(self))]
    pub fn reset_stats(&mut self) {
        self.reset_game();
        self.state.scores = Default::default();
        self.state.history.clear();
        info!("Scores and history cleared");

        assert_invariants(&self.state);
    }

    /// Renames a player.
    #[instrument(skip(self, name))]
    pub fn set_name(&mut self, mark: Mark, name: impl Into<String>) {
        let name = name.into();
        debug!(%mark, %name, "Player renamed");
        self.state.names.set(mark, name);
    }

    /// Turns the opponent on or off. Returns whether the flag changed.
    #[instrument(skip(self))]
    pub fn set_ai_enabled(&mut self, enabled: bool) -> bool {
        let changed = self.state.ai_enabled != enabled;
        self.state.ai_enabled = enabled;
        changed
    }

    /// True when the opponent should move: enabled, game on, O to play.
    pub fn ai_turn_due(&self) -> bool {
        self.state.ai_enabled && !self.state.status.is_over() && self.state.next == Mark::O
    }

    /// Plays the opponent's move if it is due.
    #[instrument(skip(self))]
    pub fn play_ai_move(&mut self) -> Option<MoveOutcome> {
        if !self.ai_turn_due() {
            return None;
        }
        let pos = choose_ai_move(&self.state.board, &mut self.rng)?;
        info!(%pos, "AI move");
        Some(self.apply_move(pos.to_index()))
    }

    /// Applies one intent.
    ///
    /// Returns true if the board, turn, status or AI flag changed. Renaming
    /// never counts as a change.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Click(index) => self.apply_move(index).is_applied(),
            Intent::Undo => self.undo(),
            Intent::ResetGame => {
                self.reset_game();
                true
            }
            Intent::ResetStats => {
                self.reset_stats();
                true
            }
            Intent::SetAiEnabled(enabled) => self.set_ai_enabled(enabled),
            Intent::SetPlayerName(mark, name) => {
                self.set_name(mark, name);
                false
            }
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
