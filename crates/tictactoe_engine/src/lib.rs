//! Tic-tac-toe rules engine with scores, game history, undo and a random opponent.
//!
//! # Architecture
//!
//! - **Rules**: pure win and draw detection over a [`Board`]
//! - **Engine**: [`GameEngine`] applies intents to a single [`GameState`]
//! - **Invariants**: properties checked after every transition in debug builds
//! - **Session**: [`GameSession`] schedules the opponent's delayed move and
//!   publishes snapshots to observers
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameEngine, GameStatus, Intent, Mark};
//!
//! let mut engine = GameEngine::with_seed(7);
//! for index in [0, 3, 1, 4, 2] {
//!     engine.dispatch(Intent::Click(index));
//! }
//! assert_eq!(engine.state().status().winner(), Some(Mark::X));
//! assert_eq!(engine.state().status_message(), "Player Pushpa Raj wins!");
//! assert!(matches!(engine.state().status(), GameStatus::Won(_)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ai;
mod config;
mod engine;
mod intent;
pub mod invariants;
mod position;
pub mod rules;
mod session;
mod state;
mod types;

pub use ai::choose_ai_move;
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, GameConfig};
pub use engine::GameEngine;
pub use intent::{Intent, MoveOutcome, Rejection};
pub use position::Position;
pub use rules::{Line, Win, evaluate_winner, is_draw, is_full};
pub use session::{AiTrigger, GameSession};
pub use state::{
    DEFAULT_PLAYER_O, DEFAULT_PLAYER_X, GameState, GameStatus, HistoryEntry, MoveSnapshot,
    PlayerNames, Scores,
};
pub use types::{Board, Cell, Mark};
