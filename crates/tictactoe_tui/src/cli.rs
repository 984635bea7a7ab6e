//! Command-line interface for the tic-tac-toe front end.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_engine::{ConfigError, GameConfig};
use tracing::instrument;

/// Tic-tac-toe with scores, undo and a random opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe with scores, undo and a random opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by every mode. Flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct GameArgs {
    /// Path to a TOML config file (defaults to ./tictactoe.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Let the computer play O
    #[arg(long)]
    pub ai: bool,

    /// Name for player X
    #[arg(long)]
    pub player_x: Option<String>,

    /// Name for player O
    #[arg(long)]
    pub player_o: Option<String>,

    /// Milliseconds the computer waits before moving
    #[arg(long)]
    pub ai_delay_ms: Option<u64>,

    /// Seed for the computer's moves
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GameArgs {
    /// Loads the config file and applies flag overrides.
    #[instrument(skip(self))]
    pub fn resolve(&self) -> Result<GameConfig, ConfigError> {
        let mut config = GameConfig::load(self.config.as_deref())?;
        if self.ai {
            config = config.with_ai_enabled(true);
        }
        if let Some(name) = &self.player_x {
            config = config.with_player_x(name.clone());
        }
        if let Some(name) = &self.player_o {
            config = config.with_player_o(name.clone());
        }
        if let Some(delay) = self.ai_delay_ms {
            config = config.with_ai_delay_ms(delay);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        #[command(flatten)]
        game: GameArgs,
    },

    /// Run a sequence of steps and print the final state as JSON
    ///
    /// Steps: a cell (0-8 or a label such as "center"), undo, new, reset,
    /// ai-on, ai-off, name-x=NAME, name-o=NAME.
    Script {
        #[command(flatten)]
        game: GameArgs,

        /// Steps to run, in order
        #[arg(required = true)]
        steps: Vec<String>,
    },
}
