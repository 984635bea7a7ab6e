//! Game configuration loaded from TOML.

use crate::{DEFAULT_PLAYER_O, DEFAULT_PLAYER_X, PlayerNames};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tictactoe.toml";

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameConfig {
    /// Display name for X.
    #[setters(into)]
    player_x: String,

    /// Display name for O.
    #[setters(into)]
    player_o: String,

    /// Whether O starts out played by the random opponent.
    ai_enabled: bool,

    /// Pause before the opponent moves, in milliseconds.
    ai_delay_ms: u64,

    /// Seed for the opponent's RNG; random when absent.
    #[setters(strip_option)]
    seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_x: DEFAULT_PLAYER_X.to_string(),
            player_o: DEFAULT_PLAYER_O.to_string(),
            ai_enabled: false,
            ai_delay_ms: 350,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            player_x = %config.player_x,
            player_o = %config.player_o,
            ai_enabled = config.ai_enabled,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists, else defaults.
    ///
    /// An explicitly named file that cannot be read is an error.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Player names as configured.
    pub fn names(&self) -> PlayerNames {
        PlayerNames::new(self.player_x.clone(), self.player_o.clone())
    }

    /// Opponent delay as a [`Duration`].
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }
}
