//! Script mode: run intents without a terminal UI.

use anyhow::{Result, bail};
use tictactoe_engine::{GameConfig, GameEngine, GameSession, GameState, Intent, Mark, Position};
use tracing::{debug, info, instrument};

/// Parses one script step into an intent.
#[instrument]
pub fn parse_step(step: &str) -> Result<Intent> {
    let intent = match step.trim() {
        "undo" => Intent::Undo,
        "new" => Intent::ResetGame,
        "reset" => Intent::ResetStats,
        "ai-on" => Intent::SetAiEnabled(true),
        "ai-off" => Intent::SetAiEnabled(false),
        other => {
            if let Some(name) = other.strip_prefix("name-x=") {
                Intent::SetPlayerName(Mark::X, name.to_string())
            } else if let Some(name) = other.strip_prefix("name-o=") {
                Intent::SetPlayerName(Mark::O, name.to_string())
            } else if let Some(pos) = Position::from_label_or_number(other) {
                Intent::Click(pos.to_index())
            } else {
                bail!("Unknown step: {:?}", other);
            }
        }
    };
    Ok(intent)
}

/// Runs every step in order and returns the final state.
///
/// After each step, a due computer move is allowed to land before the next
/// step runs.
#[instrument(skip(config, steps), fields(steps = steps.len()))]
pub async fn run_script(config: &GameConfig, steps: &[String]) -> Result<GameState> {
    let intents = steps
        .iter()
        .map(|s| parse_step(s))
        .collect::<Result<Vec<_>>>()?;

    let (mut session, _snapshots) =
        GameSession::new(GameEngine::from_config(config), config.ai_delay());

    for intent in intents {
        debug!(?intent, "Script step");
        session.dispatch(intent);
        while session.wait_for_ai().await {}
    }

    let state = session.state().clone();
    info!(status = %state.status_message(), "Script finished");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(s: &[&str]) -> Vec<String> {
        s.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!(parse_step("4").unwrap(), Intent::Click(4));
        assert_eq!(parse_step("bottom-right").unwrap(), Intent::Click(8));
        assert_eq!(parse_step("undo").unwrap(), Intent::Undo);
        assert_eq!(parse_step("new").unwrap(), Intent::ResetGame);
        assert_eq!(parse_step("reset").unwrap(), Intent::ResetStats);
        assert_eq!(parse_step("ai-off").unwrap(), Intent::SetAiEnabled(false));
        assert_eq!(
            parse_step("name-o=Deep Blue").unwrap(),
            Intent::SetPlayerName(Mark::O, "Deep Blue".to_string())
        );
        assert!(parse_step("9").is_err());
        assert!(parse_step("redo").is_err());
    }

    #[tokio::test]
    async fn test_script_plays_a_win() {
        let config = GameConfig::default().with_seed(1);
        let state = run_script(&config, &steps(&["0", "3", "1", "4", "2"]))
            .await
            .expect("script runs");
        assert_eq!(state.status_message(), "Player Pushpa Raj wins!");
        assert_eq!(state.scores().x(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_script_lets_ai_answer_each_move() {
        let config = GameConfig::default().with_seed(1).with_ai_delay_ms(350);
        let state = run_script(&config, &steps(&["ai-on", "center"]))
            .await
            .expect("script runs");
        assert_eq!(state.board().count(Mark::X), 1);
        assert_eq!(state.board().count(Mark::O), 1);
        assert_eq!(state.next(), Mark::X);
    }

    #[tokio::test]
    async fn test_bad_step_fails_before_playing() {
        let config = GameConfig::default();
        assert!(run_script(&config, &steps(&["4", "sideways"])).await.is_err());
    }
}
