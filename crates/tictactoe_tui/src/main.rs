//! Tic-tac-toe in the terminal.

#![warn(missing_docs)]

mod cli;
mod script;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { game } => {
            let config = game.resolve()?;
            tui::run_tui(config).await
        }
        Command::Script { game, steps } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .with_writer(std::io::stderr)
                .init();

            let config = game.resolve()?;
            info!(steps = steps.len(), "Running script");
            let state = script::run_script(&config, &steps).await?;

            println!("{}", serde_json::to_string_pretty(&state)?);
            println!("{}", state.status_message());
            Ok(())
        }
    }
}
