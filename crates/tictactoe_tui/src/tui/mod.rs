//! Terminal UI for tic-tac-toe.

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::thread;
use std::time::Duration;
use tictactoe_engine::{GameConfig, GameEngine, GameSession, GameState, Intent};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

use app::{Action, App};

/// Log file for the terminal UI, kept off the screen.
pub const LOG_FILE: &str = "tictactoe_tui.log";

/// Runs the terminal UI until the user quits.
pub async fn run_tui(config: GameConfig) -> Result<()> {
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(
        player_x = %config.player_x(),
        player_o = %config.player_o(),
        ai_enabled = *config.ai_enabled(),
        "Starting tic-tac-toe TUI"
    );

    let engine = GameEngine::from_config(&config);
    let (session, state_rx) = GameSession::new(engine, config.ai_delay());
    let (intent_tx, intent_rx) = mpsc::channel(32);
    let session_task = tokio::spawn(session.run(intent_rx));

    let (key_rx, key_reader) = spawn_key_reader();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, state_rx, intent_tx, key_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match tokio::task::spawn_blocking(move || key_reader.join()).await {
        Ok(Ok(())) => debug!("Key reader joined"),
        _ => warn!("Key reader panicked"),
    }

    match session_task.await {
        Ok(state) => info!(
            games = state.scores().total(),
            status = ui::status_label(state.status()),
            "Session closed"
        ),
        Err(e) => warn!(error = %e, "Session task failed"),
    }

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// How long the key reader waits for input before checking for shutdown.
const KEY_POLL: Duration = Duration::from_millis(100);

/// Reads key presses on a plain thread until the receiver is dropped.
fn spawn_key_reader() -> (mpsc::UnboundedReceiver<KeyEvent>, thread::JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = thread::spawn(move || {
        forward_keys(&tx, || {
            if event::poll(KEY_POLL)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })
    });
    (rx, handle)
}

/// Forwards key presses until the receiver closes or reading fails.
///
/// `next_event` returns `Ok(None)` when nothing arrived within the poll window.
fn forward_keys(
    tx: &mpsc::UnboundedSender<KeyEvent>,
    mut next_event: impl FnMut() -> io::Result<Option<Event>>,
) {
    while !tx.is_closed() {
        match next_event() {
            Ok(Some(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                if tx.send(key).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "Failed to read terminal event");
                break;
            }
        }
    }
    debug!("Key reader stopped");
}

#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut state_rx: watch::Receiver<GameState>,
    intent_tx: mpsc::Sender<Intent>,
    mut key_rx: mpsc::UnboundedReceiver<KeyEvent>,
) -> Result<()> {
    let mut app = App::new();

    loop {
        let state = state_rx.borrow_and_update().clone();
        terminal.draw(|f| ui::draw(f, &state, &app))?;

        tokio::select! {
            key = key_rx.recv() => {
                let Some(key) = key else {
                    info!("Key reader closed");
                    break;
                };
                debug!(?key, "Key pressed");
                match input::handle_key(&mut app, &state, key) {
                    Action::None => {}
                    Action::Quit => {
                        info!("User quit");
                        break;
                    }
                    Action::Send(intent) => {
                        app.clear_notice();
                        intent_tx.send(intent).await?;
                    }
                }
            }
            changed = state_rx.changed() => {
                if changed.is_err() {
                    info!("Session ended");
                    break;
                }
            }
        }
    }

    Ok(())
}
