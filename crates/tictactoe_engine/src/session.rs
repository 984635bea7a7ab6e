//! Session driver: owns the engine, schedules the opponent and notifies observers.
//!
//! The opponent's move is a single-shot timer stored next to the engine.
//! Any intent that changes the board, turn, status or AI flag drops the timer
//! before it can fire, and a fresh one is scheduled if the opponent is still
//! due. Intents and the timer are handled on one task, so there is no window
//! in which a stale move can land.

use crate::{Board, GameEngine, GameState, Intent, Mark};
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, Sleep, sleep};
use tracing::{debug, info, instrument};

/// The state an opponent move was scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTrigger {
    /// Board at scheduling time.
    pub board: Board,
    /// Mark to move at scheduling time (always O).
    pub next: Mark,
    /// Undo depth at scheduling time.
    pub depth: usize,
}

impl AiTrigger {
    fn capture(state: &GameState) -> Self {
        Self {
            board: *state.board(),
            next: state.next(),
            depth: state.undo_depth(),
        }
    }
}

/// A scheduled opponent move that has not fired yet.
#[derive(Debug)]
struct PendingAiMove {
    timer: Pin<Box<Sleep>>,
    trigger: AiTrigger,
}

/// Owns a [`GameEngine`] and drives it from intents and the opponent timer.
#[derive(Debug)]
pub struct GameSession {
    engine: GameEngine,
    ai_delay: Duration,
    pending_ai: Option<PendingAiMove>,
    observer: watch::Sender<GameState>,
}

impl GameSession {
    /// Creates a session and a receiver that sees every published snapshot.
    ///
    /// If the engine starts with the opponent due, its move is scheduled
    /// right away.
    #[instrument(skip(engine))]
    pub fn new(engine: GameEngine, ai_delay: Duration) -> (Self, watch::Receiver<GameState>) {
        let (observer, rx) = watch::channel(engine.state().clone());
        let mut session = Self {
            engine,
            ai_delay,
            pending_ai: None,
            observer,
        };
        session.schedule_ai();
        (session, rx)
    }

    /// Current state.
    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    /// True while an opponent move is scheduled.
    pub fn ai_pending(&self) -> bool {
        self.pending_ai.is_some()
    }

    /// Another receiver for published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.observer.subscribe()
    }

    /// Applies an intent, reschedules the opponent if needed and publishes.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, intent: Intent) {
        if self.engine.dispatch(intent) {
            self.cancel_ai();
            self.schedule_ai();
        }
        self.publish();
    }

    /// Waits for the scheduled opponent move and plays it.
    ///
    /// Returns false at once if nothing is scheduled. Cancel safe: dropping
    /// the future leaves the timer scheduled.
    pub async fn wait_for_ai(&mut self) -> bool {
        let Some(pending) = self.pending_ai.as_mut() else {
            return false;
        };
        pending.timer.as_mut().await;
        self.fire_ai();
        true
    }

    /// Runs until the intent channel closes.
    #[instrument(skip_all)]
    pub async fn run(mut self, mut intents: mpsc::Receiver<Intent>) -> GameState {
        info!("Session started");
        loop {
            // Intents queued before the deadline must cancel the move first.
            tokio::select! {
                biased;
                intent = intents.recv() => match intent {
                    Some(intent) => self.dispatch(intent),
                    None => break,
                },
                _ = Self::ai_timer(&mut self.pending_ai) => self.fire_ai(),
            }
        }
        info!("Session ended");
        self.engine.state().clone()
    }

    async fn ai_timer(pending: &mut Option<PendingAiMove>) {
        match pending.as_mut() {
            Some(pending) => pending.timer.as_mut().await,
            None => std::future::pending().await,
        }
    }

    fn schedule_ai(&mut self) {
        if !self.engine.ai_turn_due() {
            return;
        }
        let trigger = AiTrigger::capture(self.engine.state());
        debug!(delay_ms = self.ai_delay.as_millis() as u64, "AI move scheduled");
        self.pending_ai = Some(PendingAiMove {
            timer: Box::pin(sleep(self.ai_delay)),
            trigger,
        });
    }

    fn cancel_ai(&mut self) {
        if self.pending_ai.take().is_some() {
            debug!("Pending AI move cancelled");
        }
    }

    fn fire_ai(&mut self) {
        let Some(pending) = self.pending_ai.take() else {
            return;
        };
        debug_assert_eq!(
            pending.trigger,
            AiTrigger::capture(self.engine.state()),
            "AI timer outlived the state it was scheduled for"
        );
        let late_by = Instant::now().saturating_duration_since(pending.timer.deadline());
        debug!(?late_by, "AI timer fired");
        self.engine.play_ai_move();
        self.schedule_ai();
        self.publish();
    }

    fn publish(&self) {
        self.observer.send_replace(self.engine.state().clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameStatus;

    const DELAY: Duration = Duration::from_millis(350);

    fn session_with_ai() -> (GameSession, watch::Receiver<GameState>) {
        let mut engine = GameEngine::with_seed(11);
        engine.set_ai_enabled(true);
        GameSession::new(engine, DELAY)
    }

    #[tokio::test(start_paused = true)]
    async fn test_ai_moves_after_delay() {
        let (mut session, _rx) = session_with_ai();
        session.dispatch(Intent::Click(4));
        assert!(session.ai_pending());

        let start = Instant::now();
        assert!(session.wait_for_ai().await);
        assert!(start.elapsed() >= DELAY);

        assert_eq!(session.state().board().count(Mark::O), 1);
        assert_eq!(session.state().next(), Mark::X);
        assert!(!session.ai_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ai_does_not_move_early() {
        let (mut session, _rx) = session_with_ai();
        session.dispatch(Intent::Click(4));

        let early =
            tokio::time::timeout(DELAY - Duration::from_millis(1), session.wait_for_ai()).await;
        assert!(early.is_err());
        assert_eq!(session.state().board().count(Mark::O), 0);
        assert!(session.ai_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_undo_cancels_pending_ai() {
        let (mut session, _rx) = session_with_ai();
        session.dispatch(Intent::Click(4));
        session.dispatch(Intent::Undo);

        assert!(!session.ai_pending());
        assert!(!session.wait_for_ai().await);
        assert_eq!(session.state().board().filled_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabling_ai_cancels_pending_move() {
        let (mut session, _rx) = session_with_ai();
        session.dispatch(Intent::Click(4));
        session.dispatch(Intent::SetAiEnabled(false));

        assert!(!session.ai_pending());
        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(session.state().board().count(Mark::O), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rename_keeps_pending_move() {
        let (mut session, _rx) = session_with_ai();
        session.dispatch(Intent::Click(4));
        session.dispatch(Intent::SetPlayerName(Mark::O, "Robot".into()));

        assert!(session.ai_pending());
        assert!(session.wait_for_ai().await);
        assert_eq!(session.state().status_message(), "Next player: Pushpa Raj");
    }

    #[tokio::test(start_paused = true)]
    async fn test_human_move_for_o_replaces_pending_move() {
        let (mut session, _rx) = session_with_ai();
        session.dispatch(Intent::Click(4));
        // The human plays O's turn before the timer fires.
        session.dispatch(Intent::Click(0));

        assert!(!session.ai_pending());
        assert_eq!(session.state().board().count(Mark::O), 1);
        assert_eq!(session.state().next(), Mark::X);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enabling_ai_on_os_turn_schedules_move() {
        let (mut session, _rx) = GameSession::new(GameEngine::with_seed(3), DELAY);
        session.dispatch(Intent::Click(4));
        assert!(!session.ai_pending());

        session.dispatch(Intent::SetAiEnabled(true));
        assert!(session.ai_pending());
        assert!(session.wait_for_ai().await);
        assert_eq!(session.state().board().count(Mark::O), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_publishes_snapshot() {
        let (mut session, mut rx) = GameSession::new(GameEngine::with_seed(3), DELAY);
        session.dispatch(Intent::Click(8));

        assert!(rx.has_changed().expect("sender alive"));
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.undo_depth(), 1);
        assert_eq!(snapshot.status(), &GameStatus::Playing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_plays_ai_and_stops_when_channel_closes() {
        let (session, mut rx) = session_with_ai();
        let (tx, intents) = mpsc::channel(8);
        let handle = tokio::spawn(session.run(intents));

        tx.send(Intent::Click(4)).await.expect("session running");
        rx.wait_for(|state| state.board().count(Mark::O) == 1)
            .await
            .expect("AI move published");

        drop(tx);
        let final_state = handle.await.expect("session task");
        assert_eq!(final_state.board().filled_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_reset_before_timer_cancels_move() {
        let (session, mut rx) = session_with_ai();
        let (tx, intents) = mpsc::channel(8);
        let handle = tokio::spawn(session.run(intents));

        tx.send(Intent::Click(4)).await.expect("session running");
        tx.send(Intent::ResetGame).await.expect("session running");
        drop(tx);

        let final_state = handle.await.expect("session task");
        assert_eq!(final_state.board().filled_count(), 0);
        assert_eq!(rx.borrow_and_update().board().filled_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_prefers_queued_intent_over_expired_timer() {
        let (mut session, _rx) = session_with_ai();
        session.dispatch(Intent::Click(4));
        assert!(session.ai_pending());

        let (tx, intents) = mpsc::channel(8);
        tx.send(Intent::Undo).await.expect("channel open");
        drop(tx);
        tokio::time::advance(DELAY * 2).await;

        let final_state = session.run(intents).await;
        assert_eq!(final_state.board().filled_count(), 0);
        assert_eq!(final_state.undo_depth(), 0);
    }
}
