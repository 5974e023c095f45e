//! Per-round countdown.
//!
//! One cancellable task, owned by the shared state. Expiry performs the
//! same reveal as the host command, then emits a distinct `timer_ended`
//! signal.

use crate::protocol::ServerMessage;
use crate::state::AppState;
use std::sync::Arc;
use std::time::Duration;

/// Start (or restart) the countdown. Any previous countdown is cancelled
/// and fully terminated first; no two may run at once.
pub async fn start(state: &Arc<AppState>, seconds: u32) {
    stop(state).await;

    state.session.write().await.timer_remaining = seconds;

    let handle = tokio::spawn(run_countdown(Arc::clone(state)));
    *state.timer_task.write().await = Some(handle);
}

/// Cancel the pending countdown and wait for it to finish. Idempotent.
pub async fn stop(state: &AppState) {
    let handle = state.timer_task.write().await.take();
    if let Some(handle) = handle {
        handle.abort();
        // Waiting out the abort keeps expiry and restart strictly ordered:
        // once stop returns, the old countdown can no longer act.
        let _ = handle.await;
    }
}

async fn run_countdown(state: Arc<AppState>) {
    loop {
        let remaining = state.session.read().await.timer_remaining;
        state.broadcast_to_all(ServerMessage::TimerTick { remaining });

        if remaining == 0 {
            // Same reveal as the host command; no TimerEnded if the host
            // got there first. Once the reveal commits, the sends (state
            // views inside apply_reveal, TimerEnded here) happen in the
            // same poll with no await in between, so aborting this task
            // cannot separate the mutation from its broadcasts.
            if state.apply_reveal().await {
                tracing::info!("Countdown expired, round revealed");
                state.broadcast_to_all(ServerMessage::TimerEnded);
            }
            return;
        }

        tokio::time::sleep(Duration::from_secs(1)).await;

        let mut session = state.session.write().await;
        session.timer_remaining = session.timer_remaining.saturating_sub(1);
    }
}
