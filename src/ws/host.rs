//! Host-only command handlers
//!
//! Authorization is checked in the dispatch layer before these run. They
//! orchestrate the round controller and the countdown: a new round gets a
//! fresh timer, the end of the game stops it.

use crate::protocol::ServerMessage;
use crate::state::{AppState, RoundAdvance};
use crate::timer;
use std::sync::Arc;

pub async fn handle_start(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Host starting the game");
    state.start_game().await;
    timer::start(state, state.config.timer_seconds).await;
    None
}

pub async fn handle_next(state: &Arc<AppState>) -> Option<ServerMessage> {
    match state.next_question().await {
        RoundAdvance::Started => timer::start(state, state.config.timer_seconds).await,
        RoundAdvance::Ended => timer::stop(state).await,
        RoundAdvance::NoOp => {}
    }
    None
}

pub async fn handle_prev(state: &Arc<AppState>) -> Option<ServerMessage> {
    if state.prev_question().await == RoundAdvance::Started {
        timer::start(state, state.config.timer_seconds).await;
    }
    None
}

pub async fn handle_reveal(state: &Arc<AppState>) -> Option<ServerMessage> {
    state.reveal().await;
    None
}

pub async fn handle_reset_buzz(state: &Arc<AppState>) -> Option<ServerMessage> {
    state.reset_buzz().await;
    None
}

pub async fn handle_kick(state: &Arc<AppState>, player_id: String) -> Option<ServerMessage> {
    state.kick(&player_id).await;
    None
}

pub async fn handle_set_score(
    state: &Arc<AppState>,
    player_id: String,
    value: serde_json::Value,
) -> Option<ServerMessage> {
    state.set_score(&player_id, &value).await;
    None
}

pub async fn handle_reload_questions(state: &Arc<AppState>) -> Option<ServerMessage> {
    tracing::info!("Host reloading questions");
    state.reload_questions().await;
    None
}
