//! Player command handlers.

use crate::protocol::{PlayerPublicInfo, ServerMessage};
use crate::state::AppState;
use std::sync::Arc;

/// Join the game. Capacity rejection is reported to the caller only.
pub async fn handle_join(
    state: &Arc<AppState>,
    conn_id: &str,
    name: String,
) -> Option<ServerMessage> {
    match state.join(conn_id, &name).await {
        Ok(player) => Some(ServerMessage::Joined {
            player: PlayerPublicInfo::from(&player),
        }),
        Err(msg) => Some(ServerMessage::Error {
            code: "GAME_FULL".to_string(),
            msg,
        }),
    }
}

pub async fn handle_buzz(state: &Arc<AppState>, conn_id: &str) -> Option<ServerMessage> {
    state.buzz(conn_id).await;
    None
}

pub async fn handle_submit_answer(
    state: &Arc<AppState>,
    conn_id: &str,
    letter: String,
) -> Option<ServerMessage> {
    state.submit_answer(conn_id, &letter).await;
    None
}
