//! WebSocket message dispatch
//!
//! The single entry point every inbound command goes through, host
//! authorization included. Serializing all mutation behind the session
//! lock makes the "no concurrent mutation" guarantee structural.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use crate::types::Role;
use std::sync::Arc;

use super::{host, player};

/// Host commands from any other role are silently dropped, not errors.
macro_rules! check_host {
    ($role:expr, $action:expr) => {
        if *$role != Role::Host {
            tracing::debug!("Dropping host command from non-host: {}", $action);
            return None;
        }
    };
}

/// Handle a client message and return an optional direct reply.
/// Broadcasts happen inside the state layer as a side effect.
pub async fn handle_message(
    msg: ClientMessage,
    role: &Role,
    conn_id: &str,
    state: &Arc<AppState>,
) -> Option<ServerMessage> {
    match msg {
        // Player messages
        ClientMessage::Join { name } => {
            if *role != Role::Player {
                tracing::debug!("Dropping join from non-player role");
                return None;
            }
            player::handle_join(state, conn_id, name).await
        }

        ClientMessage::Buzz => player::handle_buzz(state, conn_id).await,

        ClientMessage::SubmitAnswer { letter } => {
            player::handle_submit_answer(state, conn_id, letter).await
        }

        // Host-only commands (authorization checked before dispatch)
        ClientMessage::HostStart => {
            check_host!(role, "start");
            host::handle_start(state).await
        }

        ClientMessage::HostNext => {
            check_host!(role, "next");
            host::handle_next(state).await
        }

        ClientMessage::HostPrev => {
            check_host!(role, "prev");
            host::handle_prev(state).await
        }

        ClientMessage::HostReveal => {
            check_host!(role, "reveal");
            host::handle_reveal(state).await
        }

        ClientMessage::HostResetBuzz => {
            check_host!(role, "reset the buzz");
            host::handle_reset_buzz(state).await
        }

        ClientMessage::HostKick { player_id } => {
            check_host!(role, "kick players");
            host::handle_kick(state, player_id).await
        }

        ClientMessage::HostSetScore { player_id, value } => {
            check_host!(role, "set scores");
            host::handle_set_score(state, player_id, value).await
        }

        ClientMessage::HostReloadQuestions => {
            check_host!(role, "reload questions");
            host::handle_reload_questions(state).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;

    #[tokio::test]
    async fn host_command_from_player_is_silently_dropped() {
        let state = Arc::new(AppState::default());
        let role = Role::Player;

        let reply = handle_message(ClientMessage::HostStart, &role, "p1", &state).await;

        assert!(reply.is_none());
        assert_eq!(state.session.read().await.phase, Phase::Lobby);
    }

    #[tokio::test]
    async fn host_command_from_spectator_is_silently_dropped() {
        let state = Arc::new(AppState::default());
        let role = Role::Spectator;

        let reply = handle_message(
            ClientMessage::HostSetScore {
                player_id: "p1".to_string(),
                value: serde_json::json!(99),
            },
            &role,
            "s1",
            &state,
        )
        .await;

        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn join_from_host_role_is_dropped() {
        let state = Arc::new(AppState::default());
        let role = Role::Host;

        let reply = handle_message(
            ClientMessage::Join {
                name: "Hostly".to_string(),
            },
            &role,
            "h1",
            &state,
        )
        .await;

        assert!(reply.is_none());
        assert!(state.session.read().await.players.is_empty());
    }
}
