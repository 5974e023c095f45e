pub mod handlers;
mod host;
mod player;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures::stream::SplitSink;
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use std::sync::Arc;

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use crate::types::Role;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub role: Option<String>,
}

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    tracing::info!("WebSocket connection request: role={:?}", params.role);

    ws.on_upgrade(move |socket| handle_socket(socket, params, state))
}

/// Handle an individual WebSocket connection for its whole lifetime.
async fn handle_socket(socket: WebSocket, params: WsQuery, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // The connection id doubles as the player id once this client joins.
    let conn_id = ulid::Ulid::new().to_string();

    // First connection asking for host takes the slot; it frees on
    // disconnect. A second host is demoted to spectator.
    let role = match params.role.as_deref() {
        Some("host") => {
            let mut session = state.session.write().await;
            if session.host.is_none() {
                session.host = Some(conn_id.clone());
                Role::Host
            } else {
                tracing::warn!("Host slot taken, demoting connection {} to spectator", conn_id);
                Role::Spectator
            }
        }
        _ => Role::Player,
    };

    tracing::info!("WebSocket {} connected with role: {:?}", conn_id, role);

    // Welcome with the current player-safe view so late joiners render
    // immediately; the host additionally gets its full view.
    let (player_view, host_view) = {
        let session = state.session.read().await;
        (session.player_view(), session.host_view())
    };

    let welcome = ServerMessage::Welcome {
        protocol: "1.0".to_string(),
        role: role.clone(),
        player_id: conn_id.clone(),
        server_now: chrono::Utc::now().to_rfc3339(),
        view: player_view,
    };

    if send_json(&mut sender, &welcome).await.is_err() {
        state.disconnect(&conn_id).await;
        return;
    }

    if role == Role::Host {
        let host_state = ServerMessage::HostState {
            view: host_view,
            server_now: chrono::Utc::now().to_rfc3339(),
        };
        if send_json(&mut sender, &host_state).await.is_err() {
            state.disconnect(&conn_id).await;
            return;
        }
    }

    // Subscribe to the general broadcast (all clients)
    let mut broadcast_rx = state.broadcast.subscribe();

    // Subscribe to the host-only broadcast if this is the host
    let mut host_broadcast_rx = if role == Role::Host {
        Some(state.host_broadcast.subscribe())
    } else {
        None
    };

    loop {
        tokio::select! {
            // General broadcasts (player-safe)
            broadcast_msg = broadcast_rx.recv() => {
                if let Ok(msg) = broadcast_msg {
                    if send_json(&mut sender, &msg).await.is_err() {
                        break;
                    }
                }
            }

            // Host-only broadcasts
            host_msg = async {
                match &mut host_broadcast_rx {
                    Some(rx) => rx.recv().await.ok(),
                    None => {
                        // Non-host: wait forever
                        std::future::pending::<Option<ServerMessage>>().await
                    }
                }
            } => {
                if let Some(msg) = host_msg {
                    if send_json(&mut sender, &msg).await.is_err() {
                        break;
                    }
                }
            }

            // Inbound client messages
            ws_msg = receiver.next() => {
                match ws_msg {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!("Received message: {}", text);

                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(client_msg) => {
                                if let Some(reply) =
                                    handlers::handle_message(client_msg, &role, &conn_id, &state).await
                                {
                                    if send_json(&mut sender, &reply).await.is_err() {
                                        break;
                                    }
                                }
                            }
                            Err(e) => {
                                tracing::error!("Failed to parse client message: {}", e);
                                let error = ServerMessage::Error {
                                    code: "PARSE_ERROR".to_string(),
                                    msg: format!("Invalid message format: {}", e),
                                };
                                let _ = send_json(&mut sender, &error).await;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("WebSocket {} closed", conn_id);
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    // Disconnection keeps the player on the scoreboard; only kick removes.
    state.disconnect(&conn_id).await;
    tracing::info!("WebSocket {} disconnected ({:?})", conn_id, role);
}

async fn send_json(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    sender.send(Message::Text(json.into())).await
}
