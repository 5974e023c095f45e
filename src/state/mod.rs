mod buzz;
mod round;
mod score;
mod session;
mod view;

pub use round::RoundAdvance;

use crate::config::GameConfig;
use crate::protocol::{HostView, PlayerView, ServerMessage};
use crate::types::*;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;

/// Shared application state: the single session plus fan-out channels.
pub struct AppState {
    pub config: GameConfig,
    /// The authoritative session. Every mutation takes the write guard,
    /// produces the complete next state, releases it, then broadcasts.
    pub session: RwLock<Session>,
    /// The pending countdown task, if a round timer is running.
    pub timer_task: RwLock<Option<JoinHandle<()>>>,
    /// Broadcast channel for all connections (player-safe messages).
    pub broadcast: broadcast::Sender<ServerMessage>,
    /// Broadcast channel for the host connection only.
    pub host_broadcast: broadcast::Sender<ServerMessage>,
}

impl AppState {
    pub fn new(config: GameConfig, questions: Vec<Question>) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        let (host_tx, _host_rx) = broadcast::channel(100);
        Self {
            config,
            session: RwLock::new(Session::new(questions)),
            timer_task: RwLock::new(None),
            broadcast: tx,
            host_broadcast: host_tx,
        }
    }

    /// Send a message to every connection. No receivers is fine.
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        let _ = self.broadcast.send(msg);
    }

    /// Send a message to the host connection, if one is subscribed.
    pub fn broadcast_to_host(&self, msg: ServerMessage) {
        let _ = self.host_broadcast.send(msg);
    }

    /// Recompute both views and push them: player view to everyone,
    /// host view to the host channel.
    pub async fn broadcast_state(&self) {
        let session = self.session.read().await;
        let player_view = session.player_view();
        let host_view = session.host_view();
        drop(session);

        self.broadcast_views(player_view, host_view);
    }

    /// Push already-projected views. Synchronous, so a caller that projects
    /// under its own guard can mutate and broadcast without an await point
    /// in between.
    pub(crate) fn broadcast_views(&self, player_view: PlayerView, host_view: HostView) {
        let server_now = chrono::Utc::now().to_rfc3339();
        self.broadcast_to_all(ServerMessage::State {
            view: player_view,
            server_now: server_now.clone(),
        });
        self.broadcast_to_host(ServerMessage::HostState {
            view: host_view,
            server_now,
        });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(GameConfig::default(), Vec::new())
    }
}
