//! Buzz Arbiter: first valid buzz in a round wins, everything after is
//! silently dropped.
//!
//! The race between near-simultaneous buzzes is decided by write-lock
//! acquisition order on the session, the single mutation point: the first
//! task through the guard sees no owner and takes the lock, every later
//! one finds it held. No timestamps are involved.

use super::AppState;
use crate::protocol::ServerMessage;
use crate::types::Phase;

impl AppState {
    /// Attempt to take the buzz for this connection's player. Valid only
    /// during the question phase, while no owner is set, for a known
    /// player. Losing attempts are no-ops, not errors.
    pub async fn buzz(&self, conn_id: &str) {
        let winner = {
            let mut session = self.session.write().await;
            if session.phase != Phase::Question || session.buzz_owner.is_some() {
                None
            } else {
                match session.players.get_mut(conn_id) {
                    Some(player) => {
                        player.buzzed = true;
                        let name = player.name.clone();
                        session.buzz_owner = Some(conn_id.to_string());
                        Some(name)
                    }
                    None => None,
                }
            }
        };

        match winner {
            Some(name) => {
                tracing::info!("Buzz locked by {} (\"{}\")", conn_id, name);
                self.broadcast_to_all(ServerMessage::BuzzLocked {
                    player_id: conn_id.to_string(),
                    name,
                });
                self.broadcast_state().await;
            }
            None => tracing::debug!("Buzz from {} dropped", conn_id),
        }
    }
}
