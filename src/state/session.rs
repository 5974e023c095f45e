//! Session State mutation primitives: player lifecycle and direct edits.

use super::AppState;
use crate::types::*;

const MAX_NAME_CHARS: usize = 20;

/// Trim, truncate to 20 characters, default to "Player" if empty.
fn sanitize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return "Player".to_string();
    }
    trimmed.chars().take(MAX_NAME_CHARS).collect()
}

impl AppState {
    /// Add a player for this connection. Rejected once the player count
    /// reaches capacity; disconnected players keep their seat and count too.
    /// A repeated join from a connection that already holds a seat returns
    /// the existing player untouched, score included.
    pub async fn join(&self, conn_id: &str, name: &str) -> Result<Player, String> {
        let player = {
            let mut session = self.session.write().await;
            if let Some(existing) = session.players.get(conn_id) {
                return Ok(existing.clone());
            }
            if session.players.len() >= self.config.max_players {
                return Err("Game is full".to_string());
            }
            let player = Player::new(conn_id.to_string(), sanitize_name(name));
            session.players.insert(player.id.clone(), player.clone());
            player
        };

        tracing::info!("Player {} joined as \"{}\"", player.id, player.name);
        self.broadcast_state().await;
        Ok(player)
    }

    /// Mark the player for this connection as disconnected, or release the
    /// host slot if this was the host. Disconnection never removes a player;
    /// the scoreboard persists.
    pub async fn disconnect(&self, conn_id: &str) {
        let changed = {
            let mut session = self.session.write().await;
            if session.host.as_deref() == Some(conn_id) {
                session.host = None;
                tracing::info!("Host {} disconnected, slot released", conn_id);
                true
            } else if let Some(player) = session.players.get_mut(conn_id) {
                player.connected = false;
                tracing::info!("Player {} disconnected", conn_id);
                true
            } else {
                false
            }
        };

        if changed {
            self.broadcast_state().await;
        }
    }

    /// Remove a player entirely (host kick). Clears the buzz if they held it
    /// so the buzz owner always names a present player.
    pub async fn kick(&self, player_id: &str) {
        let removed = {
            let mut session = self.session.write().await;
            match session.players.remove(player_id) {
                Some(player) => {
                    if session.buzz_owner.as_deref() == Some(player_id) {
                        session.buzz_owner = None;
                    }
                    Some(player)
                }
                None => None,
            }
        };

        match removed {
            Some(player) => {
                tracing::info!("Kicked player {} (\"{}\")", player_id, player.name);
                self.broadcast_state().await;
            }
            None => tracing::debug!("Kick ignored, no such player: {}", player_id),
        }
    }

    /// Overwrite a player's score. Non-numeric input coerces to 0.
    pub async fn set_score(&self, player_id: &str, value: &serde_json::Value) {
        let score = value.as_i64().or_else(|| value.as_f64().map(|f| f as i64));
        let score = score.unwrap_or(0);

        let updated = {
            let mut session = self.session.write().await;
            match session.players.get_mut(player_id) {
                Some(player) => {
                    player.score = score;
                    true
                }
                None => false,
            }
        };

        if updated {
            tracing::info!("Set score of {} to {}", player_id, score);
            self.broadcast_state().await;
        } else {
            tracing::debug!("Set-score ignored, no such player: {}", player_id);
        }
    }

    /// Record a player's answer for the current round. Dropped outside the
    /// question phase or for unknown players.
    pub async fn submit_answer(&self, conn_id: &str, letter: &str) {
        let stored = {
            let mut session = self.session.write().await;
            if session.phase != Phase::Question {
                false
            } else {
                match session.players.get_mut(conn_id) {
                    Some(player) => {
                        let normalized = letter.trim().to_ascii_uppercase();
                        if normalized.is_empty() {
                            false
                        } else {
                            player.answer = Some(normalized);
                            true
                        }
                    }
                    None => false,
                }
            }
        };

        if stored {
            self.broadcast_state().await;
        } else {
            tracing::debug!("Answer from {} dropped", conn_id);
        }
    }
}
