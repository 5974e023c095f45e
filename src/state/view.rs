//! View Projector: the asymmetric read-only projections of the session.
//!
//! The player view never carries any player's answer or a question's
//! correct key; the host view carries both. Nothing else in the crate
//! serializes session contents toward clients.

use crate::protocol::{HostView, PlayerHostInfo, PlayerPublicInfo, PlayerView};
use crate::types::Session;

impl Session {
    /// The view safe for every connection.
    pub fn player_view(&self) -> PlayerView {
        let mut players: Vec<PlayerPublicInfo> =
            self.players.values().map(PlayerPublicInfo::from).collect();
        players.sort_by(|a, b| a.id.cmp(&b.id));

        PlayerView {
            phase: self.phase,
            question_index: self.current_index,
            question_count: self.questions.len(),
            buzz_owner: self.buzz_owner.clone(),
            players,
        }
    }

    /// The view for the host connection only: everything in the player
    /// view plus the full current question and every raw answer.
    pub fn host_view(&self) -> HostView {
        let mut players: Vec<PlayerHostInfo> =
            self.players.values().map(PlayerHostInfo::from).collect();
        players.sort_by(|a, b| a.id.cmp(&b.id));

        HostView {
            phase: self.phase,
            question_index: self.current_index,
            question_count: self.questions.len(),
            buzz_owner: self.buzz_owner.clone(),
            players,
            question: self.current_question().cloned(),
            host_id: self.host.clone(),
        }
    }
}
