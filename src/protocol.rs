use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    Join {
        name: String,
    },
    Buzz,
    SubmitAnswer {
        letter: String,
    },
    // Host-only messages
    HostStart,
    HostNext,
    HostPrev,
    HostReveal,
    HostResetBuzz,
    HostKick {
        player_id: PlayerId,
    },
    HostSetScore {
        player_id: PlayerId,
        /// Raw JSON so a non-numeric value coerces to 0 instead of failing.
        value: serde_json::Value,
    },
    HostReloadQuestions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        role: Role,
        player_id: PlayerId,
        server_now: String,
        view: PlayerView,
    },
    /// Reply to a successful join.
    Joined {
        player: PlayerPublicInfo,
    },
    /// General state update, sent to every connection.
    State {
        view: PlayerView,
        server_now: String,
    },
    /// Full state update, sent to the host connection only.
    HostState {
        view: HostView,
        server_now: String,
    },
    BuzzLocked {
        player_id: PlayerId,
        name: String,
    },
    BuzzReset,
    TimerTick {
        remaining: u32,
    },
    TimerEnded,
    Error {
        code: String,
        msg: String,
    },
}

/// A question sanitized for player-facing callers: no correct key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub prompt: String,
    pub options: BTreeMap<String, String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            prompt: q.prompt.clone(),
            options: q.options.clone(),
        }
    }
}

/// Per-player info safe for any recipient (no answer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerPublicInfo {
    pub id: PlayerId,
    pub name: String,
    pub score: i64,
    pub buzzed: bool,
    pub connected: bool,
}

impl From<&Player> for PlayerPublicInfo {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            score: p.score,
            buzzed: p.buzzed,
            connected: p.connected,
        }
    }
}

/// Host-only per-player info (includes the current raw answer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerHostInfo {
    pub id: PlayerId,
    pub name: String,
    pub score: i64,
    pub buzzed: bool,
    pub connected: bool,
    pub answer: Option<String>,
}

impl From<&Player> for PlayerHostInfo {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            score: p.score,
            buzzed: p.buzzed,
            connected: p.connected,
            answer: p.answer.clone(),
        }
    }
}

/// What every connection may see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub phase: Phase,
    pub question_index: usize,
    pub question_count: usize,
    pub buzz_owner: Option<PlayerId>,
    pub players: Vec<PlayerPublicInfo>,
}

/// What only the host connection may see: the full current question
/// (including the correct key) and every player's answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostView {
    pub phase: Phase,
    pub question_index: usize,
    pub question_count: usize,
    pub buzz_owner: Option<PlayerId>,
    pub players: Vec<PlayerHostInfo>,
    pub question: Option<Question>,
    pub host_id: Option<PlayerId>,
}
