use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Opaque ID type for type safety
pub type PlayerId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Lobby,
    Question,
    Reveal,
    Ended,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Host,
    Player,
    /// A connection that watches but cannot join or control the game
    /// (e.g. a second host while the host slot is taken).
    Spectator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: i64,
    /// Normalized option key, cleared at the start of every round.
    pub answer: Option<String>,
    pub buzzed: bool,
    pub connected: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            score: 0,
            answer: None,
            buzzed: false,
            connected: true,
        }
    }
}

/// A multiple-choice question. Immutable once loaded.
///
/// `answer` is the correct option key and must never reach a player-facing
/// view; see [`crate::protocol::PublicQuestion`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: BTreeMap<String, String>,
    pub answer: String,
}

/// The authoritative game state. One per process, owned by
/// [`crate::state::AppState`] behind a single lock.
#[derive(Debug)]
pub struct Session {
    pub phase: Phase,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub players: HashMap<PlayerId, Player>,
    pub host: Option<PlayerId>,
    /// At most one player holds the buzz per round.
    pub buzz_owner: Option<PlayerId>,
    pub timer_remaining: u32,
}

impl Session {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            phase: Phase::Lobby,
            questions,
            current_index: 0,
            players: HashMap::new(),
            host: None,
            buzz_owner: None,
            timer_remaining: 0,
        }
    }

    /// The question at the current index, if any. An index left out of range
    /// by a question reload is treated as "no current question".
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Clear every per-round field: answers, buzzed flags, buzz owner.
    /// Called at the start of every round so nothing carries over.
    pub fn reset_round(&mut self) {
        self.buzz_owner = None;
        for player in self.players.values_mut() {
            player.answer = None;
            player.buzzed = false;
        }
    }
}
