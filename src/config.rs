//! Game configuration from environment variables.

use std::env;

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Countdown duration per question, in seconds.
    pub timer_seconds: u32,
    /// Points for a correct answer.
    pub points_correct: i64,
    /// Extra points when the correct answerer also owns the buzz.
    pub points_buzz_bonus: i64,
    /// Join capacity. Disconnected players keep their seat and still count.
    pub max_players: usize,
    /// Path to the question bank JSON file.
    pub questions_path: String,
    /// HTTP listen port.
    pub port: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            timer_seconds: 20,
            points_correct: 10,
            points_buzz_bonus: 5,
            max_players: 6,
            questions_path: "questions.json".to_string(),
            port: 3210,
        }
    }
}

impl GameConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            timer_seconds: parse_env("QUIZBUZZ_TIMER_SECONDS", defaults.timer_seconds),
            points_correct: parse_env("QUIZBUZZ_POINTS_CORRECT", defaults.points_correct),
            points_buzz_bonus: parse_env("QUIZBUZZ_POINTS_BUZZ_BONUS", defaults.points_buzz_bonus),
            max_players: parse_env("QUIZBUZZ_MAX_PLAYERS", defaults.max_players),
            questions_path: env::var("QUIZBUZZ_QUESTIONS_PATH")
                .unwrap_or(defaults.questions_path),
            port: parse_env("QUIZBUZZ_PORT", defaults.port),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}, using default", key);
            default
        }),
        Err(_) => default,
    }
}
