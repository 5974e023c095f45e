//! Scorer: pure delta computation applied once per round at reveal.
//!
//! Callers guarantee single invocation per round (the reveal phase gate in
//! the round controller); calling this twice would double-award.

use crate::config::GameConfig;
use crate::types::{Player, PlayerId, Session};
use std::collections::HashMap;

/// Compute the per-player score deltas for one reveal.
///
/// A player whose answer matches the correct key (case-insensitive,
/// whitespace-trimmed) earns `points_correct`; if they also own the buzz
/// they earn `buzz_bonus` on top. Everyone else earns nothing.
pub(crate) fn deltas(
    correct_key: &str,
    buzz_owner: Option<&str>,
    players: &HashMap<PlayerId, Player>,
    points_correct: i64,
    buzz_bonus: i64,
) -> Vec<(PlayerId, i64)> {
    let correct = correct_key.trim();

    players
        .values()
        .filter_map(|player| {
            let answer = player.answer.as_deref()?;
            if !answer.trim().eq_ignore_ascii_case(correct) {
                return None;
            }
            let mut points = points_correct;
            if buzz_owner == Some(player.id.as_str()) {
                points += buzz_bonus;
            }
            Some((player.id.clone(), points))
        })
        .collect()
}

/// Apply one reveal's deltas to the session's cumulative scores.
/// With no current question this is a no-op.
pub(crate) fn apply(session: &mut Session, config: &GameConfig) {
    let correct_key = match session.current_question() {
        Some(question) => question.answer.clone(),
        None => return,
    };

    let awarded = deltas(
        &correct_key,
        session.buzz_owner.as_deref(),
        &session.players,
        config.points_correct,
        config.points_buzz_bonus,
    );

    for (player_id, points) in awarded {
        if let Some(player) = session.players.get_mut(&player_id) {
            player.score += points;
        }
    }
}
