//! Round Controller: the phase state machine and host-driven transitions.
//!
//! States run `lobby -> question <-> reveal -> question -> ... -> ended`.
//! Every transition produces the complete next session under the write
//! guard, releases it, then broadcasts. The countdown itself lives in
//! [`crate::timer`]; callers restart or stop it based on the outcome
//! reported here.

use super::{score, AppState};
use crate::protocol::ServerMessage;
use crate::questions;
use crate::types::Phase;

/// Outcome of an advance/retreat command, so the caller knows what to do
/// with the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAdvance {
    /// A new round began; the timer must be restarted.
    Started,
    /// The game ended; the timer must be stopped.
    Ended,
    /// Nothing changed and nothing was broadcast.
    NoOp,
}

impl AppState {
    /// Host `start`: valid from any phase. Jumps to question 0, clears all
    /// per-round fields and enters the question phase.
    pub async fn start_game(&self) {
        {
            let mut session = self.session.write().await;
            session.current_index = 0;
            session.reset_round();
            session.phase = Phase::Question;
        }
        tracing::info!("Game started at question 0");
        self.broadcast_state().await;
    }

    /// Host `next`: advance to the next question, or end the game when
    /// already on the last one. Only meaningful while a round is running.
    pub async fn next_question(&self) -> RoundAdvance {
        let outcome = {
            let mut session = self.session.write().await;
            match session.phase {
                Phase::Lobby => return RoundAdvance::NoOp,
                // Terminal: never advances again, but the repeat is still
                // broadcast so clients converge.
                Phase::Ended => RoundAdvance::Ended,
                Phase::Question | Phase::Reveal => {
                    if session.current_index + 1 < session.questions.len() {
                        session.current_index += 1;
                        session.reset_round();
                        session.phase = Phase::Question;
                        RoundAdvance::Started
                    } else {
                        session.phase = Phase::Ended;
                        session.timer_remaining = 0;
                        RoundAdvance::Ended
                    }
                }
            }
        };

        tracing::info!("Next question: {:?}", outcome);
        self.broadcast_state().await;
        outcome
    }

    /// Host `prev`: step back one question. At index 0 this is a full
    /// no-op: no state change, no broadcast.
    pub async fn prev_question(&self) -> RoundAdvance {
        {
            let mut session = self.session.write().await;
            if !matches!(session.phase, Phase::Question | Phase::Reveal)
                || session.current_index == 0
            {
                return RoundAdvance::NoOp;
            }
            session.current_index -= 1;
            session.reset_round();
            session.phase = Phase::Question;
        }

        tracing::info!("Stepped back one question");
        self.broadcast_state().await;
        RoundAdvance::Started
    }

    /// Host `reveal`: stop the countdown, then enter the reveal phase and
    /// score the round. Returns whether the reveal happened.
    pub async fn reveal(&self) -> bool {
        crate::timer::stop(self).await;
        self.apply_reveal().await
    }

    /// Enter the reveal phase and score the round, once. Honored only while
    /// `phase == question`, which is what makes scoring single-shot: a
    /// repeated reveal, or a host reveal racing the final timer tick, finds
    /// the phase already advanced and does nothing.
    ///
    /// Shared by the host command and timer expiry so the two paths are
    /// identical; only the host path also cancels the countdown task.
    pub(crate) async fn apply_reveal(&self) -> bool {
        let mut session = self.session.write().await;
        if session.phase != Phase::Question {
            drop(session);
            tracing::debug!("Reveal dropped: not in question phase");
            return false;
        }

        session.phase = Phase::Reveal;
        score::apply(&mut session, &self.config);
        let player_view = session.player_view();
        let host_view = session.host_view();
        drop(session);

        // No await between the mutation and the sends: once the write guard
        // is acquired this runs to completion in one poll, so an abort of
        // the countdown task can never leave a revealed, scored session
        // unbroadcast.
        self.broadcast_views(player_view, host_view);
        tracing::info!("Round revealed and scored");
        true
    }

    /// Host `reset-buzz`: clear the buzz owner and every buzzed flag,
    /// regardless of phase.
    pub async fn reset_buzz(&self) {
        {
            let mut session = self.session.write().await;
            session.buzz_owner = None;
            for player in session.players.values_mut() {
                player.buzzed = false;
            }
        }

        tracing::info!("Buzz reset");
        self.broadcast_to_all(ServerMessage::BuzzReset);
        self.broadcast_state().await;
    }

    /// Host `reload-questions`: replace the question list from the bank
    /// file. Failure degrades to an empty list; index and phase are left
    /// alone, an out-of-range index just means no current question.
    pub async fn reload_questions(&self) {
        let loaded = questions::load_or_empty(&self.config.questions_path);
        {
            let mut session = self.session.write().await;
            session.questions = loaded;
        }
        self.broadcast_state().await;
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::state_with_questions;
    use super::*;

    #[tokio::test]
    async fn start_enters_question_phase_at_index_zero() {
        let state = state_with_questions(3);
        state.start_game().await;

        let session = state.session.read().await;
        assert_eq!(session.phase, Phase::Question);
        assert_eq!(session.current_index, 0);
    }

    #[tokio::test]
    async fn start_clears_round_fields_from_previous_game() {
        let state = state_with_questions(2);
        state.join("p1", "Amy").await.unwrap();
        state.start_game().await;
        state.buzz("p1").await;
        state.submit_answer("p1", "B").await;

        state.start_game().await;

        let session = state.session.read().await;
        assert!(session.buzz_owner.is_none());
        assert!(session.players["p1"].answer.is_none());
        assert!(!session.players["p1"].buzzed);
    }

    #[tokio::test]
    async fn next_advances_then_ends_on_last_question() {
        let state = state_with_questions(2);
        state.start_game().await;

        assert_eq!(state.next_question().await, RoundAdvance::Started);
        assert_eq!(state.session.read().await.current_index, 1);

        assert_eq!(state.next_question().await, RoundAdvance::Ended);
        assert_eq!(state.session.read().await.phase, Phase::Ended);
    }

    #[tokio::test]
    async fn next_is_ignored_in_lobby() {
        let state = state_with_questions(2);
        assert_eq!(state.next_question().await, RoundAdvance::NoOp);
        assert_eq!(state.session.read().await.phase, Phase::Lobby);
    }

    #[tokio::test]
    async fn next_after_the_end_stays_ended() {
        let state = state_with_questions(1);
        state.start_game().await;
        assert_eq!(state.next_question().await, RoundAdvance::Ended);

        assert_eq!(state.next_question().await, RoundAdvance::Ended);
        let session = state.session.read().await;
        assert_eq!(session.phase, Phase::Ended);
        assert_eq!(session.current_index, 0);
    }

    #[tokio::test]
    async fn prev_at_index_zero_is_a_noop() {
        let state = state_with_questions(2);
        state.start_game().await;

        assert_eq!(state.prev_question().await, RoundAdvance::NoOp);

        let session = state.session.read().await;
        assert_eq!(session.current_index, 0);
        assert_eq!(session.phase, Phase::Question);
    }

    #[tokio::test]
    async fn prev_steps_back_and_resets_round() {
        let state = state_with_questions(3);
        state.join("p1", "Amy").await.unwrap();
        state.start_game().await;
        state.next_question().await;
        state.submit_answer("p1", "C").await;

        assert_eq!(state.prev_question().await, RoundAdvance::Started);

        let session = state.session.read().await;
        assert_eq!(session.current_index, 0);
        assert!(session.players["p1"].answer.is_none());
    }

    #[tokio::test]
    async fn reveal_scores_once_and_repeat_is_a_noop() {
        let state = state_with_questions(1);
        state.join("p1", "Amy").await.unwrap();
        state.start_game().await;
        state.submit_answer("p1", "B").await;

        assert!(state.reveal().await);
        assert_eq!(state.session.read().await.players["p1"].score, 10);

        // Second reveal in the same round must not re-award points.
        assert!(!state.reveal().await);
        assert_eq!(state.session.read().await.players["p1"].score, 10);
    }

    #[tokio::test]
    async fn reveal_broadcasts_the_revealed_state() {
        let state = state_with_questions(1);
        state.join("p1", "Amy").await.unwrap();
        state.start_game().await;
        state.submit_answer("p1", "B").await;

        let mut rx = state.broadcast.subscribe();
        let mut host_rx = state.host_broadcast.subscribe();
        assert!(state.reveal().await);

        match rx.recv().await.unwrap() {
            ServerMessage::State { view, .. } => assert_eq!(view.phase, Phase::Reveal),
            other => panic!("expected state, got {other:?}"),
        }
        assert!(matches!(
            host_rx.recv().await.unwrap(),
            ServerMessage::HostState { .. }
        ));
    }

    #[tokio::test]
    async fn reveal_outside_question_phase_is_dropped() {
        let state = state_with_questions(1);
        assert!(!state.reveal().await);
        assert_eq!(state.session.read().await.phase, Phase::Lobby);
    }

    #[tokio::test]
    async fn reset_buzz_clears_owner_and_flags() {
        let state = state_with_questions(1);
        state.join("p1", "Amy").await.unwrap();
        state.start_game().await;
        state.buzz("p1").await;

        let mut rx = state.broadcast.subscribe();
        state.reset_buzz().await;

        let session = state.session.read().await;
        assert!(session.buzz_owner.is_none());
        assert!(!session.players["p1"].buzzed);
        assert!(matches!(
            rx.recv().await.unwrap(),
            ServerMessage::BuzzReset
        ));
    }

    #[tokio::test]
    async fn reload_failure_degrades_to_empty_list() {
        let mut config = crate::config::GameConfig::default();
        config.questions_path = "/nonexistent/questions.json".to_string();
        let state = AppState::new(config, vec![super::super::test_support::question("Q0", "B")]);
        state.start_game().await;

        state.reload_questions().await;

        let session = state.session.read().await;
        assert!(session.questions.is_empty());
        assert_eq!(session.phase, Phase::Question);
        assert!(session.current_question().is_none());
    }
}
