use quizbuzz::config::GameConfig;
use quizbuzz::protocol::{ClientMessage, ServerMessage};
use quizbuzz::state::AppState;
use quizbuzz::types::{Phase, Question, Role};
use quizbuzz::ws::handlers::handle_message;
use std::collections::BTreeMap;
use std::sync::Arc;

fn question(prompt: &str, answer: &str) -> Question {
    let mut options = BTreeMap::new();
    for key in ["A", "B", "C", "D"] {
        options.insert(key.to_string(), format!("{prompt} option {key}"));
    }
    Question {
        prompt: prompt.to_string(),
        options,
        answer: answer.to_string(),
    }
}

fn game_state(question_count: usize) -> Arc<AppState> {
    let questions = (0..question_count)
        .map(|i| question(&format!("Q{i}"), "B"))
        .collect();
    Arc::new(AppState::new(GameConfig::default(), questions))
}

async fn join(state: &Arc<AppState>, conn_id: &str, name: &str) -> ServerMessage {
    handle_message(
        ClientMessage::Join {
            name: name.to_string(),
        },
        &Role::Player,
        conn_id,
        state,
    )
    .await
    .expect("join always replies")
}

/// End-to-end flow: three players, a buzz race, answers, host reveal.
#[tokio::test]
async fn test_full_game_flow() {
    let state = game_state(2);
    let host = Role::Host;
    let player = Role::Player;

    // 1. Players join
    for (id, name) in [("amy", "Amy"), ("bo", "Bo"), ("cid", "Cid")] {
        match join(&state, id, name).await {
            ServerMessage::Joined { player } => assert_eq!(player.name, name),
            other => panic!("expected joined, got {other:?}"),
        }
    }

    // 2. Host starts the game
    handle_message(ClientMessage::HostStart, &host, "host", &state).await;
    assert_eq!(state.session.read().await.phase, Phase::Question);

    // 3. Bo buzzes first; Cid's buzz is ignored
    handle_message(ClientMessage::Buzz, &player, "bo", &state).await;
    handle_message(ClientMessage::Buzz, &player, "cid", &state).await;
    assert_eq!(
        state.session.read().await.buzz_owner.as_deref(),
        Some("bo")
    );

    // 4. Answers come in (correct key is "B")
    for (id, letter) in [("amy", "B"), ("bo", "A"), ("cid", "B")] {
        handle_message(
            ClientMessage::SubmitAnswer {
                letter: letter.to_string(),
            },
            &player,
            id,
            &state,
        )
        .await;
    }

    // 5. Host reveals: correct answerers get 10, the incorrect buzzer 0,
    //    and Bo keeps the buzz without earning a bonus.
    handle_message(ClientMessage::HostReveal, &host, "host", &state).await;

    let session = state.session.read().await;
    assert_eq!(session.phase, Phase::Reveal);
    assert_eq!(session.players["amy"].score, 10);
    assert_eq!(session.players["bo"].score, 0);
    assert_eq!(session.players["cid"].score, 10);
    assert_eq!(session.buzz_owner.as_deref(), Some("bo"));
    drop(session);

    // 6. A second reveal must not re-award points
    handle_message(ClientMessage::HostReveal, &host, "host", &state).await;
    assert_eq!(state.session.read().await.players["amy"].score, 10);

    // 7. Next question resets the round
    handle_message(ClientMessage::HostNext, &host, "host", &state).await;
    let session = state.session.read().await;
    assert_eq!(session.phase, Phase::Question);
    assert_eq!(session.current_index, 1);
    assert!(session.buzz_owner.is_none());
    assert!(session.players["amy"].answer.is_none());
    drop(session);

    // 8. Next past the last question ends the game
    handle_message(ClientMessage::HostNext, &host, "host", &state).await;
    assert_eq!(state.session.read().await.phase, Phase::Ended);
}

#[tokio::test]
async fn test_join_capacity() {
    let state = game_state(1);

    for i in 0..6 {
        match join(&state, &format!("p{i}"), &format!("Player{i}")).await {
            ServerMessage::Joined { .. } => {}
            other => panic!("expected joined, got {other:?}"),
        }
    }

    match join(&state, "p6", "Late").await {
        ServerMessage::Error { code, .. } => assert_eq!(code, "GAME_FULL"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_kick_versus_disconnect() {
    let state = game_state(1);
    join(&state, "amy", "Amy").await;
    join(&state, "bo", "Bo").await;

    // Disconnect keeps the player visible, flagged disconnected
    state.disconnect("amy").await;
    let view = state.session.read().await.player_view();
    let amy = view.players.iter().find(|p| p.id == "amy").unwrap();
    assert!(!amy.connected);

    // Kick removes the player from both views entirely
    handle_message(
        ClientMessage::HostKick {
            player_id: "bo".to_string(),
        },
        &Role::Host,
        "host",
        &state,
    )
    .await;

    let session = state.session.read().await;
    assert!(session.player_view().players.iter().all(|p| p.id != "bo"));
    assert!(session.host_view().players.iter().all(|p| p.id != "bo"));
}

#[tokio::test]
async fn test_set_score_coercion() {
    let state = game_state(1);
    join(&state, "amy", "Amy").await;
    let host = Role::Host;

    handle_message(
        ClientMessage::HostSetScore {
            player_id: "amy".to_string(),
            value: serde_json::json!(25),
        },
        &host,
        "host",
        &state,
    )
    .await;
    assert_eq!(state.session.read().await.players["amy"].score, 25);

    handle_message(
        ClientMessage::HostSetScore {
            player_id: "amy".to_string(),
            value: serde_json::json!("not a number"),
        },
        &host,
        "host",
        &state,
    )
    .await;
    assert_eq!(state.session.read().await.players["amy"].score, 0);
}

#[tokio::test]
async fn test_answer_rejected_outside_question_phase() {
    let state = game_state(1);
    join(&state, "amy", "Amy").await;

    // Still in lobby
    handle_message(
        ClientMessage::SubmitAnswer {
            letter: "B".to_string(),
        },
        &Role::Player,
        "amy",
        &state,
    )
    .await;
    assert!(state.session.read().await.players["amy"].answer.is_none());

    // And again after the game ended
    handle_message(ClientMessage::HostStart, &Role::Host, "host", &state).await;
    handle_message(ClientMessage::HostNext, &Role::Host, "host", &state).await;
    assert_eq!(state.session.read().await.phase, Phase::Ended);

    handle_message(
        ClientMessage::SubmitAnswer {
            letter: "B".to_string(),
        },
        &Role::Player,
        "amy",
        &state,
    )
    .await;
    assert!(state.session.read().await.players["amy"].answer.is_none());
}

/// Timer scenario: with no reveal issued, the countdown expires, the phase
/// auto-transitions to reveal with identical scoring, and `timer_ended`
/// fires exactly once.
#[tokio::test(start_paused = true)]
async fn test_timer_expiry_reveals_and_scores() {
    let state = game_state(1);
    join(&state, "amy", "Amy").await;

    let mut rx = state.broadcast.subscribe();
    handle_message(ClientMessage::HostStart, &Role::Host, "host", &state).await;
    handle_message(
        ClientMessage::SubmitAnswer {
            letter: " b ".to_string(),
        },
        &Role::Player,
        "amy",
        &state,
    )
    .await;

    // Run the countdown to completion (paused clock auto-advances).
    let handle = state.timer_task.write().await.take();
    if let Some(handle) = handle {
        let _ = handle.await;
    }

    let session = state.session.read().await;
    assert_eq!(session.phase, Phase::Reveal);
    assert_eq!(session.players["amy"].score, 10);
    drop(session);

    let mut ended = 0;
    let mut final_tick = None;
    while let Ok(msg) = rx.try_recv() {
        match msg {
            ServerMessage::TimerEnded => ended += 1,
            ServerMessage::TimerTick { remaining } => final_tick = Some(remaining),
            _ => {}
        }
    }
    assert_eq!(ended, 1);
    assert_eq!(final_tick, Some(0));
}

#[tokio::test]
async fn test_unauthorized_host_commands_are_dropped() {
    let state = game_state(1);
    join(&state, "amy", "Amy").await;

    for msg in [
        ClientMessage::HostStart,
        ClientMessage::HostNext,
        ClientMessage::HostReveal,
        ClientMessage::HostKick {
            player_id: "amy".to_string(),
        },
    ] {
        let reply = handle_message(msg, &Role::Player, "amy", &state).await;
        assert!(reply.is_none());
    }

    let session = state.session.read().await;
    assert_eq!(session.phase, Phase::Lobby);
    assert!(session.players.contains_key("amy"));
}
