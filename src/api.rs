//! HTTP question accessors.
//!
//! Player-facing: both endpoints return [`PublicQuestion`], which never
//! carries the correct key. The host sees the full question in its view
//! over the websocket instead.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::protocol::PublicQuestion;
use crate::state::AppState;

/// The current question, sanitized.
///
/// GET /api/question
///
/// `null` when there is no current question (lobby, empty bank, or an
/// index left out of range by a reload).
pub async fn current_question(
    State(state): State<Arc<AppState>>,
) -> Json<Option<PublicQuestion>> {
    let session = state.session.read().await;
    Json(session.current_question().map(PublicQuestion::from))
}

/// A question by index, sanitized.
///
/// GET /api/question/{index}
pub async fn question_by_index(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Json<Option<PublicQuestion>> {
    let session = state.session.read().await;
    Json(session.questions.get(index).map(PublicQuestion::from))
}
