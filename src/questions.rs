//! Question bank loading.
//!
//! The bank is a JSON array of `{ "prompt": ..., "options": {"A": ...},
//! "answer": "B" }` records. Loading is fail-soft at the call sites: a
//! missing or malformed file degrades to an empty list, never a crash.

use crate::types::Question;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuestionError {
    #[error("failed to read question file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse question file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load the ordered question list from a JSON file.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Question>, QuestionError> {
    let contents = std::fs::read_to_string(path)?;
    let questions: Vec<Question> = serde_json::from_str(&contents)?;
    Ok(questions)
}

/// Load questions, degrading to an empty list on any failure.
pub fn load_or_empty(path: impl AsRef<Path>) -> Vec<Question> {
    match load(&path) {
        Ok(questions) => {
            tracing::info!(
                "Loaded {} questions from {}",
                questions.len(),
                path.as_ref().display()
            );
            questions
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load questions from {}: {}",
                path.as_ref().display(),
                e
            );
            Vec::new()
        }
    }
}
