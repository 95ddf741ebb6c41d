//! Journal and interview-log endpoints. Thin wrappers over the store's
//! upsert/prepend operations; AI synthesis of entries goes through the
//! generic assist stream.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::journal::{InterviewSession, JournalEntry};
use crate::state::AppState;

/// GET /api/v1/journal
pub async fn handle_list_journal(
    State(state): State<AppState>,
) -> Result<Json<Vec<JournalEntry>>, AppError> {
    let store = state.store.read().await;
    Ok(Json(store.journal().to_vec()))
}

/// POST /api/v1/journal
/// Upsert by id. Callers may omit `aiAnalysis` on edits without losing the
/// stored analysis; sending it explicitly overwrites.
pub async fn handle_save_journal(
    State(state): State<AppState>,
    Json(mut entry): Json<JournalEntry>,
) -> Result<Json<JournalEntry>, AppError> {
    if entry.title.trim().is_empty() && entry.content.trim().is_empty() {
        return Err(AppError::Validation(
            "journal entry needs a title or content".to_string(),
        ));
    }
    if entry.id.trim().is_empty() {
        entry.id = Uuid::new_v4().to_string();
    }
    let mut store = state.store.write().await;
    store.save_journal_entry(entry.clone());
    let saved = store
        .journal()
        .iter()
        .find(|e| e.id == entry.id)
        .cloned()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("journal upsert lost entry")))?;
    Ok(Json(saved))
}

/// GET /api/v1/interviews
pub async fn handle_list_interviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<InterviewSession>>, AppError> {
    let store = state.store.read().await;
    Ok(Json(store.interview_log().to_vec()))
}

#[derive(Debug, Deserialize)]
pub struct NewInterviewRequest {
    pub layer: String,
    pub question: String,
    pub score: f64,
}

/// POST /api/v1/interviews
pub async fn handle_log_interview(
    State(state): State<AppState>,
    Json(req): Json<NewInterviewRequest>,
) -> Result<Json<InterviewSession>, AppError> {
    if !(0.0..=10.0).contains(&req.score) {
        return Err(AppError::Validation("score must be within 0-10".to_string()));
    }
    let session = InterviewSession {
        id: Uuid::new_v4().to_string(),
        layer: req.layer,
        question: req.question,
        score: req.score,
        timestamp: Utc::now().to_rfc3339(),
    };
    let mut store = state.store.write().await;
    store.log_interview(session.clone());
    Ok(Json(session))
}
