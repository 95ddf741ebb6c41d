//! Snapshot endpoints. Export returns the full interchange document; import
//! accepts raw bytes, parses before touching the store, and reports which
//! top-level keys were applied so the replace-vs-preserve behavior stays
//! visible to the caller.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::bridge::{apply_snapshot, export_snapshot, parse_snapshot, Snapshot};
use crate::errors::AppError;
use crate::state::AppState;

const SNAPSHOT_KEYS: [&str; 6] = [
    "contacts",
    "deals",
    "outreach_log",
    "interview_log",
    "resume_text",
    "jd_text",
];

/// GET /api/v1/snapshot
pub async fn handle_export(State(state): State<AppState>) -> Result<Json<Snapshot>, AppError> {
    let store = state.store.read().await;
    Ok(Json(export_snapshot(&store, Utc::now())))
}

#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub source: String,
    pub version: String,
    /// Keys present in the document; each replaced its collection wholesale.
    pub applied: Vec<&'static str>,
    /// Keys absent from the document; those collections were preserved.
    pub absent: Vec<&'static str>,
}

/// POST /api/v1/snapshot
/// All-or-nothing per document: a parse failure leaves the store untouched.
pub async fn handle_import(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImportReport>, AppError> {
    let snapshot = parse_snapshot(&body)?;
    let source = snapshot.source.clone();
    let version = snapshot.version.clone();

    let mut store = state.store.write().await;
    let applied = apply_snapshot(&mut store, snapshot);
    drop(store);

    let absent = SNAPSHOT_KEYS
        .iter()
        .copied()
        .filter(|k| !applied.contains(k))
        .collect();
    info!("Imported snapshot from '{source}' (v{version}); applied: {applied:?}");
    Ok(Json(ImportReport {
        source,
        version,
        applied,
        absent,
    }))
}
