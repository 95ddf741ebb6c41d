//! Generic pass-through to the AI collaborator plus the SSE relay shared by
//! every streaming endpoint.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::Stream;
use futures_util::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::errors::AppError;
use crate::llm_client::personas::AssistMode;
use crate::llm_client::{Collaborator, Session};
use crate::state::AppState;

/// Spawns a collaborator streaming call and exposes it as an SSE response.
/// A transport failure surfaces as one terminal error-marker event; the
/// stream always reaches a terminal state.
pub fn sse_relay(
    collaborator: Arc<dyn Collaborator>,
    session: Session,
    prompt: String,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel::<String>(32);
    tokio::spawn(async move {
        collaborator.stream_message(&session, &prompt, tx).await;
    });

    let stream = ReceiverStream::new(rx).map(|chunk| Ok(Event::default().data(chunk)));
    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, Deserialize)]
pub struct AssistRequest {
    pub mode: AssistMode,
    pub prompt: String,
}

/// POST /api/v1/assist/stream
/// Direct mode + prompt pass-through; no store interaction.
pub async fn handle_assist_stream(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<AssistRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    if req.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt must not be empty".to_string()));
    }
    let session = state.collaborator.create_session(req.mode)?;
    Ok(sse_relay(state.collaborator.clone(), session, req.prompt))
}
