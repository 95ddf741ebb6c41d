use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::llm_client::Collaborator;
use crate::store::NexusStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The authoritative in-memory store. Single logical writer: handlers
    /// take the lock for one synchronous mutation and drop it before any
    /// await point.
    pub store: Arc<RwLock<NexusStore>>,
    /// Pluggable AI collaborator. Default: `GeminiClient`; tests substitute
    /// a scripted implementation.
    pub collaborator: Arc<dyn Collaborator>,
    pub config: Config,
}
