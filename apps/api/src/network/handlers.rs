//! Contact endpoints: the relationship matrix with derived health, the
//! content-factory signal flow, and structured signal extraction.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::sse::{Event, Sse};
use axum::Json;
use chrono::{NaiveDate, Utc};
use futures_util::stream::Stream;
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::assist::sse_relay;
use crate::engine::decay::{evaluate, TouchHealth};
use crate::engine::recommender::{recommend, NextStep};
use crate::errors::AppError;
use crate::llm_client::personas::AssistMode;
use crate::llm_client::parse_structured;
use crate::models::contact::{Contact, ContactStage};
use crate::network::prompts::{render, EXTRACT_PROMPT_TEMPLATE, SIGNAL_PROMPT_TEMPLATE};
use crate::state::AppState;

/// A contact together with its derived relationship health. Health is
/// computed on read and never written back.
#[derive(Debug, Serialize)]
pub struct ContactView {
    #[serde(flatten)]
    pub contact: Contact,
    pub health: TouchHealth,
}

#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub contacts: Vec<ContactView>,
    pub threshold_days: i64,
}

/// GET /api/v1/contacts
pub async fn handle_list_contacts(
    State(state): State<AppState>,
) -> Result<Json<ContactListResponse>, AppError> {
    let threshold = state.config.resurface_threshold_days;
    let now = Utc::now();
    let store = state.store.read().await;
    let contacts = store
        .contacts()
        .iter()
        .map(|c| ContactView {
            health: evaluate(c.date.and_time(chrono::NaiveTime::MIN).and_utc(), now, threshold),
            contact: c.clone(),
        })
        .collect();
    Ok(Json(ContactListResponse {
        contacts,
        threshold_days: threshold,
    }))
}

#[derive(Debug, Deserialize)]
pub struct NewContactRequest {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub stage: Option<ContactStage>,
    #[serde(default)]
    pub last_topic: Option<String>,
    /// Last-touch date, `YYYY-MM-DD`. Defaults to today.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// POST /api/v1/contacts
pub async fn handle_add_contact(
    State(state): State<AppState>,
    Json(req): Json<NewContactRequest>,
) -> Result<Json<Contact>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("contact name must not be empty".to_string()));
    }
    if let Some(p) = req.priority {
        if !(1..=3).contains(&p) {
            return Err(AppError::Validation("priority must be 1, 2 or 3".to_string()));
        }
    }
    let date = match req.date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| AppError::Validation(format!("invalid date '{raw}': {e}")))?,
        None => Utc::now().date_naive(),
    };

    let contact = Contact {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        role: req.role,
        company: req.company,
        date,
        stage: req.stage.unwrap_or_default(),
        last_topic: req.last_topic.unwrap_or_default(),
        priority: req.priority,
        tags: req.tags,
        signal_score: None,
        reasoning: None,
        history: None,
    };

    let mut store = state.store.write().await;
    store.add_contact(contact.clone());
    info!("Logged contact {} ({})", contact.name, contact.id);
    Ok(Json(contact))
}

/// GET /api/v1/contacts/:id/next-step
/// A fresh uniform draw each call; repeats are possible by design.
pub async fn handle_next_step(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NextStep>, AppError> {
    let store = state.store.read().await;
    let contact = store
        .find_contact(&id)
        .ok_or_else(|| AppError::NotFound(format!("Contact {id} not found")))?;
    let step = recommend(
        &mut thread_rng(),
        contact.stage,
        &contact.name,
        &contact.last_topic,
        &contact.company,
    );
    Ok(Json(step))
}

#[derive(Debug, Deserialize)]
pub struct SignalRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub topic: String,
    pub insight: String,
}

fn or_unknown(value: &str) -> String {
    if value.trim().is_empty() {
        "Unknown".to_string()
    } else {
        value.to_string()
    }
}

/// POST /api/v1/network/signal
/// Content-factory flow: the contact is auto-logged before the collaborator
/// call, so a failed stream still leaves the interaction recorded. New
/// conversations default to the Warm stage.
pub async fn handle_signal(
    State(state): State<AppState>,
    Json(req): Json<SignalRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    if req.insight.trim().is_empty() {
        return Err(AppError::Validation("insight must not be empty".to_string()));
    }

    let contact = Contact {
        id: Uuid::new_v4().to_string(),
        name: or_unknown(&req.name),
        role: or_unknown(&req.role),
        company: or_unknown(&req.company),
        date: Utc::now().date_naive(),
        stage: ContactStage::Warm,
        last_topic: if req.topic.trim().is_empty() {
            "General".to_string()
        } else {
            req.topic.clone()
        },
        priority: None,
        tags: None,
        signal_score: None,
        reasoning: None,
        history: None,
    };

    {
        let mut store = state.store.write().await;
        store.add_contact(contact.clone());
    }
    info!("Auto-logged contact {} from signal input", contact.id);

    let session = state.collaborator.create_session(AssistMode::Network)?;
    let prompt = render(
        SIGNAL_PROMPT_TEMPLATE,
        &[
            ("name", contact.name.as_str()),
            ("role", contact.role.as_str()),
            ("company", contact.company.as_str()),
            ("topic", contact.last_topic.as_str()),
            ("insight", req.insight.as_str()),
        ],
    );
    Ok(sse_relay(state.collaborator.clone(), session, prompt))
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub contact_id: String,
    pub insight: String,
}

/// Structured signal analysis returned by the collaborator. Annotation only:
/// it decorates the contact and never drives a store invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalAnalysis {
    pub signal_score: u8,
    pub recommended_next_step: String,
    pub reasoning: String,
}

/// POST /api/v1/network/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<SignalAnalysis>, AppError> {
    // Resolve the contact up front so a bad id costs no collaborator call.
    let (name, role, company, topic) = {
        let store = state.store.read().await;
        let contact = store
            .find_contact(&req.contact_id)
            .ok_or_else(|| AppError::NotFound(format!("Contact {} not found", req.contact_id)))?;
        (
            contact.name.clone(),
            contact.role.clone(),
            contact.company.clone(),
            contact.last_topic.clone(),
        )
    };

    let session = state.collaborator.create_session(AssistMode::Network)?;
    let prompt = render(
        EXTRACT_PROMPT_TEMPLATE,
        &[
            ("name", name.as_str()),
            ("role", role.as_str()),
            ("company", company.as_str()),
            ("topic", topic.as_str()),
            ("insight", req.insight.as_str()),
        ],
    );
    let raw = state.collaborator.send_structured(&session, &prompt).await?;
    let mut analysis: SignalAnalysis = parse_structured(&raw)?;
    analysis.signal_score = analysis.signal_score.clamp(1, 10);

    let mut store = state.store.write().await;
    if let Some(contact) = store.find_contact_mut(&req.contact_id) {
        contact.signal_score = Some(analysis.signal_score);
        contact.reasoning = Some(analysis.reasoning.clone());
    }
    Ok(Json(analysis))
}
