//! Deal pipeline endpoints: board listing with the weighted forecast, stage
//! advancement, and the hunt flow that turns a pasted JD into a draft target.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::sse::{Event, Sse};
use axum::Json;
use chrono::Utc;
use futures_util::stream::Stream;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::assist::sse_relay;
use crate::engine::forecast::{format_with_separators, weighted_forecast};
use crate::errors::AppError;
use crate::llm_client::personas::AssistMode;
use crate::models::deal::{Deal, DealStage};
use crate::pipeline::prompts::HUNT_ANALYZE_PROMPT_TEMPLATE;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PipelineResponse {
    pub deals: Vec<Deal>,
    /// Probability-weighted total in the pipeline's implicit value unit.
    pub weighted_forecast: f64,
    /// Same total with thousands separators for display.
    pub weighted_forecast_display: String,
}

/// GET /api/v1/deals
pub async fn handle_list_deals(
    State(state): State<AppState>,
) -> Result<Json<PipelineResponse>, AppError> {
    let store = state.store.read().await;
    let deals = store.deals().to_vec();
    let total = weighted_forecast(&deals);
    Ok(Json(PipelineResponse {
        deals,
        weighted_forecast: total,
        weighted_forecast_display: format_with_separators(total),
    }))
}

#[derive(Debug, Deserialize)]
pub struct NewDealRequest {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub stage: Option<DealStage>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub next_step: Option<String>,
}

/// POST /api/v1/deals
pub async fn handle_add_deal(
    State(state): State<AppState>,
    Json(req): Json<NewDealRequest>,
) -> Result<Json<Deal>, AppError> {
    if req.company.trim().is_empty() {
        return Err(AppError::Validation("company must not be empty".to_string()));
    }
    let deal = Deal {
        id: Uuid::new_v4().to_string(),
        company: req.company,
        role: req.role,
        stage: req.stage.unwrap_or(DealStage::Target),
        value: req.value.unwrap_or_else(|| "TBD".to_string()),
        contacts: vec![],
        next_step: req.next_step.unwrap_or_else(|| "Research & Outreach".to_string()),
        date: Some(Utc::now().date_naive()),
        date_applied: None,
        next_follow_up: None,
    };
    let mut store = state.store.write().await;
    store.add_deal(deal.clone());
    info!("Added deal {} at {}", deal.id, deal.company);
    Ok(Json(deal))
}

/// PUT /api/v1/deals
/// Wholesale replacement of the deal collection.
pub async fn handle_replace_deals(
    State(state): State<AppState>,
    Json(deals): Json<Vec<Deal>>,
) -> Result<Json<PipelineResponse>, AppError> {
    let mut store = state.store.write().await;
    store.update_deals(deals);
    let deals = store.deals().to_vec();
    let total = weighted_forecast(&deals);
    Ok(Json(PipelineResponse {
        deals,
        weighted_forecast: total,
        weighted_forecast_display: format_with_separators(total),
    }))
}

#[derive(Debug, Serialize)]
pub struct AdvanceResponse {
    pub id: String,
    pub stage: DealStage,
}

/// POST /api/v1/deals/:id/advance
/// One step forward; idempotent at the terminal stages.
pub async fn handle_advance_deal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AdvanceResponse>, AppError> {
    let mut store = state.store.write().await;
    let stage = store
        .advance_deal_stage(&id)
        .ok_or_else(|| AppError::NotFound(format!("Deal {id} not found")))?;
    Ok(Json(AdvanceResponse { id, stage }))
}

#[derive(Debug, Deserialize)]
pub struct HuntRequest {
    pub jd_text: String,
}

/// POST /api/v1/hunt/target
/// Heuristic draft deal from a pasted JD: the first non-empty line (up to 50
/// chars) stands in for the role until the user edits it.
pub async fn handle_hunt_target(
    State(state): State<AppState>,
    Json(req): Json<HuntRequest>,
) -> Result<Json<Deal>, AppError> {
    if req.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text must not be empty".to_string()));
    }
    let title_guess = req
        .jd_text
        .lines()
        .find(|l| !l.trim().is_empty())
        .map(|l| l.trim().chars().take(50).collect::<String>())
        .unwrap_or_else(|| "Unknown Role".to_string());

    let deal = Deal {
        id: Uuid::new_v4().to_string(),
        company: "Target (See JD)".to_string(),
        role: title_guess,
        stage: DealStage::Target,
        value: "TBD".to_string(),
        contacts: vec![],
        next_step: "Research & Outreach".to_string(),
        date: Some(Utc::now().date_naive()),
        date_applied: None,
        next_follow_up: None,
    };

    let mut store = state.store.write().await;
    store.set_jd_text(req.jd_text);
    store.add_deal(deal.clone());
    Ok(Json(deal))
}

/// POST /api/v1/hunt/analyze
/// Streams the JD gap analysis; the JD is kept for the next snapshot export.
pub async fn handle_hunt_analyze(
    State(state): State<AppState>,
    Json(req): Json<HuntRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    if req.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text must not be empty".to_string()));
    }

    let resume_text = {
        let mut store = state.store.write().await;
        store.set_jd_text(req.jd_text.clone());
        store.resume_text().to_string()
    };

    let session = state.collaborator.create_session(AssistMode::Hunt)?;
    let prompt = HUNT_ANALYZE_PROMPT_TEMPLATE
        .replace("{jd_text}", &req.jd_text)
        .replace("{resume_text}", &resume_text);
    Ok(sse_relay(state.collaborator.clone(), session, prompt))
}
