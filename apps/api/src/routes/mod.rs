pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assist::handle_assist_stream;
use crate::bridge::handlers as bridge;
use crate::journal::handlers as journal;
use crate::network::handlers as network;
use crate::pipeline::handlers as pipeline;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Relationship matrix
        .route(
            "/api/v1/contacts",
            get(network::handle_list_contacts).post(network::handle_add_contact),
        )
        .route(
            "/api/v1/contacts/:id/next-step",
            get(network::handle_next_step),
        )
        .route("/api/v1/network/signal", post(network::handle_signal))
        .route("/api/v1/network/extract", post(network::handle_extract))
        // Pipeline
        .route(
            "/api/v1/deals",
            get(pipeline::handle_list_deals)
                .post(pipeline::handle_add_deal)
                .put(pipeline::handle_replace_deals),
        )
        .route(
            "/api/v1/deals/:id/advance",
            post(pipeline::handle_advance_deal),
        )
        .route("/api/v1/hunt/target", post(pipeline::handle_hunt_target))
        .route("/api/v1/hunt/analyze", post(pipeline::handle_hunt_analyze))
        // Journal & interview log
        .route(
            "/api/v1/journal",
            get(journal::handle_list_journal).post(journal::handle_save_journal),
        )
        .route(
            "/api/v1/interviews",
            get(journal::handle_list_interviews).post(journal::handle_log_interview),
        )
        // AI pass-through
        .route("/api/v1/assist/stream", post(handle_assist_stream))
        // Snapshot bridge
        .route(
            "/api/v1/snapshot",
            get(bridge::handle_export).post(bridge::handle_import),
        )
        .with_state(state)
}
