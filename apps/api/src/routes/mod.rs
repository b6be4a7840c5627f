pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::analysis::handlers as analysis;
use crate::assistant::handlers as assistant;
use crate::presentation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring API
        .route(
            "/api/analyze",
            get(analysis::handle_analyze_hello).post(analysis::handle_analyze),
        )
        .route("/api/followup", post(analysis::handle_followup))
        .route("/api/skills", get(analysis::handle_skills))
        // Assistant API
        .route("/api/chat", post(assistant::handle_chat))
        .route("/api/suggestAnswers", post(assistant::handle_suggest_answers))
        // Presentation
        .route("/api/overview", post(presentation::handle_overview))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
