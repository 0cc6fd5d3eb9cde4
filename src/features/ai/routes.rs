use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::ai::handlers;
use crate::features::ai::services::ClassificationService;

/// Create routes for the AI helpers
pub fn routes(service: Arc<ClassificationService>) -> Router {
    Router::new()
        .route("/api/ai/classify", post(handlers::classify))
        .route("/api/ai/keywords", post(handlers::extract_keywords))
        .route("/api/ai/sentiment", post(handlers::analyze_sentiment))
        .route("/api/ai/suggestions", post(handlers::get_suggestions))
        .route("/api/ai/status", get(handlers::get_status))
        .with_state(service)
}
