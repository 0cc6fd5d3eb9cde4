use axum::{routing::get, Router};

use crate::features::content::handlers;

/// Create routes for the static content
///
/// Note: These routes are public (no session required)
pub fn routes() -> Router {
    Router::new()
        .route("/api/content/faq", get(handlers::get_faq))
        .route("/api/content/info", get(handlers::get_info))
        .route("/api/content/taxonomy", get(handlers::get_taxonomy))
}
