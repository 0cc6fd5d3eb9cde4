use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::{LiveQuery, SubmissionService};

/// Create routes for the reports feature
///
/// All routes require a session; the caller applies the auth middleware.
pub fn routes(submission_service: Arc<SubmissionService>, live_query: Arc<LiveQuery>) -> Router {
    let state = ReportState {
        submission_service,
        live_query,
    };

    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::submit_report),
        )
        .route("/api/reports/stream", get(handlers::stream_reports))
        .with_state(state)
}
