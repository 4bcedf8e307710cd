use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::history::handlers;
use crate::features::history::services::HistoryService;

/// Create routes for the history feature
pub fn routes(service: Arc<HistoryService>) -> Router {
    Router::new()
        .route("/api/history", get(handlers::list_history))
        .route("/api/history/live", get(handlers::stream_history))
        .with_state(service)
}
