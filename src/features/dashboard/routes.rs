use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Create public dashboard routes
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/dashboard/summary", get(handlers::get_summary))
        .route("/api/dashboard/locations", get(handlers::get_location_stats))
        .route("/api/dashboard/top-reviews", get(handlers::get_top_reviews))
        .with_state(dashboard_service)
}
