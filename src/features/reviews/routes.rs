use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::locations::services::LocationService;
use crate::features::reviews::handlers::{self, ReviewState};
use crate::features::reviews::services::ReviewService;

/// Create routes for the reviews feature
pub fn routes(
    review_service: Arc<ReviewService>,
    location_service: Arc<LocationService>,
) -> Router {
    let state = ReviewState {
        review_service,
        location_service,
    };

    Router::new()
        .route(
            "/api/reviews",
            get(handlers::list_grouped).post(handlers::create_review),
        )
        .route("/api/reviews/live", get(handlers::stream_reviews))
        .route(
            "/api/reviews/{id}",
            axum::routing::delete(handlers::delete_review),
        )
        .route(
            "/api/locations/{id}/reviews",
            get(handlers::list_for_location),
        )
        .with_state(state)
}
