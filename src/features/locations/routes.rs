use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::history::services::HistoryService;
use crate::features::locations::handlers::{self, LocationState};
use crate::features::locations::services::LocationService;

/// Create routes for the locations feature
pub fn routes(
    location_service: Arc<LocationService>,
    history_service: Arc<HistoryService>,
) -> Router {
    let state = LocationState {
        location_service,
        history_service,
    };

    Router::new()
        .route(
            "/api/locations",
            get(handlers::list_locations).post(handlers::create_location),
        )
        .route("/api/locations/live", get(handlers::stream_locations))
        .route("/api/locations/markers", get(handlers::list_markers))
        .route(
            "/api/locations/{id}",
            get(handlers::get_location)
                .put(handlers::update_location)
                .delete(handlers::delete_location),
        )
        .route("/api/locations/{id}/distance", get(handlers::get_distance))
        .route("/api/locations/{id}/visit", post(handlers::record_visit))
        .with_state(state)
}
