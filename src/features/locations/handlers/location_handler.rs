use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::Stream;
use serde::Deserialize;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::history::services::HistoryService;
use crate::features::locations::dtos::{
    CreateLocationDto, DistanceResponseDto, LocationResponseDto, MarkerDto, UpdateLocationDto,
    VisitResponseDto,
};
use crate::features::locations::models::Location;
use crate::features::locations::services::LocationService;
use crate::shared::types::{ApiResponse, Meta};

/// Shared state for location routes
#[derive(Clone)]
pub struct LocationState {
    pub location_service: Arc<LocationService>,
    pub history_service: Arc<HistoryService>,
}

/// Query params for the marker listing
#[derive(Debug, Deserialize)]
pub struct MarkerQuery {
    /// Filter by category ("Wisata" / "Kuliner"); omit for all
    pub category: Option<String>,
}

/// Query params for the distance endpoint
#[derive(Debug, Deserialize)]
pub struct DistanceQuery {
    /// Caller position as "lat,lon"
    pub from: String,
}

/// List saved locations
#[utoipa::path(
    get,
    path = "/api/locations",
    responses(
        (status = 200, description = "List of saved locations", body = ApiResponse<Vec<LocationResponseDto>>),
    ),
    tag = "locations"
)]
pub async fn list_locations(
    State(state): State<LocationState>,
) -> Result<Json<ApiResponse<Vec<LocationResponseDto>>>> {
    let locations = state.location_service.list().await;
    let total = locations.len() as i64;
    let data: Vec<LocationResponseDto> = locations.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total }),
    )))
}

/// Get one location by id
#[utoipa::path(
    get,
    path = "/api/locations/{id}",
    params(
        ("id" = String, Path, description = "Location id")
    ),
    responses(
        (status = 200, description = "Location found", body = ApiResponse<LocationResponseDto>),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn get_location(
    State(state): State<LocationState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LocationResponseDto>>> {
    let location = state.location_service.get(&id).await?;
    Ok(Json(ApiResponse::success(Some(location.into()), None, None)))
}

/// Save a new location
#[utoipa::path(
    post,
    path = "/api/locations",
    request_body = CreateLocationDto,
    responses(
        (status = 200, description = "Location saved", body = ApiResponse<LocationResponseDto>),
        (status = 400, description = "Missing name or malformed coordinates")
    ),
    tag = "locations"
)]
pub async fn create_location(
    State(state): State<LocationState>,
    AppJson(dto): AppJson<CreateLocationDto>,
) -> Result<Json<ApiResponse<LocationResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let location = state.location_service.create(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(location.into()),
        Some("Data berhasil disimpan!".to_string()),
        None,
    )))
}

/// Edit an existing location
#[utoipa::path(
    put,
    path = "/api/locations/{id}",
    params(
        ("id" = String, Path, description = "Location id")
    ),
    request_body = UpdateLocationDto,
    responses(
        (status = 200, description = "Location updated", body = ApiResponse<LocationResponseDto>),
        (status = 400, description = "Missing name or malformed coordinates"),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn update_location(
    State(state): State<LocationState>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateLocationDto>,
) -> Result<Json<ApiResponse<LocationResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let location = state.location_service.update(&id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(location.into()),
        Some("Data berhasil diperbarui!".to_string()),
        None,
    )))
}

/// Delete a location
#[utoipa::path(
    delete,
    path = "/api/locations/{id}",
    params(
        ("id" = String, Path, description = "Location id")
    ),
    responses(
        (status = 200, description = "Location deleted"),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn delete_location(
    State(state): State<LocationState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.location_service.delete(&id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Lokasi dihapus".to_string()),
        None,
    )))
}

/// Map markers with rating summaries
///
/// Locations whose coordinate string does not parse are left out; the
/// remaining markers still render.
#[utoipa::path(
    get,
    path = "/api/locations/markers",
    params(
        ("category" = Option<String>, Query, description = "Filter by category (Wisata/Kuliner)")
    ),
    responses(
        (status = 200, description = "Map markers", body = ApiResponse<Vec<MarkerDto>>),
    ),
    tag = "locations"
)]
pub async fn list_markers(
    State(state): State<LocationState>,
    Query(query): Query<MarkerQuery>,
) -> Result<Json<ApiResponse<Vec<MarkerDto>>>> {
    let markers = state.location_service.markers(query.category.as_deref()).await;
    let total = markers.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(markers),
        None,
        Some(Meta { total }),
    )))
}

/// Distance from a caller position to a location
#[utoipa::path(
    get,
    path = "/api/locations/{id}/distance",
    params(
        ("id" = String, Path, description = "Location id"),
        ("from" = String, Query, description = "Caller position as \"lat,lon\"")
    ),
    responses(
        (status = 200, description = "Distance in kilometers", body = ApiResponse<DistanceResponseDto>),
        (status = 400, description = "Malformed coordinates"),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn get_distance(
    State(state): State<LocationState>,
    Path(id): Path<String>,
    Query(query): Query<DistanceQuery>,
) -> Result<Json<ApiResponse<DistanceResponseDto>>> {
    let distance = state.location_service.distance_from(&id, &query.from).await?;
    Ok(Json(ApiResponse::success(Some(distance), None, None)))
}

/// Record a visit and return a directions link
///
/// Stores a history entry with the location's name and coordinates, the
/// same side effect the mobile app performed when opening directions.
#[utoipa::path(
    post,
    path = "/api/locations/{id}/visit",
    params(
        ("id" = String, Path, description = "Location id")
    ),
    responses(
        (status = 200, description = "Visit recorded", body = ApiResponse<VisitResponseDto>),
        (status = 400, description = "Location has malformed coordinates"),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn record_visit(
    State(state): State<LocationState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VisitResponseDto>>> {
    let location = state.location_service.get(&id).await?;
    let directions_url = LocationService::directions_url(&location)?;
    let entry = state.history_service.record_visit(&location).await?;

    Ok(Json(ApiResponse::success(
        Some(VisitResponseDto {
            history_id: entry.id,
            name: entry.name,
            coordinates: entry.coordinates,
            visited_at: entry.visited_at,
            directions_url,
        }),
        None,
        None,
    )))
}

/// Live snapshot stream for saved locations
///
/// Server-sent events; each event carries the full decoded collection,
/// re-sent on every change.
#[utoipa::path(
    get,
    path = "/api/locations/live",
    responses(
        (status = 200, description = "SSE stream of location snapshots"),
    ),
    tag = "locations"
)]
pub async fn stream_locations(
    State(state): State<LocationState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let stream = WatchStream::new(state.location_service.watch()).map(|documents| {
        let snapshot: Vec<LocationResponseDto> = documents
            .iter()
            .filter_map(Location::from_document)
            .map(Into::into)
            .collect();
        Ok(Event::default()
            .event("snapshot")
            .json_data(&snapshot)
            .unwrap_or_else(|_| Event::default()))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
