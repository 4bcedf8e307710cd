use std::sync::Arc;

use tokio::sync::watch;

use crate::core::error::{AppError, Result};
use crate::features::locations::dtos::{
    CreateLocationDto, DistanceResponseDto, MarkerDto, UpdateLocationDto,
};
use crate::features::locations::models::Location;
use crate::features::reviews::services::ReviewService;
use crate::modules::store::{Document, DocumentStore};
use crate::shared::constants::{DEFAULT_CATEGORY, POINTS_COLLECTION};
use crate::shared::geo;

/// Service for saved locations
pub struct LocationService {
    store: Arc<dyn DocumentStore>,
    reviews: Arc<ReviewService>,
}

impl LocationService {
    pub fn new(store: Arc<dyn DocumentStore>, reviews: Arc<ReviewService>) -> Self {
        Self { store, reviews }
    }

    /// All decodable locations. A failed remote read is logged and shown
    /// as an empty snapshot rather than an error.
    pub async fn list(&self) -> Vec<Location> {
        let documents = match self.store.snapshot(POINTS_COLLECTION).await {
            Ok(documents) => documents,
            Err(err) => {
                tracing::error!("Failed to read locations: {}", err);
                Vec::new()
            }
        };
        documents.iter().filter_map(Location::from_document).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Location> {
        self.list()
            .await
            .into_iter()
            .find(|location| location.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Location '{}' not found", id)))
    }

    pub async fn create(&self, dto: CreateLocationDto) -> Result<Location> {
        let location = Location {
            id: String::new(),
            name: dto.name.trim().to_string(),
            category: normalized_category(dto.category)
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            coordinates: dto.coordinates.trim().to_string(),
            accuracy: dto.accuracy,
        };

        let data = serde_json::to_value(&location).map_err(|e| AppError::Internal(e.to_string()))?;
        let id = self.store.insert(POINTS_COLLECTION, data).await?;
        tracing::info!("Location created: id={}, name={}", id, location.name);

        Ok(Location { id, ..location })
    }

    pub async fn update(&self, id: &str, dto: UpdateLocationDto) -> Result<Location> {
        let existing = self.get(id).await?;
        let location = Location {
            id: existing.id,
            name: dto.name.trim().to_string(),
            category: normalized_category(dto.category).unwrap_or(existing.category),
            coordinates: dto.coordinates.trim().to_string(),
            accuracy: dto.accuracy.or(existing.accuracy),
        };

        let data = serde_json::to_value(&location).map_err(|e| AppError::Internal(e.to_string()))?;
        self.store.update(POINTS_COLLECTION, id, data).await?;
        tracing::info!("Location updated: id={}", id);

        Ok(location)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.remove(POINTS_COLLECTION, id).await?;
        tracing::info!("Location deleted: id={}", id);
        Ok(())
    }

    /// Map markers with rating summaries, optionally filtered by category.
    ///
    /// Records whose coordinate string does not parse are skipped one by
    /// one; the rest of the snapshot still renders.
    pub async fn markers(&self, category: Option<&str>) -> Vec<MarkerDto> {
        let reviews = self.reviews.all().await;

        self.list()
            .await
            .into_iter()
            .filter(|location| category.map_or(true, |wanted| location.category == wanted))
            .filter_map(|location| match geo::parse_coordinates(&location.coordinates) {
                Ok(position) => Some((location, position)),
                Err(err) => {
                    tracing::warn!(
                        "Invalid coordinates for point '{}': {}",
                        location.id,
                        err
                    );
                    None
                }
            })
            .map(|(location, position)| {
                let for_location = ReviewService::reviews_for_location(&reviews, &location.id);
                let summary = ReviewService::rating_summary(&for_location);
                MarkerDto {
                    id: location.id,
                    name: location.name,
                    category: location.category,
                    latitude: position.latitude,
                    longitude: position.longitude,
                    review_count: summary.count as i64,
                    average_rating: geo::round2(summary.average),
                }
            })
            .collect()
    }

    /// Great-circle distance from a caller position to a stored location.
    pub async fn distance_from(&self, id: &str, from: &str) -> Result<DistanceResponseDto> {
        let origin = geo::parse_coordinates(from)?;
        let location = self.get(id).await?;
        let target = geo::parse_coordinates(&location.coordinates).map_err(|err| {
            AppError::BadRequest(format!(
                "Location '{}' has malformed coordinates: {}",
                location.id, err
            ))
        })?;

        Ok(DistanceResponseDto {
            location_id: location.id,
            from: origin.to_string(),
            distance_km: geo::round2(geo::haversine_km(origin, target)),
        })
    }

    /// Google Maps directions link for a location, as the mobile app built it.
    pub fn directions_url(location: &Location) -> Result<String> {
        let target = geo::parse_coordinates(&location.coordinates).map_err(|err| {
            AppError::BadRequest(format!(
                "Location '{}' has malformed coordinates: {}",
                location.id, err
            ))
        })?;
        Ok(format!(
            "https://www.google.com/maps/dir/?api=1&destination={},{}",
            target.latitude, target.longitude
        ))
    }

    /// Live snapshot subscription for the `points` collection.
    pub fn watch(&self) -> watch::Receiver<Vec<Document>> {
        self.store.watch(POINTS_COLLECTION)
    }
}

fn normalized_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::{MemoryStore, StoreError, StoreResult};
    use crate::shared::test_helpers::{insert_point, insert_review};
    use async_trait::async_trait;
    use serde_json::Value;

    fn service(store: Arc<MemoryStore>) -> LocationService {
        let reviews = Arc::new(ReviewService::new(store.clone()));
        LocationService::new(store, reviews)
    }

    #[tokio::test]
    async fn test_markers_skip_malformed_records_individually() {
        let store = Arc::new(MemoryStore::new());
        let good = insert_point(&store, "Keraton", "-7.5754,110.8243", "Wisata").await;
        insert_point(&store, "Broken", "abc,123", "Wisata").await;

        let markers = service(store).markers(None).await;
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].id, good);
    }

    #[tokio::test]
    async fn test_markers_filter_by_category_and_attach_ratings() {
        let store = Arc::new(MemoryStore::new());
        let galabo = insert_point(&store, "Galabo", "-7.5690,110.8330", "Kuliner").await;
        insert_point(&store, "Keraton", "-7.5754,110.8243", "Wisata").await;
        insert_review(&store, &galabo, 4).await;
        insert_review(&store, &galabo, 5).await;

        let markers = service(store).markers(Some("Kuliner")).await;
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].review_count, 2);
        assert_eq!(markers[0].average_rating, 4.5);
    }

    #[tokio::test]
    async fn test_distance_between_stored_and_caller_position() {
        let store = Arc::new(MemoryStore::new());
        let id = insert_point(&store, "Keraton", "-7.5707,110.8281", "Wisata").await;

        let distance = service(store)
            .distance_from(&id, "-7.5800,110.8300")
            .await
            .unwrap();
        assert!((distance.distance_km - 1.04).abs() <= 0.05);
    }

    #[tokio::test]
    async fn test_distance_rejects_malformed_origin() {
        let store = Arc::new(MemoryStore::new());
        let id = insert_point(&store, "Keraton", "-7.5707,110.8281", "Wisata").await;

        let result = service(store).distance_from(&id, "somewhere").await;
        assert!(matches!(result, Err(AppError::MalformedCoordinate(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_category_when_omitted() {
        let store = Arc::new(MemoryStore::new());
        let id = insert_point(&store, "Galabo", "-7.5690,110.8330", "Kuliner").await;

        let svc = service(store);
        let updated = svc
            .update(
                &id,
                UpdateLocationDto {
                    name: "Galabo Malam".to_string(),
                    coordinates: "-7.5691,110.8331".to_string(),
                    category: None,
                    accuracy: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.category, "Kuliner");
        assert_eq!(svc.get(&id).await.unwrap().name, "Galabo Malam");
    }

    struct UnreachableStore;

    #[async_trait]
    impl DocumentStore for UnreachableStore {
        async fn snapshot(&self, collection: &str) -> StoreResult<Vec<Document>> {
            Err(StoreError::Read {
                collection: collection.to_string(),
                message: "connection refused".to_string(),
            })
        }

        fn watch(&self, _collection: &str) -> watch::Receiver<Vec<Document>> {
            watch::channel(Vec::new()).1
        }

        async fn insert(&self, collection: &str, _data: Value) -> StoreResult<String> {
            Err(StoreError::Write {
                collection: collection.to_string(),
                message: "connection refused".to_string(),
            })
        }

        async fn update(&self, collection: &str, _id: &str, _data: Value) -> StoreResult<()> {
            Err(StoreError::Write {
                collection: collection.to_string(),
                message: "connection refused".to_string(),
            })
        }

        async fn remove(&self, collection: &str, _id: &str) -> StoreResult<()> {
            Err(StoreError::Write {
                collection: collection.to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_read_failure_degrades_to_empty_snapshot() {
        let store = Arc::new(UnreachableStore);
        let reviews = Arc::new(ReviewService::new(store.clone()));
        let svc = LocationService::new(store, reviews);

        assert!(svc.list().await.is_empty());
        assert!(svc.markers(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_surfaces_store_error() {
        let store = Arc::new(UnreachableStore);
        let reviews = Arc::new(ReviewService::new(store.clone()));
        let svc = LocationService::new(store, reviews);

        let result = svc
            .create(CreateLocationDto {
                name: "Keraton".to_string(),
                coordinates: "-7.5754,110.8243".to_string(),
                category: None,
                accuracy: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::Store(_))));
    }
}
