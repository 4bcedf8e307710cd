#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use axum::Router;
#[cfg(test)]
use chrono::Utc;
#[cfg(test)]
use fake::faker::lorem::en::Sentence;
#[cfg(test)]
use fake::faker::name::en::Name;
#[cfg(test)]
use fake::Fake;
#[cfg(test)]
use serde_json::json;

#[cfg(test)]
use crate::features::history::services::HistoryService;
#[cfg(test)]
use crate::features::locations::services::LocationService;
#[cfg(test)]
use crate::features::reviews::services::ReviewService;
#[cfg(test)]
use crate::modules::store::{DocumentStore, MemoryStore};
#[cfg(test)]
use crate::shared::constants::{POINTS_COLLECTION, REVIEWS_COLLECTION};

/// Insert a location document the way the store keeps it on the wire.
#[cfg(test)]
pub async fn insert_point(
    store: &MemoryStore,
    name: &str,
    coordinates: &str,
    category: &str,
) -> String {
    store
        .insert(
            POINTS_COLLECTION,
            json!({
                "name": name,
                "coordinates": coordinates,
                "category": category,
            }),
        )
        .await
        .expect("insert point")
}

/// Insert a review document with faked reviewer fields.
#[cfg(test)]
pub async fn insert_review(store: &MemoryStore, location_id: &str, rating: i32) -> String {
    let reviewer_name: String = Name().fake();
    let review_text: String = Sentence(3..8).fake();
    store
        .insert(
            REVIEWS_COLLECTION,
            json!({
                "locationId": location_id,
                "locationName": "",
                "reviewerName": reviewer_name,
                "reviewText": review_text,
                "rating": rating,
                "category": "Wisata",
                "timestamp": Utc::now().timestamp_millis(),
            }),
        )
        .await
        .expect("insert review")
}

/// Location routes wired over the given store.
#[cfg(test)]
pub fn test_location_router(store: Arc<MemoryStore>) -> Router {
    let reviews = Arc::new(ReviewService::new(store.clone()));
    let locations = Arc::new(LocationService::new(store.clone(), reviews));
    let history = Arc::new(HistoryService::new(store));
    crate::features::locations::routes(locations, history)
}

/// Review routes wired over the given store.
#[cfg(test)]
pub fn test_review_router(store: Arc<MemoryStore>) -> Router {
    let reviews = Arc::new(ReviewService::new(store.clone()));
    let locations = Arc::new(LocationService::new(store, Arc::clone(&reviews)));
    crate::features::reviews::routes(reviews, locations)
}
