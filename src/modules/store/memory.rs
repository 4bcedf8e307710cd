//! In-process realtime document store.
//!
//! Behaves like the remote store it stands in for: collections keep
//! insertion order (ids are time-ordered UUIDv7, like the original push
//! ids), and every mutation republishes the full collection snapshot to
//! subscribers.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::watch;
use uuid::Uuid;

use super::{Document, DocumentStore, StoreError, StoreResult};

pub struct MemoryStore {
    collections: RwLock<HashMap<String, CollectionState>>,
}

struct CollectionState {
    documents: Vec<Document>,
    publisher: watch::Sender<Vec<Document>>,
}

impl CollectionState {
    fn new() -> Self {
        let (publisher, _) = watch::channel(Vec::new());
        Self {
            documents: Vec::new(),
            publisher,
        }
    }

    fn publish(&self) {
        // send_replace keeps the latest snapshot even with no subscriber yet
        self.publisher.send_replace(self.documents.clone());
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Load a store dump of the form `{"collection": {"id": {fields}}}`,
    /// the export format of the original backing store. Returns the number
    /// of documents loaded.
    pub fn load_seed(&self, path: &str) -> StoreResult<usize> {
        let raw = std::fs::read_to_string(path).map_err(|e| StoreError::Read {
            collection: path.to_string(),
            message: e.to_string(),
        })?;
        let dump: Value = serde_json::from_str(&raw).map_err(|e| StoreError::Read {
            collection: path.to_string(),
            message: e.to_string(),
        })?;
        let Value::Object(collections) = dump else {
            return Err(StoreError::Read {
                collection: path.to_string(),
                message: "seed file must be a JSON object keyed by collection".to_string(),
            });
        };

        let mut loaded = 0;
        let mut guard = self.write_lock();
        for (name, documents) in collections {
            let Value::Object(documents) = documents else {
                continue;
            };
            let state = guard.entry(name).or_insert_with(CollectionState::new);
            for (id, data) in documents {
                state.documents.push(Document { id, data });
                loaded += 1;
            }
            state.publish();
        }

        Ok(loaded)
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, HashMap<String, CollectionState>> {
        self.collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, HashMap<String, CollectionState>> {
        self.collections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn snapshot(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let guard = self.read_lock();
        Ok(guard
            .get(collection)
            .map(|state| state.documents.clone())
            .unwrap_or_default())
    }

    fn watch(&self, collection: &str) -> watch::Receiver<Vec<Document>> {
        let mut guard = self.write_lock();
        guard
            .entry(collection.to_string())
            .or_insert_with(CollectionState::new)
            .publisher
            .subscribe()
    }

    async fn insert(&self, collection: &str, data: Value) -> StoreResult<String> {
        let id = Uuid::now_v7().to_string();
        let mut guard = self.write_lock();
        let state = guard
            .entry(collection.to_string())
            .or_insert_with(CollectionState::new);
        state.documents.push(Document {
            id: id.clone(),
            data,
        });
        state.publish();
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, data: Value) -> StoreResult<()> {
        let mut guard = self.write_lock();
        let state = guard
            .get_mut(collection)
            .ok_or_else(|| not_found(collection, id))?;
        let document = state
            .documents
            .iter_mut()
            .find(|document| document.id == id)
            .ok_or_else(|| not_found(collection, id))?;
        document.data = data;
        state.publish();
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> StoreResult<()> {
        let mut guard = self.write_lock();
        let state = guard
            .get_mut(collection)
            .ok_or_else(|| not_found(collection, id))?;
        let before = state.documents.len();
        state.documents.retain(|document| document.id != id);
        if state.documents.len() == before {
            return Err(not_found(collection, id));
        }
        state.publish();
        Ok(())
    }
}

fn not_found(collection: &str, id: &str) -> StoreError {
    StoreError::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_then_snapshot() {
        let store = MemoryStore::new();
        let id = store
            .insert("points", json!({"name": "Alun-alun Kidul"}))
            .await
            .unwrap();

        let snapshot = store.snapshot("points").await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, id);
        assert_eq!(snapshot[0].data["name"], "Alun-alun Kidul");
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        assert!(store.snapshot("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_preserves_order() {
        let store = MemoryStore::new();
        for name in ["first", "second", "third"] {
            store.insert("points", json!({ "name": name })).await.unwrap();
        }

        let names: Vec<String> = store
            .snapshot("points")
            .await
            .unwrap()
            .iter()
            .map(|document| document.data["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_watch_sees_current_snapshot_and_changes() {
        let store = MemoryStore::new();
        store.insert("reviews", json!({"rating": 5})).await.unwrap();

        let mut receiver = store.watch("reviews");
        assert_eq!(receiver.borrow_and_update().len(), 1);

        store.insert("reviews", json!({"rating": 3})).await.unwrap();
        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().len(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let store = MemoryStore::new();
        let id = store
            .insert("points", json!({"name": "Old", "category": "Wisata"}))
            .await
            .unwrap();

        store
            .update("points", &id, json!({"name": "New", "category": "Kuliner"}))
            .await
            .unwrap();

        let snapshot = store.snapshot("points").await.unwrap();
        assert_eq!(snapshot[0].data["name"], "New");
        assert_eq!(snapshot[0].data["category"], "Kuliner");
    }

    #[tokio::test]
    async fn test_remove_missing_document_errors() {
        let store = MemoryStore::new();
        store.insert("points", json!({})).await.unwrap();

        let result = store.remove("points", "no-such-id").await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_load_seed_dump() {
        let store = MemoryStore::new();
        let path = std::env::temp_dir().join(format!("jelajah-seed-{}.json", Uuid::now_v7()));
        std::fs::write(
            &path,
            r#"{
                "points": {
                    "p1": {"name": "Keraton", "coordinates": "-7.5754,110.8243"},
                    "p2": {"name": "Galabo", "coordinates": "-7.5690,110.8330", "category": "Kuliner"}
                },
                "reviews": {
                    "r1": {"locationId": "p1", "rating": 4}
                }
            }"#,
        )
        .unwrap();

        let loaded = store.load_seed(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, 3);

        let points = tokio_test::block_on(store.snapshot("points")).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points.iter().filter(|d| d.id == "p1").count(), 1);

        std::fs::remove_file(&path).ok();
    }
}
