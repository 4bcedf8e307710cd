use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;

use crate::core::error::{AppError, Result};
use crate::features::history::models::HistoryEntry;
use crate::features::locations::models::Location;
use crate::modules::store::{Document, DocumentStore};
use crate::shared::constants::HISTORY_COLLECTION;

/// Service for visit history
pub struct HistoryService {
    store: Arc<dyn DocumentStore>,
}

impl HistoryService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Visit history, newest first. A failed remote read is logged and
    /// shown as an empty snapshot rather than an error.
    pub async fn list(&self) -> Vec<HistoryEntry> {
        let documents = match self.store.snapshot(HISTORY_COLLECTION).await {
            Ok(documents) => documents,
            Err(err) => {
                tracing::error!("Failed to read history: {}", err);
                Vec::new()
            }
        };

        let mut entries: Vec<HistoryEntry> = documents
            .iter()
            .filter_map(HistoryEntry::from_document)
            .collect();
        entries.reverse();
        entries
    }

    /// Record a visit to a location with the current instant.
    pub async fn record_visit(&self, location: &Location) -> Result<HistoryEntry> {
        let entry = HistoryEntry {
            id: String::new(),
            name: location.name.clone(),
            coordinates: location.coordinates.clone(),
            visited_at: Utc::now(),
        };

        let data = serde_json::to_value(&entry).map_err(|e| AppError::Internal(e.to_string()))?;
        let id = self.store.insert(HISTORY_COLLECTION, data).await?;
        tracing::info!("Visit recorded: location={}, history_id={}", location.id, id);

        Ok(HistoryEntry { id, ..entry })
    }

    /// Live snapshot subscription for the `history` collection.
    pub fn watch(&self) -> watch::Receiver<Vec<Document>> {
        self.store.watch(HISTORY_COLLECTION)
    }
}
