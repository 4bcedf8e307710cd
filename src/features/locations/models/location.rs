use serde::{Deserialize, Serialize};

use crate::modules::store::Document;
use crate::shared::constants::DEFAULT_CATEGORY;

/// Stored location record with the field names the store keeps.
///
/// `accuration` is the spelling the existing data set uses on the wire;
/// the HTTP API surfaces it as `accuracy`. Coordinates stay a single
/// comma-joined string for compatibility with stored records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub coordinates: String,
    #[serde(rename = "accuration", default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<String>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Location {
    /// Decode a store document; records that do not fit are skipped with a
    /// warning so one bad entry cannot sink the batch.
    pub fn from_document(document: &Document) -> Option<Self> {
        match serde_json::from_value::<Self>(document.data.clone()) {
            Ok(mut location) => {
                location.id = document.id.clone();
                Some(location)
            }
            Err(err) => {
                tracing::warn!("Skipping malformed point '{}': {}", document.id, err);
                None
            }
        }
    }
}
