//! Saved locations feature: the `points` collection.
//!
//! CRUD over saved tourism/culinary spots, map markers with per-record
//! coordinate validation, distance lookups and visit recording.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/locations` | List saved locations |
//! | GET | `/api/locations/live` | SSE stream of location snapshots |
//! | GET | `/api/locations/markers` | Map markers with rating summaries |
//! | GET | `/api/locations/{id}` | Fetch one location |
//! | GET | `/api/locations/{id}/distance` | Distance from a caller position |
//! | POST | `/api/locations` | Save a new location |
//! | PUT | `/api/locations/{id}` | Edit a location |
//! | DELETE | `/api/locations/{id}` | Delete a location |
//! | POST | `/api/locations/{id}/visit` | Record a visit, return directions |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::LocationService;
