//! Reviews feature: the `reviews` collection.
//!
//! Review submission with pre-write validation, per-location grouping and
//! rating aggregation over store snapshots.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/reviews` | Reviews grouped per location with summaries |
//! | GET | `/api/reviews/live` | SSE stream of review snapshots |
//! | GET | `/api/locations/{id}/reviews` | Reviews for one location |
//! | POST | `/api/reviews` | Submit a review |
//! | DELETE | `/api/reviews/{id}` | Delete a review |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::ReviewService;
