//! Dashboard feature: read-only aggregates over the review snapshot.
//!
//! Backs the home screen: overall totals, per-location rating stats and
//! the top-3 review highlights.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::DashboardService;
