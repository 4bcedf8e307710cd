//! Visit history feature: the `history` collection.
//!
//! Entries are written when a visit is recorded (see the locations
//! feature's `/visit` endpoint) and listed newest first.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::HistoryService;
