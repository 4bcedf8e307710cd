mod review;

pub use review::{LocationRatingStats, RatingSummary, Review};
