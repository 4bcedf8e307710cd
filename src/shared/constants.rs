// =============================================================================
// STORE COLLECTIONS
// =============================================================================

/// Collection holding saved locations (legacy path name from the mobile app)
pub const POINTS_COLLECTION: &str = "points";

/// Collection holding user reviews
pub const REVIEWS_COLLECTION: &str = "reviews";

/// Collection holding visit history entries
pub const HISTORY_COLLECTION: &str = "history";

// =============================================================================
// CATEGORY CONSTANTS
// =============================================================================

/// Tourism category
pub const CATEGORY_WISATA: &str = "Wisata";

/// Culinary category
#[allow(dead_code)]
pub const CATEGORY_KULINER: &str = "Kuliner";

/// Category applied when a stored location carries none
pub const DEFAULT_CATEGORY: &str = CATEGORY_WISATA;

/// Number of reviews shown in the dashboard highlight list
pub const TOP_REVIEWS_LIMIT: usize = 3;
