mod dashboard_dto;

pub use dashboard_dto::{DashboardSummaryDto, LocationStatsDto};
