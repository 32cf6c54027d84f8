use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::categories::dtos::AreaOverviewDto;
use crate::features::events::dtos::EventResponseDto;
use crate::features::portal::models::PortalStats;

/// Portal-wide counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatsDto {
    pub total_events: i64,
    pub total_categories: i64,
    pub upcoming_events: i64,
    pub past_events: i64,
    pub total_messages: i64,
}

impl From<PortalStats> for StatsDto {
    fn from(s: PortalStats) -> Self {
        Self {
            total_events: s.total_events,
            total_categories: s.total_categories,
            upcoming_events: s.upcoming_events,
            past_events: s.past_events,
            total_messages: s.total_messages,
        }
    }
}

/// Everything the home page shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HomeDto {
    pub featured_events: Vec<EventResponseDto>,
    pub upcoming_events: Vec<EventResponseDto>,
    pub areas: Vec<AreaOverviewDto>,
    pub stats: StatsDto,
}

/// Storage health report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthReportDto {
    pub healthy: bool,
    pub backend: String,
    /// Only reported by backends that enforce foreign keys
    pub foreign_keys_enabled: Option<bool>,
    pub stats: Option<StatsDto>,
    pub error: Option<String>,
}
