use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::services::CategoryService;
use crate::features::events::services::EventService;
use crate::features::portal::dtos::{HealthReportDto, HomeDto, StatsDto};
use crate::modules::storage::StatsStore;
use crate::shared::clock::Clock;
use crate::shared::constants::{HOME_AREA_EVENTS_LIMIT, HOME_UPCOMING_LIMIT};

const STORAGE_UNAVAILABLE: &str = "Storage is unavailable";
const STATS_UNAVAILABLE: &str = "Storage statistics are unavailable";

/// Service for portal-wide views: stats, the home page and health
pub struct PortalService {
    store: Arc<dyn StatsStore>,
    backend: &'static str,
    events: Arc<EventService>,
    categories: Arc<CategoryService>,
    clock: Arc<dyn Clock>,
}

impl PortalService {
    pub fn new(
        store: Arc<dyn StatsStore>,
        backend: &'static str,
        events: Arc<EventService>,
        categories: Arc<CategoryService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            backend,
            events,
            categories,
            clock,
        }
    }

    pub async fn stats(&self) -> Result<StatsDto> {
        let stats = self
            .store
            .stats(self.clock.today())
            .await
            .map_err(|e| AppError::operation_failed("stats", "Failed to fetch stats", e))?;

        Ok(stats.into())
    }

    /// Featured events, the next few upcoming events, each area with its
    /// nearest events, and the stats
    pub async fn home(&self) -> Result<HomeDto> {
        let featured_events = self.events.list_featured().await?;
        let upcoming_events = self.events.list_upcoming(HOME_UPCOMING_LIMIT).await?;
        let areas = self.categories.overview(HOME_AREA_EVENTS_LIMIT).await?;
        let stats = self.stats().await?;

        Ok(HomeDto {
            featured_events,
            upcoming_events,
            areas,
            stats,
        })
    }

    /// Never fails: a broken store is reported as `healthy = false`. The
    /// underlying error is logged, the report only carries a short summary.
    pub async fn health(&self) -> HealthReportDto {
        let mut report = HealthReportDto {
            healthy: true,
            backend: self.backend.to_string(),
            foreign_keys_enabled: None,
            stats: None,
            error: None,
        };

        match self.store.health().await {
            Ok(health) => {
                report.backend = health.backend.to_string();
                report.foreign_keys_enabled = health.foreign_keys_enabled;
            }
            Err(e) => {
                tracing::warn!(error = ?e, "Storage health probe failed");
                report.healthy = false;
                report.error = Some(STORAGE_UNAVAILABLE.to_string());
                return report;
            }
        }

        match self.store.stats(self.clock.today()).await {
            Ok(stats) => report.stats = Some(stats.into()),
            Err(e) => {
                tracing::warn!(error = ?e, "Storage stats failed during health check");
                report.healthy = false;
                report.error = Some(STATS_UNAVAILABLE.to_string());
            }
        }

        report
    }
}
