use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::services::CategoryService;
use crate::features::events::services::EventService;
use crate::features::search::dtos::{SearchResponseDto, SearchResultDto};

/// Combined search over events and areas
pub struct SearchService {
    events: Arc<EventService>,
    categories: Arc<CategoryService>,
}

impl SearchService {
    pub fn new(events: Arc<EventService>, categories: Arc<CategoryService>) -> Self {
        Self { events, categories }
    }

    /// Event matches (optionally limited to one area) followed by area
    /// matches. A blank term yields an empty envelope.
    pub async fn search(&self, query: &str, category_id: Option<i64>) -> Result<SearchResponseDto> {
        let mut results = Vec::new();

        if !query.trim().is_empty() {
            let events = self.events.search(query).await?;
            results.extend(
                events
                    .into_iter()
                    .filter(|e| category_id.is_none() || e.category_id == category_id)
                    .map(SearchResultDto::Event),
            );

            let areas = self.categories.search(query).await?;
            results.extend(areas.into_iter().map(SearchResultDto::Area));
        }

        tracing::debug!(query, total = results.len(), "Search completed");

        Ok(SearchResponseDto {
            query: query.to_string(),
            category_id,
            total: results.len(),
            results,
        })
    }
}
