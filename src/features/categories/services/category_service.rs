use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    AreaOverviewDto, CategoryEventCountDto, CategoryResponseDto, CreateCategoryDto,
};
use crate::features::categories::models::Category;
use crate::modules::storage::{CategoryStore, EventStore, StoreError};
use crate::shared::clock::Clock;
use crate::shared::validation::fold_case;

/// Service for area (category) operations
pub struct CategoryService {
    categories: Arc<dyn CategoryStore>,
    events: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn CategoryStore>,
        events: Arc<dyn EventStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            categories,
            events,
            clock,
        }
    }

    /// List all categories, name ascending
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self
            .categories
            .list_categories()
            .await
            .map_err(|e| AppError::operation_failed("list_categories", "Failed to fetch categories", e))?;

        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// Get one category. `None` when it does not exist.
    pub async fn get(&self, id: i64) -> Result<Option<CategoryResponseDto>> {
        let category = self
            .categories
            .get_category(id)
            .await
            .map_err(|e| AppError::operation_failed("get_category", "Failed to fetch category", e))?;

        Ok(category.map(Into::into))
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let category = self
            .categories
            .create_category(dto.into_new(), Utc::now())
            .await
            .map_err(|e| write_error("create_category", "Failed to create category", e))?;

        tracing::info!("Category created: id={}, name={}", category.id, category.name);

        Ok(category.into())
    }

    /// Replace a category's name, description and image
    pub async fn update(&self, id: i64, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let category = self
            .categories
            .update_category(id, dto.into_new(), Utc::now())
            .await
            .map_err(|e| write_error("update_category", "Failed to update category", e))?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        tracing::info!("Category updated: id={}", category.id);

        Ok(category.into())
    }

    /// Delete a category. Its events stay, detached from it.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self
            .categories
            .delete_category(id)
            .await
            .map_err(|e| AppError::operation_failed("delete_category", "Failed to delete category", e))?;

        if deleted {
            tracing::info!("Category deleted: id={}", id);
        }

        Ok(deleted)
    }

    pub async fn event_counts(&self) -> Result<Vec<CategoryEventCountDto>> {
        let counts = self.categories.category_event_counts().await.map_err(|e| {
            AppError::operation_failed(
                "category_event_counts",
                "Failed to fetch category event counts",
                e,
            )
        })?;

        Ok(counts.into_iter().map(Into::into).collect())
    }

    pub async fn event_count(&self, id: i64) -> Result<i64> {
        self.categories.category_event_count(id).await.map_err(|e| {
            AppError::operation_failed(
                "category_event_count",
                "Failed to fetch category event count",
                e,
            )
        })
    }

    /// Categories whose name or description contains `term`.
    ///
    /// Case-insensitive; does not look at events. Blank terms match nothing.
    pub async fn search(&self, term: &str) -> Result<Vec<CategoryResponseDto>> {
        let needle = fold_case(term.trim());
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let categories = self
            .categories
            .list_categories()
            .await
            .map_err(|e| AppError::operation_failed("search_categories", "Failed to search areas", e))?;

        Ok(categories
            .into_iter()
            .filter(|c| matches_category(c, &needle))
            .map(Into::into)
            .collect())
    }

    /// Every category with its first `per_area` upcoming events
    pub async fn overview(&self, per_area: usize) -> Result<Vec<AreaOverviewDto>> {
        let today = self.clock.today();
        let categories = self.list().await?;

        let mut overview = Vec::with_capacity(categories.len());
        for area in categories {
            let events = self
                .events
                .list_upcoming_events_by_category(area.id, today)
                .await
                .map_err(|e| {
                    AppError::operation_failed(
                        "list_upcoming_events_by_category",
                        "Failed to fetch upcoming events by category",
                        e,
                    )
                })?;

            overview.push(AreaOverviewDto {
                area,
                upcoming_events: events.into_iter().take(per_area).map(Into::into).collect(),
            });
        }

        Ok(overview)
    }
}

fn matches_category(category: &Category, needle: &str) -> bool {
    fold_case(&category.name).contains(needle)
        || category
            .description
            .as_deref()
            .is_some_and(|d| fold_case(d).contains(needle))
}

/// Duplicate names are the caller's fault, everything else is a storage failure
fn write_error(operation: &'static str, message: &str, e: StoreError) -> AppError {
    match e {
        StoreError::DuplicateCategory(name) => {
            AppError::Validation(format!("An area named '{}' already exists", name))
        }
        other => AppError::operation_failed(operation, message, other),
    }
}
