use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::core::error::{AppError, Result};
use crate::features::events::dtos::{CreateEventDto, EventResponseDto};
use crate::features::events::models::EventWithCategory;
use crate::modules::storage::{EventStore, StoreError, StoreResult};
use crate::shared::clock::Clock;

/// Service for event queries and writes.
///
/// Owns the "upcoming" rule: an event is upcoming when its date is on or
/// after the clock's current date, evaluated on every call.
pub struct EventService {
    events: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
}

fn shape(
    result: StoreResult<Vec<EventWithCategory>>,
    operation: &'static str,
    message: &str,
) -> Result<Vec<EventResponseDto>> {
    result
        .map(|rows| rows.into_iter().map(Into::into).collect())
        .map_err(|e| AppError::operation_failed(operation, message, e))
}

impl EventService {
    pub fn new(events: Arc<dyn EventStore>, clock: Arc<dyn Clock>) -> Self {
        Self { events, clock }
    }

    pub async fn list(&self) -> Result<Vec<EventResponseDto>> {
        shape(
            self.events.list_events().await,
            "list_events",
            "Failed to fetch events",
        )
    }

    /// Get one event with its category. `None` when it does not exist.
    pub async fn get(&self, id: i64) -> Result<Option<EventResponseDto>> {
        let event = self
            .events
            .get_event(id)
            .await
            .map_err(|e| AppError::operation_failed("get_event", "Failed to fetch event", e))?;

        Ok(event.map(Into::into))
    }

    pub async fn list_by_category(&self, category_id: i64) -> Result<Vec<EventResponseDto>> {
        shape(
            self.events.list_events_by_category(category_id).await,
            "list_events_by_category",
            "Failed to fetch events by category",
        )
    }

    pub async fn list_upcoming_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<EventResponseDto>> {
        let today = self.clock.today();
        shape(
            self.events
                .list_upcoming_events_by_category(category_id, today)
                .await,
            "list_upcoming_events_by_category",
            "Failed to fetch upcoming events by category",
        )
    }

    /// The next `limit` upcoming events, nearest first
    pub async fn list_upcoming(&self, limit: i64) -> Result<Vec<EventResponseDto>> {
        let today = self.clock.today();
        shape(
            self.events.list_upcoming_events(today, Some(limit)).await,
            "list_upcoming_events",
            "Failed to fetch upcoming events",
        )
    }

    /// Every upcoming event, nearest first
    pub async fn list_all_upcoming(&self) -> Result<Vec<EventResponseDto>> {
        let today = self.clock.today();
        shape(
            self.events.list_upcoming_events(today, None).await,
            "list_all_upcoming_events",
            "Failed to fetch all upcoming events",
        )
    }

    /// Featured events that are still upcoming
    pub async fn list_featured(&self) -> Result<Vec<EventResponseDto>> {
        let today = self.clock.today();
        shape(
            self.events.list_featured_events(today).await,
            "list_featured_events",
            "Failed to fetch featured events",
        )
    }

    /// Case-insensitive match on title, description or content.
    ///
    /// A blank term returns nothing and never reaches storage.
    pub async fn search(&self, term: &str) -> Result<Vec<EventResponseDto>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        shape(
            self.events.search_events(term).await,
            "search_events",
            "Failed to search events",
        )
    }

    /// Events dated between `start` and `end`, both inclusive
    pub async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EventResponseDto>> {
        if end < start {
            return Err(AppError::BadRequest(
                "Date range end must not be before its start".to_string(),
            ));
        }
        shape(
            self.events.list_events_by_date_range(start, end).await,
            "list_events_by_date_range",
            "Failed to fetch events by date range",
        )
    }

    /// Case-insensitive match on location or address. Blank terms match nothing.
    pub async fn list_by_location(&self, term: &str) -> Result<Vec<EventResponseDto>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        shape(
            self.events.list_events_by_location(term).await,
            "list_events_by_location",
            "Failed to fetch events by location",
        )
    }

    pub async fn create(&self, dto: CreateEventDto) -> Result<EventResponseDto> {
        let event = self
            .events
            .create_event(dto.into_new(), Utc::now())
            .await
            .map_err(|e| write_error("create_event", "Failed to create event", e))?;

        tracing::info!(
            "Event created: id={}, title={}",
            event.event.id,
            event.event.title
        );

        Ok(event.into())
    }

    /// Full replace of an existing event. Never creates one.
    pub async fn update(&self, id: i64, dto: CreateEventDto) -> Result<EventResponseDto> {
        let event = self
            .events
            .update_event(id, dto.into_new(), Utc::now())
            .await
            .map_err(|e| write_error("update_event", "Failed to update event", e))?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))?;

        tracing::info!("Event updated: id={}", id);

        Ok(event.into())
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self
            .events
            .delete_event(id)
            .await
            .map_err(|e| AppError::operation_failed("delete_event", "Failed to delete event", e))?;

        if deleted {
            tracing::info!("Event deleted: id={}", id);
        }

        Ok(deleted)
    }
}

/// A dangling category reference is the caller's fault
fn write_error(operation: &'static str, message: &str, e: StoreError) -> AppError {
    match e {
        StoreError::MissingCategory(id) => {
            AppError::Validation(format!("category_id {} does not exist", id))
        }
        other => AppError::operation_failed(operation, message, other),
    }
}
