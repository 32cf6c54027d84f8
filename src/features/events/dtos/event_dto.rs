use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::events::models::{EventWithCategory, NewEvent};
use crate::shared::validation::{non_blank, validate_not_blank};

/// Response DTO for an event with its category name attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventResponseDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    #[schema(value_type = Option<String>, example = "10:00:00")]
    pub start_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>, example = "20:00:00")]
    pub end_time: Option<NaiveTime>,
    pub address: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub category_description: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventWithCategory> for EventResponseDto {
    fn from(row: EventWithCategory) -> Self {
        let e = row.event;
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            content: e.content,
            image_url: e.image_url,
            location: e.location,
            date: e.date,
            start_time: e.start_time,
            end_time: e.end_time,
            address: e.address,
            category_id: e.category_id,
            category_name: row.category_name,
            category_description: row.category_description,
            featured: e.featured,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Request DTO for creating or fully replacing an event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[validate(schema(function = "validate_event_times"))]
pub struct CreateEventDto {
    #[validate(
        length(min = 1, max = 200, message = "title is required"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    #[schema(value_type = Option<String>, example = "10:00:00")]
    pub start_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>, example = "20:00:00")]
    pub end_time: Option<NaiveTime>,
    pub address: Option<String>,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub featured: bool,
}

fn validate_event_times(dto: &CreateEventDto) -> Result<(), validator::ValidationError> {
    match (dto.start_time, dto.end_time) {
        (Some(start), Some(end)) if end < start => {
            let mut err = validator::ValidationError::new("time_order");
            err.message = Some("end_time must not be before start_time".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl CreateEventDto {
    pub fn into_new(self) -> NewEvent {
        NewEvent {
            title: self.title.trim().to_string(),
            description: non_blank(self.description),
            content: non_blank(self.content),
            image_url: non_blank(self.image_url),
            location: non_blank(self.location),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            address: non_blank(self.address),
            category_id: self.category_id,
            featured: self.featured,
        }
    }
}

/// Filters accepted by `GET /api/events`. At most one filter family applies,
/// checked in the order listed.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListEventsQuery {
    /// Only events in this area
    pub category_id: Option<i64>,
    /// Only events dated today or later
    #[serde(default)]
    pub upcoming: bool,
    /// Only upcoming featured events
    #[serde(default)]
    pub featured: bool,
    /// Cap on upcoming events (default 10, max 100)
    pub limit: Option<i64>,
    /// Inclusive start of a date range (YYYY-MM-DD)
    #[param(value_type = Option<String>, format = Date)]
    pub from: Option<NaiveDate>,
    /// Inclusive end of a date range (YYYY-MM-DD)
    #[param(value_type = Option<String>, format = Date)]
    pub to: Option<NaiveDate>,
    /// Substring of the location or address
    pub location: Option<String>,
}
