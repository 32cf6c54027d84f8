use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored model for a community event
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub address: Option<String>,
    pub category_id: Option<i64>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Ordering used by every event listing: date, then start time
    /// (events without a start time first), then id.
    pub fn schedule_key(&self) -> (NaiveDate, Option<NaiveTime>, i64) {
        (self.date, self.start_time, self.id)
    }

    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today
    }
}

/// An event joined with its category. Both join fields are absent when the
/// event has no category or its category no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EventWithCategory {
    #[sqlx(flatten)]
    pub event: Event,
    pub category_name: Option<String>,
    pub category_description: Option<String>,
}

/// Mutable fields of an event, used for both create and full-replace update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub address: Option<String>,
    pub category_id: Option<i64>,
    pub featured: bool,
}
