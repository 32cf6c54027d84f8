//! SQLite implementation of the store traits.
//!
//! One typed method per access pattern, every value bound as a parameter.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use super::{
    seed, CategoryStore, EventStore, MessageStore, StatsStore, StoreError, StoreResult,
};
use crate::features::categories::models::{Category, CategoryEventCount, NewCategory};
use crate::features::events::models::{EventWithCategory, NewEvent};
use crate::features::messages::models::{ContactMessage, NewContactMessage, PublicContactMessage};
use crate::features::portal::models::{PortalStats, StorageHealth};
use crate::shared::validation::{escape_like, fold_case};

/// Column list for `categories` queries.
const CATEGORY_COLUMNS: &str = "id, name, description, image_url, created_at, updated_at";

/// Events joined with their category; extended with WHERE / ORDER BY clauses.
const EVENT_SELECT: &str = "\
    SELECT e.id, e.title, e.description, e.content, e.image_url, e.location, e.date, \
           e.start_time, e.end_time, e.address, e.category_id, e.featured, \
           e.created_at, e.updated_at, \
           c.name AS category_name, c.description AS category_description \
    FROM events e \
    LEFT JOIN categories c ON e.category_id = c.id";

const EVENT_ORDER: &str = "ORDER BY e.date ASC, e.start_time ASC, e.id ASC";

/// Column list for `contact_messages` queries.
const MESSAGE_COLUMNS: &str =
    "id, name, email, phone, subject, area, message, newsletter, created_at";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the tables if absent and seed an empty store.
    ///
    /// Categories are seeded only when the table is empty, sample events only
    /// when `seed_sample_events` is set and the events table is empty.
    pub async fn initialize(&self, seed_sample_events: bool) -> StoreResult<()> {
        crate::core::database::run_migrations(&self.pool).await?;

        let now = Utc::now();

        let category_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        if category_count == 0 {
            for category in seed::default_categories() {
                self.create_category(category, now).await?;
            }
            tracing::info!("Default categories inserted");
        }

        if seed_sample_events {
            let event_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
                .fetch_one(&self.pool)
                .await?;
            if event_count == 0 {
                let categories = self.list_categories().await?;
                let events = seed::sample_events(|name| {
                    categories.iter().find(|c| c.name == name).map(|c| c.id)
                });
                for event in events {
                    self.create_event(event, now).await?;
                }
                tracing::info!("Sample events inserted");
            }
        }

        Ok(())
    }

    async fn fetch_events(
        &self,
        filter: &str,
        binds: EventBinds<'_>,
    ) -> StoreResult<Vec<EventWithCategory>> {
        let query = format!("{EVENT_SELECT} {filter} {EVENT_ORDER}");
        let mut q = sqlx::query_as::<_, EventWithCategory>(&query);
        q = match binds {
            EventBinds::None => q,
            EventBinds::Id(id) => q.bind(id),
            EventBinds::IdDate(id, date) => q.bind(id).bind(date),
            EventBinds::Date(date) => q.bind(date),
            EventBinds::DateRange(start, end) => q.bind(start).bind(end),
            EventBinds::Pattern(pattern) => q.bind(pattern),
        };
        Ok(q.fetch_all(&self.pool).await?)
    }
}

/// Parameter shapes used by the event listings
enum EventBinds<'a> {
    None,
    Id(i64),
    IdDate(i64, NaiveDate),
    Date(NaiveDate),
    DateRange(NaiveDate, NaiveDate),
    Pattern(&'a str),
}

/// `%term%` lower-cased with LIKE wildcards escaped
fn like_pattern(term: &str) -> String {
    format!("%{}%", escape_like(&fold_case(term)))
}

/// Map constraint violations to their store-level meaning
fn map_write_error(e: sqlx::Error, category_id: Option<i64>, name: Option<&str>) -> StoreError {
    if let Some(db) = e.as_database_error() {
        if db.is_foreign_key_violation() {
            if let Some(id) = category_id {
                return StoreError::MissingCategory(id);
            }
        }
        if db.is_unique_violation() {
            if let Some(name) = name {
                return StoreError::DuplicateCategory(name.to_string());
            }
        }
    }
    StoreError::Database(e)
}

#[async_trait]
impl CategoryStore for SqliteStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name ASC");
        Ok(sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_category(&self, id: i64) -> StoreResult<Option<Category>> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?");
        Ok(sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_category(
        &self,
        new: NewCategory,
        now: DateTime<Utc>,
    ) -> StoreResult<Category> {
        let query = format!(
            "INSERT INTO categories (name, description, image_url, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&new.name)
            .bind(&new.description)
            .bind(&new.image_url)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, None, Some(&new.name)))
    }

    async fn update_category(
        &self,
        id: i64,
        new: NewCategory,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Category>> {
        let query = format!(
            "UPDATE categories \
             SET name = ?, description = ?, image_url = ?, updated_at = ? \
             WHERE id = ? \
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&new.name)
            .bind(&new.description)
            .bind(&new.image_url)
            .bind(now)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, None, Some(&new.name)))
    }

    async fn delete_category(&self, id: i64) -> StoreResult<bool> {
        // ON DELETE SET NULL detaches the events
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn category_event_counts(&self) -> StoreResult<Vec<CategoryEventCount>> {
        Ok(sqlx::query_as::<_, CategoryEventCount>(
            "SELECT c.id AS category_id, COUNT(e.id) AS event_count \
             FROM categories c \
             LEFT JOIN events e ON e.category_id = c.id \
             GROUP BY c.id, c.name \
             ORDER BY c.name ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn category_event_count(&self, id: i64) -> StoreResult<i64> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events WHERE category_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?,
        )
    }
}

#[async_trait]
impl EventStore for SqliteStore {
    async fn list_events(&self) -> StoreResult<Vec<EventWithCategory>> {
        self.fetch_events("", EventBinds::None).await
    }

    async fn get_event(&self, id: i64) -> StoreResult<Option<EventWithCategory>> {
        let query = format!("{EVENT_SELECT} WHERE e.id = ?");
        Ok(sqlx::query_as::<_, EventWithCategory>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_events_by_category(
        &self,
        category_id: i64,
    ) -> StoreResult<Vec<EventWithCategory>> {
        self.fetch_events("WHERE e.category_id = ?", EventBinds::Id(category_id))
            .await
    }

    async fn list_upcoming_events_by_category(
        &self,
        category_id: i64,
        today: NaiveDate,
    ) -> StoreResult<Vec<EventWithCategory>> {
        self.fetch_events(
            "WHERE e.category_id = ? AND e.date >= ?",
            EventBinds::IdDate(category_id, today),
        )
        .await
    }

    async fn list_upcoming_events(
        &self,
        today: NaiveDate,
        limit: Option<i64>,
    ) -> StoreResult<Vec<EventWithCategory>> {
        match limit {
            Some(limit) => {
                let query = format!("{EVENT_SELECT} WHERE e.date >= ? {EVENT_ORDER} LIMIT ?");
                Ok(sqlx::query_as::<_, EventWithCategory>(&query)
                    .bind(today)
                    .bind(limit)
                    .fetch_all(&self.pool)
                    .await?)
            }
            None => {
                self.fetch_events("WHERE e.date >= ?", EventBinds::Date(today))
                    .await
            }
        }
    }

    async fn list_featured_events(&self, today: NaiveDate) -> StoreResult<Vec<EventWithCategory>> {
        self.fetch_events(
            "WHERE e.featured = 1 AND e.date >= ?",
            EventBinds::Date(today),
        )
        .await
    }

    async fn search_events(&self, term: &str) -> StoreResult<Vec<EventWithCategory>> {
        let pattern = like_pattern(term);
        self.fetch_events(
            "WHERE LOWER(e.title) LIKE ?1 ESCAPE '\\' \
             OR LOWER(e.description) LIKE ?1 ESCAPE '\\' \
             OR LOWER(e.content) LIKE ?1 ESCAPE '\\'",
            EventBinds::Pattern(&pattern),
        )
        .await
    }

    async fn list_events_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<EventWithCategory>> {
        self.fetch_events(
            "WHERE e.date BETWEEN ? AND ?",
            EventBinds::DateRange(start, end),
        )
        .await
    }

    async fn list_events_by_location(&self, term: &str) -> StoreResult<Vec<EventWithCategory>> {
        let pattern = like_pattern(term);
        self.fetch_events(
            "WHERE LOWER(e.location) LIKE ?1 ESCAPE '\\' \
             OR LOWER(e.address) LIKE ?1 ESCAPE '\\'",
            EventBinds::Pattern(&pattern),
        )
        .await
    }

    async fn create_event(
        &self,
        new: NewEvent,
        now: DateTime<Utc>,
    ) -> StoreResult<EventWithCategory> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO events (title, description, content, image_url, location, date, \
                                 start_time, end_time, address, category_id, featured, \
                                 created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING id",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.content)
        .bind(&new.image_url)
        .bind(&new.location)
        .bind(new.date)
        .bind(new.start_time)
        .bind(new.end_time)
        .bind(&new.address)
        .bind(new.category_id)
        .bind(new.featured)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, new.category_id, None))?;

        self.get_event(id)
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    async fn update_event(
        &self,
        id: i64,
        new: NewEvent,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<EventWithCategory>> {
        let result = sqlx::query(
            "UPDATE events \
             SET title = ?, description = ?, content = ?, image_url = ?, location = ?, \
                 date = ?, start_time = ?, end_time = ?, address = ?, category_id = ?, \
                 featured = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.content)
        .bind(&new.image_url)
        .bind(&new.location)
        .bind(new.date)
        .bind(new.start_time)
        .bind(new.end_time)
        .bind(&new.address)
        .bind(new.category_id)
        .bind(new.featured)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, new.category_id, None))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_event(id).await
    }

    async fn delete_event(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl MessageStore for SqliteStore {
    async fn list_messages(&self) -> StoreResult<Vec<ContactMessage>> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM contact_messages ORDER BY created_at DESC, id DESC"
        );
        Ok(sqlx::query_as::<_, ContactMessage>(&query)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_message(&self, id: i64) -> StoreResult<Option<ContactMessage>> {
        let query = format!("SELECT {MESSAGE_COLUMNS} FROM contact_messages WHERE id = ?");
        Ok(sqlx::query_as::<_, ContactMessage>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_message(
        &self,
        new: NewContactMessage,
        now: DateTime<Utc>,
    ) -> StoreResult<ContactMessage> {
        let query = format!(
            "INSERT INTO contact_messages \
                 (name, email, phone, subject, area, message, newsletter, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {MESSAGE_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, ContactMessage>(&query)
            .bind(&new.name)
            .bind(&new.email)
            .bind(&new.phone)
            .bind(&new.subject)
            .bind(&new.area)
            .bind(&new.message)
            .bind(new.newsletter)
            .bind(now)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn list_public_messages(&self) -> StoreResult<Vec<PublicContactMessage>> {
        Ok(sqlx::query_as::<_, PublicContactMessage>(
            "SELECT id, subject, area, created_at \
             FROM contact_messages \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete_message(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl StatsStore for SqliteStore {
    async fn stats(&self, today: NaiveDate) -> StoreResult<PortalStats> {
        Ok(sqlx::query_as::<_, PortalStats>(
            "SELECT \
                 (SELECT COUNT(*) FROM events) AS total_events, \
                 (SELECT COUNT(*) FROM categories) AS total_categories, \
                 (SELECT COUNT(*) FROM events WHERE date >= ?1) AS upcoming_events, \
                 (SELECT COUNT(*) FROM events WHERE date < ?1) AS past_events, \
                 (SELECT COUNT(*) FROM contact_messages) AS total_messages",
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn health(&self) -> StoreResult<StorageHealth> {
        let foreign_keys: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&self.pool)
            .await?;
        Ok(StorageHealth {
            backend: "sqlite",
            foreign_keys_enabled: Some(foreign_keys == 1),
        })
    }
}
