//! Storage backends for the portal data.
//!
//! Two interchangeable implementations sit behind the same store traits:
//!
//! | Backend | Type | Persistence |
//! |---------|------|-------------|
//! | SQLite | [`SqliteStore`] | `categories`, `events`, `contact_messages` tables |
//! | JSON | [`JsonStore`] | one pretty-printed document per collection |
//!
//! Both order events by `date, start_time, id`, match search terms
//! case-insensitively and treat a deleted category as "set null" on its events.

mod document;
mod json;
pub mod seed;
mod sqlite;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::core::config::{StorageBackend, StorageConfig};
use crate::features::categories::models::{Category, CategoryEventCount, NewCategory};
use crate::features::events::models::{EventWithCategory, NewEvent};
use crate::features::messages::models::{ContactMessage, NewContactMessage, PublicContactMessage};
use crate::features::portal::models::{PortalStats, StorageHealth};

pub use json::JsonStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Category {0} does not exist")]
    MissingCategory(i64),

    #[error("Category name '{0}' is already taken")]
    DuplicateCategory(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories ordered by name
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn get_category(&self, id: i64) -> StoreResult<Option<Category>>;

    async fn create_category(&self, new: NewCategory, now: DateTime<Utc>)
        -> StoreResult<Category>;

    /// Replace the mutable fields. `None` when the category does not exist.
    async fn update_category(
        &self,
        id: i64,
        new: NewCategory,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Category>>;

    /// Remove a category, detaching (not deleting) its events
    async fn delete_category(&self, id: i64) -> StoreResult<bool>;

    /// Event count for every category, zero counts included
    async fn category_event_counts(&self) -> StoreResult<Vec<CategoryEventCount>>;

    async fn category_event_count(&self, id: i64) -> StoreResult<i64>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn list_events(&self) -> StoreResult<Vec<EventWithCategory>>;

    async fn get_event(&self, id: i64) -> StoreResult<Option<EventWithCategory>>;

    async fn list_events_by_category(&self, category_id: i64)
        -> StoreResult<Vec<EventWithCategory>>;

    async fn list_upcoming_events_by_category(
        &self,
        category_id: i64,
        today: NaiveDate,
    ) -> StoreResult<Vec<EventWithCategory>>;

    /// Events dated on or after `today`, nearest first. `None` means unbounded.
    async fn list_upcoming_events(
        &self,
        today: NaiveDate,
        limit: Option<i64>,
    ) -> StoreResult<Vec<EventWithCategory>>;

    async fn list_featured_events(&self, today: NaiveDate) -> StoreResult<Vec<EventWithCategory>>;

    /// Case-insensitive substring match on title, description or content.
    /// The caller guarantees a non-empty term.
    async fn search_events(&self, term: &str) -> StoreResult<Vec<EventWithCategory>>;

    /// Inclusive on both bounds
    async fn list_events_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<EventWithCategory>>;

    /// Case-insensitive substring match on location or address
    async fn list_events_by_location(&self, term: &str) -> StoreResult<Vec<EventWithCategory>>;

    async fn create_event(&self, new: NewEvent, now: DateTime<Utc>)
        -> StoreResult<EventWithCategory>;

    /// Full replace. `None` when the event does not exist; never inserts.
    async fn update_event(
        &self,
        id: i64,
        new: NewEvent,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<EventWithCategory>>;

    async fn delete_event(&self, id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Newest first
    async fn list_messages(&self) -> StoreResult<Vec<ContactMessage>>;

    async fn get_message(&self, id: i64) -> StoreResult<Option<ContactMessage>>;

    async fn create_message(
        &self,
        new: NewContactMessage,
        now: DateTime<Utc>,
    ) -> StoreResult<ContactMessage>;

    /// Newest first, personal fields stripped
    async fn list_public_messages(&self) -> StoreResult<Vec<PublicContactMessage>>;

    async fn delete_message(&self, id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn stats(&self, today: NaiveDate) -> StoreResult<PortalStats>;

    async fn health(&self) -> StoreResult<StorageHealth>;
}

/// Marker for a type implementing every store trait
pub trait PortalStore: CategoryStore + EventStore + MessageStore + StatsStore + 'static {}

impl<T> PortalStore for T where T: CategoryStore + EventStore + MessageStore + StatsStore + 'static {}

enum Handle {
    Sqlite(sqlx::SqlitePool),
    Json,
}

/// Opened storage, shared by every service.
///
/// Opened once at start-up and released with [`Storage::close`] on shutdown.
pub struct Storage {
    pub categories: Arc<dyn CategoryStore>,
    pub events: Arc<dyn EventStore>,
    pub messages: Arc<dyn MessageStore>,
    pub stats: Arc<dyn StatsStore>,
    handle: Handle,
}

impl Storage {
    /// Open the configured backend, creating and seeding it when needed
    pub async fn open(config: &StorageConfig) -> StoreResult<Self> {
        match config.backend {
            StorageBackend::Sqlite => {
                ensure_sqlite_parent_dir(&config.database.url).await?;
                let pool = crate::core::database::create_pool(&config.database).await?;
                let store = SqliteStore::new(pool);
                store.initialize(config.seed_sample_events).await?;
                tracing::info!("SQLite storage ready: {}", config.database.url);
                Ok(Self::from_sqlite(store))
            }
            StorageBackend::Json => {
                let store = JsonStore::new(&config.data_dir);
                store.initialize(config.seed_sample_events).await?;
                tracing::info!("JSON storage ready: {}", config.data_dir.display());
                Ok(Self::from_json(store))
            }
        }
    }

    pub fn from_sqlite(store: SqliteStore) -> Self {
        let handle = Handle::Sqlite(store.pool().clone());
        Self::from_store(Arc::new(store), handle)
    }

    pub fn from_json(store: JsonStore) -> Self {
        Self::from_store(Arc::new(store), Handle::Json)
    }

    fn from_store<S: PortalStore>(store: Arc<S>, handle: Handle) -> Self {
        Self {
            categories: store.clone(),
            events: store.clone(),
            messages: store.clone(),
            stats: store,
            handle,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.handle {
            Handle::Sqlite(_) => "sqlite",
            Handle::Json => "json",
        }
    }

    /// Release the underlying resources
    pub async fn close(self) {
        match self.handle {
            Handle::Sqlite(pool) => {
                pool.close().await;
                tracing::info!("SQLite pool closed");
            }
            Handle::Json => tracing::info!("JSON storage released"),
        }
    }
}

/// SQLite creates the database file but not its directory
async fn ensure_sqlite_parent_dir(url: &str) -> StoreResult<()> {
    if url.contains(":memory:") {
        return Ok(());
    }
    let path = url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}
