#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use community_portal::app::AppServices;
use community_portal::core::config::DatabaseConfig;
use community_portal::core::database;
use community_portal::features::events::models::NewEvent;
use community_portal::modules::storage::{CategoryStore, JsonStore, SqliteStore, Storage};
use community_portal::shared::clock::{Clock, FixedClock};
use tempfile::TempDir;

/// The "current date" every test runs at
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

pub fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(today()))
}

/// A whole-second timestamp, identical after a round trip through either backend
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn new_event(title: &str, on: NaiveDate) -> NewEvent {
    NewEvent {
        title: title.to_string(),
        description: None,
        content: None,
        image_url: None,
        location: None,
        date: on,
        start_time: None,
        end_time: None,
        address: None,
        category_id: None,
        featured: false,
    }
}

/// Opened storage plus the services built over it
pub struct Fixture {
    pub storage: Storage,
    pub services: AppServices,
    _dir: Option<TempDir>,
}

impl Fixture {
    /// In-memory SQLite, migrated and seeded
    pub async fn sqlite(seed_sample_events: bool) -> Self {
        let pool = database::create_pool(&DatabaseConfig::in_memory())
            .await
            .unwrap();
        let store = SqliteStore::new(pool);
        store.initialize(seed_sample_events).await.unwrap();
        Self::new(Storage::from_sqlite(store), None)
    }

    /// JSON documents in a fresh temporary directory
    pub async fn json(seed_sample_events: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data"));
        store.initialize(seed_sample_events).await.unwrap();
        Self::new(Storage::from_json(store), Some(dir))
    }

    fn new(storage: Storage, dir: Option<TempDir>) -> Self {
        let services = AppServices::new(&storage, clock());
        Self {
            storage,
            services,
            _dir: dir,
        }
    }

    /// Directory holding the JSON documents, if this is a JSON fixture
    pub fn data_dir(&self) -> Option<std::path::PathBuf> {
        self._dir.as_ref().map(|d| d.path().join("data"))
    }

    pub async fn category_id(&self, name: &str) -> i64 {
        self.storage
            .categories
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .find(|c| c.name == name)
            .map(|c| c.id)
            .unwrap_or_else(|| panic!("no category named {name}"))
    }
}
