//! JSON document implementation of the store traits.
//!
//! Each collection is one file under the data directory. Reads parse the
//! whole file; writes rewrite it through [`Document::write`]. Writers inside
//! this process take `write_lock`, so read-modify-write cycles do not
//! interleave. Separate processes sharing the directory are last-write-wins.
//!
//! Ids come from a per-collection high-water mark kept in
//! `id_sequences.json`, so the id of a deleted record is never handed out
//! again.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::document::Document;
use super::{
    seed, CategoryStore, EventStore, MessageStore, StatsStore, StoreError, StoreResult,
};
use crate::features::categories::models::{Category, CategoryEventCount, NewCategory};
use crate::features::events::models::{Event, EventWithCategory, NewEvent};
use crate::features::messages::models::{ContactMessage, NewContactMessage, PublicContactMessage};
use crate::features::portal::models::{PortalStats, StorageHealth};
use crate::shared::time_range::parse_time_range;
use crate::shared::validation::fold_case;

const CATEGORIES_FILE: &str = "categories.json";
const EVENTS_FILE: &str = "events.json";
const MESSAGES_FILE: &str = "contact_messages.json";
const SEQUENCES_FILE: &str = "id_sequences.json";
/// Area document written by earlier releases of the portal
const LEGACY_CATEGORIES_FILE: &str = "community_areas.json";

const CATEGORY_SEQUENCE: &str = "categories";
const EVENT_SEQUENCE: &str = "events";
const MESSAGE_SEQUENCE: &str = "contact_messages";

/// Highest id ever assigned in one collection
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IdSequence {
    collection: String,
    last_id: i64,
}

/// On-disk category. Older area documents carry an `icon` and no
/// `updated_at`; both are tolerated.
#[derive(Debug, Deserialize)]
struct CategoryDocument {
    id: i64,
    name: String,
    description: Option<String>,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<CategoryDocument> for Category {
    fn from(d: CategoryDocument) -> Self {
        Self {
            id: d.id,
            name: d.name,
            description: d.description,
            image_url: d.image_url,
            created_at: d.created_at,
            updated_at: d.updated_at.unwrap_or(d.created_at),
        }
    }
}

/// On-disk event. Older documents store a free-text `time` range such as
/// `"10:00 AM - 8:00 PM"` instead of `start_time`/`end_time`.
#[derive(Debug, Deserialize)]
struct EventDocument {
    id: i64,
    title: String,
    description: Option<String>,
    content: Option<String>,
    image_url: Option<String>,
    location: Option<String>,
    date: NaiveDate,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    address: Option<String>,
    category_id: Option<i64>,
    #[serde(default)]
    featured: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    time: Option<String>,
}

impl From<EventDocument> for Event {
    fn from(d: EventDocument) -> Self {
        let (start_time, end_time) = match (d.start_time, d.end_time, d.time.as_deref()) {
            (None, None, Some(range)) => parse_time_range(range),
            (start, end, _) => (start, end),
        };
        Self {
            id: d.id,
            title: d.title,
            description: d.description,
            content: d.content,
            image_url: d.image_url,
            location: d.location,
            date: d.date,
            start_time,
            end_time,
            address: d.address,
            category_id: d.category_id,
            featured: d.featured,
            created_at: d.created_at,
            updated_at: d.updated_at.unwrap_or(d.created_at),
        }
    }
}

pub struct JsonStore {
    data_dir: PathBuf,
    categories: Document,
    events: Document,
    messages: Document,
    sequences: Document,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            categories: Document::new(data_dir.join(CATEGORIES_FILE)),
            events: Document::new(data_dir.join(EVENTS_FILE)),
            messages: Document::new(data_dir.join(MESSAGES_FILE)),
            sequences: Document::new(data_dir.join(SEQUENCES_FILE)),
            data_dir,
            write_lock: Mutex::new(()),
        }
    }

    /// Create the data directory and seed every document that does not exist
    /// yet. Existing documents are left untouched. Areas stored under the
    /// legacy `community_areas.json` name are copied over instead of seeding.
    pub async fn initialize(&self, seed_sample_events: bool) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        let _guard = self.write_lock.lock().await;
        let now = Utc::now();

        let legacy = Document::new(self.data_dir.join(LEGACY_CATEGORIES_FILE));
        if !self.categories.exists().await? && legacy.exists().await? {
            let docs: Vec<CategoryDocument> = legacy.read().await?;
            let categories: Vec<Category> = docs.into_iter().map(Into::into).collect();
            self.categories.write(&categories).await?;
            tracing::info!(
                count = categories.len(),
                "Migrated areas from {}",
                legacy.path().display()
            );
        }

        if !self.categories.exists().await? {
            let categories: Vec<Category> = seed::default_categories()
                .into_iter()
                .zip(1..)
                .map(|(new, id)| Category {
                    id,
                    name: new.name,
                    description: new.description,
                    image_url: new.image_url,
                    created_at: now,
                    updated_at: now,
                })
                .collect();
            self.categories.write(&categories).await?;
            tracing::info!("Seeded {}", self.categories.path().display());
        }

        if !self.events.exists().await? {
            let events: Vec<Event> = if seed_sample_events {
                let categories = self.read_categories().await?;
                seed::sample_events(|name| {
                    categories.iter().find(|c| c.name == name).map(|c| c.id)
                })
                .into_iter()
                .zip(1..)
                .map(|(new, id)| build_event(id, new, now, now))
                .collect()
            } else {
                Vec::new()
            };
            self.events.write(&events).await?;
            tracing::info!("Seeded {}", self.events.path().display());
        }

        if !self.messages.exists().await? {
            self.messages.write::<ContactMessage>(&[]).await?;
            tracing::info!("Seeded {}", self.messages.path().display());
        }

        Ok(())
    }

    async fn read_categories(&self) -> StoreResult<Vec<Category>> {
        let docs: Vec<CategoryDocument> = self.categories.read().await?;
        Ok(docs.into_iter().map(Into::into).collect())
    }

    async fn read_events(&self) -> StoreResult<Vec<Event>> {
        let docs: Vec<EventDocument> = self.events.read().await?;
        Ok(docs.into_iter().map(Into::into).collect())
    }

    async fn read_messages(&self) -> StoreResult<Vec<ContactMessage>> {
        self.messages.read().await
    }

    /// Reserve the next id in `collection`. Callers hold `write_lock`.
    ///
    /// The mark is persisted before the record itself, so a failed record
    /// write skips an id rather than reusing one. Directories without a
    /// sequence file start from the highest stored id.
    async fn allocate_id(
        &self,
        collection: &str,
        existing: impl Iterator<Item = i64>,
    ) -> StoreResult<i64> {
        let highest = existing.max().unwrap_or(0);
        let mut sequences: Vec<IdSequence> = if self.sequences.exists().await? {
            self.sequences.read().await?
        } else {
            Vec::new()
        };

        let recorded = sequences
            .iter()
            .find(|s| s.collection == collection)
            .map_or(0, |s| s.last_id);
        let id = recorded.max(highest) + 1;

        match sequences.iter_mut().find(|s| s.collection == collection) {
            Some(sequence) => sequence.last_id = id,
            None => sequences.push(IdSequence {
                collection: collection.to_string(),
                last_id: id,
            }),
        }
        self.sequences.write(&sequences).await?;
        Ok(id)
    }

    /// Join every event matching `keep` with its category, in schedule order
    async fn joined_events<F>(&self, keep: F) -> StoreResult<Vec<EventWithCategory>>
    where
        F: Fn(&Event) -> bool,
    {
        let categories = self.read_categories().await?;
        let mut events: Vec<Event> = self.read_events().await?.into_iter().filter(keep).collect();
        events.sort_by_key(Event::schedule_key);
        Ok(attach_categories(events, &categories))
    }

    async fn ensure_category_exists(&self, category_id: Option<i64>) -> StoreResult<()> {
        if let Some(id) = category_id {
            let categories = self.read_categories().await?;
            if !categories.iter().any(|c| c.id == id) {
                return Err(StoreError::MissingCategory(id));
            }
        }
        Ok(())
    }

    async fn join_one(&self, event: Event) -> StoreResult<EventWithCategory> {
        let categories = self.read_categories().await?;
        attach_categories(vec![event], &categories)
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Io(std::io::Error::other("event lost while joining")))
    }
}

fn build_event(id: i64, new: NewEvent, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Event {
    Event {
        id,
        title: new.title,
        description: new.description,
        content: new.content,
        image_url: new.image_url,
        location: new.location,
        date: new.date,
        start_time: new.start_time,
        end_time: new.end_time,
        address: new.address,
        category_id: new.category_id,
        featured: new.featured,
        created_at,
        updated_at,
    }
}

fn attach_categories(events: Vec<Event>, categories: &[Category]) -> Vec<EventWithCategory> {
    let by_id: HashMap<i64, &Category> = categories.iter().map(|c| (c.id, c)).collect();
    events
        .into_iter()
        .map(|event| {
            let category = event.category_id.and_then(|id| by_id.get(&id));
            EventWithCategory {
                category_name: category.map(|c| c.name.clone()),
                category_description: category.and_then(|c| c.description.clone()),
                event,
            }
        })
        .collect()
}

fn contains_ci(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| fold_case(f).contains(needle))
}

#[async_trait]
impl CategoryStore for JsonStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let mut categories = self.read_categories().await?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn get_category(&self, id: i64) -> StoreResult<Option<Category>> {
        Ok(self.read_categories().await?.into_iter().find(|c| c.id == id))
    }

    async fn create_category(
        &self,
        new: NewCategory,
        now: DateTime<Utc>,
    ) -> StoreResult<Category> {
        let _guard = self.write_lock.lock().await;
        let mut categories = self.read_categories().await?;
        if categories.iter().any(|c| c.name == new.name) {
            return Err(StoreError::DuplicateCategory(new.name));
        }

        let id = self
            .allocate_id(CATEGORY_SEQUENCE, categories.iter().map(|c| c.id))
            .await?;
        let category = Category {
            id,
            name: new.name,
            description: new.description,
            image_url: new.image_url,
            created_at: now,
            updated_at: now,
        };
        categories.push(category.clone());
        self.categories.write(&categories).await?;
        Ok(category)
    }

    async fn update_category(
        &self,
        id: i64,
        new: NewCategory,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Category>> {
        let _guard = self.write_lock.lock().await;
        let mut categories = self.read_categories().await?;
        if categories.iter().any(|c| c.id != id && c.name == new.name) {
            return Err(StoreError::DuplicateCategory(new.name));
        }
        let Some(category) = categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        category.name = new.name;
        category.description = new.description;
        category.image_url = new.image_url;
        category.updated_at = now;
        let updated = category.clone();

        self.categories.write(&categories).await?;
        Ok(Some(updated))
    }

    async fn delete_category(&self, id: i64) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut categories = self.read_categories().await?;
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Ok(false);
        }

        // Category first: if the event write then fails, the leftover ids
        // resolve to nothing and reads return those events uncategorised.
        self.categories.write(&categories).await?;

        let mut events = self.read_events().await?;
        let mut detached = 0;
        for event in events.iter_mut().filter(|e| e.category_id == Some(id)) {
            event.category_id = None;
            detached += 1;
        }
        if detached > 0 {
            self.events.write(&events).await?;
        }
        tracing::debug!(category_id = id, detached, "Category removed");
        Ok(true)
    }

    async fn category_event_counts(&self) -> StoreResult<Vec<CategoryEventCount>> {
        let categories = self.list_categories().await?;
        let events = self.read_events().await?;
        Ok(categories
            .iter()
            .map(|c| CategoryEventCount {
                category_id: c.id,
                event_count: events.iter().filter(|e| e.category_id == Some(c.id)).count()
                    as i64,
            })
            .collect())
    }

    async fn category_event_count(&self, id: i64) -> StoreResult<i64> {
        let events = self.read_events().await?;
        Ok(events.iter().filter(|e| e.category_id == Some(id)).count() as i64)
    }
}

#[async_trait]
impl EventStore for JsonStore {
    async fn list_events(&self) -> StoreResult<Vec<EventWithCategory>> {
        self.joined_events(|_| true).await
    }

    async fn get_event(&self, id: i64) -> StoreResult<Option<EventWithCategory>> {
        Ok(self.joined_events(|e| e.id == id).await?.into_iter().next())
    }

    async fn list_events_by_category(
        &self,
        category_id: i64,
    ) -> StoreResult<Vec<EventWithCategory>> {
        self.joined_events(|e| e.category_id == Some(category_id))
            .await
    }

    async fn list_upcoming_events_by_category(
        &self,
        category_id: i64,
        today: NaiveDate,
    ) -> StoreResult<Vec<EventWithCategory>> {
        self.joined_events(|e| e.category_id == Some(category_id) && e.is_upcoming(today))
            .await
    }

    async fn list_upcoming_events(
        &self,
        today: NaiveDate,
        limit: Option<i64>,
    ) -> StoreResult<Vec<EventWithCategory>> {
        let mut events = self.joined_events(|e| e.is_upcoming(today)).await?;
        if let Some(limit) = limit.filter(|l| *l >= 0) {
            events.truncate(limit as usize);
        }
        Ok(events)
    }

    async fn list_featured_events(&self, today: NaiveDate) -> StoreResult<Vec<EventWithCategory>> {
        self.joined_events(|e| e.featured && e.is_upcoming(today))
            .await
    }

    async fn search_events(&self, term: &str) -> StoreResult<Vec<EventWithCategory>> {
        let needle = fold_case(term);
        self.joined_events(|e| {
            contains_ci(Some(e.title.as_str()), &needle)
                || contains_ci(e.description.as_deref(), &needle)
                || contains_ci(e.content.as_deref(), &needle)
        })
        .await
    }

    async fn list_events_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<EventWithCategory>> {
        self.joined_events(|e| e.date >= start && e.date <= end)
            .await
    }

    async fn list_events_by_location(&self, term: &str) -> StoreResult<Vec<EventWithCategory>> {
        let needle = fold_case(term);
        self.joined_events(|e| {
            contains_ci(e.location.as_deref(), &needle) || contains_ci(e.address.as_deref(), &needle)
        })
        .await
    }

    async fn create_event(
        &self,
        new: NewEvent,
        now: DateTime<Utc>,
    ) -> StoreResult<EventWithCategory> {
        let _guard = self.write_lock.lock().await;
        self.ensure_category_exists(new.category_id).await?;

        let mut events = self.read_events().await?;
        let id = self
            .allocate_id(EVENT_SEQUENCE, events.iter().map(|e| e.id))
            .await?;
        let event = build_event(id, new, now, now);
        events.push(event.clone());
        self.events.write(&events).await?;

        self.join_one(event).await
    }

    async fn update_event(
        &self,
        id: i64,
        new: NewEvent,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<EventWithCategory>> {
        let _guard = self.write_lock.lock().await;
        let mut events = self.read_events().await?;
        let Some(slot) = events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        self.ensure_category_exists(new.category_id).await?;

        *slot = build_event(id, new, slot.created_at, now);
        let updated = slot.clone();
        self.events.write(&events).await?;

        self.join_one(updated).await.map(Some)
    }

    async fn delete_event(&self, id: i64) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut events = self.read_events().await?;
        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Ok(false);
        }
        self.events.write(&events).await?;
        Ok(true)
    }
}

#[async_trait]
impl MessageStore for JsonStore {
    async fn list_messages(&self) -> StoreResult<Vec<ContactMessage>> {
        let mut messages = self.read_messages().await?;
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(messages)
    }

    async fn get_message(&self, id: i64) -> StoreResult<Option<ContactMessage>> {
        Ok(self.read_messages().await?.into_iter().find(|m| m.id == id))
    }

    async fn create_message(
        &self,
        new: NewContactMessage,
        now: DateTime<Utc>,
    ) -> StoreResult<ContactMessage> {
        let _guard = self.write_lock.lock().await;
        let mut messages = self.read_messages().await?;
        let id = self
            .allocate_id(MESSAGE_SEQUENCE, messages.iter().map(|m| m.id))
            .await?;
        let message = ContactMessage {
            id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            subject: new.subject,
            area: new.area,
            message: new.message,
            newsletter: new.newsletter,
            created_at: now,
        };
        messages.push(message.clone());
        self.messages.write(&messages).await?;
        Ok(message)
    }

    async fn list_public_messages(&self) -> StoreResult<Vec<PublicContactMessage>> {
        Ok(self
            .list_messages()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn delete_message(&self, id: i64) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut messages = self.read_messages().await?;
        let before = messages.len();
        messages.retain(|m| m.id != id);
        if messages.len() == before {
            return Ok(false);
        }
        self.messages.write(&messages).await?;
        Ok(true)
    }
}

#[async_trait]
impl StatsStore for JsonStore {
    async fn stats(&self, today: NaiveDate) -> StoreResult<PortalStats> {
        let events = self.read_events().await?;
        let upcoming = events.iter().filter(|e| e.is_upcoming(today)).count() as i64;
        Ok(PortalStats {
            total_events: events.len() as i64,
            total_categories: self.read_categories().await?.len() as i64,
            upcoming_events: upcoming,
            past_events: events.len() as i64 - upcoming,
            total_messages: self.read_messages().await?.len() as i64,
        })
    }

    async fn health(&self) -> StoreResult<StorageHealth> {
        // A readable directory is all this backend needs
        tokio::fs::metadata(&self.data_dir).await?;
        Ok(StorageHealth {
            backend: "json",
            foreign_keys_enabled: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data"));
        store.initialize(true).await.unwrap();

        let extra = NewCategory {
            name: "Neighbourhood Watch".to_string(),
            description: None,
            image_url: None,
        };
        store.create_category(extra, Utc::now()).await.unwrap();

        // Second start-up must not reseed over existing documents
        store.initialize(true).await.unwrap();
        assert_eq!(store.list_categories().await.unwrap().len(), 8);
        assert_eq!(store.list_events().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_reads_legacy_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(EVENTS_FILE),
            r#"[{
                "id": 3,
                "title": "Farmers Market",
                "description": "Fresh local produce and handmade goods",
                "date": "2025-08-20",
                "time": "8:00 AM - 2:00 PM",
                "location": "Stratford Shopping Centre",
                "category": "market",
                "featured": false,
                "created_at": "2025-07-01T09:30:00.000Z"
            }]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(CATEGORIES_FILE),
            r#"[{
                "id": 1,
                "name": "Sports & Recreation",
                "description": "Local sports clubs",
                "icon": "⚽",
                "created_at": "2025-07-01T09:30:00.000Z"
            }]"#,
        )
        .unwrap();

        let store = JsonStore::new(dir.path());
        store.initialize(false).await.unwrap();

        let event = store.get_event(3).await.unwrap().unwrap().event;
        assert_eq!(event.start_time, NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(event.end_time, NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(event.category_id, None);
        assert_eq!(event.updated_at, event.created_at);

        let category = store.get_category(1).await.unwrap().unwrap();
        assert_eq!(category.image_url, None);
    }

    #[tokio::test]
    async fn test_reads_legacy_area_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(LEGACY_CATEGORIES_FILE),
            r#"[{
                "id": 12,
                "name": "Allotments",
                "description": "Plots and growing spaces",
                "icon": "🌱",
                "created_at": "2025-07-01T09:30:00.000Z"
            }]"#,
        )
        .unwrap();

        let store = JsonStore::new(dir.path());
        store.initialize(false).await.unwrap();

        let categories = store.list_categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, 12);
        assert_eq!(categories[0].name, "Allotments");
        assert!(dir.path().join(CATEGORIES_FILE).exists());

        let next = NewCategory {
            name: "Orchards".to_string(),
            description: None,
            image_url: None,
        };
        assert_eq!(store.create_category(next, Utc::now()).await.unwrap().id, 13);
    }

    #[tokio::test]
    async fn test_delete_category_removes_category_before_detaching() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        store.initialize(true).await.unwrap();
        let arts = store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .find(|c| c.name == "Arts & Culture")
            .unwrap()
            .id;

        assert!(store.delete_category(arts).await.unwrap());
        assert!(store.get_category(arts).await.unwrap().is_none());
        assert!(store.list_events_by_category(arts).await.unwrap().is_empty());

        // An event left pointing at the removed id still reads as uncategorised
        let mut events = store.read_events().await.unwrap();
        events[0].category_id = Some(arts);
        store.events.write(&events).await.unwrap();
        let stale = store.get_event(events[0].id).await.unwrap().unwrap();
        assert_eq!(stale.category_name, None);
        assert_eq!(stale.category_description, None);
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        store.initialize(false).await.unwrap();

        let new = |subject: &str| NewContactMessage {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            phone: None,
            subject: subject.to_string(),
            area: None,
            message: "M".to_string(),
            newsletter: false,
        };
        store.create_message(new("one"), Utc::now()).await.unwrap();
        let second = store.create_message(new("two"), Utc::now()).await.unwrap();
        assert!(store.delete_message(second.id).await.unwrap());

        let third = store.create_message(new("three"), Utc::now()).await.unwrap();
        assert_eq!(third.id, second.id + 1);

        // The mark survives a restart
        assert!(store.delete_message(third.id).await.unwrap());
        let reopened = JsonStore::new(dir.path());
        reopened.initialize(false).await.unwrap();
        let fourth = reopened.create_message(new("four"), Utc::now()).await.unwrap();
        assert_eq!(fourth.id, third.id + 1);
    }
}
