//! Storage abstraction for the entity catalog.
//!
//! All persistence goes through the [`EntityStore`] trait so the service
//! layer never branches on the backing store. Two interchangeable backends
//! exist: an in-memory store (default, used by the test suite) and a
//! PostgreSQL store. The factory selects one from configuration.
//!
//! Query filters are typed per entity with an explicit allow-list of
//! fields; caller-supplied keys are never iterated into a query.

mod factory;
mod memory;
mod postgres;

pub use factory::create_entity_store;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::{Application, Event, LifecycleState, Message, Notification, Tag, User};

/// Errors surfaced by storage backends.
///
/// These are opaque internal failures; the HTTP layer maps them to a
/// generic 5xx and never retries.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 1-based page request. Defaults: page 1, ten items per page.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

impl PageRequest {
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(10).max(1),
        }
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.page_size as usize
    }

    pub fn limit(&self) -> usize {
        self.page_size as usize
    }
}

/// One page of results plus the paging envelope every list endpoint returns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_items: u64, request: PageRequest) -> Self {
        let total_pages = total_items.div_ceil(request.page_size as u64) as u32;
        Self {
            items,
            current_page: request.page,
            total_pages,
            page_size: request.page_size,
            total_items,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Sortable fields for application listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplicationSortKey {
    #[default]
    Name,
    CreatedAt,
}

/// Sortable fields for notification listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationSortKey {
    Name,
    #[default]
    CreatedAt,
}

/// Allow-listed application filters. `name` is a case-insensitive
/// contains-match; `state` is exact (Deleted records are never listed, so
/// asking for them yields an empty page).
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub name: Option<String>,
    pub state: Option<LifecycleState>,
}

/// Allow-listed event filters, both case-insensitive contains-matches.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Allow-listed message filters, both case-insensitive contains-matches.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    pub email: Option<String>,
    pub contents: Option<String>,
}

/// Backend trait for entity persistence.
///
/// Lookups that feed uniqueness checks (`*_by_name`) only consider
/// non-deleted records and can exclude one id, so an update does not
/// collide with the record it is renaming. List operations always exclude
/// deleted records.
///
/// Implementations must be `Send + Sync`; they are shared across request
/// handlers behind an `Arc`.
#[async_trait]
pub trait EntityStore: Send + Sync {
    // Applications
    async fn insert_application(&self, application: Application) -> StoreResult<Application>;
    async fn application_by_id(&self, id: Uuid) -> StoreResult<Option<Application>>;
    async fn application_by_name(
        &self,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> StoreResult<Option<Application>>;
    async fn update_application(&self, application: &Application) -> StoreResult<()>;
    async fn list_applications(
        &self,
        filter: &ApplicationFilter,
        sort_key: ApplicationSortKey,
        sort_order: SortOrder,
        page: PageRequest,
    ) -> StoreResult<Page<Application>>;

    // Events
    async fn insert_event(&self, event: Event) -> StoreResult<Event>;
    async fn event_by_id(&self, id: Uuid) -> StoreResult<Option<Event>>;
    async fn event_by_name(
        &self,
        application_id: Uuid,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> StoreResult<Option<Event>>;
    async fn update_event(&self, event: &Event) -> StoreResult<()>;
    async fn list_events(
        &self,
        application_id: Uuid,
        filter: &EventFilter,
        page: PageRequest,
    ) -> StoreResult<Page<Event>>;

    // Notifications
    async fn insert_notification(&self, notification: Notification) -> StoreResult<Notification>;
    async fn notification_by_id(&self, id: Uuid) -> StoreResult<Option<Notification>>;
    async fn notification_by_name(
        &self,
        event_id: Uuid,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> StoreResult<Option<Notification>>;
    async fn update_notification(&self, notification: &Notification) -> StoreResult<()>;
    async fn list_notifications(
        &self,
        event_id: Uuid,
        sort_key: NotificationSortKey,
        sort_order: SortOrder,
        page: PageRequest,
    ) -> StoreResult<Page<Notification>>;

    // Messages
    async fn insert_message(&self, message: Message) -> StoreResult<Message>;
    async fn list_messages(
        &self,
        notification_id: Uuid,
        filter: &MessageFilter,
        page: PageRequest,
    ) -> StoreResult<Page<Message>>;

    // Tag registry: lookup-or-insert by exact trimmed name. Best-effort
    // cache; concurrent inserts of the same name may race.
    async fn ensure_tag(&self, name: &str) -> StoreResult<Tag>;
    async fn list_tags(&self) -> StoreResult<Vec<String>>;

    // Users
    async fn insert_user(&self, user: User) -> StoreResult<User>;
    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
}
