//! In-memory entity store backed by `DashMap`.
//!
//! Default backend; also what the test suite runs against. Listing
//! materializes matching records, sorts, and slices the requested page.

use std::cmp::Ordering;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::model::{Application, Event, Message, Notification, Tag, User};

use super::{
    ApplicationFilter, ApplicationSortKey, EntityStore, EventFilter, MessageFilter,
    NotificationSortKey, Page, PageRequest, SortOrder, StoreResult,
};

#[derive(Default)]
pub struct MemoryStore {
    applications: DashMap<Uuid, Application>,
    events: DashMap<Uuid, Event>,
    notifications: DashMap<Uuid, Notification>,
    messages: DashMap<Uuid, Message>,
    tags: DashMap<String, Tag>,
    users: DashMap<Uuid, User>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn order(cmp: Ordering, sort_order: SortOrder) -> Ordering {
    match sort_order {
        SortOrder::Asc => cmp,
        SortOrder::Desc => cmp.reverse(),
    }
}

fn paginate<T>(mut items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let start = page.offset().min(items.len());
    let end = (start + page.limit()).min(items.len());
    let items = items.drain(start..end).collect();
    Page::new(items, total, page)
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert_application(&self, application: Application) -> StoreResult<Application> {
        self.applications.insert(application.id, application.clone());
        Ok(application)
    }

    async fn application_by_id(&self, id: Uuid) -> StoreResult<Option<Application>> {
        Ok(self.applications.get(&id).map(|a| a.clone()))
    }

    async fn application_by_name(
        &self,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> StoreResult<Option<Application>> {
        Ok(self
            .applications
            .iter()
            .find(|entry| {
                entry.name == name
                    && !entry.state.is_deleted()
                    && Some(entry.id) != exclude_id
            })
            .map(|entry| entry.clone()))
    }

    async fn update_application(&self, application: &Application) -> StoreResult<()> {
        self.applications
            .insert(application.id, application.clone());
        Ok(())
    }

    async fn list_applications(
        &self,
        filter: &ApplicationFilter,
        sort_key: ApplicationSortKey,
        sort_order: SortOrder,
        page: PageRequest,
    ) -> StoreResult<Page<Application>> {
        let mut matches: Vec<Application> = self
            .applications
            .iter()
            .filter(|entry| {
                !entry.state.is_deleted()
                    && filter
                        .name
                        .as_deref()
                        .map_or(true, |name| contains_ci(&entry.name, name))
                    && filter.state.map_or(true, |state| entry.state == state)
            })
            .map(|entry| entry.clone())
            .collect();

        matches.sort_by(|a, b| {
            let cmp = match sort_key {
                ApplicationSortKey::Name => a.name.cmp(&b.name),
                ApplicationSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            order(cmp, sort_order)
        });

        Ok(paginate(matches, page))
    }

    async fn insert_event(&self, event: Event) -> StoreResult<Event> {
        self.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn event_by_id(&self, id: Uuid) -> StoreResult<Option<Event>> {
        Ok(self.events.get(&id).map(|e| e.clone()))
    }

    async fn event_by_name(
        &self,
        application_id: Uuid,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> StoreResult<Option<Event>> {
        Ok(self
            .events
            .iter()
            .find(|entry| {
                entry.application_id == application_id
                    && entry.name == name
                    && !entry.state.is_deleted()
                    && Some(entry.id) != exclude_id
            })
            .map(|entry| entry.clone()))
    }

    async fn update_event(&self, event: &Event) -> StoreResult<()> {
        self.events.insert(event.id, event.clone());
        Ok(())
    }

    async fn list_events(
        &self,
        application_id: Uuid,
        filter: &EventFilter,
        page: PageRequest,
    ) -> StoreResult<Page<Event>> {
        let mut matches: Vec<Event> = self
            .events
            .iter()
            .filter(|entry| {
                entry.application_id == application_id
                    && !entry.state.is_deleted()
                    && filter
                        .name
                        .as_deref()
                        .map_or(true, |name| contains_ci(&entry.name, name))
                    && filter
                        .description
                        .as_deref()
                        .map_or(true, |description| contains_ci(&entry.description, description))
            })
            .map(|entry| entry.clone())
            .collect();

        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(paginate(matches, page))
    }

    async fn insert_notification(&self, notification: Notification) -> StoreResult<Notification> {
        self.notifications
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn notification_by_id(&self, id: Uuid) -> StoreResult<Option<Notification>> {
        Ok(self.notifications.get(&id).map(|n| n.clone()))
    }

    async fn notification_by_name(
        &self,
        event_id: Uuid,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> StoreResult<Option<Notification>> {
        Ok(self
            .notifications
            .iter()
            .find(|entry| {
                entry.event_id == event_id
                    && entry.name == name
                    && !entry.state.is_deleted()
                    && Some(entry.id) != exclude_id
            })
            .map(|entry| entry.clone()))
    }

    async fn update_notification(&self, notification: &Notification) -> StoreResult<()> {
        self.notifications
            .insert(notification.id, notification.clone());
        Ok(())
    }

    async fn list_notifications(
        &self,
        event_id: Uuid,
        sort_key: NotificationSortKey,
        sort_order: SortOrder,
        page: PageRequest,
    ) -> StoreResult<Page<Notification>> {
        let mut matches: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|entry| entry.event_id == event_id && !entry.state.is_deleted())
            .map(|entry| entry.clone())
            .collect();

        matches.sort_by(|a, b| {
            let cmp = match sort_key {
                NotificationSortKey::Name => a.name.cmp(&b.name),
                NotificationSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            order(cmp, sort_order)
        });

        Ok(paginate(matches, page))
    }

    async fn insert_message(&self, message: Message) -> StoreResult<Message> {
        self.messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn list_messages(
        &self,
        notification_id: Uuid,
        filter: &MessageFilter,
        page: PageRequest,
    ) -> StoreResult<Page<Message>> {
        let mut matches: Vec<Message> = self
            .messages
            .iter()
            .filter(|entry| {
                entry.notification_id == notification_id
                    && filter
                        .email
                        .as_deref()
                        .map_or(true, |email| contains_ci(&entry.email, email))
                    && filter
                        .contents
                        .as_deref()
                        .map_or(true, |contents| contains_ci(&entry.contents, contents))
            })
            .map(|entry| entry.clone())
            .collect();

        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(paginate(matches, page))
    }

    async fn ensure_tag(&self, name: &str) -> StoreResult<Tag> {
        let tag = self
            .tags
            .entry(name.to_string())
            .or_insert_with(|| Tag {
                id: Uuid::new_v4(),
                name: name.to_string(),
            })
            .clone();
        Ok(tag)
    }

    async fn list_tags(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<String> = self.tags.iter().map(|entry| entry.name.clone()).collect();
        names.sort();
        Ok(names)
    }

    async fn insert_user(&self, user: User) -> StoreResult<User> {
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LifecycleState;

    #[tokio::test]
    async fn test_name_lookup_skips_deleted() {
        let store = MemoryStore::new();
        let mut app = Application::new("orders".into(), "order service".into());
        app.state = LifecycleState::Deleted;
        store.insert_application(app).await.unwrap();

        let found = store.application_by_name("orders", None).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_name_lookup_excludes_own_id() {
        let store = MemoryStore::new();
        let app = Application::new("orders".into(), "order service".into());
        let id = app.id;
        store.insert_application(app).await.unwrap();

        assert!(store
            .application_by_name("orders", Some(id))
            .await
            .unwrap()
            .is_none());
        assert!(store
            .application_by_name("orders", None)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_pagination_slices_second_page() {
        let store = MemoryStore::new();
        for i in 0..15 {
            store
                .insert_application(Application::new(
                    format!("app-{i:02}"),
                    "numbered app".into(),
                ))
                .await
                .unwrap();
        }

        let page = store
            .list_applications(
                &ApplicationFilter::default(),
                ApplicationSortKey::Name,
                SortOrder::Asc,
                PageRequest::new(Some(2), Some(5)),
            )
            .await
            .unwrap();

        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].name, "app-05");
        assert_eq!(page.items[4].name, "app-09");
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 15);
    }

    #[tokio::test]
    async fn test_filter_name_contains_case_insensitive() {
        let store = MemoryStore::new();
        store
            .insert_application(Application::new("Orders".into(), "order service".into()))
            .await
            .unwrap();
        store
            .insert_application(Application::new("billing".into(), "billing service".into()))
            .await
            .unwrap();

        let filter = ApplicationFilter {
            name: Some("ORD".into()),
            state: None,
        };
        let page = store
            .list_applications(
                &filter,
                ApplicationSortKey::Name,
                SortOrder::Asc,
                PageRequest::default(),
            )
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Orders");
    }

    #[tokio::test]
    async fn test_ensure_tag_deduplicates() {
        let store = MemoryStore::new();
        let first = store.ensure_tag("name").await.unwrap();
        let second = store.ensure_tag("name").await.unwrap();
        assert_eq!(first.id, second.id);

        store.ensure_tag("age").await.unwrap();
        assert_eq!(store.list_tags().await.unwrap(), vec!["age", "name"]);
    }
}
