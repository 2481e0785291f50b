//! PostgreSQL entity store backed by sqlx.
//!
//! Schema lives in `migrations/`. Optional filters bind as nullable
//! parameters so every statement stays static; only the ORDER BY clause is
//! assembled from the (enum-typed) sort key. Soft-deleted rows are excluded
//! in SQL, mirroring the memory backend.

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use uuid::Uuid;

use crate::model::{Application, Event, Message, Notification, Tag, User};

use super::{
    ApplicationFilter, ApplicationSortKey, EntityStore, EventFilter, MessageFilter,
    NotificationSortKey, Page, PageRequest, SortOrder, StoreResult,
};

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn order_clause(column: &str, sort_order: SortOrder) -> String {
    let direction = match sort_order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    format!("ORDER BY {column} {direction}")
}

#[async_trait]
impl EntityStore for PostgresStore {
    async fn insert_application(&self, application: Application) -> StoreResult<Application> {
        sqlx::query(
            r#"
            INSERT INTO applications (id, name, description, state, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(application.id)
        .bind(&application.name)
        .bind(&application.description)
        .bind(application.state)
        .bind(application.created_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(application)
    }

    async fn application_by_id(&self, id: Uuid) -> StoreResult<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(
            "SELECT id, name, description, state, created_at, updated_at \
             FROM applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(application)
    }

    async fn application_by_name(
        &self,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> StoreResult<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(
            r#"
            SELECT id, name, description, state, created_at, updated_at
            FROM applications
            WHERE name = $1 AND state <> 'deleted'
              AND ($2::uuid IS NULL OR id <> $2)
            LIMIT 1
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(application)
    }

    async fn update_application(&self, application: &Application) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE applications
            SET name = $2, description = $3, state = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(application.id)
        .bind(&application.name)
        .bind(&application.description)
        .bind(application.state)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_applications(
        &self,
        filter: &ApplicationFilter,
        sort_key: ApplicationSortKey,
        sort_order: SortOrder,
        page: PageRequest,
    ) -> StoreResult<Page<Application>> {
        // A `state = 'deleted'` filter combines with the standing
        // `state <> 'deleted'` exclusion into zero rows, same as the
        // memory backend.
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM applications
            WHERE state <> 'deleted'
              AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR state = $2)
            "#,
        )
        .bind(&filter.name)
        .bind(filter.state)
        .fetch_one(&self.pool)
        .await?;

        let column = match sort_key {
            ApplicationSortKey::Name => "name",
            ApplicationSortKey::CreatedAt => "created_at",
        };
        let query = format!(
            "SELECT id, name, description, state, created_at, updated_at \
             FROM applications \
             WHERE state <> 'deleted' \
               AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%') \
               AND ($2::text IS NULL OR state = $2) \
             {} LIMIT $3 OFFSET $4",
            order_clause(column, sort_order)
        );

        let items = sqlx::query_as::<_, Application>(&query)
            .bind(&filter.name)
            .bind(filter.state)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(items, total as u64, page))
    }

    async fn insert_event(&self, event: Event) -> StoreResult<Event> {
        sqlx::query(
            r#"
            INSERT INTO events (id, name, description, application_id, state, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.application_id)
        .bind(event.state)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(event)
    }

    async fn event_by_id(&self, id: Uuid) -> StoreResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, name, description, application_id, state, created_at, updated_at \
             FROM events WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn event_by_name(
        &self,
        application_id: Uuid,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> StoreResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, description, application_id, state, created_at, updated_at
            FROM events
            WHERE application_id = $1 AND name = $2 AND state <> 'deleted'
              AND ($3::uuid IS NULL OR id <> $3)
            LIMIT 1
            "#,
        )
        .bind(application_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn update_event(&self, event: &Event) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE events
            SET name = $2, description = $3, state = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(event.id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.state)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_events(
        &self,
        application_id: Uuid,
        filter: &EventFilter,
        page: PageRequest,
    ) -> StoreResult<Page<Event>> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM events
            WHERE application_id = $1 AND state <> 'deleted'
              AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR description ILIKE '%' || $3 || '%')
            "#,
        )
        .bind(application_id)
        .bind(&filter.name)
        .bind(&filter.description)
        .fetch_one(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, description, application_id, state, created_at, updated_at
            FROM events
            WHERE application_id = $1 AND state <> 'deleted'
              AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR description ILIKE '%' || $3 || '%')
            ORDER BY created_at ASC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(application_id)
        .bind(&filter.name)
        .bind(&filter.description)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(items, total as u64, page))
    }

    async fn insert_notification(&self, notification: Notification) -> StoreResult<Notification> {
        sqlx::query(
            r#"
            INSERT INTO notifications
                (id, name, description, event_id, template_subject, template_body,
                 placeholders, state, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(notification.id)
        .bind(&notification.name)
        .bind(&notification.description)
        .bind(notification.event_id)
        .bind(&notification.template_subject)
        .bind(&notification.template_body)
        .bind(&notification.placeholders)
        .bind(notification.state)
        .bind(notification.created_at)
        .bind(notification.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(notification)
    }

    async fn notification_by_id(&self, id: Uuid) -> StoreResult<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(
            "SELECT id, name, description, event_id, template_subject, template_body, \
                    placeholders, state, created_at, updated_at \
             FROM notifications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }

    async fn notification_by_name(
        &self,
        event_id: Uuid,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> StoreResult<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, name, description, event_id, template_subject, template_body,
                   placeholders, state, created_at, updated_at
            FROM notifications
            WHERE event_id = $1 AND name = $2 AND state <> 'deleted'
              AND ($3::uuid IS NULL OR id <> $3)
            LIMIT 1
            "#,
        )
        .bind(event_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }

    async fn update_notification(&self, notification: &Notification) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE notifications
            SET name = $2, description = $3, template_subject = $4, template_body = $5,
                placeholders = $6, state = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(notification.id)
        .bind(&notification.name)
        .bind(&notification.description)
        .bind(&notification.template_subject)
        .bind(&notification.template_body)
        .bind(&notification.placeholders)
        .bind(notification.state)
        .bind(notification.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_notifications(
        &self,
        event_id: Uuid,
        sort_key: NotificationSortKey,
        sort_order: SortOrder,
        page: PageRequest,
    ) -> StoreResult<Page<Notification>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE event_id = $1 AND state <> 'deleted'",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        let column = match sort_key {
            NotificationSortKey::Name => "name",
            NotificationSortKey::CreatedAt => "created_at",
        };
        let query = format!(
            "SELECT id, name, description, event_id, template_subject, template_body, \
                    placeholders, state, created_at, updated_at \
             FROM notifications \
             WHERE event_id = $1 AND state <> 'deleted' \
             {} LIMIT $2 OFFSET $3",
            order_clause(column, sort_order)
        );

        let items = sqlx::query_as::<_, Notification>(&query)
            .bind(event_id)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(items, total as u64, page))
    }

    async fn insert_message(&self, message: Message) -> StoreResult<Message> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, email, contents, notification_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id)
        .bind(&message.email)
        .bind(&message.contents)
        .bind(message.notification_id)
        .bind(message.created_at)
        .bind(message.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(message)
    }

    async fn list_messages(
        &self,
        notification_id: Uuid,
        filter: &MessageFilter,
        page: PageRequest,
    ) -> StoreResult<Page<Message>> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM messages
            WHERE notification_id = $1
              AND ($2::text IS NULL OR email ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR contents ILIKE '%' || $3 || '%')
            "#,
        )
        .bind(notification_id)
        .bind(&filter.email)
        .bind(&filter.contents)
        .fetch_one(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, email, contents, notification_id, created_at, updated_at
            FROM messages
            WHERE notification_id = $1
              AND ($2::text IS NULL OR email ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR contents ILIKE '%' || $3 || '%')
            ORDER BY created_at ASC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(notification_id)
        .bind(&filter.email)
        .bind(&filter.contents)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(items, total as u64, page))
    }

    async fn ensure_tag(&self, name: &str) -> StoreResult<Tag> {
        // Lookup-then-insert without a unique constraint: concurrent inserts
        // of the same name may race. Acceptable for a best-effort cache.
        let existing = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(tag) = existing {
            return Ok(tag);
        }

        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(tag)
    }

    async fn list_tags(&self) -> StoreResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM tags ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(names)
    }

    async fn insert_user(&self, user: User) -> StoreResult<User> {
        sqlx::query("INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3)")
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await?;

        Ok(user)
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
