//! Entity definitions shared by every storage backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of an application, event or notification.
///
/// A single enum instead of independent `is_active`/`is_deleted` flags, so
/// the nonsensical deleted-but-active combination cannot be represented.
/// `Deleted` is terminal: soft delete never reverts, and deactivation of a
/// deleted record is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum LifecycleState {
    Active,
    Inactive,
    Deleted,
}

impl LifecycleState {
    pub fn is_deleted(self) -> bool {
        self == LifecycleState::Deleted
    }

    /// Active <-> Inactive. Must not be called on a deleted record.
    pub fn toggled(self) -> Self {
        match self {
            LifecycleState::Active => LifecycleState::Inactive,
            LifecycleState::Inactive => LifecycleState::Active,
            LifecycleState::Deleted => LifecycleState::Deleted,
        }
    }
}

/// Root entity. Owns events; never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub state: LifecycleState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    pub fn new(name: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            state: LifecycleState::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Child of exactly one application.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub application_id: Uuid,
    pub state: LifecycleState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn new(name: String, description: String, application_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            application_id,
            state: LifecycleState::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Child of exactly one event. `placeholders` is derived from
/// `template_body` and recomputed whenever the body changes.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub event_id: Uuid,
    pub template_subject: String,
    pub template_body: String,
    pub placeholders: Vec<String>,
    pub state: LifecycleState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        name: String,
        description: String,
        event_id: Uuid,
        template_subject: String,
        template_body: String,
        placeholders: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            event_id,
            template_subject,
            template_body,
            placeholders,
            state: LifecycleState::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// One rendering instance. Immutable once created; no update operation
/// exists and no lifecycle state applies.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub email: String,
    pub contents: String,
    pub notification_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Message {
    pub fn new(email: String, contents: String, notification_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            contents,
            notification_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Global registry row for a placeholder name ever seen across
/// notifications. Best-effort deduplication cache, not a correctness store.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

/// Account backing token issuance. Passwords are stored bcrypt-hashed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}
