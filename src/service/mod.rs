//! Catalog service: entity integrity rules over the entity store.
//!
//! Every mutation runs its cross-entity checks here, then performs a single
//! store call. Scoped name uniqueness is checked only against non-deleted
//! siblings, excluding the mutated record's own id; child creation is gated
//! on ancestor state. Checks and writes are separate store calls, so two
//! concurrent creates with the same scoped name can both pass the pre-check
//! (accepted low-contention race, see DESIGN.md).

mod applications;
mod events;
mod messages;
mod notifications;
mod tags;
mod users;

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::metrics::INTEGRITY_REJECTIONS_TOTAL;
use crate::model::{Application, Event, Notification};
use crate::store::EntityStore;

/// Service facade over the entity store. Constructed once at startup and
/// handed down; the store handle is injected, never global.
pub struct CatalogService {
    store: Arc<dyn EntityStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    fn rejected(kind: &str, error: AppError) -> AppError {
        INTEGRITY_REJECTIONS_TOTAL.with_label_values(&[kind]).inc();
        error
    }

    /// Fetch an application that may still parent children: it must exist,
    /// not be deleted, and be active. A deleted or missing application is
    /// indistinguishable to the caller (not found); an inactive one is a
    /// distinct client error.
    async fn require_active_application(&self, id: Uuid) -> Result<Application> {
        let application = self.store.application_by_id(id).await?;

        match application {
            None => Err(Self::rejected(
                "not_found",
                AppError::NotFound(format!("application {id} was not found")),
            )),
            Some(app) if app.state.is_deleted() => Err(Self::rejected(
                "not_found",
                AppError::NotFound(format!("application {id} was not found")),
            )),
            Some(app) if app.state == crate::model::LifecycleState::Inactive => {
                Err(Self::rejected(
                    "invalid_parent",
                    AppError::InvalidParent(format!("application {id} is inactive")),
                ))
            }
            Some(app) => Ok(app),
        }
    }

    /// Fetch an application for direct mutation: exists and not deleted.
    async fn require_application(&self, id: Uuid) -> Result<Application> {
        self.store
            .application_by_id(id)
            .await?
            .filter(|app| !app.state.is_deleted())
            .ok_or_else(|| {
                Self::rejected(
                    "not_found",
                    AppError::NotFound(format!("application {id} was not found")),
                )
            })
    }

    /// Fetch an event that exists and is not deleted.
    async fn require_event(&self, id: Uuid) -> Result<Event> {
        self.store
            .event_by_id(id)
            .await?
            .filter(|event| !event.state.is_deleted())
            .ok_or_else(|| {
                Self::rejected(
                    "not_found",
                    AppError::NotFound(format!("event {id} was not found")),
                )
            })
    }

    /// Fetch a notification that exists and is not deleted.
    async fn require_notification(&self, id: Uuid) -> Result<Notification> {
        self.store
            .notification_by_id(id)
            .await?
            .filter(|notification| !notification.state.is_deleted())
            .ok_or_else(|| {
                Self::rejected(
                    "not_found",
                    AppError::NotFound(format!("notification {id} was not found")),
                )
            })
    }

    fn name_conflict(entity: &str, name: &str) -> AppError {
        Self::rejected(
            "conflict",
            AppError::Conflict(format!("{entity} named '{name}' already exists")),
        )
    }
}
