//! Notification operations, scoped to an owning event.
//!
//! `placeholders` is derived data: it is recomputed from the template body
//! on every create and on every update that changes the body. Each distinct
//! placeholder name is also registered in the global tag registry,
//! best-effort (a registry failure never fails the mutation).

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::error::Result;
use crate::metrics::{ENTITIES_CREATED_TOTAL, TAGS_REGISTERED_TOTAL};
use crate::model::{
    CreateNotificationRequest, LifecycleState, Notification, UpdateNotificationRequest,
};
use crate::store::{NotificationSortKey, Page, PageRequest, SortOrder};
use crate::template::extract_placeholders;

use super::CatalogService;

impl CatalogService {
    pub async fn create_notification(
        &self,
        req: CreateNotificationRequest,
    ) -> Result<Notification> {
        req.validate()?;

        let event = self.require_event(req.event_id).await?;

        if self
            .store
            .notification_by_name(event.id, &req.name, None)
            .await?
            .is_some()
        {
            return Err(Self::name_conflict("notification", &req.name));
        }

        let placeholders = extract_placeholders(&req.template_body);
        self.register_tags(&placeholders).await;

        let notification = self
            .store
            .insert_notification(Notification::new(
                req.name,
                req.description,
                event.id,
                req.template_subject,
                req.template_body,
                placeholders,
            ))
            .await?;

        ENTITIES_CREATED_TOTAL
            .with_label_values(&["notification"])
            .inc();
        tracing::info!(
            notification_id = %notification.id,
            event_id = %event.id,
            placeholder_count = notification.placeholders.len(),
            "Notification created"
        );

        Ok(notification)
    }

    pub async fn list_notifications(
        &self,
        event_id: Uuid,
        sort_key: NotificationSortKey,
        sort_order: SortOrder,
        page: PageRequest,
    ) -> Result<Page<Notification>> {
        self.require_event(event_id).await?;

        Ok(self
            .store
            .list_notifications(event_id, sort_key, sort_order, page)
            .await?)
    }

    pub async fn update_notification(
        &self,
        id: Uuid,
        req: UpdateNotificationRequest,
    ) -> Result<Notification> {
        req.validate()?;

        let mut notification = self.require_notification(id).await?;

        if let Some(name) = &req.name {
            if self
                .store
                .notification_by_name(notification.event_id, name, Some(id))
                .await?
                .is_some()
            {
                return Err(Self::name_conflict("notification", name));
            }
            notification.name = name.clone();
        }
        if let Some(description) = req.description {
            notification.description = description;
        }
        if let Some(subject) = req.template_subject {
            notification.template_subject = subject;
        }
        if let Some(body) = req.template_body {
            notification.placeholders = extract_placeholders(&body);
            self.register_tags(&notification.placeholders).await;
            notification.template_body = body;
        }
        notification.touch();

        self.store.update_notification(&notification).await?;
        tracing::info!(notification_id = %notification.id, "Notification updated");

        Ok(notification)
    }

    pub async fn delete_notification(&self, id: Uuid) -> Result<Notification> {
        let mut notification = self
            .store
            .notification_by_id(id)
            .await?
            .ok_or_else(|| {
                Self::rejected(
                    "not_found",
                    crate::error::AppError::NotFound(format!("notification {id} was not found")),
                )
            })?;

        notification.state = LifecycleState::Deleted;
        notification.touch();

        self.store.update_notification(&notification).await?;
        tracing::info!(notification_id = %notification.id, "Notification soft-deleted");

        Ok(notification)
    }

    /// Toggle Active <-> Inactive. Rejected once deleted.
    pub async fn toggle_notification(&self, id: Uuid) -> Result<Notification> {
        let mut notification = self.require_notification(id).await?;

        notification.state = notification.state.toggled();
        notification.touch();

        self.store.update_notification(&notification).await?;
        tracing::info!(
            notification_id = %notification.id,
            state = ?notification.state,
            "Notification toggled"
        );

        Ok(notification)
    }

    /// Register each distinct trimmed placeholder name in the tag registry.
    async fn register_tags(&self, placeholders: &[String]) {
        let names: BTreeSet<&str> = placeholders
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .collect();

        for name in names {
            match self.store.ensure_tag(name).await {
                Ok(_) => TAGS_REGISTERED_TOTAL.inc(),
                Err(e) => {
                    tracing::warn!(error = %e, tag = %name, "Failed to register placeholder tag");
                }
            }
        }
    }
}
