//! Event operations, scoped to an owning application.

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::metrics::ENTITIES_CREATED_TOTAL;
use crate::model::{CreateEventRequest, Event, LifecycleState, UpdateEventRequest};
use crate::store::{EventFilter, Page, PageRequest};

use super::CatalogService;

impl CatalogService {
    /// Create an event under an application. The application must exist,
    /// be active and not deleted; the event name must be unique among the
    /// application's non-deleted events.
    pub async fn create_event(&self, req: CreateEventRequest) -> Result<Event> {
        req.validate()?;

        let application = self.require_active_application(req.application_id).await?;

        if self
            .store
            .event_by_name(application.id, &req.name, None)
            .await?
            .is_some()
        {
            return Err(Self::name_conflict("event", &req.name));
        }

        let event = self
            .store
            .insert_event(Event::new(req.name, req.description, application.id))
            .await?;

        ENTITIES_CREATED_TOTAL.with_label_values(&["event"]).inc();
        tracing::info!(event_id = %event.id, application_id = %application.id, "Event created");

        Ok(event)
    }

    pub async fn list_events(
        &self,
        application_id: Uuid,
        filter: EventFilter,
        page: PageRequest,
    ) -> Result<Page<Event>> {
        self.require_active_application(application_id).await?;

        Ok(self.store.list_events(application_id, &filter, page).await?)
    }

    pub async fn update_event(&self, id: Uuid, req: UpdateEventRequest) -> Result<Event> {
        req.validate()?;

        let mut event = self.require_event(id).await?;

        if let Some(name) = &req.name {
            if self
                .store
                .event_by_name(event.application_id, name, Some(id))
                .await?
                .is_some()
            {
                return Err(Self::name_conflict("event", name));
            }
            event.name = name.clone();
        }
        if let Some(description) = req.description {
            event.description = description;
        }
        event.touch();

        self.store.update_event(&event).await?;
        tracing::info!(event_id = %event.id, "Event updated");

        Ok(event)
    }

    /// Soft-delete an event. The owning application is validated first, and
    /// the event must actually belong to it.
    pub async fn delete_event(&self, application_id: Uuid, id: Uuid) -> Result<Event> {
        self.require_active_application(application_id).await?;

        let mut event = self
            .store
            .event_by_id(id)
            .await?
            .ok_or_else(|| {
                Self::rejected(
                    "not_found",
                    AppError::NotFound(format!("event {id} was not found")),
                )
            })?;

        if event.application_id != application_id {
            return Err(Self::rejected(
                "not_found",
                AppError::NotFound(format!(
                    "event {id} is not associated with application {application_id}"
                )),
            ));
        }

        event.state = LifecycleState::Deleted;
        event.touch();

        self.store.update_event(&event).await?;
        tracing::info!(event_id = %event.id, "Event soft-deleted");

        Ok(event)
    }

    /// Toggle Active <-> Inactive. Rejected once deleted.
    pub async fn toggle_event(&self, id: Uuid) -> Result<Event> {
        let mut event = self.require_event(id).await?;

        event.state = event.state.toggled();
        event.touch();

        self.store.update_event(&event).await?;
        tracing::info!(event_id = %event.id, state = ?event.state, "Event toggled");

        Ok(event)
    }
}
