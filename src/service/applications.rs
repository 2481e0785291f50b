//! Application operations.

use uuid::Uuid;

use crate::error::Result;
use crate::metrics::ENTITIES_CREATED_TOTAL;
use crate::model::{Application, CreateApplicationRequest, LifecycleState, UpdateApplicationRequest};
use crate::store::{ApplicationFilter, ApplicationSortKey, Page, PageRequest, SortOrder};

use super::CatalogService;

impl CatalogService {
    pub async fn create_application(&self, req: CreateApplicationRequest) -> Result<Application> {
        req.validate()?;

        if self
            .store
            .application_by_name(&req.name, None)
            .await?
            .is_some()
        {
            return Err(Self::name_conflict("application", &req.name));
        }

        let application = self
            .store
            .insert_application(Application::new(req.name, req.description))
            .await?;

        ENTITIES_CREATED_TOTAL
            .with_label_values(&["application"])
            .inc();
        tracing::info!(application_id = %application.id, name = %application.name, "Application created");

        Ok(application)
    }

    pub async fn list_applications(
        &self,
        filter: ApplicationFilter,
        sort_key: ApplicationSortKey,
        sort_order: SortOrder,
        page: PageRequest,
    ) -> Result<Page<Application>> {
        Ok(self
            .store
            .list_applications(&filter, sort_key, sort_order, page)
            .await?)
    }

    pub async fn update_application(
        &self,
        id: Uuid,
        req: UpdateApplicationRequest,
    ) -> Result<Application> {
        req.validate()?;

        let mut application = self.require_application(id).await?;

        if let Some(name) = &req.name {
            if self
                .store
                .application_by_name(name, Some(id))
                .await?
                .is_some()
            {
                return Err(Self::name_conflict("application", name));
            }
            application.name = name.clone();
        }
        if let Some(description) = req.description {
            application.description = description;
        }
        application.touch();

        self.store.update_application(&application).await?;
        tracing::info!(application_id = %application.id, "Application updated");

        Ok(application)
    }

    /// Idempotent soft delete. Never physically removes the record; a
    /// second delete re-stamps `updated_at` and leaves the state Deleted.
    pub async fn delete_application(&self, id: Uuid) -> Result<Application> {
        let mut application = self
            .store
            .application_by_id(id)
            .await?
            .ok_or_else(|| {
                Self::rejected(
                    "not_found",
                    crate::error::AppError::NotFound(format!("application {id} was not found")),
                )
            })?;

        application.state = LifecycleState::Deleted;
        application.touch();

        self.store.update_application(&application).await?;
        tracing::info!(application_id = %application.id, "Application soft-deleted");

        Ok(application)
    }

    /// Toggle Active <-> Inactive. Rejected once deleted.
    pub async fn toggle_application(&self, id: Uuid) -> Result<Application> {
        let mut application = self.require_application(id).await?;

        application.state = application.state.toggled();
        application.touch();

        self.store.update_application(&application).await?;
        tracing::info!(
            application_id = %application.id,
            state = ?application.state,
            "Application toggled"
        );

        Ok(application)
    }
}
