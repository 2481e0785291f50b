//! Application CRUD endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{
    Application, CreateApplicationRequest, LifecycleState, UpdateApplicationRequest,
};
use crate::server::AppState;
use crate::store::{ApplicationFilter, ApplicationSortKey, Page, PageRequest, SortOrder};

/// Allow-listed query parameters; anything else is rejected upfront.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListApplicationsQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    #[serde(default)]
    pub sort_by: ApplicationSortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
    pub name: Option<String>,
    pub state: Option<LifecycleState>,
}

/// GET /api/applications - List applications
#[tracing::instrument(name = "http.list_applications", skip(state))]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<Json<Page<Application>>> {
    let filter = ApplicationFilter {
        name: query.name,
        state: query.state,
    };
    let page = state
        .catalog
        .list_applications(
            filter,
            query.sort_by,
            query.sort_order,
            PageRequest::new(query.page, query.page_size),
        )
        .await?;

    Ok(Json(page))
}

/// POST /api/applications - Create an application
#[tracing::instrument(name = "http.create_application", skip(state, request))]
pub async fn create_application(
    State(state): State<AppState>,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<Application>)> {
    let application = state.catalog.create_application(request).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// PUT /api/applications/:app_id/update - Rename or re-describe
#[tracing::instrument(name = "http.update_application", skip(state, request))]
pub async fn update_application(
    State(state): State<AppState>,
    Path(app_id): Path<Uuid>,
    Json(request): Json<UpdateApplicationRequest>,
) -> Result<Json<Application>> {
    let application = state.catalog.update_application(app_id, request).await?;
    Ok(Json(application))
}

/// PATCH /api/applications/:app_id/delete - Soft delete
#[tracing::instrument(name = "http.delete_application", skip(state))]
pub async fn delete_application(
    State(state): State<AppState>,
    Path(app_id): Path<Uuid>,
) -> Result<Json<Application>> {
    let application = state.catalog.delete_application(app_id).await?;
    Ok(Json(application))
}

/// PATCH /api/applications/:app_id/deactivate - Toggle active state
#[tracing::instrument(name = "http.toggle_application", skip(state))]
pub async fn toggle_application(
    State(state): State<AppState>,
    Path(app_id): Path<Uuid>,
) -> Result<Json<Application>> {
    let application = state.catalog.toggle_application(app_id).await?;
    Ok(Json(application))
}
