//! Event CRUD endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{CreateEventRequest, Event, UpdateEventRequest};
use crate::server::AppState;
use crate::store::{EventFilter, Page, PageRequest};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListEventsQuery {
    pub application_id: Uuid,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteEventQuery {
    pub application_id: Uuid,
}

/// GET /api/events?applicationId=... - List an application's events
#[tracing::instrument(name = "http.list_events", skip(state))]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Page<Event>>> {
    let filter = EventFilter {
        name: query.name,
        description: query.description,
    };
    let page = state
        .catalog
        .list_events(
            query.application_id,
            filter,
            PageRequest::new(query.page, query.page_size),
        )
        .await?;

    Ok(Json(page))
}

/// POST /api/events - Create an event under an application
#[tracing::instrument(name = "http.create_event", skip(state, request))]
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>)> {
    let event = state.catalog.create_event(request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/:event_id/update - Rename or re-describe
#[tracing::instrument(name = "http.update_event", skip(state, request))]
pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<Event>> {
    let event = state.catalog.update_event(event_id, request).await?;
    Ok(Json(event))
}

/// PATCH /api/events/:event_id/delete?applicationId=... - Soft delete
#[tracing::instrument(name = "http.delete_event", skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Query(query): Query<DeleteEventQuery>,
) -> Result<Json<Event>> {
    let event = state
        .catalog
        .delete_event(query.application_id, event_id)
        .await?;
    Ok(Json(event))
}

/// PATCH /api/events/:event_id/deactivate - Toggle active state
#[tracing::instrument(name = "http.toggle_event", skip(state))]
pub async fn toggle_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>> {
    let event = state.catalog.toggle_event(event_id).await?;
    Ok(Json(event))
}
