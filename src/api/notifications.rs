//! Notification CRUD endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{CreateNotificationRequest, Notification, UpdateNotificationRequest};
use crate::server::AppState;
use crate::store::{NotificationSortKey, Page, PageRequest, SortOrder};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListNotificationsQuery {
    pub event_id: Uuid,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    #[serde(default)]
    pub sort_by: NotificationSortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
}

/// GET /api/notifications?eventId=... - List an event's notifications
#[tracing::instrument(name = "http.list_notifications", skip(state))]
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<Page<Notification>>> {
    let page = state
        .catalog
        .list_notifications(
            query.event_id,
            query.sort_by,
            query.sort_order,
            PageRequest::new(query.page, query.page_size),
        )
        .await?;

    Ok(Json(page))
}

/// POST /api/notifications - Create a notification under an event
#[tracing::instrument(name = "http.create_notification", skip(state, request))]
pub async fn create_notification(
    State(state): State<AppState>,
    Json(request): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<Notification>)> {
    let notification = state.catalog.create_notification(request).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// PUT /api/notifications/:notification_id/update - Update, re-extracting
/// placeholders when the template body changes
#[tracing::instrument(name = "http.update_notification", skip(state, request))]
pub async fn update_notification(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
    Json(request): Json<UpdateNotificationRequest>,
) -> Result<Json<Notification>> {
    let notification = state
        .catalog
        .update_notification(notification_id, request)
        .await?;
    Ok(Json(notification))
}

/// PATCH /api/notifications/:notification_id/delete - Soft delete
#[tracing::instrument(name = "http.delete_notification", skip(state))]
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<Notification>> {
    let notification = state.catalog.delete_notification(notification_id).await?;
    Ok(Json(notification))
}

/// PATCH /api/notifications/:notification_id/deactivate - Toggle active state
#[tracing::instrument(name = "http.toggle_notification", skip(state))]
pub async fn toggle_notification(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<Notification>> {
    let notification = state.catalog.toggle_notification(notification_id).await?;
    Ok(Json(notification))
}
