//! Message endpoints. Create renders a notification's template with the
//! supplied metadata; there is no update or delete.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{CreateMessageRequest, Message};
use crate::server::AppState;
use crate::store::{MessageFilter, Page, PageRequest};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListMessagesQuery {
    pub notification_id: Uuid,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub email: Option<String>,
    pub contents: Option<String>,
}

/// GET /api/messages?notificationId=... - List rendered messages
#[tracing::instrument(name = "http.list_messages", skip(state))]
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<ListMessagesQuery>,
) -> Result<Json<Page<Message>>> {
    let filter = MessageFilter {
        email: query.email,
        contents: query.contents,
    };
    let page = state
        .catalog
        .list_messages(
            query.notification_id,
            filter,
            PageRequest::new(query.page, query.page_size),
        )
        .await?;

    Ok(Json(page))
}

/// POST /api/messages - Render and persist a message
#[tracing::instrument(
    name = "http.create_message",
    skip(state, request),
    fields(notification_id = %request.notification_id)
)]
pub async fn create_message(
    State(state): State<AppState>,
    Json(request): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<Message>)> {
    let message = state.catalog.create_message(request).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
