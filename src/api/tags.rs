//! Tag registry endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::Result;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct TagListResponse {
    pub tags: Vec<String>,
}

/// GET /api/tags - List every registered placeholder name
#[tracing::instrument(name = "http.list_tags", skip(state))]
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<TagListResponse>> {
    let tags = state.catalog.list_tags().await?;
    Ok(Json(TagListResponse { tags }))
}
