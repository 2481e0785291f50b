//! Registration and token issuance endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::error::Result;
use crate::model::{LoginRequest, RegisterRequest, User};
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/auth/register - Create an account
#[tracing::instrument(name = "http.register", skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = state.catalog.register_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/auth/login - Verify credentials and issue a bearer token
#[tracing::instrument(name = "http.login", skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let user = state.catalog.authenticate_user(request).await?;
    let token = state.jwt.issue(user.id)?;
    Ok(Json(TokenResponse { token }))
}
