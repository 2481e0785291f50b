use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use super::AppState;
use crate::error::AppError;

/// Extract bearer token from Authorization header
fn extract_bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Bearer-token middleware gating every mutating route.
///
/// Validates the token and stashes the claims in request extensions for
/// handlers that care about the caller identity.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&req)
        .ok_or_else(|| AppError::Auth("Missing bearer token".to_string()))?;

    let claims = state.jwt.validate(token)?;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
