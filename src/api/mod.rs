//! HTTP endpoints.

pub mod applications;
pub mod auth;
pub mod events;
pub mod health;
pub mod messages;
pub mod metrics;
pub mod notifications;
pub mod tags;

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};

use crate::server::{require_auth, AppState};

/// Assemble all API routes. Reads, health and token issuance are open;
/// every mutation sits behind the bearer-token middleware.
pub fn api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/applications", get(applications::list_applications))
        .route("/events", get(events::list_events))
        .route("/notifications", get(notifications::list_notifications))
        .route("/messages", get(messages::list_messages))
        .route("/tags", get(tags::list_tags))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    let protected = Router::new()
        .route("/applications", post(applications::create_application))
        .route(
            "/applications/{app_id}/update",
            put(applications::update_application),
        )
        .route(
            "/applications/{app_id}/delete",
            patch(applications::delete_application),
        )
        .route(
            "/applications/{app_id}/deactivate",
            patch(applications::toggle_application),
        )
        .route("/events", post(events::create_event))
        .route("/events/{event_id}/update", put(events::update_event))
        .route("/events/{event_id}/delete", patch(events::delete_event))
        .route(
            "/events/{event_id}/deactivate",
            patch(events::toggle_event),
        )
        .route("/notifications", post(notifications::create_notification))
        .route(
            "/notifications/{notification_id}/update",
            put(notifications::update_notification),
        )
        .route(
            "/notifications/{notification_id}/delete",
            patch(notifications::delete_notification),
        )
        .route(
            "/notifications/{notification_id}/deactivate",
            patch(notifications::toggle_notification),
        )
        .route("/messages", post(messages::create_message))
        .layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        // Health & Metrics
        .route("/health", get(health::health))
        .route("/metrics", get(metrics::prometheus_metrics))
        // Entity endpoints
        .nest("/api", public.merge(protected))
}
