//! End-to-end tests of the catalog service over the in-memory store.
//!
//! These exercise the integrity rules and the render pipeline the way the
//! HTTP layer drives them, without server startup.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use herald_template_service::error::AppError;
use herald_template_service::metrics::INTEGRITY_REJECTIONS_TOTAL;
use herald_template_service::model::{
    CreateApplicationRequest, CreateEventRequest, CreateMessageRequest,
    CreateNotificationRequest, LifecycleState, LoginRequest, RegisterRequest,
    UpdateNotificationRequest,
};
use herald_template_service::service::CatalogService;
use herald_template_service::store::{
    ApplicationFilter, ApplicationSortKey, EventFilter, MemoryStore, PageRequest, SortOrder,
};
use herald_template_service::template::MetadataError;

fn create_service() -> CatalogService {
    CatalogService::new(Arc::new(MemoryStore::new()))
}

async fn create_application(service: &CatalogService, name: &str) -> uuid::Uuid {
    service
        .create_application(CreateApplicationRequest {
            name: name.to_string(),
            description: "test application".to_string(),
        })
        .await
        .unwrap()
        .id
}

async fn create_event(service: &CatalogService, application_id: uuid::Uuid, name: &str) -> uuid::Uuid {
    service
        .create_event(CreateEventRequest {
            application_id,
            name: name.to_string(),
            description: "test event".to_string(),
        })
        .await
        .unwrap()
        .id
}

async fn create_notification(
    service: &CatalogService,
    event_id: uuid::Uuid,
    name: &str,
    body: &str,
) -> uuid::Uuid {
    service
        .create_notification(CreateNotificationRequest {
            event_id,
            name: name.to_string(),
            description: "test notification".to_string(),
            template_subject: "Subject line".to_string(),
            template_body: body.to_string(),
        })
        .await
        .unwrap()
        .id
}

fn metadata(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_event_names_scoped_per_application() {
    let service = create_service();
    let app_a = create_application(&service, "app-alpha").await;
    let app_b = create_application(&service, "app-beta").await;

    // Same event name under different applications is fine.
    create_event(&service, app_a, "Launch").await;
    create_event(&service, app_b, "Launch").await;

    // A second "Launch" under the same application conflicts.
    let err = service
        .create_event(CreateEventRequest {
            application_id: app_a,
            name: "Launch".to_string(),
            description: "duplicate".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_application_name_unique_globally() {
    let service = create_service();
    create_application(&service, "orders").await;

    let err = service
        .create_application(CreateApplicationRequest {
            name: "orders".to_string(),
            description: "duplicate app".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_deleted_name_can_be_reused() {
    let service = create_service();
    let id = create_application(&service, "orders").await;
    service.delete_application(id).await.unwrap();

    // Uniqueness only counts non-deleted siblings.
    create_application(&service, "orders").await;
}

#[tokio::test]
async fn test_deleted_application_blocks_event_creation() {
    let service = create_service();
    let app = create_application(&service, "doomed").await;
    service.delete_application(app).await.unwrap();

    let err = service
        .create_event(CreateEventRequest {
            application_id: app,
            name: "Launch".to_string(),
            description: "should fail".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_inactive_application_blocks_event_creation() {
    let service = create_service();
    let app = create_application(&service, "paused").await;
    service.toggle_application(app).await.unwrap();

    let err = service
        .create_event(CreateEventRequest {
            application_id: app,
            name: "Launch".to_string(),
            description: "should fail".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidParent(_)));
}

#[tokio::test]
async fn test_toggle_twice_returns_to_active_and_restamps() {
    let service = create_service();
    let app = create_application(&service, "toggled").await;
    let event_id = create_event(&service, app, "Launch").await;

    tokio::time::sleep(Duration::from_millis(2)).await;
    let once = service.toggle_event(event_id).await.unwrap();
    assert_eq!(once.state, LifecycleState::Inactive);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let twice = service.toggle_event(event_id).await.unwrap();
    assert_eq!(twice.state, LifecycleState::Active);
    assert!(twice.updated_at > once.updated_at);
}

#[tokio::test]
async fn test_toggle_rejected_after_delete() {
    let service = create_service();
    let app = create_application(&service, "final").await;
    service.delete_application(app).await.unwrap();

    let err = service.toggle_application(app).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let service = create_service();
    let app = create_application(&service, "twice-deleted").await;

    let first = service.delete_application(app).await.unwrap();
    assert_eq!(first.state, LifecycleState::Deleted);

    let second = service.delete_application(app).await.unwrap();
    assert_eq!(second.state, LifecycleState::Deleted);
}

#[tokio::test]
async fn test_event_delete_checks_association() {
    let service = create_service();
    let app_a = create_application(&service, "owner").await;
    let app_b = create_application(&service, "other").await;
    let event = create_event(&service, app_a, "Launch").await;

    let err = service.delete_event(app_b, event).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    service.delete_event(app_a, event).await.unwrap();
}

#[tokio::test]
async fn test_notification_placeholders_extracted_on_create() {
    let service = create_service();
    let app = create_application(&service, "greetings").await;
    let event = create_event(&service, app, "signup").await;

    let notification = service
        .create_notification(CreateNotificationRequest {
            event_id: event,
            name: "welcome".to_string(),
            description: "welcome mail".to_string(),
            template_subject: "Welcome aboard".to_string(),
            template_body: "Hi {name}, you are {age} years old".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(notification.placeholders, vec!["name", "age"]);
}

#[tokio::test]
async fn test_notification_update_recomputes_placeholders() {
    let service = create_service();
    let app = create_application(&service, "greetings").await;
    let event = create_event(&service, app, "signup").await;
    let id = create_notification(&service, event, "welcome", "Hi {name}, welcome!").await;

    let updated = service
        .update_notification(
            id,
            UpdateNotificationRequest {
                name: None,
                description: None,
                template_subject: None,
                template_body: Some("Dear {title} {surname}, hello".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.placeholders, vec!["title", "surname"]);
}

#[tokio::test]
async fn test_message_render_pipeline() {
    let service = create_service();
    let app = create_application(&service, "greetings").await;
    let event = create_event(&service, app, "signup").await;
    let notification =
        create_notification(&service, event, "welcome", "Hi {name}, you are {age}").await;

    let message = service
        .create_message(CreateMessageRequest {
            notification_id: notification,
            email: "al@example.com".to_string(),
            metadata: metadata(&[("name", "Al"), ("age", "9")]),
        })
        .await
        .unwrap();

    assert_eq!(message.contents, "Hi Al, you are 9");
    assert_eq!(message.email, "al@example.com");

    let page = service
        .list_messages(
            notification,
            Default::default(),
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(page.total_items, 1);
}

#[tokio::test]
async fn test_message_metadata_count_mismatch() {
    let service = create_service();
    let app = create_application(&service, "greetings").await;
    let event = create_event(&service, app, "signup").await;
    let notification =
        create_notification(&service, event, "welcome", "Hi {name}, you are {age}").await;

    let err = service
        .create_message(CreateMessageRequest {
            notification_id: notification,
            email: "al@example.com".to_string(),
            metadata: metadata(&[("name", "Al")]),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Metadata(MetadataError::CountMismatch {
            expected: 2,
            supplied: 1
        })
    ));
}

#[tokio::test]
async fn test_message_metadata_unknown_key() {
    let service = create_service();
    let app = create_application(&service, "greetings").await;
    let event = create_event(&service, app, "signup").await;
    let notification =
        create_notification(&service, event, "welcome", "Hi {name}, you are {age}").await;

    let err = service
        .create_message(CreateMessageRequest {
            notification_id: notification,
            email: "al@example.com".to_string(),
            metadata: metadata(&[("name", "Al"), ("city", "Oslo")]),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Metadata(MetadataError::UnknownKey(_))
    ));
}

#[tokio::test]
async fn test_message_against_deleted_notification_rejected() {
    let service = create_service();
    let app = create_application(&service, "greetings").await;
    let event = create_event(&service, app, "signup").await;
    let notification =
        create_notification(&service, event, "welcome", "Hi {name}, welcome!").await;
    service.delete_notification(notification).await.unwrap();

    let err = service
        .create_message(CreateMessageRequest {
            notification_id: notification,
            email: "al@example.com".to_string(),
            metadata: metadata(&[("name", "Al")]),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_tags_deduplicated_across_notifications() {
    let service = create_service();
    let app = create_application(&service, "greetings").await;
    let event = create_event(&service, app, "signup").await;

    create_notification(&service, event, "first", "Hi {name}, welcome to {place}").await;
    create_notification(&service, event, "second", "Bye {name}, leaving {place} now").await;

    let tags = service.list_tags().await.unwrap();
    assert_eq!(tags, vec!["name", "place"]);
}

#[tokio::test]
async fn test_pagination_math_across_pages() {
    let service = create_service();
    let app = create_application(&service, "paged").await;
    for i in 0..15 {
        create_event(&service, app, &format!("event-{i:02}")).await;
    }

    let page = service
        .list_events(app, EventFilter::default(), PageRequest::new(Some(2), Some(5)))
        .await
        .unwrap();

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.items[0].name, "event-05");
    assert_eq!(page.items[4].name, "event-09");
    assert_eq!(page.current_page, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_items, 15);
}

#[tokio::test]
async fn test_deleted_applications_excluded_from_listing() {
    let service = create_service();
    create_application(&service, "kept").await;
    let gone = create_application(&service, "gone").await;
    service.delete_application(gone).await.unwrap();

    let page = service
        .list_applications(
            ApplicationFilter::default(),
            ApplicationSortKey::Name,
            SortOrder::Asc,
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, "kept");
}

#[tokio::test]
async fn test_failed_delete_counts_as_rejection() {
    let service = create_service();
    let app = create_application(&service, "owner").await;
    let other = create_application(&service, "bystander").await;
    let event = create_event(&service, app, "Launch").await;

    let counter = INTEGRITY_REJECTIONS_TOTAL.with_label_values(&["not_found"]);
    let before = counter.get();

    // Missing record and association mismatch each count one rejection.
    service
        .delete_application(uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    service.delete_event(other, event).await.unwrap_err();

    // Other tests may bump the shared counter concurrently.
    assert!(counter.get() >= before + 2);
}

#[tokio::test]
async fn test_deleted_state_filter_yields_empty_page() {
    let service = create_service();
    create_application(&service, "alive").await;
    let gone = create_application(&service, "gone").await;
    service.delete_application(gone).await.unwrap();

    // Deleted records are never listed; filtering for them must return an
    // empty page, not fall back to the unfiltered listing.
    let page = service
        .list_applications(
            ApplicationFilter {
                name: None,
                state: Some(LifecycleState::Deleted),
            },
            ApplicationSortKey::Name,
            SortOrder::Asc,
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 0);
}

#[tokio::test]
async fn test_register_and_login() {
    let service = create_service();

    service
        .register_user(RegisterRequest {
            email: "admin@example.com".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap();

    // Duplicate registration conflicts.
    let err = service
        .register_user(RegisterRequest {
            email: "admin@example.com".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Correct password authenticates, wrong one does not.
    service
        .authenticate_user(LoginRequest {
            email: "admin@example.com".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap();

    let err = service
        .authenticate_user(LoginRequest {
            email: "admin@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Auth(_)));
}
