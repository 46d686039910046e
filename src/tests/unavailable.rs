use axum::http::StatusCode;
use uuid::Uuid;

use crate::setup_app;
use crate::storage::ConnectionHandle;
use crate::storage::Postgres;
use crate::tests::helper;

/// Storage that never got its connection
fn setup_unconnected_app() -> axum::Router {
    setup_app(Postgres::new(ConnectionHandle::new()))
}

#[tokio::test]
async fn test_storage_unavailable() {
    let mut app = setup_unconnected_app();

    let (status_code, _, error) = helper::list_notes(&mut app).await;
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status_code);
    assert_eq!(Some("Internal Server Error".to_string()), error);

    let (status_code, _, error) = helper::maybe_create_note(&mut app, "A", "B").await;
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status_code);
    assert_eq!(Some("Internal Server Error".to_string()), error);

    let id = Uuid::new_v4().to_string();

    let (status_code, _, error) = helper::single_note(&mut app, &id).await;
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status_code);
    assert_eq!(Some("Internal Server Error".to_string()), error);

    let (status_code, _, error) = helper::maybe_update_note(&mut app, &id, "A", "B").await;
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status_code);
    assert_eq!(Some("Internal Server Error".to_string()), error);

    let (status_code, _, error) = helper::maybe_delete_note(&mut app, &id).await;
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status_code);
    assert_eq!(Some("Internal Server Error".to_string()), error);
}

#[tokio::test]
async fn test_validation_before_storage() {
    let mut app = setup_unconnected_app();

    let (status_code, _, error) = helper::maybe_create_note(&mut app, "", "B").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Title and content are required.".to_string()), error);

    let long_title = "a".repeat(256);
    let (status_code, _, error) = helper::maybe_create_note(&mut app, &long_title, "B").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(
        Some("Title and content should be within specified length limits.".to_string()),
        error
    );
}
