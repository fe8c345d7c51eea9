use std::sync::Arc;

use api::{ApiClient, MemoryToken};
use pretty_assertions::assert_eq;
use shared_types::{AppError, AppErrorKind};

use crate::common::{dead_base_url, spawn_backend, PASSWORD};

#[tokio::test]
async fn summary_decodes_on_success() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("admin@school.test").await;

    let summary = client.institute_summary("i1").await.unwrap();
    assert_eq!(summary.students, 412);
    assert_eq!(summary.attendance_rate, Some(93.4));
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_error() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("admin@school.test").await;

    let err = client.institute_summary("garbled").await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Decode);
    assert_eq!(err.friendly_message(), "Something went wrong. Please try again.");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let client = ApiClient::new(dead_base_url().await, Arc::new(MemoryToken::new()));

    let err = client.login("student@school.test", PASSWORD).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Network);
    assert!(err.is_retryable());
    assert!(!client.has_token());
}

#[tokio::test]
async fn unknown_route_maps_to_not_found() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("student@school.test").await;

    let err = client
        .list_course_lectures("public", "c1", None, client.first_page())
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "Not found");
}

#[test]
fn status_codes_map_to_kinds() {
    let cases = [
        (400, AppErrorKind::BadRequest),
        (401, AppErrorKind::Unauthorized),
        (403, AppErrorKind::Forbidden),
        (404, AppErrorKind::NotFound),
        (409, AppErrorKind::Conflict),
        (422, AppErrorKind::ValidationError),
        (429, AppErrorKind::RateLimited),
        (500, AppErrorKind::InternalError),
        (503, AppErrorKind::InternalError),
    ];
    for (status, kind) in cases {
        assert_eq!(AppError::from_status(status, "").kind, kind, "{status}");
    }
}

#[test]
fn error_field_is_used_when_message_is_missing() {
    let err = AppError::from_status(409, r#"{"error":"Already marked for today"}"#);
    assert_eq!(err.kind, AppErrorKind::Conflict);
    assert_eq!(err.message, "Already marked for today");
}
