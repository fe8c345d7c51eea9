use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, Role};

use crate::common::{spawn_backend, PASSWORD};

#[tokio::test]
async fn login_stores_token_and_normalizes_role() {
    let backend = spawn_backend().await;
    let client = backend.client();

    let user = client.login("  teacher@school.test ", PASSWORD).await.unwrap();
    assert_eq!(user.role, Role::Teacher);
    assert_eq!(user.name, "Tess Teacher");
    assert_eq!(user.institutes.len(), 1);
    assert_eq!(client.token().as_deref(), Some("tok-u-teacher"));
}

#[tokio::test]
async fn snake_case_roles_are_accepted() {
    let backend = spawn_backend().await;
    let user = backend
        .client()
        .login("admin@school.test", PASSWORD)
        .await
        .unwrap();
    assert_eq!(user.role, Role::InstituteAdmin);
}

#[tokio::test]
async fn wrong_password_is_unauthorized_with_backend_message() {
    let backend = spawn_backend().await;
    let client = backend.client();

    let err = client.login("student@school.test", "nope").await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(err.message, "Invalid email or password");
    assert!(err.is_auth_failure());
    assert!(!client.has_token());
}

#[tokio::test]
async fn unsupported_role_is_forbidden_and_leaves_no_token() {
    let backend = spawn_backend().await;
    let client = backend.client();

    let err = client.login("janitor@school.test", PASSWORD).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Forbidden);
    assert!(err.message.contains("Janitor"));
    assert!(!client.has_token());
}

#[tokio::test]
async fn current_user_restores_the_session() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("parent@school.test").await;

    let user = client.current_user().await.unwrap();
    assert_eq!(user.id, "u-parent");
    assert_eq!(user.role, Role::Parent);
}

#[tokio::test]
async fn current_user_without_token_skips_the_network() {
    let backend = spawn_backend().await;
    let err = backend.client().current_user().await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert!(!backend.recorded.hits().iter().any(|h| h == "me"));
}

#[tokio::test]
async fn logout_forgets_the_token() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("student@school.test").await;
    assert!(client.has_token());

    client.logout();
    assert!(!client.has_token());
    let err = client.current_user().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Unauthorized);
}
