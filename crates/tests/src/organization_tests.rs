use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, OrgBack, OrgNav, OrgView};

use crate::common::{spawn_backend, ENROLLMENT_KEY, ORG_TOKEN};

#[tokio::test]
async fn organizations_report_visibility() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("student@school.test").await;

    let orgs = client.list_organizations(client.first_page()).await.unwrap();
    let visibility: Vec<_> = orgs.data.iter().map(|o| (o.id.as_str(), o.is_public)).collect();
    assert_eq!(visibility, vec![("public", true), ("private", false)]);
}

#[tokio::test]
async fn public_courses_need_no_organization_login() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("student@school.test").await;

    let courses = client
        .list_courses("public", None, client.first_page())
        .await
        .unwrap();
    assert_eq!(courses.data[0].id, "public-course");
    assert_eq!(courses.data[0].lecture_count, 4);
}

#[tokio::test]
async fn private_courses_refuse_the_session_token() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("student@school.test").await;

    let err = client
        .list_courses("private", None, client.first_page())
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Unauthorized);
}

#[tokio::test]
async fn wrong_enrollment_key_is_forbidden() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("student@school.test").await;

    let err = client
        .organization_login("private", Some("guess"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Forbidden);
    assert_eq!(err.friendly_message(), "Invalid enrollment key");

    // A blank key is sent as no key at all.
    let err = client
        .organization_login("private", Some("   "))
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Forbidden);
}

#[tokio::test]
async fn enrollment_login_unlocks_courses_and_members() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("student@school.test").await;

    let login = client
        .organization_login("private", Some(&format!(" {ENROLLMENT_KEY} ")))
        .await
        .unwrap();
    assert_eq!(login.organization_id, "private");
    assert_eq!(login.token, ORG_TOKEN);
    assert!(login.can_manage());
    // The session token is untouched by an organization login.
    assert_eq!(client.token().as_deref(), Some("tok-u-student"));

    let courses = client
        .list_courses("private", Some(&login), client.first_page())
        .await
        .unwrap();
    assert_eq!(courses.data[0].id, "private-course");

    let members = client
        .list_members("private", Some(&login), client.first_page())
        .await
        .unwrap();
    let verified: Vec<_> = members.data.iter().map(|m| m.verified).collect();
    assert_eq!(verified, vec![true, false]);
}

#[tokio::test]
async fn organization_area_walks_back_out_after_login() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("student@school.test").await;
    let login = client
        .organization_login("private", Some(ENROLLMENT_KEY))
        .await
        .unwrap();

    let mut nav = OrgNav::new();
    nav.logged_in(login);
    assert_eq!(
        nav.view(),
        &OrgView::Organization {
            organization_id: "private".into()
        }
    );
    assert!(nav.open_course("private-course"));
    assert_eq!(nav.view().path(), "/course/private-course");
    assert!(nav.login().is_some());

    assert_eq!(
        nav.back(),
        OrgBack::To(OrgView::Organization {
            organization_id: "private".into()
        })
    );
    assert_eq!(nav.back(), OrgBack::To(OrgView::List));
    assert_eq!(nav.back(), OrgBack::Exit);
    assert!(nav.login().is_none());
}
