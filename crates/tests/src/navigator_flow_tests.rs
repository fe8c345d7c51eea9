//! Whole sessions driven through the navigator with data fetched from the
//! backend, the way the app shell feeds it.

use pretty_assertions::assert_eq;
use shared_types::navigator::{menu_pages, page_table, resolve};
use shared_types::{
    NavEvent, NavState, Navigator, Page, Prerequisite, Role, Screen, Selection, SelectionError,
    ALL_PAGES, ALL_ROLES,
};

use crate::common::spawn_backend;

fn navigate(nav: &mut Navigator, page: Page) -> NavState {
    nav.apply(NavEvent::Navigate(page.id().to_string())).unwrap()
}

#[tokio::test]
async fn teacher_picks_institute_then_class_before_marking_attendance() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;
    let user = client.current_user().await.unwrap();
    assert_eq!(user.role, Role::Teacher);

    let mut nav = Navigator::new(user.role, Selection::new());
    assert_eq!(nav.state(), NavState::NoInstitute);
    assert_eq!(navigate(&mut nav, Page::AttendanceMarking), NavState::NoInstitute);

    let institutes = client.list_institutes(client.first_page()).await.unwrap();
    let first = institutes.data[0].clone();
    assert_eq!(
        nav.apply(NavEvent::SelectInstitute(first.clone())).unwrap(),
        NavState::NoClass
    );
    assert_eq!(nav.screen(), Screen::ClassSelector);

    let classes = client.list_classes(&first.id, client.first_page()).await.unwrap();
    let state = nav
        .apply(NavEvent::SelectClass(classes.data[0].clone()))
        .unwrap();
    assert_eq!(state, NavState::Ready(Page::AttendanceMarking));
    assert_eq!(nav.selection().breadcrumb(), "Institute 1 › 7A");
}

#[tokio::test]
async fn teacher_lectures_wait_for_a_subject() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;

    let mut nav = Navigator::new(Role::Teacher, Selection::new());
    let institute = client.list_institutes(client.first_page()).await.unwrap().data[0].clone();
    nav.apply(NavEvent::SelectInstitute(institute.clone())).unwrap();
    let class = client.list_classes(&institute.id, client.first_page()).await.unwrap().data[0].clone();
    nav.apply(NavEvent::SelectClass(class.clone())).unwrap();

    assert_eq!(navigate(&mut nav, Page::Lectures), NavState::NoSubject);

    let subjects = client
        .list_subjects(&institute.id, &class.id, client.first_page())
        .await
        .unwrap();
    assert_eq!(subjects.data.len(), 2);
    let state = nav
        .apply(NavEvent::SelectSubject(subjects.data[0].clone()))
        .unwrap();
    assert_eq!(state, NavState::Ready(Page::Lectures));
}

#[tokio::test]
async fn parent_picks_child_then_institute() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("parent@school.test").await;

    let mut nav = Navigator::new(Role::Parent, Selection::new());
    assert_eq!(nav.screen(), Screen::ChildSelector);

    let children = client.list_children().await.unwrap();
    let kim = children.data[0].clone();
    assert_eq!(
        nav.apply(NavEvent::SelectChild(kim.clone())).unwrap(),
        NavState::NoInstitute
    );

    let institutes = client
        .child_institutes(&kim.id, client.first_page())
        .await
        .unwrap();
    assert_eq!(institutes.data[0].id, "i-k1");
    let state = nav
        .apply(NavEvent::SelectInstitute(institutes.data[0].clone()))
        .unwrap();
    assert_eq!(state, NavState::Ready(Page::Dashboard));

    // Switching children drops the institute picked for the previous one.
    let lee = children.data[1].clone();
    assert_eq!(
        nav.apply(NavEvent::SelectChild(lee)).unwrap(),
        NavState::NoInstitute
    );
}

#[tokio::test]
async fn change_selection_drops_the_level_and_below() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("admin@school.test").await;

    let mut nav = Navigator::new(Role::InstituteAdmin, Selection::new());
    let institute = client.list_institutes(client.first_page()).await.unwrap().data[0].clone();
    nav.apply(NavEvent::SelectInstitute(institute.clone())).unwrap();
    let class = client.list_classes(&institute.id, client.first_page()).await.unwrap().data[0].clone();
    nav.apply(NavEvent::SelectClass(class)).unwrap();
    navigate(&mut nav, Page::Students);
    assert_eq!(nav.state(), NavState::Ready(Page::Students));

    let state = nav
        .apply(NavEvent::ChangeSelection(Prerequisite::Class))
        .unwrap();
    assert_eq!(state, NavState::NoClass);
    assert!(nav.selection().has(Prerequisite::Institute));

    let state = nav
        .apply(NavEvent::ChangeSelection(Prerequisite::Institute))
        .unwrap();
    assert_eq!(state, NavState::NoInstitute);
}

#[test]
fn class_before_institute_is_rejected_and_leaves_state_alone() {
    let mut nav = Navigator::new(Role::Teacher, Selection::new());
    let class = shared_types::Class {
        id: "c1".into(),
        name: "7A".into(),
        grade: None,
        section: None,
    };
    let before = nav.clone();
    assert_eq!(
        nav.apply(NavEvent::SelectClass(class)),
        Err(SelectionError::ClassWithoutInstitute)
    );
    assert_eq!(nav, before);
}

#[test]
fn logout_resets_to_an_empty_dashboard_request() {
    let mut nav = Navigator::new(Role::Student, Selection::new());
    nav.apply(NavEvent::SelectInstitute(shared_types::Institute {
        id: "i1".into(),
        name: "North High".into(),
        code: None,
        logo_url: None,
    }))
    .unwrap();
    navigate(&mut nav, Page::Results);
    assert_eq!(nav.state(), NavState::Ready(Page::Results));

    assert_eq!(nav.apply(NavEvent::Logout).unwrap(), NavState::NoInstitute);
    assert_eq!(nav.requested(), Page::Dashboard.id());
    assert_eq!(nav.selection(), &Selection::new());
}

#[test]
fn unknown_and_foreign_pages_fall_back_to_the_dashboard() {
    let mut selection = Selection::new();
    selection.select_institute(shared_types::Institute {
        id: "I1".into(),
        name: "North High".into(),
        code: None,
        logo_url: None,
    });
    assert_eq!(
        resolve(Role::Student, "no-such-page", &selection),
        Screen::Page(Page::Dashboard)
    );
    // Grading is not in the student table.
    assert_eq!(
        resolve(Role::Student, Page::Grading.id(), &selection),
        Screen::Page(Page::Dashboard)
    );
}

#[test]
fn resolution_is_total_over_roles_pages_and_selections() {
    let mut full = Selection::new();
    full.select_child(shared_types::Child {
        id: "k1".into(),
        name: "Kim".into(),
        grade: None,
    });
    full.select_institute(shared_types::Institute {
        id: "i1".into(),
        name: "North High".into(),
        code: None,
        logo_url: None,
    });
    full.select_class(shared_types::Class {
        id: "c1".into(),
        name: "7A".into(),
        grade: None,
        section: None,
    })
    .unwrap();
    full.select_subject(shared_types::Subject {
        id: "s1".into(),
        name: "Maths".into(),
        code: None,
    })
    .unwrap();
    full.select_organization(shared_types::Organization {
        id: "o1".into(),
        name: "Chess Club".into(),
        description: None,
        is_public: true,
    });

    for role in ALL_ROLES {
        for page in ALL_PAGES {
            // With everything selected, every page in the table is reachable.
            let mut nav = Navigator::new(*role, full.clone());
            let reached = navigate(&mut nav, *page);
            if page_table(*role).iter().any(|r| r.page == *page) {
                assert_eq!(reached, NavState::Ready(*page), "{role} {page:?}");
            } else {
                assert_eq!(reached, NavState::Ready(Page::Dashboard), "{role} {page:?}");
            }

            // With nothing selected, a blocked state always names a
            // prerequisite the page actually needs.
            let empty = shared_types::navigator::resolve_state(*role, page.id(), &Selection::new());
            if let Some(missing) = empty.missing() {
                let rule = shared_types::navigator::rule_for(*role, *page)
                    .or_else(|| shared_types::navigator::rule_for(*role, Page::Dashboard))
                    .unwrap();
                assert!(rule.requires.contains(&missing), "{role} {page:?}");
            }
        }
    }
}

#[test]
fn menus_only_list_pages_the_role_can_reach() {
    for role in ALL_ROLES {
        for page in menu_pages(*role, |_| true) {
            assert!(page_table(*role).iter().any(|r| r.page == page));
            assert!(!matches!(
                page,
                Page::SelectInstitute | Page::SelectClass | Page::SelectSubject | Page::SelectChild
            ));
        }
    }
}
