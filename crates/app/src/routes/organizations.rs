//! Organization area: courses, course lectures and members of the selected
//! organization. Back navigation follows [`OrgNav`] rather than browser
//! history.

use dioxus::prelude::*;
use shared_types::{AppError, NavEvent, OrgBack, OrgNav, OrgView, Page, Prerequisite, Role};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardDescription,
    CardGrid, CardHeader, CardTitle, DataTable, DataTableCell, DataTableRow, EmptyState, Input,
    PageHeader, ToastOptions,
};

use crate::format_helpers::format_datetime;
use crate::list::{list_view, use_paged};
use crate::routes::Route;
use crate::session::{use_api, use_auth, use_org, use_selection, OrgState, SelectionStore};

/// Route that shows an organization view.
pub fn route_for_view(view: &OrgView) -> Route {
    match view {
        OrgView::List => Route::for_page(Page::Organizations),
        OrgView::Organization { organization_id } => Route::OrganizationHome {
            id: organization_id.clone(),
        },
        OrgView::Members { .. } => Route::for_page(Page::OrganizationManagement),
        OrgView::Course { course_id, .. } => Route::CourseHome {
            id: course_id.clone(),
        },
    }
}

/// Route that "back" leads to, and whether that step leaves the open
/// organization behind.
fn back_target(nav: &mut OrgNav) -> (Route, bool) {
    let route = match nav.back() {
        OrgBack::To(view) => route_for_view(&view),
        OrgBack::Exit => Route::Home {},
    };
    (route, nav.view().organization_id().is_none())
}

fn go_back(mut org: OrgState, mut store: SelectionStore) {
    let (target, left) = back_target(&mut org.nav.write());
    if left && store.selection().organization_id().is_some() {
        store.dispatch(NavEvent::ChangeSelection(Prerequisite::Organization));
    }
    navigator().push(target);
}

/// Point `nav` at `course_id`, opening its organization first (the open
/// one, else `selected_org`). Returns `false` when nothing changed.
pub fn sync_course(nav: &mut OrgNav, course_id: &str, selected_org: Option<&str>) -> bool {
    if matches!(nav.view(), OrgView::Course { course_id: open, .. } if open == course_id) {
        return false;
    }
    let Some(org_id) = nav.view().organization_id().or(selected_org).map(str::to_string) else {
        return false;
    };
    nav.open_organization(&org_id);
    nav.open_course(course_id)
}

/// The organization being browsed: the open view's, falling back to the
/// selected one.
fn current_organization_id(org: &OrgState, selected: Option<&str>) -> Option<String> {
    org.nav
        .read()
        .view()
        .organization_id()
        .or(selected)
        .map(str::to_string)
}

#[component]
pub fn OrganizationCourses() -> Element {
    let api = use_api();
    let auth = use_auth();
    let store = use_selection();
    let mut org = use_org();

    let selection = store.selection();
    let organization = selection.organization().cloned();
    let organization_id = current_organization_id(&org, selection.organization_id());
    let login = org.nav.read().login().cloned();
    let needs_login = login.is_none() && organization.as_ref().is_some_and(|o| !o.is_public);

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        let login = org.nav.read().login().cloned();
        let organization_id = current_organization_id(&org, store.selection().organization_id());
        async move {
            let id = organization_id.ok_or_else(|| AppError::bad_request("No organization selected"))?;
            api.list_courses(&id, login.as_ref(), api.page(page)).await
        }
    });

    let can_manage = auth.role() == Some(Role::OrganizationManager)
        || login.as_ref().is_some_and(|l| l.can_manage());
    let title = organization
        .as_ref()
        .map(|o| o.name.clone())
        .unwrap_or_else(|| "Courses".to_string());

    rsx! {
        PageHeader {
            title,
            subtitle: organization.as_ref().and_then(|o| o.description.clone()),
            on_back: move |_| go_back(org, store),
            if can_manage {
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| {
                        if org.nav.write().open_members() {
                            navigator().push(Route::for_page(Page::OrganizationManagement));
                        }
                    },
                    "Members"
                }
            }
        }
        if needs_login {
            if let Some(id) = organization_id {
                OrganizationLoginPanel { organization_id: id }
            }
        } else {
            {list_view(resource, page, "This organization has no courses yet.", move |courses| rsx! {
                CardGrid {
                    for course in courses {
                        Card {
                            key: "{course.id}",
                            onclick: {
                                let id = course.id.clone();
                                move |_| {
                                    if org.nav.write().open_course(&id) {
                                        navigator().push(Route::CourseHome { id: id.clone() });
                                    }
                                }
                            },
                            CardHeader {
                                CardTitle { "{course.title}" }
                                if let Some(description) = &course.description {
                                    CardDescription { "{description}" }
                                }
                            }
                            CardContent {
                                span { class: "text-muted", "{course.lecture_count} lectures" }
                            }
                        }
                    }
                }
            })}
        }
    }
}

/// Enrollment-key login for a private organization.
#[component]
fn OrganizationLoginPanel(organization_id: String) -> Element {
    let api = use_api();
    let mut org = use_org();
    let toast = use_toast();
    let mut key = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let id = organization_id.clone();
        let enrollment_key = key();
        busy.set(true);
        spawn(async move {
            let result = api.organization_login(&id, Some(&enrollment_key)).await;
            busy.set(false);
            match result {
                Ok(login) => {
                    tracing::info!(organization_id = %login.organization_id, role = %login.member_role, "joined organization");
                    org.nav.write().logged_in(login);
                    key.set(String::new());
                }
                Err(e) => toast.error(e.friendly_message(), ToastOptions::new()),
            }
        });
    };

    rsx! {
        Card {
            CardHeader {
                CardTitle { "Enrollment key required" }
                CardDescription { "This organization is private. Enter the key you were given to see its courses." }
            }
            CardContent {
                form { class: "form-grid", onsubmit: submit,
                    Input {
                        label: "Enrollment key",
                        input_type: "password",
                        value: key(),
                        disabled: busy(),
                        on_input: move |e: FormEvent| key.set(e.value()),
                    }
                    div { class: "form-actions",
                        Button { submit: true, loading: busy(), loading_label: "Checking...", "Enter" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn OrganizationLectures() -> Element {
    let api = use_api();
    let store = use_selection();
    let org = use_org();

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        let nav = org.nav.read().clone();
        async move {
            let (organization_id, course_id) = match nav.view() {
                OrgView::Course { organization_id, course_id } => {
                    (organization_id.clone(), course_id.clone())
                }
                _ => return Err(AppError::bad_request("No course selected")),
            };
            api.list_course_lectures(&organization_id, &course_id, nav.login(), api.page(page))
                .await
        }
    });

    let has_course = matches!(org.nav.read().view(), OrgView::Course { .. });

    rsx! {
        PageHeader { title: "Lectures", on_back: move |_| go_back(org, store) }
        if has_course {
            {list_view(resource, page, "This course has no lectures yet.", |lectures| rsx! {
                DataTable { columns: vec!["Lecture".to_string(), "Starts".to_string(), String::new()],
                    for lecture in lectures {
                        DataTableRow { key: "{lecture.id}",
                            DataTableCell { "{lecture.title}" }
                            DataTableCell {
                                {lecture.starts_at.as_deref().map(format_datetime).unwrap_or_default()}
                            }
                            DataTableCell {
                                if let Some(url) = &lecture.meeting_url {
                                    a { href: "{url}", target: "_blank", rel: "noopener", "Join" }
                                    " "
                                }
                                if let Some(url) = &lecture.recording_url {
                                    a { href: "{url}", target: "_blank", rel: "noopener", "Recording" }
                                }
                            }
                        }
                    }
                }
            })}
        } else {
            EmptyState { message: "Choose a course to see its lectures." }
        }
    }
}

#[component]
pub fn OrganizationManagement() -> Element {
    let api = use_api();
    let store = use_selection();
    let org = use_org();

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        let login = org.nav.read().login().cloned();
        let organization_id = current_organization_id(&org, store.selection().organization_id());
        async move {
            let id = organization_id.ok_or_else(|| AppError::bad_request("No organization selected"))?;
            api.list_members(&id, login.as_ref(), api.page(page)).await
        }
    });

    rsx! {
        PageHeader { title: "Members", on_back: move |_| go_back(org, store) }
        {list_view(resource, page, "No members yet.", |members| rsx! {
            DataTable { columns: vec!["Name".to_string(), "Role".to_string(), "Status".to_string()],
                for member in members {
                    DataTableRow { key: "{member.id}",
                        DataTableCell { "{member.name}" }
                        DataTableCell { span { class: "text-muted", "{member.role}" } }
                        DataTableCell {
                            if member.verified {
                                Badge { variant: BadgeVariant::Success, "Verified" }
                            } else {
                                Badge { variant: BadgeVariant::Warning, "Pending" }
                            }
                        }
                    }
                }
            }
        })}
    }
}
