pub mod academics;
pub mod attendance;
pub mod content;
pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod organizations;
pub mod people;
pub mod selectors;
pub mod settings;

use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdBookOpen, LdBriefcase, LdClock, LdFileText, LdFolder, LdLayoutDashboard, LdLock, LdPackage,
    LdScale, LdSearch, LdSettings, LdShield, LdUserCheck, LdUsers,
};
use dioxus_free_icons::Icon;
use shared_types::navigator::menu_pages;
use shared_types::{FeatureFlags, NavEvent, Page, Prerequisite};
use shared_ui::{
    Badge, BadgeVariant, Button, ButtonVariant, Sidebar, SidebarContent, SidebarFooter,
    SidebarGroup, SidebarHeader, SidebarInset, SidebarItem, SidebarProvider, SidebarTrigger,
    SkeletonList,
};

use crate::session::{sign_out, use_api, use_auth, use_org, use_selection};
use content::PageContent;
use login::Login;
use not_found::NotFound;

/// Application routes. Every page id is a single path segment; the
/// organization area adds `/organization/:id` and `/course/:id`.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/login")]
    Login {},
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    #[route("/")]
    Home {},
    #[route("/organization/:id")]
    OrganizationHome { id: String },
    #[route("/course/:id")]
    CourseHome { id: String },
    #[route("/:page")]
    PageView { page: String },
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    /// The page id this route requests from the navigator.
    pub fn page_id(&self) -> String {
        match self {
            Route::Home {} | Route::Login {} | Route::NotFound { .. } => {
                Page::Dashboard.id().to_string()
            }
            Route::OrganizationHome { .. } => Page::OrganizationCourses.id().to_string(),
            Route::CourseHome { .. } => Page::OrganizationLectures.id().to_string(),
            Route::PageView { page } => page.trim().to_ascii_lowercase(),
        }
    }

    /// Route for a page reached from the sidebar or a screen link.
    pub fn for_page(page: Page) -> Route {
        match page {
            Page::Dashboard => Route::Home {},
            other => Route::PageView {
                page: other.id().to_string(),
            },
        }
    }
}

#[component]
fn Home() -> Element {
    rsx! { PageContent { requested: Page::Dashboard.id().to_string() } }
}

#[component]
fn PageView(page: String) -> Element {
    rsx! { PageContent { requested: page } }
}

#[component]
fn OrganizationHome(id: String) -> Element {
    let org = use_org();
    use_effect(use_reactive((&id,), move |(id,)| {
        let mut org = org;
        if org.nav.peek().view().organization_id() != Some(id.as_str()) {
            org.nav.write().open_organization(&id);
        }
    }));
    rsx! { PageContent { requested: Page::OrganizationCourses.id().to_string() } }
}

#[component]
fn CourseHome(id: String) -> Element {
    let org = use_org();
    let store = use_selection();
    use_effect(use_reactive((&id,), move |(id,)| {
        let mut org = org;
        let selected = store.selection().organization_id().map(str::to_string);
        let mut next = org.nav.peek().clone();
        if organizations::sync_course(&mut next, &id, selected.as_deref()) {
            org.nav.set(next);
        }
    }));
    rsx! { PageContent { requested: Page::OrganizationLectures.id().to_string() } }
}

/// Restores the session from a stored token, or sends the user to login.
#[component]
fn AuthGuard() -> Element {
    let api = use_api();
    let mut auth = use_auth();
    let mut store = use_selection();
    let org = use_org();

    let restore_api = api.clone();
    let restore = use_resource(move || {
        let api = restore_api.clone();
        async move {
            if auth.current_user.peek().is_some() {
                return None;
            }
            Some(api.current_user().await)
        }
    });

    use_effect(move || match &*restore.read() {
        Some(Some(Ok(user))) if auth.current_user.peek().is_none() => {
            tracing::info!(user_id = %user.id, "session restored");
            auth.set_user(user.clone());
        }
        Some(Some(Err(e))) => {
            if !e.is_auth_failure() {
                tracing::warn!(error = %e, "session restore failed");
            }
            sign_out(&api, auth, store, org);
            navigator().replace(Route::Login {});
        }
        _ => {}
    });

    use_effect(move || {
        if let Some(role) = auth.role() {
            if !store.is_started() {
                store.start(role);
            }
        }
    });

    if auth.is_authenticated() && store.is_started() {
        return rsx! { Outlet::<Route> {} };
    }

    if matches!(&*restore.read(), Some(Some(Err(_)))) {
        return rsx! {
            div { class: "auth-guard-loading", p { "Redirecting to login..." } }
        };
    }
    rsx! {
        div { class: "auth-guard-loading", SkeletonList { rows: 3 } }
    }
}

/// Sidebar, header with the selection breadcrumb, and the routed content.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let flags: FeatureFlags = use_context();
    let api = use_api();
    let auth = use_auth();
    let store = use_selection();
    let org = use_org();

    let Some(user) = auth.current_user.read().clone() else {
        return rsx! {};
    };
    let current = store
        .resolve(&route.page_id(), &flags)
        .and_then(|s| match s {
            shared_types::NavState::Ready(p) => Some(p),
            _ => None,
        });
    let pages = menu_pages(user.role, |p| flags.page_enabled(p));

    rsx! {
        SidebarProvider {
            Sidebar {
                SidebarHeader {
                    span { class: "sidebar-brand-name", "Campus LMS" }
                }
                SidebarContent {
                    SidebarGroup { label: Some(user.role.display_name().to_string()),
                        for page in pages {
                            SidebarItem {
                                key: "{page.id()}",
                                active: current == Some(page),
                                onclick: move |_| {
                                    navigator().push(Route::for_page(page));
                                },
                                icon: page_icon(page),
                                "{page.label()}"
                            }
                        }
                    }
                }
                SidebarFooter {
                    div { class: "sidebar-user",
                        span { class: "sidebar-user-initials", "{user.initials()}" }
                        div {
                            p { class: "sidebar-user-name", "{user.name}" }
                            Badge { variant: BadgeVariant::Secondary, "{user.role.display_name()}" }
                        }
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| {
                            sign_out(&api, auth, store, org);
                            navigator().replace(Route::Login {});
                        },
                        Icon { icon: LdLock, width: 16, height: 16 }
                        "Sign out"
                    }
                }
            }
            SidebarInset {
                header { class: "app-header",
                    SidebarTrigger {}
                    SelectionBar {}
                }
                div { class: "container", Outlet::<Route> {} }
            }
        }
    }
}

/// Breadcrumb of the current selection with a "Change" action per level.
#[component]
fn SelectionBar() -> Element {
    let mut store = use_selection();
    let selection = store.selection();

    let levels: Vec<(Prerequisite, String)> = [
        (Prerequisite::Child, selection.child().map(|c| c.name.clone())),
        (Prerequisite::Institute, selection.institute().map(|i| i.name.clone())),
        (Prerequisite::Class, selection.class().map(|c| c.name.clone())),
        (Prerequisite::Subject, selection.subject().map(|s| s.name.clone())),
        (
            Prerequisite::Organization,
            selection.organization().map(|o| o.name.clone()),
        ),
    ]
    .into_iter()
    .filter_map(|(level, name)| name.map(|n| (level, n)))
    .collect();

    if levels.is_empty() {
        return rsx! {};
    }

    rsx! {
        nav { class: "selection-bar", "aria-label": "Current selection",
            for (level, name) in levels {
                span { key: "{level.label()}", class: "selection-chip",
                    span { class: "selection-chip-label", "{level.label()}: " }
                    span { class: "selection-chip-value", "{name}" }
                    button {
                        class: "selection-chip-change",
                        r#type: "button",
                        onclick: move |_| {
                            store.dispatch(NavEvent::ChangeSelection(level));
                        },
                        "Change"
                    }
                }
            }
        }
    }
}

fn page_icon(page: Page) -> Element {
    match page {
        Page::Dashboard => rsx! { Icon { icon: LdLayoutDashboard, width: 18, height: 18 } },
        Page::Students | Page::Teachers | Page::Parents => {
            rsx! { Icon { icon: LdUsers, width: 18, height: 18 } }
        }
        Page::Classes
        | Page::Subjects
        | Page::SelectInstitute
        | Page::SelectClass
        | Page::SelectSubject
        | Page::SelectChild => rsx! { Icon { icon: LdFolder, width: 18, height: 18 } },
        Page::AttendanceMarking
        | Page::ClassAttendance
        | Page::MyAttendance
        | Page::ChildAttendance => rsx! { Icon { icon: LdUserCheck, width: 18, height: 18 } },
        Page::QrAttendance => rsx! { Icon { icon: LdSearch, width: 18, height: 18 } },
        Page::Homework => rsx! { Icon { icon: LdFileText, width: 18, height: 18 } },
        Page::Exams => rsx! { Icon { icon: LdClock, width: 18, height: 18 } },
        Page::Results | Page::ChildResults | Page::Grading => {
            rsx! { Icon { icon: LdScale, width: 18, height: 18 } }
        }
        Page::Lectures | Page::OrganizationLectures => {
            rsx! { Icon { icon: LdBookOpen, width: 18, height: 18 } }
        }
        Page::Profile => rsx! { Icon { icon: LdShield, width: 18, height: 18 } },
        Page::Appearance => rsx! { Icon { icon: LdSettings, width: 18, height: 18 } },
        Page::Organizations => rsx! { Icon { icon: LdBriefcase, width: 18, height: 18 } },
        Page::OrganizationCourses | Page::OrganizationManagement => {
            rsx! { Icon { icon: LdPackage, width: 18, height: 18 } }
        }
    }
}
