//! Selector screens. Each lists the candidates for one selection level and,
//! on pick, writes it into the selection store.

use dioxus::prelude::*;
use shared_types::{AppError, NavEvent, Page, PaginatedResponse, Role};
use shared_ui::{Card, CardDescription, CardGrid, CardHeader, CardTitle, PageHeader};

use crate::list::{list_view, use_paged};
use crate::routes::Route;
use crate::session::{use_api, use_auth, use_org, use_selection};

/// A pick made on an explicit selection page continues to the dashboard;
/// anywhere else the originally requested page re-resolves by itself.
fn use_after_pick() -> impl Fn() + Copy {
    let route: Route = use_route();
    let explicit = Page::from_id(&route.page_id()).is_some_and(|p| p.is_selection_page());
    move || {
        if explicit {
            navigator().push(Route::Home {});
        }
    }
}

#[component]
pub fn InstituteSelector() -> Element {
    let api = use_api();
    let auth = use_auth();
    let mut store = use_selection();
    let after_pick = use_after_pick();

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        let role = auth.role();
        let child_id = store.selection().child_id().map(str::to_string);
        async move {
            let list = api.page(page);
            match (role, child_id) {
                (Some(Role::Parent), Some(child)) => api.child_institutes(&child, list).await,
                (Some(Role::Parent), None) => Ok(PaginatedResponse::single_page(vec![])),
                _ => api.list_institutes(list).await,
            }
        }
    });

    rsx! {
        PageHeader {
            title: "Select an institute",
            subtitle: Some("Choose the institute to work in.".to_string()),
        }
        {list_view(resource, page, "You are not enrolled in any institute.", move |institutes| rsx! {
            CardGrid {
                for institute in institutes {
                    Card {
                        key: "{institute.id}",
                        onclick: {
                            let institute = institute.clone();
                            move |_| {
                                if store.dispatch(NavEvent::SelectInstitute(institute.clone())) {
                                    after_pick();
                                }
                            }
                        },
                        CardHeader {
                            CardTitle { "{institute.name}" }
                            if let Some(code) = &institute.code {
                                CardDescription { "{code}" }
                            }
                        }
                    }
                }
            }
        })}
    }
}

#[component]
pub fn ClassSelector() -> Element {
    let api = use_api();
    let mut store = use_selection();
    let after_pick = use_after_pick();

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        let institute = store.institute_id();
        async move {
            let institute = institute.ok_or_else(|| AppError::bad_request("No institute selected"))?;
            api.list_classes(&institute, api.page(page)).await
        }
    });

    rsx! {
        PageHeader {
            title: "Select a class",
            subtitle: store.selection().institute().map(|i| i.name.clone()),
        }
        {list_view(resource, page, "This institute has no classes yet.", move |classes| rsx! {
            CardGrid {
                for class in classes {
                    Card {
                        key: "{class.id}",
                        onclick: {
                            let class = class.clone();
                            move |_| {
                                if store.dispatch(NavEvent::SelectClass(class.clone())) {
                                    after_pick();
                                }
                            }
                        },
                        CardHeader {
                            CardTitle { "{class.name}" }
                            if let Some(grade) = &class.grade {
                                CardDescription {
                                    "Grade {grade}"
                                    if let Some(section) = &class.section { " · Section {section}" }
                                }
                            }
                        }
                    }
                }
            }
        })}
    }
}

#[component]
pub fn SubjectSelector() -> Element {
    let api = use_api();
    let mut store = use_selection();
    let after_pick = use_after_pick();

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        let ids = store.class_ids();
        async move {
            let (institute, class) = ids.ok_or_else(|| AppError::bad_request("No class selected"))?;
            api.list_subjects(&institute, &class, api.page(page)).await
        }
    });

    rsx! {
        PageHeader {
            title: "Select a subject",
            subtitle: Some(store.selection().breadcrumb()),
        }
        {list_view(resource, page, "No subjects are taught in this class.", move |subjects| rsx! {
            CardGrid {
                for subject in subjects {
                    Card {
                        key: "{subject.id}",
                        onclick: {
                            let subject = subject.clone();
                            move |_| {
                                if store.dispatch(NavEvent::SelectSubject(subject.clone())) {
                                    after_pick();
                                }
                            }
                        },
                        CardHeader {
                            CardTitle { "{subject.name}" }
                            if let Some(code) = &subject.code {
                                CardDescription { "{code}" }
                            }
                        }
                    }
                }
            }
        })}
    }
}

#[component]
pub fn ChildSelector() -> Element {
    let api = use_api();
    let mut store = use_selection();
    let after_pick = use_after_pick();

    let (page, resource) = use_paged(move |_page| {
        let api = api.clone();
        async move { api.list_children().await }
    });

    rsx! {
        PageHeader {
            title: "Select a child",
            subtitle: Some("Whose school records do you want to see?".to_string()),
        }
        {list_view(resource, page, "No children are linked to your account.", move |children| rsx! {
            CardGrid {
                for child in children {
                    Card {
                        key: "{child.id}",
                        onclick: {
                            let child = child.clone();
                            move |_| {
                                if store.dispatch(NavEvent::SelectChild(child.clone())) {
                                    after_pick();
                                }
                            }
                        },
                        CardHeader {
                            CardTitle { "{child.name}" }
                            if let Some(grade) = &child.grade {
                                CardDescription { "Grade {grade}" }
                            }
                        }
                    }
                }
            }
        })}
    }
}

/// Organization list. Picking one selects it and opens its course list.
#[component]
pub fn OrganizationSelector() -> Element {
    let api = use_api();
    let mut store = use_selection();
    let mut org = use_org();

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        async move { api.list_organizations(api.page(page)).await }
    });

    rsx! {
        PageHeader {
            title: "Organizations",
            subtitle: Some("Courses and lectures offered outside your institute.".to_string()),
        }
        {list_view(resource, page, "No organizations are available.", move |organizations| rsx! {
            CardGrid {
                for organization in organizations {
                    Card {
                        key: "{organization.id}",
                        onclick: {
                            let organization = organization.clone();
                            move |_| {
                                let id = organization.id.clone();
                                if store.dispatch(NavEvent::SelectOrganization(organization.clone())) {
                                    org.nav.write().open_organization(&id);
                                    navigator().push(Route::OrganizationHome { id });
                                }
                            }
                        },
                        CardHeader {
                            CardTitle { "{organization.name}" }
                            if let Some(description) = &organization.description {
                                CardDescription { "{description}" }
                            }
                        }
                        if !organization.is_public {
                            shared_ui::Badge { variant: shared_ui::BadgeVariant::Outline, "Enrollment key required" }
                        }
                    }
                }
            }
        })}
    }
}
