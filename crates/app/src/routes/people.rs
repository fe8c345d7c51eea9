use api::ClassRef;
use dioxus::prelude::*;
use shared_types::{AppError, NavEvent, Page};
use shared_ui::{
    Badge, BadgeVariant, DataTable, DataTableCell, DataTableRow, PageHeader,
};

use crate::list::{list_view, use_paged};
use crate::routes::Route;
use crate::session::{use_api, use_selection};

fn no_class() -> AppError {
    AppError::bad_request("No class selected")
}

fn no_institute() -> AppError {
    AppError::bad_request("No institute selected")
}

/// Students of the selected class.
#[component]
pub fn Students() -> Element {
    let api = use_api();
    let store = use_selection();

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        let ids = store.class_ids();
        async move {
            let (institute_id, class_id) = ids.ok_or_else(no_class)?;
            let class = ClassRef { institute_id: &institute_id, class_id: &class_id };
            api.list_students(class, api.page(page)).await
        }
    });

    rsx! {
        PageHeader { title: "Students", subtitle: Some(store.selection().breadcrumb()) }
        {list_view(resource, page, "No students in this class.", |students| rsx! {
            DataTable { columns: vec!["Name".to_string(), "Student code".to_string(), "Email".to_string()],
                for student in students {
                    DataTableRow { key: "{student.id}",
                        DataTableCell { "{student.name}" }
                        DataTableCell { {student.student_code.clone().unwrap_or_default()} }
                        DataTableCell { {student.email.clone().unwrap_or_default()} }
                    }
                }
            }
        })}
    }
}

/// Teaching staff of the selected institute.
#[component]
pub fn Teachers() -> Element {
    let api = use_api();
    let store = use_selection();

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        let institute = store.institute_id();
        async move {
            let institute = institute.ok_or_else(no_institute)?;
            api.list_teachers(&institute, api.page(page)).await
        }
    });

    rsx! {
        PageHeader {
            title: "Teachers",
            subtitle: store.selection().institute().map(|i| i.name.clone()),
        }
        {list_view(resource, page, "No teachers are registered yet.", |teachers| rsx! {
            DataTable { columns: vec!["Name".to_string(), "Email".to_string(), "Subjects".to_string()],
                for teacher in teachers {
                    DataTableRow { key: "{teacher.id}",
                        DataTableCell { "{teacher.name}" }
                        DataTableCell { {teacher.email.clone().unwrap_or_default()} }
                        DataTableCell {
                            for subject in teacher.subjects.iter() {
                                Badge { key: "{subject}", variant: BadgeVariant::Outline, "{subject}" }
                            }
                        }
                    }
                }
            }
        })}
    }
}

/// A parent's children. Choosing one switches the whole session to that
/// child.
#[component]
pub fn Children() -> Element {
    let api = use_api();
    let mut store = use_selection();
    let current = store.selection().child_id().map(str::to_string);

    let (page, resource) = use_paged(move |_page| {
        let api = api.clone();
        async move { api.list_children().await }
    });

    rsx! {
        PageHeader { title: "My children" }
        {list_view(resource, page, "No children are linked to your account.", move |children| rsx! {
            DataTable { columns: vec!["Name".to_string(), "Grade".to_string(), String::new()],
                for child in children {
                    DataTableRow {
                        key: "{child.id}",
                        onclick: {
                            let child = child.clone();
                            move |_| {
                                if store.dispatch(NavEvent::SelectChild(child.clone())) {
                                    navigator().push(Route::Home {});
                                }
                            }
                        },
                        DataTableCell { "{child.name}" }
                        DataTableCell { {child.grade.clone().unwrap_or_default()} }
                        DataTableCell {
                            if current.as_deref() == Some(child.id.as_str()) {
                                Badge { variant: BadgeVariant::Success, "Selected" }
                            }
                        }
                    }
                }
            }
        })}
    }
}

/// Classes of the selected institute. Choosing one makes it the current
/// class.
#[component]
pub fn Classes() -> Element {
    let api = use_api();
    let mut store = use_selection();
    let current = store.selection().class_id().map(str::to_string);

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        let institute = store.institute_id();
        async move {
            let institute = institute.ok_or_else(no_institute)?;
            api.list_classes(&institute, api.page(page)).await
        }
    });

    rsx! {
        PageHeader {
            title: "Classes",
            subtitle: store.selection().institute().map(|i| i.name.clone()),
        }
        {list_view(resource, page, "This institute has no classes yet.", move |classes| rsx! {
            DataTable { columns: vec!["Class".to_string(), "Grade".to_string(), "Section".to_string(), String::new()],
                for class in classes {
                    DataTableRow {
                        key: "{class.id}",
                        onclick: {
                            let class = class.clone();
                            move |_| {
                                if store.dispatch(NavEvent::SelectClass(class.clone())) {
                                    navigator().push(Route::for_page(Page::Students));
                                }
                            }
                        },
                        DataTableCell { "{class.name}" }
                        DataTableCell { {class.grade.clone().unwrap_or_default()} }
                        DataTableCell { {class.section.clone().unwrap_or_default()} }
                        DataTableCell {
                            if current.as_deref() == Some(class.id.as_str()) {
                                Badge { variant: BadgeVariant::Success, "Selected" }
                            }
                        }
                    }
                }
            }
        })}
    }
}

/// Subjects of the selected class. Choosing one opens its lectures.
#[component]
pub fn Subjects() -> Element {
    let api = use_api();
    let mut store = use_selection();

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        let ids = store.class_ids();
        async move {
            let (institute, class) = ids.ok_or_else(no_class)?;
            api.list_subjects(&institute, &class, api.page(page)).await
        }
    });

    rsx! {
        PageHeader { title: "Subjects", subtitle: Some(store.selection().breadcrumb()) }
        {list_view(resource, page, "No subjects are taught in this class.", move |subjects| rsx! {
            DataTable { columns: vec!["Subject".to_string(), "Code".to_string()],
                for subject in subjects {
                    DataTableRow {
                        key: "{subject.id}",
                        onclick: {
                            let subject = subject.clone();
                            move |_| {
                                if store.dispatch(NavEvent::SelectSubject(subject.clone())) {
                                    navigator().push(Route::for_page(Page::Lectures));
                                }
                            }
                        },
                        DataTableCell { "{subject.name}" }
                        DataTableCell { {subject.code.clone().unwrap_or_default()} }
                    }
                }
            }
        })}
    }
}
