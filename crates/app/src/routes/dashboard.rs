use api::StudentScope;
use dioxus::prelude::*;
use shared_types::navigator::menu_pages;
use shared_types::{attendance_rate, FeatureFlags, Page, Role};
use shared_ui::{
    Card, CardDescription, CardGrid, CardHeader, CardTitle, PageHeader, Skeleton, StatCard,
};

use crate::format_helpers::format_percent;
use crate::routes::Route;
use crate::session::{use_api, use_auth, use_selection};

/// Role-aware landing page: a few headline figures and links to the pages
/// the role can reach.
#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let store = use_selection();
    let flags: FeatureFlags = use_context();

    let Some(user) = auth.current_user.read().clone() else {
        return rsx! {};
    };
    let selection = store.selection();
    let subtitle = Some(selection.breadcrumb()).filter(|b| !b.is_empty());

    let links: Vec<Page> = menu_pages(user.role, |p| flags.page_enabled(p))
        .into_iter()
        .filter(|p| is_linkable(*p))
        .collect();

    rsx! {
        PageHeader { title: "Welcome, {user.name}", subtitle }

        match user.role {
            Role::Teacher | Role::InstituteAdmin => rsx! { InstituteFigures {} },
            Role::Student | Role::Parent => rsx! { AttendanceFigure {} },
            Role::AttendanceMarker | Role::OrganizationManager => rsx! {},
        }

        h2 { "Quick links" }
        CardGrid {
            for page in links {
                Card {
                    key: "{page.id()}",
                    onclick: move |_| {
                        navigator().push(Route::for_page(page));
                    },
                    CardHeader {
                        CardTitle { "{page.label()}" }
                        CardDescription { "{describe(page)}" }
                    }
                }
            }
        }
    }
}

#[component]
fn InstituteFigures() -> Element {
    let api = use_api();
    let store = use_selection();

    let summary = use_resource(move || {
        let api = api.clone();
        let institute = store.selection().institute_id().map(str::to_string);
        async move {
            match institute {
                Some(id) => api.institute_summary(&id).await.ok(),
                None => None,
            }
        }
    });

    let state = summary.read().clone();
    match state {
        None => rsx! { Skeleton {} },
        // A missing summary only hides the figures; the links still work.
        Some(None) => rsx! {},
        Some(Some(s)) => rsx! {
            CardGrid {
                StatCard { label: "Students", value: s.students.to_string() }
                StatCard { label: "Teachers", value: s.teachers.to_string() }
                StatCard { label: "Classes", value: s.classes.to_string() }
                StatCard { label: "Attendance", value: format_percent(s.attendance_rate) }
            }
        },
    }
}

#[component]
fn AttendanceFigure() -> Element {
    let api = use_api();
    let store = use_selection();

    let records = use_resource(move || {
        let api = api.clone();
        let selection = store.selection();
        let child = selection.child_id().map(str::to_string);
        let institute = selection.institute_id().map(str::to_string);
        async move {
            let institute = institute?;
            let scope = match &child {
                Some(id) => StudentScope::Child(id),
                None => StudentScope::Me,
            };
            api.student_attendance(scope, &institute, api.page(1))
                .await
                .ok()
                .map(|p| p.data)
        }
    });

    let state = records.read().clone();
    match state {
        None => rsx! { Skeleton {} },
        Some(None) => rsx! {},
        Some(Some(records)) => rsx! {
            CardGrid {
                StatCard {
                    label: "Attendance",
                    value: format_percent(attendance_rate(&records)),
                    hint: Some(format!("{} recent days", records.len())),
                }
            }
        },
    }
}

/// Quick links skip the dashboard itself and the pickers, which the
/// navigator shows on its own when a selection is missing.
fn is_linkable(page: Page) -> bool {
    page == Page::Organizations || !(page == Page::Dashboard || page.is_selection_page())
}

fn describe(page: Page) -> &'static str {
    match page {
        Page::Students => "Students enrolled in the selected class",
        Page::Teachers => "Teaching staff of the institute",
        Page::Parents => "Children linked to your account",
        Page::Classes => "Classes of the institute",
        Page::Subjects => "Subjects taught in the selected class",
        Page::AttendanceMarking => "Mark today's attendance",
        Page::QrAttendance => "Mark attendance by student code",
        Page::ClassAttendance => "Attendance history of the class",
        Page::MyAttendance | Page::ChildAttendance => "Attendance record",
        Page::Homework => "Assignments and due dates",
        Page::Exams => "Upcoming and past exams",
        Page::Results | Page::ChildResults => "Exam results",
        Page::Lectures => "Live and recorded lectures",
        Page::Grading => "Record exam marks",
        Page::Profile => "Your account details",
        Page::Appearance => "Light, dark or system theme",
        Page::Organizations => "Courses outside your institute",
        Page::OrganizationCourses => "Courses of the organization",
        Page::OrganizationLectures => "Lectures of the course",
        Page::OrganizationManagement => "Members of the organization",
        Page::Dashboard
        | Page::SelectInstitute
        | Page::SelectClass
        | Page::SelectSubject
        | Page::SelectChild => "",
    }
}
