use dioxus::prelude::*;
use shared_types::{FeatureFlags, NavEvent, Page, Screen};
use shared_ui::SkeletonList;

use super::academics::{Exams, Grading, Homework, Lectures, Results};
use super::attendance::{AttendanceMarking, ClassAttendance, QrAttendance, StudentAttendance};
use super::dashboard::Dashboard;
use super::organizations::{OrganizationCourses, OrganizationLectures, OrganizationManagement};
use super::people::{Children, Classes, Students, Subjects, Teachers};
use super::selectors::{
    ChildSelector, ClassSelector, InstituteSelector, OrganizationSelector, SubjectSelector,
};
use super::settings::{AppearanceSettings, Profile};
use crate::session::use_selection;

/// Resolves the requested page id against the session's role and selection
/// and renders exactly one screen: a selector or the page itself.
#[component]
pub fn PageContent(requested: String) -> Element {
    let flags: FeatureFlags = use_context();
    let store = use_selection();

    use_effect(use_reactive((&requested,), move |(requested,)| {
        let mut store = store;
        store.dispatch(NavEvent::Navigate(requested));
    }));

    let Some(state) = store.resolve(&requested, &flags) else {
        return rsx! { SkeletonList {} };
    };
    let screen = state.screen();
    tracing::debug!(requested = %requested, ?state, ?screen, "resolved screen");

    match screen {
        Screen::InstituteSelector => rsx! { InstituteSelector {} },
        Screen::ClassSelector => rsx! { ClassSelector {} },
        Screen::SubjectSelector => rsx! { SubjectSelector {} },
        Screen::ChildSelector => rsx! { ChildSelector {} },
        Screen::OrganizationSelector => rsx! { OrganizationSelector {} },
        Screen::Page(page) => render_page(page),
    }
}

fn render_page(page: Page) -> Element {
    match page {
        Page::Dashboard => rsx! { Dashboard {} },
        Page::SelectInstitute => rsx! { InstituteSelector {} },
        Page::SelectClass => rsx! { ClassSelector {} },
        Page::SelectSubject => rsx! { SubjectSelector {} },
        Page::SelectChild => rsx! { ChildSelector {} },
        Page::Organizations => rsx! { OrganizationSelector {} },
        Page::Students => rsx! { Students {} },
        Page::Teachers => rsx! { Teachers {} },
        Page::Parents => rsx! { Children {} },
        Page::Classes => rsx! { Classes {} },
        Page::Subjects => rsx! { Subjects {} },
        Page::AttendanceMarking => rsx! { AttendanceMarking {} },
        Page::QrAttendance => rsx! { QrAttendance {} },
        Page::ClassAttendance => rsx! { ClassAttendance {} },
        Page::MyAttendance | Page::ChildAttendance => rsx! { StudentAttendance {} },
        Page::Homework => rsx! { Homework {} },
        Page::Exams => rsx! { Exams {} },
        Page::Results | Page::ChildResults => rsx! { Results {} },
        Page::Lectures => rsx! { Lectures {} },
        Page::Grading => rsx! { Grading {} },
        Page::Profile => rsx! { Profile {} },
        Page::Appearance => rsx! { AppearanceSettings {} },
        Page::OrganizationCourses => rsx! { OrganizationCourses {} },
        Page::OrganizationLectures => rsx! { OrganizationLectures {} },
        Page::OrganizationManagement => rsx! { OrganizationManagement {} },
    }
}
