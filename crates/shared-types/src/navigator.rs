//! Role/selection-gated page resolution.
//!
//! Every role has a page table listing the pages it may reach and the
//! selections each page needs. A single generic algorithm resolves
//! `(role, requested page id, selection)` to exactly one [`Screen`]:
//!
//! 1. Look the requested id up in the role's table. Unknown ids, and ids the
//!    role's table does not list, fall back to the role's dashboard rule.
//! 2. Walk the prerequisites in [`GATE_ORDER`]; the first one the rule needs
//!    and the selection lacks wins, and its selector screen is returned.
//! 3. Otherwise the page itself is returned.
//!
//! Resolution only reads its inputs, never panics and always yields a screen.

use serde::{Deserialize, Serialize};

use crate::models::{Child, Class, Institute, Organization, Subject};
use crate::page::Page;
use crate::role::Role;
use crate::selection::{Prerequisite, Selection, SelectionError};

/// Fixed gate evaluation order. Parents pick a child before an institute;
/// the institute hierarchy is always institute → class → subject.
pub const GATE_ORDER: &[Prerequisite] = &[
    Prerequisite::Child,
    Prerequisite::Institute,
    Prerequisite::Class,
    Prerequisite::Subject,
    Prerequisite::Organization,
];

/// One entry of a role's page table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRule {
    pub page: Page,
    pub requires: &'static [Prerequisite],
}

const fn rule(page: Page, requires: &'static [Prerequisite]) -> PageRule {
    PageRule { page, requires }
}

const NONE: &[Prerequisite] = &[];
const INST: &[Prerequisite] = &[Prerequisite::Institute];
const CLASS: &[Prerequisite] = &[Prerequisite::Institute, Prerequisite::Class];
const SUBJECT: &[Prerequisite] = &[
    Prerequisite::Institute,
    Prerequisite::Class,
    Prerequisite::Subject,
];
const CHILD: &[Prerequisite] = &[Prerequisite::Child];
const CHILD_INST: &[Prerequisite] = &[Prerequisite::Child, Prerequisite::Institute];
const ORG: &[Prerequisite] = &[Prerequisite::Organization];

const STUDENT_PAGES: &[PageRule] = &[
    rule(Page::Dashboard, INST),
    rule(Page::SelectInstitute, NONE),
    rule(Page::MyAttendance, INST),
    rule(Page::Homework, INST),
    rule(Page::Exams, INST),
    rule(Page::Results, INST),
    rule(Page::Lectures, INST),
    rule(Page::Profile, NONE),
    rule(Page::Appearance, NONE),
    rule(Page::Organizations, NONE),
    rule(Page::OrganizationCourses, ORG),
    rule(Page::OrganizationLectures, ORG),
];

const TEACHER_PAGES: &[PageRule] = &[
    rule(Page::Dashboard, INST),
    rule(Page::SelectInstitute, NONE),
    rule(Page::SelectClass, INST),
    rule(Page::SelectSubject, CLASS),
    rule(Page::Classes, INST),
    rule(Page::Students, CLASS),
    rule(Page::Subjects, CLASS),
    rule(Page::AttendanceMarking, CLASS),
    rule(Page::QrAttendance, CLASS),
    rule(Page::ClassAttendance, CLASS),
    rule(Page::Homework, CLASS),
    rule(Page::Exams, CLASS),
    rule(Page::Grading, CLASS),
    rule(Page::Lectures, SUBJECT),
    rule(Page::Profile, NONE),
    rule(Page::Appearance, NONE),
    rule(Page::Organizations, NONE),
    rule(Page::OrganizationCourses, ORG),
    rule(Page::OrganizationLectures, ORG),
];

const INSTITUTE_ADMIN_PAGES: &[PageRule] = &[
    rule(Page::Dashboard, INST),
    rule(Page::SelectInstitute, NONE),
    rule(Page::SelectClass, INST),
    rule(Page::SelectSubject, CLASS),
    rule(Page::Classes, INST),
    rule(Page::Teachers, INST),
    rule(Page::Students, CLASS),
    rule(Page::Subjects, CLASS),
    rule(Page::AttendanceMarking, CLASS),
    rule(Page::QrAttendance, CLASS),
    rule(Page::ClassAttendance, CLASS),
    rule(Page::Homework, CLASS),
    rule(Page::Exams, CLASS),
    rule(Page::Grading, CLASS),
    rule(Page::Lectures, SUBJECT),
    rule(Page::Profile, NONE),
    rule(Page::Appearance, NONE),
    rule(Page::Organizations, NONE),
    rule(Page::OrganizationCourses, ORG),
    rule(Page::OrganizationLectures, ORG),
];

const ATTENDANCE_MARKER_PAGES: &[PageRule] = &[
    rule(Page::Dashboard, INST),
    rule(Page::SelectInstitute, NONE),
    rule(Page::SelectClass, INST),
    rule(Page::AttendanceMarking, CLASS),
    rule(Page::QrAttendance, CLASS),
    rule(Page::ClassAttendance, CLASS),
    rule(Page::Profile, NONE),
    rule(Page::Appearance, NONE),
];

const PARENT_PAGES: &[PageRule] = &[
    rule(Page::Dashboard, CHILD_INST),
    rule(Page::Parents, NONE),
    rule(Page::SelectChild, NONE),
    rule(Page::SelectInstitute, CHILD),
    rule(Page::ChildAttendance, CHILD_INST),
    rule(Page::ChildResults, CHILD_INST),
    rule(Page::Homework, CHILD_INST),
    rule(Page::Profile, NONE),
    rule(Page::Appearance, NONE),
];

const ORGANIZATION_MANAGER_PAGES: &[PageRule] = &[
    rule(Page::Dashboard, NONE),
    rule(Page::Organizations, NONE),
    rule(Page::OrganizationCourses, ORG),
    rule(Page::OrganizationLectures, ORG),
    rule(Page::OrganizationManagement, ORG),
    rule(Page::Profile, NONE),
    rule(Page::Appearance, NONE),
];

/// The page table for a role: the single source of truth for the page ids
/// that role may reach.
pub fn page_table(role: Role) -> &'static [PageRule] {
    match role {
        Role::Student => STUDENT_PAGES,
        Role::Teacher => TEACHER_PAGES,
        Role::Parent => PARENT_PAGES,
        Role::InstituteAdmin => INSTITUTE_ADMIN_PAGES,
        Role::AttendanceMarker => ATTENDANCE_MARKER_PAGES,
        Role::OrganizationManager => ORGANIZATION_MANAGER_PAGES,
    }
}

/// The rule for `page` in `role`'s table, if the role may reach it.
pub fn rule_for(role: Role, page: Page) -> Option<&'static PageRule> {
    page_table(role).iter().find(|r| r.page == page)
}

/// Every table contains a dashboard entry; this is the fallback target.
fn dashboard_rule(role: Role) -> PageRule {
    rule_for(role, Page::Dashboard)
        .copied()
        .unwrap_or(rule(Page::Dashboard, NONE))
}

/// The screen chosen for a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    InstituteSelector,
    ClassSelector,
    SubjectSelector,
    ChildSelector,
    OrganizationSelector,
    Page(Page),
}

impl Screen {
    fn selector_for(prerequisite: Prerequisite) -> Self {
        match prerequisite {
            Prerequisite::Child => Screen::ChildSelector,
            Prerequisite::Institute => Screen::InstituteSelector,
            Prerequisite::Class => Screen::ClassSelector,
            Prerequisite::Subject => Screen::SubjectSelector,
            Prerequisite::Organization => Screen::OrganizationSelector,
        }
    }

    /// Whether this screen is a selector rather than a feature page.
    pub fn is_selector(&self) -> bool {
        !matches!(self, Screen::Page(_))
    }
}

/// Navigation state for one cycle: either blocked on a missing selection or
/// ready to show a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavState {
    NoChild,
    NoInstitute,
    NoClass,
    NoSubject,
    NoOrganization,
    Ready(Page),
}

impl NavState {
    fn blocked_on(prerequisite: Prerequisite) -> Self {
        match prerequisite {
            Prerequisite::Child => NavState::NoChild,
            Prerequisite::Institute => NavState::NoInstitute,
            Prerequisite::Class => NavState::NoClass,
            Prerequisite::Subject => NavState::NoSubject,
            Prerequisite::Organization => NavState::NoOrganization,
        }
    }

    /// The missing prerequisite, if blocked.
    pub fn missing(&self) -> Option<Prerequisite> {
        match self {
            NavState::NoChild => Some(Prerequisite::Child),
            NavState::NoInstitute => Some(Prerequisite::Institute),
            NavState::NoClass => Some(Prerequisite::Class),
            NavState::NoSubject => Some(Prerequisite::Subject),
            NavState::NoOrganization => Some(Prerequisite::Organization),
            NavState::Ready(_) => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, NavState::Ready(_))
    }

    /// The screen to render for this state. Explicit selection pages render
    /// their selector.
    pub fn screen(&self) -> Screen {
        match self {
            NavState::Ready(Page::SelectInstitute) => Screen::InstituteSelector,
            NavState::Ready(Page::SelectClass) => Screen::ClassSelector,
            NavState::Ready(Page::SelectSubject) => Screen::SubjectSelector,
            NavState::Ready(Page::SelectChild) => Screen::ChildSelector,
            NavState::Ready(Page::Organizations) => Screen::OrganizationSelector,
            NavState::Ready(page) => Screen::Page(*page),
            blocked => blocked
                .missing()
                .map(Screen::selector_for)
                .unwrap_or(Screen::Page(Page::Dashboard)),
        }
    }
}

/// Resolve a request to a navigation state, treating pages rejected by
/// `enabled` as absent from the role's table.
pub fn resolve_state_with(
    role: Role,
    requested: &str,
    selection: &Selection,
    enabled: impl Fn(Page) -> bool,
) -> NavState {
    let rule = Page::from_id(requested)
        .filter(|page| enabled(*page))
        .and_then(|page| rule_for(role, page).copied())
        .unwrap_or_else(|| dashboard_rule(role));

    GATE_ORDER
        .iter()
        .find(|p| rule.requires.contains(*p) && !selection.has(**p))
        .map(|p| NavState::blocked_on(*p))
        .unwrap_or(NavState::Ready(rule.page))
}

/// Resolve a request to a navigation state with every page enabled.
pub fn resolve_state(role: Role, requested: &str, selection: &Selection) -> NavState {
    resolve_state_with(role, requested, selection, |_| true)
}

/// Resolve a request to the screen to render.
pub fn resolve(role: Role, requested: &str, selection: &Selection) -> Screen {
    resolve_state(role, requested, selection).screen()
}

/// Pages shown in the sidebar for a role: its table minus the explicit
/// selection pages and organization sub-pages, which are reached from
/// their parent screens.
pub fn menu_pages(role: Role, enabled: impl Fn(Page) -> bool) -> Vec<Page> {
    page_table(role)
        .iter()
        .map(|r| r.page)
        .filter(|p| {
            let reached_from_parent = matches!(
                p,
                Page::SelectInstitute
                    | Page::SelectClass
                    | Page::SelectSubject
                    | Page::SelectChild
                    | Page::OrganizationCourses
                    | Page::OrganizationLectures
                    | Page::OrganizationManagement
            );
            !reached_from_parent && enabled(*p)
        })
        .collect()
}

/// Inputs that move the navigator between states.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    Navigate(String),
    SelectInstitute(Institute),
    SelectClass(Class),
    SelectSubject(Subject),
    SelectChild(Child),
    SelectOrganization(Organization),
    /// "Change" action: drop a selection level and everything below it.
    ChangeSelection(Prerequisite),
    Logout,
}

/// The navigator as an explicit state machine over one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    role: Role,
    requested: String,
    selection: Selection,
}

impl Navigator {
    /// Start a session. A restored session passes its stored selection;
    /// the initial request is the dashboard.
    pub fn new(role: Role, selection: Selection) -> Self {
        Self {
            role,
            requested: Page::Dashboard.id().to_string(),
            selection,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn requested(&self) -> &str {
        &self.requested
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn state(&self) -> NavState {
        resolve_state(self.role, &self.requested, &self.selection)
    }

    pub fn screen(&self) -> Screen {
        self.state().screen()
    }

    /// Apply one event and return the re-derived state. A rejected
    /// selection leaves the navigator unchanged.
    pub fn apply(&mut self, event: NavEvent) -> Result<NavState, SelectionError> {
        match event {
            NavEvent::Navigate(page) => self.requested = page,
            NavEvent::SelectInstitute(i) => self.selection.select_institute(i),
            NavEvent::SelectClass(c) => self.selection.select_class(c)?,
            NavEvent::SelectSubject(s) => self.selection.select_subject(s)?,
            NavEvent::SelectChild(c) => self.selection.select_child(c),
            NavEvent::SelectOrganization(o) => self.selection.select_organization(o),
            NavEvent::ChangeSelection(level) => self.selection.clear(level),
            NavEvent::Logout => {
                self.selection.reset();
                self.requested = Page::Dashboard.id().to_string();
            }
        }
        Ok(self.state())
    }
}
