use serde::{Deserialize, Serialize};

/// Page id used when a path or id cannot be mapped.
pub const DEFAULT_PAGE_ID: &str = "dashboard";

/// Every page id the client knows about.
///
/// Which of these a role may actually reach is decided by the role's page
/// table in [`crate::navigator`], not here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Dashboard,
    SelectInstitute,
    SelectClass,
    SelectSubject,
    SelectChild,
    Students,
    Teachers,
    Parents,
    Classes,
    Subjects,
    AttendanceMarking,
    QrAttendance,
    ClassAttendance,
    MyAttendance,
    ChildAttendance,
    Homework,
    Exams,
    Results,
    ChildResults,
    Lectures,
    Grading,
    Profile,
    Appearance,
    Organizations,
    OrganizationCourses,
    OrganizationLectures,
    OrganizationManagement,
}

pub const ALL_PAGES: &[Page] = &[
    Page::Dashboard,
    Page::SelectInstitute,
    Page::SelectClass,
    Page::SelectSubject,
    Page::SelectChild,
    Page::Students,
    Page::Teachers,
    Page::Parents,
    Page::Classes,
    Page::Subjects,
    Page::AttendanceMarking,
    Page::QrAttendance,
    Page::ClassAttendance,
    Page::MyAttendance,
    Page::ChildAttendance,
    Page::Homework,
    Page::Exams,
    Page::Results,
    Page::ChildResults,
    Page::Lectures,
    Page::Grading,
    Page::Profile,
    Page::Appearance,
    Page::Organizations,
    Page::OrganizationCourses,
    Page::OrganizationLectures,
    Page::OrganizationManagement,
];

impl Page {
    /// Stable page id, as it appears in the URL.
    pub fn id(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::SelectInstitute => "select-institute",
            Page::SelectClass => "select-class",
            Page::SelectSubject => "select-subject",
            Page::SelectChild => "select-child",
            Page::Students => "students",
            Page::Teachers => "teachers",
            Page::Parents => "parents",
            Page::Classes => "classes",
            Page::Subjects => "subjects",
            Page::AttendanceMarking => "attendance-marking",
            Page::QrAttendance => "qr-attendance",
            Page::ClassAttendance => "class-attendance",
            Page::MyAttendance => "my-attendance",
            Page::ChildAttendance => "child-attendance",
            Page::Homework => "homework",
            Page::Exams => "exams",
            Page::Results => "results",
            Page::ChildResults => "child-results",
            Page::Lectures => "lectures",
            Page::Grading => "grading",
            Page::Profile => "profile",
            Page::Appearance => "appearance",
            Page::Organizations => "organizations",
            Page::OrganizationCourses => "organization-courses",
            Page::OrganizationLectures => "organization-lectures",
            Page::OrganizationManagement => "organization-management",
        }
    }

    /// Look up a page by id. Ids are matched case-insensitively after
    /// trimming; anything else returns `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase();
        ALL_PAGES.iter().copied().find(|p| p.id() == id)
    }

    /// Sidebar / header label.
    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::SelectInstitute => "Select Institute",
            Page::SelectClass => "Select Class",
            Page::SelectSubject => "Select Subject",
            Page::SelectChild => "Select Child",
            Page::Students => "Students",
            Page::Teachers => "Teachers",
            Page::Parents => "My Children",
            Page::Classes => "Classes",
            Page::Subjects => "Subjects",
            Page::AttendanceMarking => "Mark Attendance",
            Page::QrAttendance => "QR Attendance",
            Page::ClassAttendance => "Class Attendance",
            Page::MyAttendance => "My Attendance",
            Page::ChildAttendance => "Attendance",
            Page::Homework => "Homework",
            Page::Exams => "Exams",
            Page::Results => "Results",
            Page::ChildResults => "Results",
            Page::Lectures => "Lectures",
            Page::Grading => "Grading",
            Page::Profile => "Profile",
            Page::Appearance => "Appearance",
            Page::Organizations => "Organizations",
            Page::OrganizationCourses => "Courses",
            Page::OrganizationLectures => "Lectures",
            Page::OrganizationManagement => "Members",
        }
    }

    /// Pages that exist only to pick a scoping entity.
    pub fn is_selection_page(&self) -> bool {
        matches!(
            self,
            Page::SelectInstitute
                | Page::SelectClass
                | Page::SelectSubject
                | Page::SelectChild
                | Page::Organizations
        )
    }

    /// Pages inside the organization area, which has its own header and
    /// back-navigation.
    pub fn is_organization_area(&self) -> bool {
        matches!(
            self,
            Page::Organizations
                | Page::OrganizationCourses
                | Page::OrganizationLectures
                | Page::OrganizationManagement
        )
    }
}

/// Map a browser path to a requested page id. Total: every input yields an id.
///
/// - `/` and the empty path map to the default page.
/// - `/<id>` maps to `<id>` (lowercased), known or not; unknown ids are
///   resolved later by the navigator.
/// - `/organization/<id>` maps to the organization course list and
///   `/course/<id>` to the course lecture list.
/// - Any other multi-segment path maps to the default page.
pub fn path_to_page(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => DEFAULT_PAGE_ID.to_string(),
        ["organization", _] => Page::OrganizationCourses.id().to_string(),
        ["course", _] => Page::OrganizationLectures.id().to_string(),
        [single] => single.to_ascii_lowercase(),
        _ => DEFAULT_PAGE_ID.to_string(),
    }
}

/// Map a page id to the path pushed onto browser history. Total: blank ids
/// map to the default page and slashes are stripped so the result is always
/// a single segment.
pub fn page_to_path(page: &str) -> String {
    let cleaned: String = page.trim().chars().filter(|c| *c != '/').collect();
    if cleaned.is_empty() {
        format!("/{DEFAULT_PAGE_ID}")
    } else {
        format!("/{}", cleaned.to_ascii_lowercase())
    }
}

/// Path for a selected organization's home (its course list).
pub fn organization_path(organization_id: &str) -> String {
    format!("/organization/{organization_id}")
}

/// Path for a course inside the selected organization.
pub fn course_path(course_id: &str) -> String {
    format!("/course/{course_id}")
}
