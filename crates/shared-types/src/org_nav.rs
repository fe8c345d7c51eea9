use serde::{Deserialize, Serialize};

use crate::models::OrganizationLogin;
use crate::page::{course_path, organization_path, page_to_path, Page};

/// Where the user is inside the organization area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrgView {
    #[default]
    List,
    Organization { organization_id: String },
    Members { organization_id: String },
    Course { organization_id: String, course_id: String },
}

impl OrgView {
    /// The page id the view corresponds to.
    pub fn page(&self) -> Page {
        match self {
            OrgView::List => Page::Organizations,
            OrgView::Organization { .. } => Page::OrganizationCourses,
            OrgView::Members { .. } => Page::OrganizationManagement,
            OrgView::Course { .. } => Page::OrganizationLectures,
        }
    }

    /// The browser path for the view.
    pub fn path(&self) -> String {
        match self {
            OrgView::List => page_to_path(Page::Organizations.id()),
            OrgView::Organization { organization_id } => organization_path(organization_id),
            OrgView::Members { .. } => page_to_path(Page::OrganizationManagement.id()),
            OrgView::Course { course_id, .. } => course_path(course_id),
        }
    }

    pub fn organization_id(&self) -> Option<&str> {
        match self {
            OrgView::List => None,
            OrgView::Organization { organization_id }
            | OrgView::Members { organization_id }
            | OrgView::Course {
                organization_id, ..
            } => Some(organization_id),
        }
    }
}

/// Result of a back action inside the organization area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgBack {
    /// Stay in the area, showing this view.
    To(OrgView),
    /// Leave the organization area for the main dashboard.
    Exit,
}

/// Organization-area navigation, independent of the institute flow.
///
/// Back goes course → organization, members → organization,
/// organization → list, list → exit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrgNav {
    view: OrgView,
    login: Option<OrganizationLogin>,
}

impl OrgNav {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &OrgView {
        &self.view
    }

    /// Login data for the currently open organization, if logged in.
    pub fn login(&self) -> Option<&OrganizationLogin> {
        self.login
            .as_ref()
            .filter(|l| Some(l.organization_id.as_str()) == self.view.organization_id())
    }

    /// Open an organization. Login data for a different organization is
    /// dropped.
    pub fn open_organization(&mut self, organization_id: &str) {
        if self
            .login
            .as_ref()
            .is_some_and(|l| l.organization_id != organization_id)
        {
            self.login = None;
        }
        self.view = OrgView::Organization {
            organization_id: organization_id.to_string(),
        };
    }

    /// Store login data and open its organization.
    pub fn logged_in(&mut self, login: OrganizationLogin) {
        let id = login.organization_id.clone();
        self.login = Some(login);
        self.open_organization(&id);
    }

    /// Open a course of the current organization. Ignored from the list
    /// view, where no organization is open.
    pub fn open_course(&mut self, course_id: &str) -> bool {
        match self.view.organization_id() {
            Some(org) => {
                self.view = OrgView::Course {
                    organization_id: org.to_string(),
                    course_id: course_id.to_string(),
                };
                true
            }
            None => false,
        }
    }

    /// Open the member list of the current organization.
    pub fn open_members(&mut self) -> bool {
        match self.view.organization_id() {
            Some(org) => {
                self.view = OrgView::Members {
                    organization_id: org.to_string(),
                };
                true
            }
            None => false,
        }
    }

    /// Step back one level.
    pub fn back(&mut self) -> OrgBack {
        let next = match &self.view {
            OrgView::List => None,
            OrgView::Organization { .. } => Some(OrgView::List),
            OrgView::Members { organization_id }
            | OrgView::Course {
                organization_id, ..
            } => Some(OrgView::Organization {
                organization_id: organization_id.clone(),
            }),
        };
        match next {
            Some(view) => {
                self.view = view.clone();
                OrgBack::To(view)
            }
            None => OrgBack::Exit,
        }
    }

    /// Leave the area entirely and drop the organization login.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
