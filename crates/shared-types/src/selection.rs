use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Child, Class, Institute, Organization, Subject};

/// A scoping entity the navigator may require before showing a page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Prerequisite {
    Child,
    Institute,
    Class,
    Subject,
    Organization,
}

impl Prerequisite {
    pub fn label(&self) -> &'static str {
        match self {
            Prerequisite::Child => "child",
            Prerequisite::Institute => "institute",
            Prerequisite::Class => "class",
            Prerequisite::Subject => "subject",
            Prerequisite::Organization => "organization",
        }
    }
}

/// Rejected selection transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// A class was picked before an institute.
    ClassWithoutInstitute,
    /// A subject was picked before a class.
    SubjectWithoutClass,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::ClassWithoutInstitute => {
                write!(f, "select an institute before selecting a class")
            }
            SelectionError::SubjectWithoutClass => {
                write!(f, "select a class before selecting a subject")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// The scoping entities chosen for the session.
///
/// Invariant: `subject ⇒ class ⇒ institute`. Fields are private and every
/// setter preserves the invariant; deserialized snapshots are normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SelectionSnapshot")]
pub struct Selection {
    institute: Option<Institute>,
    class: Option<Class>,
    subject: Option<Subject>,
    child: Option<Child>,
    organization: Option<Organization>,
}

/// Unchecked wire form of [`Selection`].
#[derive(Deserialize)]
struct SelectionSnapshot {
    #[serde(default)]
    institute: Option<Institute>,
    #[serde(default)]
    class: Option<Class>,
    #[serde(default)]
    subject: Option<Subject>,
    #[serde(default)]
    child: Option<Child>,
    #[serde(default)]
    organization: Option<Organization>,
}

impl From<SelectionSnapshot> for Selection {
    fn from(s: SelectionSnapshot) -> Self {
        let class = s.class.filter(|_| s.institute.is_some());
        let subject = s.subject.filter(|_| class.is_some());
        Self {
            institute: s.institute,
            class,
            subject,
            child: s.child,
            organization: s.organization,
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn institute(&self) -> Option<&Institute> {
        self.institute.as_ref()
    }

    pub fn class(&self) -> Option<&Class> {
        self.class.as_ref()
    }

    pub fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }

    pub fn child(&self) -> Option<&Child> {
        self.child.as_ref()
    }

    pub fn organization(&self) -> Option<&Organization> {
        self.organization.as_ref()
    }

    pub fn institute_id(&self) -> Option<&str> {
        self.institute.as_ref().map(|i| i.id.as_str())
    }

    pub fn class_id(&self) -> Option<&str> {
        self.class.as_ref().map(|c| c.id.as_str())
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.subject.as_ref().map(|s| s.id.as_str())
    }

    pub fn child_id(&self) -> Option<&str> {
        self.child.as_ref().map(|c| c.id.as_str())
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.organization.as_ref().map(|o| o.id.as_str())
    }

    /// Whether the given prerequisite is satisfied.
    pub fn has(&self, prerequisite: Prerequisite) -> bool {
        match prerequisite {
            Prerequisite::Child => self.child.is_some(),
            Prerequisite::Institute => self.institute.is_some(),
            Prerequisite::Class => self.class.is_some(),
            Prerequisite::Subject => self.subject.is_some(),
            Prerequisite::Organization => self.organization.is_some(),
        }
    }

    /// Select an institute. Picking a different institute clears class and
    /// subject; re-picking the same one keeps them.
    pub fn select_institute(&mut self, institute: Institute) {
        if self.institute_id() != Some(institute.id.as_str()) {
            self.class = None;
            self.subject = None;
        }
        self.institute = Some(institute);
    }

    /// Select a class inside the selected institute. A different class
    /// clears the subject.
    pub fn select_class(&mut self, class: Class) -> Result<(), SelectionError> {
        if self.institute.is_none() {
            return Err(SelectionError::ClassWithoutInstitute);
        }
        if self.class_id() != Some(class.id.as_str()) {
            self.subject = None;
        }
        self.class = Some(class);
        Ok(())
    }

    /// Select a subject inside the selected class.
    pub fn select_subject(&mut self, subject: Subject) -> Result<(), SelectionError> {
        if self.class.is_none() {
            return Err(SelectionError::SubjectWithoutClass);
        }
        self.subject = Some(subject);
        Ok(())
    }

    /// Select a child. For parents the institute is keyed off the child, so
    /// switching to a different child clears the institute hierarchy.
    pub fn select_child(&mut self, child: Child) {
        if self.child_id() != Some(child.id.as_str()) {
            self.clear_institute_hierarchy();
        }
        self.child = Some(child);
    }

    pub fn select_organization(&mut self, organization: Organization) {
        self.organization = Some(organization);
    }

    /// Clear one level and everything that depends on it.
    pub fn clear(&mut self, level: Prerequisite) {
        match level {
            Prerequisite::Child => {
                self.child = None;
                self.clear_institute_hierarchy();
            }
            Prerequisite::Institute => self.clear_institute_hierarchy(),
            Prerequisite::Class => {
                self.class = None;
                self.subject = None;
            }
            Prerequisite::Subject => self.subject = None,
            Prerequisite::Organization => self.organization = None,
        }
    }

    /// Clear everything (logout).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn clear_institute_hierarchy(&mut self) {
        self.institute = None;
        self.class = None;
        self.subject = None;
    }

    /// Human-readable breadcrumb of the current selection, e.g.
    /// `North High › 7-B › Physics`.
    pub fn breadcrumb(&self) -> String {
        [
            self.child.as_ref().map(|c| c.name.as_str()),
            self.institute.as_ref().map(|i| i.name.as_str()),
            self.class.as_ref().map(|c| c.name.as_str()),
            self.subject.as_ref().map(|s| s.name.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" › ")
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn institute(id: &str) -> Institute {
        Institute {
            id: id.to_string(),
            name: format!("Institute {id}"),
            code: None,
            logo_url: None,
        }
    }

    pub fn class(id: &str) -> Class {
        Class {
            id: id.to_string(),
            name: format!("Class {id}"),
            grade: None,
            section: None,
        }
    }

    pub fn subject(id: &str) -> Subject {
        Subject {
            id: id.to_string(),
            name: format!("Subject {id}"),
            code: None,
        }
    }

    pub fn child(id: &str) -> Child {
        Child {
            id: id.to_string(),
            name: format!("Child {id}"),
            grade: None,
        }
    }

    pub fn organization(id: &str) -> Organization {
        Organization {
            id: id.to_string(),
            name: format!("Org {id}"),
            description: None,
            is_public: true,
        }
    }
}
