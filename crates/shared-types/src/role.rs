use serde::{Deserialize, Serialize};
use std::fmt;

/// Session role. Fixed at login for the lifetime of the session.
///
/// - `Student`: browses their own enrollment-scoped screens.
/// - `Teacher`: works inside an institute → class → subject hierarchy.
/// - `Parent`: works through a selected child.
/// - `InstituteAdmin`: teacher hierarchy plus institute management pages.
/// - `AttendanceMarker`: limited to attendance pages of a selected class.
/// - `OrganizationManager`: lives entirely in the organization area.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Teacher,
    Parent,
    InstituteAdmin,
    AttendanceMarker,
    OrganizationManager,
}

/// All roles in display order.
pub const ALL_ROLES: &[Role] = &[
    Role::Student,
    Role::Teacher,
    Role::Parent,
    Role::InstituteAdmin,
    Role::AttendanceMarker,
    Role::OrganizationManager,
];

impl Role {
    /// Parse a backend role string. Accepts the wire names plus snake/kebab
    /// case spellings. Unknown values return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "student" => Some(Role::Student),
            "teacher" => Some(Role::Teacher),
            "parent" => Some(Role::Parent),
            "instituteadmin" => Some(Role::InstituteAdmin),
            "attendancemarker" => Some(Role::AttendanceMarker),
            "organizationmanager" => Some(Role::OrganizationManager),
            _ => None,
        }
    }

    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Parent => "Parent",
            Role::InstituteAdmin => "InstituteAdmin",
            Role::AttendanceMarker => "AttendanceMarker",
            Role::OrganizationManager => "OrganizationManager",
        }
    }

    /// Human-readable label for the sidebar footer.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Parent => "Parent",
            Role::InstituteAdmin => "Institute Admin",
            Role::AttendanceMarker => "Attendance Marker",
            Role::OrganizationManager => "Organization Manager",
        }
    }

    /// Roles that scope their work by institute → class → subject.
    pub fn uses_class_hierarchy(&self) -> bool {
        matches!(
            self,
            Role::Teacher | Role::InstituteAdmin | Role::AttendanceMarker
        )
    }

    /// Whether this role may create or edit records (homework, grades,
    /// attendance) rather than only view them.
    pub fn can_manage(&self) -> bool {
        matches!(self, Role::Teacher | Role::InstituteAdmin)
    }

    /// Whether this role may submit attendance marks.
    pub fn can_mark_attendance(&self) -> bool {
        self.uses_class_hierarchy()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
