use serde::{Deserialize, Serialize};

use crate::role::Role;

/// A top-level tenant in the main hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Institute {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// A class inside an institute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Class {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// A subject taught in a class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// A student linked to a parent account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Child {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// A tenant in the parallel organization hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Authenticated user info for the current session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Institutes the user belongs to, as returned at login.
    #[serde(default)]
    pub institutes: Vec<Institute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl AuthUser {
    /// Up to two initials for the avatar fallback.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: AuthUser,
}

/// Login data for the organization area, obtained by logging in to one
/// organization. Independent of the main institute session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrganizationLogin {
    pub organization_id: String,
    pub token: String,
    /// Role inside the organization ("member", "moderator", "president").
    #[serde(default = "default_member_role")]
    pub member_role: String,
}

fn default_member_role() -> String {
    "member".to_string()
}

impl OrganizationLogin {
    /// Whether the member may manage courses and members.
    pub fn can_manage(&self) -> bool {
        matches!(self.member_role.as_str(), "president" | "moderator" | "admin")
    }
}
