use serde::{Deserialize, Serialize};

/// A course offered by an organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub lecture_count: i64,
}

/// A member of an organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub verified: bool,
}

/// Request body for logging in to an organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrganizationLoginRequest {
    /// Enrollment key for private organizations; `None` for public ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_key: Option<String>,
}
