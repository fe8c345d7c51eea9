//! Organization-area endpoints. Calls inside an organization authenticate
//! with the organization login token when one is held.

use reqwest::Method;
use serde::Deserialize;
use shared_types::{
    AppError, Course, Lecture, ListQuery, Member, Organization, OrganizationLogin,
    OrganizationLoginRequest, PaginatedResponse,
};

use crate::client::{seg, ApiClient};

#[derive(Deserialize)]
struct WireOrgLogin {
    #[serde(alias = "access_token")]
    token: String,
    #[serde(default)]
    role: Option<String>,
}

impl ApiClient {
    pub async fn list_organizations(
        &self,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Organization>, AppError> {
        self.get_list("organizations", list, &[]).await
    }

    /// Log in to one organization. Private organizations need an
    /// enrollment key.
    pub async fn organization_login(
        &self,
        organization_id: &str,
        enrollment_key: Option<&str>,
    ) -> Result<OrganizationLogin, AppError> {
        let body = OrganizationLoginRequest {
            enrollment_key: enrollment_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from),
        };
        let path = format!("organizations/{}/login", seg(organization_id));
        let wire: WireOrgLogin = self.post(&path, &body).await?;
        tracing::info!(organization_id, "organization login succeeded");
        Ok(OrganizationLogin {
            organization_id: organization_id.to_string(),
            token: wire.token,
            member_role: wire.role.unwrap_or_else(|| "member".to_string()),
        })
    }

    pub async fn list_courses(
        &self,
        organization_id: &str,
        login: Option<&OrganizationLogin>,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Course>, AppError> {
        let path = format!("organizations/{}/courses", seg(organization_id));
        self.org_list(&path, login, list).await
    }

    pub async fn list_course_lectures(
        &self,
        organization_id: &str,
        course_id: &str,
        login: Option<&OrganizationLogin>,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Lecture>, AppError> {
        let path = format!(
            "organizations/{}/courses/{}/lectures",
            seg(organization_id),
            seg(course_id)
        );
        self.org_list(&path, login, list).await
    }

    pub async fn list_members(
        &self,
        organization_id: &str,
        login: Option<&OrganizationLogin>,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Member>, AppError> {
        let path = format!("organizations/{}/members", seg(organization_id));
        self.org_list(&path, login, list).await
    }

    async fn org_list<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        login: Option<&OrganizationLogin>,
        list: ListQuery,
    ) -> Result<PaginatedResponse<T>, AppError> {
        let query = [
            ("page", list.page.to_string()),
            ("limit", list.limit.to_string()),
        ];
        let builder = self
            .request_with_token(Method::GET, path, login.map(|l| l.token.as_str()))
            .query(&query);
        let body: crate::client::ListBody<T> = self.send(builder).await?;
        Ok(body.into_page(list))
    }
}
