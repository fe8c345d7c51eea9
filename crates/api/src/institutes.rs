//! Tenant hierarchy endpoints: institutes, classes, subjects, and a
//! parent's children.

use shared_types::{
    AppError, Child, Class, Institute, InstituteSummary, ListQuery, PaginatedResponse, Subject,
};

use crate::client::{seg, ApiClient};

impl ApiClient {
    pub async fn list_institutes(
        &self,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Institute>, AppError> {
        self.get_list("institutes", list, &[]).await
    }

    pub async fn list_classes(
        &self,
        institute_id: &str,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Class>, AppError> {
        let path = format!("institutes/{}/classes", seg(institute_id));
        self.get_list(&path, list, &[]).await
    }

    pub async fn list_subjects(
        &self,
        institute_id: &str,
        class_id: &str,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Subject>, AppError> {
        let path = format!(
            "institutes/{}/classes/{}/subjects",
            seg(institute_id),
            seg(class_id)
        );
        self.get_list(&path, list, &[]).await
    }

    /// Dashboard counts for one institute.
    pub async fn institute_summary(&self, institute_id: &str) -> Result<InstituteSummary, AppError> {
        let path = format!("institutes/{}/summary", seg(institute_id));
        self.get(&path, &[]).await
    }

    /// Children linked to the signed-in parent.
    pub async fn list_children(&self) -> Result<PaginatedResponse<Child>, AppError> {
        self.get_list("parents/me/children", ListQuery::new(Some(1), Some(100)), &[])
            .await
    }

    /// Institutes a child is enrolled in; what a parent picks from.
    pub async fn child_institutes(
        &self,
        child_id: &str,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Institute>, AppError> {
        let path = format!("students/{}/institutes", seg(child_id));
        self.get_list(&path, list, &[]).await
    }
}
