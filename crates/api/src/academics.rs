//! Class- and student-scoped academic endpoints.

use shared_types::{
    AppError, AttendanceRecord, CreateHomeworkRequest, Exam, ExamResult, Homework, Lecture,
    ListQuery, MarkAttendanceRequest, PaginatedResponse, RecordGradesRequest, Student, Teacher,
    MAX_PAGE_SIZE,
};

use crate::client::{seg, ApiClient};

/// Upper bound on roster pages fetched for one class.
const MAX_ROSTER_PAGES: i64 = 50;

/// Identifies whose records a student-scoped call reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentScope<'a> {
    /// The signed-in student.
    Me,
    /// A parent's child.
    Child(&'a str),
}

impl StudentScope<'_> {
    fn segment(&self) -> String {
        match self {
            StudentScope::Me => "me".to_string(),
            StudentScope::Child(id) => seg(id),
        }
    }
}

/// A class within an institute; most staff endpoints hang off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassRef<'a> {
    pub institute_id: &'a str,
    pub class_id: &'a str,
}

impl ClassRef<'_> {
    fn path(&self, tail: &str) -> String {
        format!(
            "institutes/{}/classes/{}/{}",
            seg(self.institute_id),
            seg(self.class_id),
            tail
        )
    }
}

fn subject_filter(subject_id: Option<&str>) -> Vec<(&'static str, String)> {
    subject_id
        .map(|s| vec![("subjectId", s.to_string())])
        .unwrap_or_default()
}

impl ApiClient {
    pub async fn list_students(
        &self,
        class: ClassRef<'_>,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Student>, AppError> {
        self.get_list(&class.path("students"), list, &[]).await
    }

    /// Every student of a class, following `has_next` across pages.
    pub async fn class_roster(&self, class: ClassRef<'_>) -> Result<Vec<Student>, AppError> {
        let mut students = Vec::new();
        let mut page = 1;
        loop {
            let batch = self
                .list_students(class, ListQuery::new(Some(page), Some(MAX_PAGE_SIZE)))
                .await?;
            let done = !batch.meta.has_next || batch.data.is_empty();
            students.extend(batch.data);
            if done || page >= MAX_ROSTER_PAGES {
                break;
            }
            page += 1;
        }
        tracing::debug!(class = class.class_id, students = students.len(), pages = page, "roster loaded");
        Ok(students)
    }

    pub async fn list_teachers(
        &self,
        institute_id: &str,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Teacher>, AppError> {
        let path = format!("institutes/{}/teachers", seg(institute_id));
        self.get_list(&path, list, &[]).await
    }

    /// Attendance recorded for a class on one date (`YYYY-MM-DD`).
    pub async fn class_attendance(
        &self,
        class: ClassRef<'_>,
        date: &str,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let page: PaginatedResponse<AttendanceRecord> = self
            .get_list(
                &class.path("attendance"),
                ListQuery::new(Some(1), Some(shared_types::MAX_PAGE_SIZE)),
                &[("date", date.to_string())],
            )
            .await?;
        Ok(page.data)
    }

    /// Submit one batch of attendance marks.
    pub async fn mark_attendance(
        &self,
        class: ClassRef<'_>,
        request: &MarkAttendanceRequest,
    ) -> Result<(), AppError> {
        if request.marks.is_empty() {
            return Err(AppError::bad_request("No students marked"));
        }
        let builder = self
            .request(reqwest::Method::POST, &class.path("attendance"))
            .json(request);
        self.send_raw(builder).await?;
        tracing::info!(count = request.marks.len(), date = %request.date, "attendance submitted");
        Ok(())
    }

    pub async fn list_homework(
        &self,
        class: ClassRef<'_>,
        subject_id: Option<&str>,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Homework>, AppError> {
        self.get_list(&class.path("homework"), list, &subject_filter(subject_id))
            .await
    }

    pub async fn create_homework(
        &self,
        class: ClassRef<'_>,
        request: &CreateHomeworkRequest,
    ) -> Result<Homework, AppError> {
        self.post(&class.path("homework"), request).await
    }

    pub async fn list_exams(
        &self,
        class: ClassRef<'_>,
        subject_id: Option<&str>,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Exam>, AppError> {
        self.get_list(&class.path("exams"), list, &subject_filter(subject_id))
            .await
    }

    pub async fn list_lectures(
        &self,
        class: ClassRef<'_>,
        subject_id: &str,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Lecture>, AppError> {
        let path = class.path(&format!("subjects/{}/lectures", seg(subject_id)));
        self.get_list(&path, list, &[]).await
    }

    /// Record marks for one exam. Entries outside `0..=max_marks` are
    /// rejected before anything is sent.
    pub async fn record_grades(
        &self,
        class: ClassRef<'_>,
        exam: &Exam,
        request: &RecordGradesRequest,
    ) -> Result<(), AppError> {
        let bad = request.out_of_range(exam.max_marks);
        if !bad.is_empty() {
            let field_errors = bad
                .into_iter()
                .map(|id| (id, format!("Marks must be between 0 and {}", exam.max_marks)))
                .collect();
            return Err(AppError::validation("Some marks are out of range", field_errors));
        }
        let path = class.path(&format!("exams/{}/grades", seg(&exam.id)));
        let builder = self.request(reqwest::Method::POST, &path).json(request);
        self.send_raw(builder).await?;
        Ok(())
    }

    pub async fn student_attendance(
        &self,
        student: StudentScope<'_>,
        institute_id: &str,
        list: ListQuery,
    ) -> Result<PaginatedResponse<AttendanceRecord>, AppError> {
        self.student_list(student, "attendance", institute_id, list).await
    }

    pub async fn student_results(
        &self,
        student: StudentScope<'_>,
        institute_id: &str,
        list: ListQuery,
    ) -> Result<PaginatedResponse<ExamResult>, AppError> {
        self.student_list(student, "results", institute_id, list).await
    }

    pub async fn student_homework(
        &self,
        student: StudentScope<'_>,
        institute_id: &str,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Homework>, AppError> {
        self.student_list(student, "homework", institute_id, list).await
    }

    pub async fn student_exams(
        &self,
        student: StudentScope<'_>,
        institute_id: &str,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Exam>, AppError> {
        self.student_list(student, "exams", institute_id, list).await
    }

    pub async fn student_lectures(
        &self,
        student: StudentScope<'_>,
        institute_id: &str,
        list: ListQuery,
    ) -> Result<PaginatedResponse<Lecture>, AppError> {
        self.student_list(student, "lectures", institute_id, list).await
    }

    async fn student_list<T: serde::de::DeserializeOwned>(
        &self,
        student: StudentScope<'_>,
        tail: &str,
        institute_id: &str,
        list: ListQuery,
    ) -> Result<PaginatedResponse<T>, AppError> {
        let path = format!("students/{}/{}", student.segment(), tail);
        self.get_list(&path, list, &[("instituteId", institute_id.to_string())])
            .await
    }
}
