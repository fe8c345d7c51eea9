//! Grade recording and homework creation.

use api::ClassRef;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, CreateHomeworkRequest, Exam, GradeEntry, RecordGradesRequest};

use crate::common::spawn_backend;

const CLASS: ClassRef<'static> = ClassRef {
    institute_id: "i1",
    class_id: "c1",
};

fn midterm() -> Exam {
    Exam {
        id: "e1".into(),
        title: "Midterm".into(),
        date: None,
        max_marks: 50.0,
        subject_id: None,
    }
}

fn grades(entries: &[(&str, f64)]) -> RecordGradesRequest {
    RecordGradesRequest {
        grades: entries
            .iter()
            .map(|(id, marks)| GradeEntry {
                student_id: id.to_string(),
                marks: *marks,
            })
            .collect(),
    }
}

#[tokio::test]
async fn grades_within_range_are_posted() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;

    client
        .record_grades(CLASS, &midterm(), &grades(&[("st1", 0.0), ("st2", 50.0)]))
        .await
        .unwrap();

    let posted = backend.recorded.grades.lock().unwrap().clone();
    assert_eq!(
        posted,
        vec![json!({
            "exam": "e1",
            "body": { "grades": [
                { "student_id": "st1", "marks": 0.0 },
                { "student_id": "st2", "marks": 50.0 },
            ]}
        })]
    );
}

#[tokio::test]
async fn out_of_range_marks_never_leave_the_client() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;

    let err = client
        .record_grades(
            CLASS,
            &midterm(),
            &grades(&[("st1", 51.0), ("st2", 20.0), ("st3", -1.0)]),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    let mut flagged: Vec<_> = err.field_errors.keys().cloned().collect();
    flagged.sort();
    assert_eq!(flagged, vec!["st1".to_string(), "st3".to_string()]);
    assert_eq!(err.field_errors["st1"], "Marks must be between 0 and 50");
    assert!(backend.recorded.grades.lock().unwrap().is_empty());
}

#[tokio::test]
async fn homework_is_created_for_the_subject() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;

    let request = CreateHomeworkRequest {
        title: "Fractions worksheet".into(),
        description: "Questions 1-10".into(),
        due_date: "2026-03-09".into(),
        subject_id: Some("s1".into()),
    };
    let created = client.create_homework(CLASS, &request).await.unwrap();
    assert_eq!(created.title, "Fractions worksheet");
    assert_eq!(created.due_date, "2026-03-09");

    let posted = backend.recorded.homework.lock().unwrap().clone();
    assert_eq!(posted[0]["subject_id"], "s1");
}

#[tokio::test]
async fn backend_validation_errors_keep_their_fields() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;

    let request = CreateHomeworkRequest {
        title: "   ".into(),
        description: String::new(),
        due_date: "2026-03-09".into(),
        subject_id: None,
    };
    let err = client.create_homework(CLASS, &request).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert_eq!(err.message, "Validation failed");
    assert_eq!(
        err.field_errors.get("title").map(String::as_str),
        Some("Title is required")
    );
}
