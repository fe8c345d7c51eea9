use api::{ClassRef, RequestEpoch};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{
    attendance_rate, AppErrorKind, AttendanceMark, AttendanceStatus, MarkAttendanceRequest,
};

use crate::common::spawn_backend;

const CLASS: ClassRef<'static> = ClassRef {
    institute_id: "i1",
    class_id: "c1",
};

#[tokio::test]
async fn recorded_attendance_is_fetched_for_the_date() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;

    let records = client.class_attendance(CLASS, "2026-03-02").await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].status, AttendanceStatus::Absent);
    assert_eq!(records[1].status, AttendanceStatus::Late);
    assert_eq!(records[0].date, "2026-03-02");
    assert_eq!(attendance_rate(&records), Some(50.0));

    let queries = backend.recorded.queries.lock().unwrap().clone();
    assert_eq!(
        queries[0].get("date").map(String::as_str),
        Some("2026-03-02")
    );
}

#[tokio::test]
async fn marks_are_posted_as_one_batch() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;

    let request = MarkAttendanceRequest {
        date: "2026-03-02".into(),
        subject_id: None,
        marks: vec![
            AttendanceMark {
                student_id: "c1-st1".into(),
                status: AttendanceStatus::Present,
            },
            AttendanceMark {
                student_id: "c1-st2".into(),
                status: AttendanceStatus::Excused,
            },
        ],
    };
    client.mark_attendance(CLASS, &request).await.unwrap();

    let posted = backend.recorded.attendance.lock().unwrap().clone();
    assert_eq!(
        posted,
        vec![json!({
            "date": "2026-03-02",
            "marks": [
                { "student_id": "c1-st1", "status": "present" },
                { "student_id": "c1-st2", "status": "excused" },
            ]
        })]
    );
}

#[tokio::test]
async fn empty_batch_is_refused_locally() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;

    let request = MarkAttendanceRequest {
        date: "2026-03-02".into(),
        subject_id: None,
        marks: vec![],
    };
    let err = client.mark_attendance(CLASS, &request).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::BadRequest);
    assert!(backend.recorded.attendance.lock().unwrap().is_empty());
}

#[tokio::test]
async fn signed_out_marking_is_unauthorized() {
    let backend = spawn_backend().await;
    let request = MarkAttendanceRequest {
        date: "2026-03-02".into(),
        subject_id: None,
        marks: vec![AttendanceMark {
            student_id: "c1-st1".into(),
            status: AttendanceStatus::Absent,
        }],
    };
    let err = backend
        .client()
        .mark_attendance(CLASS, &request)
        .await
        .unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Unauthorized);
}

#[tokio::test]
async fn a_newer_load_discards_the_older_result() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;
    let epoch = RequestEpoch::new();

    let monday = epoch.begin();
    let tuesday = epoch.begin();
    let (old, new) = tokio::join!(
        client.class_attendance(CLASS, "2026-03-02"),
        client.class_attendance(CLASS, "2026-03-03"),
    );

    assert_eq!(monday.accept(old.unwrap()), None);
    let shown = tuesday.accept(new.unwrap()).unwrap();
    assert_eq!(shown[0].date, "2026-03-03");
}
