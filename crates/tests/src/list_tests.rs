//! List endpoints in all three body shapes, plus paging parameters.

use api::{ClassRef, StudentScope};
use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, ListQuery};

use crate::common::{spawn_backend, BIG_CLASS_SIZE, STUDENT_COUNT};

const CLASS: ClassRef<'static> = ClassRef {
    institute_id: "i1",
    class_id: "c1",
};

#[tokio::test]
async fn paginated_envelope_is_passed_through() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;

    let page = client
        .list_students(CLASS, ListQuery::new(Some(2), Some(10)))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 10);
    assert_eq!(page.data[0].name, "Student 11");
    assert_eq!(page.data[0].student_code.as_deref(), Some("STU-011"));
    assert_eq!(page.meta.total, STUDENT_COUNT as i64);
    assert_eq!(page.meta.total_pages, 3);
    assert!(page.meta.has_next);
    assert!(page.meta.has_prev);
}

#[tokio::test]
async fn last_page_has_no_next() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;

    let page = client
        .list_students(CLASS, ListQuery::new(Some(3), Some(10)))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 5);
    assert!(!page.meta.has_next);
}

#[tokio::test]
async fn wrapped_data_gets_synthesized_meta() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;

    let classes = client.list_classes("i1", client.first_page()).await.unwrap();
    let names: Vec<_> = classes.data.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["7A", "7B"]);
    assert_eq!(classes.meta.page, 1);
    assert_eq!(classes.meta.total, 2);
    assert!(!classes.meta.has_next);
}

#[tokio::test]
async fn bare_array_is_accepted() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;

    let subjects = client
        .list_subjects("i1", "c1", client.first_page())
        .await
        .unwrap();
    assert_eq!(subjects.data.len(), 2);
    assert_eq!(subjects.data[0].code.as_deref(), Some("MA7"));
    assert_eq!(subjects.data[1].code, None);
}

#[tokio::test]
async fn out_of_range_page_is_clamped_before_sending() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;

    let page = client
        .list_students(CLASS, ListQuery::new(Some(0), Some(10_000)))
        .await
        .unwrap();
    assert_eq!(page.meta.page, 1);
    assert_eq!(page.meta.limit, shared_types::MAX_PAGE_SIZE);
    assert_eq!(page.data.len(), STUDENT_COUNT);
}

#[tokio::test]
async fn child_scope_reads_that_childs_records() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("parent@school.test").await;

    let results = client
        .student_results(StudentScope::Child("k2"), "i-k2", client.first_page())
        .await
        .unwrap();
    assert_eq!(results.data[0].exam_title, "Midterm for k2");
    assert_eq!(results.data[0].percentage(), Some(84.0));

    let queries = backend.recorded.queries.lock().unwrap().clone();
    let last = queries.last().unwrap();
    assert_eq!(last.get("instituteId").map(String::as_str), Some("i-k2"));
    assert_eq!(last.get("page").map(String::as_str), Some("1"));
}

#[tokio::test]
async fn students_read_their_own_records_through_me() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("student@school.test").await;

    client
        .student_results(StudentScope::Me, "i1", client.first_page())
        .await
        .unwrap();
    assert!(backend.recorded.hits().contains(&"results:me".to_string()));
}

#[tokio::test]
async fn parents_get_their_children_in_one_page() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("parent@school.test").await;

    let children = client.list_children().await.unwrap();
    assert_eq!(children.data.len(), 2);
    assert_eq!(children.meta.limit, 100);

    let student = backend.signed_in("student@school.test").await;
    let err = student.list_children().await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Forbidden);
    assert_eq!(err.message, "Not a parent account");
}

#[tokio::test]
async fn teacher_list_is_admin_only() {
    let backend = spawn_backend().await;

    let admin = backend.signed_in("admin@school.test").await;
    let teachers = admin.list_teachers("i1", admin.first_page()).await.unwrap();
    assert_eq!(teachers.data[0].subjects, vec!["Maths".to_string()]);

    let teacher = backend.signed_in("teacher@school.test").await;
    let err = teacher.list_teachers("i1", teacher.first_page()).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Forbidden);
}

fn student_pages(hits: Vec<String>) -> Vec<String> {
    hits.into_iter().filter(|h| h.starts_with("students:")).collect()
}

#[tokio::test]
async fn roster_follows_every_page_of_a_large_class() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;
    let big = ClassRef {
        institute_id: "i1",
        class_id: "big",
    };

    let roster = client.class_roster(big).await.unwrap();
    assert_eq!(roster.len(), BIG_CLASS_SIZE);
    assert_eq!(roster[100].id, "big-st101");
    assert_eq!(roster.last().map(|s| s.id.as_str()), Some("big-st230"));
    assert_eq!(
        student_pages(backend.recorded.hits()),
        vec!["students:big:1", "students:big:2", "students:big:3"]
    );
}

#[tokio::test]
async fn small_roster_is_a_single_request() {
    let backend = spawn_backend().await;
    let client = backend.signed_in("teacher@school.test").await;

    let roster = client.class_roster(CLASS).await.unwrap();
    assert_eq!(roster.len(), STUDENT_COUNT);
    assert_eq!(student_pages(backend.recorded.hits()), vec!["students:c1:1"]);
}
