//! In-process stand-in for the LMS backend. Each test spawns its own server
//! on an ephemeral port and talks to it through the real `ApiClient`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use api::{ApiClient, MemoryToken};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

pub const PASSWORD: &str = "correct horse";
pub const ENROLLMENT_KEY: &str = "open-sesame";
pub const ORG_TOKEN: &str = "org-token";
pub const STUDENT_COUNT: usize = 25;
/// Roster size of the `big` class, larger than one maximum page.
pub const BIG_CLASS_SIZE: usize = 230;

/// Requests the backend saw, for assertions.
#[derive(Default)]
pub struct Recorded {
    pub attendance: Mutex<Vec<Value>>,
    pub grades: Mutex<Vec<Value>>,
    pub homework: Mutex<Vec<Value>>,
    pub queries: Mutex<Vec<HashMap<String, String>>>,
    pub hits: Mutex<Vec<String>>,
}

impl Recorded {
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

type Shared = Arc<Recorded>;

pub struct MockBackend {
    pub base_url: String,
    pub recorded: Shared,
}

impl MockBackend {
    /// A client with no session.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone(), Arc::new(MemoryToken::new()))
    }

    /// A client logged in as the user behind `email`.
    pub async fn signed_in(&self, email: &str) -> ApiClient {
        let client = self.client();
        client.login(email, PASSWORD).await.unwrap();
        client
    }
}

pub async fn spawn_backend() -> MockBackend {
    let recorded: Shared = Arc::new(Recorded::default());
    let app = router(recorded.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    MockBackend {
        base_url: format!("http://{addr}/api/"),
        recorded,
    }
}

/// Base URL of a port nothing listens on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/institutes", get(institutes))
        .route("/api/institutes/{i}/summary", get(summary))
        .route("/api/institutes/{i}/teachers", get(teachers))
        .route("/api/institutes/{i}/classes", get(classes))
        .route("/api/institutes/{i}/classes/{c}/subjects", get(subjects))
        .route("/api/institutes/{i}/classes/{c}/students", get(students))
        .route(
            "/api/institutes/{i}/classes/{c}/attendance",
            get(class_attendance).post(mark_attendance),
        )
        .route("/api/institutes/{i}/classes/{c}/homework", post(create_homework))
        .route("/api/institutes/{i}/classes/{c}/exams/{e}/grades", post(record_grades))
        .route("/api/parents/me/children", get(children))
        .route("/api/students/{s}/institutes", get(child_institutes))
        .route("/api/students/{s}/results", get(results))
        .route("/api/organizations", get(organizations))
        .route("/api/organizations/{o}/login", post(organization_login))
        .route("/api/organizations/{o}/courses", get(courses))
        .route("/api/organizations/{o}/members", get(members))
        .with_state(state)
}

struct User {
    id: &'static str,
    name: &'static str,
    role: &'static str,
}

/// Users keyed by email. Tokens are `tok-<id>`.
fn user_by_email(email: &str) -> Option<User> {
    let user = match email {
        "student@school.test" => User { id: "u-student", name: "Sam Student", role: "Student" },
        "teacher@school.test" => User { id: "u-teacher", name: "Tess Teacher", role: "teacher" },
        "parent@school.test" => User { id: "u-parent", name: "Pat Parent", role: "Parent" },
        "admin@school.test" => User { id: "u-admin", name: "Ada Admin", role: "institute_admin" },
        "janitor@school.test" => User { id: "u-janitor", name: "Jo Janitor", role: "Janitor" },
        _ => return None,
    };
    Some(user)
}

fn user_by_token(token: &str) -> Option<User> {
    let id = token.strip_prefix("tok-")?;
    [
        "student@school.test",
        "teacher@school.test",
        "parent@school.test",
        "admin@school.test",
        "janitor@school.test",
    ]
    .into_iter()
    .filter_map(user_by_email)
    .find(|u| u.id == id)
}

fn user_json(user: &User) -> Value {
    json!({
        "id": user.id,
        "name": user.name,
        "email": format!("{}@school.test", user.id),
        "role": user.role,
        "institutes": [{ "id": "i1", "name": "North High" }],
    })
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Session calls must carry a known user token.
fn require_user(headers: &HeaderMap) -> Result<User, Response> {
    bearer(headers)
        .as_deref()
        .and_then(user_by_token)
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Missing or invalid token"))
}

fn page_params(q: &HashMap<String, String>) -> (i64, i64) {
    let page = q.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
    let limit = q.get("limit").and_then(|v| v.parse().ok()).unwrap_or(20);
    (page, limit)
}

/// Slice `items` into the requested page with a full pagination envelope.
fn paged(items: Vec<Value>, q: &HashMap<String, String>) -> Value {
    let (page, limit) = page_params(q);
    let total = items.len() as i64;
    let total_pages = (total + limit - 1) / limit;
    let data: Vec<Value> = items
        .into_iter()
        .skip(((page - 1) * limit) as usize)
        .take(limit as usize)
        .collect();
    json!({
        "data": data,
        "meta": {
            "page": page,
            "limit": limit,
            "total": total,
            "total_pages": total_pages,
            "has_next": page < total_pages,
            "has_prev": page > 1,
        }
    })
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    state.hits.lock().unwrap().push("login".into());
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    match user_by_email(email) {
        Some(user) if password == PASSWORD => Json(json!({
            "access_token": format!("tok-{}", user.id),
            "user": user_json(&user),
        }))
        .into_response(),
        _ => error(StatusCode::UNAUTHORIZED, "Invalid email or password"),
    }
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    state.hits.lock().unwrap().push("me".into());
    match require_user(&headers) {
        Ok(user) => Json(user_json(&user)).into_response(),
        Err(resp) => resp,
    }
}

async fn institutes(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
    if let Err(resp) = require_user(&headers) {
        return resp;
    }
    let items = (1..=3)
        .map(|n| json!({ "id": format!("i{n}"), "name": format!("Institute {n}") }))
        .collect();
    Json(paged(items, &q)).into_response()
}

async fn summary(Path(institute): Path<String>) -> Response {
    if institute == "garbled" {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }
    Json(json!({ "students": 412, "teachers": 31, "classes": 18, "attendance_rate": 93.4 }))
        .into_response()
}

async fn teachers(headers: HeaderMap) -> Response {
    match require_user(&headers) {
        Ok(user) if user.role == "institute_admin" => Json(json!([
            { "id": "t1", "name": "Tess Teacher", "subjects": ["Maths"] }
        ]))
        .into_response(),
        Ok(_) => error(StatusCode::FORBIDDEN, "Only institute admins can list teachers"),
        Err(resp) => resp,
    }
}

/// `{ data }` wrapper without pagination metadata.
async fn classes(Path(_institute): Path<String>) -> Response {
    Json(json!({
        "data": [
            { "id": "c1", "name": "7A", "grade": "7", "section": "A" },
            { "id": "c2", "name": "7B", "grade": "7", "section": "B" },
        ]
    }))
    .into_response()
}

/// Bare array.
async fn subjects(Path((_i, _c)): Path<(String, String)>) -> Response {
    Json(json!([
        { "id": "s1", "name": "Maths", "code": "MA7" },
        { "id": "s2", "name": "History" },
    ]))
    .into_response()
}

async fn students(
    State(state): State<Shared>,
    Path((_i, class)): Path<(String, String)>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let (page, _) = page_params(&q);
    state.hits.lock().unwrap().push(format!("students:{class}:{page}"));
    let count = if class == "big" { BIG_CLASS_SIZE } else { STUDENT_COUNT };
    let items = (1..=count)
        .map(|n| {
            json!({
                "id": format!("{class}-st{n}"),
                "name": format!("Student {n}"),
                "student_code": format!("STU-{n:03}"),
            })
        })
        .collect();
    Json(paged(items, &q)).into_response()
}

async fn class_attendance(
    State(state): State<Shared>,
    Path((_i, class)): Path<(String, String)>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let date = q.get("date").cloned().unwrap_or_default();
    state.queries.lock().unwrap().push(q);
    Json(json!([
        { "student_id": format!("{class}-st1"), "student_name": "Student 1", "date": date, "status": "absent" },
        { "student_id": format!("{class}-st2"), "student_name": "Student 2", "date": date, "status": "late" },
    ]))
    .into_response()
}

async fn mark_attendance(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = require_user(&headers) {
        return resp;
    }
    state.attendance.lock().unwrap().push(body);
    StatusCode::NO_CONTENT.into_response()
}

async fn create_homework(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if body["title"].as_str().unwrap_or_default().trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "Validation failed", "errors": { "title": "Title is required" } })),
        )
            .into_response();
    }
    state.homework.lock().unwrap().push(body.clone());
    Json(json!({
        "id": "hw-1",
        "title": body["title"],
        "description": body["description"],
        "due_date": body["due_date"],
    }))
    .into_response()
}

async fn record_grades(
    State(state): State<Shared>,
    Path((_i, _c, exam)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> Response {
    state
        .grades
        .lock()
        .unwrap()
        .push(json!({ "exam": exam, "body": body }));
    StatusCode::NO_CONTENT.into_response()
}

async fn children(headers: HeaderMap) -> Response {
    match require_user(&headers) {
        Ok(user) if user.role == "Parent" => Json(json!([
            { "id": "k1", "name": "Kim", "grade": "5" },
            { "id": "k2", "name": "Lee", "grade": "8" },
        ]))
        .into_response(),
        Ok(_) => error(StatusCode::FORBIDDEN, "Not a parent account"),
        Err(resp) => resp,
    }
}

async fn child_institutes(
    Path(student): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let items = vec![json!({ "id": format!("i-{student}"), "name": "Lakeside Primary" })];
    Json(paged(items, &q)).into_response()
}

async fn results(
    State(state): State<Shared>,
    Path(student): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    state.hits.lock().unwrap().push(format!("results:{student}"));
    state.queries.lock().unwrap().push(q.clone());
    let items = vec![json!({
        "exam_id": "e1",
        "exam_title": format!("Midterm for {student}"),
        "marks": 42.0,
        "max_marks": 50.0,
        "grade": "A",
    })];
    Json(paged(items, &q)).into_response()
}

async fn organizations(Query(q): Query<HashMap<String, String>>) -> Response {
    let items = vec![
        json!({ "id": "public", "name": "Chess Club", "is_public": true }),
        json!({ "id": "private", "name": "Robotics Guild", "description": "Invite only", "is_public": false }),
    ];
    Json(paged(items, &q)).into_response()
}

async fn organization_login(Path(org): Path<String>, Json(body): Json<Value>) -> Response {
    let key = body.get("enrollment_key").and_then(Value::as_str);
    if org == "private" && key != Some(ENROLLMENT_KEY) {
        return error(StatusCode::FORBIDDEN, "Invalid enrollment key");
    }
    Json(json!({ "access_token": ORG_TOKEN, "role": "moderator" })).into_response()
}

/// Private organizations only answer to the organization token.
fn require_org_access(org: &str, headers: &HeaderMap) -> Result<(), Response> {
    if org == "private" && bearer(headers).as_deref() != Some(ORG_TOKEN) {
        return Err(error(StatusCode::UNAUTHORIZED, "Organization login required"));
    }
    Ok(())
}

async fn courses(
    Path(org): Path<String>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = require_org_access(&org, &headers) {
        return resp;
    }
    let items = vec![json!({ "id": format!("{org}-course"), "title": "Intro", "lecture_count": 4 })];
    Json(paged(items, &q)).into_response()
}

async fn members(Path(org): Path<String>, headers: HeaderMap) -> Response {
    if let Err(resp) = require_org_access(&org, &headers) {
        return resp;
    }
    Json(json!({
        "data": [
            { "id": "m1", "name": "Mo", "role": "president", "verified": true },
            { "id": "m2", "name": "Ne", "role": "member" },
        ]
    }))
    .into_response()
}
