#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use classbook::router::init_router;
use classbook::state::AppState;
use classbook_config::{CorsConfig, JwtConfig};
use classbook_core::hash_password;
use classbook_models::{ClassId, StudentId, SubjectId, TeacherId};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::{PgPool, Postgres, Transaction};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const TEST_PASSWORD: &str = "testpass123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604800,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    );
    init_router(state)
}

pub struct TestTeacher {
    pub id: TeacherId,
    pub username: String,
    pub email: String,
    pub password: String,
}

pub fn generate_unique_username() -> String {
    format!("teacher-{}", Uuid::new_v4().simple())
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4().simple())
}

/// A syntactically valid address longer than the 255-character email columns.
pub fn overlong_email() -> String {
    format!(
        "{}@{}com",
        "a".repeat(60),
        format!("{}.", "b".repeat(60)).repeat(4)
    )
}

pub fn generate_unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, Uuid::new_v4().simple())
}

pub async fn create_test_teacher(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
    password: &str,
) -> TestTeacher {
    let hashed = hash_password(password).unwrap();
    let email = generate_unique_email();

    let id: TeacherId = sqlx::query_scalar(
        "INSERT INTO teachers (username, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(username)
    .bind(&email)
    .bind(&hashed)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestTeacher {
        id,
        username: username.to_string(),
        email,
        password: password.to_string(),
    }
}

pub async fn create_test_class(tx: &mut Transaction<'_, Postgres>, name: &str) -> ClassId {
    sqlx::query_scalar("INSERT INTO classes (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(&mut **tx)
        .await
        .unwrap()
}

pub async fn create_test_student(
    tx: &mut Transaction<'_, Postgres>,
    first_name: &str,
    last_name: &str,
    class_id: ClassId,
) -> StudentId {
    sqlx::query_scalar(
        "INSERT INTO students (first_name, last_name, class_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(class_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub async fn create_test_subject(
    tx: &mut Transaction<'_, Postgres>,
    teacher_id: TeacherId,
    name: &str,
) -> SubjectId {
    sqlx::query_scalar("INSERT INTO subjects (name, teacher_id) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(teacher_id)
        .fetch_one(&mut **tx)
        .await
        .unwrap()
}

async fn into_parts(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Sends a JSON request. The body comes back as `Value::Null` when it is
/// empty or not JSON.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    into_parts(app.clone().oneshot(request).await.unwrap()).await
}

pub async fn post_login_form(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={}&password={}",
            username, password
        )))
        .unwrap();

    into_parts(app.clone().oneshot(request).await.unwrap()).await
}

/// Logs in over the form endpoint and returns `(access_token, refresh_token)`.
pub async fn login(app: &Router, username: &str, password: &str) -> (String, String) {
    let (status, body) = post_login_form(app, username, password).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);

    (
        body["access_token"].as_str().unwrap().to_string(),
        body["refresh_token"].as_str().unwrap().to_string(),
    )
}

/// Inserts a fresh teacher and returns it with an access token.
pub async fn teacher_with_token(pool: &PgPool, app: &Router) -> (TestTeacher, String) {
    let mut tx = pool.begin().await.unwrap();
    let teacher = create_test_teacher(&mut tx, &generate_unique_username(), TEST_PASSWORD).await;
    tx.commit().await.unwrap();

    let (access, _) = login(app, &teacher.username, &teacher.password).await;
    (teacher, access)
}
