mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Duration;
use classbook_auth::{TokenKind, TokenService};
use classbook_core::errors::{INCORRECT_LOGIN, INVALID_CREDENTIALS};
use common::{
    TEST_PASSWORD, create_test_teacher, generate_unique_email, generate_unique_username, login,
    overlong_email, post_login_form, send, setup_test_app, teacher_with_token, test_jwt_config,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_success(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let username = generate_unique_username();
    let email = generate_unique_email();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "username": username, "email": email, "password": "secret123" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], username);
    assert_eq!(body["email"], email);
    assert_eq!(body["is_active"], true);
    assert!(body.get("id").is_some());
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_then_login(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let username = generate_unique_username();

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": generate_unique_email(),
            "password": "secret123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_login_form(&app, &username, "secret123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 3600);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_username(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let username = generate_unique_username();

    let mut tx = pool.begin().await.unwrap();
    create_test_teacher(&mut tx, &username, TEST_PASSWORD).await;
    tx.commit().await.unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": generate_unique_email(),
            "password": "secret123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Username already registered");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teachers WHERE username = $1")
        .bind(&username)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let mut tx = pool.begin().await.unwrap();
    let existing = create_test_teacher(&mut tx, &generate_unique_username(), TEST_PASSWORD).await;
    tx.commit().await.unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": generate_unique_username(),
            "email": existing.email,
            "password": "secret123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already registered");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_validation_error(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "username": "ab", "email": "not-an-email", "password": "123" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teachers")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_email_too_long(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": generate_unique_username(),
            "email": overlong_email(),
            "password": "secret123"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teachers")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_missing_field(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "username": generate_unique_username() })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let mut tx = pool.begin().await.unwrap();
    let teacher = create_test_teacher(&mut tx, &generate_unique_username(), TEST_PASSWORD).await;
    tx.commit().await.unwrap();

    let (status, body) = post_login_form(&app, &teacher.username, TEST_PASSWORD).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["refresh_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_ne!(body["access_token"], body["refresh_token"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let mut tx = pool.begin().await.unwrap();
    let teacher = create_test_teacher(&mut tx, &generate_unique_username(), TEST_PASSWORD).await;
    tx.commit().await.unwrap();

    let (status, body) = post_login_form(&app, &teacher.username, "wrongpass").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INCORRECT_LOGIN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_user(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = post_login_form(&app, "nobody", "whatever").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INCORRECT_LOGIN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_inactive_teacher(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let mut tx = pool.begin().await.unwrap();
    let teacher = create_test_teacher(&mut tx, &generate_unique_username(), TEST_PASSWORD).await;
    sqlx::query("UPDATE teachers SET is_active = FALSE WHERE id = $1")
        .bind(teacher.id)
        .execute(&mut *tx)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let (status, body) = post_login_form(&app, &teacher.username, TEST_PASSWORD).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INCORRECT_LOGIN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_rejects_json_body(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/token",
        None,
        Some(json!({ "username": "someone", "password": "secret123" })),
    )
    .await;

    assert!(status.is_client_error());
    assert_ne!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_returns_current_teacher(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let (teacher, access) = teacher_with_token(&pool, &app).await;

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&access), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], teacher.username);
    assert_eq!(body["id"], teacher.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_without_token(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let request = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_with_refresh_token(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let mut tx = pool.begin().await.unwrap();
    let teacher = create_test_teacher(&mut tx, &generate_unique_username(), TEST_PASSWORD).await;
    tx.commit().await.unwrap();

    let (_, refresh) = login(&app, &teacher.username, TEST_PASSWORD).await;
    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&refresh), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INVALID_CREDENTIALS);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_with_expired_token(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let mut tx = pool.begin().await.unwrap();
    let teacher = create_test_teacher(&mut tx, &generate_unique_username(), TEST_PASSWORD).await;
    tx.commit().await.unwrap();

    let expired = TokenService::new(&test_jwt_config())
        .issue(&teacher.username, TokenKind::Access, Duration::seconds(-5))
        .unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {}", expired))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );

    let (_, body) = send(&app, "GET", "/api/auth/me", Some(&expired), None).await;
    assert_eq!(body["error"], INVALID_CREDENTIALS);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_with_garbage_token(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send(&app, "GET", "/api/auth/me", Some("not.a.jwt"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INVALID_CREDENTIALS);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_for_deleted_teacher_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let (teacher, access) = teacher_with_token(&pool, &app).await;

    sqlx::query("DELETE FROM teachers WHERE id = $1")
        .bind(teacher.id)
        .execute(&pool)
        .await
        .unwrap();

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&access), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INVALID_CREDENTIALS);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_for_deactivated_teacher_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let (teacher, access) = teacher_with_token(&pool, &app).await;

    sqlx::query("UPDATE teachers SET is_active = FALSE WHERE id = $1")
        .bind(teacher.id)
        .execute(&pool)
        .await
        .unwrap();

    let (status, _) = send(&app, "GET", "/api/auth/me", Some(&access), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_issues_new_access_token(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let mut tx = pool.begin().await.unwrap();
    let teacher = create_test_teacher(&mut tx, &generate_unique_username(), TEST_PASSWORD).await;
    tx.commit().await.unwrap();

    let (_, refresh) = login(&app, &teacher.username, TEST_PASSWORD).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/refresh",
        None,
        Some(json!({ "refresh_token": refresh })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["refresh_token"], refresh);

    let access = body["access_token"].as_str().unwrap();
    let (status, me) = send(&app, "GET", "/api/auth/me", Some(access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], teacher.username);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_rejects_access_token(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let (_, access) = teacher_with_token(&pool, &app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/refresh",
        None,
        Some(json!({ "refresh_token": access })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INVALID_CREDENTIALS);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_for_deleted_teacher_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let mut tx = pool.begin().await.unwrap();
    let teacher = create_test_teacher(&mut tx, &generate_unique_username(), TEST_PASSWORD).await;
    tx.commit().await.unwrap();

    let (_, refresh) = login(&app, &teacher.username, TEST_PASSWORD).await;

    sqlx::query("DELETE FROM teachers WHERE id = $1")
        .bind(teacher.id)
        .execute(&pool)
        .await
        .unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/refresh",
        None,
        Some(json!({ "refresh_token": refresh })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_protected_route_requires_token(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    for uri in [
        "/api/classes",
        "/api/students",
        "/api/subjects",
        "/api/schedules",
        "/api/entries",
    ] {
        let (status, _) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} should require auth", uri);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health_check(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    let (status, body) = send(&app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Classbook API is running");
}
