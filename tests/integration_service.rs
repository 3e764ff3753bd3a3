mod common;

use axum::http::StatusCode;
use classbook::bootstrap::ensure_bootstrap_teacher;
use classbook::router::init_router;
use classbook::state::AppState;
use classbook_config::{BootstrapConfig, CorsConfig};
use common::{post_login_form, send, setup_test_app, test_jwt_config};
use metrics_exporter_prometheus::PrometheusBuilder;
use sqlx::PgPool;

fn bootstrap_config(enabled: bool) -> BootstrapConfig {
    BootstrapConfig {
        enabled,
        username: "bootstrap".to_string(),
        email: "bootstrap@example.com".to_string(),
        password: "bootstrap123".to_string(),
    }
}

async fn teacher_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM teachers")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bootstrap_creates_teacher_once(pool: PgPool) {
    let config = bootstrap_config(true);

    ensure_bootstrap_teacher(&pool, &config).await;
    ensure_bootstrap_teacher(&pool, &config).await;

    assert_eq!(teacher_count(&pool).await, 1);

    let app = setup_test_app(pool.clone());
    let (status, _) = post_login_form(&app, "bootstrap", "bootstrap123").await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bootstrap_alongside_existing_teachers(pool: PgPool) {
    sqlx::query(
        "INSERT INTO teachers (username, email, password_hash) VALUES ('someone', 'someone@example.com', 'x')",
    )
    .execute(&pool)
    .await
    .unwrap();

    ensure_bootstrap_teacher(&pool, &bootstrap_config(true)).await;

    assert_eq!(teacher_count(&pool).await, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bootstrap_disabled(pool: PgPool) {
    ensure_bootstrap_teacher(&pool, &bootstrap_config(false)).await;

    assert_eq!(teacher_count(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bootstrap_conflict_is_not_fatal(pool: PgPool) {
    sqlx::query(
        "INSERT INTO teachers (username, email, password_hash) VALUES ('someone', 'bootstrap@example.com', 'x')",
    )
    .execute(&pool)
    .await
    .unwrap();

    ensure_bootstrap_teacher(&pool, &bootstrap_config(true)).await;

    assert_eq!(teacher_count(&pool).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_metrics_not_mounted_when_disabled(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, _) = send(&app, "GET", "/metrics", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_metrics_served_when_enabled(pool: PgPool) {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let state = AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec![],
        },
    )
    .with_metrics(Some(handle));
    let app = init_router(state);

    let (status, _) = send(&app, "GET", "/metrics", None, None).await;

    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_openapi_document_served(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/auth/token").is_some());
    assert!(body["paths"].get("/api/entries").is_some());
}
