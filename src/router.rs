use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_handler, metrics_middleware};
use crate::modules::auth::init_auth_router;
use crate::modules::classes::{init_classes_router, init_classes_with_students_router};
use crate::modules::entries::init_entries_router;
use crate::modules::health::init_health_router;
use crate::modules::schedules::init_schedules_router;
use crate::modules::students::init_students_router;
use crate::modules::subjects::init_subjects_router;
use crate::state::AppState;

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_health_router())
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/classes", init_classes_router())
                .nest("/classes-with-students", init_classes_with_students_router())
                .nest("/students", init_students_router())
                .nest("/subjects", init_subjects_router())
                .nest("/schedules", init_schedules_router())
                .nest("/entries", init_entries_router()),
        );

    if state.metrics.is_some() {
        router = router.route("/metrics", get(metrics_handler));
    }

    let cors = cors_layer(&state);

    router
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}
