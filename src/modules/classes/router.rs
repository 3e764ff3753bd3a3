use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_class, get_class, get_classes, get_classes_with_students};

pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_classes).post(create_class))
        .route("/{id}", get(get_class))
}

pub fn init_classes_with_students_router() -> Router<AppState> {
    Router::new().route("/", get(get_classes_with_students))
}
