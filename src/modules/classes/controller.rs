use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use classbook_core::AppError;
use classbook_models::ClassId;

use crate::middleware::auth::CurrentTeacher;
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{Class, ClassWithStudents, CreateClassDto};
use super::service::ClassService;

#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class created", body = Class),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Class with this name already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn create_class(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<(StatusCode, Json<Class>), AppError> {
    let class = ClassService::create_class(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

#[utoipa::path(
    get,
    path = "/api/classes",
    responses(
        (status = 200, description = "All classes ordered by name", body = Vec<Class>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn get_classes(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
) -> Result<Json<Vec<Class>>, AppError> {
    Ok(Json(ClassService::get_classes(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/classes/{id}",
    params(("id" = String, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class details", body = Class),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn get_class(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(id): Path<ClassId>,
) -> Result<Json<Class>, AppError> {
    Ok(Json(ClassService::get_class_by_id(&state.db, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/classes-with-students",
    responses(
        (status = 200, description = "Classes with their students", body = Vec<ClassWithStudents>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn get_classes_with_students(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
) -> Result<Json<Vec<ClassWithStudents>>, AppError> {
    Ok(Json(ClassService::get_classes_with_students(&state.db).await?))
}
