use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use classbook_core::AppError;
use classbook_models::{MessageResponse, StudentId};

use crate::middleware::auth::CurrentTeacher;
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CreateStudentDto, Student};
use super::service::StudentService;

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn create_student(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = StudentService::create_student(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All students", body = Vec<Student>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn get_students(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(StudentService::get_students(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn get_student(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(id): Path<StudentId>,
) -> Result<Json<Student>, AppError> {
    Ok(Json(StudentService::get_student_by_id(&state.db, id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn delete_student(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(id): Path<StudentId>,
) -> Result<Json<MessageResponse>, AppError> {
    StudentService::delete_student(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Student deleted")))
}
