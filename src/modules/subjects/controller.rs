use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use classbook_core::AppError;
use classbook_models::{MessageResponse, SubjectId};

use crate::middleware::auth::CurrentTeacher;
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CreateSubjectDto, Subject};
use super::service::SubjectService;

#[utoipa::path(
    post,
    path = "/api/subjects",
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Subject with this name already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher), fields(teacher_id = %teacher.id()))]
pub async fn create_subject(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    let subject = SubjectService::create_subject(&state.db, teacher.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

#[utoipa::path(
    get,
    path = "/api/subjects",
    responses(
        (status = 200, description = "The caller's subjects", body = Vec<Subject>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher), fields(teacher_id = %teacher.id()))]
pub async fn get_subjects(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
) -> Result<Json<Vec<Subject>>, AppError> {
    Ok(Json(SubjectService::get_subjects(&state.db, teacher.id()).await?))
}

#[utoipa::path(
    delete,
    path = "/api/subjects/{id}",
    params(("id" = String, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher), fields(teacher_id = %teacher.id()))]
pub async fn delete_subject(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
    Path(id): Path<SubjectId>,
) -> Result<Json<MessageResponse>, AppError> {
    SubjectService::delete_subject(&state.db, id, teacher.id()).await?;
    Ok(Json(MessageResponse::new("Subject deleted")))
}
