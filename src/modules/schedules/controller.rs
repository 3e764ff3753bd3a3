use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use classbook_core::AppError;
use classbook_models::{ClassId, MessageResponse, ScheduleId};

use crate::middleware::auth::CurrentTeacher;
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{Schedule, ScheduleDto, WeekSchedule};
use super::service::ScheduleService;

#[utoipa::path(
    post,
    path = "/api/schedules",
    request_body = ScheduleDto,
    responses(
        (status = 201, description = "Schedule slot created", body = Schedule),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Subject or class not found", body = ErrorResponse),
        (status = 409, description = "Time slot already taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher), fields(teacher_id = %teacher.id()))]
pub async fn create_schedule(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
    ValidatedJson(dto): ValidatedJson<ScheduleDto>,
) -> Result<(StatusCode, Json<Schedule>), AppError> {
    let schedule = ScheduleService::create_schedule(&state.db, teacher.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

#[utoipa::path(
    get,
    path = "/api/schedules",
    responses(
        (status = 200, description = "The caller's schedule slots", body = Vec<Schedule>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher), fields(teacher_id = %teacher.id()))]
pub async fn get_schedules(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
) -> Result<Json<Vec<Schedule>>, AppError> {
    Ok(Json(ScheduleService::get_schedules(&state.db, teacher.id()).await?))
}

#[utoipa::path(
    get,
    path = "/api/schedules/week",
    responses(
        (status = 200, description = "The caller's week, grouped by day", body = WeekSchedule),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher), fields(teacher_id = %teacher.id()))]
pub async fn get_week(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
) -> Result<Json<WeekSchedule>, AppError> {
    Ok(Json(ScheduleService::get_week(&state.db, teacher.id()).await?))
}

#[utoipa::path(
    get,
    path = "/api/schedules/class/{class_id}",
    params(("class_id" = String, Path, description = "Class ID")),
    responses(
        (status = 200, description = "The caller's slots for the class", body = Vec<Schedule>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher), fields(teacher_id = %teacher.id()))]
pub async fn get_class_schedules(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
    Path(class_id): Path<ClassId>,
) -> Result<Json<Vec<Schedule>>, AppError> {
    let schedules = ScheduleService::get_class_schedules(&state.db, teacher.id(), class_id).await?;
    Ok(Json(schedules))
}

#[utoipa::path(
    get,
    path = "/api/schedules/{id}",
    params(("id" = String, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule slot", body = Schedule),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Schedule not found", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher), fields(teacher_id = %teacher.id()))]
pub async fn get_schedule(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
    Path(id): Path<ScheduleId>,
) -> Result<Json<Schedule>, AppError> {
    Ok(Json(ScheduleService::get_schedule(&state.db, id, teacher.id()).await?))
}

#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    params(("id" = String, Path, description = "Schedule ID")),
    request_body = ScheduleDto,
    responses(
        (status = 200, description = "Schedule slot updated", body = Schedule),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Schedule, subject or class not found", body = ErrorResponse),
        (status = 409, description = "Time slot already taken", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher), fields(teacher_id = %teacher.id()))]
pub async fn update_schedule(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
    Path(id): Path<ScheduleId>,
    ValidatedJson(dto): ValidatedJson<ScheduleDto>,
) -> Result<Json<Schedule>, AppError> {
    let schedule = ScheduleService::update_schedule(&state.db, id, teacher.id(), dto).await?;
    Ok(Json(schedule))
}

#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    params(("id" = String, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule slot deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Schedule not found", body = ErrorResponse)
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher), fields(teacher_id = %teacher.id()))]
pub async fn delete_schedule(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
    Path(id): Path<ScheduleId>,
) -> Result<Json<MessageResponse>, AppError> {
    ScheduleService::delete_schedule(&state.db, id, teacher.id()).await?;
    Ok(Json(MessageResponse::new("Schedule deleted")))
}
