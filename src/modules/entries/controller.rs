use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use classbook_core::AppError;
use classbook_models::{EntryId, MessageResponse};

use crate::middleware::auth::CurrentTeacher;
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{EntryFilterParams, JournalEntry, JournalEntryDto};
use super::service::EntryService;

#[utoipa::path(
    post,
    path = "/api/entries",
    request_body = JournalEntryDto,
    responses(
        (status = 201, description = "Journal entry created", body = JournalEntry),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Subject or class not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Journal Entries",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher, dto))]
pub async fn create_entry(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    ValidatedJson(dto): ValidatedJson<JournalEntryDto>,
) -> Result<(StatusCode, Json<JournalEntry>), AppError> {
    let entry = EntryService::create_entry(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    get,
    path = "/api/entries",
    params(EntryFilterParams),
    responses(
        (status = 200, description = "Journal entries, newest first", body = Vec<JournalEntry>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Journal Entries",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn get_entries(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Query(filters): Query<EntryFilterParams>,
) -> Result<Json<Vec<JournalEntry>>, AppError> {
    Ok(Json(EntryService::get_entries(&state.db, filters).await?))
}

#[utoipa::path(
    get,
    path = "/api/entries/{id}",
    params(("id" = String, Path, description = "Journal entry ID")),
    responses(
        (status = 200, description = "Journal entry", body = JournalEntry),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Journal entry not found", body = ErrorResponse)
    ),
    tag = "Journal Entries",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn get_entry(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(id): Path<EntryId>,
) -> Result<Json<JournalEntry>, AppError> {
    Ok(Json(EntryService::get_entry(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/entries/{id}",
    params(("id" = String, Path, description = "Journal entry ID")),
    request_body = JournalEntryDto,
    responses(
        (status = 200, description = "Journal entry replaced", body = JournalEntry),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Entry, subject or class not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Journal Entries",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher, dto))]
pub async fn update_entry(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(id): Path<EntryId>,
    ValidatedJson(dto): ValidatedJson<JournalEntryDto>,
) -> Result<Json<JournalEntry>, AppError> {
    Ok(Json(EntryService::update_entry(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/entries/{id}",
    params(("id" = String, Path, description = "Journal entry ID")),
    responses(
        (status = 200, description = "Journal entry deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Journal entry not found", body = ErrorResponse)
    ),
    tag = "Journal Entries",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn delete_entry(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(id): Path<EntryId>,
) -> Result<Json<MessageResponse>, AppError> {
    EntryService::delete_entry(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Journal entry deleted")))
}
