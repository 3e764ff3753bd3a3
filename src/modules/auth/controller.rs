use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use classbook_core::AppError;

use crate::middleware::auth::CurrentTeacher;
use crate::state::AppState;
use crate::validator::{ValidatedForm, ValidatedJson};

use super::model::{ErrorResponse, LoginForm, RefreshTokenRequest, RegisterTeacherDto, Teacher, TokenResponse};
use super::service::AuthService;

/// Register a new teacher
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterTeacherDto,
    responses(
        (status = 201, description = "Teacher registered", body = Teacher),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 409, description = "Username or email already registered", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterTeacherDto>,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    let teacher = AuthService::register(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

/// Exchange a username and password for tokens
#[utoipa::path(
    post,
    path = "/api/auth/token",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Incorrect username or password", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let teacher = AuthService::authenticate(&state.db, &form.username, &form.password).await?;
    let tokens = AuthService::issue_tokens(&state.tokens, &teacher.username)?;
    Ok(Json(tokens))
}

/// Get a new access token from a refresh token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New access token issued", body = TokenResponse),
        (status = 401, description = "Could not validate credentials", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, body))]
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let tokens = AuthService::refresh(&state.db, &state.tokens, body.refresh_token).await?;
    Ok(Json(tokens))
}

/// Get the authenticated teacher
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current teacher", body = Teacher),
        (status = 401, description = "Could not validate credentials", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(teacher), fields(teacher_id = %teacher.id()))]
pub async fn me(teacher: CurrentTeacher) -> Json<Teacher> {
    Json(teacher.0)
}
