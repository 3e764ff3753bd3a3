//! The auth gate.
//!
//! [`CurrentTeacher`] is the only way a handler learns who is calling. It
//! accepts a signed, unexpired access token whose subject names an active
//! teacher, and rejects everything else with the same 401.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use classbook_auth::TokenKind;
use classbook_core::AppError;
use classbook_models::{Teacher, TeacherId};

use crate::metrics::track_auth_rejection;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct CurrentTeacher(pub Teacher);

impl CurrentTeacher {
    pub fn id(&self) -> TeacherId {
        self.0.id
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl FromRequestParts<AppState> for CurrentTeacher {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    tracing::debug!(reason = %rejection, "Missing or malformed bearer header");
                    track_auth_rejection();
                    AppError::invalid_credentials()
                })?;

        let claims = state
            .tokens
            .verify(bearer.token(), TokenKind::Access)
            .map_err(|e| {
                track_auth_rejection();
                e.into_rejection()
            })?;

        let teacher = AuthService::find_active_teacher(&state.db, &claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::debug!(username = %claims.sub, "Token subject has no active teacher");
                track_auth_rejection();
                AppError::invalid_credentials()
            })?;

        Ok(CurrentTeacher(teacher))
    }
}
