//! Teacher accounts.
//!
//! A teacher is the only kind of user. The token `sub` claim carries the
//! username, so usernames are unique and never reused.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::TeacherId;

/// Public view of a teacher account.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: TeacherId,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Row used for password checks. Never serialized.
#[derive(FromRow)]
pub struct TeacherCredentials {
    pub id: TeacherId,
    pub username: String,
    pub password_hash: String,
    pub is_active: bool,
}
