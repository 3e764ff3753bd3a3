//! Authentication models, shared with the CLI through `classbook-models`.

pub use classbook_models::auth::*;
pub use classbook_models::teachers::{Teacher, TeacherCredentials};

use serde::Serialize;
use utoipa::ToSchema;

/// Shape of every error body.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
