//! Startup account seeding.

use sqlx::PgPool;

use classbook_config::BootstrapConfig;
use classbook_models::RegisterTeacherDto;

use crate::modules::auth::service::AuthService;

/// Creates the configured account unless it already exists.
///
/// Never fails startup: any error is logged and the server carries on.
pub async fn ensure_bootstrap_teacher(db: &PgPool, config: &BootstrapConfig) {
    if !config.enabled {
        return;
    }

    match AuthService::find_active_teacher(db, &config.username).await {
        Ok(Some(_)) => {
            tracing::debug!(username = %config.username, "Bootstrap teacher already present");
            return;
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(error = %e.error, "Could not look up bootstrap teacher");
            return;
        }
    }

    let dto = RegisterTeacherDto {
        username: config.username.clone(),
        email: config.email.clone(),
        password: config.password.clone(),
    };

    match AuthService::register(db, dto).await {
        Ok(teacher) => {
            tracing::info!(username = %teacher.username, "Bootstrap teacher created");
        }
        Err(e) => {
            tracing::warn!(
                username = %config.username,
                error = %e.error,
                "Could not create bootstrap teacher"
            );
        }
    }
}
