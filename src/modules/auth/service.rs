use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use classbook_auth::{TokenKind, TokenService};
use classbook_core::errors::INCORRECT_LOGIN;
use classbook_core::{AppError, hash_password, verify_dummy_password, verify_password};
use classbook_db::is_unique_violation;

use crate::metrics::{track_auth_rejection, track_login_failure, track_login_success, track_token_issued};

use super::model::{RegisterTeacherDto, Teacher, TeacherCredentials, TokenResponse};

const TEACHER_COLUMNS: &str = "id, username, email, is_active, created_at";

pub struct AuthService;

impl AuthService {
    /// Creates a teacher account.
    ///
    /// Username and email are checked before the insert; the unique indexes
    /// catch a concurrent registration that slips between the check and the
    /// insert, and that also surfaces as a conflict.
    #[instrument(skip(db, dto), fields(username = %dto.username))]
    pub async fn register(db: &PgPool, dto: RegisterTeacherDto) -> Result<Teacher, AppError> {
        let mut tx = db.begin().await?;

        let username_taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teachers WHERE username = $1)")
                .bind(&dto.username)
                .fetch_one(&mut *tx)
                .await?;

        if username_taken {
            return Err(AppError::conflict(anyhow!("Username already registered")));
        }

        let email_taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teachers WHERE email = $1)")
                .bind(&dto.email)
                .fetch_one(&mut *tx)
                .await?;

        if email_taken {
            return Err(AppError::conflict(anyhow!("Email already registered")));
        }

        let password_hash = hash_password(&dto.password)?;

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "INSERT INTO teachers (username, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::conflict(anyhow!("Username or email already registered"));
            }
            AppError::database(e)
        })?;

        tx.commit().await?;

        tracing::info!(teacher_id = %teacher.id, "Teacher registered");
        Ok(teacher)
    }

    /// Checks a username/password pair.
    ///
    /// Unknown users, wrong passwords and inactive accounts all fail the same
    /// way, and each pays for one bcrypt verification.
    #[instrument(skip(db, password))]
    pub async fn authenticate(
        db: &PgPool,
        username: &str,
        password: &str,
    ) -> Result<TeacherCredentials, AppError> {
        let credentials = sqlx::query_as::<_, TeacherCredentials>(
            "SELECT id, username, password_hash, is_active FROM teachers WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(db)
        .await?;

        let password_matches = match &credentials {
            Some(c) => verify_password(password, &c.password_hash),
            None => verify_dummy_password(password),
        };

        match credentials {
            Some(c) if c.is_active && password_matches => {
                track_login_success();
                Ok(c)
            }
            _ => {
                tracing::info!("Login rejected");
                track_login_failure();
                Err(AppError::unauthorized(INCORRECT_LOGIN.to_string()))
            }
        }
    }

    #[instrument(skip(db))]
    pub async fn find_active_teacher(
        db: &PgPool,
        username: &str,
    ) -> Result<Option<Teacher>, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE username = $1 AND is_active = TRUE"
        ))
        .bind(username)
        .fetch_optional(db)
        .await?;

        Ok(teacher)
    }

    /// Mints an access/refresh pair for `username`.
    pub fn issue_tokens(tokens: &TokenService, username: &str) -> Result<TokenResponse, AppError> {
        let access_token = tokens.issue_access(username)?;
        track_token_issued(TokenKind::Access);
        let refresh_token = tokens.issue_refresh(username)?;
        track_token_issued(TokenKind::Refresh);

        Ok(TokenResponse::bearer(
            access_token,
            refresh_token,
            tokens.access_ttl_seconds(),
        ))
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The refresh token is returned unchanged; it stays valid until it
    /// expires.
    #[instrument(skip(db, tokens, refresh_token))]
    pub async fn refresh(
        db: &PgPool,
        tokens: &TokenService,
        refresh_token: String,
    ) -> Result<TokenResponse, AppError> {
        let claims = tokens
            .verify(&refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                track_auth_rejection();
                e.into_rejection()
            })?;

        let teacher = Self::find_active_teacher(db, &claims.sub)
            .await?
            .ok_or_else(|| {
                track_auth_rejection();
                AppError::invalid_credentials()
            })?;

        let access_token = tokens.issue_access(&teacher.username)?;
        track_token_issued(TokenKind::Access);

        Ok(TokenResponse::bearer(
            access_token,
            refresh_token,
            tokens.access_ttl_seconds(),
        ))
    }
}
