//! Subjects are private to their teacher: every query filters on
//! `teacher_id`, so another teacher's subject looks exactly like a missing one.

use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use classbook_core::AppError;
use classbook_db::is_unique_violation;
use classbook_models::{SubjectId, TeacherId};

use super::model::{CreateSubjectDto, Subject};

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db))]
    pub async fn create_subject(
        db: &PgPool,
        teacher_id: TeacherId,
        dto: CreateSubjectDto,
    ) -> Result<Subject, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM subjects WHERE name = $1 AND teacher_id = $2)",
        )
        .bind(&dto.name)
        .bind(teacher_id)
        .fetch_one(db)
        .await?;

        if exists {
            return Err(AppError::conflict(anyhow!("Subject with this name already exists")));
        }

        let subject = sqlx::query_as::<_, Subject>(
            r#"INSERT INTO subjects (name, teacher_id)
               VALUES ($1, $2)
               RETURNING id, name, teacher_id, created_at"#,
        )
        .bind(&dto.name)
        .bind(teacher_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::conflict(anyhow!("Subject with this name already exists"));
            }
            AppError::database(e)
        })?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn get_subjects(db: &PgPool, teacher_id: TeacherId) -> Result<Vec<Subject>, AppError> {
        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT id, name, teacher_id, created_at FROM subjects WHERE teacher_id = $1 ORDER BY name",
        )
        .bind(teacher_id)
        .fetch_all(db)
        .await?;

        Ok(subjects)
    }

    /// True when `id` is one of `teacher_id`'s subjects.
    pub async fn is_owned_by<'e, E>(
        executor: E,
        id: SubjectId,
        teacher_id: TeacherId,
    ) -> Result<bool, AppError>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let owned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM subjects WHERE id = $1 AND teacher_id = $2)",
        )
        .bind(id)
        .bind(teacher_id)
        .fetch_one(executor)
        .await?;
        Ok(owned)
    }

    /// True when a subject with `id` exists, whoever owns it.
    pub async fn exists<'e, E>(executor: E, id: SubjectId) -> Result<bool, AppError>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM subjects WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }

    #[instrument(skip(db))]
    pub async fn delete_subject(
        db: &PgPool,
        id: SubjectId,
        teacher_id: TeacherId,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1 AND teacher_id = $2")
            .bind(id)
            .bind(teacher_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Subject not found")));
        }

        Ok(())
    }
}
