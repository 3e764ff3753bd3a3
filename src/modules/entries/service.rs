//! Journal entries are shared: any authenticated teacher can read and write
//! any entry, as long as the referenced subject and class exist.

use anyhow::anyhow;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use classbook_core::AppError;
use classbook_db::is_foreign_key_violation;
use classbook_models::EntryId;

use crate::modules::classes::service::ClassService;
use crate::modules::subjects::service::SubjectService;

use super::model::{EntryFilterParams, JournalEntry, JournalEntryDto};

const ENTRY_SELECT: &str = r#"SELECT e.id, e.subject_id, su.name AS subject_name,
       e.class_id, c.name AS class_name,
       e.date, e.topic, e.attendance, e.homework, e.grades,
       e.created_at, e.updated_at
FROM journal_entries e
JOIN subjects su ON su.id = e.subject_id
JOIN classes c ON c.id = e.class_id"#;

pub struct EntryService;

impl EntryService {
    #[instrument(skip(db, dto), fields(subject_id = %dto.subject_id, class_id = %dto.class_id))]
    pub async fn create_entry(db: &PgPool, dto: JournalEntryDto) -> Result<JournalEntry, AppError> {
        let mut tx = db.begin().await?;

        Self::check_references(&mut tx, &dto).await?;

        let id: EntryId = sqlx::query_scalar(
            r#"INSERT INTO journal_entries
                   (subject_id, class_id, date, topic, attendance, homework, grades)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING id"#,
        )
        .bind(dto.subject_id)
        .bind(dto.class_id)
        .bind(dto.date)
        .bind(&dto.topic)
        .bind(Json(&dto.attendance))
        .bind(&dto.homework)
        .bind(Json(&dto.grades))
        .fetch_one(&mut *tx)
        .await
        .map_err(reference_violation)?;

        let entry = Self::fetch(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::internal_error(format!("Entry {} vanished after insert", id)))?;

        tx.commit().await?;
        Ok(entry)
    }

    /// Entries newest first, optionally narrowed to a subject and/or class.
    #[instrument(skip(db))]
    pub async fn get_entries(
        db: &PgPool,
        filters: EntryFilterParams,
    ) -> Result<Vec<JournalEntry>, AppError> {
        let entries = sqlx::query_as::<_, JournalEntry>(&format!(
            r#"{ENTRY_SELECT}
               WHERE ($1::uuid IS NULL OR e.subject_id = $1)
                 AND ($2::uuid IS NULL OR e.class_id = $2)
               ORDER BY e.date DESC, e.created_at DESC"#
        ))
        .bind(filters.subject_id)
        .bind(filters.class_id)
        .fetch_all(db)
        .await?;

        Ok(entries)
    }

    #[instrument(skip(db))]
    pub async fn get_entry(db: &PgPool, id: EntryId) -> Result<JournalEntry, AppError> {
        let mut conn = db.acquire().await?;
        Self::fetch(&mut conn, id).await?.ok_or_else(entry_not_found)
    }

    /// Replaces every editable field of an entry.
    #[instrument(skip(db, dto))]
    pub async fn update_entry(
        db: &PgPool,
        id: EntryId,
        dto: JournalEntryDto,
    ) -> Result<JournalEntry, AppError> {
        let mut tx = db.begin().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM journal_entries WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if !exists {
            return Err(entry_not_found());
        }

        Self::check_references(&mut tx, &dto).await?;

        sqlx::query(
            r#"UPDATE journal_entries
               SET subject_id = $1, class_id = $2, date = $3, topic = $4,
                   attendance = $5, homework = $6, grades = $7, updated_at = NOW()
               WHERE id = $8"#,
        )
        .bind(dto.subject_id)
        .bind(dto.class_id)
        .bind(dto.date)
        .bind(&dto.topic)
        .bind(Json(&dto.attendance))
        .bind(&dto.homework)
        .bind(Json(&dto.grades))
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(reference_violation)?;

        let entry = Self::fetch(&mut tx, id).await?.ok_or_else(entry_not_found)?;

        tx.commit().await?;
        Ok(entry)
    }

    #[instrument(skip(db))]
    pub async fn delete_entry(db: &PgPool, id: EntryId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(entry_not_found());
        }

        Ok(())
    }

    async fn fetch(conn: &mut PgConnection, id: EntryId) -> Result<Option<JournalEntry>, AppError> {
        let entry = sqlx::query_as::<_, JournalEntry>(&format!("{ENTRY_SELECT} WHERE e.id = $1"))
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(entry)
    }

    async fn check_references(conn: &mut PgConnection, dto: &JournalEntryDto) -> Result<(), AppError> {
        if !SubjectService::exists(&mut *conn, dto.subject_id).await? {
            return Err(AppError::not_found(anyhow!("Subject not found")));
        }

        if !ClassService::class_exists(&mut *conn, dto.class_id).await? {
            return Err(AppError::not_found(anyhow!("Class not found")));
        }

        Ok(())
    }
}

fn entry_not_found() -> AppError {
    AppError::not_found(anyhow!("Journal entry not found"))
}

/// A subject or class deleted between the check and the write.
fn reference_violation(err: sqlx::Error) -> AppError {
    if is_foreign_key_violation(&err) {
        return AppError::not_found(anyhow!("Subject or class not found"));
    }
    AppError::database(err)
}
