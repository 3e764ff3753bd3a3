//! Schedules are private to their teacher, like subjects. Writes check the
//! referenced subject belongs to the caller, the class exists and the slot
//! is free, all inside one transaction.

use anyhow::anyhow;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use classbook_core::AppError;
use classbook_db::is_unique_violation;
use classbook_models::{ClassId, ScheduleId, TeacherId};

use crate::modules::classes::service::ClassService;
use crate::modules::subjects::service::SubjectService;

use super::model::{Schedule, ScheduleDto, WeekSchedule};

const SCHEDULE_SELECT: &str = r#"SELECT sc.id, sc.teacher_id, t.username AS teacher_name,
       sc.subject_id, su.name AS subject_name,
       sc.class_id, c.name AS class_name,
       sc.day_of_week, sc.lesson_number, sc.created_at
FROM schedules sc
JOIN teachers t ON t.id = sc.teacher_id
JOIN subjects su ON su.id = sc.subject_id
JOIN classes c ON c.id = sc.class_id"#;

const SLOT_TAKEN: &str = "This time slot is already taken for the class";

pub struct ScheduleService;

impl ScheduleService {
    #[instrument(skip(db))]
    pub async fn create_schedule(
        db: &PgPool,
        teacher_id: TeacherId,
        dto: ScheduleDto,
    ) -> Result<Schedule, AppError> {
        let mut tx = db.begin().await?;

        Self::check_slot(&mut tx, teacher_id, &dto, None).await?;

        let id: ScheduleId = sqlx::query_scalar(
            r#"INSERT INTO schedules (teacher_id, subject_id, class_id, day_of_week, lesson_number)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id"#,
        )
        .bind(teacher_id)
        .bind(dto.subject_id)
        .bind(dto.class_id)
        .bind(dto.day_of_week)
        .bind(dto.lesson_number)
        .fetch_one(&mut *tx)
        .await
        .map_err(slot_conflict)?;

        let schedule = Self::fetch(&mut tx, id, teacher_id)
            .await?
            .ok_or_else(|| AppError::internal_error(format!("Schedule {} vanished after insert", id)))?;

        tx.commit().await?;
        Ok(schedule)
    }

    /// The caller's slots ordered by day, then lesson.
    #[instrument(skip(db))]
    pub async fn get_schedules(db: &PgPool, teacher_id: TeacherId) -> Result<Vec<Schedule>, AppError> {
        let schedules = sqlx::query_as::<_, Schedule>(&format!(
            "{SCHEDULE_SELECT} WHERE sc.teacher_id = $1 ORDER BY sc.day_of_week, sc.lesson_number"
        ))
        .bind(teacher_id)
        .fetch_all(db)
        .await?;

        Ok(schedules)
    }

    #[instrument(skip(db))]
    pub async fn get_week(db: &PgPool, teacher_id: TeacherId) -> Result<WeekSchedule, AppError> {
        let schedules = Self::get_schedules(db, teacher_id).await?;
        Ok(WeekSchedule::from_schedules(schedules))
    }

    #[instrument(skip(db))]
    pub async fn get_class_schedules(
        db: &PgPool,
        teacher_id: TeacherId,
        class_id: ClassId,
    ) -> Result<Vec<Schedule>, AppError> {
        let schedules = sqlx::query_as::<_, Schedule>(&format!(
            "{SCHEDULE_SELECT} WHERE sc.teacher_id = $1 AND sc.class_id = $2
             ORDER BY sc.day_of_week, sc.lesson_number"
        ))
        .bind(teacher_id)
        .bind(class_id)
        .fetch_all(db)
        .await?;

        Ok(schedules)
    }

    #[instrument(skip(db))]
    pub async fn get_schedule(
        db: &PgPool,
        id: ScheduleId,
        teacher_id: TeacherId,
    ) -> Result<Schedule, AppError> {
        let mut conn = db.acquire().await?;
        Self::fetch(&mut conn, id, teacher_id)
            .await?
            .ok_or_else(schedule_not_found)
    }

    #[instrument(skip(db))]
    pub async fn update_schedule(
        db: &PgPool,
        id: ScheduleId,
        teacher_id: TeacherId,
        dto: ScheduleDto,
    ) -> Result<Schedule, AppError> {
        let mut tx = db.begin().await?;

        let owned: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM schedules WHERE id = $1 AND teacher_id = $2)",
        )
        .bind(id)
        .bind(teacher_id)
        .fetch_one(&mut *tx)
        .await?;

        if !owned {
            return Err(schedule_not_found());
        }

        Self::check_slot(&mut tx, teacher_id, &dto, Some(id)).await?;

        sqlx::query(
            r#"UPDATE schedules
               SET subject_id = $1, class_id = $2, day_of_week = $3, lesson_number = $4
               WHERE id = $5 AND teacher_id = $6"#,
        )
        .bind(dto.subject_id)
        .bind(dto.class_id)
        .bind(dto.day_of_week)
        .bind(dto.lesson_number)
        .bind(id)
        .bind(teacher_id)
        .execute(&mut *tx)
        .await
        .map_err(slot_conflict)?;

        let schedule = Self::fetch(&mut tx, id, teacher_id)
            .await?
            .ok_or_else(schedule_not_found)?;

        tx.commit().await?;
        Ok(schedule)
    }

    #[instrument(skip(db))]
    pub async fn delete_schedule(
        db: &PgPool,
        id: ScheduleId,
        teacher_id: TeacherId,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1 AND teacher_id = $2")
            .bind(id)
            .bind(teacher_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(schedule_not_found());
        }

        Ok(())
    }

    async fn fetch(
        conn: &mut PgConnection,
        id: ScheduleId,
        teacher_id: TeacherId,
    ) -> Result<Option<Schedule>, AppError> {
        let schedule = sqlx::query_as::<_, Schedule>(&format!(
            "{SCHEDULE_SELECT} WHERE sc.id = $1 AND sc.teacher_id = $2"
        ))
        .bind(id)
        .bind(teacher_id)
        .fetch_optional(conn)
        .await?;

        Ok(schedule)
    }

    /// Validates the references and slot of `dto`. `exclude` is the row
    /// being updated, which never conflicts with itself.
    async fn check_slot(
        conn: &mut PgConnection,
        teacher_id: TeacherId,
        dto: &ScheduleDto,
        exclude: Option<ScheduleId>,
    ) -> Result<(), AppError> {
        if !SubjectService::is_owned_by(&mut *conn, dto.subject_id, teacher_id).await? {
            return Err(AppError::not_found(anyhow!("Subject not found")));
        }

        if !ClassService::class_exists(&mut *conn, dto.class_id).await? {
            return Err(AppError::not_found(anyhow!("Class not found")));
        }

        let taken: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(
                   SELECT 1 FROM schedules
                   WHERE teacher_id = $1 AND day_of_week = $2 AND lesson_number = $3
                     AND class_id = $4 AND ($5::uuid IS NULL OR id <> $5)
               )"#,
        )
        .bind(teacher_id)
        .bind(dto.day_of_week)
        .bind(dto.lesson_number)
        .bind(dto.class_id)
        .bind(exclude)
        .fetch_one(&mut *conn)
        .await?;

        if taken {
            return Err(AppError::conflict(anyhow!(SLOT_TAKEN)));
        }

        Ok(())
    }
}

fn schedule_not_found() -> AppError {
    AppError::not_found(anyhow!("Schedule not found"))
}

fn slot_conflict(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err) {
        return AppError::conflict(anyhow!(SLOT_TAKEN));
    }
    AppError::database(err)
}
