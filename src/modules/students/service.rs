use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use classbook_core::AppError;
use classbook_db::is_foreign_key_violation;
use classbook_models::StudentId;

use crate::modules::classes::service::ClassService;

use super::model::{CreateStudentDto, Student};

const STUDENT_SELECT: &str = r#"SELECT s.id, s.first_name, s.last_name, s.email, s.class_id,
       c.name AS class_name, s.created_at
FROM students s
JOIN classes c ON c.id = s.class_id"#;

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        if !ClassService::class_exists(db, dto.class_id).await? {
            return Err(AppError::not_found(anyhow!("Class not found")));
        }

        let student = sqlx::query_as::<_, Student>(
            r#"WITH inserted AS (
                   INSERT INTO students (first_name, last_name, email, class_id)
                   VALUES ($1, $2, $3, $4)
                   RETURNING id, first_name, last_name, email, class_id, created_at
               )
               SELECT i.id, i.first_name, i.last_name, i.email, i.class_id,
                      c.name AS class_name, i.created_at
               FROM inserted i
               JOIN classes c ON c.id = i.class_id"#,
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(dto.class_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return AppError::not_found(anyhow!("Class not found"));
            }
            AppError::database(e)
        })?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_students(db: &PgPool) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "{STUDENT_SELECT} ORDER BY s.last_name, s.first_name"
        ))
        .fetch_all(db)
        .await?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn get_student_by_id(db: &PgPool, id: StudentId) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!("{STUDENT_SELECT} WHERE s.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: StudentId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }

        Ok(())
    }
}
