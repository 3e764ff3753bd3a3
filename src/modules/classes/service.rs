use anyhow::anyhow;
use sqlx::PgPool;
use std::collections::BTreeMap;
use tracing::instrument;

use classbook_core::AppError;
use classbook_db::is_unique_violation;
use classbook_models::{ClassId, Student};

use super::model::{Class, ClassWithStudents, CreateClassDto};

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db))]
    pub async fn create_class(db: &PgPool, dto: CreateClassDto) -> Result<Class, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM classes WHERE name = $1)")
            .bind(&dto.name)
            .fetch_one(db)
            .await?;

        if exists {
            return Err(AppError::conflict(anyhow!("Class with this name already exists")));
        }

        let class = sqlx::query_as::<_, Class>(
            "INSERT INTO classes (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(&dto.name)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::conflict(anyhow!("Class with this name already exists"));
            }
            AppError::database(e)
        })?;

        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn get_classes(db: &PgPool) -> Result<Vec<Class>, AppError> {
        let classes = sqlx::query_as::<_, Class>(
            "SELECT id, name, created_at FROM classes ORDER BY name",
        )
        .fetch_all(db)
        .await?;

        Ok(classes)
    }

    #[instrument(skip(db))]
    pub async fn get_class_by_id(db: &PgPool, id: ClassId) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>("SELECT id, name, created_at FROM classes WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Class not found")))
    }

    /// True when a class with `id` exists.
    pub async fn class_exists<'e, E>(executor: E, id: ClassId) -> Result<bool, AppError>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM classes WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }

    /// Every class with its students, classes by name and students by
    /// last name then first name.
    #[instrument(skip(db))]
    pub async fn get_classes_with_students(db: &PgPool) -> Result<Vec<ClassWithStudents>, AppError> {
        let classes = Self::get_classes(db).await?;

        let students = sqlx::query_as::<_, Student>(
            r#"SELECT s.id, s.first_name, s.last_name, s.email, s.class_id,
                      c.name AS class_name, s.created_at
               FROM students s
               JOIN classes c ON c.id = s.class_id
               ORDER BY s.last_name, s.first_name"#,
        )
        .fetch_all(db)
        .await?;

        let mut by_class: BTreeMap<ClassId, Vec<Student>> = BTreeMap::new();
        for student in students {
            by_class.entry(student.class_id).or_default().push(student);
        }

        Ok(classes
            .into_iter()
            .map(|class| ClassWithStudents {
                students: by_class.remove(&class.id).unwrap_or_default(),
                id: class.id,
                name: class.name,
            })
            .collect())
    }
}
