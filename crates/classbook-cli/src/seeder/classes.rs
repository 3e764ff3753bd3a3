//! Class and student seeding.

use classbook_models::ClassId;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

use super::models::{ClassSeed, SEED_CLASS_PREFIX, StudentSeed};

const SECTIONS: [char; 4] = ['A', 'B', 'C', 'D'];

/// `Seed 1A`, `Seed 1B`, ... `Seed 2A`, ...
pub fn generate_classes(count: usize) -> Vec<ClassSeed> {
    (0..count)
        .map(|idx| ClassSeed {
            name: format!(
                "{}{}{}",
                SEED_CLASS_PREFIX,
                idx / SECTIONS.len() + 1,
                SECTIONS[idx % SECTIONS.len()]
            ),
        })
        .collect()
}

/// Every other student gets an email address.
pub fn generate_students(class_ids: &[ClassId], students_per_class: usize) -> Vec<StudentSeed> {
    class_ids
        .par_iter()
        .enumerate()
        .flat_map(|(class_idx, &class_id)| {
            (0..students_per_class)
                .map(|student_idx| {
                    let first_name: String = FirstName().fake();
                    let last_name: String = LastName().fake();
                    let email = (student_idx % 2 == 0).then(|| {
                        format!(
                            "student{}@example.com",
                            class_idx * 1000 + student_idx
                        )
                    });
                    StudentSeed {
                        first_name,
                        last_name,
                        email,
                        class_id,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_classes(db: &PgPool, count: usize) -> Result<Vec<ClassId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🏫 Seeding {} classes...", count);

    let classes = generate_classes(count);
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(classes.len());

    for class in &classes {
        let id = sqlx::query_scalar::<_, ClassId>(
            "INSERT INTO classes (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(&class.name)
        .fetch_one(&mut *tx)
        .await?;
        ids.push(id);
    }

    tx.commit().await?;

    println!("   ✓ Inserted {} classes in {:?}", ids.len(), start_time.elapsed());
    Ok(ids)
}

pub async fn seed_students(
    db: &PgPool,
    class_ids: &[ClassId],
    students_per_class: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "🎓 Seeding {} students ({} per class)...",
        class_ids.len() * students_per_class,
        students_per_class
    );

    let students = generate_students(class_ids, students_per_class);
    let mut tx = db.begin().await?;

    // 4 params per student
    const BATCH_SIZE: usize = 1000;

    for chunk in students.chunks(BATCH_SIZE) {
        let mut query =
            String::from("INSERT INTO students (first_name, last_name, email, class_id) VALUES ");
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            let p = i * 4;
            query.push_str(&format!("(${}, ${}, ${}, ${})", p + 1, p + 2, p + 3, p + 4));
        }

        let mut q = sqlx::query(&query);
        for student in chunk {
            q = q
                .bind(&student.first_name)
                .bind(&student.last_name)
                .bind(&student.email)
                .bind(student.class_id);
        }
        q.execute(&mut *tx).await?;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        students.len(),
        start_time.elapsed()
    );
    Ok(students.len())
}

/// Deletes seeded classes; their students, schedules and entries cascade.
pub async fn clear_classes(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let deleted = sqlx::query("DELETE FROM classes WHERE starts_with(name, $1)")
        .bind(SEED_CLASS_PREFIX)
        .execute(db)
        .await?
        .rows_affected();

    Ok(deleted)
}
