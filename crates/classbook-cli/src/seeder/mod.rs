//! Fake data seeding.
//!
//! Generation runs on rayon; inserts are batched multi-row statements, one
//! transaction per table. Seeded rows are marked (`seed_` usernames,
//! `Seed ` class names) so [`clear_all`] removes only what was seeded.

mod classes;
mod models;
mod subjects;
mod teachers;

use sqlx::PgPool;
use std::time::Instant;

pub use models::{SEED_CLASS_PREFIX, SEED_PASSWORD, SEED_USERNAME_PREFIX, SeedConfig};

pub use classes::{generate_classes, generate_students, seed_classes, seed_students};
pub use subjects::{generate_schedules, generate_subjects, seed_schedules, seed_subjects};
pub use teachers::{generate_teachers, seed_teachers};

/// Seeds teachers, classes, students, subjects and schedules.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...\n");

    let password_hash = classbook_core::hash_password(SEED_PASSWORD)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let teacher_ids = seed_teachers(db, config.teachers, &password_hash).await?;
    let class_ids = seed_classes(db, config.classes).await?;
    let students = seed_students(db, &class_ids, config.students_per_class).await?;
    let subjects = seed_subjects(db, &teacher_ids, config.subjects_per_teacher).await?;
    let slots = seed_schedules(db, &subjects, &class_ids, config.lessons_per_teacher).await?;

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());
    println!("   Teachers:  {}", teacher_ids.len());
    println!("   Classes:   {}", class_ids.len());
    println!("   Students:  {}", students);
    println!("   Subjects:  {}", subjects.len());
    println!("   Schedules: {}", slots);
    println!("\n   Seeded teachers log in with password '{}'", SEED_PASSWORD);

    Ok(())
}

/// Removes seeded teachers and classes together with everything that
/// cascades from them.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let teachers = teachers::clear_teachers(db).await?;
    let classes = classes::clear_classes(db).await?;

    println!(
        "   ✓ Deleted {} teachers and {} classes in {:?}",
        teachers,
        classes,
        start_time.elapsed()
    );

    Ok(())
}
