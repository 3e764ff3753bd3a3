//! Subject and schedule seeding.

use classbook_models::{ClassId, SubjectId, TeacherId};
use fake::Fake;
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

use super::models::{ScheduleSeed, SubjectSeed};

const SUBJECT_NAMES: [&str; 12] = [
    "Mathematics",
    "Algebra",
    "Geometry",
    "Physics",
    "Chemistry",
    "Biology",
    "History",
    "Geography",
    "Literature",
    "English",
    "Computer Science",
    "Art",
];

/// School days used for seeded lessons (Monday to Friday).
const SCHOOL_DAYS: usize = 5;
const MAX_LESSONS: usize = SCHOOL_DAYS * 12;

/// Picks `per_teacher` distinct subject names for every teacher.
pub fn generate_subjects(teacher_ids: &[TeacherId], per_teacher: usize) -> Vec<SubjectSeed> {
    let per_teacher = per_teacher.min(SUBJECT_NAMES.len());

    teacher_ids
        .par_iter()
        .flat_map(|&teacher_id| {
            let offset: usize = (0..SUBJECT_NAMES.len()).fake();
            (0..per_teacher)
                .map(|i| SubjectSeed {
                    name: SUBJECT_NAMES[(offset + i) % SUBJECT_NAMES.len()].to_string(),
                    teacher_id,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Books `lessons_per_teacher` slots per teacher.
///
/// Slots fill Monday lesson 1, Tuesday lesson 1, ... Friday lesson 1, Monday
/// lesson 2 and so on, so a teacher never holds the same slot twice.
pub fn generate_schedules(
    subjects: &[(SubjectId, TeacherId)],
    class_ids: &[ClassId],
    lessons_per_teacher: usize,
) -> Vec<ScheduleSeed> {
    if class_ids.is_empty() {
        return Vec::new();
    }

    let mut by_teacher: Vec<(TeacherId, Vec<SubjectId>)> = Vec::new();
    for &(subject_id, teacher_id) in subjects {
        match by_teacher.iter_mut().find(|(t, _)| *t == teacher_id) {
            Some((_, ids)) => ids.push(subject_id),
            None => by_teacher.push((teacher_id, vec![subject_id])),
        }
    }

    let lessons = lessons_per_teacher.min(MAX_LESSONS);

    by_teacher
        .par_iter()
        .flat_map(|(teacher_id, subject_ids)| {
            (0..lessons)
                .map(|slot| {
                    let class_idx: usize = (0..class_ids.len()).fake();
                    ScheduleSeed {
                        teacher_id: *teacher_id,
                        subject_id: subject_ids[slot % subject_ids.len()],
                        class_id: class_ids[class_idx],
                        day_of_week: (slot % SCHOOL_DAYS) as i16,
                        lesson_number: (slot / SCHOOL_DAYS + 1) as i16,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_subjects(
    db: &PgPool,
    teacher_ids: &[TeacherId],
    per_teacher: usize,
) -> Result<Vec<(SubjectId, TeacherId)>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let subjects = generate_subjects(teacher_ids, per_teacher);
    println!("📚 Seeding {} subjects...", subjects.len());

    let mut tx = db.begin().await?;

    // 2 params per subject
    const BATCH_SIZE: usize = 2000;
    let mut ids = Vec::with_capacity(subjects.len());

    for chunk in subjects.chunks(BATCH_SIZE) {
        let mut query = String::from("INSERT INTO subjects (name, teacher_id) VALUES ");
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            let p = i * 2;
            query.push_str(&format!("(${}, ${})", p + 1, p + 2));
        }
        query.push_str(" RETURNING id, teacher_id");

        let mut q = sqlx::query_as::<_, (SubjectId, TeacherId)>(&query);
        for subject in chunk {
            q = q.bind(&subject.name).bind(subject.teacher_id);
        }
        ids.extend(q.fetch_all(&mut *tx).await?);
    }

    tx.commit().await?;

    println!("   ✓ Inserted {} subjects in {:?}", ids.len(), start_time.elapsed());
    Ok(ids)
}

pub async fn seed_schedules(
    db: &PgPool,
    subjects: &[(SubjectId, TeacherId)],
    class_ids: &[ClassId],
    lessons_per_teacher: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let schedules = generate_schedules(subjects, class_ids, lessons_per_teacher);
    println!("🗓️  Seeding {} schedule slots...", schedules.len());

    let mut tx = db.begin().await?;

    // 5 params per slot
    const BATCH_SIZE: usize = 1000;

    for chunk in schedules.chunks(BATCH_SIZE) {
        let mut query = String::from(
            "INSERT INTO schedules (teacher_id, subject_id, class_id, day_of_week, lesson_number) VALUES ",
        );
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            let p = i * 5;
            query.push_str(&format!(
                "(${}, ${}, ${}, ${}, ${})",
                p + 1,
                p + 2,
                p + 3,
                p + 4,
                p + 5
            ));
        }
        query.push_str(" ON CONFLICT DO NOTHING");

        let mut q = sqlx::query(&query);
        for slot in chunk {
            q = q
                .bind(slot.teacher_id)
                .bind(slot.subject_id)
                .bind(slot.class_id)
                .bind(slot.day_of_week)
                .bind(slot.lesson_number);
        }
        q.execute(&mut *tx).await?;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} schedule slots in {:?}",
        schedules.len(),
        start_time.elapsed()
    );
    Ok(schedules.len())
}
