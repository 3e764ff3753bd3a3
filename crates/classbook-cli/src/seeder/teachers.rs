//! Teacher seeding.

use classbook_models::TeacherId;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

use super::models::{SEED_USERNAME_PREFIX, TeacherSeed};

/// Generates `count` teachers sharing one password hash.
///
/// Usernames and emails carry the index, so they stay unique however the
/// fake names collide.
pub fn generate_teachers(count: usize, password_hash: &str) -> Vec<TeacherSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let slug = format!("{}.{}", first_name.to_lowercase(), last_name.to_lowercase())
                .replace(|c: char| !c.is_ascii_alphanumeric() && c != '.', "");

            TeacherSeed {
                username: format!("{}{}{}", SEED_USERNAME_PREFIX, slug, idx),
                email: format!("{}+teacher{}@example.com", slug, idx),
                password_hash: password_hash.to_string(),
            }
        })
        .collect()
}

pub async fn seed_teachers(
    db: &PgPool,
    count: usize,
    password_hash: &str,
) -> Result<Vec<TeacherId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👩‍🏫 Seeding {} teachers...", count);

    let teachers = generate_teachers(count, password_hash);
    let mut tx = db.begin().await?;

    // 3 params per teacher
    const BATCH_SIZE: usize = 1000;
    let mut ids = Vec::with_capacity(teachers.len());

    for chunk in teachers.chunks(BATCH_SIZE) {
        let mut query = String::from("INSERT INTO teachers (username, email, password_hash) VALUES ");
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            let p = i * 3;
            query.push_str(&format!("(${}, ${}, ${})", p + 1, p + 2, p + 3));
        }
        query.push_str(" RETURNING id");

        let mut q = sqlx::query_scalar::<_, TeacherId>(&query);
        for teacher in chunk {
            q = q
                .bind(&teacher.username)
                .bind(&teacher.email)
                .bind(&teacher.password_hash);
        }
        ids.extend(q.fetch_all(&mut *tx).await?);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} teachers in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Deletes seeded teachers; their subjects, schedules and entries cascade.
pub async fn clear_teachers(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let deleted = sqlx::query("DELETE FROM teachers WHERE starts_with(username, $1)")
        .bind(SEED_USERNAME_PREFIX)
        .execute(db)
        .await?
        .rows_affected();

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_teachers_are_unique_and_marked() {
        let teachers = generate_teachers(50, "$2b$04$hash");

        let mut usernames: Vec<&str> = teachers.iter().map(|t| t.username.as_str()).collect();
        usernames.sort();
        usernames.dedup();
        assert_eq!(usernames.len(), 50);

        assert!(teachers.iter().all(|t| t.username.starts_with(SEED_USERNAME_PREFIX)));
        assert!(teachers.iter().all(|t| t.email.ends_with("@example.com")));
    }
}
