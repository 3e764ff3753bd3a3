//! Seed rows and the knobs that control how many are generated.

use classbook_models::{ClassId, SubjectId, TeacherId};

/// Every seeded teacher username starts with this; `clear-seed` keys on it.
pub const SEED_USERNAME_PREFIX: &str = "seed_";

/// Every seeded class name starts with this.
pub const SEED_CLASS_PREFIX: &str = "Seed ";

/// Password shared by all seeded teachers.
pub const SEED_PASSWORD: &str = "password123";

pub struct TeacherSeed {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

pub struct ClassSeed {
    pub name: String,
}

pub struct StudentSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub class_id: ClassId,
}

pub struct SubjectSeed {
    pub name: String,
    pub teacher_id: TeacherId,
}

pub struct ScheduleSeed {
    pub teacher_id: TeacherId,
    pub subject_id: SubjectId,
    pub class_id: ClassId,
    pub day_of_week: i16,
    pub lesson_number: i16,
}

#[derive(Clone)]
pub struct SeedConfig {
    pub teachers: usize,
    pub classes: usize,
    pub students_per_class: usize,
    pub subjects_per_teacher: usize,
    /// Weekly lessons booked per teacher, Monday to Friday.
    pub lessons_per_teacher: usize,
}

impl SeedConfig {
    pub fn new(teachers: usize) -> Self {
        Self {
            teachers,
            ..Self::default()
        }
    }

    pub fn with_classes(mut self, classes: usize, students_per_class: usize) -> Self {
        self.classes = classes;
        self.students_per_class = students_per_class;
        self
    }

    pub fn with_subjects(mut self, subjects_per_teacher: usize) -> Self {
        self.subjects_per_teacher = subjects_per_teacher;
        self
    }

    pub fn with_lessons(mut self, lessons_per_teacher: usize) -> Self {
        self.lessons_per_teacher = lessons_per_teacher;
        self
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            teachers: 5,
            classes: 8,
            students_per_class: 25,
            subjects_per_teacher: 3,
            lessons_per_teacher: 15,
        }
    }
}
