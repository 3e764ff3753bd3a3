//! Journal entries: what was taught in one lesson, who attended and how
//! they were graded.
//!
//! Attendance and grades are keyed by student id and stored as JSONB. Both
//! default to an empty object, so clients always get a map back.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{ClassId, EntryId, StudentId, SubjectId};

/// Attendance mark per student, e.g. `"present"`, `"absent"`, `"late"`.
pub type Attendance = BTreeMap<StudentId, String>;

/// Grade and optional remark per student.
pub type Grades = BTreeMap<StudentId, GradeInfo>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GradeInfo {
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct JournalEntry {
    pub id: EntryId,
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub class_id: ClassId,
    pub class_name: String,
    pub date: DateTime<Utc>,
    pub topic: String,
    #[sqlx(json)]
    #[schema(value_type = Object)]
    pub attendance: Attendance,
    pub homework: Option<String>,
    #[sqlx(json)]
    #[schema(value_type = Object)]
    pub grades: Grades,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating an entry and for replacing one wholesale.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct JournalEntryDto {
    pub subject_id: SubjectId,
    pub class_id: ClassId,
    pub date: DateTime<Utc>,
    #[validate(length(min = 1, max = 500, message = "topic must be 1-500 characters"))]
    pub topic: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub attendance: Attendance,
    #[validate(length(max = 2000, message = "homework must be at most 2000 characters"))]
    pub homework: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub grades: Grades,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EntryFilterParams {
    /// Only entries for this subject.
    #[param(value_type = Option<String>, format = Uuid)]
    pub subject_id: Option<SubjectId>,
    /// Only entries for this class.
    #[param(value_type = Option<String>, format = Uuid)]
    pub class_id: Option<ClassId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dto_maps_default_to_empty() {
        let dto: JournalEntryDto = serde_json::from_value(json!({
            "subject_id": SubjectId::new(),
            "class_id": ClassId::new(),
            "date": "2025-03-10T08:00:00Z",
            "topic": "Fractions",
        }))
        .unwrap();

        assert!(dto.attendance.is_empty());
        assert!(dto.grades.is_empty());
        assert!(dto.homework.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_dto_parses_student_maps() {
        let student = StudentId::new();
        let dto: JournalEntryDto = serde_json::from_value(json!({
            "subject_id": SubjectId::new(),
            "class_id": ClassId::new(),
            "date": "2025-03-10T08:00:00Z",
            "topic": "Fractions",
            "attendance": { student.to_string(): "present" },
            "grades": { student.to_string(): { "grade": "A" } },
        }))
        .unwrap();

        assert_eq!(dto.attendance.get(&student).map(String::as_str), Some("present"));
        let grade = dto.grades.get(&student).unwrap();
        assert_eq!(grade.grade.as_deref(), Some("A"));
        assert!(grade.comment.is_none());
    }

    #[test]
    fn test_dto_rejects_non_uuid_student_key() {
        let result: Result<JournalEntryDto, _> = serde_json::from_value(json!({
            "subject_id": SubjectId::new(),
            "class_id": ClassId::new(),
            "date": "2025-03-10T08:00:00Z",
            "topic": "Fractions",
            "attendance": { "student-1": "present" },
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_dto_empty_topic_invalid() {
        let dto = JournalEntryDto {
            subject_id: SubjectId::new(),
            class_id: ClassId::new(),
            date: Utc::now(),
            topic: String::new(),
            attendance: Attendance::new(),
            homework: None,
            grades: Grades::new(),
        };
        assert!(dto.validate().unwrap_err().field_errors().contains_key("topic"));
    }
}
