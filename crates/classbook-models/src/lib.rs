//! # Classbook Models
//!
//! Database entities, request/response DTOs and strongly-typed ids.
//!
//! # Modules
//!
//! - [`ids`]: UUID newtypes for every entity
//! - [`teachers`]: the teacher account (the authenticated identity)
//! - [`auth`]: registration, login and token DTOs
//! - [`classes`]: school classes
//! - [`students`]: students belonging to a class
//! - [`subjects`]: subjects owned by a teacher
//! - [`schedules`]: weekly lesson slots owned by a teacher
//! - [`entries`]: per-lesson journal entries with attendance and grades

pub mod auth;
pub mod classes;
pub mod entries;
pub mod ids;
pub mod schedules;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use ids::{ClassId, EntryId, ScheduleId, StudentId, SubjectId, TeacherId};

pub use auth::{LoginForm, MessageResponse, RefreshTokenRequest, RegisterTeacherDto, TokenResponse};
pub use classes::{Class, ClassWithStudents, CreateClassDto};
pub use entries::{
    Attendance, EntryFilterParams, GradeInfo, Grades, JournalEntry, JournalEntryDto,
};
pub use schedules::{DaySchedule, Schedule, ScheduleDto, WeekSchedule};
pub use students::{CreateStudentDto, Student};
pub use subjects::{CreateSubjectDto, Subject};
pub use teachers::{Teacher, TeacherCredentials};
