use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use classbook_models::{
    Class, ClassWithStudents, CreateClassDto, CreateStudentDto, CreateSubjectDto, DaySchedule,
    GradeInfo, JournalEntry, JournalEntryDto, LoginForm, MessageResponse, RefreshTokenRequest,
    RegisterTeacherDto, Schedule, ScheduleDto, Student, Subject, Teacher, TokenResponse,
    WeekSchedule,
};

use crate::modules::auth::model::ErrorResponse;
use crate::modules::health::model::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::root,
        crate::modules::health::controller::health,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::me,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::get_classes_with_students,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::delete_student,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::schedules::controller::create_schedule,
        crate::modules::schedules::controller::get_schedules,
        crate::modules::schedules::controller::get_week,
        crate::modules::schedules::controller::get_class_schedules,
        crate::modules::schedules::controller::get_schedule,
        crate::modules::schedules::controller::update_schedule,
        crate::modules::schedules::controller::delete_schedule,
        crate::modules::entries::controller::create_entry,
        crate::modules::entries::controller::get_entries,
        crate::modules::entries::controller::get_entry,
        crate::modules::entries::controller::update_entry,
        crate::modules::entries::controller::delete_entry,
    ),
    components(
        schemas(
            Teacher,
            RegisterTeacherDto,
            LoginForm,
            RefreshTokenRequest,
            TokenResponse,
            MessageResponse,
            ErrorResponse,
            HealthResponse,
            Class,
            CreateClassDto,
            ClassWithStudents,
            Student,
            CreateStudentDto,
            Subject,
            CreateSubjectDto,
            Schedule,
            ScheduleDto,
            DaySchedule,
            WeekSchedule,
            JournalEntry,
            JournalEntryDto,
            GradeInfo,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Service", description = "Liveness and health"),
        (name = "Authentication", description = "Registration, login and tokens"),
        (name = "Classes", description = "School classes"),
        (name = "Students", description = "Students and their classes"),
        (name = "Subjects", description = "The caller's subjects"),
        (name = "Schedules", description = "The caller's weekly lesson slots"),
        (name = "Journal Entries", description = "Per-lesson topic, attendance, homework and grades")
    ),
    info(
        title = "Classbook API",
        version = "0.1.0",
        description = "Teacher journal backend: classes, students, subjects, schedules and lesson entries behind bearer-token authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/token",
            "/api/auth/refresh",
            "/api/classes-with-students",
            "/api/schedules/week",
            "/api/entries/{id}",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
