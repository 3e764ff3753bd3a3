//! Weekly lesson slots.
//!
//! A schedule row pins one of the caller's subjects to a class at a given
//! `(day_of_week, lesson_number)`. Days are numbered from Monday = 0 to
//! Sunday = 6. A teacher cannot book the same slot twice for the same class.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{ClassId, ScheduleId, SubjectId, TeacherId};

pub const MAX_LESSON_NUMBER: i16 = 12;

/// A schedule slot joined with teacher, subject and class names.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    pub id: ScheduleId,
    pub teacher_id: TeacherId,
    pub teacher_name: String,
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub class_id: ClassId,
    pub class_name: String,
    pub day_of_week: i16,
    pub lesson_number: i16,
    pub created_at: DateTime<Utc>,
}

/// Body for both creating and replacing a slot.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ScheduleDto {
    pub subject_id: SubjectId,
    pub class_id: ClassId,
    #[validate(range(min = 0, max = 6, message = "day_of_week must be between 0 (Monday) and 6 (Sunday)"))]
    pub day_of_week: i16,
    #[validate(range(min = 1, max = 12, message = "lesson_number must be between 1 and 12"))]
    pub lesson_number: i16,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct DaySchedule {
    pub lessons: Vec<Schedule>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct WeekSchedule {
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
    pub sunday: DaySchedule,
}

impl WeekSchedule {
    /// Buckets slots by weekday, each day ordered by lesson number.
    ///
    /// Slots with an out-of-range day are dropped.
    pub fn from_schedules(schedules: Vec<Schedule>) -> Self {
        let mut week = WeekSchedule::default();

        for schedule in schedules {
            if let Some(day) = week.day_mut(schedule.day_of_week) {
                day.lessons.push(schedule);
            }
        }

        for day in week.days_mut() {
            day.lessons.sort_by_key(|s| s.lesson_number);
        }

        week
    }

    fn day_mut(&mut self, day_of_week: i16) -> Option<&mut DaySchedule> {
        match day_of_week {
            0 => Some(&mut self.monday),
            1 => Some(&mut self.tuesday),
            2 => Some(&mut self.wednesday),
            3 => Some(&mut self.thursday),
            4 => Some(&mut self.friday),
            5 => Some(&mut self.saturday),
            6 => Some(&mut self.sunday),
            _ => None,
        }
    }

    fn days_mut(&mut self) -> [&mut DaySchedule; 7] {
        [
            &mut self.monday,
            &mut self.tuesday,
            &mut self.wednesday,
            &mut self.thursday,
            &mut self.friday,
            &mut self.saturday,
            &mut self.sunday,
        ]
    }
}
