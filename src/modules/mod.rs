pub mod auth;
pub mod classes;
pub mod entries;
pub mod health;
pub mod schedules;
pub mod students;
pub mod subjects;
