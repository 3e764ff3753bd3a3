//! Request extractors for cross-cutting concerns.
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <access token>`
//! 2. [`auth::CurrentTeacher`] verifies the token and loads the teacher
//! 3. The handler runs with the teacher in hand, or the request gets a 401
//!
//! ```ignore
//! use crate::middleware::auth::CurrentTeacher;
//!
//! async fn get_me(CurrentTeacher(teacher): CurrentTeacher) -> Json<Teacher> {
//!     Json(teacher)
//! }
//! ```

pub mod auth;
