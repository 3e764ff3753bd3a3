//! # Classbook Core
//!
//! Foundational types shared by every Classbook crate:
//!
//! - [`errors`]: the [`AppError`] type and its HTTP response mapping
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use classbook_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secret")?;
//! assert!(verify_password("secret", &hash));
//!
//! let error = AppError::not_found(anyhow::anyhow!("Class not found"));
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{PASSWORD_HASH_COST, hash_password, verify_dummy_password, verify_password};
