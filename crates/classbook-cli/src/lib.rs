//! # Classbook CLI
//!
//! Account administration and database seeding for development and testing.
//!
//! ## Usage
//!
//! ```ignore
//! use classbook_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(5); // 5 teachers with defaults
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
