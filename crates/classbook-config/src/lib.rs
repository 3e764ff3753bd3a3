//! # Classbook Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and lifetimes
//! - [`cors`]: allowed browser origins
//! - [`database`]: connection string and pool size
//! - [`server`]: listen address
//! - [`bootstrap`]: the account created at startup unless its username is taken
//!
//! Every struct is built once at startup with `from_env()` and then shared
//! read-only.
//!
//! # Example
//!
//! ```ignore
//! use classbook_config::{JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server = ServerConfig::from_env();
//! println!("listening on {}", server.address());
//! ```

pub mod bootstrap;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use bootstrap::BootstrapConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads `key` and parses it, falling back to `default` when unset or invalid.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Reads a boolean flag; `true`/`1` enable it, anything else disables it.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(default)
}
