use std::env;

/// Account created at startup when no teacher with `username` exists.
#[derive(Clone)]
pub struct BootstrapConfig {
    pub enabled: bool,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl BootstrapConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: crate::env_flag("BOOTSTRAP_ENABLED", true),
            username: env::var("BOOTSTRAP_USERNAME").unwrap_or_else(|_| "test".to_string()),
            email: env::var("BOOTSTRAP_EMAIL").unwrap_or_else(|_| "test@example.com".to_string()),
            password: env::var("BOOTSTRAP_PASSWORD").unwrap_or_else(|_| "test123".to_string()),
        }
    }
}

impl std::fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("enabled", &self.enabled)
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
