use std::env;

/// Default access-token lifetime: 24 hours.
pub const DEFAULT_ACCESS_EXPIRY: i64 = 60 * 60 * 24;
/// Default refresh-token lifetime: 30 days.
pub const DEFAULT_REFRESH_EXPIRY: i64 = 60 * 60 * 24 * 30;

/// Token signing configuration. Lifetimes are in seconds.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: crate::env_or("JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_EXPIRY),
            refresh_token_expiry: crate::env_or("JWT_REFRESH_EXPIRY", DEFAULT_REFRESH_EXPIRY),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}
