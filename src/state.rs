use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;

use classbook_auth::TokenService;
use classbook_config::{CorsConfig, JwtConfig};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: TokenService,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    /// `None` when metrics are disabled; `/metrics` is not mounted then.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            db,
            tokens: TokenService::new(&jwt_config),
            jwt_config,
            cors_config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("jwt_config", &self.jwt_config)
            .field("cors_config", &self.cors_config)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
