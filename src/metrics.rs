//! Prometheus metrics.
//!
//! The recorder is global. When it is not installed (metrics disabled, or in
//! tests) every `counter!`/`histogram!` call below is a no-op.

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::{Duration, Instant};

use classbook_auth::TokenKind;

use crate::state::AppState;

const REQUEST_DURATION: &str = "http_request_duration_seconds";

/// Installs the Prometheus recorder and spawns its upkeep task.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION.to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(handle)
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    histogram!(REQUEST_DURATION, "method" => method, "path" => path).record(latency);
    gauge!("http_requests_active").decrement(1.0);

    response
}

pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn track_login_success() {
    counter!("auth_login_total", "outcome" => "success").increment(1);
}

pub fn track_login_failure() {
    counter!("auth_login_total", "outcome" => "failure").increment(1);
}

pub fn track_token_issued(kind: TokenKind) {
    counter!("auth_tokens_issued_total", "kind" => kind.as_str()).increment(1);
}

/// A bearer token or refresh token was refused.
pub fn track_auth_rejection() {
    counter!("auth_rejections_total").increment(1);
}
