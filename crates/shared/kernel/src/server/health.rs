use axum::http::header;
use axum::{Json, response::IntoResponse};
use dhub_derive::{api_handler, api_model};
use dhub_domain::constants::SYSTEM_TAG;
use std::sync::LazyLock;
use std::time::Instant;

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Liveness probe payload
#[api_model]
struct HealthResponse {
    /// Service name
    service: &'static str,
    /// Status
    status: &'static str,
    /// Version
    version: &'static str,
    /// Uptime in seconds
    uptime: u64,
}

#[api_handler(
    get,
    path = "/health",
    responses((status = OK, description = "Healthcheck endpoint", body = HealthResponse)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler() -> impl IntoResponse {
    let body = HealthResponse {
        service: env!("CARGO_PKG_NAME"),
        status: "up",
        version: env!("CARGO_PKG_VERSION"),
        uptime: START_TIME.elapsed().as_secs(),
    };

    // Probes must never get a cached answer.
    let no_cache = [
        (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
        (header::PRAGMA, "no-cache"),
    ];

    (no_cache, Json(body))
}
