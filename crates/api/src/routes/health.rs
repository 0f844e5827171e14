//! Liveness endpoint, mounted at the root rather than under `/api`.

use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database check fails.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Round trip of the `SELECT 1` query.
    pub db_latency_ms: u64,
    /// Open connections in the pool, and how many of them are idle.
    pub pool_size: u32,
    pub pool_idle: usize,
}

/// GET /health
///
/// Always answers 200 so load balancers can read the body; a failing
/// database shows up as `status: "degraded"`.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let started = Instant::now();
    let check = okr_db::health_check(&state.pool).await;
    let db_latency_ms = started.elapsed().as_millis() as u64;

    if let Err(e) = &check {
        tracing::warn!(error = %e, db_latency_ms, "Health check: database unreachable");
    }
    let db_healthy = check.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        db_latency_ms,
        pool_size: state.pool.size(),
        pool_idle: state.pool.num_idle(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
