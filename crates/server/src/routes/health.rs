use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;
use strana::PipelineError;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

/// Health check endpoint (liveness)
///
/// Also reports how many strings are stored, which doubles as a check that
/// the store lock is usable.
pub async fn health_check(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let uptime = SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let stored = state.store.len().map_err(PipelineError::from)?;

    Ok(Json(json!({
        "status": "healthy",
        "service": "strana-server",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime,
        "stored_strings": stored,
    })))
}
