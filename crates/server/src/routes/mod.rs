//! API route handlers
//!
//! - `health`: liveness with store size
//! - `strings`: create, fetch, filter, query and delete analyzed strings

pub mod health;
pub mod strings;

use crate::error::ServerError;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Root endpoint (GET /)
///
/// # Response
///
/// ```json
/// { "message": "String Analyzer API is running 🚀" }
/// ```
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "message": "String Analyzer API is running 🚀",
    }))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
