//! Health check endpoint for service monitoring.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{error::AppError, state::AppState};

/// Health check response.
///
/// Returns service status and RPC node reachability.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// What the Solana node's own health check reported
    pub node: String,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// # Checks
///
/// - RPC node reachability (calls the node's `getHealth`)
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "node": "ok",
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
///
/// # Response (500 Internal Server Error)
///
/// If the node is unreachable or unhealthy, returns standard error response.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, AppError> {
    // Verify node reachability with its own health check
    let node = state
        .rpc
        .get_health()
        .await
        .map_err(|source| AppError::blockchain("Error checking node health", source))?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        node,
        timestamp: Utc::now(),
    }))
}
