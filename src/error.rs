//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::solana::SolanaError;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the
/// application. Each variant maps to a specific HTTP status code and error
/// message.
///
/// # Error Categories
///
/// - **Validation Errors**: Missing fields or unparseable request bodies
/// - **Business Logic Errors**: Spending more credits than a wallet holds,
///   or submitting against an unknown pending transfer
/// - **Blockchain Errors**: Anything that went wrong while talking to the
///   Solana node or handling transaction payloads, wrapped together with the
///   endpoint-specific message clients should see
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required request field was absent.
    ///
    /// Returns HTTP 400 Bad Request. The field name is phrased the way the
    /// frontend shows it, e.g. "Wallet address is required".
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Request body could not be parsed against the endpoint's schema.
    ///
    /// Returns HTTP 400 Bad Request with the deserializer's message.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Wallet holds fewer credits than the spend costs.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Insufficient credits")]
    InsufficientCredits,

    /// Submission referenced a pending transfer that was never issued, was
    /// issued to a different wallet, expired, or was already consumed.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Unknown or expired pending transaction")]
    UnknownPendingTransfer,

    /// A blockchain operation failed.
    ///
    /// Returns HTTP 500 Internal Server Error. Clients get `context`; the
    /// underlying [`SolanaError`] goes to the log, and any program logs the
    /// node attached are passed through in the response body.
    #[error("{context}")]
    Blockchain {
        context: &'static str,
        #[source]
        source: SolanaError,
    },
}

impl AppError {
    /// Wraps a [`SolanaError`] with the message the failing endpoint
    /// answers with.
    pub fn blockchain(context: &'static str, source: SolanaError) -> Self {
        Self::Blockchain { context, source }
    }
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "success": false,
///   "error": "Human-readable error message",
///   "logs": ["Program log: ..."]
/// }
/// ```
/// The `logs` array only appears when the node rejected a submission and
/// included program logs in its error.
///
/// # Status Code Mapping
///
/// - `MissingField` → 400 Bad Request
/// - `InvalidBody` → 400 Bad Request
/// - `InsufficientCredits` → 400 Bad Request
/// - `UnknownPendingTransfer` → 400 Bad Request
/// - `Blockchain` → 500 Internal Server Error (details stay in the log)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Blockchain { context, source } => {
                tracing::error!(error = %source, context, "blockchain operation failed");
                let mut body = json!({
                    "success": false,
                    "error": context,
                });
                if let Some(logs) = source.logs() {
                    body["logs"] = json!(logs);
                }
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            other => {
                let body = json!({
                    "success": false,
                    "error": other.to_string(),
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
        }
    }
}
