//! PYUSD Credit Server
//!
//! A small web service that sells usage credits for PYUSD on Solana devnet.
//! Buyers get an unsigned transfer transaction built for them, sign it in
//! their own wallet, and hand it back; once the cluster confirms the
//! transfer, the wallet's credit balance goes up. Credits live in memory and
//! can be spent through a deduction endpoint.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Blockchain**: hand-rolled legacy transaction codec plus a small
//!   JSON-RPC client, see [`solana`]
//! - **State**: in-memory credit ledger and single-use pending-transfer
//!   tokens, shared through [`state::AppState`]
//! - **Format**: JSON requests/responses in camelCase, plus two rendered
//!   HTML pages

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod services;
pub mod solana;
pub mod state;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Builds the full application router.
///
/// Kept separate from `main` so integration tests can drive the exact
/// routing, middleware, and state wiring the binary runs.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(handlers::pages::landing_page))
        .route("/wallet", get(handlers::wallet::wallet_summary))
        // Credit purchase flow
        .route(
            "/create-transaction",
            post(handlers::transactions::create_transaction),
        )
        .route(
            "/send-transaction",
            post(handlers::transactions::send_transaction),
        )
        // Credit spending
        .route("/deduct-credits", post(handlers::credits::deduct_credits))
        // Monitoring
        .route("/health", get(handlers::health::health_check))
        // The wallet page calls the API from the browser
        .layer(CorsLayer::permissive())
        // Distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
