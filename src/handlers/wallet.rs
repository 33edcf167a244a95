//! Wallet view handler.

use axum::{
    Json,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};

use crate::{
    error::AppError,
    models::wallet::WalletQuery,
    services::wallet_service,
    state::AppState,
    views,
};

/// Show one wallet's balances and credits.
///
/// # Endpoint
///
/// `GET /wallet?address=<base58>[&json=true]`
///
/// With `json=true` the response is the bare summary:
///
/// ```json
/// {
///   "balanceInSol": 1.5,
///   "pyusdBalance": 10.25,
///   "credits": 3
/// }
/// ```
///
/// Without it, the same numbers are rendered into the interactive wallet
/// page. A missing `address` is a 400; an address the node rejects surfaces
/// as a 500 from the balance lookup.
pub async fn wallet_summary(
    State(state): State<AppState>,
    Query(query): Query<WalletQuery>,
) -> Result<Response, AppError> {
    let address = query
        .address
        .ok_or(AppError::MissingField("Wallet address"))?;

    let summary = wallet_service::fetch_wallet_summary(&state.rpc, &state.ledger, &address)
        .await
        .map_err(|source| AppError::blockchain("Error fetching wallet info", source))?;

    if query.json.as_deref() == Some("true") {
        Ok(Json(summary).into_response())
    } else {
        Ok(Html(views::wallet_page(&address, &summary)).into_response())
    }
}
