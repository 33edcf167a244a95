//! Credit spending handler.

use axum::{Json, extract::State};
use tracing::info;

use crate::{
    config,
    error::AppError,
    extract::ValidJson,
    models::credits::{CreditBalanceResponse, DeductCreditsRequest},
    state::AppState,
};

/// Spend two credits from a wallet's balance.
///
/// # Request Body
///
/// ```json
/// {
///   "walletAddress": "GmaDrppBC7P5ARKV8g3djiwP89vz1jLK23V2GBjuAEGB"
/// }
/// ```
///
/// # Response (200)
///
/// ```json
/// {
///   "success": true,
///   "credits": 1
/// }
/// ```
///
/// Wallets holding fewer than two credits get a 400 and keep their balance.
pub async fn deduct_credits(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<DeductCreditsRequest>,
) -> Result<Json<CreditBalanceResponse>, AppError> {
    let wallet_address = request
        .wallet_address
        .ok_or(AppError::MissingField("Wallet address"))?;

    let credits = state
        .ledger
        .spend(&wallet_address, config::CREDIT_SPEND_COST)
        .await?;
    info!(wallet = %wallet_address, credits, "credits spent");

    Ok(Json(CreditBalanceResponse {
        success: true,
        credits,
    }))
}
