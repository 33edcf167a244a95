//! Transaction HTTP handlers.
//!
//! This module implements the two halves of a credit purchase:
//! - POST /create-transaction - Build an unsigned PYUSD transfer
//! - POST /send-transaction - Relay the signed transfer and grant the credit

use axum::{Json, extract::State};
use tracing::info;

use crate::{
    config,
    error::AppError,
    extract::ValidJson,
    models::transaction::{
        CreateTransactionRequest, CreateTransactionResponse, SendTransactionRequest,
        SendTransactionResponse,
    },
    services::transfer_service,
    state::AppState,
};

/// Build the unsigned purchase transaction for a wallet.
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
///   "transaction": "AQAAAAAA...base64...",
///   "pendingId": "550e8400-..."
/// }
/// ```
///
/// The transaction transfers 0.25 PYUSD to the service wallet and includes
/// instructions creating either side's associated token account when it is
/// missing on chain. The `pendingId` must come back on submission.
pub async fn create_transaction(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<CreateTransactionRequest>,
) -> Result<Json<CreateTransactionResponse>, AppError> {
    let wallet_address = request
        .wallet_address
        .ok_or(AppError::MissingField("Wallet address"))?;

    let transaction = transfer_service::build_transfer_transaction(&state.rpc, &wallet_address)
        .await
        .map_err(|source| AppError::blockchain("Error creating transaction", source))?;

    let pending_id = state.pending.issue(&wallet_address).await;
    info!(wallet = %wallet_address, %pending_id, "prepared credit purchase transaction");

    Ok(Json(CreateTransactionResponse {
        success: true,
        transaction,
        pending_id,
    }))
}

/// Relay a signed purchase transaction and credit the wallet.
///
/// # Request Body
///
/// ```json
/// {
///   "signedTransaction": "AZx8...base64...",
///   "walletAddress": "GmaDrppBC7P5ARKV8g3djiwP89vz1jLK23V2GBjuAEGB",
///   "pendingId": "550e8400-..."
/// }
/// ```
///
/// # Response (200)
///
/// ```json
/// {
///   "success": true,
///   "signature": "5j1Yh...base58...",
///   "credits": 1
/// }
/// ```
///
/// # Validation
///
/// - The pending id must be live, issued to this wallet, and not yet used
/// - Every required signature must verify against the message
/// - The credit lands only after the cluster confirms the transaction, and
///   the pending id is consumed at the same moment, so resubmitting the same
///   transfer can never earn a second credit
pub async fn send_transaction(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<SendTransactionRequest>,
) -> Result<Json<SendTransactionResponse>, AppError> {
    let signed_transaction = request
        .signed_transaction
        .ok_or(AppError::MissingField("Signed transaction"))?;
    let wallet_address = request
        .wallet_address
        .ok_or(AppError::MissingField("Wallet address"))?;
    let pending_id = request
        .pending_id
        .ok_or(AppError::MissingField("Pending transaction id"))?;

    // Unknown or expired tokens fail here, before the network round trip
    if !state.pending.matches(&pending_id, &wallet_address).await {
        return Err(AppError::UnknownPendingTransfer);
    }

    let signature = transfer_service::submit_signed_transaction(&state.rpc, &signed_transaction)
        .await
        .map_err(|source| AppError::blockchain("Error sending transaction", source))?;

    // Consume the token only now that the transfer is confirmed; a parallel
    // submission of the same token loses here and earns nothing
    if !state.pending.consume(&pending_id, &wallet_address).await {
        return Err(AppError::UnknownPendingTransfer);
    }
    let credits = state
        .ledger
        .credit(&wallet_address, config::CREDITS_PER_PURCHASE)
        .await;
    info!(wallet = %wallet_address, %signature, credits, "credit purchase confirmed");

    Ok(Json(SendTransactionResponse {
        success: true,
        signature,
        credits,
    }))
}
