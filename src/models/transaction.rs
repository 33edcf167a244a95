//! Request/response types for transaction construction and submission.
//!
//! This module defines:
//! - `CreateTransactionRequest` / `CreateTransactionResponse`: build an
//!   unsigned PYUSD transfer for a wallet to sign
//! - `SendTransactionRequest` / `SendTransactionResponse`: relay the signed
//!   transfer and report the earned credit balance
//!
//! All field names cross the wire in camelCase to match the wallet frontend.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to construct an unsigned credit purchase transaction.
///
/// # JSON Example
///
/// ```json
/// {
///   "walletAddress": "GmaDrppBC7P5ARKV8g3djiwP89vz1jLK23V2GBjuAEGB"
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    /// Base58 address of the buying wallet; it pays fees and signs.
    ///
    /// Optional in the schema so a missing field can be answered with the
    /// specific "Wallet address is required" message instead of a generic
    /// deserialization error.
    pub wallet_address: Option<String>,
}

/// Response carrying the unsigned transaction.
///
/// # JSON Example
///
/// ```json
/// {
///   "success": true,
///   "transaction": "AQAAAAAA...base64...",
///   "pendingId": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionResponse {
    pub success: bool,

    /// Base64-encoded unsigned transaction, ready for `signTransaction` in
    /// the wallet.
    pub transaction: String,

    /// Single-use token identifying this constructed transfer. Must be sent
    /// back on submission; expires after a couple of minutes.
    pub pending_id: Uuid,
}

/// Request to submit a wallet-signed transaction.
///
/// # JSON Example
///
/// ```json
/// {
///   "signedTransaction": "AZx8...base64...",
///   "walletAddress": "GmaDrppBC7P5ARKV8g3djiwP89vz1jLK23V2GBjuAEGB",
///   "pendingId": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionRequest {
    /// Base64-encoded fully signed transaction.
    pub signed_transaction: Option<String>,

    /// Wallet that earns the credit once the transfer confirms.
    pub wallet_address: Option<String>,

    /// Token returned by the construction endpoint.
    pub pending_id: Option<Uuid>,
}

/// Response after the transfer is confirmed on-chain.
///
/// # JSON Example
///
/// ```json
/// {
///   "success": true,
///   "signature": "5j1Yh...base58...",
///   "credits": 3
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionResponse {
    pub success: bool,

    /// Network signature of the confirmed transaction.
    pub signature: String,

    /// Credit balance after the purchase was applied.
    pub credits: u64,
}
