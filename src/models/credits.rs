//! Request/response types for spending credits.

use serde::{Deserialize, Serialize};

/// Request to deduct the fixed spend cost from a wallet's balance.
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
pub struct DeductCreditsRequest {
    pub wallet_address: Option<String>,
}

/// Balance left after a successful deduction.
///
/// # JSON Example
///
/// ```json
/// {
///   "success": true,
///   "credits": 1
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct CreditBalanceResponse {
    pub success: bool,
    pub credits: u64,
}
