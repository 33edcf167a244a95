//! Query and response types for the wallet view.

use serde::{Deserialize, Serialize};

/// Query parameters accepted by `GET /wallet`.
#[derive(Debug, Deserialize)]
pub struct WalletQuery {
    /// Base58 wallet address to inspect.
    pub address: Option<String>,

    /// `"true"` selects the JSON body; anything else renders the HTML page.
    pub json: Option<String>,
}

/// Balances shown for one wallet.
///
/// # JSON Example
///
/// ```json
/// {
///   "balanceInSol": 1.5,
///   "pyusdBalance": 10.25,
///   "credits": 3
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    /// Native balance converted from lamports.
    pub balance_in_sol: f64,

    /// UI amount of the wallet's PYUSD token account, zero when the account
    /// does not exist.
    pub pyusd_balance: f64,

    /// Credits earned through confirmed purchases, minus spends.
    pub credits: u64,
}
