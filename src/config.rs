//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.
//!
//! The business constants of the credit purchase (mint, recipient, price)
//! are deliberately compile-time constants rather than configuration: the
//! service sells exactly one product, and changing any of them changes what
//! buyers pay for.

use anyhow::Context;
use serde::Deserialize;
use url::Url;

/// Mint address of PYUSD on devnet, a Token-2022 token with six decimals.
pub const PYUSD_MINT: &str = "CXk2AMBfi3TwaEL2468s6zP8xq9NxTXjp9gjMgzeUynM";

/// Wallet that receives every credit purchase payment.
pub const RECIPIENT_ADDRESS: &str = "ARFwpM41PsUudu1HQE7i1HbbP6nkDAnKYRc77KQMS18e";

/// Decimals of the PYUSD mint, checked on-chain by TransferChecked.
pub const PYUSD_DECIMALS: u8 = 6;

/// Price of one credit in PYUSD base units: 0.25 PYUSD.
pub const CREDIT_PRICE_BASE_UNITS: u64 = 250_000;

/// Credits granted per confirmed purchase.
pub const CREDITS_PER_PURCHASE: u64 = 1;

/// Credits removed by one spend.
pub const CREDIT_SPEND_COST: u64 = 2;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `RPC_URL` (optional): Solana JSON-RPC endpoint, defaults to devnet
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `RPC_TIMEOUT_SECS` (optional): per-request RPC timeout, defaults to 30
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_rpc_timeout_secs")]
    pub rpc_timeout_secs: u64,
}

/// Default RPC endpoint if RPC_URL is not set.
fn default_rpc_url() -> String {
    "https://api.devnet.solana.com".to_string()
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

/// Default RPC timeout if RPC_TIMEOUT_SECS is not set.
fn default_rpc_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Environment variable values cannot be parsed into expected types
    /// - `RPC_URL` is set to something that is not a valid URL
    pub fn from_env() -> anyhow::Result<Self> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Parse environment variables into Config struct
        // Field names are automatically converted: rpc_url -> RPC_URL
        let config = envy::from_env::<Config>().context("failed to read configuration")?;
        Url::parse(&config.rpc_url)
            .with_context(|| format!("RPC_URL is not a valid URL: {}", config.rpc_url))?;
        Ok(config)
    }
}
