//! Read side of the wallet view: on-chain balances plus the credit count.

use crate::config;
use crate::models::wallet::WalletSummary;
use crate::services::credit_ledger::CreditLedger;
use crate::solana::error::SolanaResult;
use crate::solana::rpc::RpcClient;
use crate::solana::{LAMPORTS_PER_SOL, Pubkey};

/// Fetches the SOL balance, the PYUSD balance, and the ledger credits for
/// one wallet.
///
/// The PYUSD figure comes from the wallet's first token account for the
/// mint; wallets that never created one read as zero.
pub async fn fetch_wallet_summary(
    rpc: &RpcClient,
    ledger: &CreditLedger,
    wallet_address: &str,
) -> SolanaResult<WalletSummary> {
    let owner: Pubkey = wallet_address.parse()?;
    let mint: Pubkey = config::PYUSD_MINT.parse()?;

    let lamports = rpc.get_balance(&owner).await?;
    let token_accounts = rpc.get_token_accounts_by_owner(&owner, &mint).await?;
    let pyusd_balance = token_accounts
        .first()
        .and_then(|account| account.ui_amount)
        .unwrap_or(0.0);
    let credits = ledger.balance(wallet_address).await;

    Ok(WalletSummary {
        balance_in_sol: lamports as f64 / LAMPORTS_PER_SOL as f64,
        pyusd_balance,
        credits,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    const WALLET: &str = "GmaDrppBC7P5ARKV8g3djiwP89vz1jLK23V2GBjuAEGB";

    fn mock_balance(server: &MockServer, lamports: u64) {
        server.mock(|when, then| {
            when.method(POST)
                .json_body_partial(r#"{"method": "getBalance"}"#);
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {"context": {"slot": 1}, "value": lamports},
            }));
        });
    }

    fn mock_token_accounts(server: &MockServer, value: serde_json::Value) {
        server.mock(|when, then| {
            when.method(POST)
                .json_body_partial(r#"{"method": "getTokenAccountsByOwner"}"#);
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {"context": {"slot": 1}, "value": value},
            }));
        });
    }

    #[tokio::test]
    async fn summarizes_balances_and_credits() {
        let server = MockServer::start();
        mock_balance(&server, 2_000_000_000);
        mock_token_accounts(
            &server,
            json!([{
                "pubkey": "CD2D9eXHts8TLFYJyGpRP7kydKP4diujq4nAVKP6WNBa",
                "account": {"data": {"parsed": {"info": {"tokenAmount": {
                    "amount": "5250000",
                    "decimals": 6,
                    "uiAmount": 5.25,
                    "uiAmountString": "5.25",
                }}}}},
            }]),
        );

        let rpc = RpcClient::new(server.base_url(), Duration::from_secs(5)).unwrap();
        let ledger = CreditLedger::new();
        ledger.credit(WALLET, 4).await;

        let summary = fetch_wallet_summary(&rpc, &ledger, WALLET).await.unwrap();
        assert_eq!(summary.balance_in_sol, 2.0);
        assert_eq!(summary.pyusd_balance, 5.25);
        assert_eq!(summary.credits, 4);
    }

    #[tokio::test]
    async fn wallets_without_token_accounts_read_as_zero() {
        let server = MockServer::start();
        mock_balance(&server, 0);
        mock_token_accounts(&server, json!([]));

        let rpc = RpcClient::new(server.base_url(), Duration::from_secs(5)).unwrap();
        let summary = fetch_wallet_summary(&rpc, &CreditLedger::new(), WALLET)
            .await
            .unwrap();
        assert_eq!(summary.balance_in_sol, 0.0);
        assert_eq!(summary.pyusd_balance, 0.0);
        assert_eq!(summary.credits, 0);
    }
}
