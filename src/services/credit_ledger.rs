//! In-memory credit ledger keyed by wallet address.
//!
//! All balance changes go through one `RwLock`-guarded map, so a credit and a
//! spend for the same wallet can never interleave mid-update. Balances reset
//! when the process restarts; nothing is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::AppError;

#[derive(Clone, Default)]
pub struct CreditLedger {
    balances: Arc<RwLock<HashMap<String, u64>>>,
}

impl CreditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance, zero for wallets that never earned a credit.
    pub async fn balance(&self, wallet_address: &str) -> u64 {
        self.balances
            .read()
            .await
            .get(wallet_address)
            .copied()
            .unwrap_or(0)
    }

    /// Adds `amount` credits and returns the new balance.
    pub async fn credit(&self, wallet_address: &str, amount: u64) -> u64 {
        let mut balances = self.balances.write().await;
        let balance = balances.entry(wallet_address.to_string()).or_insert(0);
        *balance = balance.saturating_add(amount);
        *balance
    }

    /// Removes `amount` credits and returns the new balance, failing without
    /// any change when the wallet holds fewer than `amount`.
    pub async fn spend(&self, wallet_address: &str, amount: u64) -> Result<u64, AppError> {
        let mut balances = self.balances.write().await;
        let balance = balances.entry(wallet_address.to_string()).or_insert(0);
        if *balance < amount {
            return Err(AppError::InsufficientCredits);
        }
        *balance -= amount;
        Ok(*balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_wallets_start_at_zero() {
        let ledger = CreditLedger::new();
        assert_eq!(ledger.balance("wallet-a").await, 0);
    }

    #[tokio::test]
    async fn credits_accumulate_per_wallet() {
        let ledger = CreditLedger::new();
        assert_eq!(ledger.credit("wallet-a", 1).await, 1);
        assert_eq!(ledger.credit("wallet-a", 1).await, 2);
        assert_eq!(ledger.credit("wallet-b", 1).await, 1);
        assert_eq!(ledger.balance("wallet-a").await, 2);
    }

    #[tokio::test]
    async fn spending_below_the_balance_fails_without_changes() {
        let ledger = CreditLedger::new();
        ledger.credit("wallet-a", 1).await;

        let result = ledger.spend("wallet-a", 2).await;
        assert!(matches!(result, Err(AppError::InsufficientCredits)));
        assert_eq!(ledger.balance("wallet-a").await, 1);
    }

    #[tokio::test]
    async fn spending_within_the_balance_deducts() {
        let ledger = CreditLedger::new();
        ledger.credit("wallet-a", 3).await;
        assert_eq!(ledger.spend("wallet-a", 2).await.unwrap(), 1);
        assert_eq!(ledger.balance("wallet-a").await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_credits_are_not_lost() {
        let ledger = CreditLedger::new();
        let mut handles = Vec::new();
        for _ in 0..20 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                ledger.credit("wallet-a", 1).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(ledger.balance("wallet-a").await, 20);
    }
}
