//! Shared application state handed to every handler.

use crate::services::credit_ledger::CreditLedger;
use crate::services::pending::PendingTransfers;
use crate::solana::RpcClient;

/// Cloned per request by axum; all fields are cheap handles over shared
/// interior state.
#[derive(Clone)]
pub struct AppState {
    pub rpc: RpcClient,
    pub ledger: CreditLedger,
    pub pending: PendingTransfers,
}

impl AppState {
    pub fn new(rpc: RpcClient) -> Self {
        Self {
            rpc,
            ledger: CreditLedger::new(),
            pending: PendingTransfers::new(),
        }
    }
}
