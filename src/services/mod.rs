//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers:
//! the in-memory stores and the orchestration of Solana RPC calls.

pub mod credit_ledger;
pub mod pending;
pub mod transfer_service;
pub mod wallet_service;
