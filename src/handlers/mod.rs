//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, query params, etc.)
//! 2. Performs business logic (RPC calls, ledger updates, validation)
//! 3. Returns HTTP response (JSON, HTML, status code)

/// Credit spending endpoint
pub mod credits;
/// Health check endpoint
pub mod health;
/// Static HTML pages
pub mod pages;
/// Transaction construction and submission endpoints
pub mod transactions;
/// Wallet balance view
pub mod wallet;
