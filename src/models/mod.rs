//! Request and response types crossing the HTTP boundary.
//!
//! Every endpoint has a typed schema here; handlers never touch raw JSON.

/// Credit spending request/response
pub mod credits;
/// Transaction construction and submission types
pub mod transaction;
/// Wallet query and summary types
pub mod wallet;
