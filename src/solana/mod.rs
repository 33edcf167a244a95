//! Minimal Solana toolkit: legacy transaction codec, SPL token instruction
//! builders, and a JSON-RPC client.
//!
//! The service only ever builds one shape of transaction and relays it, so
//! instead of pulling in the full SDK this module implements just what that
//! takes: compact-u16 lengths, legacy message compilation,
//! Ed25519 signature checks, associated token account derivation, and a
//! handful of RPC methods.

pub mod error;
pub mod instruction;
pub mod message;
pub mod pubkey;
pub mod rpc;
mod shortvec;
pub mod spl;
pub mod transaction;

pub use error::{SolanaError, SolanaResult};
pub use message::{Hash, Message};
pub use pubkey::Pubkey;
pub use rpc::RpcClient;
pub use transaction::{Signature, Transaction};

/// Lamports per SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
