//! Ed25519 public keys and program derived addresses.

use core::fmt;
use std::str::FromStr;

use curve25519_dalek::edwards::CompressedEdwardsY;
use sha2::{Digest, Sha256};

use super::error::{SolanaError, SolanaResult};

pub const PUBKEY_LEN: usize = 32;

/// Domain separator mixed into every program derived address hash.
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// A 32-byte account address, shown in base58 everywhere user-facing.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pubkey([u8; PUBKEY_LEN]);

impl Pubkey {
    pub const fn new(bytes: [u8; PUBKEY_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; PUBKEY_LEN] {
        &self.0
    }

    /// Whether these bytes decompress to a point on the Ed25519 curve.
    ///
    /// Program derived addresses are exactly the addresses for which this is
    /// false; no private key can exist for them.
    pub fn is_on_curve(&self) -> bool {
        CompressedEdwardsY::from_slice(&self.0)
            .map(|point| point.decompress().is_some())
            .unwrap_or(false)
    }

    /// Derives the first off-curve address for `seeds` under `program_id`,
    /// walking the bump seed down from 255.
    pub fn find_program_address(
        seeds: &[&[u8]],
        program_id: &Pubkey,
    ) -> SolanaResult<(Pubkey, u8)> {
        for bump in (0..=u8::MAX).rev() {
            let mut hasher = Sha256::new();
            for seed in seeds {
                hasher.update(seed);
            }
            hasher.update([bump]);
            hasher.update(program_id.as_bytes());
            hasher.update(PDA_MARKER);
            let candidate = Pubkey(hasher.finalize().into());
            if !candidate.is_on_curve() {
                return Ok((candidate, bump));
            }
        }
        Err(SolanaError::NoViableBump)
    }
}

impl FromStr for Pubkey {
    type Err = SolanaError;

    fn from_str(s: &str) -> SolanaResult<Self> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| SolanaError::InvalidAddress(s.to_string()))?;
        bytes
            .try_into()
            .map(Pubkey)
            .map_err(|_| SolanaError::InvalidAddress(s.to_string()))
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(&self.0).into_string())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
