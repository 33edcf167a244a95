//! Signed and unsigned legacy transactions.

use core::fmt;

use ed25519_dalek::{Signature as Ed25519Signature, Verifier, VerifyingKey};

use super::error::{SolanaError, SolanaResult};
use super::message::Message;
use super::shortvec::{self, Cursor};

pub const SIGNATURE_LEN: usize = 64;

/// A 64-byte Ed25519 signature slot. Unsigned transactions carry zeroed
/// placeholders so the payload length matches the signed form.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    pub const fn new(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == [0; SIGNATURE_LEN]
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self([0; SIGNATURE_LEN])
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(&self.0).into_string())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A legacy transaction: one signature slot per required signer, followed by
/// the message those signatures cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub signatures: Vec<Signature>,
    pub message: Message,
}

impl Transaction {
    /// Wraps a message with zeroed signature slots, ready to hand to a wallet
    /// for signing.
    pub fn new_unsigned(message: Message) -> Self {
        let signatures =
            vec![Signature::default(); message.header.num_required_signatures as usize];
        Self {
            signatures,
            message,
        }
    }

    pub fn serialize(&self) -> Vec<u8> {
        let message_bytes = self.message.serialize();
        let mut out =
            Vec::with_capacity(3 + self.signatures.len() * SIGNATURE_LEN + message_bytes.len());
        shortvec::encode_len(&mut out, self.signatures.len());
        for signature in &self.signatures {
            out.extend_from_slice(signature.as_bytes());
        }
        out.extend_from_slice(&message_bytes);
        out
    }

    /// Decodes a wire payload, rejecting versioned messages, trailing bytes,
    /// and signature counts that disagree with the message header.
    pub fn deserialize(bytes: &[u8]) -> SolanaResult<Self> {
        let mut cursor = Cursor::new(bytes);
        let signature_count = cursor.read_compact_u16()?;
        let mut signatures = Vec::with_capacity(signature_count);
        for _ in 0..signature_count {
            signatures.push(Signature::new(cursor.read_array()?));
        }

        let message = Message::parse(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(SolanaError::MalformedTransaction("trailing bytes"));
        }
        if signatures.len() != message.header.num_required_signatures as usize {
            return Err(SolanaError::MalformedTransaction(
                "signature count disagrees with header",
            ));
        }

        Ok(Self {
            signatures,
            message,
        })
    }

    /// Verifies every required signature against the serialized message.
    ///
    /// Placeholder slots fail immediately; a transaction straight out of
    /// [`Transaction::new_unsigned`] never verifies.
    pub fn verify_signatures(&self) -> SolanaResult<()> {
        let message_bytes = self.message.serialize();
        for (index, (signature, key)) in self
            .signatures
            .iter()
            .zip(self.message.signer_keys())
            .enumerate()
        {
            if signature.is_placeholder() {
                return Err(SolanaError::SignatureVerification(index));
            }
            let verifying_key = VerifyingKey::from_bytes(key.as_bytes())
                .map_err(|_| SolanaError::SignatureVerification(index))?;
            let signature = Ed25519Signature::from_bytes(signature.as_bytes());
            verifying_key
                .verify(&message_bytes, &signature)
                .map_err(|_| SolanaError::SignatureVerification(index))?;
        }
        Ok(())
    }
}
