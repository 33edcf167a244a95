use thiserror::Error;

/// Errors produced while encoding, decoding, or relaying Solana transactions.
///
/// Codec variants cover the legacy wire format; the remaining variants wrap
/// the JSON-RPC client. Handlers translate these into HTTP responses, so the
/// messages here are operator-facing rather than client-facing.
#[derive(Debug, Error)]
pub enum SolanaError {
    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("invalid blockhash: {0}")]
    InvalidBlockhash(String),

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("no off-curve address found for the given seeds")]
    NoViableBump,

    #[error("transaction references more accounts than the wire format allows")]
    TooManyAccounts,

    #[error("malformed transaction payload: {0}")]
    MalformedTransaction(&'static str),

    #[error("versioned transactions are not supported")]
    UnsupportedVersion,

    #[error("signature {0} failed verification")]
    SignatureVerification(usize),

    #[error("RPC transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        logs: Option<Vec<String>>,
    },

    #[error("malformed RPC response: {0}")]
    InvalidResponse(String),

    #[error("transaction {signature} failed on-chain: {details}")]
    TransactionFailed { signature: String, details: String },

    #[error("transaction {0} was not confirmed before the timeout")]
    ConfirmationTimeout(String),
}

impl SolanaError {
    /// Program logs attached by the node when a submission is rejected,
    /// typically during preflight simulation.
    pub fn logs(&self) -> Option<&[String]> {
        match self {
            Self::Rpc {
                logs: Some(logs), ..
            } => Some(logs),
            _ => None,
        }
    }
}

pub type SolanaResult<T> = Result<T, SolanaError>;
