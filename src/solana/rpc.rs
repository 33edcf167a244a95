//! Thin JSON-RPC client for a Solana node.
//!
//! Every method posts a `jsonrpc: 2.0` envelope and deserializes the typed
//! `result`/`error` pair. Reads and submissions run at `confirmed`
//! commitment, the same level the confirmation poll waits for.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::time::{Instant, sleep};

use super::error::{SolanaError, SolanaResult};
use super::message::Hash;
use super::pubkey::Pubkey;

const COMMITMENT: &str = "confirmed";
const CONFIRM_TIMEOUT: Duration = Duration::from_secs(30);
const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    data: Option<RpcErrorData>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorData {
    logs: Option<Vec<String>>,
}

/// Wrapper the node puts around slot-dependent results.
#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct BlockhashValue {
    blockhash: String,
}

#[derive(Debug, Deserialize)]
struct KeyedAccount {
    account: ParsedAccount,
}

#[derive(Debug, Deserialize)]
struct ParsedAccount {
    data: ParsedAccountData,
}

#[derive(Debug, Deserialize)]
struct ParsedAccountData {
    parsed: ParsedTokenData,
}

#[derive(Debug, Deserialize)]
struct ParsedTokenData {
    info: ParsedTokenInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParsedTokenInfo {
    token_amount: TokenAmount,
}

/// Balance of one token account as the node reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    pub amount: String,
    pub decimals: u8,
    /// Null for amounts the node declines to render as a float.
    pub ui_amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignatureStatus {
    confirmation_status: Option<String>,
    err: Option<Value>,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> SolanaResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> SolanaResult<T> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let envelope: RpcEnvelope<T> = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = envelope.error {
            return Err(SolanaError::Rpc {
                code: error.code,
                message: error.message,
                logs: error.data.and_then(|data| data.logs),
            });
        }
        envelope
            .result
            .ok_or_else(|| SolanaError::InvalidResponse(format!("{method} returned no result")))
    }

    /// Lamports held by `address`.
    pub async fn get_balance(&self, address: &Pubkey) -> SolanaResult<u64> {
        let response: WithContext<u64> = self
            .call(
                "getBalance",
                json!([address.to_string(), {"commitment": COMMITMENT}]),
            )
            .await?;
        Ok(response.value)
    }

    /// Balances of `owner`'s token accounts for `mint`, in the order the node
    /// returns them. Owners without an associated account yield an empty list.
    pub async fn get_token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> SolanaResult<Vec<TokenAmount>> {
        let response: WithContext<Vec<KeyedAccount>> = self
            .call(
                "getTokenAccountsByOwner",
                json!([
                    owner.to_string(),
                    {"mint": mint.to_string()},
                    {"encoding": "jsonParsed", "commitment": COMMITMENT},
                ]),
            )
            .await?;
        Ok(response
            .value
            .into_iter()
            .map(|keyed| keyed.account.data.parsed.info.token_amount)
            .collect())
    }

    pub async fn get_latest_blockhash(&self) -> SolanaResult<Hash> {
        let response: WithContext<BlockhashValue> = self
            .call(
                "getLatestBlockhash",
                json!([{"commitment": COMMITMENT}]),
            )
            .await?;
        response.value.blockhash.parse()
    }

    /// Whether `address` holds an initialized account.
    pub async fn account_exists(&self, address: &Pubkey) -> SolanaResult<bool> {
        let response: WithContext<Option<Value>> = self
            .call(
                "getAccountInfo",
                json!([
                    address.to_string(),
                    {"encoding": "base64", "commitment": COMMITMENT},
                ]),
            )
            .await?;
        Ok(response.value.is_some())
    }

    /// Submits a base64-encoded signed transaction and returns its signature.
    ///
    /// Preflight failures come back as an RPC error carrying the program
    /// logs; see [`SolanaError::logs`].
    pub async fn send_transaction(&self, transaction_base64: &str) -> SolanaResult<String> {
        self.call(
            "sendTransaction",
            json!([
                transaction_base64,
                {"encoding": "base64", "preflightCommitment": COMMITMENT},
            ]),
        )
        .await
    }

    /// Polls signature statuses until `signature` reaches `confirmed` (or
    /// `finalized`), the cluster reports an execution error, or the timeout
    /// elapses.
    pub async fn confirm_transaction(&self, signature: &str) -> SolanaResult<()> {
        let deadline = Instant::now() + CONFIRM_TIMEOUT;
        loop {
            let response: WithContext<Vec<Option<SignatureStatus>>> = self
                .call(
                    "getSignatureStatuses",
                    json!([[signature], {"searchTransactionHistory": false}]),
                )
                .await?;
            if let Some(Some(status)) = response.value.first() {
                if let Some(err) = &status.err {
                    return Err(SolanaError::TransactionFailed {
                        signature: signature.to_string(),
                        details: err.to_string(),
                    });
                }
                if matches!(
                    status.confirmation_status.as_deref(),
                    Some("confirmed") | Some("finalized")
                ) {
                    return Ok(());
                }
            }
            if Instant::now() >= deadline {
                return Err(SolanaError::ConfirmationTimeout(signature.to_string()));
            }
            sleep(CONFIRM_POLL_INTERVAL).await;
        }
    }

    /// The node's own health check. Unhealthy nodes answer with an RPC error.
    pub async fn get_health(&self) -> SolanaResult<String> {
        self.call("getHealth", json!([])).await
    }
}
