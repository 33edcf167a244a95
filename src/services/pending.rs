//! Single-use tokens tying a constructed transfer to the wallet that asked
//! for it.
//!
//! Construction hands the client a token alongside the unsigned transaction;
//! submission must present it and consumes it exactly once, so one
//! constructed transfer can never be credited twice. Tokens expire after a
//! couple of minutes, roughly the window in which the embedded blockhash is
//! still usable anyway.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

pub const PENDING_TRANSFER_TTL_SECS: i64 = 120;

#[derive(Debug, Clone)]
struct PendingTransfer {
    wallet_address: String,
    issued_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct PendingTransfers {
    entries: Arc<Mutex<HashMap<Uuid, PendingTransfer>>>,
    ttl: Duration,
}

impl PendingTransfers {
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(PENDING_TRANSFER_TTL_SECS))
    }

    fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Registers a freshly constructed transfer for `wallet_address` and
    /// returns its token. Expired entries are swept on the way in.
    pub async fn issue(&self, wallet_address: &str) -> Uuid {
        let mut entries = self.entries.lock().await;
        let now = Utc::now();
        entries.retain(|_, entry| now - entry.issued_at <= self.ttl);

        let id = Uuid::new_v4();
        entries.insert(
            id,
            PendingTransfer {
                wallet_address: wallet_address.to_string(),
                issued_at: now,
            },
        );
        id
    }

    /// Whether `id` is live and was issued to `wallet_address`. Leaves the
    /// entry in place.
    pub async fn matches(&self, id: &Uuid, wallet_address: &str) -> bool {
        let entries = self.entries.lock().await;
        entries.get(id).is_some_and(|entry| {
            entry.wallet_address == wallet_address && Utc::now() - entry.issued_at <= self.ttl
        })
    }

    /// Removes `id` if it is live and belongs to `wallet_address`. Returns
    /// whether the caller won the entry; concurrent submissions of the same
    /// token see `true` at most once.
    pub async fn consume(&self, id: &Uuid, wallet_address: &str) -> bool {
        let mut entries = self.entries.lock().await;
        let live = entries.get(id).is_some_and(|entry| {
            entry.wallet_address == wallet_address && Utc::now() - entry.issued_at <= self.ttl
        });
        if live {
            entries.remove(id);
        }
        live
    }
}

impl Default for PendingTransfers {
    fn default() -> Self {
        Self::new()
    }
}
