//! TTL cache over a [`KvStore`].
//!
//! Entries carry an absolute expiry timestamp and are evicted lazily when a
//! read finds them expired — no background sweeper. Correctness only
//! requires that a stale value is never returned, not that storage is
//! reclaimed promptly.
//!
//! The cache is an optimization: every persistence failure is logged at
//! `warn` and absorbed, degrading to a cache miss rather than interrupting
//! the caller's operation.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::store::KvStore;

/// Serialized cache entry: the value plus its absolute expiry (unix seconds).
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    data: T,
    expires_at: u64,
}

/// TTL cache generic over the backing store.
pub struct TtlCache<S: KvStore> {
    store: S,
}

impl<S: KvStore> TtlCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Store `value` under `key` with expiry `now + ttl`.
    ///
    /// Never fails the caller: serialization or store write errors are
    /// logged and swallowed.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let envelope = Envelope {
            data: value,
            expires_at: now_secs().saturating_add(ttl.as_secs()),
        };
        let bytes = match serde_json::to_vec(&envelope) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key, "failed to serialize cache entry: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set_raw(key, &bytes) {
            warn!(key, "failed to write cache entry: {e}");
        }
    }

    /// Look up `key`. Returns `None` when absent, corrupt, or expired.
    ///
    /// Expired and corrupt entries are deleted eagerly so the next read
    /// starts clean.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = self.store.get_raw(key)?;
        let envelope: Envelope<T> = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(key, "dropping corrupt cache entry: {e}");
                self.remove(key);
                return None;
            }
        };
        if now_secs() > envelope.expires_at {
            debug!(key, "cache entry expired, evicting");
            self.remove(key);
            return None;
        }
        debug!(key, "cache hit");
        Some(envelope.data)
    }

    /// Unconditional delete; deleting an absent key is not an error.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.store.delete_raw(key) {
            warn!(key, "failed to delete cache entry: {e}");
        }
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
