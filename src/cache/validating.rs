//! Validating Cache Module
//!
//! Layers time-to-live validation on top of a raw storage backend.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheStats, Envelope, ExpirationPolicy, StatsCounters, MAX_PAYLOAD_SIZE};
use crate::error::{CacheError, Result};
use crate::storage::StorageBackend;

// == Validating Cache ==
/// Storage decorator that timestamps writes and rejects stale reads.
///
/// Operations are not serialized: concurrent calls, even on the same key,
/// run independently. A read that finds an expired entry removes it in a
/// detached task, which may race with a concurrent write of that key.
#[derive(Clone)]
pub struct ValidatingCache {
    backend: Arc<dyn StorageBackend>,
    policy: Arc<dyn ExpirationPolicy>,
    stats: Arc<StatsCounters>,
    max_payload_size: usize,
}

impl ValidatingCache {
    // == Constructor ==
    pub fn new(backend: Arc<dyn StorageBackend>, policy: Arc<dyn ExpirationPolicy>) -> Self {
        Self {
            backend,
            policy,
            stats: Arc::new(StatsCounters::new()),
            max_payload_size: MAX_PAYLOAD_SIZE,
        }
    }

    /// Sets the largest payload `write` will accept.
    pub fn with_max_payload_size(mut self, max_payload_size: usize) -> Self {
        self.max_payload_size = max_payload_size;
        self
    }

    pub fn max_payload_size(&self) -> usize {
        self.max_payload_size
    }

    // == Write ==
    /// Wraps `payload` with the current time and stores it at `key`.
    ///
    /// Nothing reaches the backend when the payload cannot be encoded.
    pub async fn write(&self, payload: &[u8], key: &str) -> Result<()> {
        if payload.len() > self.max_payload_size {
            return Err(CacheError::Encoding(format!(
                "payload of {} bytes exceeds maximum size of {} bytes",
                payload.len(),
                self.max_payload_size
            )));
        }

        let bytes = Envelope::new(payload.to_vec()).encode()?;
        self.backend.write(&bytes, key).await?;
        self.stats.record_write();
        Ok(())
    }

    // == Read ==
    /// Returns the payload stored at `key` if it is still valid.
    ///
    /// Any backend failure is reported as [`CacheError::NoData`]. An expired
    /// entry is reported as [`CacheError::DataNoLongerValid`] and deleted in
    /// the background; that deletion's outcome is ignored.
    pub async fn read(&self, key: &str) -> Result<Vec<u8>> {
        let bytes = match self.backend.read(key).await {
            Ok(bytes) => bytes,
            Err(_) => {
                self.stats.record_miss();
                return Err(CacheError::NoData(key.to_string()));
            }
        };

        let envelope = match Envelope::decode(&bytes) {
            Ok(envelope) => envelope,
            Err(e) => {
                self.stats.record_decode_failure();
                return Err(e);
            }
        };

        if !self.policy.is_valid(&envelope) {
            self.stats.record_expired();
            self.spawn_cleanup(key);
            return Err(CacheError::DataNoLongerValid(key.to_string()));
        }

        self.stats.record_hit();
        Ok(envelope.into_payload())
    }

    // == Delete ==
    /// Removes the entry at `key`, reporting exactly what the backend reports.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.backend.delete(key).await?;
        self.stats.record_delete();
        Ok(())
    }

    // == Purge Expired ==
    /// Deletes every stored entry the policy no longer accepts.
    ///
    /// Entries that cannot be read or decoded are left alone. Returns the
    /// number of entries removed.
    pub async fn purge_expired(&self) -> Result<usize> {
        let keys = self.backend.keys().await?;
        let mut removed = 0;

        for key in keys {
            let Ok(bytes) = self.backend.read(&key).await else {
                continue;
            };
            let Ok(envelope) = Envelope::decode(&bytes) else {
                continue;
            };

            if !self.policy.is_valid(&envelope) && self.backend.delete(&key).await.is_ok() {
                self.stats.record_delete();
                removed += 1;
            }
        }

        Ok(removed)
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    fn spawn_cleanup(&self, key: &str) {
        debug!(key, "entry expired, scheduling removal");

        let backend = Arc::clone(&self.backend);
        let key = key.to_string();
        tokio::spawn(async move {
            let _ = backend.delete(&key).await;
        });
    }
}

impl fmt::Debug for ValidatingCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatingCache")
            .field("max_payload_size", &self.max_payload_size)
            .field("stats", &self.stats.snapshot())
            .finish_non_exhaustive()
    }
}
