//! Envelope Module
//!
//! Defines the on-disk record pairing a creation timestamp with raw payload bytes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::policy::Timestamped;
use crate::error::{CacheError, Result};

// == Envelope ==
/// A payload stamped with the instant it was written.
///
/// Encoded as JSON: the timestamp in RFC 3339 with nanosecond precision,
/// the payload as standard base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    timestamp: DateTime<Utc>,
    #[serde(with = "base64_bytes")]
    payload: Vec<u8>,
}

impl Envelope {
    // == Constructor ==
    /// Wraps `payload`, stamping it with the current time.
    pub fn new(payload: Vec<u8>) -> Self {
        Self::with_timestamp(Utc::now(), payload)
    }

    pub fn with_timestamp(timestamp: DateTime<Utc>, payload: Vec<u8>) -> Self {
        Self { timestamp, payload }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Unwraps the payload, discarding the timestamp.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    // == Encode ==
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CacheError::Encoding(e.to_string()))
    }

    // == Decode ==
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| CacheError::Decoding(e.to_string()))
    }
}

impl Timestamped for Envelope {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64.decode(encoded).map_err(serde::de::Error::custom)
    }
}
