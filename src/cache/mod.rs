//! Cache Module
//!
//! Provides timestamped envelopes, expiration policies, and the validating
//! cache that combines them with a storage backend.

mod envelope;
mod policy;
mod stats;
mod validating;


// Re-export public types
pub use envelope::Envelope;
pub use policy::{
    is_within_ttl, AlwaysValid, DefaultExpirationPolicy, ExpirationPolicy, NeverValid,
    Timestamped, TtlPreset, UnknownPreset,
};
pub use stats::{CacheStats, StatsCounters};
pub use validating::ValidatingCache;

// == Public Constants ==
/// Default maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024; // 16 MB
