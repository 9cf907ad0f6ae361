//! Expiration Policy Module
//!
//! Decides whether a timestamped entry is still within its time-to-live.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

// == TTL Presets ==
/// Common time-to-live values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TtlPreset {
    Seconds30,
    OneMinute,
    TwoMinutes,
    FiveMinutes,
    TenMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    SixHours,
    TwelveHours,
    OneDay,
}

impl TtlPreset {
    /// Every preset, shortest first.
    pub const ALL: [TtlPreset; 11] = [
        TtlPreset::Seconds30,
        TtlPreset::OneMinute,
        TtlPreset::TwoMinutes,
        TtlPreset::FiveMinutes,
        TtlPreset::TenMinutes,
        TtlPreset::ThirtyMinutes,
        TtlPreset::OneHour,
        TtlPreset::TwoHours,
        TtlPreset::SixHours,
        TtlPreset::TwelveHours,
        TtlPreset::OneDay,
    ];

    /// Length of the preset in seconds.
    pub const fn seconds(self) -> u64 {
        match self {
            TtlPreset::Seconds30 => 30,
            TtlPreset::OneMinute => 60,
            TtlPreset::TwoMinutes => 120,
            TtlPreset::FiveMinutes => 300,
            TtlPreset::TenMinutes => 600,
            TtlPreset::ThirtyMinutes => 1800,
            TtlPreset::OneHour => 3600,
            TtlPreset::TwoHours => 7200,
            TtlPreset::SixHours => 21600,
            TtlPreset::TwelveHours => 43200,
            TtlPreset::OneDay => 86400,
        }
    }

    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.seconds())
    }

    /// Preset name as used in configuration (e.g. `oneHour`).
    pub const fn name(self) -> &'static str {
        match self {
            TtlPreset::Seconds30 => "seconds30",
            TtlPreset::OneMinute => "oneMinute",
            TtlPreset::TwoMinutes => "twoMinutes",
            TtlPreset::FiveMinutes => "fiveMinutes",
            TtlPreset::TenMinutes => "tenMinutes",
            TtlPreset::ThirtyMinutes => "thirtyMinutes",
            TtlPreset::OneHour => "oneHour",
            TtlPreset::TwoHours => "twoHours",
            TtlPreset::SixHours => "sixHours",
            TtlPreset::TwelveHours => "twelveHours",
            TtlPreset::OneDay => "oneDay",
        }
    }
}

impl fmt::Display for TtlPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known preset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown TTL preset: {0}")]
pub struct UnknownPreset(pub String);

impl FromStr for TtlPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TtlPreset::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

impl From<TtlPreset> for Duration {
    fn from(preset: TtlPreset) -> Self {
        preset.as_duration()
    }
}

// == Validity Check ==
/// Returns true iff `now <= timestamp + ttl`.
///
/// The boundary instant itself is still valid. A deadline past the
/// representable range never expires.
pub fn is_within_ttl(ttl: Duration, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    match TimeDelta::from_std(ttl)
        .ok()
        .and_then(|ttl| timestamp.checked_add_signed(ttl))
    {
        Some(deadline) => now <= deadline,
        None => true,
    }
}

// == Capabilities ==
/// Anything carrying the instant it was created.
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Decides whether timestamped data may still be served.
///
/// Implementations only read the clock and their own configuration, so a
/// single instance can be shared across concurrent reads.
pub trait ExpirationPolicy: Send + Sync {
    /// Validity of data created at `timestamp`, judged at `now`.
    fn is_valid_at(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool;

    /// Validity of `entry` judged against the current wall clock.
    fn is_valid(&self, entry: &dyn Timestamped) -> bool {
        self.is_valid_at(entry.timestamp(), Utc::now())
    }
}

// == Default Policy ==
/// Policy holding a single, fixed time-to-live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultExpirationPolicy {
    ttl: Duration,
}

impl DefaultExpirationPolicy {
    pub fn new(preset: TtlPreset) -> Self {
        Self::custom(preset.as_duration())
    }

    /// Policy with an arbitrary time-to-live.
    pub fn custom(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl From<TtlPreset> for DefaultExpirationPolicy {
    fn from(preset: TtlPreset) -> Self {
        Self::new(preset)
    }
}

impl ExpirationPolicy for DefaultExpirationPolicy {
    fn is_valid_at(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        is_within_ttl(self.ttl, timestamp, now)
    }
}

/// Treats every entry as valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl ExpirationPolicy for AlwaysValid {
    fn is_valid_at(&self, _timestamp: DateTime<Utc>, _now: DateTime<Utc>) -> bool {
        true
    }
}

/// Treats every entry as expired.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverValid;

impl ExpirationPolicy for NeverValid {
    fn is_valid_at(&self, _timestamp: DateTime<Utc>, _now: DateTime<Utc>) -> bool {
        false
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    struct Stamp(DateTime<Utc>);

    impl Timestamped for Stamp {
        fn timestamp(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_preset_table() {
        let expected = [
            ("seconds30", 30),
            ("oneMinute", 60),
            ("twoMinutes", 120),
            ("fiveMinutes", 300),
            ("tenMinutes", 600),
            ("thirtyMinutes", 1800),
            ("oneHour", 3600),
            ("twoHours", 7200),
            ("sixHours", 21600),
            ("twelveHours", 43200),
            ("oneDay", 86400),
        ];

        for (preset, (name, seconds)) in TtlPreset::ALL.into_iter().zip(expected) {
            assert_eq!(preset.name(), name);
            assert_eq!(preset.seconds(), seconds);
            assert_eq!(name.parse::<TtlPreset>().unwrap(), preset);
        }
    }

    #[test]
    fn test_unknown_preset() {
        let err = "threeWeeks".parse::<TtlPreset>().unwrap_err();
        assert_eq!(err, UnknownPreset("threeWeeks".to_string()));
    }

    #[test]
    fn test_preset_and_custom_converge() {
        assert_eq!(
            DefaultExpirationPolicy::new(TtlPreset::OneHour),
            DefaultExpirationPolicy::custom(Duration::from_secs(3600))
        );
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let policy = DefaultExpirationPolicy::new(TtlPreset::Seconds30);
        let created = Utc::now();
        let deadline = created + TimeDelta::seconds(30);

        assert!(policy.is_valid_at(created, created));
        assert!(policy.is_valid_at(created, deadline));
        assert!(!policy.is_valid_at(created, deadline + TimeDelta::nanoseconds(1)));
    }

    #[test]
    fn test_zero_ttl() {
        let policy = DefaultExpirationPolicy::custom(Duration::ZERO);
        let created = Utc::now();

        assert!(policy.is_valid_at(created, created));
        assert!(!policy.is_valid_at(created, created + TimeDelta::milliseconds(1)));
    }

    #[test]
    fn test_overflowing_ttl_never_expires() {
        let policy = DefaultExpirationPolicy::custom(Duration::from_secs(u64::MAX));
        assert!(policy.is_valid_at(Utc::now(), DateTime::<Utc>::MAX_UTC));
    }

    #[test]
    fn test_is_valid_uses_wall_clock() {
        let policy = DefaultExpirationPolicy::new(TtlPreset::OneMinute);

        assert!(policy.is_valid(&Stamp(Utc::now())));
        assert!(!policy.is_valid(&Stamp(Utc::now() - TimeDelta::minutes(2))));
    }

    #[test]
    fn test_stub_policies() {
        let now = Utc::now();
        assert!(AlwaysValid.is_valid_at(now - TimeDelta::days(365), now));
        assert!(!NeverValid.is_valid_at(now, now));
    }
}
