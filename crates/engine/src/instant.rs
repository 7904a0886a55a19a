//! Instant-like values: [`Instant`] and zoned [`DateTime`]
//!
//! Both are a signed 64-bit count of milliseconds since the Unix epoch.
//! A `DateTime` also carries the [`Zone`] its fields are read in.
//!
//! ## Usage
//!
//! ```
//! use tempora_engine::{DateTime, Instant, Zone};
//!
//! let instant = Instant::from_millis(86_400_000);
//! let zoned = instant.in_zone(Zone::for_id("+02:00").unwrap());
//! assert_eq!(zoned.millis(), instant.millis());
//! ```

use crate::calendar::{self, naive_from_millis};
use crate::zone::Zone;
use chrono::{FixedOffset, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tempora_core::{DurationField, Error, Result};

/// A point on the UTC timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Instant {
    millis: i64,
}

impl Instant {
    /// Unix epoch
    pub const EPOCH: Instant = Instant { millis: 0 };

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create from milliseconds since epoch
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Instant { millis }
    }

    /// The current moment
    pub fn now() -> Self {
        Instant::from_millis(Utc::now().timestamp_millis())
    }

    /// Create from a UTC wall-clock date-time
    pub fn from_utc(local: &NaiveDateTime) -> Self {
        Instant::from_millis(calendar::millis_from_naive(local))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Milliseconds since epoch
    #[inline]
    pub const fn millis(&self) -> i64 {
        self.millis
    }

    /// UTC wall-clock date-time
    pub fn to_utc(&self) -> Result<NaiveDateTime> {
        naive_from_millis(self.millis)
    }

    /// The same instant viewed in a zone
    pub const fn in_zone(&self, zone: Zone) -> DateTime {
        DateTime::new(self.millis, zone)
    }

    /// The engine-native value
    pub fn to_chrono(&self) -> Result<chrono::DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.millis)
            .single()
            .ok_or_else(|| Error::overflow(format!("instant {} ms", self.millis)))
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Add exact milliseconds
    pub fn plus_millis(&self, millis: i64) -> Result<Self> {
        self.millis
            .checked_add(millis)
            .map(Instant::from_millis)
            .ok_or_else(|| Error::overflow(format!("instant {} + {} ms", self.millis, millis)))
    }

    /// Add a calendar unit, in UTC
    pub fn plus_unit(&self, unit: DurationField, amount: i64) -> Result<Self> {
        let local = calendar::add_to_datetime(self.to_utc()?, unit, amount)?;
        Ok(Instant::from_utc(&local))
    }
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_chrono() {
            Ok(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Err(_) => write!(f, "Instant({})", self.millis),
        }
    }
}

impl From<chrono::DateTime<Utc>> for Instant {
    fn from(dt: chrono::DateTime<Utc>) -> Self {
        Instant::from_millis(dt.timestamp_millis())
    }
}

/// A point on the timeline with a zone for reading its fields
///
/// Equality compares both the instant and the zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateTime {
    millis: i64,
    zone: Zone,
}

impl DateTime {
    /// Create from milliseconds since epoch and a zone
    #[inline]
    pub const fn new(millis: i64, zone: Zone) -> Self {
        DateTime { millis, zone }
    }

    /// The current moment in a zone
    pub fn now(zone: Zone) -> Self {
        Instant::now().in_zone(zone)
    }

    /// Create from a local wall-clock date-time in a zone
    pub fn from_local(local: &NaiveDateTime, zone: Zone) -> Result<Self> {
        Ok(DateTime::new(zone.instant_of(local)?, zone))
    }

    /// Milliseconds since epoch
    #[inline]
    pub const fn millis(&self) -> i64 {
        self.millis
    }

    /// The zone fields are read in
    #[inline]
    pub const fn zone(&self) -> Zone {
        self.zone
    }

    /// Local wall-clock date-time
    pub fn local(&self) -> Result<NaiveDateTime> {
        self.zone.local(self.millis)
    }

    /// The same instant in another zone
    pub const fn with_zone(&self, zone: Zone) -> Self {
        DateTime::new(self.millis, zone)
    }

    /// The same local fields in another zone
    pub fn with_zone_retain_fields(&self, zone: Zone) -> Result<Self> {
        DateTime::from_local(&self.local()?, zone)
    }

    /// Drop the zone
    pub const fn to_instant(&self) -> Instant {
        Instant::from_millis(self.millis)
    }

    /// The engine-native value
    pub fn to_chrono(&self) -> Result<chrono::DateTime<FixedOffset>> {
        self.zone
            .to_fixed_offset()
            .timestamp_millis_opt(self.millis)
            .single()
            .ok_or_else(|| Error::overflow(format!("date-time {} ms", self.millis)))
    }

    /// Add exact milliseconds
    pub fn plus_millis(&self, millis: i64) -> Result<Self> {
        self.millis
            .checked_add(millis)
            .map(|m| DateTime::new(m, self.zone))
            .ok_or_else(|| Error::overflow(format!("date-time {} + {} ms", self.millis, millis)))
    }

    /// Add a calendar unit, in local time
    pub fn plus_unit(&self, unit: DurationField, amount: i64) -> Result<Self> {
        let local = calendar::add_to_datetime(self.local()?, unit, amount)?;
        DateTime::from_local(&local, self.zone)
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_chrono() {
            Ok(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Err(_) => write!(f, "DateTime({}, {})", self.millis, self.zone),
        }
    }
}

impl From<chrono::DateTime<FixedOffset>> for DateTime {
    fn from(dt: chrono::DateTime<FixedOffset>) -> Self {
        DateTime::new(dt.timestamp_millis(), Zone::from(*dt.offset()))
    }
}
