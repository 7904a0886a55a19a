//! Mutable date-time
//!
//! [`MutableDateTime`] is a zoned instant edited in place. It has its own
//! entity kind but is not a [`Temporal`]: the algebra never accepts it as an
//! operand. Take a [`DateTime`] snapshot to compute with it.

use crate::instant::DateTime;
use crate::registry::registry;
use crate::temporal::Temporal;
use crate::zone::Zone;
use tempora_core::{DateTimeField, DurationField, EntityKind, Error, Result};

/// Zoned instant edited in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutableDateTime {
    inner: DateTime,
}

impl MutableDateTime {
    /// Start from a snapshot
    pub const fn new(value: DateTime) -> Self {
        Self { inner: value }
    }

    /// Current time in a zone
    pub fn now(zone: Zone) -> Self {
        Self::new(DateTime::now(zone))
    }

    /// Always [`EntityKind::MutableDateTime`]
    pub const fn kind(&self) -> EntityKind {
        EntityKind::MutableDateTime
    }

    /// Epoch millis
    pub const fn millis(&self) -> i64 {
        self.inner.millis()
    }

    /// Zone
    pub const fn zone(&self) -> Zone {
        self.inner.zone()
    }

    /// Move to another instant, keeping the zone
    pub fn set_millis(&mut self, millis: i64) {
        self.inner = DateTime::new(millis, self.inner.zone());
    }

    /// Change zone, keeping the instant
    pub fn set_zone(&mut self, zone: Zone) {
        self.inner = self.inner.with_zone(zone);
    }

    /// Read a field in the current zone
    pub fn get(&self, field: DateTimeField) -> Result<i64> {
        registry()
            .resolve(EntityKind::DateTime, field)?
            .get(&Temporal::DateTime(self.inner))
    }

    /// Set a field in the current zone
    ///
    /// On error the value is left unchanged.
    pub fn set(&mut self, field: DateTimeField, value: i64) -> Result<()> {
        let updated = registry()
            .resolve(EntityKind::DateTime, field)?
            .set(&Temporal::DateTime(self.inner), value)?;
        match updated {
            Temporal::DateTime(dt) => {
                self.inner = dt;
                Ok(())
            }
            other => Err(Error::unsupported("set", other.kind().name())),
        }
    }

    /// Add an amount of a unit
    pub fn add(&mut self, unit: DurationField, amount: i64) -> Result<()> {
        self.inner = self.inner.plus_unit(unit, amount)?;
        Ok(())
    }

    /// Add exact milliseconds
    pub fn add_millis(&mut self, millis: i64) -> Result<()> {
        self.inner = self.inner.plus_millis(millis)?;
        Ok(())
    }

    /// Immutable snapshot
    pub const fn to_date_time(&self) -> DateTime {
        self.inner
    }
}

impl From<DateTime> for MutableDateTime {
    fn from(value: DateTime) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for MutableDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.inner, f)
    }
}
