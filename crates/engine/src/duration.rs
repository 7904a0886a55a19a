//! Exact millisecond duration

use crate::span::Period;
use serde::{Deserialize, Serialize};
use tempora_core::{DurationField, Error, PeriodType, Result};

/// Exact length of time in milliseconds, with no calendar structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Duration {
    millis: i64,
}

impl Duration {
    /// Zero length
    pub const ZERO: Duration = Duration { millis: 0 };

    /// Create from milliseconds
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Duration { millis }
    }

    /// Create from a count of a precise unit
    ///
    /// # Errors
    ///
    /// - `ImpreciseConversion` for years and months
    /// - `ArithmeticOverflow` if the result exceeds `i64`
    pub fn of(unit: DurationField, amount: i64) -> Result<Self> {
        let unit_millis = unit.standard_millis().ok_or_else(|| Error::ImpreciseConversion {
            field: unit.name().to_string(),
        })?;
        amount
            .checked_mul(unit_millis)
            .map(Duration::from_millis)
            .ok_or_else(|| Error::overflow(format!("{} {} as millis", amount, unit)))
    }

    /// Milliseconds from `start` to `end`
    pub fn between(start_millis: i64, end_millis: i64) -> Result<Self> {
        end_millis
            .checked_sub(start_millis)
            .map(Duration::from_millis)
            .ok_or_else(|| Error::overflow("duration between instants"))
    }

    /// Length in milliseconds
    #[inline]
    pub const fn millis(&self) -> i64 {
        self.millis
    }

    /// Whole standard days
    pub const fn standard_days(&self) -> i64 {
        self.millis / 86_400_000
    }

    /// Whole standard hours
    pub const fn standard_hours(&self) -> i64 {
        self.millis / 3_600_000
    }

    /// Whole minutes
    pub const fn standard_minutes(&self) -> i64 {
        self.millis / 60_000
    }

    /// Whole seconds
    pub const fn standard_seconds(&self) -> i64 {
        self.millis / 1_000
    }

    /// True for a negative length
    pub const fn is_negative(&self) -> bool {
        self.millis < 0
    }

    /// Sum of two durations
    pub fn plus(&self, other: Duration) -> Result<Self> {
        self.plus_millis(other.millis)
    }

    /// Add milliseconds
    pub fn plus_millis(&self, millis: i64) -> Result<Self> {
        self.millis
            .checked_add(millis)
            .map(Duration::from_millis)
            .ok_or_else(|| Error::overflow(format!("duration {} + {} ms", self.millis, millis)))
    }

    /// Flip the sign
    pub fn negated(&self) -> Result<Self> {
        self.millis
            .checked_neg()
            .map(Duration::from_millis)
            .ok_or_else(|| Error::overflow(format!("negating duration {} ms", self.millis)))
    }

    /// Absolute length
    pub fn abs(&self) -> Result<Self> {
        if self.is_negative() {
            self.negated()
        } else {
            Ok(*self)
        }
    }

    /// Split into hours, minutes, seconds and millis
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the hours exceed `i32`.
    pub fn to_period(&self) -> Result<Period> {
        Period::from_standard_millis(self.millis, PeriodType::time())
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.millis < 0 { "-" } else { "" };
        let abs = self.millis.unsigned_abs();
        let (secs, millis) = (abs / 1_000, abs % 1_000);
        if millis == 0 {
            write!(f, "PT{}{}S", sign, secs)
        } else {
            write!(f, "PT{}{}.{:03}S", sign, secs, millis)
        }
    }
}
