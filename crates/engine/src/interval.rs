//! Intervals
//!
//! An [`Interval`] spans two instants and reads its fields in a zone. A
//! [`PartialInterval`] spans two partials of the same kind, ordered by
//! their field values largest first.
//!
//! Both hold `start <= end`. Construction with reversed endpoints follows
//! the installed [`IntervalOrder`]; the `with_*` methods always reject.

use crate::config::{self, IntervalOrder};
use crate::duration::Duration;
use crate::instant::DateTime;
use crate::partial::FieldValues;
use crate::span::Period;
use crate::temporal::Temporal;
use crate::zone::Zone;
use serde::{Deserialize, Serialize};
use tempora_core::{Category, EntityKind, Error, PeriodType, Result};
use tracing::warn;

/// Half-open span between two instants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    start: i64,
    end: i64,
    zone: Zone,
}

impl Interval {
    /// Create with the installed endpoint-order policy
    pub fn new(start_millis: i64, end_millis: i64, zone: Zone) -> Result<Self> {
        Self::with_order(start_millis, end_millis, zone, config::current().interval_order)
    }

    /// Create with an explicit endpoint-order policy
    ///
    /// # Errors
    ///
    /// Returns `InvalidInterval` for reversed endpoints under
    /// [`IntervalOrder::Reject`].
    pub fn with_order(
        start_millis: i64,
        end_millis: i64,
        zone: Zone,
        order: IntervalOrder,
    ) -> Result<Self> {
        if start_millis <= end_millis {
            return Ok(Interval {
                start: start_millis,
                end: end_millis,
                zone,
            });
        }
        match order {
            IntervalOrder::Reject => Err(Error::InvalidInterval(format!(
                "start {} ms is after end {} ms",
                start_millis, end_millis
            ))),
            IntervalOrder::Normalize => {
                warn!(start = start_millis, end = end_millis, "normalizing reversed interval");
                Ok(Interval {
                    start: end_millis,
                    end: start_millis,
                    zone,
                })
            }
        }
    }

    /// Create from two instant-like endpoints
    ///
    /// The zone is the start's zone, or the default zone for an `Instant`.
    pub fn between(start: &Temporal, end: &Temporal) -> Result<Self> {
        let zone = match start {
            Temporal::DateTime(dt) => dt.zone(),
            _ => config::default_zone(),
        };
        let millis = |t: &Temporal| {
            t.instant_millis()
                .ok_or_else(|| Error::conversion("Interval", format!("endpoint {}", t.kind())))
        };
        Interval::new(millis(start)?, millis(end)?, zone)
    }

    /// Start plus an exact duration
    pub fn from_start_duration(start: DateTime, duration: Duration) -> Result<Self> {
        let end = start.plus_millis(duration.millis())?;
        Interval::new(start.millis(), end.millis(), start.zone())
    }

    /// Duration ending at `end`
    pub fn from_duration_end(duration: Duration, end: DateTime) -> Result<Self> {
        let start = end.plus_millis(duration.negated()?.millis())?;
        Interval::new(start.millis(), end.millis(), end.zone())
    }

    /// Start plus a period, added field by field in local time
    pub fn from_start_period(start: DateTime, period: &Period) -> Result<Self> {
        let end = period
            .iter()
            .try_fold(start, |acc, (field, value)| acc.plus_unit(field, value as i64))?;
        Interval::new(start.millis(), end.millis(), start.zone())
    }

    /// Period ending at `end`
    pub fn from_period_end(period: &Period, end: DateTime) -> Result<Self> {
        let start = period
            .iter()
            .try_fold(end, |acc, (field, value)| acc.plus_unit(field, -(value as i64)))?;
        Interval::new(start.millis(), end.millis(), end.zone())
    }

    /// Start in epoch milliseconds
    pub const fn start_millis(&self) -> i64 {
        self.start
    }

    /// End in epoch milliseconds
    pub const fn end_millis(&self) -> i64 {
        self.end
    }

    /// Zone fields are read in
    pub const fn zone(&self) -> Zone {
        self.zone
    }

    /// Start as a zoned date-time
    pub const fn start(&self) -> DateTime {
        DateTime::new(self.start, self.zone)
    }

    /// End as a zoned date-time
    pub const fn end(&self) -> DateTime {
        DateTime::new(self.end, self.zone)
    }

    /// True when start equals end
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Exact length
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` when the span exceeds `i64` millis.
    pub fn duration(&self) -> Result<Duration> {
        Duration::between(self.start, self.end)
    }

    /// Length split over a period type in local time
    pub fn to_period(&self, period_type: PeriodType) -> Result<Period> {
        Period::between(self.start().local()?, self.end().local()?, period_type)
    }

    /// Copy with a new start
    ///
    /// # Errors
    ///
    /// Returns `InvalidInterval` if the start would exceed the end.
    pub fn with_start_millis(&self, start_millis: i64) -> Result<Self> {
        Self::with_order(start_millis, self.end, self.zone, IntervalOrder::Reject)
    }

    /// Copy with a new end
    ///
    /// # Errors
    ///
    /// Returns `InvalidInterval` if the end would precede the start.
    pub fn with_end_millis(&self, end_millis: i64) -> Result<Self> {
        Self::with_order(self.start, end_millis, self.zone, IntervalOrder::Reject)
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.start(), self.end())
    }
}

// ============================================================================
// PartialInterval
// ============================================================================

/// Span between two partials of one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialInterval {
    start: Temporal,
    end: Temporal,
}

fn field_names(values: &FieldValues) -> String {
    let names: Vec<&str> = values.iter().map(|(f, _)| f.name()).collect();
    format!("Partial[{}]", names.join(", "))
}

/// Ordering key of a partial endpoint
fn key_of(value: &Temporal) -> Result<FieldValues> {
    match value.category() {
        Category::Partial => value
            .partial_values()
            .ok_or_else(|| {
                Error::conversion("PartialInterval", format!("endpoint {}", value.kind()))
            }),
        _ => Err(Error::conversion(
            "PartialInterval",
            format!("endpoint {}", value.kind()),
        )),
    }
}

/// Check two partials are comparable and order them
///
/// # Errors
///
/// Returns `IncompatiblePartialKinds` for different kinds, or generic
/// partials with different field sets.
pub fn compare_partials(a: &Temporal, b: &Temporal) -> Result<std::cmp::Ordering> {
    let (ka, kb) = (key_of(a)?, key_of(b)?);
    let incompatible =
        |left: String, right: String| Error::IncompatiblePartialKinds { left, right };
    if a.kind() != b.kind() {
        return Err(incompatible(a.kind().name().into(), b.kind().name().into()));
    }
    if a.kind() == EntityKind::Partial && !ka.iter().map(|p| p.0).eq(kb.iter().map(|p| p.0)) {
        return Err(incompatible(field_names(&ka), field_names(&kb)));
    }
    Ok(ka.iter().map(|p| p.1).cmp(kb.iter().map(|p| p.1)))
}

impl PartialInterval {
    /// Create with the installed endpoint-order policy
    pub fn new(start: Temporal, end: Temporal) -> Result<Self> {
        Self::with_order(start, end, config::current().interval_order)
    }

    /// Create with an explicit endpoint-order policy
    pub fn with_order(start: Temporal, end: Temporal, order: IntervalOrder) -> Result<Self> {
        if compare_partials(&start, &end)?.is_le() {
            return Ok(PartialInterval { start, end });
        }
        match order {
            IntervalOrder::Reject => Err(Error::InvalidInterval(format!(
                "start {} is after end {}",
                start, end
            ))),
            IntervalOrder::Normalize => {
                warn!(start = %start, end = %end, "normalizing reversed partial interval");
                Ok(PartialInterval { start: end, end: start })
            }
        }
    }

    /// Start endpoint
    pub fn start(&self) -> &Temporal {
        &self.start
    }

    /// End endpoint
    pub fn end(&self) -> &Temporal {
        &self.end
    }

    /// Kind of both endpoints
    pub fn endpoint_kind(&self) -> EntityKind {
        self.start.kind()
    }

    /// Copy with a new start
    ///
    /// # Errors
    ///
    /// `IncompatiblePartialKinds` for another kind, `InvalidInterval` if the
    /// start would exceed the end.
    pub fn with_start(&self, start: Temporal) -> Result<Self> {
        Self::with_order(start, self.end.clone(), IntervalOrder::Reject)
    }

    /// Copy with a new end
    pub fn with_end(&self, end: Temporal) -> Result<Self> {
        Self::with_order(self.start.clone(), end, IntervalOrder::Reject)
    }
}

impl std::fmt::Display for PartialInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}
