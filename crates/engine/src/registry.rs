//! Field Registry
//!
//! Maps `(EntityKind, DateTimeField)` to a [`FieldAccessor`] that reads,
//! bounds and sets that field on a [`Temporal`] of that kind.
//!
//! ## How It Works
//!
//! 1. On first use, every kind's declared field list is walked once and an
//!    accessor is stored per pair in an `FxHashMap`
//! 2. Callers resolve a field token once (at construction or property
//!    creation) and keep the accessor
//! 3. The accessor holds static fn pointers into [`crate::calendar`]; no
//!    lookup happens when it is applied
//!
//! The table is read-only after it is built and shared without locking.

use crate::calendar::{self, FieldRule};
use crate::instant::{DateTime, Instant};
use crate::local::{LocalDate, LocalDateTime, LocalTime, MonthDay, YearMonth};
use crate::temporal::Temporal;
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use tempora_core::{DateTimeField, EntityKind, Error, Result};
use tracing::debug;

use tempora_core::DateTimeField::*;

/// Date fields in injection order
pub const DATE_FIELDS: [DateTimeField; 11] = [
    Era,
    YearOfEra,
    CenturyOfEra,
    YearOfCentury,
    Year,
    Weekyear,
    WeekOfWeekyear,
    DayOfWeek,
    DayOfYear,
    MonthOfYear,
    DayOfMonth,
];

/// Time fields in injection order
pub const TIME_FIELDS: [DateTimeField; 9] = [
    HalfdayOfDay,
    HourOfHalfday,
    MinuteOfDay,
    SecondOfDay,
    MillisOfDay,
    HourOfDay,
    MinuteOfHour,
    SecondOfMinute,
    MillisOfSecond,
];

/// Date fields then time fields
pub const DATE_TIME_FIELDS: [DateTimeField; 20] = [
    Era,
    YearOfEra,
    CenturyOfEra,
    YearOfCentury,
    Year,
    Weekyear,
    WeekOfWeekyear,
    DayOfWeek,
    DayOfYear,
    MonthOfYear,
    DayOfMonth,
    HalfdayOfDay,
    HourOfHalfday,
    MinuteOfDay,
    SecondOfDay,
    MillisOfDay,
    HourOfDay,
    MinuteOfHour,
    SecondOfMinute,
    MillisOfSecond,
];

const YEAR_MONTH_FIELDS: [DateTimeField; 2] = [Year, MonthOfYear];
const MONTH_DAY_FIELDS: [DateTimeField; 2] = [MonthOfYear, DayOfMonth];
const DATE_DEFINING: [DateTimeField; 3] = [Year, MonthOfYear, DayOfMonth];
const TIME_DEFINING: [DateTimeField; 4] = [HourOfDay, MinuteOfHour, SecondOfMinute, MillisOfSecond];
const DATE_TIME_DEFINING: [DateTimeField; 7] = [
    Year,
    MonthOfYear,
    DayOfMonth,
    HourOfDay,
    MinuteOfHour,
    SecondOfMinute,
    MillisOfSecond,
];

/// Kinds with registered fields
pub const FIELD_KINDS: [EntityKind; 8] = [
    EntityKind::Instant,
    EntityKind::DateTime,
    EntityKind::LocalDate,
    EntityKind::LocalTime,
    EntityKind::LocalDateTime,
    EntityKind::YearMonth,
    EntityKind::MonthDay,
    EntityKind::Partial,
];

/// Fields a kind declares, in injection order
///
/// The generic partial declares the whole vocabulary; kinds without
/// fields declare none.
pub fn declared_fields(kind: EntityKind) -> &'static [DateTimeField] {
    match kind {
        EntityKind::Instant | EntityKind::DateTime | EntityKind::LocalDateTime => &DATE_TIME_FIELDS,
        EntityKind::LocalDate => &DATE_FIELDS,
        EntityKind::LocalTime => &TIME_FIELDS,
        EntityKind::YearMonth => &YEAR_MONTH_FIELDS,
        EntityKind::MonthDay => &MONTH_DAY_FIELDS,
        EntityKind::Partial => &DateTimeField::ALL,
        _ => &[],
    }
}

/// Fields that fully determine a concrete partial, largest first
pub fn defining_fields(kind: EntityKind) -> &'static [DateTimeField] {
    match kind {
        EntityKind::LocalDate => &DATE_DEFINING,
        EntityKind::LocalTime => &TIME_DEFINING,
        EntityKind::LocalDateTime => &DATE_TIME_DEFINING,
        EntityKind::YearMonth => &YEAR_MONTH_FIELDS,
        EntityKind::MonthDay => &MONTH_DAY_FIELDS,
        _ => &[],
    }
}

/// Read a date field of an engine date
///
/// Time fields read as zero.
pub fn read_date(field: DateTimeField, date: NaiveDate) -> i64 {
    match calendar::rule(field) {
        FieldRule::Date(r) => (r.get)(date),
        FieldRule::Time(_) => 0,
    }
}

/// Read a time field of an engine time
///
/// Date fields read as zero.
pub fn read_time(field: DateTimeField, time: NaiveTime) -> i64 {
    match calendar::rule(field) {
        FieldRule::Time(r) => (r.get)(time),
        FieldRule::Date(_) => 0,
    }
}

// ============================================================================
// Accessor
// ============================================================================

/// Resolved accessor for one field of one kind
#[derive(Debug, Clone, Copy)]
pub struct FieldAccessor {
    kind: EntityKind,
    field: DateTimeField,
    rule: FieldRule,
}

impl FieldAccessor {
    /// Kind this accessor applies to
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Field this accessor reads and writes
    pub const fn field(&self) -> DateTimeField {
        self.field
    }

    fn unsupported(&self, value: &Temporal) -> Error {
        Error::field_unsupported(self.field.name(), value.kind().name())
    }

    fn check_kind(&self, value: &Temporal) -> Result<()> {
        if value.kind() != self.kind {
            return Err(self.unsupported(value));
        }
        Ok(())
    }

    fn date_of(&self, value: &Temporal) -> Result<NaiveDate> {
        match value {
            Temporal::Instant(i) => Ok(i.to_utc()?.date()),
            Temporal::DateTime(dt) => Ok(dt.local()?.date()),
            Temporal::LocalDate(d) => Ok(d.naive()),
            Temporal::LocalDateTime(dt) => Ok(dt.naive().date()),
            Temporal::YearMonth(ym) => Ok(ym.naive()),
            Temporal::MonthDay(md) => Ok(md.naive()),
            _ => Err(self.unsupported(value)),
        }
    }

    fn time_of(&self, value: &Temporal) -> Result<NaiveTime> {
        match value {
            Temporal::Instant(i) => Ok(i.to_utc()?.time()),
            Temporal::DateTime(dt) => Ok(dt.local()?.time()),
            Temporal::LocalTime(t) => Ok(t.naive()),
            Temporal::LocalDateTime(dt) => Ok(dt.naive().time()),
            _ => Err(self.unsupported(value)),
        }
    }

    fn with_date(&self, value: &Temporal, date: NaiveDate) -> Result<Temporal> {
        Ok(match value {
            Temporal::Instant(i) => Instant::from_utc(&date.and_time(i.to_utc()?.time())).into(),
            Temporal::DateTime(dt) => {
                DateTime::from_local(&date.and_time(dt.local()?.time()), dt.zone())?.into()
            }
            Temporal::LocalDate(_) => LocalDate::from_naive(date).into(),
            Temporal::LocalDateTime(dt) => {
                LocalDateTime::from_naive(date.and_time(dt.naive().time())).into()
            }
            Temporal::YearMonth(_) => YearMonth::from_naive(date).into(),
            Temporal::MonthDay(_) => MonthDay::from_naive(date).into(),
            _ => return Err(self.unsupported(value)),
        })
    }

    fn with_time(&self, value: &Temporal, time: NaiveTime) -> Result<Temporal> {
        Ok(match value {
            Temporal::Instant(i) => Instant::from_utc(&i.to_utc()?.date().and_time(time)).into(),
            Temporal::DateTime(dt) => {
                DateTime::from_local(&dt.local()?.date().and_time(time), dt.zone())?.into()
            }
            Temporal::LocalTime(_) => LocalTime::from_naive(time).into(),
            Temporal::LocalDateTime(dt) => {
                LocalDateTime::from_naive(dt.naive().date().and_time(time)).into()
            }
            _ => return Err(self.unsupported(value)),
        })
    }

    /// Current value of the field
    ///
    /// # Errors
    ///
    /// Returns `FieldUnsupported` if the value is of another kind, or is a
    /// generic partial without the field.
    pub fn get(&self, value: &Temporal) -> Result<i64> {
        self.check_kind(value)?;
        if let Temporal::Partial(p) = value {
            return p.get(self.field).ok_or_else(|| self.unsupported(value));
        }
        match self.rule {
            FieldRule::Date(r) => Ok((r.get)(self.date_of(value)?)),
            FieldRule::Time(r) => Ok((r.get)(self.time_of(value)?)),
        }
    }

    /// Legal `(min, max)` given the value's other fields
    pub fn bounds(&self, value: &Temporal) -> Result<(i64, i64)> {
        self.check_kind(value)?;
        if let Temporal::Partial(p) = value {
            return Ok(p.bounds(self.field));
        }
        match self.rule {
            FieldRule::Date(r) => {
                let date = self.date_of(value)?;
                Ok(((r.min)(date), (r.max)(date)))
            }
            FieldRule::Time(r) => {
                self.time_of(value)?;
                Ok((r.min, r.max))
            }
        }
    }

    /// Copy of the value with the field set
    ///
    /// A generic partial without the field gains it.
    ///
    /// # Errors
    ///
    /// Returns `FieldValueOutOfRange` outside [`FieldAccessor::bounds`].
    pub fn set(&self, value: &Temporal, new_value: i64) -> Result<Temporal> {
        let (min, max) = self.bounds(value)?;
        let out_of_range = || Error::out_of_range(self.field.name(), new_value, min, max);
        if new_value < min || new_value > max {
            return Err(out_of_range());
        }
        if let Temporal::Partial(p) = value {
            return Ok(p.with(self.field, new_value)?.into());
        }
        match self.rule {
            FieldRule::Date(r) => {
                let date = (r.set)(self.date_of(value)?, new_value).ok_or_else(out_of_range)?;
                self.with_date(value, date)
            }
            FieldRule::Time(r) => {
                let time = (r.set)(self.time_of(value)?, new_value).ok_or_else(out_of_range)?;
                self.with_time(value, time)
            }
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Table of accessors per `(kind, field)`
pub struct FieldRegistry {
    accessors: FxHashMap<(EntityKind, DateTimeField), FieldAccessor>,
}

static REGISTRY: Lazy<FieldRegistry> = Lazy::new(FieldRegistry::build);

/// The process-wide registry
pub fn registry() -> &'static FieldRegistry {
    &REGISTRY
}

impl FieldRegistry {
    fn build() -> Self {
        let mut accessors = FxHashMap::default();
        for kind in FIELD_KINDS {
            for field in declared_fields(kind) {
                let accessor = FieldAccessor {
                    kind,
                    field: *field,
                    rule: calendar::rule(*field),
                };
                accessors.insert((kind, *field), accessor);
            }
        }
        debug!(accessors = accessors.len(), "field registry built");
        FieldRegistry { accessors }
    }

    /// Accessor for a field of a kind
    ///
    /// # Errors
    ///
    /// Returns `FieldUnsupported` if the kind does not declare the field.
    pub fn resolve(&self, kind: EntityKind, field: DateTimeField) -> Result<FieldAccessor> {
        self.accessors
            .get(&(kind, field))
            .copied()
            .ok_or_else(|| Error::field_unsupported(field.name(), kind.name()))
    }

    /// Accessor for a field token (camelCase or kebab-case)
    pub fn resolve_name(&self, kind: EntityKind, token: &str) -> Result<FieldAccessor> {
        let field = DateTimeField::from_name(token)
            .ok_or_else(|| Error::field_unsupported(token, kind.name()))?;
        self.resolve(kind, field)
    }

    /// True if the kind declares the field
    pub fn supports(&self, kind: EntityKind, field: DateTimeField) -> bool {
        self.accessors.contains_key(&(kind, field))
    }

    /// Number of registered accessors
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

impl std::fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("accessors", &self.accessors.len())
            .finish()
    }
}
