//! The closed set of temporal values
//!
//! [`Temporal`] is the one type every algebra verb accepts. Its variants
//! map one-to-one onto the algebra's [`EntityKind`]s; behaviour per kind is
//! a `match` here, resolved once per call.

use crate::duration::Duration;
use crate::instant::{DateTime, Instant};
use crate::interval::{Interval, PartialInterval};
use crate::local::{LocalDate, LocalDateTime, LocalTime, MonthDay, YearMonth};
use crate::partial::{FieldValues, Partial};
use crate::registry;
use crate::span::{FieldSpan, Period};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use tempora_core::{Category, DateTimeField, DurationField, EntityKind, Error, Result};

/// Any value the algebra operates on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Temporal {
    /// UTC instant
    Instant(Instant),
    /// Zoned date-time
    DateTime(DateTime),
    /// Date
    LocalDate(LocalDate),
    /// Time of day
    LocalTime(LocalTime),
    /// Date and time
    LocalDateTime(LocalDateTime),
    /// Year and month
    YearMonth(YearMonth),
    /// Month and day
    MonthDay(MonthDay),
    /// Arbitrary field set
    Partial(Partial),
    /// Single-field span
    FieldSpan(FieldSpan),
    /// Multi-field span
    Period(Period),
    /// Exact duration
    Duration(Duration),
    /// Absolute interval
    Interval(Interval),
    /// Interval between partials
    PartialInterval(Box<PartialInterval>),
}

macro_rules! impl_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Temporal {
                fn from(value: $variant) -> Self {
                    Temporal::$variant(value)
                }
            }
        )*
    };
}

impl_from!(
    Instant,
    DateTime,
    LocalDate,
    LocalTime,
    LocalDateTime,
    YearMonth,
    MonthDay,
    Partial,
    FieldSpan,
    Period,
    Duration,
    Interval,
);

impl From<PartialInterval> for Temporal {
    fn from(value: PartialInterval) -> Self {
        Temporal::PartialInterval(Box::new(value))
    }
}

fn narrow<T: TryFrom<i64>>(field: DateTimeField, value: i64) -> Result<T> {
    T::try_from(value).map_err(|_| {
        let (min, max) = crate::calendar::static_bounds(field);
        Error::out_of_range(field.name(), value, min, max)
    })
}

impl Temporal {
    /// Kind of this value
    pub fn kind(&self) -> EntityKind {
        match self {
            Temporal::Instant(_) => EntityKind::Instant,
            Temporal::DateTime(_) => EntityKind::DateTime,
            Temporal::LocalDate(_) => EntityKind::LocalDate,
            Temporal::LocalTime(_) => EntityKind::LocalTime,
            Temporal::LocalDateTime(_) => EntityKind::LocalDateTime,
            Temporal::YearMonth(_) => EntityKind::YearMonth,
            Temporal::MonthDay(_) => EntityKind::MonthDay,
            Temporal::Partial(_) => EntityKind::Partial,
            Temporal::FieldSpan(_) => EntityKind::FieldSpan,
            Temporal::Period(_) => EntityKind::Period,
            Temporal::Duration(_) => EntityKind::Duration,
            Temporal::Interval(_) => EntityKind::Interval,
            Temporal::PartialInterval(_) => EntityKind::PartialInterval,
        }
    }

    /// Category of this value
    pub fn category(&self) -> Category {
        self.kind().category()
    }

    /// Epoch milliseconds of an instant-like value
    pub fn instant_millis(&self) -> Option<i64> {
        match self {
            Temporal::Instant(i) => Some(i.millis()),
            Temporal::DateTime(dt) => Some(dt.millis()),
            _ => None,
        }
    }

    /// Add a span unit to an instant-like or partial value
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` for any other kind.
    pub fn plus_unit(&self, unit: DurationField, amount: i64) -> Result<Temporal> {
        Ok(match self {
            Temporal::Instant(v) => v.plus_unit(unit, amount)?.into(),
            Temporal::DateTime(v) => v.plus_unit(unit, amount)?.into(),
            Temporal::LocalDate(v) => v.plus_unit(unit, amount)?.into(),
            Temporal::LocalTime(v) => v.plus_unit(unit, amount)?.into(),
            Temporal::LocalDateTime(v) => v.plus_unit(unit, amount)?.into(),
            Temporal::YearMonth(v) => v.plus_unit(unit, amount)?.into(),
            Temporal::MonthDay(v) => v.plus_unit(unit, amount)?.into(),
            Temporal::Partial(v) => v.plus_unit(unit, amount)?.into(),
            other => return Err(Error::unsupported("plus span", other.kind().name())),
        })
    }

    /// Add exact milliseconds to an instant-like or partial value
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` for kinds without a millisecond
    /// equivalent (year-month, month-day, generic partial, spans).
    pub fn plus_millis(&self, millis: i64) -> Result<Temporal> {
        Ok(match self {
            Temporal::Instant(v) => v.plus_millis(millis)?.into(),
            Temporal::DateTime(v) => v.plus_millis(millis)?.into(),
            Temporal::LocalDate(v) => v.plus_millis(millis)?.into(),
            Temporal::LocalTime(v) => v.plus_millis(millis)?.into(),
            Temporal::LocalDateTime(v) => v.plus_millis(millis)?.into(),
            Temporal::YearMonth(v) => v.plus_millis(millis)?.into(),
            Temporal::MonthDay(v) => v.plus_millis(millis)?.into(),
            other => return Err(Error::unsupported("plus duration", other.kind().name())),
        })
    }

    /// Field values that identify a partial, largest first
    ///
    /// Concrete kinds report their defining fields; the generic partial
    /// reports every field it carries. `None` for non-partials.
    pub fn partial_values(&self) -> Option<FieldValues> {
        use DateTimeField::*;
        let date = |d: NaiveDate| -> FieldValues {
            smallvec![
                (Year, registry::read_date(Year, d)),
                (MonthOfYear, registry::read_date(MonthOfYear, d)),
                (DayOfMonth, registry::read_date(DayOfMonth, d)),
            ]
        };
        let time = |t: NaiveTime| -> FieldValues {
            smallvec![
                (HourOfDay, registry::read_time(HourOfDay, t)),
                (MinuteOfHour, registry::read_time(MinuteOfHour, t)),
                (SecondOfMinute, registry::read_time(SecondOfMinute, t)),
                (MillisOfSecond, registry::read_time(MillisOfSecond, t)),
            ]
        };
        Some(match self {
            Temporal::LocalDate(d) => date(d.naive()),
            Temporal::LocalTime(t) => time(t.naive()),
            Temporal::LocalDateTime(dt) => {
                let mut values = date(dt.naive().date());
                values.extend(time(dt.naive().time()));
                values
            }
            Temporal::YearMonth(ym) => date(ym.naive()).into_iter().take(2).collect(),
            Temporal::MonthDay(md) => date(md.naive()).into_iter().skip(1).collect(),
            Temporal::Partial(p) => p.pairs().iter().copied().collect(),
            _ => return None,
        })
    }

    /// Build the partial identified by field values
    ///
    /// The result is the concrete kind whose defining fields are exactly
    /// the given ones, or a generic [`Partial`] otherwise.
    pub fn from_partial_values(values: &[(DateTimeField, i64)]) -> Result<Temporal> {
        let fields: Vec<DateTimeField> = values.iter().map(|(f, _)| *f).collect();
        let kind = EntityKind::CONCRETE_PARTIALS
            .into_iter()
            .find(|k| registry::defining_fields(*k) == fields.as_slice());
        let get = |field: DateTimeField| {
            values.iter().find(|(f, _)| *f == field).map_or(0, |(_, v)| *v)
        };
        let date = || -> Result<LocalDate> {
            LocalDate::new(
                narrow(DateTimeField::Year, get(DateTimeField::Year))?,
                narrow(DateTimeField::MonthOfYear, get(DateTimeField::MonthOfYear))?,
                narrow(DateTimeField::DayOfMonth, get(DateTimeField::DayOfMonth))?,
            )
        };
        let time = || -> Result<LocalTime> {
            LocalTime::new(
                narrow(DateTimeField::HourOfDay, get(DateTimeField::HourOfDay))?,
                narrow(DateTimeField::MinuteOfHour, get(DateTimeField::MinuteOfHour))?,
                narrow(DateTimeField::SecondOfMinute, get(DateTimeField::SecondOfMinute))?,
                narrow(DateTimeField::MillisOfSecond, get(DateTimeField::MillisOfSecond))?,
            )
        };
        Ok(match kind {
            Some(EntityKind::LocalDate) => date()?.into(),
            Some(EntityKind::LocalTime) => time()?.into(),
            Some(EntityKind::LocalDateTime) => LocalDateTime::new(date()?, time()?).into(),
            Some(EntityKind::YearMonth) => YearMonth::new(
                narrow(DateTimeField::Year, get(DateTimeField::Year))?,
                narrow(DateTimeField::MonthOfYear, get(DateTimeField::MonthOfYear))?,
            )?
            .into(),
            Some(EntityKind::MonthDay) => MonthDay::new(
                narrow(DateTimeField::MonthOfYear, get(DateTimeField::MonthOfYear))?,
                narrow(DateTimeField::DayOfMonth, get(DateTimeField::DayOfMonth))?,
            )?
            .into(),
            _ => Partial::from_fields(values.iter().copied())?.into(),
        })
    }

    /// Wall-clock date-time used to count whole units between two values
    ///
    /// Kinds without a date count from 1970-01-01; `MonthDay` counts
    /// within its leap year.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` for the generic partial and
    /// non-point kinds.
    pub fn reference_datetime(&self) -> Result<NaiveDateTime> {
        match self {
            Temporal::Instant(i) => i.to_utc(),
            Temporal::DateTime(dt) => dt.local(),
            Temporal::LocalDate(d) => Ok(d.naive().and_time(NaiveTime::MIN)),
            Temporal::LocalTime(t) => Ok(NaiveDate::default().and_time(t.naive())),
            Temporal::LocalDateTime(dt) => Ok(dt.naive()),
            Temporal::YearMonth(ym) => Ok(ym.naive().and_time(NaiveTime::MIN)),
            Temporal::MonthDay(md) => Ok(md.naive().and_time(NaiveTime::MIN)),
            other => Err(Error::unsupported("count units", other.kind().name())),
        }
    }
}

impl std::fmt::Display for Temporal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Temporal::Instant(v) => std::fmt::Display::fmt(v, f),
            Temporal::DateTime(v) => std::fmt::Display::fmt(v, f),
            Temporal::LocalDate(v) => std::fmt::Display::fmt(v, f),
            Temporal::LocalTime(v) => std::fmt::Display::fmt(v, f),
            Temporal::LocalDateTime(v) => std::fmt::Display::fmt(v, f),
            Temporal::YearMonth(v) => std::fmt::Display::fmt(v, f),
            Temporal::MonthDay(v) => std::fmt::Display::fmt(v, f),
            Temporal::Partial(v) => std::fmt::Display::fmt(v, f),
            Temporal::FieldSpan(v) => std::fmt::Display::fmt(v, f),
            Temporal::Period(v) => std::fmt::Display::fmt(v, f),
            Temporal::Duration(v) => std::fmt::Display::fmt(v, f),
            Temporal::Interval(v) => std::fmt::Display::fmt(v, f),
            Temporal::PartialInterval(v) => std::fmt::Display::fmt(v, f),
        }
    }
}
