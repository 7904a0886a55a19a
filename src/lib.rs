//! Tempora - a polymorphic temporal algebra
//!
//! One set of verbs over instants, zoned date-times, partial dates and
//! times, field spans, durations and intervals:
//!
//! - [`construct`] / [`now`] / [`span`]: build any kind from one argument
//! - [`property`]: read, bound and replace one field of a value
//! - [`plus`] / [`minus`] / [`merge`] / [`negate`] / [`abs`]: arithmetic
//! - [`contains`] / [`overlaps`] / [`abuts`] / [`overlap`] / [`gap`]: interval relations
//!
//! # Quick Start
//!
//! ```ignore
//! use tempora::{construct, plus, EntityKind, FieldMap, FieldSpan, Value};
//!
//! let date = construct(
//!     EntityKind::LocalDate,
//!     &Value::Map(
//!         FieldMap::new()
//!             .with("year", 2010)
//!             .with("monthOfYear", 1)
//!             .with("dayOfMonth", 1),
//!     ),
//! )?
//! .unwrap();
//! let later = plus(&date, &[FieldSpan::years(11).into()])?;
//! assert_eq!(later.to_string(), "2021-01-01");
//! ```
//!
//! # Architecture
//!
//! Values and the calendar live in `tempora-engine`; this crate dispatches
//! each verb over the closed [`Temporal`] enum. Nothing here inspects types
//! at runtime.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arithmetic;
pub mod construct;
pub mod property;
pub mod relations;

pub use arithmetic::{
    abs, count, count_in, days, days_in, hours, hours_in, merge, millis, millis_in, minus, minutes,
    minutes_in, months, months_in, negate, plus, seconds, seconds_in, weeks, weeks_in, years,
    years_in, Operand,
};
pub use construct::{
    as_map, construct, construct_required, duration_between, from_map, now, span, Shape,
};
pub use property::{properties, property, property_named, Properties, Property};
pub use relations::{
    abuts, contains, duration_of, gap, is_after, is_before, move_end_by, move_end_to, move_start_by,
    move_start_to, overlap, overlaps, Timeline,
};

pub use tempora_core::{
    Category, DateTimeField, DurationField, EntityKind, Error, PeriodType, Result,
};
pub use tempora_engine::{
    Chronology, DateTime, Duration, EngineConfig, FieldMap, FieldSpan, Formatter, Instant, Interval,
    IntervalOrder, LocalDate, LocalDateTime, LocalTime, MonthDay, MutableDateTime, Partial,
    PartialInterval, Period, Temporal, Value, YearMonth, Zone,
};
