//! Shared test utilities for the integration suites.
//!
//! Import via `mod common;` from a test's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::Once;

pub use tempora::{
    DateTimeField, DurationField, EntityKind, Error, FieldMap, FieldSpan, Instant, Interval,
    LocalDate, LocalDateTime, LocalTime, MonthDay, Operand, Partial, PartialInterval, Period,
    PeriodType, Temporal, Value, YearMonth, Zone,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output to the test writer.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Value builders
// ============================================================================

pub fn date(year: i32, month: u32, day: u32) -> Temporal {
    LocalDate::new(year, month, day).unwrap().into()
}

pub fn time(hour: u32, minute: u32, second: u32, millis: u32) -> Temporal {
    LocalTime::new(hour, minute, second, millis).unwrap().into()
}

pub fn date_time(
    (year, month, day): (i32, u32, u32),
    (hour, minute, second, millis): (u32, u32, u32, u32),
) -> Temporal {
    let d = LocalDate::new(year, month, day).unwrap();
    let t = LocalTime::new(hour, minute, second, millis).unwrap();
    LocalDateTime::new(d, t).into()
}

/// A generic partial from field/value pairs
pub fn partial(pairs: &[(DateTimeField, i64)]) -> Temporal {
    Partial::from_fields(pairs.iter().copied()).unwrap().into()
}

pub fn at(millis: i64) -> Temporal {
    Instant::from_millis(millis).into()
}

pub fn interval(start: i64, end: i64) -> Temporal {
    Interval::new(start, end, Zone::UTC).unwrap().into()
}

pub fn date_interval(start: Temporal, end: Temporal) -> Temporal {
    PartialInterval::new(start, end).unwrap().into()
}

pub fn period(pairs: &[(DurationField, i32)]) -> Temporal {
    Period::new(pairs).unwrap().into()
}

/// A field map value from integer pairs
pub fn fields(pairs: &[(&str, i64)]) -> Value {
    Value::Map(pairs.iter().map(|(k, v)| (*k, *v)).collect())
}

/// Unwrap a period, panicking on any other kind
pub fn as_period(value: &Temporal) -> Period {
    match value {
        Temporal::Period(p) => *p,
        other => panic!("expected Period, got {:?}", other),
    }
}

/// Unwrap an interval, panicking on any other kind
pub fn as_interval(value: &Temporal) -> Interval {
    match value {
        Temporal::Interval(i) => *i,
        other => panic!("expected Interval, got {:?}", other),
    }
}
