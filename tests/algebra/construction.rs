//! Construction Tests
//!
//! One entry point per kind, resolved by argument shape in a fixed order:
//! absent, integral, field map, named arguments, conversion.

use crate::common::*;
use tempora::{
    construct, construct_required, duration_between, now, span, DateTime, Duration, Shape,
};

// =============================================================================
// Shape Order
// =============================================================================

#[test]
fn test_absent_never_means_now() {
    for kind in EntityKind::ALGEBRA {
        assert_eq!(construct(kind, &Value::Null).unwrap(), None, "{}", kind);
        assert_eq!(construct(kind, &Value::from("")).unwrap(), None, "{}", kind);
    }
}

#[test]
fn test_map_matching_canonical_shape_is_field_map() {
    let m = fields(&[("year", 2010), ("monthOfYear", 6)]);
    assert_eq!(Shape::of(EntityKind::YearMonth, &m), Shape::FieldMap);
    assert_eq!(
        construct_required(EntityKind::YearMonth, &m).unwrap(),
        YearMonth::new(2010, 6).unwrap().into()
    );
}

#[test]
fn test_map_outside_canonical_shape_is_named_args() {
    let m = fields(&[("millis", 86_400_000)]);
    assert_eq!(Shape::of(EntityKind::LocalDate, &m), Shape::NamedArgs);
    assert_eq!(construct_required(EntityKind::LocalDate, &m).unwrap(), date(1970, 1, 2));
}

// =============================================================================
// Integral
// =============================================================================

#[test]
fn test_integral_is_epoch_millis_for_points() {
    assert_eq!(construct_required(EntityKind::Instant, &Value::Int(0)).unwrap(), at(0));
    assert_eq!(
        construct_required(EntityKind::DateTime, &Value::Int(1_000)).unwrap(),
        DateTime::new(1_000, Zone::UTC).into()
    );
    assert_eq!(
        construct_required(EntityKind::LocalTime, &Value::Int(3_600_000)).unwrap(),
        time(1, 0, 0, 0)
    );
}

#[test]
fn test_integral_duration_is_raw_millis() {
    assert_eq!(
        construct_required(EntityKind::Duration, &Value::Int(-5)).unwrap(),
        Duration::from_millis(-5).into()
    );
}

// =============================================================================
// Field Maps
// =============================================================================

#[test]
fn test_field_map_clamps_day_after_month() {
    // injected in declared order: year, month, then day
    let d = construct_required(
        EntityKind::LocalDate,
        &fields(&[("dayOfMonth", 29), ("monthOfYear", 2), ("year", 2011)]),
    );
    assert!(matches!(d, Err(Error::FieldValueOutOfRange { .. })));
}

#[test]
fn test_field_map_on_date_time_with_zone() {
    let m = Value::Map(
        FieldMap::new()
            .with("year", 1970)
            .with("monthOfYear", 1)
            .with("dayOfMonth", 1)
            .with("hourOfDay", 2)
            .with("zone", "+02:00"),
    );
    match construct_required(EntityKind::DateTime, &m).unwrap() {
        Temporal::DateTime(dt) => {
            assert_eq!(dt.zone(), Zone::for_id("+02:00").unwrap());
            assert_eq!(dt.millis(), 0);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_field_map_period_preserves_field_set() {
    let value = construct_required(EntityKind::Period, &fields(&[("days", 3), ("hours", 0)]));
    let p = as_period(&value.unwrap());
    assert_eq!(p.fields().as_slice(), &[DurationField::Days, DurationField::Hours]);
}

#[test]
fn test_field_span_map_takes_one_field() {
    assert_eq!(
        construct_required(EntityKind::FieldSpan, &fields(&[("weeks", 2)])).unwrap(),
        FieldSpan::weeks(2).into()
    );
    assert!(construct(EntityKind::FieldSpan, &fields(&[("weeks", 2), ("days", 1)])).is_err());
}

#[test]
fn test_generic_partial_from_any_fields() {
    let p = construct_required(EntityKind::Partial, &fields(&[("hourOfDay", 10), ("year", 2010)]))
        .unwrap();
    assert_eq!(p.kind(), EntityKind::Partial);
    match p {
        Temporal::Partial(p) => {
            assert_eq!(p.size(), 2);
            assert_eq!(p.get(DateTimeField::Year), Some(2010));
        }
        other => panic!("unexpected {:?}", other),
    }
}

// =============================================================================
// Named Arguments
// =============================================================================

#[test]
fn test_interval_from_start_and_duration() {
    let m = Value::Map(FieldMap::new().with("start", 1_000).with("duration", 500));
    let i = as_interval(&construct_required(EntityKind::Interval, &m).unwrap());
    assert_eq!((i.start_millis(), i.end_millis()), (1_000, 1_500));
}

#[test]
fn test_interval_from_field_map_of_points() {
    let value = construct_required(EntityKind::Interval, &fields(&[("start", 0), ("end", 10)]));
    let i = as_interval(&value.unwrap());
    assert_eq!(i.duration().unwrap(), Duration::from_millis(10));
}

#[test]
fn test_reversed_interval_rejected() {
    assert!(matches!(
        construct(EntityKind::Interval, &fields(&[("start", 10), ("end", 0)])),
        Err(Error::InvalidInterval { .. })
    ));
}

// =============================================================================
// Zero-Argument and Two-Argument Forms
// =============================================================================

#[test]
fn test_now_per_kind() {
    assert_eq!(now(EntityKind::FieldSpan).unwrap(), FieldSpan::millis(0).into());
    assert_eq!(now(EntityKind::LocalDate).unwrap().kind(), EntityKind::LocalDate);
    assert!(matches!(now(EntityKind::PartialInterval), Err(Error::UnsupportedOperation { .. })));
    assert!(matches!(now(EntityKind::Period).unwrap(), Temporal::Period(p) if p.is_zero()));
}

#[test]
fn test_span_and_duration_between() {
    assert_eq!(span(3, DurationField::Hours).unwrap(), FieldSpan::hours(3).into());
    assert_eq!(
        duration_between(&at(10_000), &at(4_000)).unwrap(),
        Duration::from_millis(-6_000)
    );
    assert!(duration_between(&at(0), &FieldSpan::days(1).into()).is_err());
}

#[test]
fn test_mutable_kind_never_constructed() {
    init_tracing();
    assert!(matches!(
        construct(EntityKind::MutableDateTime, &Value::Int(0)),
        Err(Error::UnsupportedOperation { .. })
    ));
}
