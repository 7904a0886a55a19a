//! Conversion Tests
//!
//! Arguments that match no other shape go to the converter registry.
//! Also covers the formatter and the mutable date-time, which sit beside
//! the algebra rather than inside it.

use crate::common::*;
use tempora::{construct, construct_required, plus, DateTime, Formatter, MutableDateTime, Shape};

#[test]
fn test_iso_strings_per_kind() {
    let cases: Vec<(EntityKind, &str, Temporal)> = vec![
        (EntityKind::LocalDate, "2010-06-30", date(2010, 6, 30)),
        (EntityKind::LocalTime, "07:45:00.250", time(7, 45, 0, 250)),
        (EntityKind::Instant, "1970-01-01T00:01:00Z", at(60_000)),
        (
            EntityKind::Period,
            "P1Y2M",
            period(&[(DurationField::Years, 1), (DurationField::Months, 2)]),
        ),
        (EntityKind::FieldSpan, "PT90M", FieldSpan::minutes(90).into()),
        (EntityKind::Interval, "1970-01-01T00:00:00Z/PT1S", interval(0, 1_000)),
    ];
    for (kind, text, expected) in cases {
        let value = Value::from(text);
        assert_eq!(Shape::of(kind, &value), Shape::Conversion);
        assert_eq!(construct_required(kind, &value).unwrap(), expected, "{}", text);
    }
}

#[test]
fn test_unparseable_text() {
    assert!(matches!(
        construct(EntityKind::LocalDate, &Value::from("not a date")),
        Err(Error::ConversionFailure { .. })
    ));
}

#[test]
fn test_cross_kind_through_construct() {
    init_tracing();
    let dt: Temporal = DateTime::new(0, Zone::for_id("+10:00").unwrap()).into();
    let ldt = construct_required(EntityKind::LocalDateTime, &Value::from(dt.clone())).unwrap();
    assert_eq!(ldt.to_string(), "1970-01-01T10:00:00.000");
    let instant = construct_required(EntityKind::Instant, &Value::from(dt)).unwrap();
    assert_eq!(instant, at(0));
}

#[test]
fn test_display_then_construct_is_identity() {
    let values: Vec<Temporal> = vec![
        date(1999, 1, 1),
        time(0, 0, 0, 1),
        date_time((2010, 6, 1), (8, 0, 0, 0)),
        YearMonth::new(2010, 6).unwrap().into(),
        MonthDay::new(12, 31).unwrap().into(),
        at(-1),
    ];
    for value in values {
        let text = value.to_string();
        let parsed = construct_required(value.kind(), &Value::from(text.as_str())).unwrap();
        assert_eq!(parsed, value, "{}", text);
    }
}

// =============================================================================
// Formatter
// =============================================================================

#[test]
fn test_formatter_round_trip() {
    let f = Formatter::new("%Y/%m/%d %H:%M");
    let ldt = date_time((2010, 6, 1), (8, 30, 0, 0));
    let text = f.format(&ldt).unwrap();
    assert_eq!(text, "2010/06/01 08:30");
    assert_eq!(f.parse(EntityKind::LocalDateTime, &text).unwrap(), ldt);
}

#[test]
fn test_formatter_rejects_intervals() {
    let f = Formatter::new("%Y");
    assert!(matches!(f.format(&interval(0, 1)), Err(Error::UnsupportedOperation { .. })));
}

// =============================================================================
// Mutable Date-Time
// =============================================================================

#[test]
fn test_mutable_date_time_changes_in_place() {
    let mut m = MutableDateTime::new(DateTime::new(0, Zone::UTC));
    m.set(DateTimeField::Year, 2010).unwrap();
    m.add(DurationField::Days, 1).unwrap();
    assert_eq!(m.get(DateTimeField::DayOfMonth).unwrap(), 2);
    assert!(m.set(DateTimeField::MonthOfYear, 13).is_err());
    assert_eq!(m.get(DateTimeField::MonthOfYear).unwrap(), 1);
}

#[test]
fn test_mutable_snapshot_enters_algebra() {
    let mut m = MutableDateTime::new(DateTime::new(0, Zone::UTC));
    m.add_millis(500).unwrap();
    let frozen: Temporal = m.to_date_time().into();
    assert_eq!(plus(&frozen, &[500i64.into()]).unwrap(), DateTime::new(1_000, Zone::UTC).into());
    assert_eq!(m.kind(), EntityKind::MutableDateTime);
}
