//! Property View and Map Interchange Tests

use crate::common::*;
use tempora::{as_map, from_map, properties, property, property_named, DateTime};

// =============================================================================
// Property View
// =============================================================================

#[test]
fn test_day_bounds_follow_month() {
    let jan = date(2013, 1, 15);
    let apr = date(2013, 4, 15);
    assert_eq!(property(&jan, DateTimeField::DayOfMonth).unwrap().max_value().unwrap(), 31);
    assert_eq!(property(&apr, DateTimeField::DayOfMonth).unwrap().max_value().unwrap(), 30);
}

#[test]
fn test_with_value_returns_copy() {
    let d = date(2010, 5, 20);
    let year = property(&d, DateTimeField::Year).unwrap();
    let moved = year.with_value(2000).unwrap();
    assert_eq!(moved, date(2000, 5, 20));
    assert_eq!(year.value().unwrap(), 2010);
    assert_eq!(d, date(2010, 5, 20));
}

#[test]
fn test_setting_month_clamps_day() {
    let d = date(2011, 3, 31);
    let month = property(&d, DateTimeField::MonthOfYear).unwrap();
    assert_eq!(month.with_value(2).unwrap(), date(2011, 2, 28));
}

#[test]
fn test_time_fields_on_instant() {
    let i = at(3_723_004);
    let read = |field| property(&i, field).unwrap().value().unwrap();
    assert_eq!(read(DateTimeField::HourOfDay), 1);
    assert_eq!(read(DateTimeField::MinuteOfHour), 2);
    assert_eq!(read(DateTimeField::SecondOfMinute), 3);
    assert_eq!(read(DateTimeField::MillisOfSecond), 4);
    assert_eq!(read(DateTimeField::MillisOfDay), 3_723_004);
}

#[test]
fn test_zoned_fields_read_wall_clock() {
    let dt: Temporal = DateTime::new(0, Zone::for_id("-05:00").unwrap()).into();
    assert_eq!(property(&dt, DateTimeField::HourOfDay).unwrap().value().unwrap(), 19);
    assert_eq!(property(&dt, DateTimeField::Year).unwrap().value().unwrap(), 1969);
}

#[test]
fn test_hour_out_of_range() {
    let t = time(10, 0, 0, 0);
    let hour = property(&t, DateTimeField::HourOfDay).unwrap();
    assert_eq!((hour.min_value().unwrap(), hour.max_value().unwrap()), (0, 23));
    assert!(matches!(hour.with_value(24), Err(Error::FieldValueOutOfRange { .. })));
}

#[test]
fn test_kebab_and_camel_tokens() {
    let d = date(2010, 7, 4);
    let a = property_named(&d, "day-of-month").unwrap();
    let b = property_named(&d, "dayOfMonth").unwrap();
    assert_eq!(a.field(), b.field());
    assert!(matches!(property_named(&d, "fortnight"), Err(Error::FieldUnsupported { .. })));
}

#[test]
fn test_year_month_has_two_properties() {
    let ym: Temporal = YearMonth::new(2010, 2).unwrap().into();
    let names: Vec<&str> = properties(&ym).iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["year", "monthOfYear"]);
}

#[test]
fn test_properties_keyed_by_field_name() {
    let dt = date_time((2010, 6, 30), (18, 45, 0, 0));
    let views = properties(&dt);
    assert_eq!(views.len(), 20);
    assert_eq!(views.get("hourOfDay").unwrap().value().unwrap(), 18);
    assert_eq!(views.get("day-of-month").unwrap().max_value().unwrap(), 30);
    let later = views.get("minuteOfHour").unwrap().with_value(50).unwrap();
    assert_eq!(property(&later, DateTimeField::MinuteOfHour).unwrap().value().unwrap(), 50);
    assert!(views.get("zone").is_none());

    let p: Temporal = Partial::from_fields([(DateTimeField::Year, 2010)]).unwrap().into();
    let generic = properties(&p);
    assert_eq!(generic.names().collect::<Vec<_>>(), vec!["year"]);
    assert!(generic.get("monthOfYear").is_none());
}

#[test]
fn test_spans_have_no_date_time_fields() {
    let s: Temporal = FieldSpan::days(1).into();
    assert!(matches!(property(&s, DateTimeField::DayOfMonth), Err(Error::FieldUnsupported { .. })));
}

// =============================================================================
// Map Interchange
// =============================================================================

#[test]
fn test_as_map_of_period_lists_its_fields() {
    let p = period(&[(DurationField::Years, 5), (DurationField::Months, 6)]);
    let m = as_map(&p).unwrap();
    assert_eq!(m.len(), 2);
    assert_eq!(m.get("years"), Some(&Value::Int(5)));
    assert_eq!(m.get("months"), Some(&Value::Int(6)));
}

#[test]
fn test_as_map_of_date_time_carries_zone() {
    let dt: Temporal = DateTime::new(0, Zone::for_id("+05:30").unwrap()).into();
    let m = as_map(&dt).unwrap();
    assert_eq!(m.get("zone"), Some(&Value::from("+05:30")));
    assert_eq!(from_map(EntityKind::DateTime, &m).unwrap(), dt);
}

#[test]
fn test_round_trip_every_kind() {
    let values: Vec<Temporal> = vec![
        at(1_262_304_000_000),
        date_time((1999, 12, 31), (23, 59, 59, 999)),
        YearMonth::new(2010, 11).unwrap().into(),
        FieldSpan::minutes(-7).into(),
        period(&[(DurationField::Weeks, 1), (DurationField::Millis, 250)]),
        tempora::Duration::from_millis(42).into(),
        date_interval(date(2010, 1, 1), date(2010, 2, 1)),
    ];
    for value in values {
        let m = as_map(&value).unwrap();
        assert_eq!(from_map(value.kind(), &m).unwrap(), value, "{}", value);
    }
}

#[test]
fn test_from_map_rejects_foreign_keys() {
    let m = FieldMap::new().with("hourOfDay", 3);
    assert!(from_map(EntityKind::YearMonth, &m).is_err());
}
