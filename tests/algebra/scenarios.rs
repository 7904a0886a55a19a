//! Worked Scenarios
//!
//! Each test is one documented example, built from the public entry points
//! a caller would use.

use crate::common::*;
use tempora::{abs, construct_required, merge, minutes_in, move_start_to, plus, span};

#[test]
fn test_period_from_map_has_listed_fields() {
    let p =
        construct_required(EntityKind::Period, &fields(&[("years", 5), ("months", 6)])).unwrap();
    let p = as_period(&p);
    assert_eq!(p.fields().as_slice(), &[DurationField::Years, DurationField::Months]);
}

#[test]
fn test_eleven_years_after_2010() {
    let start = construct_required(
        EntityKind::LocalDate,
        &fields(&[("year", 2010), ("monthOfYear", 1), ("dayOfMonth", 1)]),
    )
    .unwrap();
    let out = plus(&start, &[span(11, DurationField::Years).unwrap().into()]).unwrap();
    assert_eq!(out, date(2021, 1, 1));
}

#[test]
fn test_minutes_in_one_hour() {
    let t0 = at(0);
    let t1 = at(3_600_000);
    assert_eq!(minutes_in(&t0, &t1).unwrap(), 60);
}

#[test]
fn test_move_start_to_midpoint() {
    let map = fields(&[("start", 0), ("end", 10_000)]);
    let i = construct_required(EntityKind::Interval, &map).unwrap();
    let moved = move_start_to(&i, &at(5_000)).unwrap();
    assert_eq!(moved, interval(5_000, 10_000));
}

#[test]
fn test_merge_period_with_spans() {
    let base =
        construct_required(EntityKind::Period, &fields(&[("years", 10), ("months", 6)])).unwrap();
    let out = merge(&[
        base,
        span(20, DurationField::Years).unwrap(),
        span(10, DurationField::Days).unwrap(),
    ])
    .unwrap();
    let p = as_period(&out);
    assert_eq!(
        p.fields().as_slice(),
        &[DurationField::Years, DurationField::Months, DurationField::Days]
    );
    assert_eq!(p.get(DurationField::Years).unwrap(), 20);
    assert_eq!(p.get(DurationField::Months).unwrap(), 6);
    assert_eq!(p.get(DurationField::Days).unwrap(), 10);
}

#[test]
fn test_abs_of_negative_days() {
    let s = span(-20, DurationField::Days).unwrap();
    assert_eq!(abs(&s).unwrap(), span(20, DurationField::Days).unwrap());
}
