//! Interval Relation Tests
//!
//! Absolute intervals are half-open `[start, end)`; partial intervals use
//! the same rules over their kind's natural order.

use crate::common::*;
use tempora::{
    abuts, construct, contains, duration_of, gap, is_after, is_before, move_end_by, move_end_to,
    move_start_by, move_start_to, overlap, overlaps, Duration, IntervalOrder,
};

// =============================================================================
// Containment
// =============================================================================

#[test]
fn test_contains_interval_is_closed() {
    let outer = interval(0, 100);
    assert!(contains(&outer, &interval(0, 100)).unwrap());
    assert!(contains(&outer, &interval(10, 20)).unwrap());
    assert!(!contains(&outer, &interval(50, 101)).unwrap());
}

#[test]
fn test_empty_interval_contains_nothing() {
    let empty = interval(10, 10);
    assert!(!contains(&empty, &at(10)).unwrap());
    assert!(contains(&empty, &interval(10, 10)).unwrap());
}

#[test]
fn test_contains_zoned_point() {
    let i = interval(0, 1_000);
    let dt: Temporal = tempora::DateTime::new(500, Zone::for_id("+01:00").unwrap()).into();
    assert!(contains(&i, &dt).unwrap());
    assert!(matches!(contains(&i, &date(1970, 1, 1)), Err(Error::UnsupportedOperation { .. })));
}

// =============================================================================
// Overlap, Abut, Gap
// =============================================================================

#[test]
fn test_adjacent_intervals_abut_without_overlap() {
    let (a, b) = (interval(0, 10), interval(10, 20));
    assert!(abuts(&a, &b).unwrap());
    assert!(!overlaps(&a, &b).unwrap());
    assert_eq!(overlap(&a, &b).unwrap(), None);
    assert_eq!(gap(&a, &b).unwrap(), None);
}

#[test]
fn test_overlap_interval() {
    let out = overlap(&interval(0, 10), &interval(5, 20)).unwrap().unwrap();
    let i = as_interval(&out);
    assert_eq!((i.start_millis(), i.end_millis()), (5, 10));
}

#[test]
fn test_gap_is_order_independent() {
    let (a, b) = (interval(0, 10), interval(30, 40));
    assert_eq!(gap(&a, &b).unwrap(), Some(interval(10, 30)));
    assert_eq!(gap(&b, &a).unwrap(), Some(interval(10, 30)));
}

#[test]
fn test_mixed_interval_kinds() {
    let d = date_interval(date(2010, 1, 1), date(2010, 2, 1));
    assert!(matches!(
        overlaps(&interval(0, 1), &d),
        Err(Error::IncompatiblePartialKinds { .. })
    ));
    assert!(matches!(abuts(&at(0), &at(1)), Err(Error::UnsupportedOperation { .. })));
}

#[test]
fn test_extreme_interval_length_overflows() {
    let wide: Temporal = Interval::new(i64::MIN, 0, Zone::UTC).unwrap().into();
    assert!(matches!(duration_of(&wide), Err(Error::ArithmeticOverflow(_))));
    assert!(construct(EntityKind::Duration, &Value::Temporal(wide)).is_err());
    assert_eq!(
        duration_of(&interval(i64::MIN + 1, 0)).unwrap(),
        Duration::from_millis(i64::MAX)
    );
}

// =============================================================================
// Partial Intervals
// =============================================================================

#[test]
fn test_time_of_day_intervals() {
    let morning = date_interval(time(9, 0, 0, 0), time(12, 0, 0, 0));
    let lunch = date_interval(time(12, 0, 0, 0), time(13, 0, 0, 0));
    assert!(abuts(&morning, &lunch).unwrap());
    assert!(contains(&morning, &time(11, 59, 59, 999)).unwrap());
    assert!(!contains(&morning, &time(12, 0, 0, 0)).unwrap());
    assert_eq!(duration_of(&morning).unwrap(), Duration::from_millis(3 * 3_600_000));
}

#[test]
fn test_year_month_interval_overlap() {
    let ym = |y, m| -> Temporal { YearMonth::new(y, m).unwrap().into() };
    let a = date_interval(ym(2010, 1), ym(2010, 6));
    let b = date_interval(ym(2010, 4), ym(2011, 1));
    let shared = overlap(&a, &b).unwrap().unwrap();
    assert_eq!(shared, date_interval(ym(2010, 4), ym(2010, 6)));
}

#[test]
fn test_generic_partials_need_same_fields() {
    let p = |pairs: &[(DateTimeField, i64)]| -> Temporal {
        Partial::from_fields(pairs.iter().copied()).unwrap().into()
    };
    let a = date_interval(
        p(&[(DateTimeField::HourOfDay, 1)]),
        p(&[(DateTimeField::HourOfDay, 5)]),
    );
    let b = date_interval(
        p(&[(DateTimeField::MonthOfYear, 1)]),
        p(&[(DateTimeField::MonthOfYear, 5)]),
    );
    assert!(matches!(overlaps(&a, &b), Err(Error::IncompatiblePartialKinds { .. })));
    assert!(overlaps(&a, &a).unwrap());
}

#[test]
fn test_reversed_partial_interval() {
    assert!(matches!(
        PartialInterval::new(date(2010, 2, 1), date(2010, 1, 1)),
        Err(Error::InvalidInterval(_))
    ));
    let swapped =
        PartialInterval::with_order(date(2010, 2, 1), date(2010, 1, 1), IntervalOrder::Normalize)
            .unwrap();
    assert_eq!(swapped.start(), &date(2010, 1, 1));
}

// =============================================================================
// Moves
// =============================================================================

#[test]
fn test_move_end_before_start_fails() {
    assert!(matches!(
        move_end_to(&interval(100, 200), &at(50)),
        Err(Error::InvalidInterval(_))
    ));
}

#[test]
fn test_move_by_span_and_millis() {
    let i = interval(0, 86_400_000);
    let later = move_end_by(&i, &FieldSpan::days(1).into()).unwrap();
    assert_eq!(as_interval(&later).end_millis(), 2 * 86_400_000);
    let shrunk = move_start_by(&i, &Operand::Int(1_000)).unwrap();
    assert_eq!(as_interval(&shrunk).start_millis(), 1_000);
}

#[test]
fn test_move_partial_interval() {
    let i = date_interval(date(2010, 1, 1), date(2010, 12, 31));
    let moved = move_start_to(&i, &date(2010, 6, 1)).unwrap();
    assert_eq!(moved, date_interval(date(2010, 6, 1), date(2010, 12, 31)));
    let extended = move_end_by(&i, &FieldSpan::months(1).into()).unwrap();
    assert_eq!(extended, date_interval(date(2010, 1, 1), date(2011, 1, 31)));
    assert!(matches!(
        move_start_to(&i, &time(1, 0, 0, 0)),
        Err(Error::IncompatiblePartialKinds { .. })
    ));
}

// =============================================================================
// Before / After
// =============================================================================

#[test]
fn test_before_and_after_points() {
    let i = interval(10, 20);
    assert!(is_before(&i, &at(20)).unwrap());
    assert!(!is_before(&i, &at(19)).unwrap());
    assert!(is_after(&i, &at(9)).unwrap());
    assert!(!is_after(&i, &at(10)).unwrap());
}

#[test]
fn test_before_and_after_intervals() {
    let (a, b) = (interval(0, 10), interval(10, 20));
    assert!(is_before(&a, &b).unwrap());
    assert!(is_after(&b, &a).unwrap());
    assert!(!is_after(&a, &b).unwrap());
}
