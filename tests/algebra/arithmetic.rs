//! Arithmetic Protocol Tests
//!
//! `plus`/`minus` by base category, `merge`, `negate`, `abs` and field
//! extraction.

use crate::common::*;
use tempora::{
    abs, as_map, days, days_in, hours, merge, minus, minutes_in, months, months_in, negate, plus,
    weeks, years, years_in, DateTime, Duration,
};

// =============================================================================
// Points
// =============================================================================

#[test]
fn test_month_end_clamps() {
    let month: [Operand; 1] = [FieldSpan::months(1).into()];
    assert_eq!(plus(&date(2011, 1, 31), &month).unwrap(), date(2011, 2, 28));
    assert_eq!(plus(&date(2012, 1, 31), &month).unwrap(), date(2012, 2, 29));
}

#[test]
fn test_operands_apply_in_order() {
    // clamping makes the order observable
    let d = date(2011, 1, 30);
    let (month, day): (Operand, Operand) = (FieldSpan::months(1).into(), FieldSpan::days(1).into());
    let month_then_day = plus(&d, &[month.clone(), day.clone()]).unwrap();
    let day_then_month = plus(&d, &[day.clone(), month.clone()]).unwrap();
    assert_eq!(month_then_day, date(2011, 3, 1));
    assert_eq!(day_then_month, date(2011, 2, 28));
    let back = minus(&date(2011, 3, 31), &[month, day]).unwrap();
    assert_eq!(back, date(2011, 2, 27));
}

#[test]
fn test_instant_plus_period() {
    let p = Period::new(&[(DurationField::Days, 1), (DurationField::Hours, 2)]).unwrap();
    assert_eq!(plus(&at(0), &[p.into()]).unwrap(), at(26 * 3_600_000));
}

#[test]
fn test_date_time_keeps_zone() {
    let zone = Zone::for_id("+09:00").unwrap();
    let dt: Temporal = DateTime::new(0, zone).into();
    match plus(&dt, &[FieldSpan::years(1).into()]).unwrap() {
        Temporal::DateTime(out) => {
            assert_eq!(out.zone(), zone);
            assert_eq!(out.millis(), 365 * 86_400_000);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_local_date_takes_whole_days_of_duration() {
    let d = date(2010, 1, 1);
    let out = plus(&d, &[Duration::from_millis(2 * 86_400_000 + 5).into()]).unwrap();
    assert_eq!(out, date(2010, 1, 3));
}

#[test]
fn test_local_date_ignores_time_spans() {
    let d = date(2010, 1, 1);
    assert_eq!(plus(&d, &[FieldSpan::hours(30).into()]).unwrap(), d);
}

#[test]
fn test_local_time_wraps_midnight() {
    let t = time(23, 30, 0, 0);
    assert_eq!(plus(&t, &[FieldSpan::minutes(45).into()]).unwrap(), time(0, 15, 0, 0));
    assert_eq!(minus(&time(0, 0, 0, 0), &[1i64.into()]).unwrap(), time(23, 59, 59, 999));
}

#[test]
fn test_month_day_rejects_duration() {
    let md: Temporal = MonthDay::new(2, 29).unwrap().into();
    assert!(matches!(
        plus(&md, &[Duration::from_millis(1).into()]),
        Err(Error::UnsupportedOperation { .. })
    ));
}

#[test]
fn test_month_day_leap_cycle() {
    let md: Temporal = MonthDay::new(2, 28).unwrap().into();
    assert_eq!(
        plus(&md, &[FieldSpan::days(1).into()]).unwrap(),
        MonthDay::new(2, 29).unwrap().into()
    );
}

#[test]
fn test_generic_partial_carries_like_concrete_kinds() {
    let month: [Operand; 1] = [FieldSpan::months(1).into()];
    let ym = partial(&[(DateTimeField::Year, 2010), (DateTimeField::MonthOfYear, 12)]);
    let generic = plus(&ym, &month).unwrap();
    let concrete = plus(&YearMonth::new(2010, 12).unwrap().into(), &month).unwrap();
    assert_eq!(generic.kind(), EntityKind::Partial);
    assert_eq!(as_map(&generic).unwrap(), as_map(&concrete).unwrap());

    let day: [Operand; 1] = [FieldSpan::days(1).into()];
    let md = partial(&[(DateTimeField::MonthOfYear, 1), (DateTimeField::DayOfMonth, 31)]);
    let generic = plus(&md, &day).unwrap();
    let concrete = plus(&MonthDay::new(1, 31).unwrap().into(), &day).unwrap();
    assert_eq!(as_map(&generic).unwrap(), as_map(&concrete).unwrap());
    let expected = FieldMap::new().with("monthOfYear", 2).with("dayOfMonth", 1);
    assert_eq!(as_map(&concrete).unwrap(), expected);
}

#[test]
fn test_generic_partial_minus_borrows_from_year() {
    let ym = partial(&[(DateTimeField::Year, 2011), (DateTimeField::MonthOfYear, 1)]);
    let back = minus(&ym, &[FieldSpan::months(1).into()]).unwrap();
    let expected = FieldMap::new().with("year", 2010).with("monthOfYear", 12);
    assert_eq!(as_map(&back).unwrap(), expected);
}

#[test]
fn test_point_rejects_interval_operand() {
    assert!(matches!(
        plus(&at(0), &[interval(0, 1).into()]),
        Err(Error::UnsupportedOperation { .. })
    ));
}

// =============================================================================
// Spans and Durations
// =============================================================================

#[test]
fn test_span_integer_is_same_unit() {
    let s: Temporal = FieldSpan::days(3).into();
    assert_eq!(plus(&s, &[4i64.into()]).unwrap(), FieldSpan::days(7).into());
    assert_eq!(minus(&s, &[5i64.into()]).unwrap(), FieldSpan::days(-2).into());
}

#[test]
fn test_span_union_of_fields() {
    let s: Temporal = FieldSpan::days(3).into();
    let out = as_period(&plus(&s, &[FieldSpan::hours(5).into()]).unwrap());
    assert_eq!(out.fields().as_slice(), &[DurationField::Days, DurationField::Hours]);
    assert_eq!(out.get(DurationField::Hours).unwrap(), 5);
}

#[test]
fn test_multi_field_period_rejects_integer() {
    let p = period(&[(DurationField::Days, 1), (DurationField::Hours, 1)]);
    assert!(matches!(plus(&p, &[1i64.into()]), Err(Error::UnsupportedOperation { .. })));
}

#[test]
fn test_span_overflow() {
    let s: Temporal = FieldSpan::days(i32::MAX).into();
    assert!(matches!(plus(&s, &[1i64.into()]), Err(Error::ArithmeticOverflow(_))));
}

#[test]
fn test_duration_sums() {
    let d: Temporal = Duration::from_millis(1_000).into();
    let out = plus(&d, &[Duration::from_millis(500).into(), 250i64.into()]).unwrap();
    assert_eq!(out, Duration::from_millis(1_750).into());
    assert!(plus(&d, &[FieldSpan::days(1).into()]).is_err());
}

// =============================================================================
// Merge
// =============================================================================

#[test]
fn test_merge_single_unit_spans_stays_span() {
    let out = merge(&[FieldSpan::days(1).into(), FieldSpan::days(4).into()]).unwrap();
    assert_eq!(out, FieldSpan::days(4).into());
}

#[test]
fn test_merge_time_parts_into_local_time() {
    let hours = partial(&[(DateTimeField::HourOfDay, 10), (DateTimeField::MinuteOfHour, 5)]);
    let seconds =
        partial(&[(DateTimeField::SecondOfMinute, 30), (DateTimeField::MillisOfSecond, 0)]);
    let out = merge(&[hours, seconds]).unwrap();
    assert_eq!(out, time(10, 5, 30, 0));
}

#[test]
fn test_merge_date_and_time() {
    let out = merge(&[date(2010, 6, 1), time(12, 0, 0, 0)]).unwrap();
    assert_eq!(out.kind(), EntityKind::LocalDateTime);
}

#[test]
fn test_merge_partial_union_not_concrete() {
    let out = merge(&[YearMonth::new(2010, 6).unwrap().into(), time(12, 0, 0, 0)]).unwrap();
    assert_eq!(out.kind(), EntityKind::Partial);
}

#[test]
fn test_merge_rejects_mixed_categories() {
    assert!(matches!(
        merge(&[FieldSpan::days(1).into(), date(2010, 1, 1)]),
        Err(Error::IncompatibleMergeOperands { .. })
    ));
    assert!(matches!(merge(&[at(0), at(1)]), Err(Error::UnsupportedOperation { .. })));
}

// =============================================================================
// Negate and Abs
// =============================================================================

#[test]
fn test_negate_period() {
    let p = period(&[(DurationField::Years, 2), (DurationField::Months, -1)]);
    let n = as_period(&negate(&p).unwrap());
    assert_eq!(n.get(DurationField::Years).unwrap(), -2);
    assert_eq!(n.get(DurationField::Months).unwrap(), 1);
}

#[test]
fn test_negate_min_value_overflows() {
    assert!(matches!(
        negate(&FieldSpan::days(i32::MIN).into()),
        Err(Error::ArithmeticOverflow(_))
    ));
}

#[test]
fn test_abs_multi_field_unsupported() {
    let p = period(&[(DurationField::Years, 2), (DurationField::Months, -1)]);
    assert!(matches!(abs(&p), Err(Error::UnsupportedOperation { .. })));
    assert_eq!(
        abs(&Duration::from_millis(-9).into()).unwrap(),
        Duration::from_millis(9).into()
    );
}

#[test]
fn test_negate_points_unsupported() {
    assert!(matches!(negate(&date(2010, 1, 1)), Err(Error::UnsupportedOperation { .. })));
}

// =============================================================================
// Extraction
// =============================================================================

#[test]
fn test_span_extraction() {
    let p = period(&[(DurationField::Years, 3), (DurationField::Weeks, 2)]);
    assert_eq!(years(&p).unwrap(), 3);
    assert_eq!(weeks(&p).unwrap(), 2);
    assert!(matches!(days(&p), Err(Error::FieldNotInPeriodType { .. })));
}

#[test]
fn test_duration_extraction() {
    let d: Temporal = Duration::from_millis(90 * 60_000).into();
    assert_eq!(hours(&d).unwrap(), 1);
    assert!(matches!(months(&d), Err(Error::ImpreciseConversion { .. })));
}

#[test]
fn test_interval_counts_truncate() {
    let i = interval(0, 3_599_999);
    assert_eq!(hours(&i).unwrap(), 0);
    assert_eq!(minutes_in(&at(0), &at(3_599_999)).unwrap(), 59);
}

#[test]
fn test_calendar_counts_between_partials() {
    assert_eq!(months_in(&date(2010, 1, 31), &date(2010, 2, 27)).unwrap(), 0);
    assert_eq!(months_in(&date(2010, 1, 31), &date(2010, 2, 28)).unwrap(), 1);
    assert_eq!(months_in(&date(2010, 1, 31), &date(2010, 3, 31)).unwrap(), 2);
    assert_eq!(years_in(&date(2000, 2, 29), &date(2004, 2, 29)).unwrap(), 4);
    assert_eq!(days_in(&date(2010, 1, 1), &date(2011, 1, 1)).unwrap(), 365);
}

#[test]
fn test_count_in_mixed_kinds() {
    assert!(days_in(&at(0), &date(2010, 1, 1)).is_err());
    assert!(matches!(
        days_in(&date(2010, 1, 1), &time(1, 0, 0, 0)),
        Err(Error::IncompatiblePartialKinds { .. })
    ));
}
