//! Algebraic Laws
//!
//! Property-based checks of the identities every kind must satisfy.

use crate::common::*;
use proptest::prelude::*;
use tempora::{
    abuts, as_map, contains, from_map, merge, minus, negate, overlaps, plus, DateTime, Duration,
};

// =============================================================================
// Strategies
// =============================================================================

/// Epoch millis within a few centuries of 1970
fn millis() -> impl Strategy<Value = i64> {
    -5_000_000_000_000i64..5_000_000_000_000i64
}

fn local_date() -> impl Strategy<Value = Temporal> {
    (1_000i32..=9_999, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
        let d = d.min(days_in_month(y, m));
        date(y, m, d)
    })
}

/// Epoch millis spanning the era boundary
fn wide_millis() -> impl Strategy<Value = i64> {
    prop_oneof![
        -100_000_000_000_000i64..100_000_000_000_000i64,
        // 0000-01-01T00:00:00Z and the millisecond before it
        Just(-62_167_219_200_000i64),
        Just(-62_167_219_200_001i64),
    ]
}

/// Proleptic years around the era boundary, year zero included
fn wide_year() -> impl Strategy<Value = i32> {
    prop_oneof![Just(0i32), Just(-1i32), Just(1i32), Just(-100i32), Just(100i32), -2_999i32..=2_999]
}

fn wide_ymd() -> impl Strategy<Value = (i32, u32, u32)> {
    (wide_year(), 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| (y, m, d.min(days_in_month(y, m))))
}

fn wide_local_date() -> impl Strategy<Value = Temporal> {
    wide_ymd().prop_map(|(y, m, d)| date(y, m, d))
}

fn local_date_time() -> impl Strategy<Value = Temporal> {
    (wide_ymd(), 0u32..24, 0u32..60, 0u32..60, 0u32..1_000)
        .prop_map(|(ymd, h, mi, s, ms)| date_time(ymd, (h, mi, s, ms)))
}

fn year_month() -> impl Strategy<Value = Temporal> {
    (wide_year(), 1u32..=12).prop_map(|(y, m)| YearMonth::new(y, m).unwrap().into())
}

fn month_day() -> impl Strategy<Value = Temporal> {
    (1u32..=12, 1u32..=31)
        .prop_map(|(m, d)| MonthDay::new(m, d.min(days_in_month(2000, m))).unwrap().into())
}

fn wide_interval() -> impl Strategy<Value = Temporal> {
    (wide_millis(), wide_millis(), zone())
        .prop_map(|(a, b, z)| Interval::new(a.min(b), a.max(b), z).unwrap().into())
}

fn date_range() -> impl Strategy<Value = Temporal> {
    (wide_ymd(), wide_ymd()).prop_map(|(a, b)| {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        date_interval(date(lo.0, lo.1, lo.2), date(hi.0, hi.1, hi.2))
    })
}

fn local_time() -> impl Strategy<Value = Temporal> {
    (0u32..24, 0u32..60, 0u32..60, 0u32..1_000).prop_map(|(h, m, s, ms)| time(h, m, s, ms))
}

fn zone() -> impl Strategy<Value = Zone> {
    (-18i32 * 4..=18 * 4).prop_map(|quarters| Zone::from_offset_seconds(quarters * 900).unwrap())
}

fn period_value() -> impl Strategy<Value = Period> {
    (0u8..=255, prop::array::uniform8(-10_000i32..10_000)).prop_map(|(mask, values)| {
        let pairs: Vec<(DurationField, i32)> = DurationField::ALL
            .iter()
            .zip(values)
            .enumerate()
            .filter(|(i, _)| mask & (1 << *i) != 0)
            .map(|(_, (field, value))| (*field, value))
            .collect();
        Period::new(&pairs).unwrap()
    })
}

fn generic_partial() -> impl Strategy<Value = Temporal> {
    let field = prop_oneof![
        (1i64..=2_999).prop_map(|v| (DateTimeField::Year, v)),
        (1i64..=12).prop_map(|v| (DateTimeField::MonthOfYear, v)),
        (1i64..=28).prop_map(|v| (DateTimeField::DayOfMonth, v)),
        (0i64..24).prop_map(|v| (DateTimeField::HourOfDay, v)),
        (0i64..60).prop_map(|v| (DateTimeField::MinuteOfHour, v)),
    ];
    prop::collection::vec(field, 0..5).prop_map(|pairs| {
        let mut unique: Vec<(DateTimeField, i64)> = Vec::new();
        for (f, v) in pairs {
            if !unique.iter().any(|(g, _)| *g == f) {
                unique.push((f, v));
            }
        }
        Partial::from_fields(unique).unwrap().into()
    })
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn interval_pair() -> impl Strategy<Value = (Temporal, Temporal)> {
    (0i64..1_000, 0i64..1_000, 0i64..1_000, 0i64..1_000).prop_map(|(a, b, c, d)| {
        (interval(a.min(b), a.max(b)), interval(c.min(d), c.max(d)))
    })
}

// =============================================================================
// Map Interchange
// =============================================================================

proptest! {
    #[test]
    fn prop_map_round_trip_dates(d in local_date()) {
        let m = as_map(&d).unwrap();
        prop_assert_eq!(from_map(EntityKind::LocalDate, &m).unwrap(), d);
    }

    #[test]
    fn prop_map_round_trip_times(t in local_time()) {
        let m = as_map(&t).unwrap();
        prop_assert_eq!(from_map(EntityKind::LocalTime, &m).unwrap(), t);
    }

    #[test]
    fn prop_map_round_trip_date_times(ms in millis(), z in zone()) {
        let dt: Temporal = DateTime::new(ms, z).into();
        let m = as_map(&dt).unwrap();
        prop_assert_eq!(from_map(EntityKind::DateTime, &m).unwrap(), dt);
    }

    #[test]
    fn prop_map_round_trip_dates_across_eras(d in wide_local_date()) {
        let m = as_map(&d).unwrap();
        prop_assert_eq!(from_map(EntityKind::LocalDate, &m).unwrap(), d);
    }

    #[test]
    fn prop_map_round_trip_local_date_times(dt in local_date_time()) {
        let m = as_map(&dt).unwrap();
        prop_assert_eq!(from_map(EntityKind::LocalDateTime, &m).unwrap(), dt);
    }

    #[test]
    fn prop_map_round_trip_instants(ms in wide_millis()) {
        let instant: Temporal = Instant::from_millis(ms).into();
        let m = as_map(&instant).unwrap();
        prop_assert_eq!(from_map(EntityKind::Instant, &m).unwrap(), instant);
    }

    #[test]
    fn prop_map_round_trip_year_months(ym in year_month()) {
        let m = as_map(&ym).unwrap();
        prop_assert_eq!(from_map(EntityKind::YearMonth, &m).unwrap(), ym);
    }

    #[test]
    fn prop_map_round_trip_month_days(md in month_day()) {
        let m = as_map(&md).unwrap();
        prop_assert_eq!(from_map(EntityKind::MonthDay, &m).unwrap(), md);
    }

    #[test]
    fn prop_map_round_trip_intervals(i in wide_interval()) {
        let m = as_map(&i).unwrap();
        prop_assert_eq!(from_map(EntityKind::Interval, &m).unwrap(), i);
    }

    #[test]
    fn prop_map_round_trip_partial_intervals(i in date_range()) {
        let m = as_map(&i).unwrap();
        prop_assert_eq!(from_map(EntityKind::PartialInterval, &m).unwrap(), i);
    }

    #[test]
    fn prop_map_round_trip_periods(p in period_value()) {
        let value: Temporal = p.into();
        let m = as_map(&value).unwrap();
        prop_assert_eq!(from_map(EntityKind::Period, &m).unwrap(), value);
    }

    #[test]
    fn prop_map_round_trip_generic_partials(p in generic_partial()) {
        let m = as_map(&p).unwrap();
        prop_assert_eq!(from_map(EntityKind::Partial, &m).unwrap(), p);
    }
}

// =============================================================================
// Interval Relations
// =============================================================================

proptest! {
    #[test]
    fn prop_half_open(start in millis(), len in 1i64..1_000_000) {
        let i = interval(start, start + len);
        prop_assert!(contains(&i, &at(start)).unwrap());
        prop_assert!(!contains(&i, &at(start + len)).unwrap());
    }

    #[test]
    fn prop_relations_symmetric((a, b) in interval_pair()) {
        prop_assert_eq!(overlaps(&a, &b).unwrap(), overlaps(&b, &a).unwrap());
        prop_assert_eq!(abuts(&a, &b).unwrap(), abuts(&b, &a).unwrap());
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

proptest! {
    #[test]
    fn prop_instant_plus_minus(ms in millis(), delta in -1_000_000_000i64..1_000_000_000) {
        let base = at(ms);
        let ops = [Operand::from(Duration::from_millis(delta))];
        let there = plus(&base, &ops).unwrap();
        prop_assert_eq!(minus(&there, &ops).unwrap(), base);
    }

    #[test]
    fn prop_date_time_plus_minus_time_span(
        ms in millis(),
        z in zone(),
        hours in -10_000i32..10_000,
    ) {
        let base: Temporal = DateTime::new(ms, z).into();
        let ops = [Operand::from(FieldSpan::hours(hours))];
        let there = plus(&base, &ops).unwrap();
        prop_assert_eq!(minus(&there, &ops).unwrap(), base);
    }

    #[test]
    fn prop_local_time_plus_minus(t in local_time(), minutes in -100_000i32..100_000) {
        let ops = [Operand::from(FieldSpan::minutes(minutes))];
        let there = plus(&t, &ops).unwrap();
        prop_assert_eq!(minus(&there, &ops).unwrap(), t);
    }

    #[test]
    fn prop_date_plus_minus_months(
        (y, m, d) in (1_000i32..=8_000, 1u32..=12, 1u32..=28),
        months in -1_000i32..1_000,
        days in -10_000i32..10_000,
    ) {
        let base = date(y, m, d);
        for op in [Operand::from(FieldSpan::months(months)), Operand::from(FieldSpan::days(days))] {
            let ops = [op];
            let there = plus(&base, &ops).unwrap();
            prop_assert_eq!(minus(&there, &ops).unwrap(), base.clone());
        }
    }

    #[test]
    fn prop_merge_union_later_wins(a in period_value(), b in period_value()) {
        let merged = merge(&[a.into(), b.into()]).unwrap();
        let p = as_period(&merged);
        prop_assert_eq!(p.period_type(), a.period_type().union(b.period_type()));
        for (field, value) in p.iter() {
            let expected = b.get(field).or_else(|_| a.get(field)).unwrap();
            prop_assert_eq!(value, expected);
        }
    }

    #[test]
    fn prop_negate_involution(p in period_value(), ms in millis()) {
        let period: Temporal = p.into();
        prop_assert_eq!(negate(&negate(&period).unwrap()).unwrap(), period);
        let duration: Temporal = Duration::from_millis(ms).into();
        prop_assert_eq!(negate(&negate(&duration).unwrap()).unwrap(), duration);
    }
}
