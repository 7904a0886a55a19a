//! Interval relations
//!
//! Containment, overlap, abutment, gap and endpoint moves over both
//! [`Interval`] and [`PartialInterval`]. The two share one implementation
//! through the [`Timeline`] trait; the public functions take [`Temporal`]
//! operands and pick the instance once per call.
//!
//! Intervals are half-open: a point equal to the end is outside. An
//! interval contains another when it covers it as a closed range, so every
//! interval contains itself.

use crate::arithmetic::{self, Operand};
use std::cmp::Ordering;
use tempora_core::{Category, Error, Result};
use tempora_engine::calendar::millis_from_naive;
use tempora_engine::{
    compare_partials, Duration, Interval, IntervalOrder, PartialInterval, Temporal,
};

/// Ordered start/end pair over some point type
pub trait Timeline: Sized {
    /// Endpoint type
    type Point: Clone;

    /// Start point
    fn start_point(&self) -> Self::Point;

    /// End point
    fn end_point(&self) -> Self::Point;

    /// Order two points of this timeline
    fn compare(a: &Self::Point, b: &Self::Point) -> Result<Ordering>;

    /// Interval over new endpoints, rejecting reversed ones
    fn rebuild(&self, start: Self::Point, end: Self::Point) -> Result<Self>;
}

impl Timeline for Interval {
    type Point = i64;

    fn start_point(&self) -> i64 {
        self.start_millis()
    }

    fn end_point(&self) -> i64 {
        self.end_millis()
    }

    fn compare(a: &i64, b: &i64) -> Result<Ordering> {
        Ok(a.cmp(b))
    }

    fn rebuild(&self, start: i64, end: i64) -> Result<Self> {
        Interval::with_order(start, end, self.zone(), IntervalOrder::Reject)
    }
}

impl Timeline for PartialInterval {
    type Point = Temporal;

    fn start_point(&self) -> Temporal {
        self.start().clone()
    }

    fn end_point(&self) -> Temporal {
        self.end().clone()
    }

    fn compare(a: &Temporal, b: &Temporal) -> Result<Ordering> {
        compare_partials(a, b)
    }

    fn rebuild(&self, start: Temporal, end: Temporal) -> Result<Self> {
        PartialInterval::with_order(start, end, IntervalOrder::Reject)
    }
}

fn lt<T: Timeline>(a: &T::Point, b: &T::Point) -> Result<bool> {
    Ok(T::compare(a, b)? == Ordering::Less)
}

fn le<T: Timeline>(a: &T::Point, b: &T::Point) -> Result<bool> {
    Ok(T::compare(a, b)? != Ordering::Greater)
}

fn contains_point<T: Timeline>(i: &T, p: &T::Point) -> Result<bool> {
    Ok(le::<T>(&i.start_point(), p)? && lt::<T>(p, &i.end_point())?)
}

fn contains_interval<T: Timeline>(a: &T, b: &T) -> Result<bool> {
    Ok(le::<T>(&a.start_point(), &b.start_point())? && le::<T>(&b.end_point(), &a.end_point())?)
}

fn overlaps_in<T: Timeline>(a: &T, b: &T) -> Result<bool> {
    Ok(lt::<T>(&a.start_point(), &b.end_point())? && lt::<T>(&b.start_point(), &a.end_point())?)
}

fn abuts_in<T: Timeline>(a: &T, b: &T) -> Result<bool> {
    let a_then_b = T::compare(&a.end_point(), &b.start_point())?.is_eq();
    let b_then_a = T::compare(&b.end_point(), &a.start_point())?.is_eq();
    Ok(a_then_b || b_then_a)
}

fn overlap_in<T: Timeline>(a: &T, b: &T) -> Result<Option<T>> {
    if !overlaps_in(a, b)? {
        return Ok(None);
    }
    let (a_start, b_start) = (a.start_point(), b.start_point());
    let (a_end, b_end) = (a.end_point(), b.end_point());
    let start = if lt::<T>(&a_start, &b_start)? { b_start } else { a_start };
    let end = if lt::<T>(&a_end, &b_end)? { a_end } else { b_end };
    a.rebuild(start, end).map(Some)
}

fn gap_in<T: Timeline>(a: &T, b: &T) -> Result<Option<T>> {
    let (a_end, b_start) = (a.end_point(), b.start_point());
    if lt::<T>(&a_end, &b_start)? {
        return a.rebuild(a_end, b_start).map(Some);
    }
    let (b_end, a_start) = (b.end_point(), a.start_point());
    if lt::<T>(&b_end, &a_start)? {
        return a.rebuild(b_end, a_start).map(Some);
    }
    Ok(None)
}

// ============================================================================
// Operand dispatch
// ============================================================================

enum Pair<'a> {
    Absolute(&'a Interval, &'a Interval),
    Partial(&'a PartialInterval, &'a PartialInterval),
}

fn pair<'a>(op: &str, a: &'a Temporal, b: &'a Temporal) -> Result<Pair<'a>> {
    match (a, b) {
        (Temporal::Interval(x), Temporal::Interval(y)) => Ok(Pair::Absolute(x, y)),
        (Temporal::PartialInterval(x), Temporal::PartialInterval(y)) => {
            Ok(Pair::Partial(&**x, &**y))
        }
        (Temporal::PartialInterval(x), Temporal::Interval(_))
        | (Temporal::Interval(_), Temporal::PartialInterval(x)) => {
            Err(Error::IncompatiblePartialKinds {
                left: x.endpoint_kind().name().to_string(),
                right: "Interval".to_string(),
            })
        }
        _ => Err(Error::unsupported(op, format!("{} and {}", a.kind(), b.kind()))),
    }
}

fn instant_point(op: &str, point: &Temporal) -> Result<i64> {
    point
        .instant_millis()
        .ok_or_else(|| Error::unsupported(op, format!("Interval and {}", point.kind())))
}

/// True if `other` lies inside `interval`
///
/// A point is inside when `start <= point < end`; an interval is inside
/// when both its endpoints are within `[start, end]`.
///
/// # Errors
///
/// - `IncompatiblePartialKinds` for a partial of another kind
/// - `UnsupportedOperation` when `interval` is not an interval
pub fn contains(interval: &Temporal, other: &Temporal) -> Result<bool> {
    match (interval, other) {
        (_, Temporal::Interval(_) | Temporal::PartialInterval(_)) => {
            match pair("contains", interval, other)? {
                Pair::Absolute(a, b) => contains_interval(a, b),
                Pair::Partial(a, b) => contains_interval(a, b),
            }
        }
        (Temporal::Interval(i), point) => contains_point(i, &instant_point("contains", point)?),
        (Temporal::PartialInterval(i), point) => contains_point(&**i, point),
        _ => Err(Error::unsupported("contains", interval.kind().name())),
    }
}

/// True if the intervals share some time
pub fn overlaps(a: &Temporal, b: &Temporal) -> Result<bool> {
    match pair("overlaps", a, b)? {
        Pair::Absolute(x, y) => overlaps_in(x, y),
        Pair::Partial(x, y) => overlaps_in(x, y),
    }
}

/// True if one interval ends where the other starts
pub fn abuts(a: &Temporal, b: &Temporal) -> Result<bool> {
    match pair("abuts", a, b)? {
        Pair::Absolute(x, y) => abuts_in(x, y),
        Pair::Partial(x, y) => abuts_in(x, y),
    }
}

/// Shared part of two intervals, `None` if they do not overlap
///
/// The result takes the first interval's zone.
pub fn overlap(a: &Temporal, b: &Temporal) -> Result<Option<Temporal>> {
    Ok(match pair("overlap", a, b)? {
        Pair::Absolute(x, y) => overlap_in(x, y)?.map(Temporal::from),
        Pair::Partial(x, y) => overlap_in(x, y)?.map(Temporal::from),
    })
}

/// Interval between two disjoint intervals, `None` if they overlap or abut
pub fn gap(a: &Temporal, b: &Temporal) -> Result<Option<Temporal>> {
    Ok(match pair("gap", a, b)? {
        Pair::Absolute(x, y) => gap_in(x, y)?.map(Temporal::from),
        Pair::Partial(x, y) => gap_in(x, y)?.map(Temporal::from),
    })
}

fn endpoint_of(interval: &Temporal, start: bool) -> Result<Temporal> {
    match interval {
        Temporal::Interval(i) => Ok(if start { i.start() } else { i.end() }.into()),
        Temporal::PartialInterval(i) => Ok(if start { i.start() } else { i.end() }.clone()),
        other => Err(Error::unsupported("move", other.kind().name())),
    }
}

fn move_endpoint(interval: &Temporal, point: &Temporal, start: bool) -> Result<Temporal> {
    Ok(match interval {
        Temporal::Interval(i) => {
            let millis = instant_point("move", point)?;
            if start {
                i.with_start_millis(millis)?.into()
            } else {
                i.with_end_millis(millis)?.into()
            }
        }
        Temporal::PartialInterval(i) => {
            if start {
                i.with_start(point.clone())?.into()
            } else {
                i.with_end(point.clone())?.into()
            }
        }
        other => return Err(Error::unsupported("move", other.kind().name())),
    })
}

/// Copy with the start moved to a point
///
/// # Errors
///
/// Returns `InvalidInterval` if the start would pass the end.
pub fn move_start_to(interval: &Temporal, point: &Temporal) -> Result<Temporal> {
    move_endpoint(interval, point, true)
}

/// Copy with the end moved to a point
pub fn move_end_to(interval: &Temporal, point: &Temporal) -> Result<Temporal> {
    move_endpoint(interval, point, false)
}

/// Copy with the start shifted by a span, duration or millis
pub fn move_start_by(interval: &Temporal, amount: &Operand) -> Result<Temporal> {
    let start = arithmetic::plus(&endpoint_of(interval, true)?, std::slice::from_ref(amount))?;
    move_endpoint(interval, &start, true)
}

/// Copy with the end shifted by a span, duration or millis
pub fn move_end_by(interval: &Temporal, amount: &Operand) -> Result<Temporal> {
    let end = arithmetic::plus(&endpoint_of(interval, false)?, std::slice::from_ref(amount))?;
    move_endpoint(interval, &end, false)
}

/// True if the interval ends at or before a point or another interval's start
pub fn is_before(interval: &Temporal, other: &Temporal) -> Result<bool> {
    let bound = match other.category() {
        Category::Interval => endpoint_of(other, true)?,
        _ => other.clone(),
    };
    match interval {
        Temporal::Interval(i) => Ok(i.end_millis() <= instant_point("is_before", &bound)?),
        Temporal::PartialInterval(i) => le::<PartialInterval>(i.end(), &bound),
        other => Err(Error::unsupported("is_before", other.kind().name())),
    }
}

/// True if the interval starts after a point, or at or after another
/// interval's end
pub fn is_after(interval: &Temporal, other: &Temporal) -> Result<bool> {
    let (bound, inclusive) = match other.category() {
        Category::Interval => (endpoint_of(other, false)?, true),
        _ => (other.clone(), false),
    };
    let ordering = match interval {
        Temporal::Interval(i) => i.start_millis().cmp(&instant_point("is_after", &bound)?),
        Temporal::PartialInterval(i) => compare_partials(i.start(), &bound)?,
        other => return Err(Error::unsupported("is_after", other.kind().name())),
    };
    Ok(ordering.is_gt() || (inclusive && ordering.is_eq()))
}

/// Exact length of an interval
///
/// Partial endpoints are measured on their reference timeline; the
/// generic partial has none.
pub fn duration_of(interval: &Temporal) -> Result<Duration> {
    match interval {
        Temporal::Interval(i) => i.duration(),
        Temporal::PartialInterval(i) => {
            let start = millis_from_naive(&i.start().reference_datetime()?);
            let end = millis_from_naive(&i.end().reference_datetime()?);
            Duration::between(start, end)
        }
        other => Err(Error::unsupported("duration_of", other.kind().name())),
    }
}
