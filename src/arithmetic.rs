//! Generic arithmetic
//!
//! `plus`, `minus`, `merge`, `negate` and `abs` over [`Temporal`] values.
//! The base operand's category selects the rule:
//!
//! | Base | Operands | Result |
//! |------|----------|--------|
//! | instant-like, partial | spans, durations, integer millis | same kind |
//! | span | spans, integer counts (single-field base) | union of field sets |
//! | duration | durations, integer millis | duration |
//!
//! Field extraction (`years`, `months`, ...) reads a span's count or counts
//! whole units across an interval.

use tempora_core::{Category, DurationField, Error, PeriodType, Result};
use tempora_engine::calendar;
use tempora_engine::{Duration, FieldSpan, FieldValues, Interval, PartialInterval, Period, Temporal};

/// Right-hand operand of `plus`/`minus`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A temporal value
    Temporal(Temporal),
    /// Milliseconds, or a count of the base span's unit
    Int(i64),
}

impl Operand {
    fn describe(&self) -> String {
        match self {
            Operand::Temporal(t) => t.kind().name().to_string(),
            Operand::Int(_) => "Int".to_string(),
        }
    }
}

impl From<Temporal> for Operand {
    fn from(value: Temporal) -> Self {
        Operand::Temporal(value)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Int(value)
    }
}

impl From<FieldSpan> for Operand {
    fn from(value: FieldSpan) -> Self {
        Operand::Temporal(value.into())
    }
}

impl From<Period> for Operand {
    fn from(value: Period) -> Self {
        Operand::Temporal(value.into())
    }
}

impl From<Duration> for Operand {
    fn from(value: Duration) -> Self {
        Operand::Temporal(value.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn apply(self, amount: i64) -> Result<i64> {
        match self {
            Sign::Plus => Ok(amount),
            Sign::Minus => amount
                .checked_neg()
                .ok_or_else(|| Error::overflow(format!("negate {}", amount))),
        }
    }

    fn op(self) -> &'static str {
        match self {
            Sign::Plus => "plus",
            Sign::Minus => "minus",
        }
    }
}

/// Add operands to a base, in order
///
/// # Errors
///
/// - `UnsupportedOperation` for operand kinds the base cannot take
/// - `ArithmeticOverflow` if a result leaves the representable range
pub fn plus(base: &Temporal, operands: &[Operand]) -> Result<Temporal> {
    apply(base, operands, Sign::Plus)
}

/// Subtract operands from a base, in order
pub fn minus(base: &Temporal, operands: &[Operand]) -> Result<Temporal> {
    apply(base, operands, Sign::Minus)
}

fn apply(base: &Temporal, operands: &[Operand], sign: Sign) -> Result<Temporal> {
    match base.category() {
        Category::InstantLike | Category::Partial => operands
            .iter()
            .try_fold(base.clone(), |acc, operand| shift_point(&acc, operand, sign)),
        Category::Span => add_spans(base, operands, sign),
        Category::Duration => {
            let start = match base {
                Temporal::Duration(d) => *d,
                _ => Duration::ZERO,
            };
            operands
                .iter()
                .try_fold(start, |acc, operand| {
                    let millis = match operand {
                        Operand::Int(ms) => *ms,
                        Operand::Temporal(Temporal::Duration(d)) => d.millis(),
                        other => return Err(Error::unsupported(sign.op(), other.describe())),
                    };
                    acc.plus_millis(sign.apply(millis)?)
                })
                .map(Temporal::from)
        }
        _ => Err(Error::unsupported(sign.op(), base.kind().name())),
    }
}

fn shift_point(point: &Temporal, operand: &Operand, sign: Sign) -> Result<Temporal> {
    match operand {
        Operand::Int(ms) => point.plus_millis(sign.apply(*ms)?),
        Operand::Temporal(Temporal::Duration(d)) => point.plus_millis(sign.apply(d.millis())?),
        Operand::Temporal(Temporal::FieldSpan(s)) => {
            point.plus_unit(s.unit(), sign.apply(s.amount() as i64)?)
        }
        Operand::Temporal(Temporal::Period(p)) => p
            .iter()
            .filter(|(_, value)| *value != 0)
            .try_fold(point.clone(), |acc, (field, value)| {
                acc.plus_unit(field, sign.apply(value as i64)?)
            }),
        other => Err(Error::unsupported(sign.op(), other.describe())),
    }
}

fn add_spans(base: &Temporal, operands: &[Operand], sign: Sign) -> Result<Temporal> {
    let (unit, mut period) = match base {
        Temporal::FieldSpan(s) => (Some(s.unit()), s.to_period()),
        Temporal::Period(p) => (single_unit(p), *p),
        other => return Err(Error::unsupported(sign.op(), other.kind().name())),
    };
    let mut single = matches!(base, Temporal::FieldSpan(_));
    for operand in operands {
        let addend = match operand {
            Operand::Int(count) => {
                let unit = unit
                    .ok_or_else(|| Error::unsupported(sign.op(), "Int on a multi-field period"))?;
                Period::zero(PeriodType::single(unit)).with_field_added(unit, *count)?
            }
            Operand::Temporal(Temporal::FieldSpan(s)) => {
                single &= Some(s.unit()) == unit;
                s.to_period()
            }
            Operand::Temporal(Temporal::Period(p)) => {
                single = false;
                *p
            }
            other => return Err(Error::unsupported(sign.op(), other.describe())),
        };
        let addend = match sign {
            Sign::Plus => addend,
            Sign::Minus => addend.negated()?,
        };
        period = period.plus(&addend)?;
    }
    match unit {
        Some(unit) if single => Ok(FieldSpan::new(unit, period.get(unit)?).into()),
        _ => Ok(period.into()),
    }
}

fn single_unit(period: &Period) -> Option<DurationField> {
    match period.fields().as_slice() {
        [unit] => Some(*unit),
        _ => None,
    }
}

/// Union of operands, later values overwriting earlier ones
///
/// Spans merge into a period over the union of their field sets. Partials
/// merge into the concrete kind whose defining fields equal the union, or
/// into a generic partial.
///
/// # Errors
///
/// - `IncompatibleMergeOperands` when operands mix categories
/// - `UnsupportedOperation` for categories that do not merge
pub fn merge(operands: &[Temporal]) -> Result<Temporal> {
    let first = operands
        .first()
        .ok_or_else(|| Error::unsupported("merge", "no operands"))?;
    if let Some(other) = operands.iter().find(|o| o.category() != first.category()) {
        return Err(Error::IncompatibleMergeOperands {
            left: first.kind().name().to_string(),
            right: other.kind().name().to_string(),
        });
    }
    match first.category() {
        Category::Span => merge_spans(operands),
        Category::Partial => merge_partials(operands),
        other => Err(Error::unsupported("merge", other.name())),
    }
}

fn merge_spans(operands: &[Temporal]) -> Result<Temporal> {
    let periods: Vec<Period> = operands
        .iter()
        .filter_map(|o| match o {
            Temporal::FieldSpan(s) => Some(s.to_period()),
            Temporal::Period(p) => Some(*p),
            _ => None,
        })
        .collect();
    let merged = periods
        .iter()
        .fold(Period::zero(PeriodType::EMPTY), |acc, p| acc.merge(p));
    let all_single = operands.iter().all(|o| matches!(o, Temporal::FieldSpan(_)));
    match (all_single, single_unit(&merged)) {
        (true, Some(unit)) => Ok(FieldSpan::new(unit, merged.get(unit)?).into()),
        _ => Ok(merged.into()),
    }
}

fn merge_partials(operands: &[Temporal]) -> Result<Temporal> {
    let mut union = FieldValues::new();
    for operand in operands {
        let values = operand
            .partial_values()
            .ok_or_else(|| Error::unsupported("merge", operand.kind().name()))?;
        for (field, value) in values {
            match union.iter_mut().find(|(f, _)| *f == field) {
                Some(slot) => slot.1 = value,
                None => union.push((field, value)),
            }
        }
    }
    union.sort_by_key(|(field, _)| *field);
    Temporal::from_partial_values(&union)
}

/// Every field flipped
///
/// # Errors
///
/// Returns `UnsupportedOperation` for anything but spans and durations.
pub fn negate(value: &Temporal) -> Result<Temporal> {
    Ok(match value {
        Temporal::FieldSpan(s) => s.negated()?.into(),
        Temporal::Period(p) => p.negated()?.into(),
        Temporal::Duration(d) => d.negated()?.into(),
        other => return Err(Error::unsupported("negate", other.kind().name())),
    })
}

/// Absolute value of a single-field span or a duration
///
/// A multi-field period has no single sign and is rejected with
/// `UnsupportedOperation`.
pub fn abs(value: &Temporal) -> Result<Temporal> {
    Ok(match value {
        Temporal::FieldSpan(s) => s.abs()?.into(),
        Temporal::Duration(d) => d.abs()?.into(),
        Temporal::Period(p) => match single_unit(p) {
            Some(unit) => {
                let span = FieldSpan::new(unit, p.get(unit)?).abs()?;
                p.with(unit, span.amount())?.into()
            }
            None => return Err(Error::unsupported("abs", format!("multi-field Period {}", p))),
        },
        other => return Err(Error::unsupported("abs", other.kind().name())),
    })
}

// ============================================================================
// Field extraction
// ============================================================================

/// Count of `unit` in a value
///
/// A span reports its field; an interval counts whole units from start to
/// end, truncated toward zero; a duration counts standard units.
///
/// # Errors
///
/// - `FieldNotInPeriodType` for a span without the field
/// - `ImpreciseConversion` for years or months of a duration
/// - `UnsupportedOperation` for points and generic partial intervals
pub fn count(value: &Temporal, unit: DurationField) -> Result<i64> {
    match value {
        Temporal::FieldSpan(s) => Ok(s.get(unit)? as i64),
        Temporal::Period(p) => Ok(p.get(unit)? as i64),
        Temporal::Duration(d) => {
            let unit_millis = unit
                .standard_millis()
                .ok_or_else(|| Error::ImpreciseConversion {
                    field: unit.name().to_string(),
                })?;
            Ok(d.millis() / unit_millis)
        }
        Temporal::Interval(i) => {
            calendar::units_between(unit, i.start().local()?, i.end().local()?)
        }
        Temporal::PartialInterval(i) => {
            let (start, end) = (i.start().reference_datetime()?, i.end().reference_datetime()?);
            calendar::units_between(unit, start, end)
        }
        other => Err(Error::unsupported(format!("count {}", unit), other.kind().name())),
    }
}

/// Whole `unit`s between two points
///
/// Instant-likes form an [`Interval`]; partials form a [`PartialInterval`].
pub fn count_in(start: &Temporal, end: &Temporal, unit: DurationField) -> Result<i64> {
    let interval: Temporal = match (start.category(), end.category()) {
        (Category::InstantLike, Category::InstantLike) => Interval::between(start, end)?.into(),
        (Category::Partial, Category::Partial) => {
            PartialInterval::new(start.clone(), end.clone())?.into()
        }
        _ => {
            return Err(Error::unsupported(
                format!("count {}", unit),
                format!("{} to {}", start.kind(), end.kind()),
            ))
        }
    };
    count(&interval, unit)
}

macro_rules! extractors {
    ($($name:ident, $name_in:ident => $unit:ident;)*) => {
        $(
            #[doc = concat!("Count of ", stringify!($name), " in a span, interval or duration")]
            pub fn $name(value: &Temporal) -> Result<i64> {
                count(value, DurationField::$unit)
            }

            #[doc = concat!("Whole ", stringify!($name), " between two points")]
            pub fn $name_in(start: &Temporal, end: &Temporal) -> Result<i64> {
                count_in(start, end, DurationField::$unit)
            }
        )*
    };
}

extractors! {
    years, years_in => Years;
    months, months_in => Months;
    weeks, weeks_in => Weeks;
    days, days_in => Days;
    hours, hours_in => Hours;
    minutes, minutes_in => Minutes;
    seconds, seconds_in => Seconds;
    millis, millis_in => Millis;
}
