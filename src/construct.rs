//! Construction dispatcher
//!
//! Every kind is built from a single [`Value`] whose shape is recognised in
//! a fixed order:
//!
//! 1. [`Shape::Absent`]: `Null`, empty string or empty map → `Ok(None)`
//! 2. [`Shape::Integral`]: epoch millis, raw millis, or a precise period
//! 3. [`Shape::FieldMap`]: every key is in the kind's canonical map shape;
//!    fields are injected through the registry on a zero value
//! 4. [`Shape::NamedArgs`]: any other map, read as named arguments
//! 5. [`Shape::Conversion`]: everything else goes to the converter registry
//!
//! The order is part of the contract. A map such as `{start, end}` is a
//! field map for an interval kind but named arguments for a duration.
//!
//! [`as_map`] and [`from_map`] are inverses: `from_map(kind, as_map(x))`
//! rebuilds `x`.

use tempora_core::{Category, DateTimeField, DurationField, EntityKind, Error, PeriodType, Result};
use tempora_engine::config;
use tempora_engine::convert::{self, parse_partial};
use tempora_engine::registry::{declared_fields, registry};
use tempora_engine::{
    DateTime, Duration, FieldMap, FieldSpan, Instant, Interval, LocalDate, LocalDateTime, LocalTime,
    MonthDay, Partial, PartialInterval, Period, Temporal, Value, YearMonth, Zone,
};
use tracing::trace;

/// Recognised shape of a construction argument, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shape {
    /// Nothing to build
    Absent,
    /// Integer the kind reads directly
    Integral,
    /// Map of the kind's canonical keys
    FieldMap,
    /// Map of constructor arguments
    NamedArgs,
    /// Handed to the converter registry
    Conversion,
}

impl Shape {
    /// First shape that matches `value` for `kind`
    pub fn of(kind: EntityKind, value: &Value) -> Shape {
        if value.is_absent() {
            return Shape::Absent;
        }
        match value {
            Value::Int(_) if accepts_integral(kind) => Shape::Integral,
            Value::Map(map) if is_canonical_map(kind, map) => Shape::FieldMap,
            Value::Map(_) => Shape::NamedArgs,
            _ => Shape::Conversion,
        }
    }
}

fn accepts_integral(kind: EntityKind) -> bool {
    kind.category() == Category::InstantLike
        || kind.is_concrete_partial()
        || matches!(kind, EntityKind::Duration | EntityKind::Period)
}

fn is_canonical_map(kind: EntityKind, map: &FieldMap) -> bool {
    if kind == EntityKind::FieldSpan && map.len() != 1 {
        return false;
    }
    map.keys().all(|key| is_canonical_key(kind, key))
}

fn is_canonical_key(kind: EntityKind, key: &str) -> bool {
    match kind.category() {
        Category::InstantLike | Category::Partial => {
            (kind == EntityKind::DateTime && key == "zone")
                || DateTimeField::from_name(key).map_or(false, |f| registry().supports(kind, f))
        }
        Category::Span => DurationField::from_name(key).is_some(),
        Category::Duration => key == "millis",
        Category::Interval => key == "start" || key == "end",
        Category::Mutable => false,
    }
}

/// Build a value of `kind` from one argument
///
/// # Errors
///
/// - `UnsupportedOperation` for the mutable kind
/// - `ConversionFailure` when no shape produces a value
/// - any field error raised while injecting a field map
pub fn construct(kind: EntityKind, value: &Value) -> Result<Option<Temporal>> {
    if !kind.is_pure() {
        return Err(Error::unsupported("construct", kind.name()));
    }
    let shape = Shape::of(kind, value);
    trace!(kind = kind.name(), ?shape, "construct");
    match (shape, value) {
        (Shape::Absent, _) => Ok(None),
        (Shape::Integral, Value::Int(millis)) => from_integral(kind, *millis).map(Some),
        (Shape::FieldMap, Value::Map(map)) => inject_fields(kind, map).map(Some),
        (Shape::NamedArgs, Value::Map(map)) => from_named_args(kind, map).map(Some),
        _ => convert::convert(kind, value).map(Some),
    }
}

/// Build a value, treating an absent argument as a conversion failure
pub fn construct_required(kind: EntityKind, value: &Value) -> Result<Temporal> {
    construct(kind, value)?.ok_or_else(|| Error::conversion(kind.name(), value.describe()))
}

fn from_integral(kind: EntityKind, millis: i64) -> Result<Temporal> {
    let zone = config::default_zone();
    Ok(match kind {
        EntityKind::Instant => Instant::from_millis(millis).into(),
        EntityKind::DateTime => DateTime::new(millis, zone).into(),
        EntityKind::LocalDate => LocalDate::from_instant(millis, zone)?.into(),
        EntityKind::LocalTime => LocalTime::from_instant(millis, zone)?.into(),
        EntityKind::LocalDateTime => LocalDateTime::from_instant(millis, zone)?.into(),
        EntityKind::YearMonth => YearMonth::from_instant(millis, zone)?.into(),
        EntityKind::MonthDay => MonthDay::from_instant(millis, zone)?.into(),
        EntityKind::Duration => Duration::from_millis(millis).into(),
        EntityKind::Period => Period::from_standard_millis(millis, PeriodType::time())?.into(),
        other => return Err(Error::conversion(other.name(), millis.to_string())),
    })
}

// ============================================================================
// Field maps
// ============================================================================

fn int_of(kind: EntityKind, key: &str, value: &Value) -> Result<i64> {
    value
        .as_int()
        .ok_or_else(|| Error::conversion(kind.name(), format!("{} = {}", key, value.describe())))
}

fn narrow(key: &str, value: i64) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| Error::overflow(format!("{} = {} does not fit a span count", key, value)))
}

fn zone_of(kind: EntityKind, map: &FieldMap) -> Result<Zone> {
    match map.get("zone") {
        None | Some(Value::Null) => Ok(config::default_zone()),
        Some(Value::String(id)) => Zone::for_id(id),
        Some(other) => Err(Error::conversion(kind.name(), format!("zone = {}", other.describe()))),
    }
}

fn zero_value(kind: EntityKind, map: &FieldMap) -> Result<Temporal> {
    Ok(match kind {
        EntityKind::Instant => Instant::EPOCH.into(),
        EntityKind::DateTime => DateTime::new(0, zone_of(kind, map)?).into(),
        EntityKind::LocalDate => LocalDate::default().into(),
        EntityKind::LocalTime => LocalTime::default().into(),
        EntityKind::LocalDateTime => LocalDateTime::default().into(),
        EntityKind::YearMonth => YearMonth::default().into(),
        EntityKind::MonthDay => MonthDay::default().into(),
        EntityKind::Partial => Partial::new().into(),
        other => return Err(Error::unsupported("field injection", other.name())),
    })
}

/// Field/value pairs of a map in the kind's declared order
fn date_time_pairs(kind: EntityKind, map: &FieldMap) -> Result<Vec<(DateTimeField, i64)>> {
    let mut pairs: Vec<(DateTimeField, i64)> = Vec::with_capacity(map.len());
    for (key, value) in map.iter().filter(|(key, _)| *key != "zone") {
        let field = DateTimeField::from_name(key)
            .ok_or_else(|| Error::field_unsupported(key, kind.name()))?;
        if pairs.iter().any(|(f, _)| *f == field) {
            return Err(Error::DuplicateField(field.name().to_string()));
        }
        pairs.push((field, int_of(kind, key, value)?));
    }
    let order = declared_fields(kind);
    pairs.sort_by_key(|(field, _)| order.iter().position(|f| f == field));
    Ok(pairs)
}

fn inject_fields(kind: EntityKind, map: &FieldMap) -> Result<Temporal> {
    match kind.category() {
        Category::InstantLike | Category::Partial => {
            let zero = zero_value(kind, map)?;
            date_time_pairs(kind, map)?
                .into_iter()
                .try_fold(zero, |acc, (field, value)| {
                    registry().resolve(kind, field)?.set(&acc, value)
                })
        }
        Category::Span => {
            let mut pairs = Vec::with_capacity(map.len());
            for (key, value) in map.iter() {
                let field = DurationField::from_name(key)
                    .ok_or_else(|| Error::field_unsupported(key, kind.name()))?;
                pairs.push((field, narrow(key, int_of(kind, key, value)?)?));
            }
            match (kind, pairs.as_slice()) {
                (EntityKind::FieldSpan, [(unit, amount)]) => {
                    Ok(FieldSpan::new(*unit, *amount).into())
                }
                (EntityKind::FieldSpan, _) => Err(Error::conversion(
                    kind.name(),
                    Value::from(map.clone()).describe(),
                )),
                _ => Ok(Period::new(&pairs)?.into()),
            }
        }
        Category::Duration => {
            let millis = map.get("millis").map_or(Ok(0), |v| int_of(kind, "millis", v))?;
            Ok(Duration::from_millis(millis).into())
        }
        Category::Interval => {
            let start = required(kind, map, "start")?;
            let end = required(kind, map, "end")?;
            if kind == EntityKind::Interval {
                let (start, end) = (date_time_arg(start)?, date_time_arg(end)?);
                Ok(Interval::new(start.millis(), end.millis(), start.zone())?.into())
            } else {
                Ok(PartialInterval::new(partial_arg(start)?, partial_arg(end)?)?.into())
            }
        }
        Category::Mutable => Err(Error::unsupported("construct", kind.name())),
    }
}

// ============================================================================
// Named arguments
// ============================================================================

fn required<'a>(kind: EntityKind, map: &'a FieldMap, key: &str) -> Result<&'a Value> {
    map.get(key)
        .filter(|v| !v.is_absent())
        .ok_or_else(|| Error::conversion(kind.name(), format!("map without '{}'", key)))
}

fn check_keys(kind: EntityKind, map: &FieldMap, allowed: &[&str]) -> Result<()> {
    match map.keys().find(|key| !allowed.contains(key)) {
        Some(key) => Err(Error::conversion(kind.name(), format!("map with unknown key '{}'", key))),
        None => Ok(()),
    }
}

fn date_time_arg(value: &Value) -> Result<DateTime> {
    match construct_required(EntityKind::DateTime, value)? {
        Temporal::DateTime(dt) => Ok(dt),
        other => Err(Error::conversion("DateTime", other.kind().name())),
    }
}

fn partial_arg(value: &Value) -> Result<Temporal> {
    let parsed = match value {
        Value::Temporal(t) if t.category() == Category::Partial => Some(t.clone()),
        Value::String(text) => EntityKind::CONCRETE_PARTIALS
            .into_iter()
            .find_map(|kind| parse_partial(kind, text)),
        _ => None,
    };
    parsed.ok_or_else(|| Error::conversion("PartialInterval", value.describe()))
}

/// Point an unzoned span is measured from
fn reference_arg(value: &Value) -> Result<Temporal> {
    match value {
        Value::Temporal(t) if matches!(t.category(), Category::InstantLike | Category::Partial) => {
            Ok(t.clone())
        }
        other => Ok(date_time_arg(other)?.into()),
    }
}

fn from_named_args(kind: EntityKind, map: &FieldMap) -> Result<Temporal> {
    match kind.category() {
        Category::InstantLike | Category::Partial if kind != EntityKind::Partial => {
            check_keys(kind, map, &["millis", "zone"])?;
            let millis = int_of(kind, "millis", required(kind, map, "millis")?)?;
            let zone = zone_of(kind, map)?;
            Ok(match kind {
                EntityKind::Instant => Instant::from_millis(millis).into(),
                EntityKind::DateTime => DateTime::new(millis, zone).into(),
                EntityKind::LocalDate => LocalDate::from_instant(millis, zone)?.into(),
                EntityKind::LocalTime => LocalTime::from_instant(millis, zone)?.into(),
                EntityKind::LocalDateTime => LocalDateTime::from_instant(millis, zone)?.into(),
                EntityKind::YearMonth => YearMonth::from_instant(millis, zone)?.into(),
                _ => MonthDay::from_instant(millis, zone)?.into(),
            })
        }
        Category::Duration => {
            check_keys(kind, map, &["start", "end"])?;
            let instant = |key: &str| -> Result<i64> {
                match construct_required(EntityKind::Instant, required(kind, map, key)?)? {
                    Temporal::Instant(i) => Ok(i.millis()),
                    other => Err(Error::conversion("Instant", other.kind().name())),
                }
            };
            Ok(Duration::between(instant("start")?, instant("end")?)?.into())
        }
        Category::Span if kind == EntityKind::Period => {
            check_keys(kind, map, &["start", "end"])?;
            let start = reference_arg(required(kind, map, "start")?)?;
            let end = reference_arg(required(kind, map, "end")?)?;
            Ok(Period::between(
                start.reference_datetime()?,
                end.reference_datetime()?,
                PeriodType::standard(),
            )?
            .into())
        }
        Category::Interval if kind == EntityKind::Interval => {
            check_keys(kind, map, &["start", "end", "duration", "period"])?;
            let arg = |key: &str| map.get(key).filter(|v| !v.is_absent());
            let duration = |v: &Value| -> Result<Duration> {
                match construct_required(EntityKind::Duration, v)? {
                    Temporal::Duration(d) => Ok(d),
                    other => Err(Error::conversion("Duration", other.kind().name())),
                }
            };
            let period = |v: &Value| -> Result<Period> {
                match construct_required(EntityKind::Period, v)? {
                    Temporal::Period(p) => Ok(p),
                    Temporal::FieldSpan(s) => Ok(s.to_period()),
                    other => Err(Error::conversion("Period", other.kind().name())),
                }
            };
            let interval = match (arg("start"), arg("end"), arg("duration"), arg("period")) {
                (Some(s), None, Some(d), None) => {
                    Interval::from_start_duration(date_time_arg(s)?, duration(d)?)?
                }
                (Some(s), None, None, Some(p)) => {
                    Interval::from_start_period(date_time_arg(s)?, &period(p)?)?
                }
                (None, Some(e), Some(d), None) => {
                    Interval::from_duration_end(duration(d)?, date_time_arg(e)?)?
                }
                (None, Some(e), None, Some(p)) => {
                    Interval::from_period_end(&period(p)?, date_time_arg(e)?)?
                }
                _ => {
                    let described = Value::from(map.clone()).describe();
                    return Err(Error::conversion(kind.name(), described));
                }
            };
            Ok(interval.into())
        }
        _ => Err(Error::conversion(kind.name(), Value::from(map.clone()).describe())),
    }
}

// ============================================================================
// Other entry points
// ============================================================================

/// Zero-argument construction
///
/// The current moment for instant-likes and partials (in the default
/// zone), zero for spans and durations.
///
/// # Errors
///
/// Returns `UnsupportedOperation` for intervals and the mutable kind.
pub fn now(kind: EntityKind) -> Result<Temporal> {
    let zone = config::default_zone();
    let millis = Instant::now().millis();
    Ok(match kind {
        EntityKind::Instant => Instant::from_millis(millis).into(),
        EntityKind::DateTime => DateTime::new(millis, zone).into(),
        EntityKind::LocalDate => LocalDate::from_instant(millis, zone)?.into(),
        EntityKind::LocalTime => LocalTime::from_instant(millis, zone)?.into(),
        EntityKind::LocalDateTime => LocalDateTime::from_instant(millis, zone)?.into(),
        EntityKind::YearMonth => YearMonth::from_instant(millis, zone)?.into(),
        EntityKind::MonthDay => MonthDay::from_instant(millis, zone)?.into(),
        EntityKind::Partial => {
            let local = Temporal::from(LocalDateTime::from_instant(millis, zone)?);
            let values = local.partial_values().unwrap_or_default();
            Partial::from_fields(values)?.into()
        }
        EntityKind::FieldSpan => FieldSpan::millis(0).into(),
        EntityKind::Period => Period::zero(PeriodType::standard()).into(),
        EntityKind::Duration => Duration::ZERO.into(),
        other => return Err(Error::unsupported("now", other.name())),
    })
}

/// Single-field span of `amount` units
///
/// # Errors
///
/// Returns `ArithmeticOverflow` if the amount does not fit a span count.
pub fn span(amount: i64, unit: DurationField) -> Result<Temporal> {
    Ok(FieldSpan::new(unit, narrow(unit.name(), amount)?).into())
}

/// Exact duration from `start` to `end`
///
/// Local endpoints are placed in the default zone.
pub fn duration_between(start: &Temporal, end: &Temporal) -> Result<Duration> {
    let millis = |t: &Temporal| -> Result<i64> {
        match convert::convert(EntityKind::Instant, &Value::from(t.clone()))? {
            Temporal::Instant(i) => Ok(i.millis()),
            other => Err(Error::conversion("Instant", other.kind().name())),
        }
    };
    Duration::between(millis(start)?, millis(end)?)
}

/// Canonical map of a value
///
/// Date-time kinds list every declared field (plus `zone` for
/// `DateTime`); the generic partial lists its own fields; spans list their
/// type's fields; durations give `millis`; intervals give `start`/`end`.
pub fn as_map(value: &Temporal) -> Result<FieldMap> {
    let mut map = FieldMap::new();
    match value {
        Temporal::Partial(p) => {
            for (field, v) in p.pairs() {
                map.insert(field.name(), *v);
            }
        }
        Temporal::FieldSpan(s) => {
            map.insert(s.unit().name(), s.amount());
        }
        Temporal::Period(p) => {
            for (field, v) in p.iter() {
                map.insert(field.name(), v);
            }
        }
        Temporal::Duration(d) => {
            map.insert("millis", d.millis());
        }
        Temporal::Interval(i) => {
            map.insert("start", Temporal::from(i.start()));
            map.insert("end", Temporal::from(i.end()));
        }
        Temporal::PartialInterval(i) => {
            map.insert("start", i.start().clone());
            map.insert("end", i.end().clone());
        }
        other => {
            let kind = other.kind();
            for field in declared_fields(kind) {
                map.insert(field.name(), registry().resolve(kind, *field)?.get(other)?);
            }
            if let Temporal::DateTime(dt) = other {
                map.insert("zone", dt.zone().id());
            }
        }
    }
    Ok(map)
}

/// Rebuild a value from its canonical map, or from named arguments
///
/// Unlike [`construct`], an empty map builds the kind's zero value.
pub fn from_map(kind: EntityKind, map: &FieldMap) -> Result<Temporal> {
    if !kind.is_pure() {
        return Err(Error::unsupported("from_map", kind.name()));
    }
    if is_canonical_map(kind, map) {
        inject_fields(kind, map)
    } else {
        from_named_args(kind, map)
    }
}
