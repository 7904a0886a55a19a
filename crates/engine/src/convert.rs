//! Converter registry
//!
//! Coerces a [`Value`] that is not handled by construction's earlier
//! shapes into a target kind: ISO-8601 strings, other temporal kinds and
//! epoch milliseconds.
//!
//! Each target kind has one converter function, registered in a table
//! built on first use. Inputs without a zone are read in the installed
//! default zone.
//!
//! | Target | Accepts |
//! |--------|---------|
//! | Instant, DateTime | millis, RFC 3339, local date(-time) text, instant-likes, LocalDate, LocalDateTime |
//! | LocalDate … MonthDay | their ISO text, millis, instant-likes, wider partials |
//! | Partial | any partial |
//! | FieldSpan, Period | ISO period text, spans; Period also millis and durations |
//! | Duration | millis, precise ISO period text, precise spans, intervals |
//! | Interval | `start/end`, `start/period`, `period/end` text |
//! | PartialInterval | `start/end` text of one partial kind |

use crate::config;
use crate::duration::Duration;
use crate::instant::{DateTime, Instant};
use crate::interval::{Interval, PartialInterval};
use crate::local::{LocalDate, LocalDateTime, LocalTime, MonthDay, YearMonth, MONTH_DAY_YEAR};
use crate::partial::Partial;
use crate::span::{FieldSpan, Period};
use crate::temporal::Temporal;
use crate::value::Value;
use crate::zone::Zone;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use tempora_core::{Category, EntityKind, Error, PeriodType, Result};
use tracing::debug;

/// Converter into one target kind
pub type ConvertFn = fn(&Value, Zone) -> Result<Temporal>;

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

static CONVERTERS: Lazy<FxHashMap<EntityKind, ConvertFn>> = Lazy::new(|| {
    let table: [(EntityKind, ConvertFn); 13] = [
        (EntityKind::Instant, to_instant),
        (EntityKind::DateTime, to_date_time),
        (EntityKind::LocalDate, to_local_date),
        (EntityKind::LocalTime, to_local_time),
        (EntityKind::LocalDateTime, to_local_date_time),
        (EntityKind::YearMonth, to_year_month),
        (EntityKind::MonthDay, to_month_day),
        (EntityKind::Partial, to_partial),
        (EntityKind::FieldSpan, to_field_span),
        (EntityKind::Period, to_period),
        (EntityKind::Duration, to_duration),
        (EntityKind::Interval, to_interval),
        (EntityKind::PartialInterval, to_partial_interval),
    ];
    let converters: FxHashMap<EntityKind, ConvertFn> = table.into_iter().collect();
    debug!(converters = converters.len(), "converter registry built");
    converters
});

/// Convert a value to a target kind
///
/// # Errors
///
/// Returns `ConversionFailure` if no converter accepts the value.
pub fn convert(target: EntityKind, value: &Value) -> Result<Temporal> {
    let converter = CONVERTERS
        .get(&target)
        .ok_or_else(|| Error::conversion(target.name(), value.describe()))?;
    converter(value, config::default_zone()).map_err(|e| {
        debug!(target = target.name(), input = %value.describe(), error = %e, "conversion failed");
        e
    })
}

/// True if a converter is registered for the kind
pub fn has_converter(kind: EntityKind) -> bool {
    CONVERTERS.contains_key(&kind)
}

fn fail(target: EntityKind, value: &Value) -> Error {
    Error::conversion(target.name(), value.describe())
}

// ============================================================================
// Text
// ============================================================================

/// Parse text in the exact ISO form of a partial kind
pub fn parse_partial(kind: EntityKind, text: &str) -> Option<Temporal> {
    let text = text.trim();
    match kind {
        EntityKind::LocalDate => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .map(|d| LocalDate::from_naive(d).into()),
        EntityKind::LocalTime => TIME_FORMATS
            .iter()
            .find_map(|f| NaiveTime::parse_from_str(text, f).ok())
            .map(|t| LocalTime::from_naive(t).into()),
        EntityKind::LocalDateTime => {
            parse_naive_date_time(text).map(|dt| LocalDateTime::from_naive(dt).into())
        }
        EntityKind::YearMonth => NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d")
            .ok()
            .map(|d| YearMonth::from_naive(d).into()),
        EntityKind::MonthDay => {
            let md = text.strip_prefix("--").unwrap_or(text);
            NaiveDate::parse_from_str(&format!("{}-{}", MONTH_DAY_YEAR, md), "%Y-%m-%d")
                .ok()
                .map(|d| MonthDay::from_naive(d).into())
        }
        _ => None,
    }
}

fn parse_naive_date_time(text: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
}

/// Local wall-clock reading of text: RFC 3339, local date-time or date
fn parse_local(text: &str, zone: Zone) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return DateTime::from(dt).with_zone(zone).local().ok();
    }
    parse_naive_date_time(text).or_else(|| {
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .map(|d| d.and_time(NaiveTime::MIN))
    })
}

fn parse_millis(text: &str, zone: Zone) -> Option<i64> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text.trim()) {
        return Some(dt.timestamp_millis());
    }
    zone.instant_of(&parse_local(text, zone)?).ok()
}

// ============================================================================
// Temporal sources
// ============================================================================

fn temporal_millis(value: &Temporal, zone: Zone) -> Option<i64> {
    match value {
        Temporal::Instant(i) => Some(i.millis()),
        Temporal::DateTime(dt) => Some(dt.millis()),
        Temporal::LocalDateTime(dt) => zone.instant_of(&dt.naive()).ok(),
        Temporal::LocalDate(d) => zone.instant_of(&d.at_start_of_day().naive()).ok(),
        _ => None,
    }
}

/// Local wall-clock reading of any value with a date
fn local_of(value: &Value, zone: Zone) -> Option<NaiveDateTime> {
    match value {
        Value::Int(ms) => zone.local(*ms).ok(),
        Value::String(s) => parse_local(s, zone),
        Value::Temporal(Temporal::Instant(i)) => zone.local(i.millis()).ok(),
        Value::Temporal(Temporal::DateTime(dt)) => dt.local().ok(),
        Value::Temporal(Temporal::LocalDateTime(dt)) => Some(dt.naive()),
        Value::Temporal(Temporal::LocalDate(d)) => Some(d.at_start_of_day().naive()),
        _ => None,
    }
}

fn same_kind(value: &Value, kind: EntityKind) -> Option<Temporal> {
    value.as_temporal().filter(|t| t.kind() == kind).cloned()
}

fn exact_text(value: &Value, kind: EntityKind) -> Option<Temporal> {
    value.as_str().and_then(|s| parse_partial(kind, s))
}

// ============================================================================
// Converters
// ============================================================================

fn to_instant(value: &Value, zone: Zone) -> Result<Temporal> {
    let millis = match value {
        Value::Int(ms) => Some(*ms),
        Value::String(s) => parse_millis(s, zone),
        Value::Temporal(t) => temporal_millis(t, zone),
        _ => None,
    };
    millis
        .map(|ms| Instant::from_millis(ms).into())
        .ok_or_else(|| fail(EntityKind::Instant, value))
}

fn to_date_time(value: &Value, zone: Zone) -> Result<Temporal> {
    if let Some(dt) = value
        .as_str()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s.trim()).ok())
    {
        return Ok(DateTime::from(dt).into());
    }
    if let Some(dt) = same_kind(value, EntityKind::DateTime) {
        return Ok(dt);
    }
    let millis = match value {
        Value::Int(ms) => Some(*ms),
        Value::String(s) => parse_millis(s, zone),
        Value::Temporal(t) => temporal_millis(t, zone),
        _ => None,
    };
    millis
        .map(|ms| DateTime::new(ms, zone).into())
        .ok_or_else(|| fail(EntityKind::DateTime, value))
}

fn to_local_date(value: &Value, zone: Zone) -> Result<Temporal> {
    exact_text(value, EntityKind::LocalDate)
        .or_else(|| same_kind(value, EntityKind::LocalDate))
        .or_else(|| local_of(value, zone).map(|dt| LocalDate::from_naive(dt.date()).into()))
        .ok_or_else(|| fail(EntityKind::LocalDate, value))
}

fn to_local_time(value: &Value, zone: Zone) -> Result<Temporal> {
    exact_text(value, EntityKind::LocalTime)
        .or_else(|| same_kind(value, EntityKind::LocalTime))
        .or_else(|| match value {
            Value::Temporal(Temporal::LocalDate(_)) => None,
            _ => local_of(value, zone).map(|dt| LocalTime::from_naive(dt.time()).into()),
        })
        .ok_or_else(|| fail(EntityKind::LocalTime, value))
}

fn to_local_date_time(value: &Value, zone: Zone) -> Result<Temporal> {
    same_kind(value, EntityKind::LocalDateTime)
        .or_else(|| local_of(value, zone).map(|dt| LocalDateTime::from_naive(dt).into()))
        .ok_or_else(|| fail(EntityKind::LocalDateTime, value))
}

fn to_year_month(value: &Value, zone: Zone) -> Result<Temporal> {
    exact_text(value, EntityKind::YearMonth)
        .or_else(|| same_kind(value, EntityKind::YearMonth))
        .or_else(|| local_of(value, zone).map(|dt| YearMonth::from_naive(dt.date()).into()))
        .ok_or_else(|| fail(EntityKind::YearMonth, value))
}

fn to_month_day(value: &Value, zone: Zone) -> Result<Temporal> {
    exact_text(value, EntityKind::MonthDay)
        .or_else(|| same_kind(value, EntityKind::MonthDay))
        .or_else(|| local_of(value, zone).map(|dt| MonthDay::from_naive(dt.date()).into()))
        .ok_or_else(|| fail(EntityKind::MonthDay, value))
}

fn to_partial(value: &Value, _zone: Zone) -> Result<Temporal> {
    let values = value
        .as_temporal()
        .filter(|t| t.category() == Category::Partial)
        .and_then(Temporal::partial_values)
        .ok_or_else(|| fail(EntityKind::Partial, value))?;
    Ok(Partial::from_fields(values)?.into())
}

fn to_field_span(value: &Value, _zone: Zone) -> Result<Temporal> {
    let period = match value {
        Value::Temporal(Temporal::FieldSpan(s)) => return Ok((*s).into()),
        Value::Temporal(Temporal::Period(p)) => *p,
        Value::String(s) => Period::parse_iso(s)?,
        _ => return Err(fail(EntityKind::FieldSpan, value)),
    };
    match period.iter().collect::<Vec<_>>().as_slice() {
        [(unit, amount)] => Ok(FieldSpan::new(*unit, *amount).into()),
        _ => Err(fail(EntityKind::FieldSpan, value)),
    }
}

fn to_period(value: &Value, _zone: Zone) -> Result<Temporal> {
    let period = match value {
        Value::Int(ms) => Period::from_standard_millis(*ms, PeriodType::time())?,
        Value::String(s) => Period::parse_iso(s)?,
        Value::Temporal(Temporal::Period(p)) => *p,
        Value::Temporal(Temporal::FieldSpan(s)) => s.to_period(),
        Value::Temporal(Temporal::Duration(d)) => d.to_period()?,
        _ => return Err(fail(EntityKind::Period, value)),
    };
    Ok(period.into())
}

fn to_duration(value: &Value, _zone: Zone) -> Result<Temporal> {
    let duration = match value {
        Value::Int(ms) => Duration::from_millis(*ms),
        Value::String(s) => Period::parse_iso(s)?.to_standard_duration()?,
        Value::Temporal(Temporal::Duration(d)) => *d,
        Value::Temporal(Temporal::FieldSpan(s)) => s.to_standard_duration()?,
        Value::Temporal(Temporal::Period(p)) => p.to_standard_duration()?,
        Value::Temporal(Temporal::Interval(i)) => i.duration()?,
        _ => return Err(fail(EntityKind::Duration, value)),
    };
    Ok(duration.into())
}

fn date_time_text(text: &str, zone: Zone) -> Option<DateTime> {
    match to_date_time(&Value::from(text), zone) {
        Ok(Temporal::DateTime(dt)) => Some(dt),
        _ => None,
    }
}

fn is_period_text(text: &str) -> bool {
    let t = text.trim_start_matches('-');
    t.starts_with('P') || t.starts_with('p')
}

fn to_interval(value: &Value, zone: Zone) -> Result<Temporal> {
    if let Some(i) = same_kind(value, EntityKind::Interval) {
        return Ok(i);
    }
    let (left, right) = value
        .as_str()
        .and_then(|s| s.split_once('/'))
        .ok_or_else(|| fail(EntityKind::Interval, value))?;
    let date_time =
        |text: &str| date_time_text(text, zone).ok_or_else(|| fail(EntityKind::Interval, value));
    let interval = match (is_period_text(left), is_period_text(right)) {
        (false, false) => {
            let (start, end) = (date_time(left)?, date_time(right)?);
            Interval::new(start.millis(), end.millis(), start.zone())?
        }
        (false, true) => Interval::from_start_period(date_time(left)?, &Period::parse_iso(right)?)?,
        (true, false) => Interval::from_period_end(&Period::parse_iso(left)?, date_time(right)?)?,
        (true, true) => return Err(fail(EntityKind::Interval, value)),
    };
    Ok(interval.into())
}

fn to_partial_interval(value: &Value, _zone: Zone) -> Result<Temporal> {
    if let Some(i) = same_kind(value, EntityKind::PartialInterval) {
        return Ok(i);
    }
    let (left, right) = value
        .as_str()
        .and_then(|s| s.split_once('/'))
        .ok_or_else(|| fail(EntityKind::PartialInterval, value))?;
    let endpoints = EntityKind::CONCRETE_PARTIALS
        .into_iter()
        .find_map(|kind| Some((parse_partial(kind, left)?, parse_partial(kind, right)?)))
        .ok_or_else(|| fail(EntityKind::PartialInterval, value))?;
    Ok(PartialInterval::new(endpoints.0, endpoints.1)?.into())
}
