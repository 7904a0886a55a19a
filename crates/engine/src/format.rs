//! Pattern formatting and parsing
//!
//! A [`Formatter`] wraps a strftime-style pattern (`%Y-%m-%d`, `%H:%M`).
//! Formatting writes into a `String` through `fmt::Write`, so a pattern that
//! does not fit the value (an offset specifier on a local time) surfaces as
//! an error rather than a panic.

use crate::instant::{DateTime, Instant};
use crate::local::{LocalDate, LocalDateTime, LocalTime};
use crate::temporal::Temporal;
use crate::zone::Zone;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::Write;
use tempora_core::{EntityKind, Error, Result};

/// Strftime-style pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    pattern: String,
}

impl Formatter {
    /// Wrap a pattern
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// The pattern text
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Render an instant-like or concrete partial
    ///
    /// # Errors
    ///
    /// - `UnsupportedOperation` for spans, intervals and the generic partial
    /// - `ConversionFailure` if the pattern needs data the value lacks
    pub fn format(&self, value: &Temporal) -> Result<String> {
        let mut out = String::new();
        let written = match value {
            Temporal::Instant(i) => write!(out, "{}", i.to_chrono()?.format(&self.pattern)),
            Temporal::DateTime(dt) => write!(out, "{}", dt.to_chrono()?.format(&self.pattern)),
            Temporal::LocalDate(d) => write!(out, "{}", d.naive().format(&self.pattern)),
            Temporal::LocalTime(t) => write!(out, "{}", t.naive().format(&self.pattern)),
            Temporal::LocalDateTime(dt) => write!(out, "{}", dt.naive().format(&self.pattern)),
            Temporal::YearMonth(ym) => write!(out, "{}", ym.naive().format(&self.pattern)),
            Temporal::MonthDay(md) => write!(out, "{}", md.naive().format(&self.pattern)),
            other => return Err(Error::unsupported("format", other.kind().name())),
        };
        written.map_err(|_| self.mismatch(value.kind()))?;
        Ok(out)
    }

    /// Parse text into an instant-like or a date/time partial
    ///
    /// Instants and date-times need an offset in the pattern; local kinds
    /// must not carry one.
    pub fn parse(&self, kind: EntityKind, text: &str) -> Result<Temporal> {
        let parsed: Option<Temporal> = match kind {
            EntityKind::Instant => chrono::DateTime::parse_from_str(text, &self.pattern)
                .ok()
                .map(|dt| Instant::from_millis(dt.timestamp_millis()).into()),
            EntityKind::DateTime => chrono::DateTime::parse_from_str(text, &self.pattern)
                .ok()
                .map(|dt| DateTime::new(dt.timestamp_millis(), Zone::from(*dt.offset())).into()),
            EntityKind::LocalDate => NaiveDate::parse_from_str(text, &self.pattern)
                .ok()
                .map(|d| LocalDate::from_naive(d).into()),
            EntityKind::LocalTime => NaiveTime::parse_from_str(text, &self.pattern)
                .ok()
                .map(|t| LocalTime::from_naive(t).into()),
            EntityKind::LocalDateTime => NaiveDateTime::parse_from_str(text, &self.pattern)
                .ok()
                .map(|dt| LocalDateTime::from_naive(dt).into()),
            other => return Err(Error::unsupported("parse", other.name())),
        };
        parsed.ok_or_else(|| {
            Error::conversion(
                kind.name(),
                format!("\"{}\" with pattern \"{}\"", text, self.pattern),
            )
        })
    }

    fn mismatch(&self, kind: EntityKind) -> Error {
        Error::conversion("String", format!("{} with pattern \"{}\"", kind, self.pattern))
    }
}

impl std::fmt::Display for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}
