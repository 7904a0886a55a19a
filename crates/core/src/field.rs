//! Field vocabularies
//!
//! Two closed vocabularies name everything the algebra can address:
//!
//! - [`DateTimeField`]: fields of a point in time (`year`, `monthOfYear`, ...)
//! - [`DurationField`]: fields of a span (`years`, `months`, ...)
//!
//! Tokens are parsed once at the boundary where a caller introduces them.
//! Both camelCase (`monthOfYear`) and kebab-case (`month-of-year`) tokens are
//! accepted; `name()` always returns the camelCase form.

use serde::{Deserialize, Serialize};

/// A field of a date, a time, or a date-time
///
/// Variants are declared largest-first, so the derived `Ord` sorts fields the
/// way a generic partial stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DateTimeField {
    /// Era (0 = BCE, 1 = CE)
    Era,
    /// Century within the era
    CenturyOfEra,
    /// Year within the era (always positive)
    YearOfEra,
    /// Proleptic year (may be zero or negative)
    Year,
    /// Year within the century (0-99)
    YearOfCentury,
    /// ISO week-based year
    Weekyear,
    /// Month (1-12)
    MonthOfYear,
    /// ISO week of the week-based year (1-53)
    WeekOfWeekyear,
    /// Day of the year (1-366)
    DayOfYear,
    /// Day of the month (1-31)
    DayOfMonth,
    /// ISO day of week (1 = Monday, 7 = Sunday)
    DayOfWeek,
    /// AM/PM (0 = AM, 1 = PM)
    HalfdayOfDay,
    /// Hour within the half day (0-11)
    HourOfHalfday,
    /// Hour of the day (0-23)
    HourOfDay,
    /// Minute of the day (0-1439)
    MinuteOfDay,
    /// Minute of the hour (0-59)
    MinuteOfHour,
    /// Second of the day (0-86399)
    SecondOfDay,
    /// Second of the minute (0-59)
    SecondOfMinute,
    /// Millisecond of the day
    MillisOfDay,
    /// Millisecond of the second (0-999)
    MillisOfSecond,
}

impl DateTimeField {
    /// Every field, largest first
    pub const ALL: [DateTimeField; 20] = [
        DateTimeField::Era,
        DateTimeField::CenturyOfEra,
        DateTimeField::YearOfEra,
        DateTimeField::Year,
        DateTimeField::YearOfCentury,
        DateTimeField::Weekyear,
        DateTimeField::MonthOfYear,
        DateTimeField::WeekOfWeekyear,
        DateTimeField::DayOfYear,
        DateTimeField::DayOfMonth,
        DateTimeField::DayOfWeek,
        DateTimeField::HalfdayOfDay,
        DateTimeField::HourOfHalfday,
        DateTimeField::HourOfDay,
        DateTimeField::MinuteOfDay,
        DateTimeField::MinuteOfHour,
        DateTimeField::SecondOfDay,
        DateTimeField::SecondOfMinute,
        DateTimeField::MillisOfDay,
        DateTimeField::MillisOfSecond,
    ];

    /// Canonical camelCase token
    pub const fn name(&self) -> &'static str {
        match self {
            DateTimeField::Era => "era",
            DateTimeField::CenturyOfEra => "centuryOfEra",
            DateTimeField::YearOfEra => "yearOfEra",
            DateTimeField::Year => "year",
            DateTimeField::YearOfCentury => "yearOfCentury",
            DateTimeField::Weekyear => "weekyear",
            DateTimeField::MonthOfYear => "monthOfYear",
            DateTimeField::WeekOfWeekyear => "weekOfWeekyear",
            DateTimeField::DayOfYear => "dayOfYear",
            DateTimeField::DayOfMonth => "dayOfMonth",
            DateTimeField::DayOfWeek => "dayOfWeek",
            DateTimeField::HalfdayOfDay => "halfdayOfDay",
            DateTimeField::HourOfHalfday => "hourOfHalfday",
            DateTimeField::HourOfDay => "hourOfDay",
            DateTimeField::MinuteOfDay => "minuteOfDay",
            DateTimeField::MinuteOfHour => "minuteOfHour",
            DateTimeField::SecondOfDay => "secondOfDay",
            DateTimeField::SecondOfMinute => "secondOfMinute",
            DateTimeField::MillisOfDay => "millisOfDay",
            DateTimeField::MillisOfSecond => "millisOfSecond",
        }
    }

    /// Parse a camelCase or kebab-case token
    pub fn from_name(token: &str) -> Option<Self> {
        let normalized = normalize_token(token);
        DateTimeField::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(&normalized))
    }

    /// True for fields of the calendar date
    pub const fn is_date_field(&self) -> bool {
        (*self as u8) <= (DateTimeField::DayOfWeek as u8)
    }

    /// True for fields of the time of day
    pub const fn is_time_field(&self) -> bool {
        !self.is_date_field()
    }

    /// The span unit that advances this field, if any
    ///
    /// Span arithmetic on a generic partial adds a span field to the first
    /// partial field that shares its unit.
    pub const fn duration_unit(&self) -> Option<DurationField> {
        match self {
            DateTimeField::Era | DateTimeField::CenturyOfEra | DateTimeField::HalfdayOfDay => None,
            DateTimeField::YearOfEra
            | DateTimeField::Year
            | DateTimeField::YearOfCentury
            | DateTimeField::Weekyear => Some(DurationField::Years),
            DateTimeField::MonthOfYear => Some(DurationField::Months),
            DateTimeField::WeekOfWeekyear => Some(DurationField::Weeks),
            DateTimeField::DayOfYear | DateTimeField::DayOfMonth | DateTimeField::DayOfWeek => {
                Some(DurationField::Days)
            }
            DateTimeField::HourOfHalfday | DateTimeField::HourOfDay => Some(DurationField::Hours),
            DateTimeField::MinuteOfDay | DateTimeField::MinuteOfHour => {
                Some(DurationField::Minutes)
            }
            DateTimeField::SecondOfDay | DateTimeField::SecondOfMinute => {
                Some(DurationField::Seconds)
            }
            DateTimeField::MillisOfDay | DateTimeField::MillisOfSecond => {
                Some(DurationField::Millis)
            }
        }
    }
}

impl std::fmt::Display for DateTimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A field of a span
///
/// Variants are declared in canonical order; the derived `Ord` and
/// [`DurationField::index`] follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DurationField {
    /// Calendar years
    Years,
    /// Calendar months
    Months,
    /// Weeks (7 standard days)
    Weeks,
    /// Days (24 standard hours)
    Days,
    /// Hours
    Hours,
    /// Minutes
    Minutes,
    /// Seconds
    Seconds,
    /// Milliseconds
    Millis,
}

impl DurationField {
    /// Every span field in canonical order
    pub const ALL: [DurationField; 8] = [
        DurationField::Years,
        DurationField::Months,
        DurationField::Weeks,
        DurationField::Days,
        DurationField::Hours,
        DurationField::Minutes,
        DurationField::Seconds,
        DurationField::Millis,
    ];

    /// Position in canonical order
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Canonical token
    pub const fn name(&self) -> &'static str {
        match self {
            DurationField::Years => "years",
            DurationField::Months => "months",
            DurationField::Weeks => "weeks",
            DurationField::Days => "days",
            DurationField::Hours => "hours",
            DurationField::Minutes => "minutes",
            DurationField::Seconds => "seconds",
            DurationField::Millis => "millis",
        }
    }

    /// Parse a token; singular forms are accepted too
    pub fn from_name(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_lowercase();
        let token = token.strip_prefix(':').unwrap_or(&token);
        DurationField::ALL.iter().copied().find(|f| {
            let name = f.name();
            token == name || token == &name[..name.len() - 1]
        })
    }

    /// Exact length in milliseconds, using standard 24-hour days
    ///
    /// Returns `None` for years and months, whose length depends on where
    /// they are applied.
    pub const fn standard_millis(&self) -> Option<i64> {
        match self {
            DurationField::Years | DurationField::Months => None,
            DurationField::Weeks => Some(7 * 86_400_000),
            DurationField::Days => Some(86_400_000),
            DurationField::Hours => Some(3_600_000),
            DurationField::Minutes => Some(60_000),
            DurationField::Seconds => Some(1_000),
            DurationField::Millis => Some(1),
        }
    }

    /// True when the unit has a fixed length
    pub const fn is_precise(&self) -> bool {
        self.standard_millis().is_some()
    }

    /// True for fields that a time of day can absorb
    pub const fn is_time_unit(&self) -> bool {
        (*self as u8) >= (DurationField::Hours as u8)
    }
}

impl std::fmt::Display for DurationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Strip a leading `:` and convert kebab-case to camelCase
fn normalize_token(token: &str) -> String {
    let token = token.trim();
    let token = token.strip_prefix(':').unwrap_or(token);
    let mut out = String::with_capacity(token.len());
    let mut upper = false;
    for c in token.chars() {
        if c == '-' || c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
