//! Concrete partial kinds
//!
//! Each kind wraps one `chrono` value and fixes which fields it carries:
//!
//! | Kind | Storage | Fields |
//! |------|---------|--------|
//! | [`LocalDate`] | `NaiveDate` | date fields |
//! | [`LocalTime`] | `NaiveTime` (ms precision) | time fields |
//! | [`LocalDateTime`] | `NaiveDateTime` (ms precision) | both |
//! | [`YearMonth`] | `NaiveDate`, day pinned to 1 | year, monthOfYear |
//! | [`MonthDay`] | `NaiveDate`, year pinned to 2000 | monthOfYear, dayOfMonth |
//!
//! Pinning `MonthDay` to a leap year lets February 29 through.

use crate::calendar::{self, days_in_month, MILLIS_PER_DAY};
use crate::zone::Zone;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tempora_core::{DateTimeField, DurationField, EntityKind, Error, Result};

/// Leap year every `MonthDay` lives in
pub const MONTH_DAY_YEAR: i32 = 2000;

fn check(field: DateTimeField, value: i64, min: i64, max: i64) -> Result<()> {
    if value < min || value > max {
        return Err(Error::out_of_range(field.name(), value, min, max));
    }
    Ok(())
}

fn checked_date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    check(DateTimeField::MonthOfYear, month as i64, 1, 12)?;
    check(
        DateTimeField::DayOfMonth,
        day as i64,
        1,
        days_in_month(year, month) as i64,
    )?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        Error::out_of_range(
            DateTimeField::Year.name(),
            year as i64,
            calendar::min_year() as i64,
            calendar::max_year() as i64,
        )
    })
}

fn checked_time(hour: u32, minute: u32, second: u32, millis: u32) -> Result<NaiveTime> {
    check(DateTimeField::HourOfDay, hour as i64, 0, 23)?;
    check(DateTimeField::MinuteOfHour, minute as i64, 0, 59)?;
    check(DateTimeField::SecondOfMinute, second as i64, 0, 59)?;
    check(DateTimeField::MillisOfSecond, millis as i64, 0, 999)?;
    NaiveTime::from_hms_milli_opt(hour, minute, second, millis)
        .ok_or_else(|| Error::out_of_range(DateTimeField::HourOfDay.name(), hour as i64, 0, 23))
}

fn duration_rejected(kind: EntityKind) -> Error {
    Error::unsupported("plus duration", kind.name())
}

// ============================================================================
// LocalDate
// ============================================================================

/// Calendar date without time or zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct LocalDate(NaiveDate);

impl LocalDate {
    /// Create from year, month and day
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        checked_date(year, month, day).map(LocalDate)
    }

    /// Wrap an engine date
    pub const fn from_naive(date: NaiveDate) -> Self {
        LocalDate(date)
    }

    /// Date of an instant in a zone
    pub fn from_instant(millis: i64, zone: Zone) -> Result<Self> {
        Ok(LocalDate(zone.local(millis)?.date()))
    }

    /// The engine date
    pub const fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Year
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of year (1-12)
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Midnight at the start of this date
    pub fn at_start_of_day(&self) -> LocalDateTime {
        LocalDateTime(self.0.and_time(NaiveTime::MIN))
    }

    /// Add a calendar unit; time units are ignored
    pub fn plus_unit(&self, unit: DurationField, amount: i64) -> Result<Self> {
        calendar::add_to_date(self.0, unit, amount).map(LocalDate)
    }

    /// Add whole standard days of a millisecond amount
    pub fn plus_millis(&self, millis: i64) -> Result<Self> {
        self.plus_unit(DurationField::Days, millis / MILLIS_PER_DAY)
    }
}

impl std::fmt::Display for LocalDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

// ============================================================================
// LocalTime
// ============================================================================

/// Time of day without date or zone, to the millisecond
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct LocalTime(NaiveTime);

impl LocalTime {
    /// Midnight
    pub const MIDNIGHT: LocalTime = LocalTime(NaiveTime::MIN);

    /// Create from hour, minute, second and millisecond
    pub fn new(hour: u32, minute: u32, second: u32, millis: u32) -> Result<Self> {
        checked_time(hour, minute, second, millis).map(LocalTime)
    }

    /// Wrap an engine time, truncated to milliseconds
    pub fn from_naive(time: NaiveTime) -> Self {
        LocalTime(calendar::truncate_to_millis(time))
    }

    /// Time of an instant in a zone
    pub fn from_instant(millis: i64, zone: Zone) -> Result<Self> {
        Ok(LocalTime::from_naive(zone.local(millis)?.time()))
    }

    /// The engine time
    pub const fn naive(&self) -> NaiveTime {
        self.0
    }

    /// Milliseconds since midnight
    pub fn millis_of_day(&self) -> i64 {
        calendar::millis_of_day(self.0)
    }

    /// Add a time unit, wrapping at midnight; date units are ignored
    pub fn plus_unit(&self, unit: DurationField, amount: i64) -> Result<Self> {
        Ok(LocalTime(calendar::add_to_time(self.0, unit, amount)))
    }

    /// Add milliseconds, wrapping at midnight
    pub fn plus_millis(&self, millis: i64) -> Result<Self> {
        self.plus_unit(DurationField::Millis, millis)
    }
}

impl std::fmt::Display for LocalTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S%.3f"))
    }
}

// ============================================================================
// LocalDateTime
// ============================================================================

/// Date and time without zone, to the millisecond
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct LocalDateTime(NaiveDateTime);

impl LocalDateTime {
    /// Combine a date and a time
    pub fn new(date: LocalDate, time: LocalTime) -> Self {
        LocalDateTime(date.naive().and_time(time.naive()))
    }

    /// Wrap an engine date-time, truncated to milliseconds
    pub fn from_naive(dt: NaiveDateTime) -> Self {
        LocalDateTime(dt.date().and_time(calendar::truncate_to_millis(dt.time())))
    }

    /// Local date-time of an instant in a zone
    pub fn from_instant(millis: i64, zone: Zone) -> Result<Self> {
        Ok(LocalDateTime::from_naive(zone.local(millis)?))
    }

    /// The engine date-time
    pub const fn naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Date part
    pub fn date(&self) -> LocalDate {
        LocalDate(self.0.date())
    }

    /// Time part
    pub fn time(&self) -> LocalTime {
        LocalTime(self.0.time())
    }

    /// Add a calendar unit
    pub fn plus_unit(&self, unit: DurationField, amount: i64) -> Result<Self> {
        calendar::add_to_datetime(self.0, unit, amount).map(LocalDateTime)
    }

    /// Add exact milliseconds
    pub fn plus_millis(&self, millis: i64) -> Result<Self> {
        calendar::add_millis_to_datetime(self.0, millis).map(LocalDateTime)
    }
}

impl std::fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

// ============================================================================
// YearMonth
// ============================================================================

/// Year and month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// Create from year and month
    pub fn new(year: i32, month: u32) -> Result<Self> {
        checked_date(year, month, 1).map(YearMonth)
    }

    /// The year and month of an engine date
    pub fn from_naive(date: NaiveDate) -> Self {
        YearMonth(date.with_day(1).unwrap_or(date))
    }

    /// Year and month of an instant in a zone
    pub fn from_instant(millis: i64, zone: Zone) -> Result<Self> {
        Ok(YearMonth::from_naive(zone.local(millis)?.date()))
    }

    /// First day of the month
    pub const fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Year
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of year (1-12)
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Add years or months; other units are ignored
    pub fn plus_unit(&self, unit: DurationField, amount: i64) -> Result<Self> {
        match unit {
            DurationField::Years | DurationField::Months => {
                calendar::add_to_date(self.0, unit, amount).map(YearMonth)
            }
            _ => Ok(*self),
        }
    }

    /// Durations have no month equivalent
    pub fn plus_millis(&self, _millis: i64) -> Result<Self> {
        Err(duration_rejected(EntityKind::YearMonth))
    }
}

impl Default for YearMonth {
    fn default() -> Self {
        YearMonth::from_naive(NaiveDate::default())
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

// ============================================================================
// MonthDay
// ============================================================================

/// Month and day, validated against a leap year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthDay(NaiveDate);

impl MonthDay {
    /// Create from month and day
    pub fn new(month: u32, day: u32) -> Result<Self> {
        checked_date(MONTH_DAY_YEAR, month, day).map(MonthDay)
    }

    /// The month and day of an engine date
    pub fn from_naive(date: NaiveDate) -> Self {
        let pinned = calendar::ymd_clamped(MONTH_DAY_YEAR as i64, date.month() as i64, date.day());
        MonthDay(pinned.unwrap_or(date))
    }

    /// Month and day of an instant in a zone
    pub fn from_instant(millis: i64, zone: Zone) -> Result<Self> {
        Ok(MonthDay::from_naive(zone.local(millis)?.date()))
    }

    /// The date in the pinned leap year
    pub const fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Month of year (1-12)
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Add months, weeks or days, cycling through the leap year
    ///
    /// Years and time units are ignored. Months clamp the day.
    pub fn plus_unit(&self, unit: DurationField, amount: i64) -> Result<Self> {
        let days = match unit {
            DurationField::Months => {
                let month0 = (self.0.month0() as i64 + amount).rem_euclid(12);
                let date = calendar::ymd_clamped(MONTH_DAY_YEAR as i64, month0 + 1, self.0.day());
                return date
                    .map(MonthDay)
                    .ok_or_else(|| Error::overflow(format!("adding {} months", amount)));
            }
            DurationField::Weeks => amount
                .checked_mul(7)
                .ok_or_else(|| Error::overflow(format!("adding {} weeks", amount)))?,
            DurationField::Days => amount,
            _ => return Ok(*self),
        };
        let year_days = calendar::days_in_year(MONTH_DAY_YEAR) as i64;
        let ordinal = (self.0.ordinal0() as i64 + days).rem_euclid(year_days) + 1;
        self.0
            .with_ordinal(ordinal as u32)
            .map(MonthDay)
            .ok_or_else(|| Error::overflow(format!("adding {} days", days)))
    }

    /// Durations have no day-cycle equivalent
    pub fn plus_millis(&self, _millis: i64) -> Result<Self> {
        Err(duration_rejected(EntityKind::MonthDay))
    }
}

impl Default for MonthDay {
    fn default() -> Self {
        MonthDay::from_naive(NaiveDate::default())
    }
}

impl std::fmt::Display for MonthDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("--%m-%d"))
    }
}
