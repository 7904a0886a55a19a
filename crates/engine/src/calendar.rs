//! Calendrical primitives over `chrono`
//!
//! This module is the only place that does calendar math. Everything above
//! it works in terms of:
//!
//! - field rules: get / bounds / set for one [`DateTimeField`] on a
//!   `NaiveDate` or `NaiveTime`
//! - unit arithmetic: add N of a [`DurationField`] to a date, time or
//!   date-time
//! - unit counting: whole units between two date-times
//!
//! Setting `year` or `monthOfYear` clamps the day of month to the length
//! of the target month, so `2012-02-29` with year 2013 is `2013-02-28`.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use tempora_core::{DateTimeField, DurationField, Error, Result};

/// Milliseconds in a standard day
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Lowest year the engine represents
pub fn min_year() -> i32 {
    NaiveDate::MIN.year()
}

/// Highest year the engine represents
pub fn max_year() -> i32 {
    NaiveDate::MAX.year()
}

/// Proleptic Gregorian leap-year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in a month; 0 for an invalid month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days in a year
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// ISO weeks in a week-based year (52 or 53)
pub fn weeks_in_weekyear(weekyear: i32) -> u32 {
    NaiveDate::from_ymd_opt(weekyear, 12, 28)
        .map(|d| d.iso_week().week())
        .unwrap_or(52)
}

/// Build a date, clamping the day to the month's length
pub fn ymd_clamped(year: i64, month: i64, day: u32) -> Option<NaiveDate> {
    let year = i32::try_from(year).ok()?;
    let month = u32::try_from(month).ok()?;
    let day = day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Add calendar months, clamping the day of month
pub fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let total = (date.year() as i64)
        .checked_mul(12)?
        .checked_add(date.month0() as i64)?
        .checked_add(months)?;
    ymd_clamped(total.div_euclid(12), total.rem_euclid(12) + 1, date.day())
}

/// Add days (negative moves backwards)
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Convert epoch milliseconds to a UTC date-time
pub fn naive_from_millis(millis: i64) -> Result<NaiveDateTime> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| Error::overflow(format!("instant {} ms is outside the calendar", millis)))
}

/// Convert a UTC date-time to epoch milliseconds
pub fn millis_from_naive(dt: &NaiveDateTime) -> i64 {
    Utc.from_utc_datetime(dt).timestamp_millis()
}

/// Milliseconds since midnight
pub fn millis_of_day(time: NaiveTime) -> i64 {
    // nanosecond() exceeds 999_999_999 only inside a leap second
    let millis = (time.nanosecond() / 1_000_000).min(999) as i64;
    time.num_seconds_from_midnight() as i64 * 1_000 + millis
}

/// Time of day from milliseconds since midnight
pub fn time_from_millis_of_day(millis: i64) -> Option<NaiveTime> {
    if !(0..MILLIS_PER_DAY).contains(&millis) {
        return None;
    }
    NaiveTime::from_num_seconds_from_midnight_opt(
        (millis / 1_000) as u32,
        ((millis % 1_000) * 1_000_000) as u32,
    )
}

/// Truncate a time to millisecond precision
pub fn truncate_to_millis(time: NaiveTime) -> NaiveTime {
    time_from_millis_of_day(millis_of_day(time)).unwrap_or(time)
}

// ============================================================================
// Unit arithmetic
// ============================================================================

fn unit_overflow(unit: DurationField, amount: i64) -> Error {
    Error::overflow(format!("adding {} {}", amount, unit))
}

/// Add `amount` of `unit` to a date-time
pub fn add_to_datetime(
    dt: NaiveDateTime,
    unit: DurationField,
    amount: i64,
) -> Result<NaiveDateTime> {
    if amount == 0 {
        return Ok(dt);
    }
    if !unit.is_time_unit() {
        return Ok(add_to_date(dt.date(), unit, amount)?.and_time(dt.time()));
    }
    let unit_millis = unit.standard_millis().unwrap_or(1);
    let delta = amount
        .checked_mul(unit_millis)
        .ok_or_else(|| unit_overflow(unit, amount))?;
    let millis = millis_from_naive(&dt)
        .checked_add(delta)
        .ok_or_else(|| unit_overflow(unit, amount))?;
    naive_from_millis(millis)
}

/// Add exact milliseconds to a date-time
pub fn add_millis_to_datetime(dt: NaiveDateTime, millis: i64) -> Result<NaiveDateTime> {
    add_to_datetime(dt, DurationField::Millis, millis)
}

/// Add `amount` of `unit` to a date; time units are ignored
pub fn add_to_date(date: NaiveDate, unit: DurationField, amount: i64) -> Result<NaiveDate> {
    let result = match unit {
        DurationField::Years => amount.checked_mul(12).and_then(|m| add_months(date, m)),
        DurationField::Months => add_months(date, amount),
        DurationField::Weeks => amount.checked_mul(7).and_then(|d| add_days(date, d)),
        DurationField::Days => add_days(date, amount),
        _ => Some(date),
    };
    result.ok_or_else(|| unit_overflow(unit, amount))
}

/// Add `amount` of `unit` to a time of day, wrapping at midnight
///
/// Date units are ignored.
pub fn add_to_time(time: NaiveTime, unit: DurationField, amount: i64) -> NaiveTime {
    if !unit.is_time_unit() {
        return time;
    }
    let unit_millis = unit.standard_millis().unwrap_or(1) as i128;
    let shifted = (millis_of_day(time) as i128 + amount as i128 * unit_millis)
        .rem_euclid(MILLIS_PER_DAY as i128);
    time_from_millis_of_day(shifted as i64).unwrap_or(time)
}

/// Whole units from `start` to `end`, truncated toward zero
pub fn units_between(unit: DurationField, start: NaiveDateTime, end: NaiveDateTime) -> Result<i64> {
    match unit.standard_millis() {
        Some(unit_millis) => {
            let diff = millis_from_naive(&end) - millis_from_naive(&start);
            Ok(diff / unit_millis)
        }
        None => {
            let months = months_between(start, end)?;
            Ok(match unit {
                DurationField::Years => months / 12,
                _ => months,
            })
        }
    }
}

fn months_between(start: NaiveDateTime, end: NaiveDateTime) -> Result<i64> {
    let shift = |n: i64| -> Result<NaiveDateTime> {
        add_months(start.date(), n)
            .map(|d| d.and_time(start.time()))
            .ok_or_else(|| unit_overflow(DurationField::Months, n))
    };
    let mut months = (end.year() as i64 - start.year() as i64) * 12
        + (end.month() as i64 - start.month() as i64);
    if months > 0 && shift(months)? > end {
        months -= 1;
    } else if months < 0 && shift(months)? < end {
        months += 1;
    }
    Ok(months)
}

// ============================================================================
// Field rules
// ============================================================================

/// Accessors for a date field
#[derive(Clone, Copy)]
pub struct DateRule {
    /// Read the field
    pub get: fn(NaiveDate) -> i64,
    /// Lowest legal value given the other fields
    pub min: fn(NaiveDate) -> i64,
    /// Highest legal value given the other fields
    pub max: fn(NaiveDate) -> i64,
    /// Copy with the field set; `None` if the engine rejects the value
    pub set: fn(NaiveDate, i64) -> Option<NaiveDate>,
}

/// Accessors for a time-of-day field
#[derive(Clone, Copy)]
pub struct TimeRule {
    /// Read the field
    pub get: fn(NaiveTime) -> i64,
    /// Lowest legal value
    pub min: i64,
    /// Highest legal value
    pub max: i64,
    /// Copy with the field set; `None` if the engine rejects the value
    pub set: fn(NaiveTime, i64) -> Option<NaiveTime>,
}

/// Rule for one field
#[derive(Clone, Copy)]
pub enum FieldRule {
    /// Field of the calendar date
    Date(&'static DateRule),
    /// Field of the time of day
    Time(&'static TimeRule),
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldRule::Date(_) => f.write_str("FieldRule::Date"),
            FieldRule::Time(_) => f.write_str("FieldRule::Time"),
        }
    }
}

fn year_of_era(date: NaiveDate) -> i64 {
    let year = date.year() as i64;
    if year > 0 {
        year
    } else {
        1 - year
    }
}

fn max_year_of_era(date: NaiveDate) -> i64 {
    if date.year() > 0 {
        max_year() as i64
    } else {
        1 - min_year() as i64
    }
}

fn with_year_of_era(date: NaiveDate, yoe: i64) -> Option<NaiveDate> {
    if yoe < 1 {
        return None;
    }
    let year = if date.year() > 0 { yoe } else { 1 - yoe };
    ymd_clamped(year, date.month() as i64, date.day())
}

fn with_weekday_offset(date: NaiveDate, value: i64) -> Option<NaiveDate> {
    let current = date.weekday().number_from_monday() as i64;
    add_days(date, value - current)
}

static ERA: DateRule = DateRule {
    get: |d| if d.year() > 0 { 1 } else { 0 },
    min: |_| 0,
    max: |_| 1,
    set: |d, v| {
        let current = if d.year() > 0 { 1 } else { 0 };
        if v == current {
            return Some(d);
        }
        let yoe = year_of_era(d);
        let year = if v == 1 { yoe } else { 1 - yoe };
        ymd_clamped(year, d.month() as i64, d.day())
    },
};

static CENTURY_OF_ERA: DateRule = DateRule {
    get: |d| year_of_era(d) / 100,
    min: |_| 0,
    max: |d| max_year_of_era(d) / 100,
    set: |d, v| with_year_of_era(d, v.checked_mul(100)? + year_of_era(d) % 100),
};

static YEAR_OF_ERA: DateRule = DateRule {
    get: year_of_era,
    min: |_| 1,
    max: max_year_of_era,
    set: with_year_of_era,
};

static YEAR: DateRule = DateRule {
    get: |d| d.year() as i64,
    min: |_| min_year() as i64,
    max: |_| max_year() as i64,
    set: |d, v| ymd_clamped(v, d.month() as i64, d.day()),
};

static YEAR_OF_CENTURY: DateRule = DateRule {
    get: |d| year_of_era(d) % 100,
    min: |_| 0,
    max: |_| 99,
    set: |d, v| with_year_of_era(d, (year_of_era(d) / 100) * 100 + v),
};

static WEEKYEAR: DateRule = DateRule {
    get: |d| d.iso_week().year() as i64,
    min: |_| min_year() as i64 + 1,
    max: |_| max_year() as i64 - 1,
    set: |d, v| {
        let weekyear = i32::try_from(v).ok()?;
        let week = d.iso_week().week().min(weeks_in_weekyear(weekyear));
        NaiveDate::from_isoywd_opt(weekyear, week, d.weekday())
    },
};

static MONTH_OF_YEAR: DateRule = DateRule {
    get: |d| d.month() as i64,
    min: |_| 1,
    max: |_| 12,
    set: |d, v| {
        if !(1..=12).contains(&v) {
            return None;
        }
        ymd_clamped(d.year() as i64, v, d.day())
    },
};

static WEEK_OF_WEEKYEAR: DateRule = DateRule {
    get: |d| d.iso_week().week() as i64,
    min: |_| 1,
    max: |d| weeks_in_weekyear(d.iso_week().year()) as i64,
    set: |d, v| {
        NaiveDate::from_isoywd_opt(d.iso_week().year(), u32::try_from(v).ok()?, d.weekday())
    },
};

static DAY_OF_YEAR: DateRule = DateRule {
    get: |d| d.ordinal() as i64,
    min: |_| 1,
    max: |d| days_in_year(d.year()) as i64,
    set: |d, v| d.with_ordinal(u32::try_from(v).ok()?),
};

static DAY_OF_MONTH: DateRule = DateRule {
    get: |d| d.day() as i64,
    min: |_| 1,
    max: |d| days_in_month(d.year(), d.month()) as i64,
    set: |d, v| d.with_day(u32::try_from(v).ok()?),
};

static DAY_OF_WEEK: DateRule = DateRule {
    get: |d| d.weekday().number_from_monday() as i64,
    min: |_| 1,
    max: |_| 7,
    set: with_weekday_offset,
};

static HALFDAY_OF_DAY: TimeRule = TimeRule {
    get: |t| (t.hour() / 12) as i64,
    min: 0,
    max: 1,
    set: |t, v| {
        let hour = (t.hour() % 12) as i64 + v.checked_mul(12)?;
        t.with_hour(u32::try_from(hour).ok()?)
    },
};

static HOUR_OF_HALFDAY: TimeRule = TimeRule {
    get: |t| (t.hour() % 12) as i64,
    min: 0,
    max: 11,
    set: |t, v| {
        let hour = (t.hour() / 12 * 12) as i64 + v;
        t.with_hour(u32::try_from(hour).ok()?)
    },
};

static HOUR_OF_DAY: TimeRule = TimeRule {
    get: |t| t.hour() as i64,
    min: 0,
    max: 23,
    set: |t, v| t.with_hour(u32::try_from(v).ok()?),
};

static MINUTE_OF_DAY: TimeRule = TimeRule {
    get: |t| (t.hour() * 60 + t.minute()) as i64,
    min: 0,
    max: 1_439,
    set: |t, v| time_from_millis_of_day(v.checked_mul(60_000)? + millis_of_day(t) % 60_000),
};

static MINUTE_OF_HOUR: TimeRule = TimeRule {
    get: |t| t.minute() as i64,
    min: 0,
    max: 59,
    set: |t, v| t.with_minute(u32::try_from(v).ok()?),
};

static SECOND_OF_DAY: TimeRule = TimeRule {
    get: |t| t.num_seconds_from_midnight() as i64,
    min: 0,
    max: 86_399,
    set: |t, v| time_from_millis_of_day(v.checked_mul(1_000)? + millis_of_day(t) % 1_000),
};

static SECOND_OF_MINUTE: TimeRule = TimeRule {
    get: |t| t.second() as i64,
    min: 0,
    max: 59,
    set: |t, v| t.with_second(u32::try_from(v).ok()?),
};

static MILLIS_OF_DAY: TimeRule = TimeRule {
    get: millis_of_day,
    min: 0,
    max: MILLIS_PER_DAY - 1,
    set: |_, v| time_from_millis_of_day(v),
};

static MILLIS_OF_SECOND: TimeRule = TimeRule {
    get: |t| millis_of_day(t) % 1_000,
    min: 0,
    max: 999,
    set: |t, v| {
        if !(0..1_000).contains(&v) {
            return None;
        }
        t.with_nanosecond((v * 1_000_000) as u32)
    },
};

/// The rule for a field
pub fn rule(field: DateTimeField) -> FieldRule {
    match field {
        DateTimeField::Era => FieldRule::Date(&ERA),
        DateTimeField::CenturyOfEra => FieldRule::Date(&CENTURY_OF_ERA),
        DateTimeField::YearOfEra => FieldRule::Date(&YEAR_OF_ERA),
        DateTimeField::Year => FieldRule::Date(&YEAR),
        DateTimeField::YearOfCentury => FieldRule::Date(&YEAR_OF_CENTURY),
        DateTimeField::Weekyear => FieldRule::Date(&WEEKYEAR),
        DateTimeField::MonthOfYear => FieldRule::Date(&MONTH_OF_YEAR),
        DateTimeField::WeekOfWeekyear => FieldRule::Date(&WEEK_OF_WEEKYEAR),
        DateTimeField::DayOfYear => FieldRule::Date(&DAY_OF_YEAR),
        DateTimeField::DayOfMonth => FieldRule::Date(&DAY_OF_MONTH),
        DateTimeField::DayOfWeek => FieldRule::Date(&DAY_OF_WEEK),
        DateTimeField::HalfdayOfDay => FieldRule::Time(&HALFDAY_OF_DAY),
        DateTimeField::HourOfHalfday => FieldRule::Time(&HOUR_OF_HALFDAY),
        DateTimeField::HourOfDay => FieldRule::Time(&HOUR_OF_DAY),
        DateTimeField::MinuteOfDay => FieldRule::Time(&MINUTE_OF_DAY),
        DateTimeField::MinuteOfHour => FieldRule::Time(&MINUTE_OF_HOUR),
        DateTimeField::SecondOfDay => FieldRule::Time(&SECOND_OF_DAY),
        DateTimeField::SecondOfMinute => FieldRule::Time(&SECOND_OF_MINUTE),
        DateTimeField::MillisOfDay => FieldRule::Time(&MILLIS_OF_DAY),
        DateTimeField::MillisOfSecond => FieldRule::Time(&MILLIS_OF_SECOND),
    }
}

/// Widest legal range of a field, independent of other fields
pub fn static_bounds(field: DateTimeField) -> (i64, i64) {
    let (min_y, max_y) = (min_year() as i64, max_year() as i64);
    let max_yoe = max_y.max(1 - min_y);
    match field {
        DateTimeField::Era => (0, 1),
        DateTimeField::CenturyOfEra => (0, max_yoe / 100),
        DateTimeField::YearOfEra => (1, max_yoe),
        DateTimeField::Year => (min_y, max_y),
        DateTimeField::YearOfCentury => (0, 99),
        DateTimeField::Weekyear => (min_y + 1, max_y - 1),
        DateTimeField::MonthOfYear => (1, 12),
        DateTimeField::WeekOfWeekyear => (1, 53),
        DateTimeField::DayOfYear => (1, 366),
        DateTimeField::DayOfMonth => (1, 31),
        DateTimeField::DayOfWeek => (1, 7),
        _ => match rule(field) {
            FieldRule::Time(r) => (r.min, r.max),
            FieldRule::Date(_) => (0, 0),
        },
    }
}
