//! Calendar-field spans
//!
//! - [`FieldSpan`]: one [`DurationField`] and a signed count
//! - [`Period`]: a [`PeriodType`] and one signed count per field in it
//!
//! Fields outside a period's type are absent, not zero: reading one fails
//! with `FieldNotInPeriodType`.
//!
//! Both print and parse as ISO-8601 periods (`P1Y2M3W4DT5H6M7.008S`).

use crate::calendar;
use crate::duration::Duration;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tempora_core::{DurationField, Error, FieldList, PeriodType, Result};

fn not_in_type(field: DurationField, period_type: PeriodType) -> Error {
    Error::FieldNotInPeriodType {
        field: field.name().to_string(),
        period_type: period_type.name(),
    }
}

fn narrow(field: DurationField, value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::overflow(format!("{} {} exceeds i32", value, field)))
}

// ============================================================================
// FieldSpan
// ============================================================================

/// Span of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSpan {
    unit: DurationField,
    amount: i32,
}

impl FieldSpan {
    /// Create a span
    pub const fn new(unit: DurationField, amount: i32) -> Self {
        FieldSpan { unit, amount }
    }

    /// Years
    pub const fn years(amount: i32) -> Self {
        Self::new(DurationField::Years, amount)
    }

    /// Months
    pub const fn months(amount: i32) -> Self {
        Self::new(DurationField::Months, amount)
    }

    /// Weeks
    pub const fn weeks(amount: i32) -> Self {
        Self::new(DurationField::Weeks, amount)
    }

    /// Days
    pub const fn days(amount: i32) -> Self {
        Self::new(DurationField::Days, amount)
    }

    /// Hours
    pub const fn hours(amount: i32) -> Self {
        Self::new(DurationField::Hours, amount)
    }

    /// Minutes
    pub const fn minutes(amount: i32) -> Self {
        Self::new(DurationField::Minutes, amount)
    }

    /// Seconds
    pub const fn seconds(amount: i32) -> Self {
        Self::new(DurationField::Seconds, amount)
    }

    /// Milliseconds
    pub const fn millis(amount: i32) -> Self {
        Self::new(DurationField::Millis, amount)
    }

    /// Unit of the span
    pub const fn unit(&self) -> DurationField {
        self.unit
    }

    /// Signed count
    pub const fn amount(&self) -> i32 {
        self.amount
    }

    /// Single-field type
    pub const fn period_type(&self) -> PeriodType {
        PeriodType::single(self.unit)
    }

    /// Count of a field
    ///
    /// # Errors
    ///
    /// Returns `FieldNotInPeriodType` for any field but the span's unit.
    pub fn get(&self, field: DurationField) -> Result<i32> {
        if field == self.unit {
            Ok(self.amount)
        } else {
            Err(not_in_type(field, self.period_type()))
        }
    }

    /// Add a count of the same unit
    pub fn plus_amount(&self, amount: i64) -> Result<Self> {
        let sum = (self.amount as i64)
            .checked_add(amount)
            .ok_or_else(|| Error::overflow(format!("{} + {}", self, amount)))?;
        Ok(FieldSpan::new(self.unit, narrow(self.unit, sum)?))
    }

    /// Flip the sign
    pub fn negated(&self) -> Result<Self> {
        self.amount
            .checked_neg()
            .map(|amount| FieldSpan::new(self.unit, amount))
            .ok_or_else(|| Error::overflow(format!("negating {}", self)))
    }

    /// The span with a non-negative count
    pub fn abs(&self) -> Result<Self> {
        if self.amount < 0 {
            self.negated()
        } else {
            Ok(*self)
        }
    }

    /// Widen to a period of the same single field
    pub fn to_period(&self) -> Period {
        let mut values = [0; 8];
        values[self.unit.index()] = self.amount;
        Period {
            period_type: self.period_type(),
            values,
        }
    }

    /// Exact length with standard weeks and days
    pub fn to_standard_duration(&self) -> Result<Duration> {
        Duration::of(self.unit, self.amount as i64)
    }
}

impl std::fmt::Display for FieldSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_period())
    }
}

// ============================================================================
// Period
// ============================================================================

/// Span over a set of fields, each independently signed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Period {
    period_type: PeriodType,
    values: [i32; 8],
}

impl Period {
    /// All-zero period of a type
    pub const fn zero(period_type: PeriodType) -> Self {
        Period {
            period_type,
            values: [0; 8],
        }
    }

    /// Build from field/count pairs; the type is the set of listed fields
    ///
    /// # Errors
    ///
    /// Returns `DuplicateField` if a field is listed twice.
    pub fn new(pairs: &[(DurationField, i32)]) -> Result<Self> {
        let fields: FieldList = pairs.iter().map(|(f, _)| *f).collect();
        let mut period = Period::zero(PeriodType::of(&fields)?);
        for (field, value) in pairs {
            period.values[field.index()] = *value;
        }
        Ok(period)
    }

    /// Split a millisecond count over the precise fields of a type
    ///
    /// Imprecise fields stay zero. A remainder below the smallest field is
    /// dropped.
    pub fn from_standard_millis(millis: i64, period_type: PeriodType) -> Result<Self> {
        let mut period = Period::zero(period_type);
        let mut rest = millis;
        for field in period_type.fields() {
            if let Some(unit_millis) = field.standard_millis() {
                period.values[field.index()] = narrow(field, rest / unit_millis)?;
                rest %= unit_millis;
            }
        }
        Ok(period)
    }

    /// Whole units from `start` to `end` for each field of a type
    ///
    /// Fields are filled largest first, each from the point the larger
    /// ones reached.
    pub fn between(
        start: NaiveDateTime,
        end: NaiveDateTime,
        period_type: PeriodType,
    ) -> Result<Self> {
        let mut period = Period::zero(period_type);
        let mut cursor = start;
        for field in period_type.fields() {
            let count = calendar::units_between(field, cursor, end)?;
            cursor = calendar::add_to_datetime(cursor, field, count)?;
            period.values[field.index()] = narrow(field, count)?;
        }
        Ok(period)
    }

    /// The field set
    pub const fn period_type(&self) -> PeriodType {
        self.period_type
    }

    /// Fields in canonical order
    pub fn fields(&self) -> FieldList {
        self.period_type.fields()
    }

    /// `(field, count)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (DurationField, i32)> + '_ {
        self.period_type
            .fields()
            .into_iter()
            .map(move |f| (f, self.values[f.index()]))
    }

    /// Count of a field
    ///
    /// # Errors
    ///
    /// Returns `FieldNotInPeriodType` if the type excludes the field.
    pub fn get(&self, field: DurationField) -> Result<i32> {
        if self.period_type.contains(field) {
            Ok(self.values[field.index()])
        } else {
            Err(not_in_type(field, self.period_type))
        }
    }

    /// Count of a field, zero when absent
    pub fn value_or_zero(&self, field: DurationField) -> i32 {
        self.values[field.index()]
    }

    /// True when every count is zero
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0)
    }

    /// Copy with a field's count replaced
    ///
    /// # Errors
    ///
    /// Returns `FieldNotInPeriodType` if the type excludes the field.
    pub fn with(&self, field: DurationField, value: i32) -> Result<Self> {
        if !self.period_type.contains(field) {
            return Err(not_in_type(field, self.period_type));
        }
        let mut period = *self;
        period.values[field.index()] = value;
        Ok(period)
    }

    /// Copy with a field's count increased, widening the type if needed
    pub fn with_field_added(&self, field: DurationField, amount: i64) -> Result<Self> {
        let sum = (self.values[field.index()] as i64)
            .checked_add(amount)
            .ok_or_else(|| Error::overflow(format!("adding {} {}", amount, field)))?;
        let mut period = *self;
        period.period_type = self.period_type.with(field);
        period.values[field.index()] = narrow(field, sum)?;
        Ok(period)
    }

    /// Copy with another field set
    ///
    /// # Errors
    ///
    /// Returns `FieldNotInPeriodType` if a dropped field has a non-zero count.
    pub fn with_period_type(&self, period_type: PeriodType) -> Result<Self> {
        let mut period = Period::zero(period_type);
        for (field, value) in self.iter() {
            if period_type.contains(field) {
                period.values[field.index()] = value;
            } else if value != 0 {
                return Err(not_in_type(field, period_type));
            }
        }
        Ok(period)
    }

    /// Field-wise sum over the union of both types
    pub fn plus(&self, other: &Period) -> Result<Self> {
        other
            .iter()
            .try_fold(*self, |acc, (field, value)| acc.with_field_added(field, value as i64))
    }

    /// Union of both types; `other` wins on shared fields
    pub fn merge(&self, other: &Period) -> Self {
        let mut period = *self;
        period.period_type = self.period_type.union(other.period_type);
        for (field, value) in other.iter() {
            period.values[field.index()] = value;
        }
        period
    }

    /// Flip the sign of every field
    pub fn negated(&self) -> Result<Self> {
        let mut period = *self;
        for (field, value) in self.iter() {
            period.values[field.index()] = value
                .checked_neg()
                .ok_or_else(|| Error::overflow(format!("negating {} {}", value, field)))?;
        }
        Ok(period)
    }

    /// Exact length with standard weeks and days
    ///
    /// # Errors
    ///
    /// Returns `ImpreciseConversion` if years or months are non-zero.
    pub fn to_standard_duration(&self) -> Result<Duration> {
        self.iter()
            .filter(|(_, value)| *value != 0)
            .try_fold(Duration::ZERO, |acc, (field, value)| {
                acc.plus(Duration::of(field, value as i64)?)
            })
    }

    /// Carry overflowing fields upward in the standard type
    ///
    /// Weeks through millis are pooled as exact milliseconds and split
    /// again; months are carried into years.
    pub fn normalized_standard(&self) -> Result<Self> {
        let precise = Period {
            period_type: self.period_type,
            values: {
                let mut v = self.values;
                v[DurationField::Years.index()] = 0;
                v[DurationField::Months.index()] = 0;
                v
            },
        }
        .to_standard_duration()?;
        let mut period = Period::from_standard_millis(
            precise.millis(),
            PeriodType::standard()
                .without(DurationField::Years)
                .without(DurationField::Months),
        )?;
        let total_months = self.values[DurationField::Years.index()] as i64 * 12
            + self.values[DurationField::Months.index()] as i64;
        period.period_type = PeriodType::standard();
        period.values[DurationField::Years.index()] =
            narrow(DurationField::Years, total_months / 12)?;
        period.values[DurationField::Months.index()] = (total_months % 12) as i32;
        Ok(period)
    }

    /// Parse an ISO-8601 period such as `P1Y2M` or `PT1.5S`
    ///
    /// The type is the set of designators present; a fractional second
    /// adds the millis field. A second seconds component with a fraction,
    /// as in `PT1S-0.500S`, sets the millis field on its own.
    pub fn parse_iso(text: &str) -> Result<Self> {
        parse_iso(text).ok_or_else(|| Error::conversion("Period", format!("\"{}\"", text)))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = |field: DurationField| self.values[field.index()];
        let mut out = String::from("P");
        for (field, designator) in [
            (DurationField::Years, 'Y'),
            (DurationField::Months, 'M'),
            (DurationField::Weeks, 'W'),
            (DurationField::Days, 'D'),
        ] {
            if v(field) != 0 {
                out.push_str(&format!("{}{}", v(field), designator));
            }
        }
        let mut time = String::new();
        for (field, designator) in [(DurationField::Hours, 'H'), (DurationField::Minutes, 'M')] {
            if v(field) != 0 {
                time.push_str(&format!("{}{}", v(field), designator));
            }
        }
        let (secs, millis) = (v(DurationField::Seconds) as i64, v(DurationField::Millis) as i64);
        let foldable =
            secs == 0 || millis == 0 || (millis.abs() < 1_000 && (secs < 0) == (millis < 0));
        if foldable && (secs != 0 || millis != 0) {
            let total = secs * 1_000 + millis;
            if total % 1_000 == 0 {
                time.push_str(&format!("{}S", total / 1_000));
            } else {
                time.push_str(&decimal_seconds(total));
            }
        } else if !foldable {
            // Seconds first, then millis as a fractional component of their own
            time.push_str(&format!("{}S", secs));
            time.push_str(&decimal_seconds(millis));
        }
        if !time.is_empty() {
            out.push('T');
            out.push_str(&time);
        }
        if out.len() == 1 {
            out.push_str("T0S");
        }
        f.write_str(&out)
    }
}

/// `-1500` as `-1.500S`
fn decimal_seconds(millis: i64) -> String {
    let sign = if millis < 0 { "-" } else { "" };
    let abs = millis.unsigned_abs();
    format!("{}{}.{:03}S", sign, abs / 1_000, abs % 1_000)
}

fn parse_iso(text: &str) -> Option<Period> {
    let trimmed = text.trim();
    let (negate, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let body = body.strip_prefix('P').or_else(|| body.strip_prefix('p'))?;
    let (date_part, time_part) = match body.find(['T', 't']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let mut pairs: Vec<(DurationField, i32)> = Vec::new();
    for (number, designator) in components(date_part)? {
        let field = match designator {
            'Y' => DurationField::Years,
            'M' => DurationField::Months,
            'W' => DurationField::Weeks,
            'D' => DurationField::Days,
            _ => return None,
        };
        pairs.push((field, number.parse().ok()?));
    }
    if let Some(time_part) = time_part {
        let components = components(time_part)?;
        if components.is_empty() {
            return None;
        }
        for (number, designator) in components {
            match designator {
                'H' => pairs.push((DurationField::Hours, number.parse().ok()?)),
                'M' => pairs.push((DurationField::Minutes, number.parse().ok()?)),
                'S' => {
                    let (secs, millis) = parse_seconds(number)?;
                    let seen = |field: DurationField| pairs.iter().any(|(f, _)| *f == field);
                    let (has_secs, has_millis) =
                        (seen(DurationField::Seconds), seen(DurationField::Millis));
                    if !has_secs {
                        pairs.push((DurationField::Seconds, secs));
                        if let Some(millis) = millis {
                            pairs.push((DurationField::Millis, millis));
                        }
                    } else if has_millis {
                        return None;
                    } else {
                        // a second component carries the millis field alone
                        let total = i64::from(secs) * 1_000 + i64::from(millis?);
                        pairs.push((DurationField::Millis, i32::try_from(total).ok()?));
                    }
                }
                _ => return None,
            }
        }
    }
    if pairs.is_empty() {
        return None;
    }
    let period = Period::new(&pairs).ok()?;
    if negate {
        period.negated().ok()
    } else {
        Some(period)
    }
}

/// Split `1Y-2M` into `[("1", 'Y'), ("-2", 'M')]`
fn components(part: &str) -> Option<Vec<(&str, char)>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in part.char_indices() {
        if c.is_ascii_alphabetic() {
            let number = &part[start..i];
            if number.is_empty() || number == "-" {
                return None;
            }
            out.push((number, c.to_ascii_uppercase()));
            start = i + c.len_utf8();
        }
    }
    if start != part.len() {
        return None;
    }
    Some(out)
}

fn parse_seconds(number: &str) -> Option<(i32, Option<i32>)> {
    let (whole, fraction) = match number.split_once(['.', ',']) {
        Some((w, f)) => (w, Some(f)),
        None => (number, None),
    };
    let negative = whole.starts_with('-');
    let secs: i32 = whole.parse().ok()?;
    let millis = match fraction {
        None => None,
        Some(f) if f.is_empty() || f.len() > 9 || !f.bytes().all(|b| b.is_ascii_digit()) => {
            return None;
        }
        Some(f) => {
            let padded = format!("{:0<3}", f);
            let millis: i32 = padded[..3].parse().ok()?;
            Some(if negative { -millis } else { millis })
        }
    };
    Some((secs, millis))
}
