//! Generic partial: any set of date-time fields
//!
//! A [`Partial`] stores `(field, value)` pairs sorted largest-first, each
//! field at most once. Bounds of day and week fields depend on the sibling
//! fields that are present:
//!
//! - `dayOfMonth` is bounded by `monthOfYear` (and `year` when present;
//!   without a year, February allows 29)
//! - `dayOfYear` is bounded by `year`
//! - `weekOfWeekyear` is bounded by `weekyear`
//!
//! Every other field uses its static range.

use crate::calendar::{self, days_in_month, days_in_year, weeks_in_weekyear};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tempora_core::{DateTimeField, DurationField, Error, Result};

/// Field/value pairs, largest field first
pub type FieldValues = SmallVec<[(DateTimeField, i64); 8]>;

/// Date-time with an arbitrary field set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Partial {
    fields: FieldValues,
}

impl Partial {
    /// Partial with no fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pairs in any order
    ///
    /// # Errors
    ///
    /// - `DuplicateField` if a field appears twice
    /// - `FieldValueOutOfRange` if a value is outside its bounds
    pub fn from_fields<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (DateTimeField, i64)>,
    {
        let mut fields: FieldValues = SmallVec::new();
        for (field, value) in pairs {
            match fields.binary_search_by_key(&field, |(f, _)| *f) {
                Ok(_) => return Err(Error::DuplicateField(field.name().to_string())),
                Err(pos) => fields.insert(pos, (field, value)),
            }
        }
        let partial = Partial { fields };
        partial.validate()?;
        Ok(partial)
    }

    /// Number of fields
    pub fn size(&self) -> usize {
        self.fields.len()
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Pairs, largest field first
    pub fn pairs(&self) -> &[(DateTimeField, i64)] {
        &self.fields
    }

    /// Fields, largest first
    pub fn fields(&self) -> impl Iterator<Item = DateTimeField> + '_ {
        self.fields.iter().map(|(f, _)| *f)
    }

    /// True if the field is set
    pub fn contains(&self, field: DateTimeField) -> bool {
        self.get(field).is_some()
    }

    /// Value of a field, if set
    pub fn get(&self, field: DateTimeField) -> Option<i64> {
        self.fields
            .binary_search_by_key(&field, |(f, _)| *f)
            .ok()
            .map(|i| self.fields[i].1)
    }

    /// Legal range of a field given the sibling fields
    pub fn bounds(&self, field: DateTimeField) -> (i64, i64) {
        sibling_bounds(&self.fields, field)
    }

    /// Check every field against its bounds, largest first
    pub fn validate(&self) -> Result<()> {
        for (field, value) in &self.fields {
            let (min, max) = self.bounds(*field);
            if *value < min || *value > max {
                return Err(Error::out_of_range(field.name(), *value, min, max));
            }
        }
        Ok(())
    }

    /// Copy with a field set, adding it if absent
    ///
    /// # Errors
    ///
    /// Returns `FieldValueOutOfRange` if the value, or a sibling it
    /// constrains, falls outside its bounds.
    pub fn with(&self, field: DateTimeField, value: i64) -> Result<Self> {
        let mut fields = self.fields.clone();
        match fields.binary_search_by_key(&field, |(f, _)| *f) {
            Ok(i) => fields[i].1 = value,
            Err(pos) => fields.insert(pos, (field, value)),
        }
        let partial = Partial { fields };
        let (min, max) = partial.bounds(field);
        if value < min || value > max {
            return Err(Error::out_of_range(field.name(), value, min, max));
        }
        partial.validate()?;
        Ok(partial)
    }

    /// Copy without a field
    pub fn without(&self, field: DateTimeField) -> Self {
        let fields = self.fields.iter().filter(|(f, _)| *f != field).copied().collect();
        Partial { fields }
    }

    /// Add `amount` to the field at `index`, wrapping within its bounds
    fn wrapped(&self, index: usize, amount: i64) -> Result<Self> {
        let (field, value) = self.fields[index];
        let (min, max) = self.bounds(field);
        let range = max - min + 1;
        let shifted = value
            .checked_sub(min)
            .and_then(|v| v.checked_add(amount.rem_euclid(range)))
            .ok_or_else(|| Error::overflow(format!("adding {} to {}", amount, field)))?;
        self.with(field, min + shifted.rem_euclid(range))
    }

    /// Add a value to one field, wrapping within its bounds
    ///
    /// # Errors
    ///
    /// Returns `FieldUnsupported` if the field is not set.
    pub fn add_wrap_field(&self, field: DateTimeField, amount: i64) -> Result<Self> {
        let index = self
            .fields
            .binary_search_by_key(&field, |(f, _)| *f)
            .map_err(|_| Error::field_unsupported(field.name(), "Partial"))?;
        self.wrapped(index, amount)
    }

    /// Add a span unit to every field it advances
    ///
    /// Overflow carries into the next larger field that is present, the way
    /// a full date carries December into January of the next year. With no
    /// such field the value wraps within its bounds. A day-of-month left
    /// past the end of its month by a carry is clamped. A unit no field
    /// shares is ignored.
    pub fn plus_unit(&self, unit: DurationField, amount: i64) -> Result<Self> {
        if amount == 0 {
            return Ok(self.clone());
        }
        let targets: SmallVec<[DateTimeField; 4]> = self
            .fields()
            .filter(|f| f.duration_unit() == Some(unit))
            .collect();
        if targets.is_empty() {
            return Ok(self.clone());
        }
        let mut fields = self.fields.clone();
        for field in targets {
            add_carrying(&mut fields, field, amount)?;
        }
        clamp_day_fields(&mut fields);
        let partial = Partial { fields };
        partial.validate()?;
        Ok(partial)
    }
}

/// Bounds of `field` given the other pairs
fn sibling_bounds(fields: &[(DateTimeField, i64)], field: DateTimeField) -> (i64, i64) {
    let get = |f: DateTimeField| {
        fields
            .binary_search_by_key(&f, |(g, _)| *g)
            .ok()
            .map(|i| fields[i].1)
    };
    let (min, max) = calendar::static_bounds(field);
    let year = |f| get(f).and_then(|y| i32::try_from(y).ok());
    let max = match field {
        DateTimeField::DayOfMonth => {
            let month = get(DateTimeField::MonthOfYear).and_then(|m| u32::try_from(m).ok());
            match month {
                Some(month) => {
                    let y = year(DateTimeField::Year).unwrap_or(crate::local::MONTH_DAY_YEAR);
                    days_in_month(y, month) as i64
                }
                None => max,
            }
        }
        DateTimeField::DayOfYear => {
            year(DateTimeField::Year).map_or(max, |y| days_in_year(y) as i64)
        }
        DateTimeField::WeekOfWeekyear => {
            year(DateTimeField::Weekyear).map_or(max, |y| weeks_in_weekyear(y) as i64)
        }
        _ => max,
    };
    (min, max)
}

/// Fields whose bounds move with a larger sibling
fn has_variable_bounds(field: DateTimeField) -> bool {
    matches!(
        field,
        DateTimeField::DayOfMonth | DateTimeField::DayOfYear | DateTimeField::WeekOfWeekyear
    )
}

/// Larger fields that absorb the overflow of `field`, in preference order
fn carry_targets(field: DateTimeField) -> &'static [DateTimeField] {
    use DateTimeField::*;
    match field {
        MonthOfYear | DayOfYear => &[Year],
        DayOfMonth => &[MonthOfYear],
        DayOfWeek => &[WeekOfWeekyear],
        WeekOfWeekyear => &[Weekyear],
        YearOfCentury => &[CenturyOfEra],
        HourOfDay | MinuteOfDay | SecondOfDay | MillisOfDay => &[DayOfMonth, DayOfYear, DayOfWeek],
        MinuteOfHour => &[HourOfDay],
        SecondOfMinute => &[MinuteOfHour],
        MillisOfSecond => &[SecondOfMinute],
        _ => &[],
    }
}

fn position(fields: &[(DateTimeField, i64)], field: DateTimeField) -> Option<usize> {
    fields.binary_search_by_key(&field, |(f, _)| *f).ok()
}

/// Add `amount` to `field`, carrying into its parent field when present
fn add_carrying(fields: &mut FieldValues, field: DateTimeField, amount: i64) -> Result<()> {
    let overflow = || Error::overflow(format!("adding {} to {}", amount, field));
    let index = position(fields, field)
        .ok_or_else(|| Error::field_unsupported(field.name(), "Partial"))?;
    let parent = carry_targets(field)
        .iter()
        .copied()
        .find(|f| position(fields, *f).is_some());

    let Some(parent) = parent else {
        let (min, max) = sibling_bounds(fields, field);
        let range = max - min + 1;
        let shifted = fields[index]
            .1
            .checked_sub(min)
            .and_then(|v| v.checked_add(amount.rem_euclid(range)))
            .ok_or_else(overflow)?;
        fields[index].1 = min + shifted.rem_euclid(range);
        return Ok(());
    };

    if has_variable_bounds(field) {
        // Step one parent unit at a time; each step may change the range.
        let mut value = fields[index].1.checked_add(amount).ok_or_else(overflow)?;
        loop {
            let (min, max) = sibling_bounds(fields, field);
            if value > max {
                value -= max - min + 1;
                add_carrying(fields, parent, 1)?;
            } else if value < min {
                add_carrying(fields, parent, -1)?;
                let (min, max) = sibling_bounds(fields, field);
                value += max - min + 1;
            } else {
                break;
            }
        }
        fields[index].1 = value;
        return Ok(());
    }

    let (min, max) = sibling_bounds(fields, field);
    let range = max - min + 1;
    let total = fields[index]
        .1
        .checked_sub(min)
        .and_then(|v| v.checked_add(amount))
        .ok_or_else(overflow)?;
    fields[index].1 = min + total.rem_euclid(range);
    match total.div_euclid(range) {
        0 => Ok(()),
        carry => add_carrying(fields, parent, carry),
    }
}

/// Pull day and week fields back inside bounds after a larger field moved
fn clamp_day_fields(fields: &mut FieldValues) {
    for i in 0..fields.len() {
        let field = fields[i].0;
        if has_variable_bounds(field) {
            let (_, max) = sibling_bounds(fields, field);
            if fields[i].1 > max {
                fields[i].1 = max;
            }
        }
    }
}

impl std::fmt::Display for Partial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs: Vec<String> = self
            .fields
            .iter()
            .map(|(field, value)| format!("{}={}", field, value))
            .collect();
        write!(f, "Partial[{}]", pairs.join(", "))
    }
}
