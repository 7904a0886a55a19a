//! Period types: the field set of a span
//!
//! A `PeriodType` is a set of [`DurationField`]s stored as a bitmask indexed
//! by canonical position. Storage is therefore always in canonical order
//! (years, months, weeks, days, hours, minutes, seconds, millis) no matter
//! how the set was built, and union is a single `|`.
//!
//! ```
//! use tempora_core::{DurationField, PeriodType};
//!
//! let a = PeriodType::of(&[DurationField::Days, DurationField::Years]).unwrap();
//! let b = PeriodType::single(DurationField::Months);
//! assert_eq!(
//!     a.union(b).fields().as_slice(),
//!     &[DurationField::Years, DurationField::Months, DurationField::Days]
//! );
//! ```

use crate::error::{Error, Result};
use crate::field::DurationField;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Canonically ordered list of span fields
pub type FieldList = SmallVec<[DurationField; 8]>;

/// Set of span fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PeriodType(u8);

impl PeriodType {
    /// No fields
    pub const EMPTY: PeriodType = PeriodType(0);

    /// All eight fields
    pub const STANDARD: PeriodType = PeriodType(0xFF);

    /// All eight fields
    pub const fn standard() -> Self {
        Self::STANDARD
    }

    /// Years, months, days and the time fields (no weeks)
    pub const fn year_month_day_time() -> Self {
        PeriodType(0xFF & !(1 << DurationField::Weeks.index()))
    }

    /// Hours, minutes, seconds and millis
    pub const fn time() -> Self {
        PeriodType(0xF0)
    }

    /// A single field
    pub const fn single(field: DurationField) -> Self {
        PeriodType(1 << field.index())
    }

    /// Build from an explicit field list
    ///
    /// The list may be in any order; it is stored canonically.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateField` if a field is listed twice.
    pub fn of(fields: &[DurationField]) -> Result<Self> {
        let mut mask = 0u8;
        for field in fields {
            let bit = 1 << field.index();
            if mask & bit != 0 {
                return Err(Error::DuplicateField(field.name().to_string()));
            }
            mask |= bit;
        }
        Ok(PeriodType(mask))
    }

    /// Build from field-name tokens
    ///
    /// # Errors
    ///
    /// Returns `FieldUnsupported` for an unknown token and `DuplicateField`
    /// for a repeated one.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let fields = names
            .iter()
            .map(|name| {
                DurationField::from_name(name.as_ref())
                    .ok_or_else(|| Error::field_unsupported(name.as_ref(), "PeriodType"))
            })
            .collect::<Result<FieldList>>()?;
        Self::of(&fields)
    }

    /// Check if the field is in this type
    #[inline]
    pub const fn contains(&self, field: DurationField) -> bool {
        self.0 & (1 << field.index()) != 0
    }

    /// Union of two types
    #[inline]
    pub const fn union(self, other: PeriodType) -> PeriodType {
        PeriodType(self.0 | other.0)
    }

    /// This type with one more field
    #[inline]
    pub const fn with(self, field: DurationField) -> PeriodType {
        PeriodType(self.0 | (1 << field.index()))
    }

    /// This type without a field
    #[inline]
    pub const fn without(self, field: DurationField) -> PeriodType {
        PeriodType(self.0 & !(1 << field.index()))
    }

    /// Check if every field of `other` is in this type
    #[inline]
    pub const fn is_superset_of(&self, other: PeriodType) -> bool {
        self.0 & other.0 == other.0
    }

    /// Number of fields
    #[inline]
    pub const fn size(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Check if no field is present
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Fields in canonical order
    pub fn fields(&self) -> FieldList {
        DurationField::ALL
            .iter()
            .copied()
            .filter(|f| self.contains(*f))
            .collect()
    }

    /// Position of a field within this type's field list
    pub fn index_of(&self, field: DurationField) -> Option<usize> {
        if !self.contains(field) {
            return None;
        }
        let below = (1u16 << field.index()) - 1;
        Some((self.0 as u16 & below).count_ones() as usize)
    }

    /// True when every field has a fixed length
    pub fn is_precise(&self) -> bool {
        !self.contains(DurationField::Years) && !self.contains(DurationField::Months)
    }

    /// Descriptive name, e.g. `"Standard"` or `"PeriodType[Years, Days]"`
    pub fn name(&self) -> String {
        if *self == Self::STANDARD {
            return "Standard".to_string();
        }
        if *self == Self::year_month_day_time() {
            return "YearMonthDayTime".to_string();
        }
        if *self == Self::time() {
            return "Time".to_string();
        }
        let names: Vec<String> = self
            .fields()
            .iter()
            .map(|f| {
                let name = f.name();
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect();
        format!("PeriodType[{}]", names.join(", "))
    }
}

impl std::ops::BitOr for PeriodType {
    type Output = PeriodType;

    fn bitor(self, rhs: PeriodType) -> PeriodType {
        self.union(rhs)
    }
}

impl std::fmt::Display for PeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
