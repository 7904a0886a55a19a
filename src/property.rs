//! Property view
//!
//! A [`Property`] binds one field accessor to one value. It reads the
//! field, its bounds given the value's other fields, and produces copies
//! with the field changed. The value itself is never modified.

use tempora_core::{DateTimeField, Error, Result};
use tempora_engine::registry::{declared_fields, registry};
use tempora_engine::{FieldAccessor, Temporal};

/// One field of one value
#[derive(Debug, Clone, Copy)]
pub struct Property<'a> {
    value: &'a Temporal,
    accessor: FieldAccessor,
}

/// Property for a field of a value
///
/// # Errors
///
/// Returns `FieldUnsupported` if the value's kind does not declare the
/// field.
pub fn property(value: &Temporal, field: DateTimeField) -> Result<Property<'_>> {
    Ok(Property {
        value,
        accessor: registry().resolve(value.kind(), field)?,
    })
}

/// Property for a field token, camelCase or kebab-case
pub fn property_named<'a>(value: &'a Temporal, token: &str) -> Result<Property<'a>> {
    Ok(Property {
        value,
        accessor: registry().resolve_name(value.kind(), token)?,
    })
}

/// A property for every field the value carries, keyed by field name
///
/// Date-time kinds report their declared fields; the generic partial
/// reports its own. Spans, durations and intervals have none.
pub fn properties(value: &Temporal) -> Properties<'_> {
    let fields: Vec<DateTimeField> = match value {
        Temporal::Partial(p) => p.fields().collect(),
        other => declared_fields(other.kind()).to_vec(),
    };
    let entries = fields
        .into_iter()
        .filter_map(|field| property(value, field).ok())
        .collect();
    Properties { entries }
}

/// Property views of one value, in declared field order
#[derive(Debug, Clone)]
pub struct Properties<'a> {
    entries: Vec<Property<'a>>,
}

impl<'a> Properties<'a> {
    /// View for a field token, camelCase or kebab-case
    pub fn get(&self, name: &str) -> Option<&Property<'a>> {
        let field = DateTimeField::from_name(name)?;
        self.get_field(field)
    }

    /// View for a field
    pub fn get_field(&self, field: DateTimeField) -> Option<&Property<'a>> {
        self.entries.iter().find(|p| p.field() == field)
    }

    /// True if the field has a view
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names, in order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|p| p.name())
    }

    /// Views, in order
    pub fn iter(&self) -> std::slice::Iter<'_, Property<'a>> {
        self.entries.iter()
    }

    /// Number of views
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the value has no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, 'p> IntoIterator for &'p Properties<'a> {
    type Item = &'p Property<'a>;
    type IntoIter = std::slice::Iter<'p, Property<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for Properties<'a> {
    type Item = Property<'a>;
    type IntoIter = std::vec::IntoIter<Property<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> Property<'a> {
    /// The field
    pub fn field(&self) -> DateTimeField {
        self.accessor.field()
    }

    /// Field name
    pub fn name(&self) -> &'static str {
        self.accessor.field().name()
    }

    /// The value this property reads
    pub fn entity(&self) -> &'a Temporal {
        self.value
    }

    /// Current field value
    pub fn value(&self) -> Result<i64> {
        self.accessor.get(self.value)
    }

    /// Lowest legal value
    pub fn min_value(&self) -> Result<i64> {
        Ok(self.accessor.bounds(self.value)?.0)
    }

    /// Highest legal value
    pub fn max_value(&self) -> Result<i64> {
        Ok(self.accessor.bounds(self.value)?.1)
    }

    /// Copy of the value with the field set
    ///
    /// # Errors
    ///
    /// Returns `FieldValueOutOfRange` outside `[min_value, max_value]`.
    pub fn with_value(&self, new_value: i64) -> Result<Temporal> {
        self.accessor.set(self.value, new_value)
    }

    /// Copy with the field at its minimum
    pub fn with_min_value(&self) -> Result<Temporal> {
        self.with_value(self.min_value()?)
    }

    /// Copy with the field at its maximum
    pub fn with_max_value(&self) -> Result<Temporal> {
        self.with_value(self.max_value()?)
    }

    /// Copy with `amount` added, wrapping within the field's bounds
    ///
    /// Larger fields are left alone: adding one month to December gives
    /// January of the same year.
    pub fn add_wrap(&self, amount: i64) -> Result<Temporal> {
        let (min, max) = self.accessor.bounds(self.value)?;
        let current = self.value()?;
        let range = max - min + 1;
        let offset = (current - min)
            .checked_add(amount.rem_euclid(range))
            .ok_or_else(|| Error::overflow(format!("{} + {}", self.name(), amount)))?;
        self.with_value(min + offset.rem_euclid(range))
    }
}

impl std::fmt::Display for Property<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Property[{} of {}]", self.name(), self.value)
    }
}
