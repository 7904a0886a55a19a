//! Error types for the temporal algebra
//!
//! Every failure in the algebra is reported synchronously through this one
//! enum. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.

use thiserror::Error;

/// Result type alias for temporal operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the temporal algebra
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Field is not part of the entity kind's vocabulary
    #[error("Field '{field}' is not supported by {kind}")]
    FieldUnsupported {
        /// Field token as supplied by the caller
        field: String,
        /// Entity kind name
        kind: String,
    },

    /// Field value outside its legal bounds
    #[error("Value {value} for field '{field}' must be in the range [{min}, {max}]")]
    FieldValueOutOfRange {
        /// Field name
        field: String,
        /// Rejected value
        value: i64,
        /// Lowest legal value given sibling fields
        min: i64,
        /// Highest legal value given sibling fields
        max: i64,
    },

    /// Extracting a field a span's field set excludes
    #[error("Field '{field}' is not part of period type {period_type}")]
    FieldNotInPeriodType {
        /// Duration field name
        field: String,
        /// Period type description
        period_type: String,
    },

    /// Multi-operand call mixing categories that cannot merge
    #[error("Cannot merge {left} with {right}")]
    IncompatibleMergeOperands {
        /// Kind accumulated so far
        left: String,
        /// Offending operand kind
        right: String,
    },

    /// Partial interval or comparison across different partial kinds
    #[error("Incompatible partial kinds: {left} and {right}")]
    IncompatiblePartialKinds {
        /// First kind
        left: String,
        /// Second kind
        right: String,
    },

    /// Interval whose start would exceed its end
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// Operation not defined for the given operand
    #[error("Unsupported operation '{op}' for {operand}")]
    UnsupportedOperation {
        /// Operation name
        op: String,
        /// Operand kind or description
        operand: String,
    },

    /// Value-conversion facility could not coerce an input
    #[error("Cannot convert {input} to {target}")]
    ConversionFailure {
        /// Target kind name
        target: String,
        /// Short description of the input
        input: String,
    },

    /// Field token listed twice where a set is required
    #[error("Duplicate field '{0}'")]
    DuplicateField(String),

    /// Integer overflow in field or millisecond arithmetic
    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    /// Calendar-variable field converted without a reference point
    #[error("Cannot convert {field} to an exact duration without a reference point")]
    ImpreciseConversion {
        /// Duration field with variable length
        field: String,
    },

    /// Unrecognized time zone identifier
    #[error("Unknown time zone '{0}'")]
    UnknownTimeZone(String),

    /// Unrecognized chronology name
    #[error("Unknown chronology '{0}'")]
    UnknownChronology(String),

    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a `FieldUnsupported` error
    pub fn field_unsupported(field: impl Into<String>, kind: impl Into<String>) -> Self {
        Error::FieldUnsupported {
            field: field.into(),
            kind: kind.into(),
        }
    }

    /// Create a `FieldValueOutOfRange` error
    pub fn out_of_range(field: impl Into<String>, value: i64, min: i64, max: i64) -> Self {
        Error::FieldValueOutOfRange {
            field: field.into(),
            value,
            min,
            max,
        }
    }

    /// Create an `UnsupportedOperation` error
    pub fn unsupported(op: impl Into<String>, operand: impl Into<String>) -> Self {
        Error::UnsupportedOperation {
            op: op.into(),
            operand: operand.into(),
        }
    }

    /// Create a `ConversionFailure` error
    pub fn conversion(target: impl Into<String>, input: impl Into<String>) -> Self {
        Error::ConversionFailure {
            target: target.into(),
            input: input.into(),
        }
    }

    /// Create an `ArithmeticOverflow` error
    pub fn overflow(context: impl Into<String>) -> Self {
        Error::ArithmeticOverflow(context.into())
    }

    /// Check if this error came from a field lookup or field value
    pub fn is_field_error(&self) -> bool {
        matches!(
            self,
            Error::FieldUnsupported { .. }
                | Error::FieldValueOutOfRange { .. }
                | Error::FieldNotInPeriodType { .. }
                | Error::DuplicateField(_)
        )
    }
}
