//! Core types for Tempora
//!
//! This crate defines the vocabulary shared by the engine and the algebra:
//! - Error: the single error type and `Result` alias
//! - DateTimeField / DurationField: field vocabularies
//! - EntityKind / Category: the closed set of entity kinds
//! - PeriodType: field-set algebra for spans

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod field;
pub mod kind;
pub mod period_type;

pub use error::{Error, Result};
pub use field::{DateTimeField, DurationField};
pub use kind::{Category, EntityKind};
pub use period_type::{FieldList, PeriodType};
