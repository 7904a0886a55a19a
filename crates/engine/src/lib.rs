//! Temporal engine for Tempora
//!
//! This crate holds every entity kind and the machinery shared by the
//! algebra verbs:
//! - Entities: instants, local partials, the generic partial, spans, intervals
//! - Temporal: the closed sum over all algebra kinds
//! - Field registry: per-(kind, field) accessors with bounds
//! - Converter registry: coercion of interchange values into a kind
//! - Calendar and zone: ISO rules and fixed-offset zones on chrono
//! - Config: default zone and interval ordering, loaded from TOML
//!
//! The engine knows nothing about construction shapes or algebra dispatch;
//! those live in the `tempora` crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calendar;
pub mod config;
pub mod convert;
pub mod duration;
pub mod format;
pub mod instant;
pub mod interval;
pub mod local;
pub mod mutable;
pub mod partial;
pub mod registry;
pub mod span;
pub mod temporal;
pub mod value;
pub mod zone;

pub use config::{EngineConfig, IntervalOrder, ResolvedConfig};
pub use convert::convert;
pub use duration::Duration;
pub use format::Formatter;
pub use instant::{DateTime, Instant};
pub use interval::{compare_partials, Interval, PartialInterval};
pub use local::{LocalDate, LocalDateTime, LocalTime, MonthDay, YearMonth};
pub use mutable::MutableDateTime;
pub use partial::{FieldValues, Partial};
pub use registry::{registry, FieldAccessor, FieldRegistry};
pub use span::{FieldSpan, Period};
pub use temporal::Temporal;
pub use value::{FieldMap, Value};
pub use zone::{Chronology, Zone};
