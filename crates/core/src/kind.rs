//! Entity kind enumeration
//!
//! Every temporal value reports what kind of entity it is. Dispatch in the
//! algebra is a `match` over this closed set, never a runtime type probe.
//!
//! ## Categories
//!
//! | Category | Kinds | Notes |
//! |----------|-------|-------|
//! | InstantLike | Instant, DateTime | absolute point, optionally zoned |
//! | Partial | LocalDate, LocalTime, LocalDateTime, YearMonth, MonthDay, Partial | incomplete field set |
//! | Span | FieldSpan, Period | calendar-field durations |
//! | Duration | Duration | exact milliseconds |
//! | Interval | Interval, PartialInterval | start/end pairs |
//! | Mutable | MutableDateTime | outside the pure algebra |

use serde::{Deserialize, Serialize};

/// The concrete entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// UTC instant
    Instant,
    /// Zoned date-time
    DateTime,
    /// Date without time or zone
    LocalDate,
    /// Time of day without date or zone
    LocalTime,
    /// Date and time without zone
    LocalDateTime,
    /// Year and month
    YearMonth,
    /// Month and day
    MonthDay,
    /// Arbitrary field set
    Partial,
    /// Single-field span
    FieldSpan,
    /// Multi-field span
    Period,
    /// Exact millisecond duration
    Duration,
    /// Interval between two instant-likes
    Interval,
    /// Interval between two partials of one kind
    PartialInterval,
    /// Mutable date-time (escape hatch)
    MutableDateTime,
}

/// Category of an entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Absolute point on the timeline
    InstantLike,
    /// Date/time with an incomplete field set
    Partial,
    /// Calendar-field span
    Span,
    /// Exact millisecond duration
    Duration,
    /// Start/end pair
    Interval,
    /// Mutable entity, never an algebra operand
    Mutable,
}

impl EntityKind {
    /// All kinds the pure algebra accepts
    pub const ALGEBRA: [EntityKind; 13] = [
        EntityKind::Instant,
        EntityKind::DateTime,
        EntityKind::LocalDate,
        EntityKind::LocalTime,
        EntityKind::LocalDateTime,
        EntityKind::YearMonth,
        EntityKind::MonthDay,
        EntityKind::Partial,
        EntityKind::FieldSpan,
        EntityKind::Period,
        EntityKind::Duration,
        EntityKind::Interval,
        EntityKind::PartialInterval,
    ];

    /// Concrete partial kinds with a fixed field set
    pub const CONCRETE_PARTIALS: [EntityKind; 5] = [
        EntityKind::LocalDate,
        EntityKind::LocalTime,
        EntityKind::LocalDateTime,
        EntityKind::YearMonth,
        EntityKind::MonthDay,
    ];

    /// Category this kind belongs to
    pub const fn category(&self) -> Category {
        match self {
            EntityKind::Instant | EntityKind::DateTime => Category::InstantLike,
            EntityKind::LocalDate
            | EntityKind::LocalTime
            | EntityKind::LocalDateTime
            | EntityKind::YearMonth
            | EntityKind::MonthDay
            | EntityKind::Partial => Category::Partial,
            EntityKind::FieldSpan | EntityKind::Period => Category::Span,
            EntityKind::Duration => Category::Duration,
            EntityKind::Interval | EntityKind::PartialInterval => Category::Interval,
            EntityKind::MutableDateTime => Category::Mutable,
        }
    }

    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            EntityKind::Instant => "Instant",
            EntityKind::DateTime => "DateTime",
            EntityKind::LocalDate => "LocalDate",
            EntityKind::LocalTime => "LocalTime",
            EntityKind::LocalDateTime => "LocalDateTime",
            EntityKind::YearMonth => "YearMonth",
            EntityKind::MonthDay => "MonthDay",
            EntityKind::Partial => "Partial",
            EntityKind::FieldSpan => "FieldSpan",
            EntityKind::Period => "Period",
            EntityKind::Duration => "Duration",
            EntityKind::Interval => "Interval",
            EntityKind::PartialInterval => "PartialInterval",
            EntityKind::MutableDateTime => "MutableDateTime",
        }
    }

    /// Short identifier
    pub const fn id(&self) -> &'static str {
        match self {
            EntityKind::Instant => "instant",
            EntityKind::DateTime => "date-time",
            EntityKind::LocalDate => "local-date",
            EntityKind::LocalTime => "local-time",
            EntityKind::LocalDateTime => "local-date-time",
            EntityKind::YearMonth => "year-month",
            EntityKind::MonthDay => "month-day",
            EntityKind::Partial => "partial",
            EntityKind::FieldSpan => "field-span",
            EntityKind::Period => "period",
            EntityKind::Duration => "duration",
            EntityKind::Interval => "interval",
            EntityKind::PartialInterval => "partial-interval",
            EntityKind::MutableDateTime => "mutable-date-time",
        }
    }

    /// Parse from short identifier
    pub fn from_id(id: &str) -> Option<Self> {
        EntityKind::ALGEBRA
            .iter()
            .chain(std::iter::once(&EntityKind::MutableDateTime))
            .copied()
            .find(|k| k.id() == id)
    }

    /// Check if values of this kind may be algebra operands
    pub const fn is_pure(&self) -> bool {
        !matches!(self.category(), Category::Mutable)
    }

    /// Check if this is a partial kind with a fixed field set
    pub const fn is_concrete_partial(&self) -> bool {
        matches!(
            self,
            EntityKind::LocalDate
                | EntityKind::LocalTime
                | EntityKind::LocalDateTime
                | EntityKind::YearMonth
                | EntityKind::MonthDay
        )
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Category {
    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Category::InstantLike => "instant-like",
            Category::Partial => "partial",
            Category::Span => "span",
            Category::Duration => "duration",
            Category::Interval => "interval",
            Category::Mutable => "mutable",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Tests
// ============================================================================
