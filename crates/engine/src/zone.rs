//! Time zone and chronology identity
//!
//! Zones are fixed UTC offsets. Identifiers are resolved once by name:
//!
//! - `UTC`, `Z`, `GMT`, `UT`, `Etc/UTC`, `Etc/GMT` → UTC
//! - `+05:30`, `-0800`, `+09` → fixed offset
//! - `UTC+3`, `GMT-04:00` → fixed offset with a prefix
//!
//! Region identifiers (`Europe/Paris`) need a tz database and are rejected
//! with `UnknownTimeZone`.

use crate::calendar::{millis_from_naive, naive_from_millis};
use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};
use serde::{Deserialize, Serialize};
use tempora_core::{Error, Result};

/// Largest supported offset magnitude in seconds (18 hours)
pub const MAX_OFFSET_SECONDS: i32 = 18 * 3_600;

const UTC_ALIASES: [&str; 6] = ["utc", "z", "gmt", "ut", "etc/utc", "etc/gmt"];

/// Fixed-offset time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Zone {
    offset_seconds: i32,
}

impl Zone {
    /// UTC
    pub const UTC: Zone = Zone { offset_seconds: 0 };

    /// UTC
    pub const fn utc() -> Self {
        Self::UTC
    }

    /// Zone with an offset in seconds east of UTC
    ///
    /// # Errors
    ///
    /// Returns `UnknownTimeZone` if the offset exceeds ±18 hours.
    pub fn from_offset_seconds(offset_seconds: i32) -> Result<Self> {
        if offset_seconds.abs() > MAX_OFFSET_SECONDS {
            return Err(Error::UnknownTimeZone(format!("{}s", offset_seconds)));
        }
        Ok(Zone { offset_seconds })
    }

    /// Resolve a zone identifier
    pub fn for_id(id: &str) -> Result<Self> {
        let trimmed = id.trim();
        let lower = trimmed.to_ascii_lowercase();
        if UTC_ALIASES.contains(&lower.as_str()) {
            return Ok(Self::UTC);
        }
        let offset = ["utc", "gmt", "ut"]
            .iter()
            .find_map(|prefix| lower.strip_prefix(prefix))
            .filter(|rest| rest.starts_with('+') || rest.starts_with('-'))
            .unwrap_or(&lower);
        parse_offset(offset)
            .and_then(|secs| Self::from_offset_seconds(secs).ok())
            .ok_or_else(|| Error::UnknownTimeZone(trimmed.to_string()))
    }

    /// Offset in seconds east of UTC
    #[inline]
    pub const fn offset_seconds(&self) -> i32 {
        self.offset_seconds
    }

    #[inline]
    fn offset_millis(&self) -> i64 {
        self.offset_seconds as i64 * 1_000
    }

    /// Canonical identifier: `UTC` or `+HH:MM`
    pub fn id(&self) -> String {
        if self.offset_seconds == 0 {
            return "UTC".to_string();
        }
        let sign = if self.offset_seconds < 0 { '-' } else { '+' };
        let abs = self.offset_seconds.abs();
        let (hours, minutes, seconds) = (abs / 3_600, abs % 3_600 / 60, abs % 60);
        if seconds == 0 {
            format!("{}{:02}:{:02}", sign, hours, minutes)
        } else {
            format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
        }
    }

    /// Local wall-clock date-time of an instant
    pub fn local(&self, millis: i64) -> Result<NaiveDateTime> {
        let shifted = millis
            .checked_add(self.offset_millis())
            .ok_or_else(|| Error::overflow("local time"))?;
        naive_from_millis(shifted)
    }

    /// Instant of a local wall-clock date-time
    ///
    /// Fixed offsets make this unambiguous.
    pub fn instant_of(&self, local: &NaiveDateTime) -> Result<i64> {
        millis_from_naive(local)
            .checked_sub(self.offset_millis())
            .ok_or_else(|| Error::overflow("instant of local time"))
    }

    /// The engine-native offset
    pub fn to_fixed_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.offset_seconds).unwrap_or_else(|| Utc.fix())
    }
}

impl From<FixedOffset> for Zone {
    fn from(offset: FixedOffset) -> Self {
        Zone {
            offset_seconds: offset.local_minus_utc(),
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Parse `+HH`, `+HHMM`, `+HH:MM` or `+HH:MM:SS` into seconds
fn parse_offset(s: &str) -> Option<i32> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let parts: Vec<&str> = if rest.contains(':') {
        rest.split(':').collect()
    } else if rest.len() > 2 {
        let (h, m) = rest.split_at(rest.len() - 2);
        vec![h, m]
    } else {
        vec![rest]
    };
    if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty() || p.len() > 2) {
        return None;
    }
    let mut numbers = parts.iter().map(|p| p.parse::<i32>().ok());
    let hours = numbers.next()??;
    let minutes = numbers.next().unwrap_or(Some(0))?;
    let seconds = numbers.next().unwrap_or(Some(0))?;
    if hours > 18 || minutes > 59 || seconds > 59 {
        return None;
    }
    Some(sign * (hours * 3_600 + minutes * 60 + seconds))
}

/// Calendar system identity
///
/// `chrono` implements the proleptic Gregorian calendar with ISO weeks; every
/// supported chronology name resolves to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Chronology {
    /// ISO-8601 (proleptic Gregorian)
    #[default]
    Iso,
}

impl Chronology {
    /// Resolve a chronology by name
    pub fn for_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "iso" | "isochronology" | "iso8601" | "gregorian" | "gregorianchronology"
            | "proleptic-gregorian" => Ok(Chronology::Iso),
            _ => Err(Error::UnknownChronology(name.to_string())),
        }
    }

    /// Canonical name
    pub const fn name(&self) -> &'static str {
        match self {
            Chronology::Iso => "ISO",
        }
    }
}

impl std::fmt::Display for Chronology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
