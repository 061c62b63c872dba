//! Zones used to resolve fields of zone-ambiguous values.
//!
//! A [`Zone`] is either a fixed UTC offset or an IANA region. Offsets and
//! DST rules come from `chrono` / `chrono-tz`; this module only decides which
//! of the two a caller meant and how to project an instant onto its wall clock.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::error::MatcherError;

/// A UTC offset or a region time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// A fixed offset from UTC (e.g. `+05:30`).
    Offset(FixedOffset),
    /// An IANA region (e.g. `Europe/London`), offset varies with DST.
    Region(Tz),
}

impl Zone {
    /// The zero offset.
    pub fn utc() -> Self {
        Zone::Offset(Utc.fix())
    }

    /// Build an offset zone from whole seconds east of UTC.
    ///
    /// Returns `None` when the offset is outside ±24h.
    pub fn east(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(Zone::Offset)
    }

    /// Project an instant onto this zone's wall clock.
    pub fn local_date_time(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            Zone::Offset(offset) => instant.with_timezone(offset).naive_local(),
            Zone::Region(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    /// The UTC offset in effect for this zone at `instant`.
    pub fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        match self {
            Zone::Offset(offset) => *offset,
            Zone::Region(tz) => tz.offset_from_utc_datetime(&instant.naive_utc()).fix(),
        }
    }
}

impl From<FixedOffset> for Zone {
    fn from(offset: FixedOffset) -> Self {
        Zone::Offset(offset)
    }
}

impl From<Tz> for Zone {
    fn from(tz: Tz) -> Self {
        Zone::Region(tz)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Offset(offset) => write!(f, "{offset}"),
            Zone::Region(tz) => f.write_str(tz.name()),
        }
    }
}

impl FromStr for Zone {
    type Err = MatcherError;

    /// Accepts `Z`, `±HH:MM`, `±HHMM`, `±HH`, or an IANA zone name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("z") {
            return Ok(Zone::utc());
        }
        if s.starts_with('+') || s.starts_with('-') {
            return parse_offset(s).map(Zone::Offset);
        }
        s.parse::<Tz>()
            .map(Zone::Region)
            .map_err(|_| MatcherError::InvalidZone(format!("'{s}'")))
    }
}

impl Serialize for Zone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse `±HH:MM`, `±HHMM` or `±HH` into a fixed offset.
fn parse_offset(s: &str) -> Result<FixedOffset, MatcherError> {
    let invalid = || MatcherError::InvalidZone(format!("'{s}'"));

    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(invalid()),
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().map_err(|_| invalid())?, 0),
        4 => (
            digits[..2].parse::<i32>().map_err(|_| invalid())?,
            digits[2..].parse::<i32>().map_err(|_| invalid())?,
        ),
        _ => return Err(invalid()),
    };
    if minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
