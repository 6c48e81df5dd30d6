//! Bar timestamps.
//!
//! Input times arrive as strings, either naive (`2024-01-02 09:30:00`) or with
//! an explicit offset (`2024-01-02T09:30:00+02:00`). The offset, when present,
//! is kept so reports echo the time the way it was given.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Naive layouts tried in order after RFC 3339 fails.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Timestamp of a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarTime {
    Naive(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised timestamp '{0}'")]
pub struct TimeParseError(pub String);

impl BarTime {
    /// Point on the UTC timeline used for ordering. Naive times are read as UTC.
    pub fn instant(&self) -> NaiveDateTime {
        match self {
            BarTime::Naive(t) => *t,
            BarTime::Zoned(t) => t.naive_utc(),
        }
    }
}

impl FromStr for BarTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(t) = DateTime::parse_from_rfc3339(s) {
            return Ok(BarTime::Zoned(t));
        }
        for fmt in OFFSET_FORMATS {
            if let Ok(t) = DateTime::parse_from_str(s, fmt) {
                return Ok(BarTime::Zoned(t));
            }
        }
        // "2024-01-02 09:30:00Z" is not RFC 3339 to chrono, but is common enough.
        if let Some(stripped) = s.strip_suffix('Z') {
            let rewritten = format!("{}+00:00", stripped.replacen(' ', "T", 1));
            if let Ok(t) = DateTime::parse_from_rfc3339(&rewritten) {
                return Ok(BarTime::Zoned(t));
            }
        }
        for fmt in NAIVE_FORMATS {
            if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(BarTime::Naive(t));
            }
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            if let Some(t) = d.and_hms_opt(0, 0, 0) {
                return Ok(BarTime::Naive(t));
            }
        }

        Err(TimeParseError(s.to_string()))
    }
}

impl fmt::Display for BarTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarTime::Naive(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S%.f")),
            BarTime::Zoned(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S%.f%:z")),
        }
    }
}

impl Serialize for BarTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
