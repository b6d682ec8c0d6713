//! Evaluation instant for the date-relative catalog queries.
//!
//! SQLite's `'now'` is always UTC and changes between calls. The catalog
//! instead binds one explicit instant, taken from this clock, so results are
//! reproducible and testable.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::Deserialize;
use std::fmt;

/// Which wall clock "now" is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Timezone {
    #[default]
    Utc,
    Local,
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => write!(f, "utc"),
            Self::Local => write!(f, "local"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationClock {
    /// Read the system clock in the given zone.
    System(Timezone),
    /// Always report the same instant.
    Fixed(NaiveDateTime),
}

impl Default for EvaluationClock {
    fn default() -> Self {
        Self::System(Timezone::default())
    }
}

impl EvaluationClock {
    /// Midnight at the start of `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        Self::Fixed(date.and_time(NaiveTime::MIN))
    }

    /// Current evaluation instant, truncated to whole seconds.
    pub fn now(&self) -> NaiveDateTime {
        let now = match self {
            Self::System(Timezone::Utc) => Utc::now().naive_utc(),
            Self::System(Timezone::Local) => Local::now().naive_local(),
            Self::Fixed(at) => *at,
        };
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS`.
pub fn parse_instant(input: &str) -> Result<NaiveDateTime, String> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S"))
        .map_err(|_| format!("Invalid date or datetime: {input} (expected YYYY-MM-DD[THH:MM:SS])"))
}
