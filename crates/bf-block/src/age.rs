//! Humanized elapsed time, bucketed the way relative-time phrases
//! ("3 years ago", "a month ago") are chosen.

use std::fmt;

use chrono::{Datelike, Months, NaiveDateTime};
use serde::{Serialize, Serializer};

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_DAY: f64 = 86_400_000.0;

// 400 Gregorian years hold 146097 days and 4800 months.
const MONTHS_PER_400Y: f64 = 4_800.0;
const DAYS_PER_400Y: f64 = 146_097.0;

// Bucket boundaries; see `from_parts` for which side is inclusive.
const FEW_SECONDS: f64 = 44.0;
const MINUTES_LIMIT: f64 = 45.0;
const HOURS_LIMIT: f64 = 22.0;
const DAYS_LIMIT: f64 = 26.0;
const MONTHS_LIMIT: f64 = 11.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

/// Magnitude and unit of the phrase describing an elapsed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeAge {
    pub magnitude: u64,
    pub unit: AgeUnit,
}

impl RelativeAge {
    /// Elapsed time between two moments, in either direction.
    ///
    /// The span is split into whole calendar months counted forward from the
    /// earlier moment plus the milliseconds left over.
    pub fn between(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        let (earlier, later) = if from <= to { (from, to) } else { (to, from) };
        match whole_months(earlier, later) {
            Some((months, anchor)) => {
                let rest = (later - anchor).num_milliseconds() as f64;
                Self::from_parts(f64::from(months), rest)
            }
            None => Self::from_millis((later - earlier).num_milliseconds() as f64),
        }
    }

    pub fn from_millis(ms: f64) -> Self {
        Self::from_parts(0.0, ms)
    }

    /// Bucket a span of `months` calendar months plus `ms` milliseconds.
    pub fn from_parts(months: f64, ms: f64) -> Self {
        let month_days = (months * DAYS_PER_400Y / MONTHS_PER_400Y).round();
        let seconds = (month_days * 86_400.0 + ms / MS_PER_SECOND).round();
        let minutes = (month_days * 1_440.0 + ms / MS_PER_MINUTE).round();
        let hours = (month_days * 24.0 + ms / MS_PER_HOUR).round();
        let days = (month_days + ms / MS_PER_DAY).round();
        let exact_months = months + ms / MS_PER_DAY * MONTHS_PER_400Y / DAYS_PER_400Y;
        let months = exact_months.round();
        let years = (exact_months / 12.0).round();

        let (magnitude, unit) = if seconds <= FEW_SECONDS {
            (seconds, AgeUnit::Seconds)
        } else if minutes <= 1.0 {
            (1.0, AgeUnit::Minutes)
        } else if minutes < MINUTES_LIMIT {
            (minutes, AgeUnit::Minutes)
        } else if hours <= 1.0 {
            (1.0, AgeUnit::Hours)
        } else if hours < HOURS_LIMIT {
            (hours, AgeUnit::Hours)
        } else if days <= 1.0 {
            (1.0, AgeUnit::Days)
        } else if days < DAYS_LIMIT {
            (days, AgeUnit::Days)
        } else if months <= 1.0 {
            (1.0, AgeUnit::Months)
        } else if months < MONTHS_LIMIT {
            (months, AgeUnit::Months)
        } else if years <= 1.0 {
            (1.0, AgeUnit::Years)
        } else {
            (years, AgeUnit::Years)
        };

        Self {
            magnitude: magnitude as u64,
            unit,
        }
    }

    /// The full phrase, e.g. "3 years", "an hour", "a few seconds".
    pub fn phrase(&self) -> String {
        let (singular, article) = match self.unit {
            AgeUnit::Seconds => return "a few seconds".to_string(),
            AgeUnit::Minutes => ("minute", "a"),
            AgeUnit::Hours => ("hour", "an"),
            AgeUnit::Days => ("day", "a"),
            AgeUnit::Months => ("month", "a"),
            AgeUnit::Years => ("year", "a"),
        };
        if self.magnitude == 1 {
            format!("{article} {singular}")
        } else {
            format!("{} {singular}s", self.magnitude)
        }
    }
}

/// Largest month count that, added to `earlier`, does not pass `later`,
/// with the moment it lands on. Month ends clamp (31 Jan + 1 month = 28 Feb).
fn whole_months(earlier: NaiveDateTime, later: NaiveDateTime) -> Option<(u32, NaiveDateTime)> {
    let span = (later.year() - earlier.year()) * 12 + later.month() as i32 - earlier.month() as i32;
    let mut months = u32::try_from(span).ok()?;
    let mut anchor = earlier.checked_add_months(Months::new(months))?;
    if anchor > later {
        months -= 1;
        anchor = earlier.checked_add_months(Months::new(months))?;
    }
    Some((months, anchor))
}

/// Renders the leading numeral only.
impl fmt::Display for RelativeAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.magnitude)
    }
}

impl Serialize for RelativeAge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
