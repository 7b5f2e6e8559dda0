//! Date ranges: an instant or an interval with a precision per bound.
//!
//! The binary encoding lives in [`crate::codec::date_range`]; this module
//! only holds the values and their construction rules.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Granularity of a date-range bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DateRangePrecision {
    Year = 0,
    Month = 1,
    Day = 2,
    Hour = 3,
    Minute = 4,
    Second = 5,
    Millisecond = 6,
}

impl DateRangePrecision {
    pub const ALL: [DateRangePrecision; 7] = [
        DateRangePrecision::Year,
        DateRangePrecision::Month,
        DateRangePrecision::Day,
        DateRangePrecision::Hour,
        DateRangePrecision::Minute,
        DateRangePrecision::Second,
        DateRangePrecision::Millisecond,
    ];

    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.get(usize::from(byte)).copied()
    }

    /// Floor `dt` to this precision.
    pub fn truncate(self, dt: DateTime<Utc>) -> DateTime<Utc> {
        let date = dt.date_naive();
        let floored = match self {
            DateRangePrecision::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
            DateRangePrecision::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
            DateRangePrecision::Day => date.and_hms_opt(0, 0, 0),
            DateRangePrecision::Hour => date.and_hms_opt(dt.hour(), 0, 0),
            DateRangePrecision::Minute => date.and_hms_opt(dt.hour(), dt.minute(), 0),
            DateRangePrecision::Second => date.and_hms_opt(dt.hour(), dt.minute(), dt.second()),
            DateRangePrecision::Millisecond => {
                date.and_hms_milli_opt(dt.hour(), dt.minute(), dt.second(), dt.timestamp_subsec_millis())
            }
        };
        // Every field comes from a valid datetime, so flooring cannot fail.
        floored.map(|naive| naive.and_utc()).unwrap_or(dt)
    }

    fn format(self) -> &'static str {
        match self {
            DateRangePrecision::Year => "%Y",
            DateRangePrecision::Month => "%Y-%m",
            DateRangePrecision::Day => "%Y-%m-%d",
            DateRangePrecision::Hour => "%Y-%m-%dT%H",
            DateRangePrecision::Minute => "%Y-%m-%dT%H:%M",
            DateRangePrecision::Second => "%Y-%m-%dT%H:%M:%S",
            DateRangePrecision::Millisecond => "%Y-%m-%dT%H:%M:%S%.3fZ",
        }
    }
}

/// One end of a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRangeBound {
    /// `*`: no limit on this side.
    Unbounded,
    Bounded {
        /// Milliseconds since the Unix epoch.
        time_ms: i64,
        precision: DateRangePrecision,
    },
}

impl DateRangeBound {
    /// A bound with the given raw millisecond value, taken as is.
    pub fn new(time_ms: i64, precision: DateRangePrecision) -> Self {
        DateRangeBound::Bounded { time_ms, precision }
    }

    /// A bound floored to `precision`.
    pub fn truncated(dt: DateTime<Utc>, precision: DateRangePrecision) -> Self {
        Self::new(precision.truncate(dt).timestamp_millis(), precision)
    }

    /// Like [`DateRangeBound::truncated`], from epoch milliseconds.
    pub fn from_millis(time_ms: i64, precision: DateRangePrecision) -> Result<Self> {
        let dt = DateTime::<Utc>::from_timestamp_millis(time_ms).ok_or_else(|| {
            Error::InvalidArgument(format!("timestamp {time_ms}ms is out of range"))
        })?;
        Ok(Self::truncated(dt, precision))
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, DateRangeBound::Unbounded)
    }

    pub fn time_ms(&self) -> Option<i64> {
        match self {
            DateRangeBound::Bounded { time_ms, .. } => Some(*time_ms),
            DateRangeBound::Unbounded => None,
        }
    }

    pub fn precision(&self) -> Option<DateRangePrecision> {
        match self {
            DateRangeBound::Bounded { precision, .. } => Some(*precision),
            DateRangeBound::Unbounded => None,
        }
    }
}

impl fmt::Display for DateRangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRangeBound::Unbounded => f.write_str("*"),
            DateRangeBound::Bounded { time_ms, precision } => {
                match DateTime::<Utc>::from_timestamp_millis(*time_ms) {
                    Some(dt) => write!(f, "{}", dt.format(precision.format())),
                    None => write!(f, "{time_ms}"),
                }
            }
        }
    }
}

/// A single instant or an interval.
///
/// `upper == None` marks a single-date value; `Some(bound)` an interval,
/// either side of which may be unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub lower: DateRangeBound,
    pub upper: Option<DateRangeBound>,
}

impl DateRange {
    pub fn single(bound: DateRangeBound) -> Self {
        Self { lower: bound, upper: None }
    }

    pub fn between(lower: DateRangeBound, upper: DateRangeBound) -> Self {
        Self { lower, upper: Some(upper) }
    }

    pub fn is_single_date(&self) -> bool {
        self.upper.is_none()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.upper {
            None => write!(f, "{}", self.lower),
            Some(upper) => write!(f, "[{} TO {}]", self.lower, upper),
        }
    }
}
