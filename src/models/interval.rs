//! Interval model for rest windows and the standard shift.
//!
//! An [`Interval`] is a pair of wall-clock times on the same day with
//! `start < end`. Its text form is `HH:MM-HH:MM`, the format used by the
//! schedule configuration file.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Format of a schedule clock time.
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Parses a schedule clock time in `HH:MM` form.
///
/// # Example
///
/// ```
/// use work_hours::models::parse_clock_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(
///     parse_clock_time("09:30").unwrap(),
///     NaiveTime::from_hms_opt(9, 30, 0).unwrap()
/// );
/// assert!(parse_clock_time("9h30").is_err());
/// ```
pub fn parse_clock_time(value: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT).map_err(|_| EngineError::InvalidTime {
        value: value.to_string(),
        expected: "HH:MM".to_string(),
    })
}

/// A time-of-day window with `start < end`.
///
/// Used for the lunch break, the configured short rest periods, and the
/// standard shift window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interval {
    start: NaiveTime,
    end: NaiveTime,
}

impl Interval {
    /// Creates an interval, rejecting empty or inverted windows.
    ///
    /// # Example
    ///
    /// ```
    /// use work_hours::models::Interval;
    /// use chrono::NaiveTime;
    ///
    /// let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    /// let one = NaiveTime::from_hms_opt(13, 0, 0).unwrap();
    /// assert!(Interval::new(noon, one).is_ok());
    /// assert!(Interval::new(one, noon).is_err());
    /// ```
    pub fn new(start: NaiveTime, end: NaiveTime) -> EngineResult<Self> {
        if start >= end {
            return Err(EngineError::InvalidInterval {
                value: format!(
                    "{}-{}",
                    start.format(CLOCK_FORMAT),
                    end.format(CLOCK_FORMAT)
                ),
                message: "start must be before end".to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates an interval from times already known to satisfy `start < end`.
    pub(crate) fn new_unchecked(start: NaiveTime, end: NaiveTime) -> Self {
        debug_assert!(start < end);
        Self { start, end }
    }

    /// Builds an interval from separate `HH:MM` start and end texts.
    pub fn from_clock_times(start: &str, end: &str) -> EngineResult<Self> {
        Self::new(parse_clock_time(start)?, parse_clock_time(end)?)
    }

    /// The first instant of the window.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// The last instant of the window.
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Length of the window, always positive.
    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// Returns true if the two windows share any time.
    ///
    /// Windows that only touch at an edge (`12:00-13:00` and `13:00-13:15`)
    /// do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl FromStr for Interval {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| EngineError::InvalidInterval {
                value: s.to_string(),
                message: "expected HH:MM-HH:MM".to_string(),
            })?;

        let start = parse_clock_time(start).map_err(|_| EngineError::InvalidInterval {
            value: s.to_string(),
            message: format!("invalid start time '{}'", start.trim()),
        })?;
        let end = parse_clock_time(end).map_err(|_| EngineError::InvalidInterval {
            value: s.to_string(),
            message: format!("invalid end time '{}'", end.trim()),
        })?;

        Self::new(start, end).map_err(|_| EngineError::InvalidInterval {
            value: s.to_string(),
            message: "start must be before end".to_string(),
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(CLOCK_FORMAT),
            self.end.format(CLOCK_FORMAT)
        )
    }
}

impl TryFrom<String> for Interval {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.to_string()
    }
}
