//! Configuration types for the work schedule.
//!
//! This module contains the on-disk [`ScheduleFile`] layout written by the
//! schedule editor and the validated [`ScheduleConfig`] consumed by the
//! calculation code.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CLOCK_FORMAT, Interval};

/// Schedule file structure, as persisted by the schedule editor.
///
/// ```json
/// {
///     "standard_start_time": "09:00",
///     "standard_end_time": "18:00",
///     "lunch_break": "12:00-13:00",
///     "rest_periods": ["15:00-15:15"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleFile {
    /// Standard clock-in time (`HH:MM`).
    pub standard_start_time: String,
    /// Standard clock-out time (`HH:MM`).
    pub standard_end_time: String,
    /// Lunch break window (`HH:MM-HH:MM`).
    pub lunch_break: Interval,
    /// Short rest windows, in precedence order.
    #[serde(default)]
    pub rest_periods: Vec<Interval>,
}

impl From<&ScheduleConfig> for ScheduleFile {
    fn from(config: &ScheduleConfig) -> Self {
        Self {
            standard_start_time: config.standard_shift().start().format(CLOCK_FORMAT).to_string(),
            standard_end_time: config.standard_shift().end().format(CLOCK_FORMAT).to_string(),
            lunch_break: config.lunch_break(),
            rest_periods: config.rest_periods().to_vec(),
        }
    }
}

/// The validated work schedule.
///
/// Loaded once at startup and passed by reference to the calculation code.
/// The rest windows are kept in precedence order: the lunch break first,
/// then the configured rest periods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    standard_shift: Interval,
    /// `[lunch_break] + rest_periods`.
    rest: Vec<Interval>,
}

impl ScheduleConfig {
    /// Creates a schedule from its parts.
    pub fn new(standard_shift: Interval, lunch_break: Interval, rest_periods: Vec<Interval>) -> Self {
        let mut rest = Vec::with_capacity(rest_periods.len() + 1);
        rest.push(lunch_break);
        rest.extend(rest_periods);
        Self {
            standard_shift,
            rest,
        }
    }

    /// The standard shift window.
    pub fn standard_shift(&self) -> Interval {
        self.standard_shift
    }

    /// The lunch break window.
    pub fn lunch_break(&self) -> Interval {
        self.rest[0]
    }

    /// The configured short rest windows, excluding lunch.
    pub fn rest_periods(&self) -> &[Interval] {
        &self.rest[1..]
    }

    /// All rest windows in precedence order: lunch, then rest periods.
    ///
    /// # Example
    ///
    /// ```
    /// use work_hours::config::ScheduleConfig;
    ///
    /// let config = ScheduleConfig::default();
    /// let rest = config.rest_intervals();
    /// assert_eq!(rest[0].to_string(), "12:00-13:00");
    /// assert_eq!(rest[1].to_string(), "15:00-15:15");
    /// ```
    pub fn rest_intervals(&self) -> &[Interval] {
        &self.rest
    }

    /// Length of the standard shift.
    pub fn standard_duration(&self) -> Duration {
        self.standard_shift.length()
    }

    /// Pairs of rest windows that share time, in list order.
    ///
    /// Overlapping rest windows are accepted, but only the first matching
    /// window is used when snapping a boundary.
    pub fn overlapping_rest_pairs(&self) -> Vec<(Interval, Interval)> {
        let mut pairs = Vec::new();
        for (i, a) in self.rest.iter().enumerate() {
            for b in &self.rest[i + 1..] {
                if a.overlaps(b) {
                    pairs.push((*a, *b));
                }
            }
        }
        pairs
    }
}

impl Default for ScheduleConfig {
    /// 09:00-18:00 with lunch at 12:00-13:00 and one rest at 15:00-15:15.
    fn default() -> Self {
        let clock = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
        Self::new(
            Interval::new_unchecked(clock(9, 0), clock(18, 0)),
            Interval::new_unchecked(clock(12, 0), clock(13, 0)),
            vec![Interval::new_unchecked(clock(15, 0), clock(15, 15))],
        )
    }
}

impl TryFrom<ScheduleFile> for ScheduleConfig {
    type Error = EngineError;

    fn try_from(file: ScheduleFile) -> EngineResult<Self> {
        let standard_shift =
            Interval::from_clock_times(&file.standard_start_time, &file.standard_end_time)?;
        Ok(Self::new(standard_shift, file.lunch_break, file.rest_periods))
    }
}
