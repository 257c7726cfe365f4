//! Boundary snapping against rest intervals.
//!
//! An observed clock-in that falls inside a rest window means work really
//! began when the window ended; an observed clock-out inside a rest window
//! means work really ended when the window began. This module moves such
//! boundaries to the far edge of the window.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::Interval;

/// Which boundary of the day is being adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustMode {
    /// The first activity of the day (clock-in).
    Start,
    /// The last activity of the day (clock-out).
    End,
}

impl AdjustMode {
    /// Returns true if `time` lies inside `interval` for this boundary.
    ///
    /// Start boundaries match `[start, end)`, end boundaries match
    /// `(start, end]`, so a time sitting exactly on the outer edge never
    /// matches.
    pub fn matches(self, time: NaiveTime, interval: &Interval) -> bool {
        match self {
            AdjustMode::Start => interval.start() <= time && time < interval.end(),
            AdjustMode::End => interval.start() < time && time <= interval.end(),
        }
    }

    /// The edge of `interval` a matching boundary snaps to.
    pub fn snap_target(self, interval: &Interval) -> NaiveTime {
        match self {
            AdjustMode::Start => interval.end(),
            AdjustMode::End => interval.start(),
        }
    }
}

/// Finds the first rest interval, in list order, that contains `time`.
pub fn find_matching_interval(
    time: NaiveTime,
    rest_intervals: &[Interval],
    mode: AdjustMode,
) -> Option<&Interval> {
    rest_intervals
        .iter()
        .find(|interval| mode.matches(time, interval))
}

/// Snaps a boundary out of the first rest interval containing it.
///
/// Only the first match is applied. If rest intervals overlap, a time that
/// lies in two of them is adjusted against the earlier one only.
///
/// # Example
///
/// ```
/// use work_hours::calculation::{AdjustMode, adjust_boundary};
/// use work_hours::models::Interval;
/// use chrono::NaiveTime;
///
/// let lunch: Interval = "12:00-13:00".parse().unwrap();
/// let clock_in = NaiveTime::from_hms_opt(12, 30, 0).unwrap();
///
/// let adjusted = adjust_boundary(clock_in, &[lunch], AdjustMode::Start);
/// assert_eq!(adjusted, NaiveTime::from_hms_opt(13, 0, 0).unwrap());
///
/// let adjusted = adjust_boundary(clock_in, &[lunch], AdjustMode::End);
/// assert_eq!(adjusted, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
/// ```
pub fn adjust_boundary(time: NaiveTime, rest_intervals: &[Interval], mode: AdjustMode) -> NaiveTime {
    find_matching_interval(time, rest_intervals, mode)
        .map(|interval| mode.snap_target(interval))
        .unwrap_or(time)
}
