//! Worked duration and overtime calculation.
//!
//! This module turns one day's first/last activity times into a worked
//! duration and an overtime figure, honoring the schedule's rest windows.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ScheduleConfig;
use crate::models::{
    AuditStep, AuditWarning, DayRecord, Interval, WorkResult, duration_text, format_duration,
};

use super::interval_adjuster::{AdjustMode, find_matching_interval};

/// How a rest window inside the adjusted day was subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestOverlap {
    /// The whole window lies inside the adjusted day.
    FullContainment,
    /// The window starts inside the adjusted day and runs past its end.
    LeadingPartial,
}

/// The full outcome of calculating one day, including the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCalculation {
    /// Clock-in after snapping out of rest windows.
    pub adjusted_start: NaiveTime,
    /// Clock-out after snapping out of rest windows.
    pub adjusted_end: NaiveTime,
    /// Effective worked duration; negative for pathological logs.
    #[serde(with = "duration_text")]
    pub worked: Duration,
    /// Worked duration beyond the standard shift, floored at zero.
    #[serde(with = "duration_text")]
    pub overtime: Duration,
    /// The rules applied, in order.
    pub audit_steps: Vec<AuditStep>,
    /// Data issues noticed while calculating.
    pub warnings: Vec<AuditWarning>,
}

impl WorkCalculation {
    /// The result attached to the day record.
    pub fn result(&self) -> WorkResult {
        WorkResult::Calculated {
            worked: self.worked,
            overtime: self.overtime,
        }
    }
}

/// Classifies how much of `rest` to subtract from the adjusted day.
///
/// Rules, first match wins:
/// 1. `adj_start <= rest.start` and `rest.end <= adj_end`: the full length.
/// 2. `adj_start <= rest.start < adj_end`: `max(0, min(adj_end, rest.end) - rest.start)`.
/// 3. Otherwise nothing. A window that starts before `adj_start` is never
///    subtracted, even if it runs into the adjusted day.
pub fn rest_overlap(
    adj_start: NaiveTime,
    adj_end: NaiveTime,
    rest: &Interval,
) -> Option<(RestOverlap, Duration)> {
    if adj_start <= rest.start() && rest.end() <= adj_end {
        return Some((RestOverlap::FullContainment, rest.length()));
    }

    if adj_start <= rest.start() && rest.start() < adj_end {
        let overlap = (adj_end.min(rest.end()) - rest.start()).max(Duration::zero());
        return Some((RestOverlap::LeadingPartial, overlap));
    }

    None
}

/// Calculates worked duration and overtime for one day.
///
/// Both boundaries must have been observed; callers handle missing
/// boundaries without calling this function (see [`calculate_day`]).
///
/// # Algorithm
///
/// 1. Snap the clock-in out of the first rest window containing it
///    (`[start, end)` snaps to `end`), and the clock-out likewise
///    (`(start, end]` snaps to `start`).
/// 2. `worked = adjusted_end - adjusted_start`, never clamped.
/// 3. Subtract each rest window per [`rest_overlap`], each window evaluated
///    independently.
/// 4. `overtime = max(0, worked - standard shift length)`.
///
/// # Example
///
/// ```
/// use work_hours::calculation::calculate_work_and_overtime;
/// use work_hours::config::ScheduleConfig;
/// use chrono::{Duration, NaiveTime};
///
/// let config = ScheduleConfig::default();
/// let first = NaiveTime::from_hms_opt(8, 50, 0).unwrap();
/// let last = NaiveTime::from_hms_opt(18, 10, 0).unwrap();
///
/// let calculation = calculate_work_and_overtime(first, last, &config);
/// assert_eq!(calculation.worked, Duration::minutes(485)); // 8h05m
/// assert_eq!(calculation.overtime, Duration::zero());
/// ```
pub fn calculate_work_and_overtime(
    first_time: NaiveTime,
    last_time: NaiveTime,
    config: &ScheduleConfig,
) -> WorkCalculation {
    let rest_intervals = config.rest_intervals();
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    // Step 1: snap both boundaries out of rest windows
    let mut adjusted_start = first_time;
    if let Some(window) = find_matching_interval(first_time, rest_intervals, AdjustMode::Start) {
        adjusted_start = AdjustMode::Start.snap_target(window);
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "start_boundary_snap".to_string(),
            rule_name: "Clock-in Inside Rest Window".to_string(),
            input: serde_json::json!({
                "first_time": first_time.to_string(),
                "rest_interval": window.to_string(),
            }),
            output: serde_json::json!({ "adjusted_start": adjusted_start.to_string() }),
            reasoning: format!(
                "Clock-in {} falls inside rest window {}; work starts at {}",
                first_time, window, adjusted_start
            ),
        });
        step_number += 1;
    }

    let mut adjusted_end = last_time;
    if let Some(window) = find_matching_interval(last_time, rest_intervals, AdjustMode::End) {
        adjusted_end = AdjustMode::End.snap_target(window);
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "end_boundary_snap".to_string(),
            rule_name: "Clock-out Inside Rest Window".to_string(),
            input: serde_json::json!({
                "last_time": last_time.to_string(),
                "rest_interval": window.to_string(),
            }),
            output: serde_json::json!({ "adjusted_end": adjusted_end.to_string() }),
            reasoning: format!(
                "Clock-out {} falls inside rest window {}; work ends at {}",
                last_time, window, adjusted_end
            ),
        });
        step_number += 1;
    }

    // Step 2: raw span between the adjusted boundaries
    let mut worked = adjusted_end - adjusted_start;

    // Step 3: remove rest time inside the adjusted span
    for window in rest_intervals {
        let Some((kind, overlap)) = rest_overlap(adjusted_start, adjusted_end, window) else {
            continue;
        };
        worked = worked - overlap;
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "rest_interval_subtraction".to_string(),
            rule_name: "Rest Window Subtraction".to_string(),
            input: serde_json::json!({
                "adjusted_start": adjusted_start.to_string(),
                "adjusted_end": adjusted_end.to_string(),
                "rest_interval": window.to_string(),
            }),
            output: serde_json::json!({
                "overlap": kind,
                "subtracted": format_duration(overlap),
            }),
            reasoning: format!(
                "Subtracted {} for rest window {} ({})",
                format_duration(overlap),
                window,
                match kind {
                    RestOverlap::FullContainment => "fully inside the day",
                    RestOverlap::LeadingPartial => "starts inside the day",
                }
            ),
        });
        step_number += 1;
    }

    if worked < Duration::zero() {
        warn!(
            first_time = %first_time,
            last_time = %last_time,
            worked = %format_duration(worked),
            "Negative worked duration"
        );
        warnings.push(AuditWarning {
            code: "NEGATIVE_WORKED_DURATION".to_string(),
            message: format!(
                "Clock-out {} is before the adjusted clock-in {}; worked duration is {}",
                adjusted_end,
                adjusted_start,
                format_duration(worked)
            ),
        });
    }

    // Step 4: overtime beyond the standard shift
    let standard_duration = config.standard_duration();
    let overtime = (worked - standard_duration).max(Duration::zero());
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "overtime_calculation".to_string(),
        rule_name: "Overtime Beyond Standard Shift".to_string(),
        input: serde_json::json!({
            "worked": format_duration(worked),
            "standard_shift": config.standard_shift().to_string(),
            "standard_duration": format_duration(standard_duration),
        }),
        output: serde_json::json!({ "overtime": format_duration(overtime) }),
        reasoning: if overtime > Duration::zero() {
            format!(
                "{} worked exceeds the {} standard shift by {}",
                format_duration(worked),
                format_duration(standard_duration),
                format_duration(overtime)
            )
        } else {
            format!(
                "{} worked does not exceed the {} standard shift",
                format_duration(worked),
                format_duration(standard_duration)
            )
        },
    });

    WorkCalculation {
        adjusted_start,
        adjusted_end,
        worked,
        overtime,
        audit_steps,
        warnings,
    }
}

/// Calculates one day record, short-circuiting missing boundaries.
///
/// A record with either boundary missing yields [`WorkResult::NoRecord`]
/// without running the calculation, whatever the other boundary holds.
pub fn calculate_day(record: &DayRecord, config: &ScheduleConfig) -> WorkResult {
    match record.recorded_times() {
        Some((first_time, last_time)) => {
            let result = calculate_work_and_overtime(first_time, last_time, config).result();
            debug!(date = %record.date, worked = %result.worked_text(), overtime = %result.overtime_text(), "Calculated day");
            result
        }
        None => {
            debug!(date = %record.date, "No record for day");
            WorkResult::NoRecord
        }
    }
}
