//! Work result models.
//!
//! This module contains the [`WorkResult`] attached to each day after
//! calculation, the audit types recording how it was derived, and helpers
//! for rendering durations as text and decimal hours.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::day_record::NO_RECORD_TEXT;

/// Worked duration and overtime for one day.
///
/// `worked` is signed: pathological logs (clock-out before the adjusted
/// clock-in) produce a negative value which is kept as-is. `overtime` is
/// never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkResult {
    /// Both boundaries were observed and the day was calculated.
    Calculated {
        /// Effective worked duration.
        #[serde(with = "duration_text")]
        worked: Duration,
        /// Worked duration beyond the standard shift length.
        #[serde(with = "duration_text")]
        overtime: Duration,
    },
    /// At least one boundary was missing; nothing was calculated.
    NoRecord,
}

impl WorkResult {
    /// The worked duration, if the day was calculated.
    pub fn worked(&self) -> Option<Duration> {
        match self {
            WorkResult::Calculated { worked, .. } => Some(*worked),
            WorkResult::NoRecord => None,
        }
    }

    /// The overtime, if the day was calculated.
    pub fn overtime(&self) -> Option<Duration> {
        match self {
            WorkResult::Calculated { overtime, .. } => Some(*overtime),
            WorkResult::NoRecord => None,
        }
    }

    /// Worked duration as report text, or the no-record sentinel.
    pub fn worked_text(&self) -> String {
        self.worked()
            .map(format_duration)
            .unwrap_or_else(|| NO_RECORD_TEXT.to_string())
    }

    /// Overtime as report text, or the no-record sentinel.
    pub fn overtime_text(&self) -> String {
        self.overtime()
            .map(format_duration)
            .unwrap_or_else(|| NO_RECORD_TEXT.to_string())
    }
}

/// Renders a duration as `H:MM:SS`, with a leading `-` when negative.
///
/// # Example
///
/// ```
/// use work_hours::models::format_duration;
/// use chrono::Duration;
///
/// assert_eq!(format_duration(Duration::minutes(485)), "8:05:00");
/// assert_eq!(format_duration(Duration::minutes(-90)), "-1:30:00");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let sign = if duration < Duration::zero() { "-" } else { "" };
    let total = duration.num_seconds().abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Parses the `H:MM:SS` text produced by [`format_duration`].
pub fn parse_duration(text: &str) -> Option<Duration> {
    let text = text.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let mut parts = body.split(':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    let seconds: i64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
        return None;
    }

    let duration = Duration::seconds(hours * 3600 + minutes * 60 + seconds);
    Some(if negative { -duration } else { duration })
}

/// Converts a duration to decimal hours rounded to two places.
///
/// # Example
///
/// ```
/// use work_hours::models::duration_hours;
/// use chrono::Duration;
/// use rust_decimal::Decimal;
///
/// assert_eq!(duration_hours(Duration::minutes(450)), Decimal::new(750, 2));
/// ```
pub fn duration_hours(duration: Duration) -> Decimal {
    (Decimal::new(duration.num_seconds(), 0) / Decimal::new(3600, 0)).round_dp(2)
}

/// Serde adapter storing a [`Duration`] as `H:MM:SS` text.
pub mod duration_text {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serializes a duration as `H:MM:SS`.
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_duration(*duration))
    }

    /// Deserializes a duration from `H:MM:SS`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_duration(&text)
            .ok_or_else(|| D::Error::custom(format!("invalid duration '{}'", text)))
    }
}

/// A single step in the audit trail of a day's calculation.
///
/// Each step captures the input, output, and reasoning for one rule
/// application (a boundary snap, a rest subtraction, the overtime floor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag data that was calculated but deserves a second look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::zero()), "0:00:00");
        assert_eq!(format_duration(Duration::minutes(295)), "4:55:00");
        assert_eq!(format_duration(Duration::seconds(36_061)), "10:01:01");
    }

    #[test]
    fn test_format_negative_duration() {
        assert_eq!(format_duration(Duration::minutes(-30)), "-0:30:00");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("8:05:00"), Some(Duration::minutes(485)));
        assert_eq!(parse_duration("-0:30:00"), Some(Duration::minutes(-30)));
        assert_eq!(parse_duration("8:05"), None);
        assert_eq!(parse_duration("8:65:00"), None);
    }

    #[test]
    fn test_duration_hours() {
        assert_eq!(duration_hours(Duration::minutes(485)), Decimal::new(808, 2));
        assert_eq!(duration_hours(Duration::hours(9)), Decimal::new(9, 0));
        assert_eq!(duration_hours(Duration::minutes(-30)), Decimal::new(-50, 2));
    }

    #[test]
    fn test_no_record_text_columns() {
        let result = WorkResult::NoRecord;
        assert_eq!(result.worked_text(), NO_RECORD_TEXT);
        assert_eq!(result.overtime_text(), NO_RECORD_TEXT);
        assert_eq!(result.worked(), None);
    }

    #[test]
    fn test_calculated_text_columns() {
        let result = WorkResult::Calculated {
            worked: Duration::minutes(560),
            overtime: Duration::minutes(20),
        };
        assert_eq!(result.worked_text(), "9:20:00");
        assert_eq!(result.overtime_text(), "0:20:00");
    }

    #[test]
    fn test_work_result_serialization() {
        let result = WorkResult::Calculated {
            worked: Duration::minutes(485),
            overtime: Duration::zero(),
        };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["status"], "calculated");
        assert_eq!(json["worked"], "8:05:00");
        assert_eq!(json["overtime"], "0:00:00");

        let back: WorkResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);

        let none = serde_json::to_value(WorkResult::NoRecord).unwrap();
        assert_eq!(none["status"], "no_record");
    }
}
