//! Request types for the Work Hours Engine API.
//!
//! This module defines the JSON request structure for the `/calculate`
//! endpoint.

use serde::{Deserialize, Serialize};

use crate::daily_log::parse_line;
use crate::models::DayRecord;

/// Request body for the `/calculate` endpoint.
///
/// Days may be sent as raw daily log lines, as structured records, or both;
/// raw lines are processed first. Raw lines follow the tolerant log rules:
/// malformed lines are skipped.
///
/// ```json
/// {
///     "lines": ["2024-03-15, 08:50:00, 18:10:00"],
///     "records": [{"date": "2024-03-16", "first_time": "无记录", "last_time": "17:00:00"}],
///     "include_audit": true
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Raw daily log lines (`date, first_time, last_time`).
    #[serde(default)]
    pub lines: Vec<String>,
    /// Structured day records.
    #[serde(default)]
    pub records: Vec<DayRecord>,
    /// Whether to return the per-day audit trail.
    #[serde(default)]
    pub include_audit: bool,
}

impl CalculationRequest {
    /// All day records of the request, raw lines first.
    ///
    /// Returns the records and the number of raw lines that were skipped.
    pub fn into_records(self) -> (Vec<DayRecord>, usize) {
        let line_count = self.lines.len();
        let mut records: Vec<DayRecord> = self.lines.iter().filter_map(|l| parse_line(l)).collect();
        let skipped = line_count - records.len();
        records.extend(self.records);
        (records, skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoundaryTime;

    #[test]
    fn test_fields_default_when_missing() {
        let request: CalculationRequest = serde_json::from_str("{}").unwrap();
        assert!(request.lines.is_empty());
        assert!(request.records.is_empty());
        assert!(!request.include_audit);
    }

    #[test]
    fn test_into_records_puts_lines_first_and_counts_skips() {
        let request: CalculationRequest = serde_json::from_str(
            r#"{
                "lines": ["2024-03-15, 08:50:00, 18:10:00", "not a log line"],
                "records": [{"date": "2024-03-16", "first_time": "NO_RECORD", "last_time": "17:00:00"}]
            }"#,
        )
        .unwrap();

        let (records, skipped) = request.into_records();
        assert_eq!(skipped, 1);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "2024-03-15");
        assert_eq!(records[1].first_time, BoundaryTime::NoRecord);
    }

    #[test]
    fn test_record_with_sentinel_accepts_unreadable_time() {
        let request: CalculationRequest = serde_json::from_str(
            r#"{"records": [{"date": "2024-03-16", "first_time": "无记录", "last_time": "9am"}]}"#,
        )
        .unwrap();

        let (records, skipped) = request.into_records();
        assert_eq!(skipped, 0);
        assert_eq!(records[0].first_time, BoundaryTime::NoRecord);
        assert_eq!(records[0].last_time, BoundaryTime::Unreadable("9am".to_string()));
    }

    #[test]
    fn test_bad_record_time_is_rejected() {
        let result = serde_json::from_str::<CalculationRequest>(
            r#"{"records": [{"date": "2024-03-16", "first_time": "9am", "last_time": "17:00:00"}]}"#,
        );
        assert!(result.is_err());
    }
}
