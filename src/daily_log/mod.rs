//! Daily log reading.
//!
//! The log extractor writes one line per day:
//!
//! ```text
//! 2024-03-15, 08:50:00, 18:10:00
//! 2024-03-16, 无记录, 17:00:00
//! ```
//!
//! Parsing is tolerant: lines that do not split into exactly three fields
//! on `", "` are skipped. A line whose times cannot be read is skipped too,
//! unless one side is the no-record sentinel: such a day is never
//! calculated, so it is kept whatever the other side holds.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::DayRecord;

/// Default daily log file name, shared with the log extractor.
pub const DEFAULT_LOG_FILE: &str = "system_logs_daily.txt";

/// Field separator of a daily log line.
pub const FIELD_SEPARATOR: &str = ", ";

/// Parses one log line.
///
/// Returns `None` for lines that should be skipped: blank lines, lines with
/// a field count other than three, and lines with an unreadable time and
/// no sentinel.
///
/// # Example
///
/// ```
/// use work_hours::daily_log::parse_line;
///
/// let record = parse_line("2024-03-15, 08:50:00, 18:10:00").unwrap();
/// assert_eq!(record.date, "2024-03-15");
///
/// assert!(parse_line("2024-03-15, 08:50:00").is_none());
/// ```
pub fn parse_line(line: &str) -> Option<DayRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let [date, first_time, last_time] = fields.as_slice() else {
        debug!(line = %line, fields = fields.len(), "Skipping log line with wrong field count");
        return None;
    };

    match DayRecord::from_fields(date, first_time, last_time) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(line = %line, error = %err, "Skipping unreadable log line");
            None
        }
    }
}

/// Parses every line of a daily log, skipping malformed lines.
pub fn parse_log(content: &str) -> Vec<DayRecord> {
    content.lines().filter_map(parse_line).collect()
}

/// Reads and parses a daily log file.
///
/// # Returns
///
/// The parsed records, or:
/// - `NoRecords` if the file is missing or contains no usable line
/// - `LogReadError` if the file exists but cannot be read
pub fn read_log<P: AsRef<Path>>(path: P) -> EngineResult<Vec<DayRecord>> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    if !path.exists() {
        return Err(EngineError::NoRecords {
            source_name: path_str,
        });
    }

    let content = fs::read_to_string(path).map_err(|e| EngineError::LogReadError {
        path: path_str.clone(),
        message: e.to_string(),
    })?;

    let records = parse_log(&content);
    if records.is_empty() {
        return Err(EngineError::NoRecords {
            source_name: path_str,
        });
    }

    info!(path = %path_str, records = records.len(), "Read daily log");
    Ok(records)
}
