//! CSV report sink.

use std::fs;
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::info;

use crate::calculation::CalculatedDay;
use crate::error::{EngineError, EngineResult};

use super::{REPORT_HEADERS, ReportSink, format_row};

/// Writes one CSV file per month under a directory per year.
///
/// ```text
/// reports/
/// ├── 2023/
/// │   └── 12.csv
/// └── 2024/
///     ├── 01.csv
///     └── 02.csv
/// ```
///
/// Existing month files are overwritten; other files in the year directory
/// are left alone, so re-running with new months extends the year.
///
/// Year and month text is used as-is (`13.csv` is fine), but a segment that
/// is empty, `.`, `..`, or contains a path separator is refused with
/// `ReportWriteError`, so every file stays under the root.
#[derive(Debug, Clone)]
pub struct CsvReportSink {
    root: PathBuf,
    written: Vec<PathBuf>,
}

impl CsvReportSink {
    /// Creates a sink rooted at `root`. Directories are created on write.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            written: Vec::new(),
        }
    }

    /// Path of the file holding one month.
    pub fn month_path(&self, year: &str, month: &str) -> EngineResult<PathBuf> {
        let year = self.checked_segment("year", year)?;
        let month = self.checked_segment("month", month)?;
        Ok(self.root.join(year).join(format!("{}.csv", month)))
    }

    fn checked_segment<'a>(&self, kind: &str, value: &'a str) -> EngineResult<&'a str> {
        let unusable = value.is_empty()
            || value == "."
            || value == ".."
            || value.chars().any(|c| c == '/' || c == '\\' || c == '\0');
        if unusable {
            return Err(EngineError::ReportWriteError {
                path: self.root.display().to_string(),
                message: format!("{} '{}' cannot be used as a file name", kind, value),
            });
        }
        Ok(value)
    }

    /// Files written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ReportSink for CsvReportSink {
    fn write_month(&mut self, year: &str, month: &str, days: &[CalculatedDay]) -> EngineResult<()> {
        let path = self.month_path(year, month)?;
        let path_str = path.display().to_string();
        let write_error = |message: String| EngineError::ReportWriteError {
            path: path_str.clone(),
            message,
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| write_error(e.to_string()))?;
        }

        let mut wtr = Writer::from_path(&path).map_err(|e| write_error(e.to_string()))?;
        wtr.write_record(REPORT_HEADERS)
            .map_err(|e| write_error(e.to_string()))?;
        for day in days {
            wtr.write_record(format_row(day))
                .map_err(|e| write_error(e.to_string()))?;
        }
        wtr.flush().map_err(|e| write_error(e.to_string()))?;

        info!(path = %path_str, days = days.len(), "Wrote month report");
        self.written.push(path);
        Ok(())
    }
}
