//! Report output for aggregated logs.
//!
//! A [`ReportSink`] receives one month of calculated days at a time. The
//! bundled [`CsvReportSink`] writes `<dir>/<year>/<month>.csv`, so writing a
//! month replaces that month only and leaves the rest of the year intact.

mod csv_sink;

pub use csv_sink::CsvReportSink;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::calculation::{AggregatedLog, CalculatedDay, aggregate};
use crate::config::ScheduleConfig;
use crate::daily_log::read_log;
use crate::error::EngineResult;

/// Column headers of a report section.
pub const REPORT_HEADERS: [&str; 5] = ["date", "first_time", "last_time", "worked", "overtime"];

/// Destination for rendered report sections.
pub trait ReportSink {
    /// Writes (or replaces) the section for one month of one year.
    fn write_month(&mut self, year: &str, month: &str, days: &[CalculatedDay]) -> EngineResult<()>;
}

/// Renders one calculated day as the five report columns.
///
/// Both duration columns hold the no-record sentinel when the day was not
/// calculated.
///
/// # Example
///
/// ```
/// use work_hours::calculation::aggregate;
/// use work_hours::config::ScheduleConfig;
/// use work_hours::models::DayRecord;
/// use work_hours::report::format_row;
///
/// let record = DayRecord::from_fields("2024-03-15", "08:50:00", "18:10:00").unwrap();
/// let log = aggregate(vec![record], &ScheduleConfig::default());
/// let day = log.iter_days().next().unwrap();
///
/// assert_eq!(
///     format_row(day),
///     ["2024-03-15", "08:50:00", "18:10:00", "8:05:00", "0:00:00"]
/// );
/// ```
pub fn format_row(day: &CalculatedDay) -> [String; 5] {
    [
        day.record.date.clone(),
        day.record.first_time.to_string(),
        day.record.last_time.to_string(),
        day.result.worked_text(),
        day.result.overtime_text(),
    ]
}

/// Sends every month of the log to the sink, in log order.
///
/// Returns the number of month sections written.
pub fn write_report<S: ReportSink>(log: &AggregatedLog, sink: &mut S) -> EngineResult<usize> {
    let mut sections = 0;
    for year in log.years() {
        for month in &year.months {
            sink.write_month(&year.year, &month.month, &month.days)?;
            sections += 1;
        }
    }
    Ok(sections)
}

/// Outcome of a report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// Days read from the log.
    pub days: usize,
    /// Month sections written.
    pub sections: usize,
    /// Files written, in write order.
    pub files: Vec<PathBuf>,
}

/// Reads a daily log, calculates every day and writes the CSV reports.
///
/// Fails with `NoRecords` before touching `output_dir` when the log is
/// missing or holds no usable line.
pub fn generate_csv_reports<P, Q>(
    schedule: &ScheduleConfig,
    log_path: P,
    output_dir: Q,
) -> EngineResult<ReportSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let records = read_log(log_path)?;
    let log = aggregate(records, schedule);

    let mut sink = CsvReportSink::new(output_dir);
    let sections = write_report(&log, &mut sink)?;
    info!(days = log.len(), sections, "Report run finished");

    Ok(ReportSummary {
        days: log.len(),
        sections,
        files: sink.written().to_vec(),
    })
}
