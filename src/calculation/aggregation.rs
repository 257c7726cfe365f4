//! Grouping of calculated days by year and month.
//!
//! The aggregator routes each day record through the duration calculator
//! and files the result under its year and month, keeping arrival order.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ScheduleConfig;
use crate::models::{DayRecord, WorkResult};

use super::work_duration::calculate_day;

/// A day record together with its calculated result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedDay {
    /// The day as read from the log.
    #[serde(flatten)]
    pub record: DayRecord,
    /// Worked duration and overtime, or no record.
    pub result: WorkResult,
}

/// All days of one month, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Month text as split from the date (`"03"`, or `"13"` for bad dates).
    pub month: String,
    /// Days in the order they were aggregated.
    pub days: Vec<CalculatedDay>,
}

/// All months of one year, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBucket {
    /// Year text as split from the date.
    pub year: String,
    /// Months in the order they were first seen.
    pub months: Vec<MonthBucket>,
}

impl YearBucket {
    /// Looks up a month bucket.
    pub fn month(&self, month: &str) -> Option<&MonthBucket> {
        self.months.iter().find(|bucket| bucket.month == month)
    }
}

/// Calculated days grouped by year, then month.
///
/// Ordering guarantee: years and months appear in the order they were first
/// seen, and days keep their insertion order within a month. Nothing is
/// sorted or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedLog {
    years: Vec<YearBucket>,
}

impl AggregatedLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a calculated day under its year and month.
    pub fn push(&mut self, day: CalculatedDay) {
        let year = day.record.year().to_string();
        let month = day.record.month().to_string();

        let year_index = match self.years.iter().position(|bucket| bucket.year == year) {
            Some(index) => index,
            None => {
                self.years.push(YearBucket {
                    year,
                    months: Vec::new(),
                });
                self.years.len() - 1
            }
        };
        let months = &mut self.years[year_index].months;

        let month_index = match months.iter().position(|bucket| bucket.month == month) {
            Some(index) => index,
            None => {
                months.push(MonthBucket {
                    month,
                    days: Vec::new(),
                });
                months.len() - 1
            }
        };
        months[month_index].days.push(day);
    }

    /// Year buckets in first-seen order.
    pub fn years(&self) -> &[YearBucket] {
        &self.years
    }

    /// Looks up a year bucket.
    pub fn year(&self, year: &str) -> Option<&YearBucket> {
        self.years.iter().find(|bucket| bucket.year == year)
    }

    /// Looks up the days of one month.
    pub fn month(&self, year: &str, month: &str) -> Option<&[CalculatedDay]> {
        self.year(year)?
            .month(month)
            .map(|bucket| bucket.days.as_slice())
    }

    /// All days flattened in (year, month, insertion) order.
    pub fn iter_days(&self) -> impl Iterator<Item = &CalculatedDay> {
        self.years
            .iter()
            .flat_map(|year| year.months.iter())
            .flat_map(|month| month.days.iter())
    }

    /// Total number of days.
    pub fn len(&self) -> usize {
        self.iter_days().count()
    }

    /// Returns true if no day was aggregated.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Calculates every record and groups the results by year and month.
///
/// Records with a missing boundary get [`WorkResult::NoRecord`] without
/// being calculated. Dates are split literally on `-` with no calendar
/// validation, so `2024-13-01` lands in its own month `13`.
///
/// # Example
///
/// ```
/// use work_hours::calculation::aggregate;
/// use work_hours::config::ScheduleConfig;
/// use work_hours::models::DayRecord;
///
/// let records = vec![
///     DayRecord::from_fields("2024-01-30", "08:50:00", "18:10:00").unwrap(),
///     DayRecord::from_fields("2024-02-01", "09:00:00", "18:00:00").unwrap(),
///     DayRecord::from_fields("2024-01-31", "无记录", "18:00:00").unwrap(),
/// ];
///
/// let log = aggregate(records, &ScheduleConfig::default());
/// let january = log.month("2024", "01").unwrap();
/// assert_eq!(january.len(), 2);
/// assert_eq!(january[1].record.date, "2024-01-31");
/// ```
pub fn aggregate<I>(records: I, config: &ScheduleConfig) -> AggregatedLog
where
    I: IntoIterator<Item = DayRecord>,
{
    let mut log = AggregatedLog::new();
    let mut calculated = 0usize;
    let mut no_record = 0usize;

    for record in records {
        let result = calculate_day(&record, config);
        match result {
            WorkResult::Calculated { .. } => calculated += 1,
            WorkResult::NoRecord => no_record += 1,
        }
        log.push(CalculatedDay { record, result });
    }

    info!(
        days = calculated + no_record,
        calculated,
        no_record,
        years = log.years().len(),
        "Aggregated daily records"
    );

    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoundaryTime, NO_RECORD_TEXT};
    use chrono::Duration;
    use proptest::prelude::*;

    fn record(date: &str, first: &str, last: &str) -> DayRecord {
        DayRecord::from_fields(date, first, last).unwrap()
    }

    #[test]
    fn test_sentinel_day_with_unreadable_time_is_no_record() {
        let line = format!("2024-03-16, {}, garbage", NO_RECORD_TEXT);
        let record = crate::daily_log::parse_line(&line).unwrap();

        let log = aggregate(vec![record], &ScheduleConfig::default());
        let day = log.iter_days().next().unwrap();
        assert_eq!(day.result, WorkResult::NoRecord);
        assert_eq!(day.record.last_time.to_string(), "garbage");
    }

    #[test]
    fn test_groups_by_year_then_month() {
        let records = vec![
            record("2023-12-29", "09:00:00", "18:00:00"),
            record("2024-01-02", "09:00:00", "18:00:00"),
            record("2024-01-03", "09:00:00", "18:00:00"),
            record("2024-02-01", "09:00:00", "18:00:00"),
        ];
        let log = aggregate(records, &ScheduleConfig::default());

        let years: Vec<&str> = log.years().iter().map(|y| y.year.as_str()).collect();
        assert_eq!(years, vec!["2023", "2024"]);

        let months: Vec<&str> = log
            .year("2024")
            .unwrap()
            .months
            .iter()
            .map(|m| m.month.as_str())
            .collect();
        assert_eq!(months, vec!["01", "02"]);
        assert_eq!(log.month("2024", "01").unwrap().len(), 2);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_preserves_input_order_without_sorting() {
        let records = vec![
            record("2024-03-15", "09:00:00", "18:00:00"),
            record("2024-03-01", "09:00:00", "18:00:00"),
            record("2024-03-15", "10:00:00", "18:00:00"),
        ];
        let log = aggregate(records, &ScheduleConfig::default());

        let dates: Vec<&str> = log.iter_days().map(|d| d.record.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-15", "2024-03-01", "2024-03-15"]);
    }

    #[test]
    fn test_months_keep_first_seen_order() {
        let records = vec![
            record("2024-05-01", "09:00:00", "18:00:00"),
            record("2024-04-30", "09:00:00", "18:00:00"),
            record("2024-05-02", "09:00:00", "18:00:00"),
        ];
        let log = aggregate(records, &ScheduleConfig::default());

        let dates: Vec<&str> = log.iter_days().map(|d| d.record.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-05-01", "2024-05-02", "2024-04-30"]);
    }

    #[test]
    fn test_month_thirteen_gets_its_own_bucket() {
        let records = vec![
            record("2024-12-31", "09:00:00", "18:00:00"),
            record("2024-13-01", "09:00:00", "18:00:00"),
        ];
        let log = aggregate(records, &ScheduleConfig::default());

        assert_eq!(log.year("2024").unwrap().months.len(), 2);
        assert_eq!(log.month("2024", "13").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_boundary_is_not_calculated() {
        let records = vec![
            record("2024-03-15", NO_RECORD_TEXT, "17:00:00"),
            record("2024-03-16", "09:00:00", NO_RECORD_TEXT),
            record("2024-03-17", "09:00:00", "18:00:00"),
        ];
        let log = aggregate(records, &ScheduleConfig::default());
        let days = log.month("2024", "03").unwrap();

        assert_eq!(days[0].result, WorkResult::NoRecord);
        assert_eq!(days[1].result, WorkResult::NoRecord);
        assert_eq!(
            days[2].result,
            WorkResult::Calculated {
                worked: Duration::minutes(465),
                overtime: Duration::zero(),
            }
        );
    }

    #[test]
    fn test_empty_input() {
        let log = aggregate(Vec::new(), &ScheduleConfig::default());
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_serialization_flattens_record() {
        let log = aggregate(
            vec![record("2024-03-15", "08:50:00", "18:10:00")],
            &ScheduleConfig::default(),
        );
        let json = serde_json::to_value(&log).unwrap();
        let day = &json["years"][0]["months"][0]["days"][0];

        assert_eq!(day["date"], "2024-03-15");
        assert_eq!(day["first_time"], "08:50:00");
        assert_eq!(day["result"]["status"], "calculated");
        assert_eq!(day["result"]["worked"], "8:05:00");
    }

    fn arb_record() -> impl Strategy<Value = DayRecord> {
        (
            2020u32..2026,
            1u32..14,
            1u32..29,
            prop::option::of((0u32..24, 0u32..60)),
            prop::option::of((0u32..24, 0u32..60)),
        )
            .prop_map(|(y, m, d, first, last)| {
                let boundary = |t: Option<(u32, u32)>| match t {
                    Some((h, min)) => {
                        BoundaryTime::Recorded(chrono::NaiveTime::from_hms_opt(h, min, 0).unwrap())
                    }
                    None => BoundaryTime::NoRecord,
                };
                DayRecord::new(format!("{:04}-{:02}-{:02}", y, m, d), boundary(first), boundary(last))
            })
    }

    proptest! {
        #[test]
        fn prop_aggregation_preserves_relative_order(records in prop::collection::vec(arb_record(), 0..60)) {
            let log = aggregate(records.clone(), &ScheduleConfig::default());
            prop_assert_eq!(log.len(), records.len());

            // Within each (year, month) the flattened order matches the input order
            for year in log.years() {
                for month in &year.months {
                    let expected: Vec<&DayRecord> = records
                        .iter()
                        .filter(|r| r.year() == year.year && r.month() == month.month)
                        .collect();
                    let actual: Vec<&DayRecord> = month.days.iter().map(|d| &d.record).collect();
                    prop_assert_eq!(actual, expected);
                }
            }
        }

        #[test]
        fn prop_no_record_days_have_no_result(records in prop::collection::vec(arb_record(), 0..60)) {
            let log = aggregate(records, &ScheduleConfig::default());
            for day in log.iter_days() {
                let missing = !day.record.first_time.is_recorded() || !day.record.last_time.is_recorded();
                prop_assert_eq!(missing, day.result == WorkResult::NoRecord);
            }
        }
    }
}
