//! Calculation logic for the Work Hours Engine.
//!
//! This module contains boundary snapping against rest windows, the worked
//! duration and overtime calculation for a single day, and the aggregation
//! of calculated days by year and month.

mod aggregation;
mod interval_adjuster;
mod work_duration;

pub use aggregation::{AggregatedLog, CalculatedDay, MonthBucket, YearBucket, aggregate};
pub use interval_adjuster::{AdjustMode, adjust_boundary, find_matching_interval};
pub use work_duration::{
    RestOverlap, WorkCalculation, calculate_day, calculate_work_and_overtime, rest_overlap,
};
