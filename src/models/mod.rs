//! Core data models for the Work Hours Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod day_record;
mod interval;
mod work_result;

pub use day_record::{
    BOUNDARY_FORMAT, BoundaryTime, DayRecord, NO_RECORD_ALIAS, NO_RECORD_TEXT, is_no_record_text,
};
pub use interval::{CLOCK_FORMAT, Interval, parse_clock_time};
pub use work_result::{
    AuditStep, AuditWarning, WorkResult, duration_hours, duration_text, format_duration,
    parse_duration,
};
