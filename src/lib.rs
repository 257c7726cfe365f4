//! Work Hours Engine
//!
//! This crate turns a daily log of first and last activity times into worked
//! durations and overtime. Clock-in and clock-out times that fall inside a
//! rest window are snapped out of it, rest windows inside the working day are
//! subtracted, and the results are grouped by year and month for reporting.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod daily_log;
pub mod error;
pub mod models;
pub mod report;
