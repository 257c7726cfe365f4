//! HTTP API module for the Work Hours Engine.
//!
//! This module exposes the daily calculation as a REST endpoint:
//! `POST /calculate` takes log lines or day records and returns the
//! calculated days grouped by year and month.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, CalculationResponse, CalculationTotals, DayAudit};
pub use state::AppState;
