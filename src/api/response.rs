//! Response types for the Work Hours Engine API.
//!
//! This module defines the calculation response, the error response
//! structures, and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{AggregatedLog, WorkCalculation};
use crate::config::ScheduleFile;
use crate::error::EngineError;

/// Totals across every day of a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationTotals {
    /// Days with both boundaries observed.
    pub calculated_days: usize,
    /// Days with a missing boundary.
    pub no_record_days: usize,
    /// Sum of worked durations, in decimal hours.
    pub worked_hours: Decimal,
    /// Sum of overtime, in decimal hours.
    pub overtime_hours: Decimal,
}

/// Audit trail of one calculated day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAudit {
    /// The day's date text.
    pub date: String,
    /// The calculation with its steps and warnings.
    pub calculation: WorkCalculation,
}

/// Response body of the `/calculate` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// The schedule the days were calculated against.
    pub schedule: ScheduleFile,
    /// Raw lines skipped as malformed.
    pub skipped_lines: usize,
    /// Days grouped by year and month, serialized as `years`.
    #[serde(flatten)]
    pub log: AggregatedLog,
    /// Totals across all days.
    pub totals: CalculationTotals,
    /// Per-day audit trails, when requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit: Vec<DayAudit>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Wraps an error body in a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::ConfigWriteError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::InvalidTime { .. } | EngineError::InvalidInterval { .. } => {
                ApiErrorResponse {
                    status: StatusCode::BAD_REQUEST,
                    error: ApiError::validation_error(message),
                }
            }
            EngineError::NoRecords { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("NO_RECORDS", message),
            },
            EngineError::LogReadError { .. }
            | EngineError::ReportWriteError { .. }
            | EngineError::ServerError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("IO_ERROR", "I/O error", message),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_no_records_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::NoRecords {
            source_name: "request body".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "NO_RECORDS");
        assert!(api_error.error.message.contains("request body"));
    }

    #[test]
    fn test_error_response_is_json() {
        let response =
            ApiErrorResponse::bad_request(ApiError::malformed_json("bad")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_engine_error_to_api_error() {
        let engine_error = EngineError::InvalidTime {
            value: "9am".to_string(),
            expected: "HH:MM:SS".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");

        let engine_error = EngineError::ConfigNotFound {
            path: "schedule.json".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
