//! HTTP request handlers for the Work Hours Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::{Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{AggregatedLog, CalculatedDay, calculate_work_and_overtime};
use crate::config::{ScheduleConfig, ScheduleFile};
use crate::error::EngineError;
use crate::models::{DayRecord, WorkResult, duration_hours};

use super::request::CalculationRequest;
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, CalculationTotals, DayAudit,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts log lines and/or day records and returns the calculated days.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::malformed_json(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let include_audit = request.include_audit;
    let (records, skipped_lines) = request.into_records();
    if records.is_empty() {
        warn!(
            correlation_id = %correlation_id,
            skipped_lines,
            "Request carried no usable records"
        );
        let api_error: ApiErrorResponse = EngineError::NoRecords {
            source_name: format!("request body ({} malformed lines skipped)", skipped_lines),
        }
        .into();
        return api_error.into_response();
    }

    let start_time = Instant::now();
    let days_count = records.len();
    let response = perform_calculation(records, skipped_lines, include_audit, state.schedule());
    info!(
        correlation_id = %correlation_id,
        calculation_id = %response.calculation_id,
        days_count,
        skipped_lines,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Calculates every day and assembles the response body.
///
/// Each day is calculated once; its audit trail is kept when requested.
fn perform_calculation(
    records: Vec<DayRecord>,
    skipped_lines: usize,
    include_audit: bool,
    schedule: &ScheduleConfig,
) -> CalculationResponse {
    let mut log = AggregatedLog::new();
    let mut audit = Vec::new();
    let mut calculated_days = 0;
    let mut no_record_days = 0;
    let mut worked = Duration::zero();
    let mut overtime = Duration::zero();

    for record in records {
        let result = match record.recorded_times() {
            Some((first, last)) => {
                let calculation = calculate_work_and_overtime(first, last, schedule);
                calculated_days += 1;
                worked = worked + calculation.worked;
                overtime = overtime + calculation.overtime;
                let result = calculation.result();
                if include_audit {
                    audit.push(DayAudit {
                        date: record.date.clone(),
                        calculation,
                    });
                }
                result
            }
            None => {
                no_record_days += 1;
                WorkResult::NoRecord
            }
        };
        log.push(CalculatedDay { record, result });
    }
    debug!(calculated_days, no_record_days, "Totals computed");

    CalculationResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        schedule: ScheduleFile::from(schedule),
        skipped_lines,
        log,
        totals: CalculationTotals {
            calculated_days,
            no_record_days,
            worked_hours: duration_hours(worked),
            overtime_hours: duration_hours(overtime),
        },
        audit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::NO_RECORD_TEXT;
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::from_schedule(ScheduleConfig::default()))
    }

    async fn post_calculate(body: String) -> axum::response::Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_lines_return_200() {
        let body = serde_json::json!({
            "lines": [
                "2024-03-15, 08:50:00, 18:10:00",
                format!("2024-03-16, {}, 17:00:00", NO_RECORD_TEXT),
            ]
        });

        let response = post_calculate(body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let result: CalculationResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(result.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(result.skipped_lines, 0);
        assert_eq!(result.totals.calculated_days, 1);
        assert_eq!(result.totals.no_record_days, 1);
        assert_eq!(result.totals.worked_hours, Decimal::new(808, 2));
        assert_eq!(result.totals.overtime_hours, Decimal::ZERO);

        let march = result.log.month("2024", "03").unwrap();
        assert_eq!(march.len(), 2);
        assert_eq!(march[0].result.worked_text(), "8:05:00");
        assert_eq!(march[1].result, WorkResult::NoRecord);
        assert!(result.audit.is_empty());
    }

    #[tokio::test]
    async fn test_response_exposes_years_at_top_level() {
        let body = serde_json::json!({ "lines": ["2024-03-15, 09:00:00, 18:00:00"] });
        let response = post_calculate(body.to_string()).await;

        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["years"][0]["year"], "2024");
        assert_eq!(json["years"][0]["months"][0]["month"], "03");
        assert_eq!(json["years"][0]["months"][0]["days"][0]["result"]["worked"], "7:45:00");
        assert!(json.get("audit").is_none());
    }

    #[tokio::test]
    async fn test_structured_records_are_accepted() {
        let body = serde_json::json!({
            "records": [
                {"date": "2024-04-01", "first_time": "08:00:00", "last_time": "20:00:00"}
            ]
        });

        let response = post_calculate(body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let result: CalculationResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        let day = result.log.iter_days().next().unwrap();
        assert_eq!(day.result.worked_text(), "10:45:00");
        assert_eq!(day.result.overtime_text(), "1:45:00");
        assert_eq!(result.totals.overtime_hours, Decimal::new(175, 2));
    }

    #[tokio::test]
    async fn test_include_audit_returns_steps_for_calculated_days() {
        let body = serde_json::json!({
            "lines": [
                "2024-03-15, 12:30:00, 18:10:00",
                format!("2024-03-16, {}, {}", NO_RECORD_TEXT, NO_RECORD_TEXT),
            ],
            "include_audit": true
        });

        let response = post_calculate(body.to_string()).await;
        let result: CalculationResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();

        assert_eq!(result.audit.len(), 1);
        let audit = &result.audit[0];
        assert_eq!(audit.date, "2024-03-15");
        assert_eq!(audit.calculation.audit_steps[0].rule_id, "start_boundary_snap");
        assert_eq!(audit.calculation.worked, Duration::minutes(295));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let response = post_calculate("{invalid json".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_wrong_field_type_returns_400() {
        let response = post_calculate(r#"{"lines": "2024-03-15, 08:50:00, 18:10:00"}"#.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_empty_request_returns_no_records() {
        let response = post_calculate("{}".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "NO_RECORDS");
    }

    #[tokio::test]
    async fn test_only_malformed_lines_returns_no_records() {
        let body = serde_json::json!({ "lines": ["garbage", "2024-03-15, 08:50:00"] });
        let response = post_calculate(body.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "NO_RECORDS");
        assert!(error.message.contains("2 malformed lines"));
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let response = create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }

    #[test]
    fn test_audit_matches_logged_results() {
        let records = vec![
            DayRecord::from_fields("2024-03-15", "12:30:00", "18:10:00").unwrap(),
            DayRecord::from_fields("2024-03-16", NO_RECORD_TEXT, "garbage").unwrap(),
            DayRecord::from_fields("2024-03-17", "08:00:00", "20:00:00").unwrap(),
        ];
        let response = perform_calculation(records, 0, true, &ScheduleConfig::default());

        assert_eq!(response.audit.len(), 2);
        let calculated: Vec<_> = response
            .log
            .iter_days()
            .filter(|day| day.result != WorkResult::NoRecord)
            .collect();
        for (day, audit) in calculated.iter().zip(&response.audit) {
            assert_eq!(day.record.date, audit.date);
            assert_eq!(day.result, audit.calculation.result());
        }
        assert_eq!(response.totals.no_record_days, 1);
    }

    #[test]
    fn test_perform_calculation_keeps_arrival_order() {
        let records = vec![
            DayRecord::from_fields("2024-02-01", "09:00:00", "18:00:00").unwrap(),
            DayRecord::from_fields("2024-01-31", "09:00:00", "18:00:00").unwrap(),
        ];
        let response = perform_calculation(records, 0, false, &ScheduleConfig::default());

        let months: Vec<&str> = response.log.years()[0]
            .months
            .iter()
            .map(|m| m.month.as_str())
            .collect();
        assert_eq!(months, vec!["02", "01"]);
        assert_eq!(response.totals.worked_hours, Decimal::new(155, 1));
    }
}
