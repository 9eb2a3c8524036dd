//! HTTP request handlers for the Tax Position Estimator API.
//!
//! This module contains the handler functions for all API endpoints.

use std::str::FromStr;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{assess, build_scenario_report, generate_scenarios, select_best};
use crate::models::{AssessmentYear, TaxpayerProfile};

use super::request::EvaluateRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/evaluate", post(evaluate_handler))
        .route("/scenarios", post(scenarios_handler))
        .route("/scenarios/best", post(best_scenario_handler))
        .route("/rate-tables/:year", get(rate_table_handler))
        .with_state(state)
}

/// Maps a JSON extraction failure to an API error.
///
/// Bodies that are not JSON are `MALFORMED_JSON`; JSON that does not fit the
/// expected shape (missing fields, unknown year tokens, wrong types) is a
/// `VALIDATION_ERROR`.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
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
    ApiErrorResponse::bad_request(error)
}

fn json_ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /evaluate.
///
/// Evaluates one profile and returns the outcome with its breakdown and
/// audit trace.
async fn evaluate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing evaluate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let start_time = Instant::now();
    match assess(&request.profile, request.label(), state.config().tables()) {
        Ok(assessment) => {
            info!(
                correlation_id = %correlation_id,
                year = %request.profile.assessment_year,
                scenario = %assessment.outcome.scenario_label,
                final_refund_or_payable = %assessment.outcome.final_refund_or_payable,
                warnings = assessment.audit_trace.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Evaluation completed successfully"
            );
            json_ok(assessment)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Evaluation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /scenarios.
///
/// Evaluates every scenario and returns the comparison report.
async fn scenarios_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxpayerProfile>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing scenarios request");

    let profile = match payload {
        Ok(Json(profile)) => profile,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let start_time = Instant::now();
    match build_scenario_report(&profile, state.config().tables()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                report_id = %report.report_id,
                year = %report.assessment_year,
                best = %report.best_scenario.scenario_label,
                potential_savings = %report.potential_savings,
                duration_us = start_time.elapsed().as_micros(),
                "Scenario report completed successfully"
            );
            json_ok(report)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Scenario report failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /scenarios/best.
///
/// Evaluates every scenario and returns only the best outcome.
async fn best_scenario_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxpayerProfile>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing best scenario request");

    let profile = match payload {
        Ok(Json(profile)) => profile,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let outcomes = match generate_scenarios(&profile, state.config().tables()) {
        Ok(outcomes) => outcomes,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Scenario generation failed");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    match select_best(&outcomes) {
        Some(best) => {
            info!(
                correlation_id = %correlation_id,
                best = %best.scenario_label,
                final_refund_or_payable = %best.final_refund_or_payable,
                "Best scenario selected"
            );
            json_ok(best)
        }
        None => ApiErrorResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: ApiError::new("NO_SCENARIOS", "No scenarios were evaluated"),
        }
        .into_response(),
    }
}

/// Handler for GET /rate-tables/:year.
///
/// Returns the rate table for a year token such as `2023-24`.
async fn rate_table_handler(State(state): State<AppState>, Path(year): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();

    let table = AssessmentYear::from_str(&year).and_then(|year| state.config().rate_table(year));
    match table {
        Ok(table) => {
            info!(
                correlation_id = %correlation_id,
                year = %table.assessment_year,
                "Rate table served"
            );
            json_ok(table)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Rate table lookup failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, RateTable};
    use crate::models::{ScenarioReport, TaxAssessment, TaxOutcome};
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::load("./config").expect("Failed to load config"))
    }

    async fn post_json(uri: &str, body: String) -> Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_evaluate_default_profile() {
        let request = EvaluateRequest {
            profile: TaxpayerProfile::default(),
            scenario_label: None,
        };
        let response = post_json("/evaluate", serde_json::to_string(&request).unwrap()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let assessment: TaxAssessment =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(assessment.outcome.scenario_label, "Standard PAYG");
        assert_eq!(assessment.outcome.final_refund_or_payable, Decimal::new(-18_067, 0));
        assert_eq!(assessment.components.base_tax, Decimal::new(16_467, 0));
    }

    #[tokio::test]
    async fn test_evaluate_malformed_json_returns_400() {
        let response = post_json("/evaluate", "{ not json".to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_evaluate_missing_year_returns_validation_error() {
        let response = post_json("/evaluate", r#"{ "profile": {} }"#.to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("assessment_year"));
    }

    #[tokio::test]
    async fn test_scenarios_returns_report() {
        let response = post_json(
            "/scenarios",
            serde_json::to_string(&TaxpayerProfile::default()).unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let report: ScenarioReport = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(report.scenarios.len(), 4);
        assert_eq!(report.best_index, 1);
    }

    #[tokio::test]
    async fn test_best_scenario_returns_outcome() {
        let response = post_json(
            "/scenarios/best",
            serde_json::to_string(&TaxpayerProfile::default()).unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let best: TaxOutcome = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(best.scenario_label, "With Super Sacrifice");
    }

    #[tokio::test]
    async fn test_rate_table_lookup() {
        let response = create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .uri("/rate-tables/2019-20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let table: RateTable = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(table.assessment_year, AssessmentYear::Y2019_20);
        assert_eq!(table.brackets.len(), 5);
    }

    #[tokio::test]
    async fn test_rate_table_unknown_year_returns_400() {
        let response = create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .uri("/rate-tables/2030-31")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "UNSUPPORTED_YEAR");
    }
}
