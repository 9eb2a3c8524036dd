//! Response types for the Tax Position Estimator API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

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

    /// Creates an unsupported assessment year error response.
    pub fn unsupported_year(value: &str) -> Self {
        Self::with_details(
            "UNSUPPORTED_YEAR",
            format!("Unsupported assessment year: {}", value),
            "Supported years are 2018-19 through 2024-25",
        )
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
    /// A 400 response with the given body.
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
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidRateTable { year, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid rate table",
                    format!("{}: {}", year, message),
                ),
            },
            EngineError::RateTableNotFound { year } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "RATE_TABLE_NOT_FOUND",
                    format!("No rate table configured for assessment year {}", year),
                    "The engine has no tax rates loaded for the requested year",
                ),
            },
            EngineError::UnsupportedAssessmentYear { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::unsupported_year(&value),
            },
            EngineError::AmountOutOfRange { field, value, max } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Amount for {} is out of range: {}", field, value),
                    format!("Amounts may not exceed {}", max),
                ))
            }
            EngineError::ProfileStore { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "PROFILE_STORE_ERROR",
                    "Profile store error",
                    message,
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssessmentYear;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_unsupported_year_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::UnsupportedAssessmentYear {
            value: "2030-31".to_string(),
        }
        .into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "UNSUPPORTED_YEAR");
        assert!(api_error.error.message.contains("2030-31"));
    }

    #[test]
    fn test_missing_rate_table_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::RateTableNotFound {
            year: AssessmentYear::Y2019_20,
        }
        .into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "RATE_TABLE_NOT_FOUND");
        assert!(api_error.error.message.contains("2019-20"));
    }

    #[test]
    fn test_amount_out_of_range_maps_to_validation_error() {
        let api_error: ApiErrorResponse = EngineError::AmountOutOfRange {
            field: "deductions.donations".to_string(),
            value: "79228162514264337593543950335".to_string(),
            max: "1000000000000000".to_string(),
        }
        .into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
        assert!(api_error.error.message.contains("deductions.donations"));
        assert_eq!(
            api_error.error.details.as_deref(),
            Some("Amounts may not exceed 1000000000000000")
        );
    }

    #[test]
    fn test_config_errors_are_internal() {
        let api_error: ApiErrorResponse = EngineError::InvalidRateTable {
            year: "2023-24".to_string(),
            message: "top bracket must be unbounded".to_string(),
        }
        .into();

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_store_errors_are_internal() {
        let api_error: ApiErrorResponse = EngineError::ProfileStore {
            message: "disk full".to_string(),
        }
        .into();

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "PROFILE_STORE_ERROR");
        assert_eq!(api_error.error.details.as_deref(), Some("disk full"));
    }
}
