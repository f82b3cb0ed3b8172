//! Response types for the Nurse Pay Engine API.
//!
//! This module defines the error response structures, error handling and
//! the tax table listing for the HTTP API.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::error::EngineError;
use crate::models::FilingStatus;

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

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::InvalidBracketSchedule { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid tax tables", message),
            },
            EngineError::TaxScheduleNotFound { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "TAX_SCHEDULE_NOT_FOUND",
                    message,
                    "No federal brackets are configured for this filing status",
                ),
            },
            EngineError::StateNotFound { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "STATE_NOT_FOUND",
                    message,
                    "See GET /tax-tables for the supported state names",
                ),
            },
            EngineError::InvalidWorkPeriod { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_WORK_PERIOD",
                    message,
                    "Each work period must end after it starts",
                ),
            },
            EngineError::OverlappingWorkPeriods { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "OVERLAPPING_WORK_PERIODS",
                    message,
                    "Work periods must not share any time",
                ),
            },
            EngineError::InvalidDifferential { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_DIFFERENTIAL", message),
            },
            EngineError::InvalidTaxInput { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_TAX_INPUT", message),
            },
        }
    }
}

/// Response body for `GET /tax-tables`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxTablesResponse {
    /// The tax year the tables describe.
    pub year: i32,
    /// Name of the table set.
    pub name: String,
    /// Filing statuses with a configured schedule.
    pub filing_statuses: Vec<FilingStatus>,
    /// State rates in percent, ordered by state name.
    pub state_rates: BTreeMap<String, Decimal>,
}

impl From<&ConfigLoader> for TaxTablesResponse {
    fn from(config: &ConfigLoader) -> Self {
        Self {
            year: config.metadata().year,
            name: config.metadata().name.clone(),
            filing_statuses: config.filing_statuses(),
            state_rates: config.tables().state_rates().clone(),
        }
    }
}
