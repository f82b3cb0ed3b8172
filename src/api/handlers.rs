//! HTTP request handlers for the Nurse Pay Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{FederalTaxMethod, audit_earnings, calculate_tax_estimate};
use crate::error::EngineResult;
use crate::models::{AuditTrace, CalculationResult};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, TaxTablesResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/tax-tables", get(tax_tables_handler))
        .with_state(state)
}

fn error_response(error: ApiErrorResponse) -> Response {
    (
        error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error.error),
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns earnings, taxes and the
/// audit trace.
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
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
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
            return error_response(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            });
        }
    };

    let start_time = Instant::now();
    match perform_calculation(&request, &state) {
        Ok(result) => {
            let (cache_hits, cache_misses) = state.cache_stats();
            info!(
                correlation_id = %correlation_id,
                periods = request.work_periods.len(),
                gross = %result.earnings.total_earnings,
                net = %result.taxes.net_pay,
                cache_hits,
                cache_misses,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation rejected"
            );
            error_response(err.into())
        }
    }
}

/// Validates the request, computes earnings and estimates taxes.
fn perform_calculation(
    request: &CalculationRequest,
    state: &AppState,
) -> EngineResult<CalculationResult> {
    let start_time = Instant::now();
    let config = state.config();

    let earnings_request = request.to_earnings_request(config.differential_defaults())?;

    let federal = match request.tax.flat_federal_rate {
        Some(rate) => FederalTaxMethod::Flat(rate),
        None => FederalTaxMethod::Bracketed(config.federal_schedule(request.tax.filing_status)?),
    };
    let state_rate = match request.tax.state.as_deref() {
        Some(name) => config.state_rate(name)?,
        None => Decimal::ZERO,
    };

    let summary = state.earnings(&earnings_request);
    let earnings_audit = audit_earnings(&earnings_request, &summary, 1);

    let next_step = earnings_audit.audit_steps.len() as u32 + 1;
    let taxes = calculate_tax_estimate(summary.total_earnings, federal, state_rate, next_step);

    let mut steps = earnings_audit.audit_steps;
    steps.extend(taxes.audit_steps);

    Ok(CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        differentials: earnings_request.differentials,
        earnings: (*summary).clone(),
        taxes: taxes.estimate,
        audit_trace: AuditTrace {
            steps,
            warnings: earnings_audit.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

/// Handler for GET /tax-tables endpoint.
///
/// Lists the filing statuses and state rates a request may select.
async fn tax_tables_handler(State(state): State<AppState>) -> Json<TaxTablesResponse> {
    Json(TaxTablesResponse::from(state.config()))
}
