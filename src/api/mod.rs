//! HTTP API module for the Nurse Pay Engine.
//!
//! This module provides the REST API endpoints for calculating nurse pay
//! with shift differentials, weekly overtime and estimated taxes.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, DifferentialsRequest, TaxRequest, WorkPeriodRequest};
pub use response::{ApiError, ApiErrorResponse, TaxTablesResponse};
pub use state::AppState;
