//! Calculation logic for the Nurse Pay Engine.
//!
//! This module contains the stages of a pay calculation: shift and weekend
//! classification, expansion of work periods into hour slots, effective
//! rate resolution with differentials, weekly aggregation with the 40 hour
//! overtime split, and federal and state tax estimation. The pipeline ties
//! the earnings stages together and the cache memoizes its output.

mod cache;
mod hour_expansion;
mod pipeline;
mod rate_resolver;
mod shift_classifier;
mod tax_estimation;
mod weekly_aggregation;

pub use cache::{DEFAULT_CACHE_CAPACITY, EarningsCache};
pub use hour_expansion::{PartialHourPolicy, expand_hours, expand_hours_with_policy};
pub use pipeline::{EarningsAudit, EarningsRequest, audit_earnings, calculate_earnings};
pub use rate_resolver::{ResolvedRate, rate_hour, rate_hours, resolve_rate};
pub use shift_classifier::{
    DAY_SHIFT_START_HOUR, NIGHT_SHIFT_START_HOUR, ShiftKind, classify_datetime, classify_shift,
    is_weekend,
};
pub use tax_estimation::{
    FederalTaxMethod, TaxEstimationResult, calculate_tax_estimate, estimate_federal_tax,
    estimate_flat_tax, estimate_state_tax,
};
pub use weekly_aggregation::{
    OVERTIME_MULTIPLIER, WEEKLY_OVERTIME_THRESHOLD, aggregate_weekly, week_start_for,
};
