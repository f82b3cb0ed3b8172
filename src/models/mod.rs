//! Core data models for the Nurse Pay Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod differential;
mod hour_unit;
mod tax;
mod week_bucket;
mod work_period;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, CalculationResult, EarningsSummary,
};
pub use differential::{DifferentialConfig, DifferentialMode, MAX_RATE_VALUE};
pub use hour_unit::{HourSlot, HourUnit, RateBreakdown};
pub use tax::{FilingStatus, TaxBracket, TaxBracketSchedule, TaxEstimate};
pub use week_bucket::WeekBucket;
pub use work_period::{MAX_WORK_PERIOD_HOURS, WorkPeriod, find_overlap};
