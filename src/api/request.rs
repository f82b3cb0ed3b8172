//! Request types for the Nurse Pay Engine API.
//!
//! This module defines the JSON request structures for the `/calculate` endpoint.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{EarningsRequest, PartialHourPolicy};
use crate::config::DifferentialDefaults;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DifferentialConfig, DifferentialMode, FilingStatus, MAX_WORK_PERIOD_HOURS, WorkPeriod,
    find_overlap,
};

/// Request body for the `/calculate` endpoint.
///
/// Contains the session's work periods, the rate settings and the tax
/// options for one calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The work periods to be paid.
    pub work_periods: Vec<WorkPeriodRequest>,
    /// Rate and differential settings; omitted values use configured defaults.
    #[serde(default)]
    pub differentials: DifferentialsRequest,
    /// Handling of trailing partial hours.
    #[serde(default)]
    pub partial_hours: PartialHourPolicy,
    /// Tax estimation options.
    #[serde(default)]
    pub tax: TaxRequest,
}

/// Work period information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkPeriodRequest {
    /// The start of the period.
    pub start: NaiveDateTime,
    /// The end of the period (exclusive).
    pub end: NaiveDateTime,
    /// Whether the period was worked on call.
    #[serde(default)]
    pub on_call: bool,
}

/// Rate and differential settings in a calculation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DifferentialsRequest {
    /// Whether differentials are percentages or flat dollar amounts.
    #[serde(default)]
    pub mode: DifferentialMode,
    /// Base hourly rate.
    pub hourly_rate: Option<Decimal>,
    /// Flat per-hour charge nurse premium.
    pub charge_nurse_pay: Option<Decimal>,
    /// Night shift differential.
    pub night_differential: Option<Decimal>,
    /// Weekend differential.
    pub weekend_differential: Option<Decimal>,
    /// On-call differential.
    pub on_call_differential: Option<Decimal>,
}

/// Tax options in a calculation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxRequest {
    /// Selects the federal bracket schedule.
    #[serde(default)]
    pub filing_status: FilingStatus,
    /// State name; no state means no state tax.
    pub state: Option<String>,
    /// When set, federal tax is this fraction of gross instead of bracketed.
    pub flat_federal_rate: Option<Decimal>,
}

impl From<WorkPeriodRequest> for WorkPeriod {
    fn from(req: WorkPeriodRequest) -> Self {
        WorkPeriod {
            start: req.start,
            end: req.end,
            on_call: req.on_call,
        }
    }
}

impl DifferentialsRequest {
    /// Fills omitted values from the defaults for the requested mode.
    pub fn resolve(&self, defaults: &DifferentialDefaults) -> DifferentialConfig {
        let base = defaults.for_mode(self.mode);

        DifferentialConfig {
            hourly_rate: self.hourly_rate.unwrap_or(base.hourly_rate),
            charge_nurse_pay: self.charge_nurse_pay.unwrap_or(base.charge_nurse_pay),
            night_differential: self.night_differential.unwrap_or(base.night_differential),
            weekend_differential: self.weekend_differential.unwrap_or(base.weekend_differential),
            on_call_differential: self.on_call_differential.unwrap_or(base.on_call_differential),
            differential_mode: self.mode,
        }
    }
}

impl TaxRequest {
    /// Rejects a flat federal rate outside `0..=1`.
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(rate) = self.flat_federal_rate {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::InvalidTaxInput {
                    field: "flat_federal_rate".to_string(),
                    message: format!("must be a fraction between 0 and 1, got {}", rate),
                });
            }
        }
        Ok(())
    }
}

impl CalculationRequest {
    /// Validates the request and builds the earnings input.
    ///
    /// Rejects periods with `end <= start` or longer than a week,
    /// overlapping periods, and rates or differentials outside
    /// `0..=MAX_RATE_VALUE`. Rates are normalized so that `"20"` and
    /// `"20.00"` build the same request.
    pub fn to_earnings_request(&self, defaults: &DifferentialDefaults) -> EngineResult<EarningsRequest> {
        let work_periods: Vec<WorkPeriod> =
            self.work_periods.iter().cloned().map(Into::into).collect();

        if let Some(index) = work_periods.iter().position(|p| !p.is_valid()) {
            return Err(EngineError::InvalidWorkPeriod {
                index,
                message: "end must be after start".to_string(),
            });
        }

        if let Some(index) = work_periods.iter().position(|p| p.exceeds_max_span()) {
            return Err(EngineError::InvalidWorkPeriod {
                index,
                message: format!("must not be longer than {} hours", MAX_WORK_PERIOD_HOURS),
            });
        }

        if let Some((first, second)) = find_overlap(&work_periods) {
            return Err(EngineError::OverlappingWorkPeriods { first, second });
        }

        let differentials = self.differentials.resolve(defaults).normalized();
        differentials.validate()?;
        self.tax.validate()?;

        Ok(EarningsRequest {
            work_periods,
            differentials,
            partial_hours: self.partial_hours,
        })
    }
}
