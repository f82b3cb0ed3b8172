//! Configuration types for pay and tax estimation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{DifferentialConfig, DifferentialMode, FilingStatus, TaxBracketSchedule};

/// Metadata about the tax year the tables describe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxYearMetadata {
    /// The tax year (e.g., 2023).
    pub year: i32,
    /// The human-readable name of the table set.
    pub name: String,
    /// URL to the published source of the brackets.
    pub source_url: String,
}

/// Federal brackets configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct FederalBracketsConfig {
    /// Bracket schedule per filing status.
    pub filing_statuses: BTreeMap<FilingStatus, TaxBracketSchedule>,
}

/// State rates configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct StateRatesConfig {
    /// Map of state name to flat rate in percent.
    pub state_rates: BTreeMap<String, Decimal>,
}

/// Default night, weekend and on-call values for one differential mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeDefaults {
    /// Night shift differential.
    pub night_differential: Decimal,
    /// Weekend differential.
    pub weekend_differential: Decimal,
    /// On-call differential.
    pub on_call_differential: Decimal,
}

/// Differential defaults from differentials.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferentialDefaults {
    /// Default base hourly rate.
    pub hourly_rate: Decimal,
    /// Default charge nurse premium.
    pub charge_nurse_pay: Decimal,
    /// Defaults when differentials are percentages.
    pub percentage: ModeDefaults,
    /// Defaults when differentials are flat dollar amounts.
    pub flat_amount: ModeDefaults,
}

impl DifferentialDefaults {
    /// Returns the defaults for a mode as a complete [`DifferentialConfig`].
    pub fn for_mode(&self, mode: DifferentialMode) -> DifferentialConfig {
        let values = match mode {
            DifferentialMode::Percentage => self.percentage,
            DifferentialMode::FlatAmount => self.flat_amount,
        };

        DifferentialConfig {
            hourly_rate: self.hourly_rate,
            charge_nurse_pay: self.charge_nurse_pay,
            night_differential: values.night_differential,
            weekend_differential: values.weekend_differential,
            on_call_differential: values.on_call_differential,
            differential_mode: mode,
        }
    }
}

/// The complete tax and rate configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct TaxTables {
    metadata: TaxYearMetadata,
    federal: BTreeMap<FilingStatus, TaxBracketSchedule>,
    state_rates: BTreeMap<String, Decimal>,
    differentials: DifferentialDefaults,
}

impl TaxTables {
    /// Creates a new TaxTables from its component parts.
    pub fn new(
        metadata: TaxYearMetadata,
        federal: BTreeMap<FilingStatus, TaxBracketSchedule>,
        state_rates: BTreeMap<String, Decimal>,
        differentials: DifferentialDefaults,
    ) -> Self {
        Self {
            metadata,
            federal,
            state_rates,
            differentials,
        }
    }

    /// Returns the tax year metadata.
    pub fn metadata(&self) -> &TaxYearMetadata {
        &self.metadata
    }

    /// Returns every federal schedule, keyed by filing status.
    pub fn federal(&self) -> &BTreeMap<FilingStatus, TaxBracketSchedule> {
        &self.federal
    }

    /// Returns every state rate, sorted by state name.
    pub fn state_rates(&self) -> &BTreeMap<String, Decimal> {
        &self.state_rates
    }

    /// Returns the differential defaults.
    pub fn differentials(&self) -> &DifferentialDefaults {
        &self.differentials
    }
}
