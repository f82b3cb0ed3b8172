//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax tables
//! and differential defaults from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{DifferentialConfig, DifferentialMode, FilingStatus, TaxBracketSchedule};

use super::types::{
    DifferentialDefaults, FederalBracketsConfig, StateRatesConfig, TaxTables, TaxYearMetadata,
};

/// Loads and provides access to tax tables and rate defaults.
///
/// # Directory Structure
///
/// ```text
/// config/us_2023/
/// ├── tax_year.yaml          # Tax year metadata
/// ├── federal_brackets.yaml  # Marginal brackets per filing status
/// ├── state_rates.yaml       # Flat state rates in percent
/// └── differentials.yaml     # Default hourly rate and differentials
/// ```
///
/// # Example
///
/// ```no_run
/// use nurse_pay_engine::config::ConfigLoader;
/// use nurse_pay_engine::models::FilingStatus;
///
/// let loader = ConfigLoader::load("./config/us_2023").unwrap();
///
/// let schedule = loader.federal_schedule(FilingStatus::Single).unwrap();
/// println!("{} brackets", schedule.brackets().len());
///
/// let rate = loader.state_rate("California").unwrap();
/// println!("California: {}%", rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tables: TaxTables,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/us_2023")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A bracket schedule is not contiguous or has a bounded top bracket
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<TaxYearMetadata>(&path.join("tax_year.yaml"))?;
        let federal = Self::load_yaml::<FederalBracketsConfig>(&path.join("federal_brackets.yaml"))?;
        let states = Self::load_yaml::<StateRatesConfig>(&path.join("state_rates.yaml"))?;
        let differentials = Self::load_yaml::<DifferentialDefaults>(&path.join("differentials.yaml"))?;

        tracing::debug!(
            path = %path.display(),
            year = metadata.year,
            filing_statuses = federal.filing_statuses.len(),
            states = states.state_rates.len(),
            "loaded tax tables"
        );

        Ok(Self::from_tables(TaxTables::new(
            metadata,
            federal.filing_statuses,
            states.state_rates,
            differentials,
        )))
    }

    /// Wraps tables built in memory instead of read from disk.
    ///
    /// # Example
    ///
    /// ```
    /// use nurse_pay_engine::config::{ConfigLoader, DifferentialDefaults, ModeDefaults, TaxTables, TaxYearMetadata};
    /// use nurse_pay_engine::models::{FilingStatus, TaxBracket, TaxBracketSchedule};
    /// use rust_decimal::Decimal;
    /// use std::collections::BTreeMap;
    ///
    /// let flat = ModeDefaults {
    ///     night_differential: Decimal::ZERO,
    ///     weekend_differential: Decimal::ZERO,
    ///     on_call_differential: Decimal::ZERO,
    /// };
    /// let schedule = TaxBracketSchedule::new(vec![TaxBracket {
    ///     lower: Decimal::ZERO,
    ///     upper: None,
    ///     rate: Decimal::new(10, 2),
    /// }])?;
    ///
    /// let tables = TaxTables::new(
    ///     TaxYearMetadata { year: 2030, name: "Test".into(), source_url: String::new() },
    ///     BTreeMap::from([(FilingStatus::Single, schedule)]),
    ///     BTreeMap::from([("Utopia".to_string(), Decimal::from(2))]),
    ///     DifferentialDefaults {
    ///         hourly_rate: Decimal::from(20),
    ///         charge_nurse_pay: Decimal::ZERO,
    ///         percentage: flat,
    ///         flat_amount: flat,
    ///     },
    /// );
    /// let loader = ConfigLoader::from_tables(tables);
    /// assert_eq!(loader.state_rate("utopia")?, Decimal::from(2));
    /// # Ok::<(), nurse_pay_engine::error::EngineError>(())
    /// ```
    pub fn from_tables(tables: TaxTables) -> Self {
        Self { tables }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying tables.
    pub fn tables(&self) -> &TaxTables {
        &self.tables
    }

    /// Returns the tax year metadata.
    pub fn metadata(&self) -> &TaxYearMetadata {
        self.tables.metadata()
    }

    /// Gets the federal bracket schedule for a filing status.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nurse_pay_engine::config::ConfigLoader;
    /// use nurse_pay_engine::models::FilingStatus;
    ///
    /// let loader = ConfigLoader::load("./config/us_2023")?;
    /// let schedule = loader.federal_schedule(FilingStatus::HeadOfHousehold)?;
    /// # Ok::<(), nurse_pay_engine::error::EngineError>(())
    /// ```
    pub fn federal_schedule(&self, status: FilingStatus) -> EngineResult<&TaxBracketSchedule> {
        self.tables
            .federal()
            .get(&status)
            .ok_or_else(|| EngineError::TaxScheduleNotFound {
                filing_status: status.to_string(),
            })
    }

    /// Filing statuses with a configured schedule.
    pub fn filing_statuses(&self) -> Vec<FilingStatus> {
        self.tables.federal().keys().copied().collect()
    }

    /// Gets the flat state rate, in percent, for a state name.
    ///
    /// Matching ignores case and surrounding whitespace.
    pub fn state_rate(&self, state: &str) -> EngineResult<Decimal> {
        let wanted = state.trim();
        self.tables
            .state_rates()
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|(_, rate)| *rate)
            .ok_or_else(|| EngineError::StateNotFound {
                state: state.to_string(),
            })
    }

    /// Returns the differential defaults.
    pub fn differential_defaults(&self) -> &DifferentialDefaults {
        self.tables.differentials()
    }

    /// Returns the defaults for a mode as a complete configuration.
    pub fn default_differentials(&self, mode: DifferentialMode) -> DifferentialConfig {
        self.tables.differentials().for_mode(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/us_2023"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().year, 2023);
    }

    #[test]
    fn test_all_filing_statuses_have_seven_brackets() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(
            loader.filing_statuses(),
            vec![
                FilingStatus::Single,
                FilingStatus::MarriedFilingJointly,
                FilingStatus::HeadOfHousehold
            ]
        );
        for status in loader.filing_statuses() {
            let schedule = loader.federal_schedule(status).unwrap();
            assert_eq!(schedule.brackets().len(), 7, "{}", status);
            assert_eq!(schedule.brackets()[6].rate, dec("0.37"));
            assert_eq!(schedule.brackets()[6].upper, None);
        }
    }

    #[test]
    fn test_single_first_bracket() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let first = &loader.federal_schedule(FilingStatus::Single).unwrap().brackets()[0];

        assert_eq!(first.lower, Decimal::ZERO);
        assert_eq!(first.upper, Some(dec("11000")));
        assert_eq!(first.rate, dec("0.10"));
    }

    #[test]
    fn test_state_rates_cover_fifty_states_and_dc() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.tables().state_rates().len(), 51);
        assert_eq!(loader.state_rate("California").unwrap(), dec("13.30"));
        assert_eq!(loader.state_rate("Texas").unwrap(), Decimal::ZERO);
        assert_eq!(loader.state_rate("District of Columbia").unwrap(), dec("8.95"));
    }

    #[test]
    fn test_state_lookup_ignores_case() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.state_rate("  new york ").unwrap(), dec("8.82"));
    }

    #[test]
    fn test_unknown_state_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.state_rate("Atlantis") {
            Err(EngineError::StateNotFound { state }) => assert_eq!(state, "Atlantis"),
            other => panic!("Expected StateNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_differential_defaults_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let pct = loader.default_differentials(DifferentialMode::Percentage);
        assert_eq!(pct.hourly_rate, dec("34.45"));
        assert_eq!(pct.night_differential, dec("16"));
        assert_eq!(pct.weekend_differential, dec("5"));
        assert_eq!(pct.on_call_differential, dec("50"));

        let flat = loader.default_differentials(DifferentialMode::FlatAmount);
        assert_eq!(flat.night_differential, dec("10"));
        assert_eq!(flat.on_call_differential, dec("5"));
        assert_eq!(loader.differential_defaults().charge_nurse_pay, Decimal::ZERO);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("tax_year.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }
}
