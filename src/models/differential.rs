//! Differential configuration model.
//!
//! This module defines the [`DifferentialConfig`] that drives the rate
//! resolver: the base hourly rate, the charge nurse premium and the night,
//! weekend and on-call differentials.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest accepted value for any rate or differential.
pub const MAX_RATE_VALUE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// How the night, weekend and on-call differential values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferentialMode {
    /// Differentials are percentages of the base hourly rate.
    #[default]
    Percentage,
    /// Differentials are flat dollar amounts added per hour.
    FlatAmount,
}

impl std::fmt::Display for DifferentialMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DifferentialMode::Percentage => write!(f, "percentage"),
            DifferentialMode::FlatAmount => write!(f, "flat_amount"),
        }
    }
}

/// Rate configuration for a single calculation.
///
/// All values are expected to lie in `0..=MAX_RATE_VALUE`;
/// [`DifferentialConfig::validate`] checks this for callers that accept
/// untrusted input.
///
/// # Example
///
/// ```
/// use nurse_pay_engine::models::{DifferentialConfig, DifferentialMode};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = DifferentialConfig {
///     hourly_rate: Decimal::from_str("92.25").unwrap(),
///     charge_nurse_pay: Decimal::ZERO,
///     night_differential: Decimal::from(16),
///     weekend_differential: Decimal::from(5),
///     on_call_differential: Decimal::from(50),
///     differential_mode: DifferentialMode::Percentage,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DifferentialConfig {
    /// Base hourly rate.
    pub hourly_rate: Decimal,
    /// Flat per-hour charge nurse premium (zero when not a charge nurse).
    pub charge_nurse_pay: Decimal,
    /// Night shift differential (19:00 to 06:59).
    pub night_differential: Decimal,
    /// Weekend differential (Saturday and Sunday).
    pub weekend_differential: Decimal,
    /// On-call differential.
    pub on_call_differential: Decimal,
    /// How the three differentials are interpreted.
    #[serde(default)]
    pub differential_mode: DifferentialMode,
}

impl DifferentialConfig {
    /// A configuration that pays the base rate with no additions.
    pub fn base_only(hourly_rate: Decimal) -> Self {
        Self {
            hourly_rate,
            charge_nurse_pay: Decimal::ZERO,
            night_differential: Decimal::ZERO,
            weekend_differential: Decimal::ZERO,
            on_call_differential: Decimal::ZERO,
            differential_mode: DifferentialMode::Percentage,
        }
    }

    /// Rejects negative rates and differentials, and any above [`MAX_RATE_VALUE`].
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("hourly_rate", self.hourly_rate),
            ("charge_nurse_pay", self.charge_nurse_pay),
            ("night_differential", self.night_differential),
            ("weekend_differential", self.weekend_differential),
            ("on_call_differential", self.on_call_differential),
        ];

        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidDifferential {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", value),
                });
            }
            if value > MAX_RATE_VALUE {
                return Err(EngineError::InvalidDifferential {
                    field: field.to_string(),
                    message: format!("must not exceed {}, got {}", MAX_RATE_VALUE, value),
                });
            }
        }

        Ok(())
    }

    /// Strips trailing zeros so equal rates share one representation.
    pub fn normalized(&self) -> Self {
        Self {
            hourly_rate: self.hourly_rate.normalize(),
            charge_nurse_pay: self.charge_nurse_pay.normalize(),
            night_differential: self.night_differential.normalize(),
            weekend_differential: self.weekend_differential.normalize(),
            on_call_differential: self.on_call_differential.normalize(),
            differential_mode: self.differential_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_base_only_has_no_differentials() {
        let config = DifferentialConfig::base_only(dec("20"));
        assert_eq!(config.hourly_rate, dec("20"));
        assert_eq!(config.charge_nurse_pay, Decimal::ZERO);
        assert_eq!(config.night_differential, Decimal::ZERO);
        assert_eq!(config.differential_mode, DifferentialMode::Percentage);
    }

    #[test]
    fn test_validate_rejects_negative_night_differential() {
        let mut config = DifferentialConfig::base_only(dec("20"));
        config.night_differential = dec("-1");

        match config.validate() {
            Err(EngineError::InvalidDifferential { field, .. }) => {
                assert_eq!(field, "night_differential");
            }
            other => panic!("Expected InvalidDifferential, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_rate_above_maximum() {
        let config = DifferentialConfig::base_only(dec("50000000000000000000000000000"));

        match config.validate() {
            Err(EngineError::InvalidDifferential { field, .. }) => {
                assert_eq!(field, "hourly_rate");
            }
            other => panic!("Expected InvalidDifferential, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_maximum_rate() {
        let mut config = DifferentialConfig::base_only(MAX_RATE_VALUE);
        config.night_differential = MAX_RATE_VALUE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_normalized_strips_trailing_zeros() {
        let mut config = DifferentialConfig::base_only(dec("20.00"));
        config.weekend_differential = dec("5.0");
        let normalized = config.normalized();

        assert_eq!(normalized.hourly_rate.to_string(), "20");
        assert_eq!(normalized.weekend_differential.to_string(), "5");
        assert_eq!(normalized, config);
    }

    #[test]
    fn test_validate_accepts_zero_values() {
        let config = DifferentialConfig::base_only(Decimal::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mode_serialization() {
        let json = serde_json::to_string(&DifferentialMode::FlatAmount).unwrap();
        assert_eq!(json, "\"flat_amount\"");

        let mode: DifferentialMode = serde_json::from_str("\"percentage\"").unwrap();
        assert_eq!(mode, DifferentialMode::Percentage);
    }

    #[test]
    fn test_mode_defaults_to_percentage_when_missing() {
        let json = r#"{
            "hourly_rate": "34.45",
            "charge_nurse_pay": "0",
            "night_differential": "16",
            "weekend_differential": "5",
            "on_call_differential": "50"
        }"#;
        let config: DifferentialConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.differential_mode, DifferentialMode::Percentage);
        assert_eq!(config.hourly_rate, dec("34.45"));
    }
}
