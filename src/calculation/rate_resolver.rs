//! Effective hourly rate resolution.
//!
//! This module prices a single hour of work. Differentials combine
//! additively: each applicable differential is computed from the base
//! rate and added on, so night, weekend and on-call never compound.
//!
//! ## Rate Structure
//!
//! ```text
//! effective = base
//!           + charge_nurse_pay                      (when > 0)
//!           + base * night / 100   | night          (19:00-06:59)
//!           + base * weekend / 100 | weekend        (Sat, Sun)
//!           + base * on_call / 100 | on_call        (on-call periods)
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::shift_classifier::{ShiftKind, classify_datetime, classify_shift, is_weekend};
use crate::models::{
    AuditStep, DifferentialConfig, DifferentialMode, HourSlot, HourUnit, RateBreakdown,
};

/// The priced result for one hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRate {
    /// Sum of all components.
    pub effective_rate: Decimal,
    /// Each component separately.
    pub breakdown: RateBreakdown,
}

/// Converts a differential value to a per-hour dollar addition.
fn differential_amount(base: Decimal, value: Decimal, mode: DifferentialMode) -> Decimal {
    match mode {
        DifferentialMode::Percentage => base * value / Decimal::ONE_HUNDRED,
        DifferentialMode::FlatAmount => value,
    }
}

/// Resolves the effective hourly rate for one hour of work.
///
/// # Arguments
///
/// * `hour_of_day` - The hour (0-23) the unit starts in
/// * `is_weekend` - Whether the unit falls on a Saturday or Sunday
/// * `is_on_call` - Whether the unit was worked on call
/// * `config` - The rate and differential configuration
///
/// # Examples
///
/// ## Saturday day hour, 5% weekend differential
///
/// ```
/// use nurse_pay_engine::calculation::resolve_rate;
/// use nurse_pay_engine::models::DifferentialConfig;
/// use rust_decimal::Decimal;
///
/// let mut config = DifferentialConfig::base_only(Decimal::from(100));
/// config.weekend_differential = Decimal::from(5);
///
/// let resolved = resolve_rate(10, true, false, &config);
/// assert_eq!(resolved.effective_rate, Decimal::from(105));
/// ```
///
/// ## Night, weekend and on-call together
///
/// ```
/// use nurse_pay_engine::calculation::resolve_rate;
/// use nurse_pay_engine::models::{DifferentialConfig, DifferentialMode};
/// use rust_decimal::Decimal;
///
/// let config = DifferentialConfig {
///     hourly_rate: Decimal::from(100),
///     charge_nurse_pay: Decimal::ZERO,
///     night_differential: Decimal::from(16),
///     weekend_differential: Decimal::from(5),
///     on_call_differential: Decimal::from(50),
///     differential_mode: DifferentialMode::Percentage,
/// };
///
/// let resolved = resolve_rate(22, true, true, &config);
/// assert_eq!(resolved.effective_rate, Decimal::from(171));
/// ```
pub fn resolve_rate(
    hour_of_day: u32,
    is_weekend: bool,
    is_on_call: bool,
    config: &DifferentialConfig,
) -> ResolvedRate {
    resolve_for_shift(classify_shift(hour_of_day), is_weekend, is_on_call, config)
}

fn resolve_for_shift(
    shift: ShiftKind,
    is_weekend: bool,
    is_on_call: bool,
    config: &DifferentialConfig,
) -> ResolvedRate {
    let base = config.hourly_rate;
    let mode = config.differential_mode;

    let charge_nurse = if config.charge_nurse_pay > Decimal::ZERO {
        config.charge_nurse_pay
    } else {
        Decimal::ZERO
    };

    let night = match shift {
        ShiftKind::Night => differential_amount(base, config.night_differential, mode),
        ShiftKind::Day => Decimal::ZERO,
    };

    let weekend = if is_weekend {
        differential_amount(base, config.weekend_differential, mode)
    } else {
        Decimal::ZERO
    };

    let on_call = if is_on_call {
        differential_amount(base, config.on_call_differential, mode)
    } else {
        Decimal::ZERO
    };

    let breakdown = RateBreakdown {
        base,
        charge_nurse,
        night,
        weekend,
        on_call,
    };

    ResolvedRate {
        effective_rate: breakdown.total(),
        breakdown,
    }
}

/// Classifies and prices an hour slot.
pub fn rate_hour(slot: &HourSlot, config: &DifferentialConfig) -> HourUnit {
    let shift = classify_datetime(slot.timestamp);
    let weekend = is_weekend(slot.timestamp.date());
    let resolved = resolve_for_shift(shift, weekend, slot.on_call, config);

    HourUnit {
        timestamp: slot.timestamp,
        hours: slot.hours,
        is_night: shift == ShiftKind::Night,
        is_weekend: weekend,
        is_on_call: slot.on_call,
        effective_rate: resolved.effective_rate,
        breakdown: resolved.breakdown,
    }
}

/// Prices every slot.
pub fn rate_hours(slots: &[HourSlot], config: &DifferentialConfig) -> Vec<HourUnit> {
    slots.iter().map(|slot| rate_hour(slot, config)).collect()
}

/// Records the per-hour additions in force for a calculation.
pub fn rate_resolution_audit_step(config: &DifferentialConfig, step_number: u32) -> AuditStep {
    let base = config.hourly_rate;
    let mode = config.differential_mode;
    let night = differential_amount(base, config.night_differential, mode);
    let weekend = differential_amount(base, config.weekend_differential, mode);
    let on_call = differential_amount(base, config.on_call_differential, mode);

    AuditStep {
        step_number,
        rule_id: "rate_resolution".to_string(),
        rule_name: "Differential Rate Resolution".to_string(),
        input: serde_json::json!({
            "hourly_rate": base.normalize().to_string(),
            "charge_nurse_pay": config.charge_nurse_pay.normalize().to_string(),
            "night_differential": config.night_differential.normalize().to_string(),
            "weekend_differential": config.weekend_differential.normalize().to_string(),
            "on_call_differential": config.on_call_differential.normalize().to_string(),
            "differential_mode": mode.to_string()
        }),
        output: serde_json::json!({
            "night_addition": night.normalize().to_string(),
            "weekend_addition": weekend.normalize().to_string(),
            "on_call_addition": on_call.normalize().to_string()
        }),
        reasoning: format!(
            "Additive {} differentials on base ${}: night +${}, weekend +${}, on-call +${}, charge nurse +${}",
            mode,
            base.normalize(),
            night.normalize(),
            weekend.normalize(),
            on_call.normalize(),
            config.charge_nurse_pay.max(Decimal::ZERO).normalize()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn percentage_config() -> DifferentialConfig {
        DifferentialConfig {
            hourly_rate: dec("100"),
            charge_nurse_pay: Decimal::ZERO,
            night_differential: dec("16"),
            weekend_differential: dec("5"),
            on_call_differential: dec("50"),
            differential_mode: DifferentialMode::Percentage,
        }
    }

    fn flat_config() -> DifferentialConfig {
        DifferentialConfig {
            hourly_rate: dec("34.45"),
            charge_nurse_pay: Decimal::ZERO,
            night_differential: dec("10"),
            weekend_differential: dec("5"),
            on_call_differential: dec("5"),
            differential_mode: DifferentialMode::FlatAmount,
        }
    }

    fn make_slot(s: &str, on_call: bool) -> HourSlot {
        HourSlot {
            timestamp: NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap(),
            hours: Decimal::ONE,
            on_call,
        }
    }

    // ==========================================================================
    // RR-001: weekday day hour pays the base rate
    // ==========================================================================
    #[test]
    fn test_rr_001_weekday_day_hour_is_base_rate() {
        let resolved = resolve_rate(10, false, false, &percentage_config());
        assert_eq!(resolved.effective_rate, dec("100"));
        assert_eq!(resolved.breakdown.night, Decimal::ZERO);
        assert_eq!(resolved.breakdown.weekend, Decimal::ZERO);
        assert_eq!(resolved.breakdown.on_call, Decimal::ZERO);
    }

    // ==========================================================================
    // RR-002: Saturday hour with 5% weekend differential
    // ==========================================================================
    #[test]
    fn test_rr_002_weekend_percentage() {
        let resolved = resolve_rate(10, true, false, &percentage_config());
        assert_eq!(resolved.effective_rate, dec("105.00"));
        assert_eq!(resolved.breakdown.weekend, dec("5"));
    }

    // ==========================================================================
    // RR-003: night, weekend and on-call add without compounding
    // ==========================================================================
    #[test]
    fn test_rr_003_all_differentials_additive() {
        let resolved = resolve_rate(23, true, true, &percentage_config());
        assert_eq!(resolved.effective_rate, dec("171.00"));
        assert_eq!(resolved.breakdown.night, dec("16"));
        assert_eq!(resolved.breakdown.weekend, dec("5"));
        assert_eq!(resolved.breakdown.on_call, dec("50"));
    }

    // ==========================================================================
    // RR-004: flat amount mode adds dollars
    // ==========================================================================
    #[test]
    fn test_rr_004_flat_amount_mode() {
        let resolved = resolve_rate(2, true, true, &flat_config());
        // 34.45 + 10 + 5 + 5
        assert_eq!(resolved.effective_rate, dec("54.45"));
        assert_eq!(resolved.breakdown.night, dec("10"));
    }

    // ==========================================================================
    // RR-005: charge nurse premium coexists with differentials
    // ==========================================================================
    #[test]
    fn test_rr_005_charge_nurse_is_additive() {
        let mut config = percentage_config();
        config.charge_nurse_pay = dec("3.50");

        let resolved = resolve_rate(20, false, false, &config);
        // 100 + 3.50 + 16
        assert_eq!(resolved.effective_rate, dec("119.50"));
        assert_eq!(resolved.breakdown.charge_nurse, dec("3.50"));
    }

    // ==========================================================================
    // RR-006: night percentage on a fractional base rate
    // ==========================================================================
    #[test]
    fn test_rr_006_night_percentage_of_fractional_rate() {
        let mut config = percentage_config();
        config.hourly_rate = dec("92.25");

        let resolved = resolve_rate(19, false, false, &config);
        // 92.25 * 0.16 = 14.76
        assert_eq!(resolved.breakdown.night, dec("14.76"));
        assert_eq!(resolved.effective_rate, dec("107.01"));
    }

    // ==========================================================================
    // RR-007: rate_hour classifies from the slot timestamp
    // ==========================================================================
    #[test]
    fn test_rr_007_rate_hour_classifies_slot() {
        // 2024-08-31 is a Saturday
        let unit = rate_hour(&make_slot("2024-08-31 21:00", true), &percentage_config());

        assert!(unit.is_night);
        assert!(unit.is_weekend);
        assert!(unit.is_on_call);
        assert_eq!(unit.effective_rate, dec("171"));
        assert_eq!(unit.effective_rate, unit.breakdown.total());
    }

    #[test]
    fn test_rate_hour_flags_night_without_night_pay() {
        let config = DifferentialConfig::base_only(dec("40"));
        let night = rate_hour(&make_slot("2024-08-26 06:00", false), &config);
        let day = rate_hour(&make_slot("2024-08-26 07:00", false), &config);

        assert!(night.is_night);
        assert_eq!(night.breakdown.night, Decimal::ZERO);
        assert!(!day.is_night);
        assert_eq!(night.effective_rate, day.effective_rate);
    }

    #[test]
    fn test_rate_hours_preserves_order_and_length() {
        let slots = vec![
            make_slot("2024-08-26 07:00", false),
            make_slot("2024-08-26 19:00", false),
        ];
        let units = rate_hours(&slots, &percentage_config());

        assert_eq!(units.len(), 2);
        assert!(!units[0].is_night);
        assert!(units[1].is_night);
    }

    #[test]
    fn test_audit_step_lists_additions() {
        let step = rate_resolution_audit_step(&percentage_config(), 2);

        assert_eq!(step.step_number, 2);
        assert_eq!(step.rule_id, "rate_resolution");
        assert_eq!(step.output["night_addition"], "16");
        assert_eq!(step.output["on_call_addition"], "50");
        assert!(step.reasoning.contains("Additive percentage"));
    }
}
