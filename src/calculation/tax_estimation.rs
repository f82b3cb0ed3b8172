//! Income tax estimation.
//!
//! This module applies a marginal bracket schedule (or a flat rate) for
//! federal tax and a flat percentage for state tax to a gross pay figure.
//! Nothing is rounded here; rounding is a presentation concern.

use rust_decimal::Decimal;

use crate::models::{AuditStep, TaxBracketSchedule, TaxEstimate};

/// How federal tax is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederalTaxMethod<'a> {
    /// Marginal brackets.
    Bracketed(&'a TaxBracketSchedule),
    /// A single rate on all income, as a fraction (0.15 for 15%).
    Flat(Decimal),
}

/// The result of estimating taxes, with audit steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxEstimationResult {
    /// The estimate.
    pub estimate: TaxEstimate,
    /// One step for federal tax, one for state tax.
    pub audit_steps: Vec<AuditStep>,
}

/// Marginal federal tax on `income`.
///
/// For each bracket in ascending order, income above the bracket's lower
/// bound is taxed at the bracket's rate up to its upper bound; iteration
/// stops at the first bracket the income does not reach.
///
/// # Example
///
/// ```
/// use nurse_pay_engine::calculation::estimate_federal_tax;
/// use nurse_pay_engine::models::{TaxBracket, TaxBracketSchedule};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let schedule = TaxBracketSchedule::new(vec![
///     TaxBracket { lower: dec("0"), upper: Some(dec("11000")), rate: dec("0.10") },
///     TaxBracket { lower: dec("11000"), upper: None, rate: dec("0.12") },
/// ]).unwrap();
///
/// // 11000 * 0.10 + 4000 * 0.12
/// assert_eq!(estimate_federal_tax(dec("15000"), &schedule), dec("1580"));
/// ```
pub fn estimate_federal_tax(income: Decimal, schedule: &TaxBracketSchedule) -> Decimal {
    let mut tax = Decimal::ZERO;

    for bracket in schedule.brackets() {
        if income <= bracket.lower {
            break;
        }
        let top = bracket.upper.map_or(income, |upper| income.min(upper));
        tax += (top - bracket.lower) * bracket.rate;
    }

    tax
}

/// Flat federal tax: `income * rate`.
pub fn estimate_flat_tax(income: Decimal, rate: Decimal) -> Decimal {
    income * rate
}

/// State tax at a flat percentage: `income * percent / 100`.
///
/// # Example
///
/// ```
/// use nurse_pay_engine::calculation::estimate_state_tax;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tax = estimate_state_tax(Decimal::from(1000), Decimal::from_str("4.95").unwrap());
/// assert_eq!(tax, Decimal::from_str("49.50").unwrap());
/// ```
pub fn estimate_state_tax(income: Decimal, state_rate_percent: Decimal) -> Decimal {
    income * state_rate_percent / Decimal::ONE_HUNDRED
}

/// Estimates federal and state tax and net pay for a gross amount.
///
/// # Arguments
///
/// * `gross_income` - Pre-tax earnings
/// * `federal` - Bracketed or flat federal method
/// * `state_rate_percent` - State rate as a percentage (zero for no state tax)
/// * `step_number_start` - The starting step number for audit trail sequencing
pub fn calculate_tax_estimate(
    gross_income: Decimal,
    federal: FederalTaxMethod<'_>,
    state_rate_percent: Decimal,
    step_number_start: u32,
) -> TaxEstimationResult {
    let federal_tax = match federal {
        FederalTaxMethod::Bracketed(schedule) => estimate_federal_tax(gross_income, schedule),
        FederalTaxMethod::Flat(rate) => estimate_flat_tax(gross_income, rate),
    };
    let state_tax = estimate_state_tax(gross_income, state_rate_percent);
    let total_tax = federal_tax + state_tax;

    let federal_step = match federal {
        FederalTaxMethod::Bracketed(schedule) => {
            let brackets_reached = schedule
                .brackets()
                .iter()
                .take_while(|b| gross_income > b.lower)
                .count();
            AuditStep {
                step_number: step_number_start,
                rule_id: "federal_tax".to_string(),
                rule_name: "Federal Marginal Tax".to_string(),
                input: serde_json::json!({
                    "gross_income": gross_income.normalize().to_string(),
                    "method": "bracketed",
                    "brackets": schedule.brackets().len()
                }),
                output: serde_json::json!({
                    "federal_tax": federal_tax.normalize().to_string(),
                    "brackets_reached": brackets_reached
                }),
                reasoning: format!(
                    "Income ${} spans {} marginal bracket(s): federal tax ${}",
                    gross_income.normalize(),
                    brackets_reached,
                    federal_tax.normalize()
                ),
            }
        }
        FederalTaxMethod::Flat(rate) => AuditStep {
            step_number: step_number_start,
            rule_id: "federal_tax".to_string(),
            rule_name: "Federal Flat Tax".to_string(),
            input: serde_json::json!({
                "gross_income": gross_income.normalize().to_string(),
                "method": "flat",
                "rate": rate.normalize().to_string()
            }),
            output: serde_json::json!({
                "federal_tax": federal_tax.normalize().to_string()
            }),
            reasoning: format!(
                "Flat rate {} on ${}: federal tax ${}",
                rate.normalize(),
                gross_income.normalize(),
                federal_tax.normalize()
            ),
        },
    };

    let state_step = AuditStep {
        step_number: step_number_start + 1,
        rule_id: "state_tax".to_string(),
        rule_name: "State Flat Tax".to_string(),
        input: serde_json::json!({
            "gross_income": gross_income.normalize().to_string(),
            "rate_percent": state_rate_percent.normalize().to_string()
        }),
        output: serde_json::json!({
            "state_tax": state_tax.normalize().to_string()
        }),
        reasoning: format!(
            "{}% of ${}: state tax ${}",
            state_rate_percent.normalize(),
            gross_income.normalize(),
            state_tax.normalize()
        ),
    };

    TaxEstimationResult {
        estimate: TaxEstimate {
            gross_income,
            federal_tax,
            state_tax,
            total_tax,
            net_pay: gross_income - total_tax,
        },
        audit_steps: vec![federal_step, state_step],
    }
}
