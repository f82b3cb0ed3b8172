//! The earnings pipeline.
//!
//! Runs hour expansion, rate resolution and weekly aggregation in order
//! over one [`EarningsRequest`]. The result depends only on the request,
//! which is what makes it safe to memoize (see [`super::EarningsCache`]).

use serde::{Deserialize, Serialize};

use super::hour_expansion::{PartialHourPolicy, expand_hours_with_policy};
use super::rate_resolver::{rate_hours, rate_resolution_audit_step};
use super::weekly_aggregation::{aggregate_weekly, weekly_overtime_audit_step};
use crate::models::{AuditStep, AuditWarning, DifferentialConfig, EarningsSummary, WorkPeriod};

/// Everything a pre-tax earnings calculation depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EarningsRequest {
    /// The session's work periods, in submission order.
    pub work_periods: Vec<WorkPeriod>,
    /// Rates and differentials.
    pub differentials: DifferentialConfig,
    /// Handling of trailing partial hours.
    #[serde(default)]
    pub partial_hours: PartialHourPolicy,
}

/// Audit material explaining an [`EarningsSummary`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EarningsAudit {
    /// Expansion, rate resolution and one overtime step per week.
    pub audit_steps: Vec<AuditStep>,
    /// Partial-hour warnings.
    pub warnings: Vec<AuditWarning>,
}

/// Computes pre-tax earnings for a request.
///
/// # Example
///
/// ```
/// use nurse_pay_engine::calculation::{EarningsRequest, PartialHourPolicy, calculate_earnings};
/// use nurse_pay_engine::models::{DifferentialConfig, WorkPeriod};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let request = EarningsRequest {
///     work_periods: vec![WorkPeriod { start: at("2024-08-26 07:00"), end: at("2024-08-26 17:00"), on_call: false }],
///     differentials: DifferentialConfig::base_only(Decimal::from(20)),
///     partial_hours: PartialHourPolicy::Prorate,
/// };
///
/// assert_eq!(calculate_earnings(&request).total_earnings, Decimal::from(200));
/// ```
pub fn calculate_earnings(request: &EarningsRequest) -> EarningsSummary {
    let slots = expand_hours_with_policy(&request.work_periods, request.partial_hours);
    let units = rate_hours(&slots, &request.differentials);
    aggregate_weekly(units)
}

/// Records how `summary` was reached from `request`.
///
/// `summary` must be the result of [`calculate_earnings`] for `request`;
/// it is taken as an argument so a cached summary can be explained without
/// recomputing it. Audit steps are numbered from `step_number_start`.
pub fn audit_earnings(
    request: &EarningsRequest,
    summary: &EarningsSummary,
    step_number_start: u32,
) -> EarningsAudit {
    let slots: usize = summary.weeks.iter().map(|w| w.units.len()).sum();
    let mut step_number = step_number_start;
    let mut audit_steps = Vec::new();

    let valid_periods = request.work_periods.iter().filter(|p| p.is_valid()).count();
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "hour_expansion".to_string(),
        rule_name: "Hour Expansion".to_string(),
        input: serde_json::json!({
            "periods": request.work_periods.len(),
            "partial_hours": request.partial_hours.to_string()
        }),
        output: serde_json::json!({
            "slots": slots,
            "hours": summary.total_hours.normalize().to_string()
        }),
        reasoning: format!(
            "{} valid period(s) expanded into {} hourly slot(s) ({} partial hours)",
            valid_periods, slots, request.partial_hours
        ),
    });
    step_number += 1;

    audit_steps.push(rate_resolution_audit_step(&request.differentials, step_number));
    step_number += 1;

    for week in &summary.weeks {
        audit_steps.push(weekly_overtime_audit_step(week, step_number));
        step_number += 1;
    }

    EarningsAudit {
        audit_steps,
        warnings: partial_hour_warnings(&request.work_periods, request.partial_hours),
    }
}

/// One warning per period that ends part-way through an hour.
fn partial_hour_warnings(periods: &[WorkPeriod], policy: PartialHourPolicy) -> Vec<AuditWarning> {
    periods
        .iter()
        .enumerate()
        .filter_map(|(index, period)| {
            let minutes = period.trailing_minutes();
            if minutes == 0 {
                return None;
            }
            Some(match policy {
                PartialHourPolicy::Truncate => AuditWarning {
                    code: "PARTIAL_HOUR_TRUNCATED".to_string(),
                    message: format!(
                        "Work period {} ends {} minute(s) into an hour; those minutes were not paid",
                        index, minutes
                    ),
                    severity: "medium".to_string(),
                },
                PartialHourPolicy::Prorate => AuditWarning {
                    code: "PARTIAL_HOUR_PRORATED".to_string(),
                    message: format!(
                        "Work period {} ends {} minute(s) into an hour; paid as a fractional hour",
                        index, minutes
                    ),
                    severity: "low".to_string(),
                },
            })
        })
        .collect()
}
