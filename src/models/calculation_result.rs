//! Calculation result models for the Nurse Pay Engine.
//!
//! This module contains the [`EarningsSummary`] produced by the pure
//! calculation core and the [`CalculationResult`] envelope returned by the
//! API, which adds identifiers, the tax estimate and an audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DifferentialConfig, TaxEstimate, WeekBucket};

/// Pre-tax totals and the weekly breakdown for a set of work periods.
///
/// # Example
///
/// ```
/// use nurse_pay_engine::models::EarningsSummary;
/// use rust_decimal::Decimal;
///
/// let summary = EarningsSummary::default();
/// assert_eq!(summary.total_earnings, Decimal::ZERO);
/// assert!(summary.weeks.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsSummary {
    /// Sum of all weekly totals, overtime premium included.
    pub total_earnings: Decimal,
    /// Sum of all hours worked.
    pub total_hours: Decimal,
    /// One bucket per week with work, ordered by week start.
    pub weeks: Vec<WeekBucket>,
}

impl EarningsSummary {
    /// Regular hours across all weeks.
    pub fn regular_hours(&self) -> Decimal {
        self.weeks.iter().map(|w| w.regular_hours).sum()
    }

    /// Overtime hours across all weeks.
    pub fn overtime_hours(&self) -> Decimal {
        self.weeks.iter().map(|w| w.overtime_hours).sum()
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a pay calculation served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The differential configuration actually applied, defaults filled in.
    pub differentials: DifferentialConfig,
    /// Pre-tax totals and the weekly breakdown.
    pub earnings: EarningsSummary,
    /// Tax liability and net pay.
    pub taxes: TaxEstimate,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
