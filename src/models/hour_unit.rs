//! Hour-unit models.
//!
//! A work period is decomposed into [`HourSlot`]s (timestamp, length and
//! on-call flag only), which the rate resolver turns into fully classified
//! and priced [`HourUnit`]s.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An unpriced hour of work produced by the hour expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourSlot {
    /// The instant this hour starts.
    pub timestamp: NaiveDateTime,
    /// Length of the slot in hours: one, or a fraction for a prorated
    /// trailing partial hour.
    pub hours: Decimal,
    /// Inherited from the parent work period.
    pub on_call: bool,
}

/// Per-hour pay components, kept separately for reporting.
///
/// # Example
///
/// ```
/// use nurse_pay_engine::models::RateBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = RateBreakdown {
///     base: Decimal::from(100),
///     charge_nurse: Decimal::ZERO,
///     night: Decimal::from(16),
///     weekend: Decimal::from(5),
///     on_call: Decimal::from(50),
/// };
/// assert_eq!(breakdown.total(), Decimal::from(171));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBreakdown {
    /// The base hourly rate.
    pub base: Decimal,
    /// Charge nurse premium.
    pub charge_nurse: Decimal,
    /// Night shift differential.
    pub night: Decimal,
    /// Weekend differential.
    pub weekend: Decimal,
    /// On-call differential.
    pub on_call: Decimal,
}

impl RateBreakdown {
    /// Sum of all components.
    pub fn total(&self) -> Decimal {
        self.base + self.charge_nurse + self.night + self.weekend + self.on_call
    }

    /// Adds `other * hours` to each component.
    pub fn add_scaled(&mut self, other: &RateBreakdown, hours: Decimal) {
        self.base += other.base * hours;
        self.charge_nurse += other.charge_nurse * hours;
        self.night += other.night * hours;
        self.weekend += other.weekend * hours;
        self.on_call += other.on_call * hours;
    }
}

/// A classified and priced hour of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourUnit {
    /// The instant this hour starts.
    pub timestamp: NaiveDateTime,
    /// Length of the unit in hours.
    pub hours: Decimal,
    /// Whether the hour starts in the night shift window.
    pub is_night: bool,
    /// Whether the hour starts on a Saturday or Sunday.
    pub is_weekend: bool,
    /// Whether the hour was worked on call.
    pub is_on_call: bool,
    /// The straight-time hourly rate for this unit.
    pub effective_rate: Decimal,
    /// The components making up `effective_rate`.
    pub breakdown: RateBreakdown,
}
