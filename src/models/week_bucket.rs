//! Week bucket model.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{HourUnit, RateBreakdown};

/// All work falling in one Monday-to-Sunday week, with its overtime split.
///
/// `units` are in chronological order; the first 40 hours of them are
/// regular time and the remainder overtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBucket {
    /// The Monday the week starts on (midnight).
    pub week_start: NaiveDate,
    /// Hour units in the week, ordered by timestamp.
    pub units: Vec<HourUnit>,
    /// Total hours worked in the week.
    pub total_hours: Decimal,
    /// Hours paid at straight time (at most 40).
    pub regular_hours: Decimal,
    /// Hours beyond the 40th.
    pub overtime_hours: Decimal,
    /// Earnings for the regular hours.
    pub regular_earnings: Decimal,
    /// Earnings for the overtime hours, including the 1.5x multiplier.
    pub overtime_earnings: Decimal,
    /// `regular_earnings + overtime_earnings`.
    pub week_total_earnings: Decimal,
    /// Straight-time earnings per pay component, before the overtime premium.
    pub component_totals: RateBreakdown,
}

impl WeekBucket {
    /// The Sunday the week ends on.
    ///
    /// # Example
    ///
    /// ```
    /// use nurse_pay_engine::models::{RateBreakdown, WeekBucket};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let week = WeekBucket {
    ///     week_start: NaiveDate::from_ymd_opt(2024, 8, 26).unwrap(),
    ///     units: vec![],
    ///     total_hours: Decimal::ZERO,
    ///     regular_hours: Decimal::ZERO,
    ///     overtime_hours: Decimal::ZERO,
    ///     regular_earnings: Decimal::ZERO,
    ///     overtime_earnings: Decimal::ZERO,
    ///     week_total_earnings: Decimal::ZERO,
    ///     component_totals: RateBreakdown::default(),
    /// };
    /// assert_eq!(week.week_end(), NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
    /// ```
    pub fn week_end(&self) -> NaiveDate {
        self.week_start + Duration::days(6)
    }
}
