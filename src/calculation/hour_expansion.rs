//! Hour expansion.
//!
//! This module decomposes work periods into one [`HourSlot`] per hour
//! worked, the unit every later stage of the calculation operates on.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{HourSlot, WorkPeriod};

/// What to do with the minutes left after a period's last whole hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialHourPolicy {
    /// Drop the trailing partial hour.
    Truncate,
    /// Emit a fractional slot for the trailing partial hour.
    #[default]
    Prorate,
}

impl std::fmt::Display for PartialHourPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartialHourPolicy::Truncate => write!(f, "truncate"),
            PartialHourPolicy::Prorate => write!(f, "prorate"),
        }
    }
}

/// Expands work periods into hour slots using the default policy
/// ([`PartialHourPolicy::Prorate`]).
///
/// # Example
///
/// ```
/// use nurse_pay_engine::calculation::expand_hours;
/// use nurse_pay_engine::models::WorkPeriod;
/// use chrono::NaiveDateTime;
///
/// let period = WorkPeriod {
///     start: NaiveDateTime::parse_from_str("2024-08-26 07:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2024-08-26 19:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     on_call: false,
/// };
/// assert_eq!(expand_hours(&[period]).len(), 12);
/// ```
pub fn expand_hours(periods: &[WorkPeriod]) -> Vec<HourSlot> {
    expand_hours_with_policy(periods, PartialHourPolicy::default())
}

/// Expands work periods into hour slots.
///
/// Each period yields one slot per whole hour from `start` (inclusive) to
/// `end` (exclusive), stepping by exactly one hour and inheriting the
/// period's on-call flag. The trailing partial hour, if any, is dropped or
/// prorated according to `policy`. Periods with `end <= start` yield
/// nothing. Slots are grouped by period in input order; callers needing
/// chronological order must sort.
pub fn expand_hours_with_policy(periods: &[WorkPeriod], policy: PartialHourPolicy) -> Vec<HourSlot> {
    let one_hour = Duration::hours(1);
    let mut slots = Vec::new();

    for period in periods.iter().filter(|p| p.is_valid()) {
        let mut current = period.start;

        while current + one_hour <= period.end {
            slots.push(HourSlot {
                timestamp: current,
                hours: Decimal::ONE,
                on_call: period.on_call,
            });
            current += one_hour;
        }

        let remaining_minutes = (period.end - current).num_minutes();
        if policy == PartialHourPolicy::Prorate && remaining_minutes > 0 {
            slots.push(HourSlot {
                timestamp: current,
                hours: Decimal::from(remaining_minutes) / Decimal::from(60),
                on_call: period.on_call,
            });
        }
    }

    slots
}
