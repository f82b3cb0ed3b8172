//! Shift and day classification.
//!
//! This module maps a point in time to the night/day shift window and to
//! weekend/weekday, the two classifications that decide which differentials
//! an hour of work attracts.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// First hour of the day shift (07:00).
pub const DAY_SHIFT_START_HOUR: u32 = 7;

/// First hour of the night shift (19:00).
pub const NIGHT_SHIFT_START_HOUR: u32 = 19;

/// The shift window an hour falls in.
///
/// # Example
///
/// ```
/// use nurse_pay_engine::calculation::ShiftKind;
///
/// assert_eq!(ShiftKind::Night.to_string(), "Night Shift");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    /// 07:00 to 18:59.
    Day,
    /// 19:00 to 06:59.
    Night,
}

impl std::fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftKind::Day => write!(f, "Day Shift"),
            ShiftKind::Night => write!(f, "Night Shift"),
        }
    }
}

/// Classifies an hour of the day (0-23) as night or day shift.
///
/// Night iff `hour >= 19 || hour < 7`. Values above 23 are treated as
/// night, which keeps the function total.
///
/// # Example
///
/// ```
/// use nurse_pay_engine::calculation::{classify_shift, ShiftKind};
///
/// assert_eq!(classify_shift(6), ShiftKind::Night);
/// assert_eq!(classify_shift(7), ShiftKind::Day);
/// assert_eq!(classify_shift(18), ShiftKind::Day);
/// assert_eq!(classify_shift(19), ShiftKind::Night);
/// ```
pub fn classify_shift(hour_of_day: u32) -> ShiftKind {
    if hour_of_day >= NIGHT_SHIFT_START_HOUR || hour_of_day < DAY_SHIFT_START_HOUR {
        ShiftKind::Night
    } else {
        ShiftKind::Day
    }
}

/// Classifies the hour containing `datetime`.
pub fn classify_datetime(datetime: NaiveDateTime) -> ShiftKind {
    classify_shift(datetime.hour())
}

/// Returns true if the date is a Saturday or Sunday.
///
/// # Example
///
/// ```
/// use nurse_pay_engine::calculation::is_weekend;
/// use chrono::NaiveDate;
///
/// // 2024-08-31 is a Saturday
/// assert!(is_weekend(NaiveDate::from_ymd_opt(2024, 8, 31).unwrap()));
/// // 2024-08-26 is a Monday
/// assert!(!is_weekend(NaiveDate::from_ymd_opt(2024, 8, 26).unwrap()));
/// ```
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    // ==========================================================================
    // SC-001: every hour of the day classifies as exactly one shift
    // ==========================================================================
    #[test]
    fn test_sc_001_all_hours_classified() {
        for hour in 0..24 {
            let expected = if hour >= 19 || hour < 7 {
                ShiftKind::Night
            } else {
                ShiftKind::Day
            };
            assert_eq!(classify_shift(hour), expected, "hour {}", hour);
        }
    }

    // ==========================================================================
    // SC-002: window boundaries
    // ==========================================================================
    #[test]
    fn test_sc_002_boundaries() {
        assert_eq!(classify_shift(0), ShiftKind::Night);
        assert_eq!(classify_shift(6), ShiftKind::Night);
        assert_eq!(classify_shift(7), ShiftKind::Day);
        assert_eq!(classify_shift(18), ShiftKind::Day);
        assert_eq!(classify_shift(19), ShiftKind::Night);
        assert_eq!(classify_shift(23), ShiftKind::Night);
    }

    // ==========================================================================
    // SC-003: out-of-range hour does not panic
    // ==========================================================================
    #[test]
    fn test_sc_003_out_of_range_hour_is_night() {
        assert_eq!(classify_shift(24), ShiftKind::Night);
    }

    // ==========================================================================
    // SC-004: datetime classification uses the hour only
    // ==========================================================================
    #[test]
    fn test_sc_004_datetime_uses_hour() {
        assert_eq!(
            classify_datetime(make_datetime("2024-08-26", "18:59:00")),
            ShiftKind::Day
        );
        assert_eq!(
            classify_datetime(make_datetime("2024-08-26", "19:00:00")),
            ShiftKind::Night
        );
    }

    // ==========================================================================
    // SC-005: weekend detection across a full week
    // ==========================================================================
    #[test]
    fn test_sc_005_weekend_detection() {
        // 2024-08-26 is a Monday
        let expected = [false, false, false, false, false, true, true];
        for (offset, weekend) in expected.iter().enumerate() {
            let date = make_date("2024-08-26") + chrono::Duration::days(offset as i64);
            assert_eq!(is_weekend(date), *weekend, "{}", date);
        }
    }

    #[test]
    fn test_shift_kind_display() {
        assert_eq!(ShiftKind::Day.to_string(), "Day Shift");
        assert_eq!(ShiftKind::Night.to_string(), "Night Shift");
    }
}
