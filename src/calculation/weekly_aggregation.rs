//! Weekly aggregation and overtime split.
//!
//! This module groups priced hour units into Monday-starting weeks and
//! splits each week into regular and overtime time. The first 40
//! chronological hours of a week are regular regardless of their rates;
//! every hour after that is paid at 1.5x its own effective rate.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::{AuditStep, EarningsSummary, HourUnit, RateBreakdown, WeekBucket};

/// Hours per week paid at straight time.
pub const WEEKLY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Multiplier applied to the effective rate of overtime hours (1.5).
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Returns the Monday on or before the timestamp's date.
///
/// # Example
///
/// ```
/// use nurse_pay_engine::calculation::week_start_for;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// // Sunday 2024-09-01 23:00 belongs to the week of Monday 2024-08-26
/// let ts = NaiveDateTime::parse_from_str("2024-09-01 23:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(week_start_for(ts), NaiveDate::from_ymd_opt(2024, 8, 26).unwrap());
/// ```
pub fn week_start_for(timestamp: NaiveDateTime) -> NaiveDate {
    let date = timestamp.date();
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Aggregates hour units into weekly buckets and totals.
///
/// Buckets exist only for weeks containing at least one unit and are
/// returned ordered by `week_start`. Empty input yields zero totals and no
/// weeks. The function is pure: identical input gives identical output.
///
/// # Example
///
/// ```
/// use nurse_pay_engine::calculation::{aggregate_weekly, expand_hours, rate_hours};
/// use nurse_pay_engine::models::{DifferentialConfig, WorkPeriod};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let period = WorkPeriod {
///     start: NaiveDateTime::parse_from_str("2024-08-26 07:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2024-08-26 19:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     on_call: false,
/// };
/// let config = DifferentialConfig::base_only(Decimal::from_str("92.25").unwrap());
///
/// let summary = aggregate_weekly(rate_hours(&expand_hours(&[period]), &config));
/// assert_eq!(summary.total_hours, Decimal::from(12));
/// assert_eq!(summary.total_earnings, Decimal::from_str("1107.00").unwrap());
/// ```
pub fn aggregate_weekly(units: Vec<HourUnit>) -> EarningsSummary {
    let mut by_week: BTreeMap<NaiveDate, Vec<HourUnit>> = BTreeMap::new();
    for unit in units {
        by_week
            .entry(week_start_for(unit.timestamp))
            .or_default()
            .push(unit);
    }

    let weeks: Vec<WeekBucket> = by_week
        .into_iter()
        .map(|(week_start, units)| build_week_bucket(week_start, units))
        .collect();

    EarningsSummary {
        total_earnings: weeks.iter().map(|w| w.week_total_earnings).sum(),
        total_hours: weeks.iter().map(|w| w.total_hours).sum(),
        weeks,
    }
}

/// Sorts one week's units and splits them into regular and overtime time.
///
/// A fractional unit straddling the 40th hour is split between the two.
fn build_week_bucket(week_start: NaiveDate, mut units: Vec<HourUnit>) -> WeekBucket {
    units.sort_by_key(|u| u.timestamp);

    let mut regular_remaining = WEEKLY_OVERTIME_THRESHOLD;
    let mut total_hours = Decimal::ZERO;
    let mut regular_earnings = Decimal::ZERO;
    let mut overtime_earnings = Decimal::ZERO;
    let mut component_totals = RateBreakdown::default();

    for unit in &units {
        let regular = unit.hours.min(regular_remaining);
        let overtime = unit.hours - regular;
        regular_remaining -= regular;

        regular_earnings += unit.effective_rate * regular;
        overtime_earnings += unit.effective_rate * OVERTIME_MULTIPLIER * overtime;
        total_hours += unit.hours;
        component_totals.add_scaled(&unit.breakdown, unit.hours);
    }

    let regular_hours = total_hours.min(WEEKLY_OVERTIME_THRESHOLD);

    WeekBucket {
        week_start,
        units,
        total_hours,
        regular_hours,
        overtime_hours: total_hours - regular_hours,
        regular_earnings,
        overtime_earnings,
        week_total_earnings: regular_earnings + overtime_earnings,
        component_totals,
    }
}

/// Records the overtime split for one week.
pub fn weekly_overtime_audit_step(week: &WeekBucket, step_number: u32) -> AuditStep {
    let reasoning = if week.overtime_hours > Decimal::ZERO {
        format!(
            "Week of {}: {} hours exceeds {} hour threshold; first {} hours regular (${}), {} hours overtime at {}x (${})",
            week.week_start,
            week.total_hours.normalize(),
            WEEKLY_OVERTIME_THRESHOLD,
            week.regular_hours.normalize(),
            week.regular_earnings.normalize(),
            week.overtime_hours.normalize(),
            OVERTIME_MULTIPLIER,
            week.overtime_earnings.normalize()
        )
    } else {
        format!(
            "Week of {}: {} hours within {} hour threshold; all regular (${})",
            week.week_start,
            week.total_hours.normalize(),
            WEEKLY_OVERTIME_THRESHOLD,
            week.regular_earnings.normalize()
        )
    };

    AuditStep {
        step_number,
        rule_id: "weekly_overtime".to_string(),
        rule_name: "Weekly Overtime Split".to_string(),
        input: serde_json::json!({
            "week_start": week.week_start.to_string(),
            "week_end": week.week_end().to_string(),
            "hours": week.total_hours.normalize().to_string(),
            "threshold": WEEKLY_OVERTIME_THRESHOLD.to_string()
        }),
        output: serde_json::json!({
            "regular_hours": week.regular_hours.normalize().to_string(),
            "overtime_hours": week.overtime_hours.normalize().to_string(),
            "regular_earnings": week.regular_earnings.normalize().to_string(),
            "overtime_earnings": week.overtime_earnings.normalize().to_string(),
            "week_total_earnings": week.week_total_earnings.normalize().to_string()
        }),
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn unit_at(timestamp: NaiveDateTime, hours: &str, rate: &str) -> HourUnit {
        HourUnit {
            timestamp,
            hours: dec(hours),
            is_night: false,
            is_weekend: false,
            is_on_call: false,
            effective_rate: dec(rate),
            breakdown: RateBreakdown {
                base: dec(rate),
                ..RateBreakdown::default()
            },
        }
    }

    /// `count` consecutive one-hour units at `rate` starting at `start`.
    fn consecutive_units(start: &str, count: i64, rate: &str) -> Vec<HourUnit> {
        let start = make_datetime(start);
        (0..count)
            .map(|i| unit_at(start + Duration::hours(i), "1", rate))
            .collect()
    }

    // ==========================================================================
    // WA-001: 45 hours in one week at $20
    // ==========================================================================
    #[test]
    fn test_wa_001_forty_five_hours_at_twenty() {
        let summary = aggregate_weekly(consecutive_units("2024-08-26 00:00", 45, "20"));

        assert_eq!(summary.weeks.len(), 1);
        let week = &summary.weeks[0];
        assert_eq!(week.regular_hours, dec("40"));
        assert_eq!(week.overtime_hours, dec("5"));
        assert_eq!(week.regular_earnings, dec("800"));
        assert_eq!(week.overtime_earnings, dec("150"));
        assert_eq!(week.week_total_earnings, dec("950"));
        assert_eq!(summary.total_earnings, dec("950"));
        assert_eq!(summary.total_hours, dec("45"));
    }

    // ==========================================================================
    // WA-002: exactly 40 hours has no overtime
    // ==========================================================================
    #[test]
    fn test_wa_002_exactly_forty_hours() {
        let summary = aggregate_weekly(consecutive_units("2024-08-26 00:00", 40, "20"));

        let week = &summary.weeks[0];
        assert_eq!(week.regular_hours, dec("40"));
        assert_eq!(week.overtime_hours, Decimal::ZERO);
        assert_eq!(week.overtime_earnings, Decimal::ZERO);
    }

    // ==========================================================================
    // WA-003: overtime goes to the chronologically last hours
    // ==========================================================================
    #[test]
    fn test_wa_003_overtime_is_chronological_not_by_rate() {
        // 40 cheap hours first, then 2 expensive hours: the expensive ones
        // are overtime. Submitted in reverse to check sorting.
        let mut units = consecutive_units("2024-08-26 00:00", 40, "20");
        units.extend(consecutive_units("2024-08-28 00:00", 2, "50"));
        units.reverse();

        let summary = aggregate_weekly(units);
        let week = &summary.weeks[0];

        assert_eq!(week.regular_earnings, dec("800"));
        // 2 * 50 * 1.5
        assert_eq!(week.overtime_earnings, dec("150"));
        assert!(week.units.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    // ==========================================================================
    // WA-004: Sunday belongs to the week that started the Monday before
    // ==========================================================================
    #[test]
    fn test_wa_004_weeks_split_on_monday() {
        // Sunday 2024-09-01 22:00 to Monday 2024-09-02 02:00
        let summary = aggregate_weekly(consecutive_units("2024-09-01 22:00", 4, "30"));

        assert_eq!(summary.weeks.len(), 2);
        assert_eq!(
            summary.weeks[0].week_start,
            NaiveDate::from_ymd_opt(2024, 8, 26).unwrap()
        );
        assert_eq!(summary.weeks[0].total_hours, dec("2"));
        assert_eq!(
            summary.weeks[1].week_start,
            NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
        );
        assert_eq!(summary.weeks[1].total_hours, dec("2"));
    }

    // ==========================================================================
    // WA-005: overtime is per week, not across the whole input
    // ==========================================================================
    #[test]
    fn test_wa_005_overtime_threshold_is_weekly() {
        let mut units = consecutive_units("2024-08-26 00:00", 36, "20");
        units.extend(consecutive_units("2024-09-02 00:00", 36, "20"));

        let summary = aggregate_weekly(units);

        assert_eq!(summary.weeks.len(), 2);
        assert_eq!(summary.overtime_hours(), Decimal::ZERO);
        assert_eq!(summary.total_earnings, dec("1440"));
    }

    // ==========================================================================
    // WA-006: empty input
    // ==========================================================================
    #[test]
    fn test_wa_006_empty_input() {
        let summary = aggregate_weekly(vec![]);
        assert_eq!(summary.total_earnings, Decimal::ZERO);
        assert_eq!(summary.total_hours, Decimal::ZERO);
        assert!(summary.weeks.is_empty());
    }

    // ==========================================================================
    // WA-007: fractional unit straddling the 40th hour is split
    // ==========================================================================
    #[test]
    fn test_wa_007_fractional_unit_straddles_threshold() {
        let mut units = consecutive_units("2024-08-26 00:00", 39, "20");
        units.push(unit_at(make_datetime("2024-08-27 15:00"), "1.5", "20"));

        let summary = aggregate_weekly(units);
        let week = &summary.weeks[0];

        assert_eq!(week.total_hours, dec("40.5"));
        assert_eq!(week.regular_hours, dec("40"));
        assert_eq!(week.overtime_hours, dec("0.5"));
        assert_eq!(week.regular_earnings, dec("800"));
        // 0.5 * 20 * 1.5
        assert_eq!(week.overtime_earnings, dec("15"));
    }

    // ==========================================================================
    // WA-008: weeks are ordered by start regardless of input order
    // ==========================================================================
    #[test]
    fn test_wa_008_weeks_ordered_ascending() {
        let mut units = consecutive_units("2024-09-09 08:00", 1, "20");
        units.extend(consecutive_units("2024-08-26 08:00", 1, "20"));
        units.extend(consecutive_units("2024-09-02 08:00", 1, "20"));

        let summary = aggregate_weekly(units);
        let starts: Vec<_> = summary.weeks.iter().map(|w| w.week_start).collect();

        assert_eq!(
            starts,
            vec![
                NaiveDate::from_ymd_opt(2024, 8, 26).unwrap(),
                NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 9, 9).unwrap(),
            ]
        );
    }

    #[test]
    fn test_component_totals_exclude_overtime_premium() {
        let summary = aggregate_weekly(consecutive_units("2024-08-26 00:00", 45, "20"));
        assert_eq!(summary.weeks[0].component_totals.base, dec("900"));
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let units = consecutive_units("2024-08-26 00:00", 50, "27.35");
        assert_eq!(aggregate_weekly(units.clone()), aggregate_weekly(units));
    }

    #[test]
    fn test_audit_step_mentions_overtime() {
        let summary = aggregate_weekly(consecutive_units("2024-08-26 00:00", 45, "20"));
        let step = weekly_overtime_audit_step(&summary.weeks[0], 4);

        assert_eq!(step.step_number, 4);
        assert_eq!(step.rule_id, "weekly_overtime");
        assert_eq!(step.input["week_end"], "2024-09-01");
        assert_eq!(step.output["overtime_hours"], "5");
        assert!(step.reasoning.contains("exceeds 40 hour threshold"));
    }

    #[test]
    fn test_week_start_for_monday_midnight_is_same_day() {
        assert_eq!(
            week_start_for(make_datetime("2024-08-26 00:00")),
            NaiveDate::from_ymd_opt(2024, 8, 26).unwrap()
        );
    }
}
