//! Work period model.
//!
//! A work period is one contiguous stretch of work with a start, an
//! exclusive end and an on-call flag. The caller owns the list of periods
//! for a session and passes it into every calculation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Longest accepted work period, in hours (one week).
pub const MAX_WORK_PERIOD_HOURS: i64 = 168;

/// A single contiguous period of work.
///
/// `end` is exclusive. Periods with `end <= start` are degenerate and
/// contribute no hours to a calculation.
///
/// # Example
///
/// ```
/// use nurse_pay_engine::models::WorkPeriod;
/// use chrono::NaiveDateTime;
///
/// let period = WorkPeriod {
///     start: NaiveDateTime::parse_from_str("2024-08-26 07:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2024-08-26 19:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     on_call: false,
/// };
/// assert_eq!(period.whole_hours(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkPeriod {
    /// The instant work started.
    pub start: NaiveDateTime,
    /// The instant work ended (exclusive).
    pub end: NaiveDateTime,
    /// Whether the period was worked on call.
    #[serde(default)]
    pub on_call: bool,
}

impl WorkPeriod {
    /// Returns true if the period ends after it starts.
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Returns true if the period is longer than [`MAX_WORK_PERIOD_HOURS`].
    pub fn exceeds_max_span(&self) -> bool {
        self.end - self.start > chrono::Duration::hours(MAX_WORK_PERIOD_HOURS)
    }

    /// Returns true if the two periods share any instant.
    ///
    /// Periods that merely touch (one ends exactly when the other starts)
    /// do not overlap.
    pub fn overlaps(&self, other: &WorkPeriod) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Number of complete hours in the period, zero for degenerate periods.
    pub fn whole_hours(&self) -> i64 {
        if !self.is_valid() {
            return 0;
        }
        (self.end - self.start).num_hours()
    }

    /// Minutes left over after the last complete hour.
    pub fn trailing_minutes(&self) -> i64 {
        if !self.is_valid() {
            return 0;
        }
        (self.end - self.start).num_minutes() % 60
    }
}

/// Finds the first pair of overlapping periods, by submission index.
///
/// Returns `None` when the set is pairwise disjoint.
pub fn find_overlap(periods: &[WorkPeriod]) -> Option<(usize, usize)> {
    for (i, a) in periods.iter().enumerate() {
        for (j, b) in periods.iter().enumerate().skip(i + 1) {
            if a.overlaps(b) {
                return Some((i, j));
            }
        }
    }
    None
}
