//! Month and day stepping plus the out-of-month tap policy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::local::{self, first_of_month, same_month};

/// Result of tapping a grid cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TapOutcome {
    /// First day of the month the grid should show after the tap.
    pub month_start: NaiveDate,
    pub selected: NaiveDate,
    pub month_changed: bool,
}

/// First day of the month `delta` months away from the one containing `month`.
///
/// Stays on the current month when the target is outside the calendar.
pub fn shift_month(month: NaiveDate, delta: i32) -> NaiveDate {
    let base = first_of_month(month).unwrap_or(month);
    local::shift_month(base, delta).unwrap_or(base)
}

/// The date `delta` days away, or `date` itself at the limits of the calendar.
pub fn shift_day(date: NaiveDate, delta: i64) -> NaiveDate {
    local::shift_day(date, delta).unwrap_or(date)
}

/// Applies the tap policy: the tapped date is always selected, and with
/// `auto_advance` an out-of-month tap moves the grid to the tapped month.
pub fn resolve_tap(month: NaiveDate, tapped: NaiveDate, auto_advance: bool) -> TapOutcome {
    let current = first_of_month(month).unwrap_or(month);
    let out_of_month = !same_month(tapped, current);
    let month_start = if out_of_month && auto_advance {
        first_of_month(tapped).unwrap_or(tapped)
    } else {
        current
    };
    TapOutcome {
        month_start,
        selected: tapped,
        month_changed: month_start != current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn steps_months_across_years() {
        assert_eq!(shift_month(date(2025, 1, 31), -1), date(2024, 12, 1));
        assert_eq!(shift_month(date(2025, 12, 15), 1), date(2026, 1, 1));
        assert_eq!(shift_month(date(2025, 3, 9), 0), date(2025, 3, 1));
    }

    #[test]
    fn steps_days_across_months() {
        assert_eq!(shift_day(date(2025, 2, 28), 1), date(2025, 3, 1));
        assert_eq!(shift_day(date(2025, 1, 1), -1), date(2024, 12, 31));
    }

    #[test]
    fn out_of_month_tap_advances_when_requested() {
        let outcome = resolve_tap(date(2025, 2, 1), date(2025, 1, 30), true);
        assert_eq!(outcome.month_start, date(2025, 1, 1));
        assert_eq!(outcome.selected, date(2025, 1, 30));
        assert!(outcome.month_changed);
    }

    #[test]
    fn out_of_month_tap_stays_without_auto_advance() {
        let outcome = resolve_tap(date(2025, 2, 1), date(2025, 3, 2), false);
        assert_eq!(outcome.month_start, date(2025, 2, 1));
        assert_eq!(outcome.selected, date(2025, 3, 2));
        assert!(!outcome.month_changed);
    }

    #[test]
    fn in_month_tap_only_selects() {
        let outcome = resolve_tap(date(2025, 2, 14), date(2025, 2, 20), true);
        assert_eq!(outcome.month_start, date(2025, 2, 1));
        assert!(!outcome.month_changed);
    }
}
