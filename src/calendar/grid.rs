//! Month grids laid out as full weeks for a 7-column calendar.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::time::{
    local::{days_in_month, first_of_month, local_date, same_month, shift_day, shift_month},
    WeekStart,
};

/// One cell of the calendar grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    /// False for the leading and trailing days borrowed from adjacent months.
    pub in_month: bool,
}

/// Cells for one month, row-major, always a whole number of weeks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarGrid {
    pub month_start: NaiveDate,
    pub week_start: WeekStart,
    pub cells: Vec<GridCell>,
}

impl CalendarGrid {
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(7)
    }

    pub fn row_count(&self) -> usize {
        self.cells.len() / 7
    }

    /// Number of previous-month days before the first of the month.
    pub fn leading_count(&self) -> usize {
        self.cells.iter().take_while(|cell| !cell.in_month).count()
    }

    pub fn trailing_count(&self) -> usize {
        self.cells.iter().rev().take_while(|cell| !cell.in_month).count()
    }

    pub fn in_month_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.in_month).count()
    }

    pub fn weekday_header(&self) -> [Weekday; 7] {
        self.week_start.ordered_weekdays()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.cells.iter().any(|cell| cell.date == date)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }
}

/// Builds month grids for a fixed week-start convention.
///
/// The builder keeps no state between calls, so rebuilding after the month
/// anchor changes always yields the same grid for the same inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarGridBuilder {
    week_start: WeekStart,
}

impl CalendarGridBuilder {
    pub fn new(week_start: WeekStart) -> Self {
        Self { week_start }
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Grid for the local month containing `anchor` in `tz`.
    pub fn build<Tz: TimeZone>(&self, anchor: DateTime<Utc>, tz: &Tz) -> CalendarGrid {
        self.build_for_date(local_date(anchor, tz))
    }

    /// Grid for the month containing the local date `anchor`.
    ///
    /// A month whose leading or trailing days fall outside the representable
    /// calendar is replaced by its neighbour towards the middle of the range.
    pub fn build_for_date(&self, anchor: NaiveDate) -> CalendarGrid {
        let month_start = first_of_month(anchor).unwrap_or(anchor);
        if let Some(grid) = self.layout(month_start) {
            return grid;
        }

        let inward = if month_start.year() > 0 { -1 } else { 1 };
        tracing::warn!(
            month = %month_start.format("%Y-%m"),
            "month grid exceeds the calendar limits, showing the adjacent month"
        );
        shift_month(month_start, inward)
            .and_then(|neighbour| self.layout(neighbour))
            .or_else(|| self.layout(NaiveDate::default()))
            .unwrap_or_else(|| CalendarGrid {
                month_start,
                week_start: self.week_start,
                cells: Vec::new(),
            })
    }

    fn layout(&self, month_start: NaiveDate) -> Option<CalendarGrid> {
        let month_len = days_in_month(month_start.year(), month_start.month())?;
        let leading = self.week_start.days_since_start(month_start) as i64;
        let first_cell = shift_day(month_start, -leading)?;

        let visible = leading + month_len as i64;
        let total = (visible + 6) / 7 * 7;
        shift_day(first_cell, total - 1)?;

        let cells: Vec<GridCell> = first_cell
            .iter_days()
            .take(total as usize)
            .map(|date| GridCell {
                date,
                in_month: same_month(date, month_start),
            })
            .collect();
        debug_assert!(cells.len() % 7 == 0);

        tracing::debug!(
            month = %month_start.format("%Y-%m"),
            week_start = %self.week_start,
            leading,
            cells = cells.len(),
            "calendar grid built"
        );

        Some(CalendarGrid {
            month_start,
            week_start: self.week_start,
            cells,
        })
    }
}
