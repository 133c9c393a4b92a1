use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::calendar::{CalendarGrid, CalendarGridBuilder, DayMarker, DayMarkerIndex};
use crate::domain::Transaction;
use crate::time::{local::start_of_local_day, DateRange, WeekStart};

use super::stats_service::{PeriodStats, StatsService};

/// Everything the month screen shows for one anchor month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub grid: CalendarGrid,
    pub range: DateRange,
    pub markers: DayMarkerIndex,
    pub stats: PeriodStats,
    pub currency_code: String,
}

impl MonthView {
    /// Cells paired with their markers, in-month cells only get flags.
    pub fn cell_markers<Tz: TimeZone>(&self, tz: &Tz) -> Vec<(NaiveDate, bool, DayMarker)> {
        self.grid
            .cells
            .iter()
            .map(|cell| {
                let marker = if cell.in_month {
                    self.markers.marker_or_empty(cell.date, tz)
                } else {
                    DayMarker::default()
                };
                (cell.date, cell.in_month, marker)
            })
            .collect()
    }
}

pub struct CalendarService;

impl CalendarService {
    pub fn month_view<Tz: TimeZone>(
        transactions: &[Transaction],
        anchor: DateTime<Utc>,
        week_start: WeekStart,
        tz: &Tz,
        default_currency: &str,
    ) -> MonthView {
        let grid = CalendarGridBuilder::new(week_start).build(anchor, tz);
        // Re-anchor on the grid's first day so range and grid agree on the month.
        let month_anchor = start_of_local_day(grid.month_start, tz).unwrap_or(anchor);
        let range = DateRange::month(month_anchor, tz);
        let markers = DayMarkerIndex::build(transactions, &range, tz);
        let stats = StatsService::period_stats(transactions, &range);
        let currency_code = StatsService::currency_for(transactions, &range, default_currency);
        MonthView {
            grid,
            range,
            markers,
            stats,
            currency_code,
        }
    }

    /// Totals for one local date, as shown under the grid for the selection.
    pub fn day_stats<Tz: TimeZone>(
        transactions: &[Transaction],
        date: NaiveDate,
        tz: &Tz,
    ) -> PeriodStats {
        match start_of_local_day(date, tz) {
            Some(start) => StatsService::day_stats(transactions, start, tz),
            None => PeriodStats::ZERO,
        }
    }
}
