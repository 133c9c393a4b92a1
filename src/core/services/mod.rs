pub mod calendar_service;
pub mod chart_service;
pub mod stats_service;

pub use calendar_service::{CalendarService, MonthView};
pub use chart_service::{ChartRow, ChartService, ChartsOutput, MiniCharts, ViewMode};
pub use stats_service::{PeriodStats, StatsService};

#[cfg(test)]
mod tests;
