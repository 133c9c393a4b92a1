//! Calendar presentation models: month grids, day markers and navigation.

pub mod grid;
pub mod markers;
pub mod navigation;

pub use grid::{CalendarGrid, CalendarGridBuilder, GridCell};
pub use markers::{DayMarker, DayMarkerIndex};
pub use navigation::{resolve_tap, shift_day, shift_month, TapOutcome};
