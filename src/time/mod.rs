//! Time primitives: half-open ranges, week-start conventions, reporting
//! periods and explicit clocks.

pub mod clock;
pub mod date_range;
pub mod local;
pub mod period;
pub mod week_start;

pub use clock::{Clock, FixedClock, SystemClock};
pub use date_range::DateRange;
pub use period::Period;
pub use week_start::WeekStart;
