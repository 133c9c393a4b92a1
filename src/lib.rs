#![doc(test(attr(deny(warnings))))]

//! Expense Core is the aggregation and calendar-grid engine behind a personal
//! expense tracker: date ranges, month grids, day markers, period totals and
//! per-category chart rows, all computed from an in-memory transaction snapshot.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod time;
pub mod utils;

pub use errors::{CoreError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
