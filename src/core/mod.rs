//! Engine services computing calendar, stats and chart views from a snapshot.

pub mod services;
