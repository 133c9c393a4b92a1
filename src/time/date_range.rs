//! Half-open time intervals bucketed to local days, weeks, months and years.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{CoreError, Result},
    time::{
        local::{
            first_of_month, first_of_year, local_date, shift_day, shift_month, shift_year,
            start_of_local_day,
        },
        period::Period,
        week_start::WeekStart,
    },
};

/// An instant interval with an inclusive `start` and an exclusive `end`.
///
/// `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeBounds", into = "RangeBounds")]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct RangeBounds {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RangeBounds> for DateRange {
    type Error = CoreError;

    fn try_from(bounds: RangeBounds) -> Result<Self> {
        DateRange::new(bounds.start, bounds.end)
    }
}

impl From<DateRange> for RangeBounds {
    fn from(range: DateRange) -> Self {
        RangeBounds {
            start: range.start,
            end: range.end,
        }
    }
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(CoreError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Local midnight to the following local midnight.
    pub fn day<Tz: TimeZone>(containing: DateTime<Utc>, tz: &Tz) -> Self {
        Self::checked_day(containing, tz).unwrap_or_else(|| Self::fallback("day", containing))
    }

    /// Seven local days starting at the most recent `week_start` day at or
    /// before `containing`.
    pub fn week<Tz: TimeZone>(containing: DateTime<Utc>, week_start: WeekStart, tz: &Tz) -> Self {
        Self::checked_week(containing, week_start, tz)
            .unwrap_or_else(|| Self::fallback("week", containing))
    }

    /// First of the month to the first of the next month.
    pub fn month<Tz: TimeZone>(containing: DateTime<Utc>, tz: &Tz) -> Self {
        Self::checked_month(containing, tz).unwrap_or_else(|| Self::fallback("month", containing))
    }

    /// January 1st to January 1st of the next year.
    pub fn year<Tz: TimeZone>(containing: DateTime<Utc>, tz: &Tz) -> Self {
        Self::checked_year(containing, tz).unwrap_or_else(|| Self::fallback("year", containing))
    }

    pub fn for_period<Tz: TimeZone>(
        period: Period,
        containing: DateTime<Utc>,
        week_start: WeekStart,
        tz: &Tz,
    ) -> Self {
        match period {
            Period::CustomDay => Self::day(containing, tz),
            Period::Week => Self::week(containing, week_start, tz),
            Period::Month => Self::month(containing, tz),
            Period::Year => Self::year(containing, tz),
        }
    }

    pub fn checked_day<Tz: TimeZone>(containing: DateTime<Utc>, tz: &Tz) -> Option<Self> {
        let date = local_date(containing, tz);
        Self::local_days(date, 1, tz)
    }

    pub fn checked_week<Tz: TimeZone>(
        containing: DateTime<Utc>,
        week_start: WeekStart,
        tz: &Tz,
    ) -> Option<Self> {
        let date = local_date(containing, tz);
        let delta = week_start.days_since_start(date);
        let first = shift_day(date, -(delta as i64))?;
        Self::local_days(first, 7, tz)
    }

    pub fn checked_month<Tz: TimeZone>(containing: DateTime<Utc>, tz: &Tz) -> Option<Self> {
        let first = first_of_month(local_date(containing, tz))?;
        let next = shift_month(first, 1)?;
        Self::between_local_dates(first, next, tz)
    }

    pub fn checked_year<Tz: TimeZone>(containing: DateTime<Utc>, tz: &Tz) -> Option<Self> {
        let first = first_of_year(local_date(containing, tz))?;
        let next = shift_year(first, 1)?;
        Self::between_local_dates(first, next, tz)
    }

    /// Range covering the local dates `first..first + days`.
    pub fn local_days<Tz: TimeZone>(first: NaiveDate, days: i64, tz: &Tz) -> Option<Self> {
        let end = shift_day(first, days)?;
        Self::between_local_dates(first, end, tz)
    }

    fn between_local_dates<Tz: TimeZone>(
        first: NaiveDate,
        end: NaiveDate,
        tz: &Tz,
    ) -> Option<Self> {
        let start = start_of_local_day(first, tz)?;
        let end = start_of_local_day(end, tz)?;
        Self::new(start, end).ok()
    }

    /// Widest representable range, used only when a local calendar bucket
    /// cannot be expressed near the limits of the calendar.
    fn fallback(bucket: &str, containing: DateTime<Utc>) -> Self {
        tracing::warn!(
            %containing,
            bucket,
            "calendar bucket not representable, using unbounded range"
        );
        Self {
            start: DateTime::<Utc>::MIN_UTC,
            end: DateTime::<Utc>::MAX_UTC,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn manual_construction_rejects_empty_or_inverted_ranges() {
        let a = utc(2025, 3, 1, 0, 0);
        let b = utc(2025, 3, 2, 0, 0);
        assert!(DateRange::new(a, b).is_ok());
        assert!(matches!(
            DateRange::new(a, a),
            Err(CoreError::InvalidRange { .. })
        ));
        assert!(matches!(
            DateRange::new(b, a),
            Err(CoreError::InvalidRange { .. })
        ));
    }

    #[test]
    fn contains_is_closed_open() {
        let range = DateRange::day(utc(2025, 3, 5, 10, 0), &Utc);
        assert!(range.contains(range.start()));
        assert!(range.contains(range.end() - Duration::nanoseconds(1)));
        assert!(!range.contains(range.end()));
        assert!(!range.contains(range.start() - Duration::nanoseconds(1)));
    }

    #[test]
    fn day_spans_local_midnights() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        // 2025-03-05 20:00 UTC is already 2025-03-06 in Tokyo.
        let range = DateRange::day(utc(2025, 3, 5, 20, 0), &tokyo);
        assert_eq!(range.start(), utc(2025, 3, 5, 15, 0));
        assert_eq!(range.end(), utc(2025, 3, 6, 15, 0));
    }

    #[test]
    fn week_respects_configured_start() {
        // Wednesday 2025-03-05.
        let anchor = utc(2025, 3, 5, 12, 0);
        let monday = DateRange::week(anchor, WeekStart::Monday, &Utc);
        assert_eq!(monday.start(), utc(2025, 3, 3, 0, 0));
        assert_eq!(monday.end(), utc(2025, 3, 10, 0, 0));

        let sunday = DateRange::week(anchor, WeekStart::Sunday, &Utc);
        assert_eq!(sunday.start(), utc(2025, 3, 2, 0, 0));
        assert_eq!(sunday.end(), utc(2025, 3, 9, 0, 0));
    }

    #[test]
    fn week_anchored_on_start_day_begins_that_day() {
        let sunday = utc(2025, 3, 2, 23, 59);
        assert_eq!(
            DateRange::week(sunday, WeekStart::Sunday, &Utc).start(),
            utc(2025, 3, 2, 0, 0)
        );
        assert_eq!(
            DateRange::week(sunday, WeekStart::Monday, &Utc).start(),
            utc(2025, 2, 24, 0, 0)
        );
    }

    #[test]
    fn month_and_year_buckets() {
        let anchor = utc(2024, 2, 15, 8, 0);
        let month = DateRange::month(anchor, &Utc);
        assert_eq!(month.start(), utc(2024, 2, 1, 0, 0));
        assert_eq!(month.end(), utc(2024, 3, 1, 0, 0));

        let december = DateRange::month(utc(2024, 12, 31, 23, 0), &Utc);
        assert_eq!(december.end(), utc(2025, 1, 1, 0, 0));

        let year = DateRange::year(anchor, &Utc);
        assert_eq!(year.start(), utc(2024, 1, 1, 0, 0));
        assert_eq!(year.end(), utc(2025, 1, 1, 0, 0));
    }

    #[test]
    fn month_follows_the_time_zone() {
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        // Still February 28th in New York.
        let range = DateRange::month(utc(2025, 3, 1, 2, 0), &new_york);
        assert_eq!(range.start(), utc(2025, 2, 1, 5, 0));
        assert_eq!(range.end(), utc(2025, 3, 1, 5, 0));
    }

    #[test]
    fn for_period_dispatches() {
        let anchor = utc(2025, 3, 5, 12, 0);
        assert_eq!(
            DateRange::for_period(Period::CustomDay, anchor, WeekStart::Monday, &Utc),
            DateRange::day(anchor, &Utc)
        );
        assert_eq!(
            DateRange::for_period(Period::Year, anchor, WeekStart::Monday, &Utc),
            DateRange::year(anchor, &Utc)
        );
    }

    #[test]
    fn factories_are_pure() {
        let anchor = utc(2025, 7, 9, 18, 30);
        assert_eq!(
            DateRange::week(anchor, WeekStart::Sunday, &Utc),
            DateRange::week(anchor, WeekStart::Sunday, &Utc)
        );
    }

    #[test]
    fn deserialization_enforces_ordering() {
        let valid = DateRange::month(utc(2025, 3, 5, 0, 0), &Utc);
        let json = serde_json::to_string(&valid).unwrap();
        assert_eq!(serde_json::from_str::<DateRange>(&json).unwrap(), valid);

        let inverted = r#"{"start":"2025-03-02T00:00:00Z","end":"2025-03-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<DateRange>(inverted).is_err());
    }
}
