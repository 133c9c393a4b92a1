//! Per-day income/expense flags used to decorate calendar cells.

use std::collections::{btree_map, BTreeMap};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Transaction, TransactionKind},
    time::{local::start_of_local_day, DateRange},
};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayMarker {
    pub has_income: bool,
    pub has_expense: bool,
}

impl DayMarker {
    fn record(&mut self, kind: TransactionKind) {
        match kind {
            TransactionKind::Income => self.has_income = true,
            TransactionKind::Expense => self.has_expense = true,
        }
    }
}

/// Day markers keyed by the start-of-day instant of each local day.
///
/// Days without transactions are absent; callers treat a missing entry like
/// a marker with both flags unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayMarkerIndex {
    markers: BTreeMap<DateTime<Utc>, DayMarker>,
}

impl DayMarkerIndex {
    pub fn build<Tz: TimeZone>(transactions: &[Transaction], range: &DateRange, tz: &Tz) -> Self {
        let mut markers: BTreeMap<DateTime<Utc>, DayMarker> = BTreeMap::new();
        for txn in transactions
            .iter()
            .filter(|txn| range.contains(txn.timestamp))
        {
            let key = DateRange::day(txn.timestamp, tz).start();
            markers.entry(key).or_default().record(txn.kind);
        }
        tracing::debug!(
            %range,
            days = markers.len(),
            "day markers indexed"
        );
        Self { markers }
    }

    /// Marker for the day starting at `day_start`.
    pub fn get(&self, day_start: DateTime<Utc>) -> Option<&DayMarker> {
        self.markers.get(&day_start)
    }

    /// Marker for a local calendar date.
    pub fn for_date<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> Option<&DayMarker> {
        start_of_local_day(date, tz).and_then(|start| self.get(start))
    }

    /// Marker for the date, with absence folded into an empty marker.
    pub fn marker_or_empty<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> DayMarker {
        self.for_date(date, tz).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, DateTime<Utc>, DayMarker> {
        self.markers.iter()
    }
}

impl<'a> IntoIterator for &'a DayMarkerIndex {
    type Item = (&'a DateTime<Utc>, &'a DayMarker);
    type IntoIter = btree_map::Iter<'a, DateTime<Utc>, DayMarker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use uuid::Uuid;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn marks_income_and_expense_per_day() {
        let category = Uuid::new_v4();
        let transactions = vec![
            Transaction::income(100.0, "EUR", at(2025, 3, 5, 9), category),
            Transaction::expense(40.0, "EUR", at(2025, 3, 5, 18), category),
            Transaction::expense(20.0, "EUR", at(2025, 3, 20, 12), category),
        ];
        let range = DateRange::month(at(2025, 3, 1, 0), &Utc);
        let index = DayMarkerIndex::build(&transactions, &range, &Utc);

        assert_eq!(index.len(), 2);
        assert_eq!(
            index.for_date(date(2025, 3, 5), &Utc),
            Some(&DayMarker {
                has_income: true,
                has_expense: true
            })
        );
        assert_eq!(
            index.get(at(2025, 3, 20, 0)),
            Some(&DayMarker {
                has_income: false,
                has_expense: true
            })
        );
        assert!(index.for_date(date(2025, 3, 6), &Utc).is_none());
        assert_eq!(index.marker_or_empty(date(2025, 3, 6), &Utc), DayMarker::default());
    }

    #[test]
    fn out_of_range_transactions_are_ignored() {
        let category = Uuid::new_v4();
        let transactions = vec![
            Transaction::income(10.0, "EUR", at(2025, 2, 28, 23), category),
            Transaction::income(10.0, "EUR", at(2025, 4, 1, 0), category),
        ];
        let range = DateRange::month(at(2025, 3, 10, 0), &Utc);
        assert!(DayMarkerIndex::build(&transactions, &range, &Utc).is_empty());
    }

    #[test]
    fn day_keys_follow_the_time_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let category = Uuid::new_v4();
        // 16:00 UTC on March 5th is March 6th, 01:00 in Tokyo.
        let transactions = vec![Transaction::expense(5.0, "JPY", at(2025, 3, 5, 16), category)];
        let range = DateRange::month(at(2025, 3, 10, 0), &tokyo);
        let index = DayMarkerIndex::build(&transactions, &range, &tokyo);

        assert!(index.for_date(date(2025, 3, 6), &tokyo).is_some());
        assert!(index.for_date(date(2025, 3, 5), &tokyo).is_none());
        let (key, _) = index.iter().next().unwrap();
        assert_eq!(*key, at(2025, 3, 5, 15));
    }

    #[test]
    fn works_for_arbitrary_ranges() {
        let category = Uuid::new_v4();
        let transactions = vec![
            Transaction::income(1.0, "EUR", at(2025, 12, 31, 10), category),
            Transaction::expense(1.0, "EUR", at(2026, 1, 2, 10), category),
        ];
        let range = DateRange::new(at(2025, 12, 30, 0), at(2026, 1, 5, 0)).unwrap();
        let index = DayMarkerIndex::build(&transactions, &range, &Utc);
        assert_eq!(index.len(), 2);
        assert!(index.iter().all(|(_, m)| m.has_income || m.has_expense));
    }
}
