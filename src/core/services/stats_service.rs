use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Transaction, TransactionKind};
use crate::time::DateRange;

use super::ViewMode;

/// Income and expense totals for one range.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PeriodStats {
    pub income_total: f64,
    pub expense_total: f64,
}

impl PeriodStats {
    pub const ZERO: PeriodStats = PeriodStats {
        income_total: 0.0,
        expense_total: 0.0,
    };

    pub fn balance(&self) -> f64 {
        self.income_total - self.expense_total
    }

    /// Sums in-range amounts per kind in a single pass.
    pub fn compute(transactions: &[Transaction], range: &DateRange) -> Self {
        transactions
            .iter()
            .filter(|txn| range.contains(txn.timestamp))
            .fold(Self::ZERO, |mut stats, txn| {
                match txn.kind {
                    TransactionKind::Income => stats.income_total += txn.amount,
                    TransactionKind::Expense => stats.expense_total += txn.amount,
                }
                stats
            })
    }
}

pub struct StatsService;

impl StatsService {
    pub fn period_stats(transactions: &[Transaction], range: &DateRange) -> PeriodStats {
        let stats = PeriodStats::compute(transactions, range);
        tracing::debug!(
            %range,
            income = stats.income_total,
            expense = stats.expense_total,
            "period stats computed"
        );
        stats
    }

    /// Totals for the local day containing `instant`.
    pub fn day_stats<Tz: TimeZone>(
        transactions: &[Transaction],
        instant: DateTime<Utc>,
        tz: &Tz,
    ) -> PeriodStats {
        PeriodStats::compute(transactions, &DateRange::day(instant, tz))
    }

    /// In-range transactions matching `mode`, ordered by timestamp then id.
    pub fn transactions_in<'a>(
        transactions: &'a [Transaction],
        range: &DateRange,
        mode: ViewMode,
    ) -> Vec<&'a Transaction> {
        let mut listed: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| range.contains(txn.timestamp) && mode.includes(txn.kind))
            .collect();
        listed.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        listed
    }

    /// Currency of the earliest transaction in the range, or `default` when
    /// the range is empty.
    pub fn currency_for(transactions: &[Transaction], range: &DateRange, default: &str) -> String {
        transactions
            .iter()
            .filter(|txn| range.contains(txn.timestamp))
            .min_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)))
            .map(|txn| txn.currency_code.clone())
            .unwrap_or_else(|| default.to_uppercase())
    }
}
