use std::collections::HashMap;
use std::{fmt, str::FromStr};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::snapshot::index_categories;
use crate::domain::{
    BelongsToCategory, Category, Identifiable, NamedEntity, Transaction, TransactionKind,
};
use crate::errors::CoreError;
use crate::time::DateRange;

pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";
pub const UNKNOWN_CATEGORY_ICON: &str = "questionmark.circle";
pub const UNKNOWN_CATEGORY_COLOR: &str = "blue";

/// Which transactions a chart or listing shows.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Income,
    #[default]
    Expense,
    /// Both kinds, netted per category.
    Balance,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Income, ViewMode::Expense, ViewMode::Balance];

    /// The single kind this mode keeps, `None` for balance.
    pub fn kind_filter(self) -> Option<TransactionKind> {
        match self {
            ViewMode::Income => Some(TransactionKind::Income),
            ViewMode::Expense => Some(TransactionKind::Expense),
            ViewMode::Balance => None,
        }
    }

    pub fn includes(self, kind: TransactionKind) -> bool {
        self.kind_filter().map_or(true, |only| only == kind)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViewMode::Income => "income",
            ViewMode::Expense => "expense",
            ViewMode::Balance => "balance",
        };
        f.write_str(label)
    }
}

impl FromStr for ViewMode {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(ViewMode::Income),
            "expense" | "expenses" => Ok(ViewMode::Expense),
            "balance" | "all" => Ok(ViewMode::Balance),
            other => Err(CoreError::InvalidInput(format!(
                "unknown view mode `{other}` (expected income, expense or balance)"
            ))),
        }
    }
}

/// One category slice of a chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartRow {
    /// `None` for transactions whose category could not be found.
    pub category_id: Option<Uuid>,
    pub name: String,
    pub icon_key: String,
    pub color_key: String,
    /// Summed magnitude, or the signed net in balance mode.
    pub amount: f64,
    /// Share of the chart total in `[0, 1]`.
    pub percent: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChartsOutput {
    pub rows: Vec<ChartRow>,
    pub transaction_count: usize,
    pub total_amount: f64,
}

impl ChartsOutput {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Side-by-side income and expense breakdowns for the same range.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MiniCharts {
    pub income: ChartsOutput,
    pub expense: ChartsOutput,
}

struct Bucket<'a> {
    category: Option<&'a Category>,
    amount: f64,
}

impl Bucket<'_> {
    fn sort_key(&self) -> (bool, i32, Option<Uuid>) {
        match self.category {
            Some(category) => (false, category.sort_order, Some(category.id)),
            None => (true, 0, None),
        }
    }

    fn into_row(self, percent: f64) -> ChartRow {
        match self.category {
            Some(category) => ChartRow {
                category_id: Some(category.id()),
                name: category.name().to_string(),
                icon_key: category.icon_key.clone(),
                color_key: category.color_key.clone(),
                amount: self.amount,
                percent,
            },
            None => ChartRow {
                category_id: None,
                name: UNKNOWN_CATEGORY_NAME.to_string(),
                icon_key: UNKNOWN_CATEGORY_ICON.to_string(),
                color_key: UNKNOWN_CATEGORY_COLOR.to_string(),
                amount: self.amount,
                percent,
            },
        }
    }
}

fn share(part: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        return 0.0;
    }
    let ratio = part / denominator;
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Groups transactions by category into ranked chart rows.
pub struct ChartService;

impl ChartService {
    pub fn aggregate(
        transactions: &[Transaction],
        categories: &[Category],
        range: &DateRange,
        mode: ViewMode,
    ) -> ChartsOutput {
        let lookup = index_categories(categories);
        let mut buckets: HashMap<Option<Uuid>, Bucket<'_>> = HashMap::new();
        let mut transaction_count = 0usize;
        let mut net_total = 0.0;
        let mut unknown_count = 0usize;

        for txn in transactions
            .iter()
            .filter(|txn| range.contains(txn.timestamp) && mode.includes(txn.kind))
        {
            transaction_count += 1;
            let contribution = match mode {
                ViewMode::Balance => txn.signed_amount(),
                ViewMode::Income | ViewMode::Expense => txn.amount,
            };
            net_total += txn.signed_amount();

            let category = lookup.get(&txn.category_id()).copied();
            if category.is_none() {
                unknown_count += 1;
            }
            let key = category.map(|category| category.id);
            buckets
                .entry(key)
                .or_insert(Bucket {
                    category,
                    amount: 0.0,
                })
                .amount += contribution;
        }

        if unknown_count > 0 {
            tracing::debug!(
                unknown_count,
                "transactions with unknown categories grouped into one bucket"
            );
        }

        let magnitude = |amount: f64| match mode {
            ViewMode::Balance => amount.abs(),
            ViewMode::Income | ViewMode::Expense => amount,
        };

        let mut buckets: Vec<Bucket<'_>> = buckets.into_values().collect();
        buckets.sort_by(|a, b| {
            magnitude(b.amount)
                .total_cmp(&magnitude(a.amount))
                .then_with(|| a.sort_key().cmp(&b.sort_key()))
        });

        let denominator: f64 = buckets.iter().map(|bucket| magnitude(bucket.amount)).sum();
        let rows: Vec<ChartRow> = buckets
            .into_iter()
            .map(|bucket| {
                let percent = share(magnitude(bucket.amount), denominator);
                bucket.into_row(percent)
            })
            .collect();

        let total_amount = match mode {
            ViewMode::Balance => net_total,
            ViewMode::Income | ViewMode::Expense => rows.iter().map(|row| row.amount).sum(),
        };

        tracing::debug!(
            %range,
            %mode,
            rows = rows.len(),
            transaction_count,
            "chart aggregated"
        );

        ChartsOutput {
            rows,
            transaction_count,
            total_amount,
        }
    }

    /// Aggregates the local month containing `anchor`, or returns an empty
    /// output when that month cannot be represented.
    pub fn aggregate_month<Tz: TimeZone>(
        transactions: &[Transaction],
        categories: &[Category],
        anchor: DateTime<Utc>,
        tz: &Tz,
        mode: ViewMode,
    ) -> ChartsOutput {
        match DateRange::checked_month(anchor, tz) {
            Some(range) => Self::aggregate(transactions, categories, &range, mode),
            None => {
                tracing::warn!(%anchor, "month range unavailable, returning empty chart");
                ChartsOutput::empty()
            }
        }
    }

    pub fn mini_charts(
        transactions: &[Transaction],
        categories: &[Category],
        range: &DateRange,
    ) -> MiniCharts {
        MiniCharts {
            income: Self::aggregate(transactions, categories, range, ViewMode::Income),
            expense: Self::aggregate(transactions, categories, range, ViewMode::Expense),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_mode_parses_and_filters() {
        assert_eq!("Income".parse::<ViewMode>().unwrap(), ViewMode::Income);
        assert_eq!(" balance ".parse::<ViewMode>().unwrap(), ViewMode::Balance);
        assert!(matches!(
            "savings".parse::<ViewMode>(),
            Err(CoreError::InvalidInput(_))
        ));
        assert!(ViewMode::Balance.includes(TransactionKind::Income));
        assert!(!ViewMode::Expense.includes(TransactionKind::Income));
        for mode in ViewMode::ALL {
            assert_eq!(mode.to_string().parse::<ViewMode>().unwrap(), mode);
        }
    }

    #[test]
    fn share_handles_zero_and_non_finite() {
        assert_eq!(share(5.0, 0.0), 0.0);
        assert_eq!(share(f64::NAN, 10.0), 0.0);
        assert_eq!(share(f64::INFINITY, 10.0), 0.0);
        assert_eq!(share(15.0, 10.0), 1.0);
        assert_eq!(share(2.5, 10.0), 0.25);
    }
}
