use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use uuid::Uuid;

use crate::core::services::{PeriodStats, StatsService, ViewMode};
use crate::domain::Transaction;
use crate::time::DateRange;

fn at(m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, m, d, h, 0, 0).unwrap()
}

fn march_transactions() -> Vec<Transaction> {
    let category = Uuid::new_v4();
    vec![
        Transaction::income(1500.0, "EUR", at(3, 1, 0), category),
        Transaction::expense(42.5, "EUR", at(3, 5, 12), category),
        Transaction::expense(7.5, "EUR", at(3, 5, 18), category),
        Transaction::income(80.0, "EUR", at(3, 20, 9), category),
        Transaction::expense(300.0, "EUR", at(2, 28, 23), category),
        Transaction::income(999.0, "EUR", at(4, 1, 0), category),
    ]
}

#[test]
fn period_stats_sum_only_in_range() {
    let range = DateRange::month(at(3, 15, 0), &Utc);
    let stats = StatsService::period_stats(&march_transactions(), &range);
    assert_eq!(stats.income_total, 1580.0);
    assert_eq!(stats.expense_total, 50.0);
    assert_eq!(stats.balance(), 1530.0);
}

#[test]
fn boundaries_are_closed_open() {
    let range = DateRange::month(at(3, 15, 0), &Utc);
    let category = Uuid::new_v4();
    let transactions = vec![
        Transaction::income(10.0, "EUR", range.start(), category),
        Transaction::income(20.0, "EUR", range.end(), category),
        Transaction::expense(5.0, "EUR", range.end() - Duration::nanoseconds(1), category),
    ];
    let stats = PeriodStats::compute(&transactions, &range);
    assert_eq!(stats.income_total, 10.0);
    assert_eq!(stats.expense_total, 5.0);
}

#[test]
fn empty_input_yields_zeros() {
    let range = DateRange::year(at(6, 1, 0), &Utc);
    assert_eq!(StatsService::period_stats(&[], &range), PeriodStats::ZERO);

    let outside = DateRange::day(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(), &Utc);
    assert_eq!(
        StatsService::period_stats(&march_transactions(), &outside),
        PeriodStats::ZERO
    );
}

#[test]
fn balance_matches_income_minus_expense_for_every_bucket() {
    let transactions = march_transactions();
    let anchor = at(3, 5, 12);
    for range in [
        DateRange::day(anchor, &Utc),
        DateRange::month(anchor, &Utc),
        DateRange::year(anchor, &Utc),
    ] {
        let stats = StatsService::period_stats(&transactions, &range);
        assert_eq!(stats.balance(), stats.income_total - stats.expense_total);
    }
}

#[test]
fn day_stats_use_the_local_day() {
    let transactions = march_transactions();
    let stats = StatsService::day_stats(&transactions, at(3, 5, 8), &Utc);
    assert_eq!(stats.expense_total, 50.0);
    assert_eq!(stats.income_total, 0.0);

    // At UTC-02:00, midnight UTC on March 1st is still February 28th.
    let minus_two = FixedOffset::west_opt(2 * 3600).unwrap();
    let stats = StatsService::day_stats(&transactions, at(3, 1, 1), &minus_two);
    assert_eq!(stats.income_total, 1500.0);
    assert_eq!(stats.expense_total, 300.0);
}

#[test]
fn listing_filters_by_mode_and_orders_chronologically() {
    let transactions = march_transactions();
    let range = DateRange::month(at(3, 15, 0), &Utc);

    let all = StatsService::transactions_in(&transactions, &range, ViewMode::Balance);
    assert_eq!(all.len(), 4);
    assert!(all.windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp));

    let expenses = StatsService::transactions_in(&transactions, &range, ViewMode::Expense);
    let amounts: Vec<f64> = expenses.iter().map(|txn| txn.amount).collect();
    assert_eq!(amounts, vec![42.5, 7.5]);

    let incomes = StatsService::transactions_in(&transactions, &range, ViewMode::Income);
    assert!(incomes.iter().all(|txn| txn.is_income()));
}

#[test]
fn listing_breaks_timestamp_ties_by_id() {
    let category = Uuid::new_v4();
    let instant = at(3, 3, 3);
    let transactions = vec![
        Transaction::expense(1.0, "EUR", instant, category),
        Transaction::expense(2.0, "EUR", instant, category),
        Transaction::expense(3.0, "EUR", instant, category),
    ];
    let range = DateRange::day(instant, &Utc);
    let listed = StatsService::transactions_in(&transactions, &range, ViewMode::Expense);
    assert!(listed.windows(2).all(|pair| pair[0].id < pair[1].id));
}
