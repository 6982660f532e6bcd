// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use finboard::aggregate;
use finboard::models::{Transaction, TxType};
use finboard::time::Period;
use rust_decimal::Decimal;

fn tx(id: &str, date: &str, kind: TxType, category: &str, amount: i64) -> Transaction {
    Transaction {
        id: id.into(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: format!("tx {}", id),
        r#type: kind,
        category: category.into(),
        amount: Decimal::from(amount),
        status: "completed".into(),
    }
}

fn now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-03-15T12:00:00", "%Y-%m-%dT%H:%M:%S").unwrap()
}

#[test]
fn monthly_summary_computes_savings_rate() {
    let ts = vec![
        tx("1", "2024-01-05", TxType::Income, "6", 100),
        tx("2", "2024-01-10", TxType::Expense, "1", 40),
    ];
    let s = aggregate::monthly_summary(&ts, 1, 2024);
    assert_eq!(s.label, "2024-01");
    assert_eq!(s.total_income, Decimal::from(100));
    assert_eq!(s.total_expense, Decimal::from(40));
    assert_eq!(s.balance, Decimal::from(60));
    assert_eq!(s.savings_rate, Decimal::new(600, 1));
}

#[test]
fn savings_rate_is_zero_without_income() {
    let ts = vec![tx("1", "2024-01-10", TxType::Expense, "1", 40)];
    let s = aggregate::monthly_summary(&ts, 1, 2024);
    assert_eq!(s.balance, Decimal::from(-40));
    assert_eq!(s.savings_rate, Decimal::ZERO);
}

#[test]
fn sums_split_by_type() {
    let ts = vec![
        tx("1", "2024-03-01", TxType::Income, "6", 250),
        tx("2", "2024-03-02", TxType::Expense, "1", 80),
        tx("3", "2024-03-03", TxType::Expense, "2", 20),
    ];
    let income = aggregate::sum_by_type(&ts, TxType::Income);
    let expense = aggregate::sum_by_type(&ts, TxType::Expense);
    assert_eq!(income, Decimal::from(250));
    assert_eq!(expense, Decimal::from(100));
    let total: Decimal = ts.iter().map(|t| t.amount).sum();
    assert_eq!(income + expense, total);
    assert_eq!(aggregate::sum_by_type(&[], TxType::Income), Decimal::ZERO);
}

#[test]
fn filter_by_period_keeps_order_and_uses_day_granularity() {
    let ts = vec![
        tx("1", "2024-03-14", TxType::Expense, "1", 1),
        tx("2", "2024-02-29", TxType::Expense, "1", 1),
        tx("3", "2024-03-01", TxType::Expense, "1", 1),
    ];
    let ids: Vec<&str> = aggregate::filter_by_period(&ts, Period::Month, now())
        .into_iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, ["1", "3"]);

    // week starts at 2024-03-08T12:00, the 8th itself still counts
    let ts = vec![
        tx("4", "2024-03-08", TxType::Expense, "1", 1),
        tx("5", "2024-03-07", TxType::Expense, "1", 1),
    ];
    let week = aggregate::filter_by_period(&ts, Period::Week, now());
    assert_eq!(week.len(), 1);
    assert_eq!(week[0].id, "4");
    assert_eq!(aggregate::filter_by_period(&ts, Period::All, now()).len(), 2);
}

#[test]
fn category_breakdown_sorts_desc_with_first_seen_ties() {
    let ts = vec![
        tx("1", "2024-03-02", TxType::Expense, "a", 50),
        tx("2", "2024-03-03", TxType::Expense, "b", 50),
        tx("3", "2024-03-04", TxType::Expense, "c", 30),
        tx("4", "2024-03-05", TxType::Expense, "c", 40),
        tx("5", "2024-03-06", TxType::Income, "z", 999),
        tx("6", "2024-01-06", TxType::Expense, "old", 999),
    ];
    let all = aggregate::category_breakdown(&ts, Period::Month, now(), 8);
    let order: Vec<(&str, Decimal)> = all
        .iter()
        .map(|c| (c.category.as_str(), c.total))
        .collect();
    assert_eq!(
        order,
        [
            ("c", Decimal::from(70)),
            ("a", Decimal::from(50)),
            ("b", Decimal::from(50))
        ]
    );

    let top = aggregate::category_breakdown(&ts, Period::Month, now(), 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[1].category, "a");
}

#[test]
fn monthly_series_buckets_oldest_first() {
    let ts = vec![
        tx("1", "2023-12-31", TxType::Income, "6", 1000),
        tx("2", "2024-01-15", TxType::Income, "6", 500),
        tx("3", "2024-03-02", TxType::Expense, "1", 120),
        tx("4", "2024-03-14", TxType::Income, "6", 300),
        tx("5", "2024-04-01", TxType::Income, "6", 7),
    ];
    let series = aggregate::monthly_series(&ts, 3, now());
    let labels: Vec<&str> = series.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["2024-01", "2024-02", "2024-03"]);
    assert_eq!(series[0].income, Decimal::from(500));
    assert_eq!(series[1].income, Decimal::ZERO);
    assert_eq!(series[2].income, Decimal::from(300));
    assert_eq!(series[2].expense, Decimal::from(120));
}

#[test]
fn wealth_series_accumulates_to_month_end() {
    let ts = vec![
        tx("1", "2023-12-31", TxType::Income, "6", 1000),
        tx("2", "2024-01-31", TxType::Expense, "1", 200),
        tx("3", "2024-02-01", TxType::Expense, "1", 100),
        tx("4", "2024-03-10", TxType::Income, "6", 50),
    ];
    let series = aggregate::wealth_series(&ts, 3, now());
    let points: Vec<(&str, Decimal)> = series
        .iter()
        .map(|p| (p.label.as_str(), p.balance))
        .collect();
    assert_eq!(
        points,
        [
            ("2024-01", Decimal::from(800)),
            ("2024-02", Decimal::from(700)),
            ("2024-03", Decimal::from(750)),
        ]
    );
    assert_eq!(
        series[1].boundary,
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    );
}

#[test]
fn monthly_transactions_filters_type() {
    let ts = vec![
        tx("1", "2024-02-05", TxType::Income, "6", 100),
        tx("2", "2024-02-10", TxType::Expense, "1", 40),
        tx("3", "2024-03-10", TxType::Expense, "1", 40),
    ];
    assert_eq!(aggregate::monthly_transactions(&ts, 2, 2024, None).len(), 2);
    let expenses = aggregate::monthly_transactions(&ts, 2, 2024, Some(TxType::Expense));
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, "2");
}

#[test]
fn period_summary_is_labelled_by_tag() {
    let ts = vec![
        tx("1", "2024-03-10", TxType::Income, "6", 200),
        tx("2", "2024-03-12", TxType::Expense, "1", 50),
        tx("3", "2023-10-01", TxType::Income, "6", 900),
    ];
    let s = aggregate::period_summary(&ts, Period::Year, now());
    assert_eq!(s.label, "year");
    assert_eq!(s.total_income, Decimal::from(200));
    assert_eq!(s.savings_rate, Decimal::new(750, 1));
}

#[test]
fn percentage_and_previous_month_helpers() {
    assert_eq!(
        aggregate::percentage(Decimal::from(1), Decimal::from(3)),
        Decimal::new(333, 1)
    );
    assert_eq!(
        aggregate::percentage(Decimal::from(5), Decimal::ZERO),
        Decimal::ZERO
    );
    assert_eq!(aggregate::previous_month(1, 2024), (12, 2023));
    assert_eq!(aggregate::previous_month(7, 2024), (6, 2024));
}

#[test]
fn percentage_saturates_on_overflow() {
    let tiny = Decimal::new(1, 28);
    assert_eq!(aggregate::percentage(Decimal::MAX, tiny), Decimal::MAX);
    assert_eq!(aggregate::percentage(-Decimal::MAX, tiny), Decimal::MIN);
}

#[test]
fn sums_saturate_at_decimal_bounds() {
    let mut big = tx("1", "2024-03-02", TxType::Income, "9", 0);
    big.amount = Decimal::MAX;
    let txs = vec![big.clone(), big];
    assert_eq!(aggregate::sum_by_type(&txs, TxType::Income), Decimal::MAX);
    let summary = aggregate::monthly_summary(&txs, 3, 2024);
    assert_eq!(summary.total_income, Decimal::MAX);
    assert_eq!(summary.savings_rate, Decimal::ONE_HUNDRED);
}
