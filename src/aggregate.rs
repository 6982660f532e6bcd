// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period-bucketed aggregation over transactions.
//!
//! Everything here is a pure function of its arguments. Money stays in
//! `Decimal` throughout; only the savings rate is rounded. Sums saturate at
//! the `Decimal` bounds instead of panicking.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{PeriodSummary, Transaction, TxType};
use crate::time::{self, Period};

/// Number of categories the breakdown keeps by default.
pub const DEFAULT_TOP_CATEGORIES: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WealthPoint {
    pub label: String,
    pub boundary: NaiveDate,
    pub balance: Decimal,
}

pub fn filter_by_period<'a>(
    transactions: &'a [Transaction],
    period: Period,
    now: NaiveDateTime,
) -> Vec<&'a Transaction> {
    let start = time::period_start(period, now).date();
    transactions.iter().filter(|t| t.date >= start).collect()
}

pub fn sum_by_type<'a, I>(transactions: I, kind: TxType) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.r#type == kind)
        .map(|t| t.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Expense totals per category inside `period`, largest first.
///
/// Equal totals keep the order in which their category was first seen.
pub fn category_breakdown(
    transactions: &[Transaction],
    period: Period,
    now: NaiveDateTime,
    top_n: usize,
) -> Vec<CategoryTotal> {
    let in_period = filter_by_period(transactions, period, now);
    let mut items = group_expenses(in_period);
    items.truncate(top_n);
    items
}

pub(crate) fn group_expenses<'a, I>(transactions: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut items: Vec<CategoryTotal> = Vec::new();
    for t in transactions.into_iter().filter(|t| t.r#type == TxType::Expense) {
        match items.iter_mut().find(|c| c.category == t.category) {
            Some(entry) => entry.total = entry.total.saturating_add(t.amount),
            None => items.push(CategoryTotal {
                category: t.category.clone(),
                total: t.amount,
            }),
        }
    }
    // stable sort keeps first-seen order for ties
    items.sort_by(|a, b| b.total.cmp(&a.total));
    items
}

/// Income and expense per calendar month for the last `month_count` months,
/// oldest first, ending with the month of `now`.
pub fn monthly_series(
    transactions: &[Transaction],
    month_count: usize,
    now: NaiveDateTime,
) -> Vec<MonthBucket> {
    let today = now.date();
    let mut buckets: Vec<MonthBucket> = (0..month_count)
        .rev()
        .map(|back| {
            let (year, month) = time::shift_month(today.year(), today.month(), -(back as i32));
            MonthBucket {
                label: time::month_label(year, month),
                year,
                month,
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
            }
        })
        .collect();

    for t in transactions {
        let diff = time::month_diff(t.date, today);
        if diff < 0 || diff as usize >= month_count {
            continue;
        }
        let bucket = &mut buckets[month_count - diff as usize - 1];
        match t.r#type {
            TxType::Income => bucket.income = bucket.income.saturating_add(t.amount),
            TxType::Expense => bucket.expense = bucket.expense.saturating_add(t.amount),
        }
    }
    buckets
}

/// Net worth to date at each of the last `month_count` month ends.
pub fn wealth_series(
    transactions: &[Transaction],
    month_count: usize,
    now: NaiveDateTime,
) -> Vec<WealthPoint> {
    let today = now.date();
    let mut points = Vec::with_capacity(month_count);
    for back in (0..month_count).rev() {
        let (year, month) = time::shift_month(today.year(), today.month(), -(back as i32));
        let Some(boundary) = time::month_end(year, month) else {
            continue;
        };
        let balance = transactions
            .iter()
            .filter(|t| t.date <= boundary)
            .fold(Decimal::ZERO, |acc, t| match t.r#type {
                TxType::Income => acc.saturating_add(t.amount),
                TxType::Expense => acc.saturating_sub(t.amount),
            });
        points.push(WealthPoint {
            label: time::month_label(year, month),
            boundary,
            balance,
        });
    }
    points
}

pub fn monthly_transactions(
    transactions: &[Transaction],
    month: u32,
    year: i32,
    kind: Option<TxType>,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.date.month() == month && t.date.year() == year)
        .filter(|t| kind.is_none_or(|k| t.r#type == k))
        .collect()
}

pub fn monthly_summary(transactions: &[Transaction], month: u32, year: i32) -> PeriodSummary {
    let in_month = monthly_transactions(transactions, month, year, None);
    summarize(time::month_label(year, month), in_month)
}

/// Summary over a rolling window such as `week` or `year`.
pub fn period_summary(
    transactions: &[Transaction],
    period: Period,
    now: NaiveDateTime,
) -> PeriodSummary {
    summarize(period.to_string(), filter_by_period(transactions, period, now))
}

fn summarize(label: String, transactions: Vec<&Transaction>) -> PeriodSummary {
    let total_income = sum_by_type(transactions.iter().copied(), TxType::Income);
    let total_expense = sum_by_type(transactions.iter().copied(), TxType::Expense);
    let balance = total_income.saturating_sub(total_expense);
    PeriodSummary {
        label,
        total_income,
        total_expense,
        balance,
        savings_rate: percentage(balance, total_income),
    }
}

/// `part / whole * 100` to one decimal, or zero when `whole` is zero.
///
/// A ratio too large for `Decimal` saturates at `Decimal::MAX` or
/// `Decimal::MIN` depending on its sign.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    scaled_ratio(part, whole)
        .unwrap_or_else(|| saturated(part, whole))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole * 100`, `None` on a zero `whole` or on overflow.
pub(crate) fn scaled_ratio(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)
}

/// The `Decimal` bound carrying the sign of `part / whole`.
pub(crate) fn saturated(part: Decimal, whole: Decimal) -> Decimal {
    if part.is_sign_negative() != whole.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// `(month, year)` of the month before.
pub fn previous_month(month: u32, year: i32) -> (u32, i32) {
    let (y, m) = time::shift_month(year, month, -1);
    (m, y)
}
