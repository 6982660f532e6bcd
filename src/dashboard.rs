// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate;
pub use crate::goals::average_active_progress;
use crate::models::{Account, Card, CategoryLookup, Goal, PeriodSummary, Transaction, TxType};

pub const RECENT_TRANSACTIONS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct RecentTransaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub r#type: TxType,
    pub category_name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub month: PeriodSummary,
    pub accounts_count: usize,
    pub cards_count: usize,
    pub goals_count: usize,
    pub total_accounts_balance: Decimal,
    pub total_credit_limit: Decimal,
    pub available_credit: Decimal,
    pub average_goal_progress: Option<Decimal>,
    pub recent: Vec<RecentTransaction>,
}

pub struct DashboardBuilder<'a> {
    categories: &'a dyn CategoryLookup,
}

impl<'a> DashboardBuilder<'a> {
    pub fn new(categories: &'a dyn CategoryLookup) -> Self {
        Self { categories }
    }

    pub fn snapshot(
        &self,
        transactions: &[Transaction],
        accounts: &[Account],
        cards: &[Card],
        goals: &[Goal],
        now: NaiveDateTime,
    ) -> DashboardSnapshot {
        let today = now.date();
        let total_credit_limit = saturating_sum(cards.iter().map(|c| c.limit));
        let used = saturating_sum(cards.iter().map(|c| c.used));

        let mut recent: Vec<&Transaction> = transactions.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        let recent = recent
            .into_iter()
            .take(RECENT_TRANSACTIONS)
            .map(|t| RecentTransaction {
                id: t.id.clone(),
                date: t.date,
                description: t.description.clone(),
                r#type: t.r#type,
                category_name: self.categories.name_or_default(&t.category),
                amount: t.amount,
            })
            .collect();

        DashboardSnapshot {
            month: aggregate::monthly_summary(transactions, today.month(), today.year()),
            accounts_count: accounts.len(),
            cards_count: cards.len(),
            goals_count: goals.len(),
            total_accounts_balance: saturating_sum(accounts.iter().map(|a| a.balance)),
            total_credit_limit,
            available_credit: total_credit_limit.saturating_sub(used),
            average_goal_progress: average_active_progress(goals),
            recent,
        }
    }
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}
