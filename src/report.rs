// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Data behind the monthly report. Layout is left to the renderer.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{self, percentage};
use crate::goals::{self, GoalEstimate};
use crate::insights::{Insight, InsightGenerator, InsightInput};
use crate::models::{CategoryLookup, Goal, GoalStatus, PeriodSummary, Transaction, TxType};
use crate::time;

#[derive(Debug, Clone, Serialize)]
pub struct ReportLine {
    pub date: NaiveDate,
    pub description: String,
    pub category_name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub name: String,
    pub total: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalLine {
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    pub progress: Decimal,
    pub estimate: GoalEstimate,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub label: String,
    pub summary: PeriodSummary,
    pub income: Vec<ReportLine>,
    pub expenses: Vec<ReportLine>,
    pub categories: Vec<CategoryShare>,
    pub goals: Vec<GoalLine>,
    pub insights: Vec<Insight>,
    pub generated_at: NaiveDateTime,
}

pub struct ReportBuilder<'a> {
    categories: &'a dyn CategoryLookup,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(categories: &'a dyn CategoryLookup) -> Self {
        Self { categories }
    }

    pub fn monthly(
        &self,
        transactions: &[Transaction],
        goals: &[Goal],
        month: u32,
        year: i32,
        now: NaiveDateTime,
    ) -> MonthlyReport {
        let summary = aggregate::monthly_summary(transactions, month, year);
        let (pm, py) = aggregate::previous_month(month, year);
        let prior = aggregate::monthly_summary(transactions, pm, py);
        let categories = self.category_analysis(transactions, month, year);
        let breakdown: Vec<aggregate::CategoryTotal> = categories
            .iter()
            .map(|c| aggregate::CategoryTotal {
                category: c.category.clone(),
                total: c.total,
            })
            .collect();
        let insights = InsightGenerator::new(self.categories).generate(&InsightInput {
            current: &summary,
            prior: &prior,
            breakdown: &breakdown,
            goals,
            now,
        });

        MonthlyReport {
            label: time::month_label(year, month),
            income: self.lines(transactions, month, year, TxType::Income),
            expenses: self.lines(transactions, month, year, TxType::Expense),
            categories,
            goals: goal_lines(goals, now),
            insights,
            summary,
            generated_at: now,
        }
    }

    /// Month expenses per category with their share of the total.
    pub fn category_analysis(
        &self,
        transactions: &[Transaction],
        month: u32,
        year: i32,
    ) -> Vec<CategoryShare> {
        let expenses =
            aggregate::monthly_transactions(transactions, month, year, Some(TxType::Expense));
        let total = aggregate::sum_by_type(expenses.iter().copied(), TxType::Expense);
        aggregate::group_expenses(expenses)
            .into_iter()
            .map(|c| CategoryShare {
                name: self.categories.name_or_default(&c.category),
                percentage: percentage(c.total, total),
                category: c.category,
                total: c.total,
            })
            .collect()
    }

    fn lines(
        &self,
        transactions: &[Transaction],
        month: u32,
        year: i32,
        kind: TxType,
    ) -> Vec<ReportLine> {
        aggregate::monthly_transactions(transactions, month, year, Some(kind))
            .into_iter()
            .map(|t| ReportLine {
                date: t.date,
                description: t.description.clone(),
                category_name: self.categories.name_or_default(&t.category),
                amount: t.amount,
            })
            .collect()
    }
}

fn goal_lines(goals: &[Goal], now: NaiveDateTime) -> Vec<GoalLine> {
    goals
        .iter()
        .filter(|g| g.status == GoalStatus::Active)
        .map(|g| GoalLine {
            name: g.name.clone(),
            target: g.target,
            current: g.current,
            progress: goals::progress(g).round_dp(1),
            estimate: goals::estimate(g, now),
        })
        .collect()
}
