// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month-over-month advisories.
//!
//! Rules run in a fixed order and each contributes at most one insight:
//! expense spike, low savings rate, category concentration, goals due soon.

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::debug;

use crate::aggregate::{self, CategoryTotal};
use crate::goals::{self, UPCOMING_WINDOW_DAYS};
use crate::models::{CategoryLookup, Goal, PeriodSummary, Severity, Transaction};
use crate::time::Period;

/// Current expense above prior expense times this factor counts as a spike.
pub const EXPENSE_SPIKE_FACTOR: Decimal = Decimal::from_parts(12, 0, 0, false, 1);
pub const LOW_SAVINGS_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
pub const RECOMMENDED_SAVINGS_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 0);
pub const CONCENTRATION_SHARE: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    ExpenseSpike,
    LowSavingsRate,
    CategoryConcentration,
    UpcomingGoalDeadlines,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::ExpenseSpike => "expense_spike",
            InsightKind::LowSavingsRate => "low_savings_rate",
            InsightKind::CategoryConcentration => "category_concentration",
            InsightKind::UpcomingGoalDeadlines => "upcoming_goal_deadlines",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

/// Everything the rules look at.
pub struct InsightInput<'a> {
    pub current: &'a PeriodSummary,
    pub prior: &'a PeriodSummary,
    pub breakdown: &'a [CategoryTotal],
    pub goals: &'a [Goal],
    pub now: NaiveDateTime,
}

pub struct InsightGenerator<'a> {
    categories: &'a dyn CategoryLookup,
}

impl<'a> InsightGenerator<'a> {
    pub fn new(categories: &'a dyn CategoryLookup) -> Self {
        Self { categories }
    }

    pub fn generate(&self, input: &InsightInput<'_>) -> Vec<Insight> {
        let insights: Vec<Insight> = [
            expense_spike(input.current, input.prior),
            low_savings(input.current),
            self.concentration(input.current, input.breakdown),
            upcoming_deadlines(input.goals, input.now),
        ]
        .into_iter()
        .flatten()
        .collect();
        debug!(
            label = %input.current.label,
            count = insights.len(),
            "Insights generated"
        );
        insights
    }

    /// Insights for the month containing `now` against the month before.
    pub fn for_current_month(
        &self,
        transactions: &[Transaction],
        goals: &[Goal],
        now: NaiveDateTime,
    ) -> Vec<Insight> {
        let today = now.date();
        let current = aggregate::monthly_summary(transactions, today.month(), today.year());
        let (pm, py) = aggregate::previous_month(today.month(), today.year());
        let prior = aggregate::monthly_summary(transactions, pm, py);
        let breakdown = aggregate::category_breakdown(
            transactions,
            Period::Month,
            now,
            aggregate::DEFAULT_TOP_CATEGORIES,
        );
        self.generate(&InsightInput {
            current: &current,
            prior: &prior,
            breakdown: &breakdown,
            goals,
            now,
        })
    }

    fn concentration(
        &self,
        current: &PeriodSummary,
        breakdown: &[CategoryTotal],
    ) -> Option<Insight> {
        let top = breakdown.first()?;
        if current.total_expense.is_zero() {
            return None;
        }
        // threshold applies to the displayed, rounded share
        let share = aggregate::percentage(top.total, current.total_expense);
        if share <= CONCENTRATION_SHARE {
            return None;
        }
        let name = self.categories.name_or_default(&top.category);
        Some(Insight {
            kind: InsightKind::CategoryConcentration,
            severity: Severity::Info,
            title: "Spending concentration".into(),
            message: format!(
                "{} accounts for {}% of your spending. Look for ways to cut back in this category.",
                name,
                share
            ),
        })
    }
}

fn expense_spike(current: &PeriodSummary, prior: &PeriodSummary) -> Option<Insight> {
    if current.total_expense <= prior.total_expense.saturating_mul(EXPENSE_SPIKE_FACTOR) {
        return None;
    }
    let message = if prior.total_expense.is_zero() {
        "You have expenses this month and none last month. Consider reviewing your spending."
            .to_string()
    } else {
        let increase = aggregate::scaled_ratio(current.total_expense, prior.total_expense)
            .unwrap_or(Decimal::MAX)
            .saturating_sub(Decimal::ONE_HUNDRED);
        format!(
            "Your expenses rose {}% compared with last month. Consider reviewing your spending.",
            increase.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        )
    };
    Some(Insight {
        kind: InsightKind::ExpenseSpike,
        severity: Severity::Warning,
        title: "Expenses on the rise".into(),
        message,
    })
}

fn low_savings(current: &PeriodSummary) -> Option<Insight> {
    if current.savings_rate >= LOW_SAVINGS_RATE {
        return None;
    }
    Some(Insight {
        kind: InsightKind::LowSavingsRate,
        severity: Severity::Warning,
        title: "Savings opportunity".into(),
        message: format!(
            "Your savings rate is {}%. Aim for at least {}% to build a reserve.",
            current.savings_rate, RECOMMENDED_SAVINGS_RATE
        ),
    })
}

fn upcoming_deadlines(goals: &[Goal], now: NaiveDateTime) -> Option<Insight> {
    let count = goals
        .iter()
        .filter(|g| goals::is_upcoming(g, now, UPCOMING_WINDOW_DAYS))
        .count();
    if count == 0 {
        return None;
    }
    Some(Insight {
        kind: InsightKind::UpcomingGoalDeadlines,
        severity: Severity::Info,
        title: "Goals nearing their deadline".into(),
        message: format!(
            "You have {} goal(s) due in the next {} days. Check your progress.",
            count, UPCOMING_WINDOW_DAYS
        ),
    })
}
