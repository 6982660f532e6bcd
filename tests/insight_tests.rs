// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use finboard::aggregate::CategoryTotal;
use finboard::insights::{InsightGenerator, InsightInput, InsightKind};
use finboard::models::{Goal, GoalStatus, PeriodSummary, Priority, Transaction, TxType};
use rust_decimal::Decimal;

fn now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-03-15T12:00:00", "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn summary(income: i64, expense: i64, rate: Decimal) -> PeriodSummary {
    PeriodSummary {
        label: "2024-03".into(),
        total_income: Decimal::from(income),
        total_expense: Decimal::from(expense),
        balance: Decimal::from(income - expense),
        savings_rate: rate,
    }
}

fn lookup() -> HashMap<String, String> {
    HashMap::from([("1".to_string(), "Food".to_string())])
}

fn goal(deadline: Option<&str>, status: GoalStatus) -> Goal {
    Goal {
        id: "g1".into(),
        name: "Trip".into(),
        r#type: "savings".into(),
        target: Decimal::from(1000),
        current: Decimal::from(100),
        deadline: deadline.map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()),
        category: None,
        priority: Priority::Medium,
        status,
        created_at: now(),
        updated_at: now(),
        notes: String::new(),
    }
}

#[test]
fn all_rules_fire_in_order() {
    let categories = lookup();
    let current = summary(100, 130, Decimal::ZERO);
    let prior = summary(500, 100, Decimal::from(80));
    let breakdown = vec![CategoryTotal {
        category: "1".into(),
        total: Decimal::from(50),
    }];
    let goals = vec![goal(Some("2024-04-01"), GoalStatus::Active)];

    let insights = InsightGenerator::new(&categories).generate(&InsightInput {
        current: &current,
        prior: &prior,
        breakdown: &breakdown,
        goals: &goals,
        now: now(),
    });
    let kinds: Vec<InsightKind> = insights.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        [
            InsightKind::ExpenseSpike,
            InsightKind::LowSavingsRate,
            InsightKind::CategoryConcentration,
            InsightKind::UpcomingGoalDeadlines,
        ]
    );
    assert!(insights[0].message.contains("30%"));
    assert!(insights[2].message.starts_with("Food"));
    assert!(insights[2].message.contains("38.5%"));
    assert!(insights[3].message.contains("1 goal(s)"));
}

#[test]
fn healthy_month_has_no_insights() {
    let categories = lookup();
    let current = summary(1000, 100, Decimal::from(90));
    let prior = summary(1000, 100, Decimal::from(90));
    let breakdown = vec![CategoryTotal {
        category: "1".into(),
        total: Decimal::from(30),
    }];
    let goals = vec![
        goal(Some("2024-09-01"), GoalStatus::Active),
        goal(Some("2024-03-20"), GoalStatus::Completed),
        goal(None, GoalStatus::Active),
    ];
    let insights = InsightGenerator::new(&categories).generate(&InsightInput {
        current: &current,
        prior: &prior,
        breakdown: &breakdown,
        goals: &goals,
        now: now(),
    });
    assert!(insights.is_empty(), "{:?}", insights);
}

#[test]
fn spike_without_prior_spending_omits_percentage() {
    let categories = lookup();
    let current = summary(1000, 10, Decimal::from(99));
    let prior = summary(0, 0, Decimal::ZERO);
    let insights = InsightGenerator::new(&categories).generate(&InsightInput {
        current: &current,
        prior: &prior,
        breakdown: &[],
        goals: &[],
        now: now(),
    });
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].kind, InsightKind::ExpenseSpike);
    assert!(!insights[0].message.contains('%'));
}

#[test]
fn concentration_names_unknown_category_with_default_label() {
    let categories = lookup();
    let current = summary(1000, 100, Decimal::from(90));
    let breakdown = vec![CategoryTotal {
        category: "missing".into(),
        total: Decimal::from(60),
    }];
    let insights = InsightGenerator::new(&categories).generate(&InsightInput {
        current: &current,
        prior: &current,
        breakdown: &breakdown,
        goals: &[],
        now: now(),
    });
    assert_eq!(insights.len(), 1);
    assert!(insights[0].message.starts_with("General"));
}

#[test]
fn concentration_threshold_applies_to_rounded_share() {
    let categories = lookup();
    let current = summary(100_000, 10_000, Decimal::from(90));
    let generate = |top: i64| {
        let breakdown = vec![CategoryTotal {
            category: "1".into(),
            total: Decimal::from(top),
        }];
        InsightGenerator::new(&categories).generate(&InsightInput {
            current: &current,
            prior: &current,
            breakdown: &breakdown,
            goals: &[],
            now: now(),
        })
    };

    // 30.04% shows as 30.0%
    assert!(generate(3004).is_empty());

    let over = generate(3005);
    assert_eq!(over.len(), 1);
    assert_eq!(over[0].kind, InsightKind::CategoryConcentration);
    assert!(over[0].message.contains("30.1%"), "{}", over[0].message);
}

#[test]
fn spike_against_tiny_prior_spending_does_not_panic() {
    let categories = lookup();
    let current = summary(1000, 900, Decimal::from(10));
    let prior = PeriodSummary {
        total_expense: Decimal::new(1, 28),
        ..summary(1000, 0, Decimal::from(100))
    };
    let insights = InsightGenerator::new(&categories).generate(&InsightInput {
        current: &current,
        prior: &prior,
        breakdown: &[],
        goals: &[],
        now: now(),
    });
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].kind, InsightKind::ExpenseSpike);
}

#[test]
fn current_month_compares_against_previous_month() {
    let categories = lookup();
    let tx = |id: &str, date: &str, kind: TxType, amount: i64| Transaction {
        id: id.into(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: "x".into(),
        r#type: kind,
        category: "1".into(),
        amount: Decimal::from(amount),
        status: "completed".into(),
    };
    let ts = vec![
        tx("1", "2024-02-10", TxType::Expense, 100),
        tx("2", "2024-02-01", TxType::Income, 1000),
        tx("3", "2024-03-02", TxType::Income, 1000),
        tx("4", "2024-03-05", TxType::Expense, 200),
    ];
    let insights = InsightGenerator::new(&categories).for_current_month(&ts, &[], now());
    let kinds: Vec<InsightKind> = insights.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        [InsightKind::ExpenseSpike, InsightKind::CategoryConcentration]
    );
    assert!(insights[0].message.contains("100%"));
}
