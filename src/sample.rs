// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Deterministic demo data: default categories, a couple of accounts, cards
//! and goals, and fifty transactions spread over the last six months.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::{Account, Card, Category, Goal, GoalStatus, Priority, Transaction, TxType};
use crate::time;

pub const SAMPLE_TRANSACTIONS: usize = 50;
const SAMPLE_MONTHS: i32 = 6;

pub struct SampleData {
    pub categories: Vec<Category>,
    pub accounts: Vec<Account>,
    pub cards: Vec<Card>,
    pub goals: Vec<Goal>,
    pub transactions: Vec<Transaction>,
}

pub fn default_categories() -> Vec<Category> {
    [
        ("1", "Food", "#FF6B6B", "utensils", TxType::Expense),
        ("2", "Transport", "#4ECDC4", "car", TxType::Expense),
        ("3", "Housing", "#45B7D1", "home", TxType::Expense),
        ("4", "Education", "#96CEB4", "graduation-cap", TxType::Expense),
        ("5", "Leisure", "#FFEAA7", "gamepad", TxType::Expense),
        ("6", "Salary", "#98D8C8", "money-bill-wave", TxType::Income),
        ("7", "Freelance", "#F7DC6F", "laptop-code", TxType::Income),
    ]
    .into_iter()
    .map(|(id, name, color, icon, kind)| Category {
        id: id.into(),
        name: name.into(),
        color: color.into(),
        icon: icon.into(),
        r#type: kind,
    })
    .collect()
}

pub fn generate(now: NaiveDateTime) -> SampleData {
    let categories = default_categories();
    let accounts = vec![
        Account {
            id: "1".into(),
            name: "Checking".into(),
            bank: "Example Bank".into(),
            balance: Decimal::new(450000, 2),
            r#type: "checking".into(),
        },
        Account {
            id: "2".into(),
            name: "Savings".into(),
            bank: "Example Bank".into(),
            balance: Decimal::new(1200000, 2),
            r#type: "savings".into(),
        },
    ];
    let cards = vec![
        Card {
            id: "1".into(),
            bank: "Example Bank".into(),
            brand: "visa".into(),
            last4: "1234".into(),
            limit: Decimal::new(500000, 2),
            used: Decimal::new(125000, 2),
            due_day: 10,
        },
        Card {
            id: "2".into(),
            bank: "Other Bank".into(),
            brand: "mastercard".into(),
            last4: "5678".into(),
            limit: Decimal::new(300000, 2),
            used: Decimal::new(50000, 2),
            due_day: 15,
        },
    ];
    let today = now.date();
    let goals = vec![
        sample_goal(
            "1",
            "Trip to Europe",
            Decimal::new(1000000, 2),
            Decimal::new(350000, 2),
            today + Duration::days(270),
            Priority::High,
            now,
        ),
        sample_goal(
            "2",
            "New laptop",
            Decimal::new(500000, 2),
            Decimal::new(200000, 2),
            today + Duration::days(45),
            Priority::Medium,
            now,
        ),
    ];

    SampleData {
        transactions: sample_transactions(&categories, today),
        categories,
        accounts,
        cards,
        goals,
    }
}

fn sample_goal(
    id: &str,
    name: &str,
    target: Decimal,
    current: Decimal,
    deadline: NaiveDate,
    priority: Priority,
    now: NaiveDateTime,
) -> Goal {
    Goal {
        id: id.into(),
        name: name.into(),
        r#type: crate::goals::DEFAULT_GOAL_TYPE.into(),
        target,
        current,
        deadline: Some(deadline),
        category: None,
        priority,
        status: GoalStatus::Active,
        created_at: now,
        updated_at: now,
        notes: String::new(),
    }
}

fn sample_transactions(categories: &[Category], today: NaiveDate) -> Vec<Transaction> {
    let income_cats: Vec<&Category> = categories
        .iter()
        .filter(|c| c.r#type == TxType::Income)
        .collect();
    let expense_cats: Vec<&Category> = categories
        .iter()
        .filter(|c| c.r#type == TxType::Expense)
        .collect();
    let income_desc = ["Salary", "Freelance", "Dividends", "Interest"];
    let expense_desc = ["Supermarket", "Fuel", "Rent", "Internet", "Cinema"];

    let mut out: Vec<Transaction> = (0..SAMPLE_TRANSACTIONS)
        .map(|i| {
            let offset = (i as i32 * 7) % SAMPLE_MONTHS;
            let (year, month) = time::shift_month(today.year(), today.month(), -offset);
            let day = (i as u32 * 11) % 28 + 1;
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .unwrap_or(today)
                .min(today);
            let is_income = i % 10 < 3;
            let (kind, category, description, amount) = if is_income {
                let cents = 200_000 + (i as i64 * 37_919) % 500_000;
                (
                    TxType::Income,
                    income_cats[i % income_cats.len()].id.clone(),
                    income_desc[i % income_desc.len()],
                    Decimal::new(cents, 2),
                )
            } else {
                let cents = 5_000 + (i as i64 * 9_733) % 50_000;
                (
                    TxType::Expense,
                    expense_cats[i % expense_cats.len()].id.clone(),
                    expense_desc[i % expense_desc.len()],
                    Decimal::new(cents, 2),
                )
            };
            Transaction {
                id: format!("t{}", i),
                date,
                description: description.into(),
                r#type: kind,
                category,
                amount,
                status: "completed".into(),
            }
        })
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}
