// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::arg;
use super::goals::load_tracker;
use crate::aggregate;
use crate::config::Settings;
use crate::dashboard::DashboardBuilder;
use crate::insights::InsightGenerator;
use crate::models::{CategoryLookup, TxType};
use crate::report::{CategoryShare, MonthlyReport, ReportBuilder};
use crate::store;
use crate::time::Period;
use crate::utils::{fmt_money, maybe_print_json, now_local, parse_month, pretty_table};
use anyhow::{Result, bail};
use chrono::{Datelike, NaiveDateTime};
use rusqlite::Connection;
use tracing::debug;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    handle_at(conn, m, now_local())
}

pub fn handle_at(conn: &Connection, m: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub, now)?,
        Some(("categories", sub)) => categories(conn, sub, now)?,
        Some(("monthly", sub)) => monthly(conn, sub, now)?,
        Some(("wealth", sub)) => wealth(conn, sub, now)?,
        Some(("insights", sub)) => insights(conn, sub, now)?,
        Some(("dashboard", sub)) => dashboard(conn, sub, now)?,
        Some(("export", sub)) => export(conn, sub, now)?,
        _ => {}
    }
    Ok(())
}

fn period(sub: &clap::ArgMatches) -> Result<Period> {
    Ok(arg(sub, "period")?.parse()?)
}

fn summary(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let transactions = store::load_transactions(conn)?;
    let data = aggregate::period_summary(&transactions, period(sub)?, now);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = Settings::load(conn)?.currency;
        let rows = vec![
            vec!["Income".into(), fmt_money(&data.total_income, &ccy)],
            vec!["Expenses".into(), fmt_money(&data.total_expense, &ccy)],
            vec!["Balance".into(), fmt_money(&data.balance, &ccy)],
            vec!["Savings rate".into(), format!("{}%", data.savings_rate)],
        ];
        println!("{}", pretty_table(&[data.label.as_str(), ""], rows));
    }
    Ok(())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let transactions = store::load_transactions(conn)?;
    let lookup = store::load_categories(conn)?;
    let period = period(sub)?;
    let top = sub
        .get_one::<usize>("top")
        .copied()
        .unwrap_or(aggregate::DEFAULT_TOP_CATEGORIES);
    let spent = aggregate::sum_by_type(
        aggregate::filter_by_period(&transactions, period, now),
        TxType::Expense,
    );
    let data: Vec<CategoryShare> = aggregate::category_breakdown(&transactions, period, now, top)
        .into_iter()
        .map(|c| CategoryShare {
            name: lookup.name_or_default(&c.category),
            percentage: aggregate::percentage(c.total, spent),
            category: c.category,
            total: c.total,
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = Settings::load(conn)?.currency;
        let rows = data
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    fmt_money(&c.total, &ccy),
                    format!("{}%", c.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let transactions = store::load_transactions(conn)?;
    let months = sub.get_one::<usize>("months").copied().unwrap_or(6);
    let data = aggregate::monthly_series(&transactions, months, now);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = Settings::load(conn)?.currency;
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.label.clone(),
                    fmt_money(&b.income, &ccy),
                    fmt_money(&b.expense, &ccy),
                    fmt_money(&(b.income - b.expense), &ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net"], rows)
        );
    }
    Ok(())
}

fn wealth(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let transactions = store::load_transactions(conn)?;
    let months = sub.get_one::<usize>("months").copied().unwrap_or(6);
    let data = aggregate::wealth_series(&transactions, months, now);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = Settings::load(conn)?.currency;
        let rows = data
            .iter()
            .map(|p| {
                vec![
                    p.label.clone(),
                    p.boundary.to_string(),
                    fmt_money(&p.balance, &ccy),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "As of", "Balance"], rows));
    }
    Ok(())
}

fn insights(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let transactions = store::load_transactions(conn)?;
    let lookup = store::load_categories(conn)?;
    let tracker = load_tracker(conn, now)?;
    let data = InsightGenerator::new(&lookup).for_current_month(&transactions, tracker.goals(), now);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("Nothing to flag this month.");
            return Ok(());
        }
        let rows = data
            .iter()
            .map(|i| {
                vec![
                    i.severity.as_str().to_string(),
                    i.title.clone(),
                    i.message.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Severity", "Insight", "Details"], rows));
    }
    Ok(())
}

fn dashboard(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let transactions = store::load_transactions(conn)?;
    let lookup = store::load_categories(conn)?;
    let accounts = store::load_accounts(conn)?;
    let cards = store::load_cards(conn)?;
    let tracker = load_tracker(conn, now)?;
    let data = DashboardBuilder::new(&lookup).snapshot(
        &transactions,
        &accounts,
        &cards,
        tracker.goals(),
        now,
    );
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = Settings::load(conn)?.currency;
    let overview = vec![
        vec!["Income (month)".into(), fmt_money(&data.month.total_income, &ccy)],
        vec!["Expenses (month)".into(), fmt_money(&data.month.total_expense, &ccy)],
        vec!["Balance (month)".into(), fmt_money(&data.month.balance, &ccy)],
        vec![
            format!("Accounts ({})", data.accounts_count),
            fmt_money(&data.total_accounts_balance, &ccy),
        ],
        vec![
            format!("Cards ({})", data.cards_count),
            format!(
                "{} available of {}",
                fmt_money(&data.available_credit, &ccy),
                fmt_money(&data.total_credit_limit, &ccy)
            ),
        ],
        vec![
            format!("Goals ({})", data.goals_count),
            data.average_goal_progress
                .map(|p| format!("{:.1}% average progress", p))
                .unwrap_or_else(|| "no active goals".into()),
        ],
    ];
    println!("{}", pretty_table(&[data.month.label.as_str(), ""], overview));
    let recent = data
        .recent
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.description.clone(),
                t.category_name.clone(),
                t.r#type.to_string(),
                fmt_money(&t.amount, &ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Description", "Category", "Type", "Amount"], recent)
    );
    Ok(())
}

/// Builds the monthly report for `--month` (current month by default).
pub fn build_report(
    conn: &Connection,
    month: Option<&String>,
    now: NaiveDateTime,
) -> Result<MonthlyReport> {
    let (year, month) = match month {
        Some(m) => parse_month(m)?,
        None => (now.year(), now.month()),
    };
    let transactions = store::load_transactions(conn)?;
    let lookup = store::load_categories(conn)?;
    let tracker = load_tracker(conn, now)?;
    Ok(ReportBuilder::new(&lookup).monthly(&transactions, tracker.goals(), month, year, now))
}

fn export(conn: &Connection, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let fmt = arg(sub, "format")?.to_lowercase();
    let out = arg(sub, "out")?;
    if fmt != "json" && fmt != "csv" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    let report = build_report(conn, sub.get_one::<String>("month"), now)?;
    debug!(label = %report.label, format = %fmt, "Exporting report");

    if fmt == "json" {
        std::fs::write(out, serde_json::to_string_pretty(&report)?)?;
    } else {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record(["section", "date", "description", "category", "amount", "share"])?;
        for line in &report.income {
            wtr.write_record([
                "income".to_string(),
                line.date.to_string(),
                line.description.clone(),
                line.category_name.clone(),
                line.amount.to_string(),
                String::new(),
            ])?;
        }
        for line in &report.expenses {
            wtr.write_record([
                "expense".to_string(),
                line.date.to_string(),
                line.description.clone(),
                line.category_name.clone(),
                line.amount.to_string(),
                String::new(),
            ])?;
        }
        for share in &report.categories {
            wtr.write_record([
                "category".to_string(),
                String::new(),
                String::new(),
                share.name.clone(),
                share.total.to_string(),
                share.percentage.to_string(),
            ])?;
        }
        wtr.flush()?;
    }
    println!("Exported {} report to {}", report.label, out);
    Ok(())
}
