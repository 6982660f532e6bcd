// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::arg;
use crate::aggregate;
use crate::error::Error;
use crate::models::{CategoryLookup, Transaction, TxType};
use crate::store;
use crate::utils::{maybe_print_json, parse_amount, parse_date, parse_month, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use rusqlite::Connection;
use serde::Serialize;
use tracing::warn;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(arg(sub, "date")?)?;
    let amount = parse_amount(arg(sub, "amount")?)?;
    if amount < Decimal::ZERO {
        return Err(Error::InvalidAmount(format!(
            "Transaction amount cannot be negative, got {}",
            amount
        ))
        .into());
    }
    let description = arg(sub, "description")?.trim().to_string();
    if description.is_empty() {
        return Err(Error::InvalidInput("Description is required".into()).into());
    }
    let category = arg(sub, "category")?.clone();
    let categories = store::load_categories(conn)?;
    if categories.category_name(&category).is_none() {
        warn!(category = %category, "Unknown category, reports will show the default label");
    }

    let tx = Transaction {
        id: store::next_transaction_id(conn)?,
        date,
        description,
        r#type: arg(sub, "type")?.parse()?,
        category,
        amount,
        status: arg(sub, "status")?.clone(),
    };
    store::insert_transaction(conn, &tx)?;
    println!(
        "Recorded {} {} on {} '{}' (id {})",
        tx.r#type, tx.amount, tx.date, tx.description, tx.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.description.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Type", "Category", "Amount", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub r#type: String,
    pub category: String,
    pub amount: String,
    pub status: String,
}

/// Most recent first, filtered by the `--month`/`--type`/`--limit` flags.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let all = store::load_transactions(conn)?;
    let categories = store::load_categories(conn)?;
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TxType>())
        .transpose()?;

    let selected: Vec<&Transaction> = match sub.get_one::<String>("month") {
        Some(month) => {
            let (year, month) = parse_month(month)?;
            aggregate::monthly_transactions(&all, month, year, kind)
        }
        None => all
            .iter()
            .filter(|t| kind.is_none_or(|k| t.r#type == k))
            .collect(),
    };
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    Ok(selected
        .into_iter()
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            description: t.description.clone(),
            r#type: t.r#type.to_string(),
            category: categories.name_or_default(&t.category),
            amount: t.amount.to_string(),
            status: t.status.clone(),
        })
        .collect())
}
