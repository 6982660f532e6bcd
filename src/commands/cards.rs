// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::arg;
use crate::config::Settings;
use crate::error::Error;
use crate::models::Card;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => {
            let data = store::load_cards(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let ccy = Settings::load(conn)?.currency;
                let rows = data
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.clone(),
                            format!("{} {}", c.bank, c.brand),
                            format!("**** {}", c.last4),
                            fmt_money(&c.limit, &ccy),
                            fmt_money(&c.used, &ccy),
                            fmt_money(&(c.limit - c.used), &ccy),
                            c.due_day.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Card", "Number", "Limit", "Used", "Available", "Due"],
                        rows
                    )
                );
            }
        }
        Some(("rm", sub)) => {
            let id = arg(sub, "id")?;
            if !store::delete_card(conn, id)? {
                bail!("Card '{}' not found", id);
            }
            println!("Removed card '{}'", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let last4 = arg(sub, "last4")?.trim().to_string();
    if last4.len() != 4 || !last4.chars().all(|c| c.is_ascii_digit()) {
        bail!("--last4 must be exactly four digits, got '{}'", last4);
    }
    let limit = parse_amount(arg(sub, "limit")?)?;
    let used = parse_amount(arg(sub, "used")?)?;
    if limit < Decimal::ZERO || used < Decimal::ZERO {
        return Err(Error::InvalidAmount("Card limit and usage cannot be negative".into()).into());
    }
    let card = Card {
        id: store::next_numeric_id(conn, "cards")?,
        bank: arg(sub, "bank")?.trim().to_string(),
        brand: arg(sub, "brand")?.trim().to_string(),
        last4,
        limit,
        used,
        due_day: *sub.get_one::<u32>("due-day").context("Missing --due-day")?,
    };
    store::insert_card(conn, &card)?;
    println!(
        "Added {} {} card ending {} (id {})",
        card.bank, card.brand, card.last4, card.id
    );
    Ok(())
}
