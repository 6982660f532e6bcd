// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::arg;
use crate::config::Settings;
use crate::models::Account;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let account = Account {
                id: store::next_numeric_id(conn, "accounts")?,
                name: arg(sub, "name")?.trim().to_string(),
                bank: arg(sub, "bank")?.trim().to_string(),
                balance: parse_amount(arg(sub, "balance")?)?,
                r#type: arg(sub, "type")?.to_lowercase(),
            };
            store::insert_account(conn, &account)?;
            println!(
                "Added account '{}' at {} ({}, id {})",
                account.name, account.bank, account.r#type, account.id
            );
        }
        Some(("list", sub)) => {
            let data = store::load_accounts(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let ccy = Settings::load(conn)?.currency;
                let rows = data
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.clone(),
                            a.name.clone(),
                            a.bank.clone(),
                            a.r#type.clone(),
                            fmt_money(&a.balance, &ccy),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Name", "Bank", "Type", "Balance"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = arg(sub, "id")?;
            if !store::delete_account(conn, id)? {
                bail!("Account '{}' not found", id);
            }
            println!("Removed account '{}'", id);
        }
        _ => {}
    }
    Ok(())
}
