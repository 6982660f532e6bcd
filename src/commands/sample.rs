// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::sample::{self, SampleData};
use crate::store;
use crate::utils::now_local;
use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    if !m.get_flag("force") && !store::is_empty(conn)? {
        bail!("Database already has data; rerun with --force to load the demo set anyway");
    }
    let data = load(conn, now_local())?;
    println!(
        "Loaded {} categories, {} accounts, {} cards, {} goals and {} transactions",
        data.categories.len(),
        data.accounts.len(),
        data.cards.len(),
        data.goals.len(),
        data.transactions.len()
    );
    Ok(())
}

/// Writes the demo data set in one transaction, replacing records that share
/// an id with it.
pub fn load(conn: &mut Connection, now: NaiveDateTime) -> Result<SampleData> {
    let data = sample::generate(now);
    let tx = conn.transaction()?;
    for c in &data.categories {
        store::delete_category(&tx, &c.id)?;
        store::insert_category(&tx, c)?;
    }
    for a in &data.accounts {
        store::delete_account(&tx, &a.id)?;
        store::insert_account(&tx, a)?;
    }
    for c in &data.cards {
        store::delete_card(&tx, &c.id)?;
        store::insert_card(&tx, c)?;
    }
    for g in &data.goals {
        store::save_goal(&tx, g)?;
    }
    for t in &data.transactions {
        tx.execute("DELETE FROM transactions WHERE id=?1", [&t.id])?;
        store::insert_transaction(&tx, t)?;
    }
    tx.commit().context("Commit demo data")?;
    info!(transactions = data.transactions.len(), "Demo data loaded");
    Ok(data)
}

/// Seeds the default categories when none exist yet.
pub fn seed_categories(conn: &Connection) -> Result<usize> {
    if !store::load_categories(conn)?.is_empty() {
        return Ok(0);
    }
    let defaults = sample::default_categories();
    for c in &defaults {
        store::insert_category(conn, c)?;
    }
    Ok(defaults.len())
}
