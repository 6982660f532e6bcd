// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite-backed persistence for the records the engine works on.
//! Money and dates are kept as text and parsed on load.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::models::{Account, Achievement, Card, Category, Goal, Transaction};
use crate::utils::{fmt_datetime, parse_date, parse_datetime, parse_decimal};

pub fn insert_category(conn: &Connection, c: &Category) -> Result<()> {
    conn.execute(
        "INSERT INTO categories(id, name, color, icon, type) VALUES (?1,?2,?3,?4,?5)",
        params![c.id, c.name, c.color, c.icon, c.r#type.as_str()],
    )
    .with_context(|| format!("Insert category '{}'", c.id))?;
    Ok(())
}

pub fn load_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name, color, icon, type FROM categories ORDER BY id")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, color, icon, kind) = row?;
        out.push(Category {
            r#type: kind.parse()?,
            id,
            name,
            color,
            icon,
        });
    }
    Ok(out)
}

pub fn delete_category(conn: &Connection, id: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM categories WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn insert_account(conn: &Connection, a: &Account) -> Result<()> {
    conn.execute(
        "INSERT INTO accounts(id, name, bank, balance, type) VALUES (?1,?2,?3,?4,?5)",
        params![a.id, a.name, a.bank, a.balance.to_string(), a.r#type],
    )
    .with_context(|| format!("Insert account '{}'", a.name))?;
    Ok(())
}

pub fn load_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare("SELECT id, name, bank, balance, type FROM accounts ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, bank, balance, kind) = row?;
        out.push(Account {
            balance: parse_decimal(&balance)
                .with_context(|| format!("Invalid balance for account {}", name))?,
            id,
            name,
            bank,
            r#type: kind,
        });
    }
    Ok(out)
}

pub fn delete_account(conn: &Connection, id: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM accounts WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn insert_card(conn: &Connection, c: &Card) -> Result<()> {
    conn.execute(
        "INSERT INTO cards(id, bank, brand, last4, credit_limit, used, due_day)
         VALUES (?1,?2,?3,?4,?5,?6,?7)",
        params![
            c.id,
            c.bank,
            c.brand,
            c.last4,
            c.limit.to_string(),
            c.used.to_string(),
            c.due_day
        ],
    )
    .with_context(|| format!("Insert card '{}'", c.id))?;
    Ok(())
}

pub fn load_cards(conn: &Connection) -> Result<Vec<Card>> {
    let mut stmt = conn.prepare(
        "SELECT id, bank, brand, last4, credit_limit, used, due_day FROM cards ORDER BY id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, u32>(6)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, bank, brand, last4, limit, used, due_day) = row?;
        out.push(Card {
            limit: parse_decimal(&limit)
                .with_context(|| format!("Invalid limit for card {}", id))?,
            used: parse_decimal(&used).with_context(|| format!("Invalid usage for card {}", id))?,
            id,
            bank,
            brand,
            last4,
            due_day,
        });
    }
    Ok(out)
}

pub fn delete_card(conn: &Connection, id: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM cards WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn insert_transaction(conn: &Connection, t: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(id, date, description, type, category, amount, status)
         VALUES (?1,?2,?3,?4,?5,?6,?7)",
        params![
            t.id,
            t.date.to_string(),
            t.description,
            t.r#type.as_str(),
            t.category,
            t.amount.to_string(),
            t.status
        ],
    )
    .with_context(|| format!("Insert transaction '{}'", t.id))?;
    Ok(())
}

/// All transactions, most recent first.
pub fn load_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, description, type, category, amount, status
         FROM transactions ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: String = r.get(0)?;
        let date: String = r.get(1)?;
        let kind: String = r.get(3)?;
        let amount: String = r.get(5)?;
        out.push(Transaction {
            date: parse_date(&date).with_context(|| format!("Transaction {}", id))?,
            description: r.get(2)?,
            r#type: kind.parse()?,
            category: r.get(4)?,
            amount: parse_decimal(&amount).with_context(|| format!("Transaction {}", id))?,
            status: r.get(6)?,
            id,
        });
    }
    debug!(count = out.len(), "Loaded transactions");
    Ok(out)
}

/// Next free numeric id for one of the reference tables.
pub fn next_numeric_id(conn: &Connection, table: &str) -> Result<String> {
    let sql = match table {
        "categories" => "SELECT COALESCE(MAX(CAST(id AS INTEGER)), 0) + 1 FROM categories",
        "accounts" => "SELECT COALESCE(MAX(CAST(id AS INTEGER)), 0) + 1 FROM accounts",
        "cards" => "SELECT COALESCE(MAX(CAST(id AS INTEGER)), 0) + 1 FROM cards",
        other => anyhow::bail!("No numeric ids for table '{}'", other),
    };
    let n: i64 = conn.query_row(sql, [], |r| r.get(0))?;
    Ok(n.to_string())
}

pub fn next_transaction_id(conn: &Connection) -> Result<String> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?;
    let mut candidate = n;
    loop {
        let id = format!("t{}", candidate);
        let taken: Option<i32> = conn
            .query_row("SELECT 1 FROM transactions WHERE id=?1", params![id], |r| {
                r.get(0)
            })
            .optional()?;
        if taken.is_none() {
            return Ok(id);
        }
        candidate += 1;
    }
}

/// Insert or replace the stored copy of a goal.
pub fn save_goal(conn: &Connection, g: &Goal) -> Result<()> {
    conn.execute(
        "INSERT INTO goals(id, name, type, target, current, deadline, category, priority, status,
                           created_at, updated_at, notes)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12)
         ON CONFLICT(id) DO UPDATE SET
            name=excluded.name, type=excluded.type, target=excluded.target,
            current=excluded.current, deadline=excluded.deadline, category=excluded.category,
            priority=excluded.priority, status=excluded.status,
            updated_at=excluded.updated_at, notes=excluded.notes",
        params![
            g.id,
            g.name,
            g.r#type,
            g.target.to_string(),
            g.current.to_string(),
            g.deadline.map(|d| d.to_string()),
            g.category,
            g.priority.as_str(),
            g.status.as_str(),
            fmt_datetime(g.created_at),
            fmt_datetime(g.updated_at),
            g.notes
        ],
    )
    .with_context(|| format!("Save goal '{}'", g.id))?;
    Ok(())
}

pub fn load_goals(conn: &Connection) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, type, target, current, deadline, category, priority, status,
                created_at, updated_at, notes
         FROM goals ORDER BY created_at, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: String = r.get(0)?;
        let target: String = r.get(3)?;
        let current: String = r.get(4)?;
        let deadline: Option<String> = r.get(5)?;
        let priority: String = r.get(7)?;
        let status: String = r.get(8)?;
        let created_at: String = r.get(9)?;
        let updated_at: String = r.get(10)?;
        out.push(Goal {
            name: r.get(1)?,
            r#type: r.get(2)?,
            target: parse_decimal(&target).with_context(|| format!("Goal {}", id))?,
            current: parse_decimal(&current).with_context(|| format!("Goal {}", id))?,
            deadline: deadline.as_deref().map(parse_date).transpose()?,
            category: r.get(6)?,
            priority: priority.parse()?,
            status: status.parse()?,
            created_at: parse_datetime(&created_at)?,
            updated_at: parse_datetime(&updated_at)?,
            notes: r.get(11)?,
            id,
        });
    }
    debug!(count = out.len(), "Loaded goals");
    Ok(out)
}

pub fn delete_goal(conn: &Connection, id: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM goals WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn append_achievement(conn: &Connection, a: &Achievement) -> Result<()> {
    conn.execute(
        "INSERT INTO achievements(goal_id, goal_name, target, completed_at, completion_time_days)
         VALUES (?1,?2,?3,?4,?5)",
        params![
            a.goal_id,
            a.goal_name,
            a.target.to_string(),
            fmt_datetime(a.completed_at),
            a.completion_time_days
        ],
    )?;
    Ok(())
}

pub fn load_achievements(conn: &Connection) -> Result<Vec<Achievement>> {
    let mut stmt = conn.prepare(
        "SELECT goal_id, goal_name, target, completed_at, completion_time_days
         FROM achievements ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let target: String = r.get(2)?;
        let completed_at: String = r.get(3)?;
        out.push(Achievement {
            goal_id: r.get(0)?,
            goal_name: r.get(1)?,
            target: parse_decimal(&target)?,
            completed_at: parse_datetime(&completed_at)?,
            completion_time_days: r.get(4)?,
        });
    }
    Ok(out)
}

pub fn is_empty(conn: &Connection) -> Result<bool> {
    let n: i64 = conn.query_row(
        "SELECT (SELECT COUNT(*) FROM categories) + (SELECT COUNT(*) FROM transactions)
              + (SELECT COUNT(*) FROM goals)",
        [],
        |r| r.get(0),
    )?;
    Ok(n == 0)
}
