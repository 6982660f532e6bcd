// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::arg;
use crate::config::Settings;
use crate::goals::{self, GoalChange, GoalInput, GoalPatch, GoalTracker};
use crate::models::{Goal, GoalStatus, Priority};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, now_local, parse_amount, parse_date, pretty_table};
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::Serialize;
use tracing::debug;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    handle_at(conn, m, now_local())
}

/// Same as [`handle`] with an explicit clock.
pub fn handle_at(conn: &Connection, m: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let mut tracker = load_tracker(conn, now)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let goal = tracker.create_goal(goal_input(sub)?, now)?;
            store::save_goal(conn, &goal)?;
            println!("Created goal '{}' (id {})", goal.name, goal.id);
        }
        Some(("list", sub)) => list(conn, &tracker, sub, now)?,
        Some(("update", sub)) => {
            let id = arg(sub, "id")?;
            let change = tracker.update_goal(id, goal_patch(sub)?, now)?;
            persist(conn, &change)?;
            println!("Updated goal '{}' ({})", change.goal.name, change.goal.status);
            announce(&change);
        }
        Some(("rm", sub)) => {
            let goal = tracker.delete_goal(arg(sub, "id")?)?;
            store::delete_goal(conn, &goal.id)?;
            println!("Removed goal '{}'", goal.name);
        }
        Some(("contribute", sub)) => {
            let id = arg(sub, "id")?;
            let amount = parse_amount(arg(sub, "amount")?)?;
            let change = tracker.add_contribution(id, amount, now)?;
            persist(conn, &change)?;
            let ccy = Settings::load(conn)?.currency;
            println!(
                "Added {} to '{}': {} of {} ({:.1}%)",
                fmt_money(&amount, &ccy),
                change.goal.name,
                fmt_money(&change.goal.current, &ccy),
                fmt_money(&change.goal.target, &ccy),
                goals::progress(&change.goal)
            );
            announce(&change);
        }
        Some(("recommend", sub)) => {
            let data = tracker.recommendations(now);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                if data.is_empty() {
                    println!("All goals are on track.");
                    return Ok(());
                }
                let rows = data
                    .iter()
                    .map(|r| vec![r.severity.as_str().to_string(), r.message.clone()])
                    .collect();
                println!("{}", pretty_table(&["Severity", "Recommendation"], rows));
            }
        }
        Some(("achievements", sub)) => {
            let data = tracker.achievements();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let ccy = Settings::load(conn)?.currency;
                let rows = data
                    .iter()
                    .map(|a| {
                        vec![
                            a.goal_name.clone(),
                            fmt_money(&a.target, &ccy),
                            a.completed_at.date().to_string(),
                            a.completion_time_days.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Goal", "Target", "Completed", "Days"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

/// Loads goals and achievements, settling any status that changed while the
/// tracker was not running.
pub fn load_tracker(conn: &Connection, now: NaiveDateTime) -> Result<GoalTracker> {
    let mut tracker =
        GoalTracker::from_parts(store::load_goals(conn)?, store::load_achievements(conn)?);
    let changes = tracker.refresh_statuses(now);
    for change in &changes {
        persist(conn, change)?;
    }
    debug!(refreshed = changes.len(), "Goal tracker loaded");
    Ok(tracker)
}

fn persist(conn: &Connection, change: &GoalChange) -> Result<()> {
    store::save_goal(conn, &change.goal)?;
    if let Some(done) = &change.completed {
        store::append_achievement(conn, &done.achievement)?;
    }
    Ok(())
}

fn announce(change: &GoalChange) {
    if let Some(done) = &change.completed {
        println!(
            "Goal '{}' completed in {} day(s)!",
            done.goal.name, done.achievement.completion_time_days
        );
    }
}

fn goal_input(sub: &clap::ArgMatches) -> Result<GoalInput> {
    Ok(GoalInput {
        name: arg(sub, "name")?.clone(),
        r#type: sub.get_one::<String>("type").cloned(),
        target: parse_amount(arg(sub, "target")?)?,
        current: sub
            .get_one::<String>("current")
            .map(|s| parse_amount(s))
            .transpose()?,
        deadline: sub
            .get_one::<String>("deadline")
            .map(|s| parse_date(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        priority: sub
            .get_one::<String>("priority")
            .map(|s| s.parse::<Priority>())
            .transpose()?,
        notes: sub.get_one::<String>("notes").cloned(),
    })
}

fn goal_patch(sub: &clap::ArgMatches) -> Result<GoalPatch> {
    let deadline = if sub.get_flag("clear-deadline") {
        Some(None)
    } else {
        sub.get_one::<String>("deadline")
            .map(|s| parse_date(s).map(Some))
            .transpose()?
    };
    let category = if sub.get_flag("clear-category") {
        Some(None)
    } else {
        sub.get_one::<String>("category").map(|c| Some(c.clone()))
    };
    Ok(GoalPatch {
        name: sub.get_one::<String>("name").cloned(),
        r#type: sub.get_one::<String>("type").cloned(),
        target: sub
            .get_one::<String>("target")
            .map(|s| parse_amount(s))
            .transpose()?,
        current: sub
            .get_one::<String>("current")
            .map(|s| parse_amount(s))
            .transpose()?,
        deadline,
        category,
        priority: sub
            .get_one::<String>("priority")
            .map(|s| s.parse::<Priority>())
            .transpose()?,
        notes: sub.get_one::<String>("notes").cloned(),
    })
}

#[derive(Serialize)]
pub struct GoalRow {
    pub id: String,
    pub name: String,
    pub r#type: String,
    pub priority: String,
    pub status: String,
    pub target: String,
    pub current: String,
    pub progress: String,
    pub deadline: Option<String>,
    pub days_remaining: Option<i64>,
    pub monthly_needed: Option<String>,
}

/// Goals matching the `--status`/`--priority`/`--type` filters.
pub fn query_rows(
    tracker: &GoalTracker,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<Vec<GoalRow>> {
    let status = sub
        .get_one::<String>("status")
        .map(|s| s.parse::<GoalStatus>())
        .transpose()?;
    let priority = sub
        .get_one::<String>("priority")
        .map(|s| s.parse::<Priority>())
        .transpose()?;
    let kind = sub.get_one::<String>("type");

    let mut selected: Vec<&Goal> = match status {
        Some(s) => tracker.by_status(s),
        None => tracker.goals().iter().collect(),
    };
    selected.retain(|g| priority.is_none_or(|p| g.priority == p));
    selected.retain(|g| kind.is_none_or(|k| &g.r#type == k));

    Ok(selected
        .into_iter()
        .map(|g| GoalRow {
            id: g.id.clone(),
            name: g.name.clone(),
            r#type: g.r#type.clone(),
            priority: g.priority.to_string(),
            status: g.status.to_string(),
            target: g.target.to_string(),
            current: g.current.to_string(),
            progress: format!("{:.1}", goals::progress(g)),
            deadline: g.deadline.map(|d| d.to_string()),
            days_remaining: goals::days_remaining(g, now),
            monthly_needed: goals::monthly_needed(g, now).map(|v| format!("{:.2}", v)),
        })
        .collect())
}

fn list(
    conn: &Connection,
    tracker: &GoalTracker,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    let data = query_rows(tracker, sub, now)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = Settings::load(conn)?.currency;
    let rows = data
        .iter()
        .map(|g| {
            vec![
                g.id.clone(),
                g.name.clone(),
                g.status.clone(),
                g.priority.clone(),
                format!("{} / {}", g.current, g.target),
                format!("{}%", g.progress),
                g.deadline.clone().unwrap_or_else(|| "-".into()),
                g.monthly_needed
                    .as_ref()
                    .map(|v| format!("{} {}", ccy, v))
                    .unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Goal", "Status", "Priority", "Saved", "Progress", "Deadline", "Per month"],
            rows
        )
    );
    println!(
        "Overall: {:.1}% of {}",
        tracker.overall_progress(),
        fmt_money(&tracker.total_target_value(), &ccy)
    );
    Ok(())
}
