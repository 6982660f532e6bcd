// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::arg;
use crate::models::Category;
use crate::store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = arg(sub, "name")?.trim().to_string();
            if name.is_empty() {
                bail!("Category name cannot be empty");
            }
            let id = match sub.get_one::<String>("id") {
                Some(id) => id.clone(),
                None => store::next_numeric_id(conn, "categories")?,
            };
            let category = Category {
                id,
                name,
                color: arg(sub, "color")?.clone(),
                icon: arg(sub, "icon")?.clone(),
                r#type: arg(sub, "type")?.parse()?,
            };
            store::insert_category(conn, &category)?;
            println!(
                "Added category '{}' ({}, id {})",
                category.name, category.r#type, category.id
            );
        }
        Some(("list", sub)) => {
            let data = store::load_categories(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|c| vec![c.id, c.name, c.r#type.to_string(), c.color, c.icon])
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Category", "Type", "Color", "Icon"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = arg(sub, "id")?;
            if !store::delete_category(conn, id)? {
                bail!("Category '{}' not found", id);
            }
            println!("Removed category '{}'", id);
        }
        _ => {}
    }
    Ok(())
}
