// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::arg;
use crate::config::{self, Settings};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = arg(sub, "key")?;
            config::set(conn, key, arg(sub, "value")?)?;
            println!("Set {}", key);
        }
        Some(("list", sub)) => {
            let settings = Settings::load(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &settings)? {
                let rows = vec![
                    vec!["currency".into(), settings.currency],
                    vec!["language".into(), settings.language],
                    vec!["theme".into(), settings.theme],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
