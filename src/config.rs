// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Presentation preferences kept in the `settings` table.

use anyhow::{Result, bail};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const KEYS: [&str; 3] = ["currency", "language", "theme"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub currency: String,
    pub language: String,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency: "BRL".to_string(),
            language: "pt-BR".to_string(),
            theme: "light".to_string(),
        }
    }
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        let defaults = Settings::default();
        let settings = Settings {
            currency: get(conn, "currency")?.unwrap_or(defaults.currency),
            language: get(conn, "language")?.unwrap_or(defaults.language),
            theme: get(conn, "theme")?.unwrap_or(defaults.theme),
        };
        debug!(?settings, "Loaded settings");
        Ok(settings)
    }

    pub fn save(&self, conn: &Connection) -> Result<()> {
        set(conn, "currency", &self.currency)?;
        set(conn, "language", &self.language)?;
        set(conn, "theme", &self.theme)?;
        Ok(())
    }
}

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    if !KEYS.contains(&key) {
        bail!("Unknown setting '{}' (use {})", key, KEYS.join("|"));
    }
    let value = if key == "currency" {
        value.trim().to_uppercase()
    } else {
        value.trim().to_string()
    };
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}
