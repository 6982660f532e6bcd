// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod cards;
pub mod categories;
pub mod goals;
pub mod reports;
pub mod sample;
pub mod settings;
pub mod transactions;

use anyhow::{Context, Result};

/// Fetches an argument clap already enforces as required or defaulted.
pub(crate) fn arg<'a>(m: &'a clap::ArgMatches, id: &str) -> Result<&'a String> {
    m.get_one::<String>(id)
        .with_context(|| format!("Missing --{}", id))
}
