// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{get_setting, set_setting, KEYS};
use crate::utils::pretty_table;
use anyhow::{anyhow, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let mut data = Vec::new();
            for key in KEYS {
                let value = get_setting(conn, key)?.unwrap_or_else(|| "(default)".into());
                data.push(vec![key.to_string(), value]);
            }
            println!("{}", pretty_table(&["Key", "Value"], data));
        }
        Some(("set", sub)) => {
            let key = sub
                .get_one::<String>("key")
                .ok_or_else(|| anyhow!("key is required"))?;
            let value = sub
                .get_one::<String>("value")
                .ok_or_else(|| anyhow!("value is required"))?;
            set_setting(conn, key, value)?;
            println!("Set {} = {}", key, value.trim());
        }
        _ => {}
    }
    Ok(())
}
