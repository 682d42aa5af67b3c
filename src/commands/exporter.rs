// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::store::{SqliteStore, TransactionStore};
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let store = SqliteStore::new(conn);
            export_transactions(&store, &settings.owner, sub)
        }
        _ => Ok(()),
    }
}

pub fn export_transactions<S: TransactionStore + ?Sized>(
    store: &S,
    owner: &str,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = sub
        .get_one::<String>("out")
        .ok_or_else(|| anyhow!("--out is required"))?;
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }

    let mut rows = store
        .fetch(owner)
        .with_context(|| format!("Could not load transactions for '{}'", owner))?;
    rows.reverse(); // oldest first

    if fmt == "csv" {
        let mut wtr =
            csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
        wtr.write_record(["date", "kind", "amount", "description", "category", "receipt"])?;
        for t in &rows {
            wtr.write_record([
                t.date.to_string(),
                t.kind.to_string(),
                t.amount.to_string(),
                t.description.clone(),
                t.category.clone(),
                t.receipt.clone().unwrap_or_default(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<_> = rows
            .iter()
            .map(|t| {
                json!({
                    "date": t.date.to_string(), "kind": t.kind, "amount": t.amount.to_string(),
                    "description": t.description, "category": t.category, "receipt": t.receipt
                })
            })
            .collect();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)
            .with_context(|| format!("Write {}", out))?;
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
