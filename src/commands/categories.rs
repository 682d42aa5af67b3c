// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::models::{Category, TxKind};
use crate::store::{CategoryStore, SqliteStore};
use crate::utils::{maybe_print_json, pretty_table};
use crate::validation::strip_decoration;
use anyhow::{anyhow, Result};
use rusqlite::Connection;
use tracing::warn;

pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 8] = [
    "🍔 Alimentação",
    "🚗 Transporte",
    "🏠 Moradia",
    "🏥 Saúde",
    "🎓 Educação",
    "🎮 Lazer",
    "🛍️ Compras",
    "📦 Outros",
];

pub const DEFAULT_INCOME_SOURCES: [&str; 8] = [
    "💰 Salário",
    "💼 Freelance",
    "📈 Investimentos",
    "🎁 Presente",
    "🏆 Bônus",
    "🔄 Reembolso",
    "🏢 Aluguel",
    "📊 Dividendos",
];

pub fn default_categories(kind: TxKind) -> Vec<Category> {
    let names: &[&str] = match kind {
        TxKind::Expense => &DEFAULT_EXPENSE_CATEGORIES,
        TxKind::Income => &DEFAULT_INCOME_SOURCES,
    };
    names
        .iter()
        .map(|n| Category {
            id: n.to_string(),
            name: n.to_string(),
        })
        .collect()
}

/// The owner's categories of `kind`, or the default set when there are none
/// or the store cannot be reached.
pub fn categories_or_defaults<S: CategoryStore + ?Sized>(
    store: &S,
    owner: &str,
    kind: TxKind,
) -> Vec<Category> {
    match store.fetch(owner, kind) {
        Ok(cats) if !cats.is_empty() => cats,
        Ok(_) => default_categories(kind),
        Err(e) => {
            warn!(owner, %kind, error = %e, "could not load categories, using defaults");
            default_categories(kind)
        }
    }
}

fn kind_of(sub: &clap::ArgMatches) -> Result<TxKind> {
    let raw = sub
        .get_one::<String>("kind")
        .ok_or_else(|| anyhow!("--kind is required"))?;
    raw.parse::<TxKind>().map_err(|e| anyhow!(e))
}

fn name_of(sub: &clap::ArgMatches) -> Result<String> {
    let name = sub
        .get_one::<String>("name")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    if name.is_empty() {
        return Err(anyhow!("Category name cannot be empty"));
    }
    Ok(name)
}

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let owner = settings.owner.as_str();
    match m.subcommand() {
        Some(("add", sub)) => {
            let kind = kind_of(sub)?;
            let name = name_of(sub)?;
            store.add(owner, kind, &name)?;
            println!("Added {} category '{}'", kind, name);
        }
        Some(("list", sub)) => {
            let kind = kind_of(sub)?;
            let cats = categories_or_defaults(&store, owner, kind);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let data = cats
                    .iter()
                    .map(|c| vec![c.name.clone(), strip_decoration(&c.name)])
                    .collect();
                println!("{}", pretty_table(&["Category", "Stored as"], data));
            }
        }
        Some(("rm", sub)) => {
            let kind = kind_of(sub)?;
            let name = name_of(sub)?;
            if store.remove(owner, kind, &name)? {
                println!("Removed {} category '{}'", kind, name);
            } else {
                return Err(anyhow!("{} category '{}' not found", kind, name));
            }
        }
        _ => {}
    }
    Ok(())
}
