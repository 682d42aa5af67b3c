// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::{summarize, Locale, SeriesOrder};
use crate::config::Settings;
use crate::models::{Dashboard, Transaction};
use crate::store::{SqliteStore, TransactionStore};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;
use rusqlite::Connection;

pub fn load<S: TransactionStore + ?Sized>(
    store: &S,
    owner: &str,
    months: usize,
    order: SeriesOrder,
    locale: Locale,
) -> Result<Dashboard> {
    let transactions = store
        .fetch(owner)
        .with_context(|| format!("Could not load dashboard data for '{}'", owner))?;
    Ok(summarize(&transactions, months, order, locale))
}

pub fn handle(conn: &Connection, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months = sub
        .get_one::<usize>("months")
        .copied()
        .unwrap_or(settings.months);
    if months == 0 {
        return Err(anyhow!("--months must be at least 1"));
    }
    let order = match sub.get_one::<String>("order") {
        Some(o) => o.parse::<SeriesOrder>().map_err(|e| anyhow!(e))?,
        None => settings.series_order,
    };
    let locale = match sub.get_one::<String>("locale") {
        Some(l) => l.parse::<Locale>().map_err(|e| anyhow!(e))?,
        None => settings.locale,
    };

    let store = SqliteStore::new(conn);
    let dash = load(&store, &settings.owner, months, order, locale)?;
    if maybe_print_json(json_flag, jsonl_flag, &dash)? {
        return Ok(());
    }

    let status = if dash.balance >= Decimal::ZERO {
        "positive"
    } else {
        "negative"
    };
    println!("Balance: {} ({})", fmt_money(&dash.balance.abs()), status);

    let rows: Vec<Vec<String>> = dash
        .months
        .iter()
        .map(|b| {
            vec![
                b.label.clone(),
                fmt_money(&b.income),
                fmt_money(&b.expenses),
                fmt_money(&b.net),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Net"], rows)
    );

    let h = &dash.highlights;
    let rows = vec![
        vec!["Largest expense".to_string(), describe(h.largest_expense.as_ref())],
        vec!["Largest income".to_string(), describe(h.largest_income.as_ref())],
        vec![
            "Most used category".to_string(),
            h.most_frequent_category.clone(),
        ],
        vec!["Transactions".to_string(), h.total_count.to_string()],
    ];
    println!("{}", pretty_table(&["Highlight", "Value"], rows));
    Ok(())
}

fn describe(tx: Option<&Transaction>) -> String {
    match tx {
        Some(t) => format!("{} {} ({})", fmt_money(&t.amount), t.description, t.category),
        None => "-".to_string(),
    }
}
