// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Shared plumbing for the expense and income entry commands.

use crate::config::Settings;
use crate::models::{Receipt, Transaction, TxKind};
use crate::store::{BlobStore, HttpBlobStore, SqliteStore, TransactionStore};
use crate::utils::{content_type_for, fmt_money, maybe_print_json, parse_date, pretty_table};
use crate::validation::{validate_form, EntryForm};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

/// Validates the form, uploads its receipt if any, then records the entry.
///
/// Nothing is written when validation fails, and the transaction is not
/// inserted when the receipt upload fails.
pub fn submit<T, B>(
    txs: &T,
    blobs: &B,
    owner: &str,
    kind: TxKind,
    form: &EntryForm,
    today: NaiveDate,
) -> Result<Transaction>
where
    T: TransactionStore + ?Sized,
    B: BlobStore + ?Sized,
{
    let mut record = validate_form(owner, kind, form, today)?;
    if let Some(receipt) = &form.receipt {
        let reference = blobs
            .upload(&receipt.bytes, &receipt.content_type)
            .context("Could not upload the receipt")?;
        record.receipt = Some(reference);
    }
    let stored = txs
        .insert(&record)
        .with_context(|| format!("Could not record the {}", kind))?;
    Ok(stored)
}

pub fn read_receipt(path: &Path) -> Result<Receipt> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Could not read receipt {}", path.display()))?;
    Ok(Receipt {
        bytes,
        content_type: content_type_for(path).to_string(),
    })
}

pub fn form_from_matches(sub: &clap::ArgMatches, category_flag: &str) -> Result<EntryForm> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => Some(parse_date(d)?),
        None => None,
    };
    let receipt = match sub.try_get_one::<String>("receipt").ok().flatten() {
        Some(p) => Some(read_receipt(Path::new(p))?),
        None => None,
    };
    Ok(EntryForm {
        amount: sub.get_one::<String>("amount").cloned().unwrap_or_default(),
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or_default(),
        category: sub
            .get_one::<String>(category_flag)
            .cloned()
            .unwrap_or_default(),
        date,
        receipt,
    })
}

/// Submits against the local database only. The receipt row and the
/// transaction row are written in one SQLite transaction.
pub fn submit_local(
    conn: &Connection,
    owner: &str,
    kind: TxKind,
    form: &EntryForm,
    today: NaiveDate,
) -> Result<Transaction> {
    let tx = conn.unchecked_transaction()?;
    let store = SqliteStore::new(&tx);
    let stored = submit(&store, &store, owner, kind, form, today)?;
    tx.commit()?;
    Ok(stored)
}

/// Picks the configured blob store: remote when `blob_url` is set, local otherwise.
pub fn add(
    conn: &Connection,
    settings: &Settings,
    kind: TxKind,
    category_flag: &str,
    sub: &clap::ArgMatches,
) -> Result<Transaction> {
    let form = form_from_matches(sub, category_flag)?;
    let today = chrono::Local::now().date_naive();
    let stored = match &settings.blob {
        Some(b) => {
            let store = SqliteStore::new(conn);
            let remote = HttpBlobStore::new(&b.url, &b.bucket, b.token.clone())?;
            submit(&store, &remote, &settings.owner, kind, &form, today)?
        }
        None => submit_local(conn, &settings.owner, kind, &form, today)?,
    };
    println!(
        "Recorded {} {} on {} ({})",
        stored.kind,
        fmt_money(&stored.amount),
        stored.date,
        stored.category
    );
    Ok(stored)
}

#[derive(Serialize)]
pub struct EntryRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub receipt: String,
}

pub fn query_rows<T: TransactionStore + ?Sized>(
    store: &T,
    owner: &str,
    kind: TxKind,
    limit: Option<usize>,
) -> Result<Vec<EntryRow>> {
    let data = store
        .fetch(owner)
        .with_context(|| format!("Could not load transactions for '{}'", owner))?;
    Ok(data
        .into_iter()
        .filter(|t| t.kind == kind)
        .take(limit.unwrap_or(usize::MAX))
        .map(|t| EntryRow {
            id: t.id,
            date: t.date.to_string(),
            description: t.description,
            category: t.category,
            amount: fmt_money(&t.amount),
            receipt: t.receipt.unwrap_or_default(),
        })
        .collect())
}

pub fn list(
    conn: &Connection,
    settings: &Settings,
    kind: TxKind,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let store = SqliteStore::new(conn);
    let data = query_rows(
        &store,
        &settings.owner,
        kind,
        sub.get_one::<usize>("limit").copied(),
    )?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.receipt.clone(),
                ]
            })
            .collect();
        let cat_header = match kind {
            TxKind::Expense => "Category",
            TxKind::Income => "Source",
        };
        println!(
            "{}",
            pretty_table(&["Date", "Description", cat_header, "Amount", "Receipt"], rows)
        );
    }
    Ok(())
}
