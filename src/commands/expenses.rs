// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::entries;
use crate::config::Settings;
use crate::models::{Transaction, TxKind};
use crate::store::{BlobStore, TransactionStore};
use crate::validation::EntryForm;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            entries::add(conn, settings, TxKind::Expense, "category", sub)?;
        }
        Some(("list", sub)) => entries::list(conn, settings, TxKind::Expense, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn submit_expense<T, B>(
    txs: &T,
    blobs: &B,
    owner: &str,
    form: &EntryForm,
    today: NaiveDate,
) -> Result<Transaction>
where
    T: TransactionStore + ?Sized,
    B: BlobStore + ?Sized,
{
    entries::submit(txs, blobs, owner, TxKind::Expense, form, today)
}
