// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{BlobStore, CategoryStore, StoreError, TransactionStore};
use crate::models::{Category, NewTransaction, Receipt, Transaction, TxKind};
use crate::validation::MAX_AMOUNT;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use tracing::{debug, info};

pub const RECEIPT_SCHEME: &str = "receipt://";

/// Transactions, categories and receipts kept in the local SQLite database.
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Resolves a `receipt://<id>` reference produced by [`BlobStore::upload`].
    pub fn load_receipt(&self, reference: &str) -> Result<Option<Receipt>, StoreError> {
        let Some(id) = reference
            .strip_prefix(RECEIPT_SCHEME)
            .and_then(|s| s.parse::<i64>().ok())
        else {
            return Ok(None);
        };
        let row = self
            .conn
            .query_row(
                "SELECT content_type, bytes FROM receipts WHERE id=?1",
                params![id],
                |r| {
                    Ok(Receipt {
                        content_type: r.get(0)?,
                        bytes: r.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }
}

struct RawTransaction {
    id: i64,
    kind: String,
    amount: String,
    description: String,
    category: String,
    date: String,
    receipt: Option<String>,
}

impl RawTransaction {
    fn decode(self, owner: &str) -> Result<Transaction, StoreError> {
        let kind = self
            .kind
            .parse::<TxKind>()
            .map_err(|e| StoreError::Corrupt(format!("transaction {}: {}", self.id, e)))?;
        let amount = self
            .amount
            .parse::<Decimal>()
            .ok()
            .filter(|a| *a >= Decimal::ZERO && *a < MAX_AMOUNT)
            .ok_or_else(|| {
                StoreError::Corrupt(format!(
                    "transaction {}: invalid amount '{}'",
                    self.id, self.amount
                ))
            })?;
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            StoreError::Corrupt(format!(
                "transaction {}: invalid date '{}'",
                self.id, self.date
            ))
        })?;
        Ok(Transaction {
            id: self.id,
            owner: owner.to_string(),
            kind,
            amount,
            description: self.description,
            category: self.category,
            date,
            receipt: self.receipt,
        })
    }
}

impl TransactionStore for SqliteStore<'_> {
    fn fetch(&self, owner: &str) -> Result<Vec<Transaction>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, kind, amount, description, category, date, receipt
             FROM transactions
             WHERE owner=?1
             ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![owner], |r| {
            Ok(RawTransaction {
                id: r.get(0)?,
                kind: r.get(1)?,
                amount: r.get(2)?,
                description: r.get(3)?,
                category: r.get(4)?,
                date: r.get(5)?,
                receipt: r.get(6)?,
            })
        })?;

        let mut data = Vec::new();
        for row in rows {
            data.push(row?.decode(owner)?);
        }
        debug!(owner, count = data.len(), "fetched transactions");
        Ok(data)
    }

    fn insert(&self, tx: &NewTransaction) -> Result<Transaction, StoreError> {
        self.conn.execute(
            "INSERT INTO transactions(owner, kind, amount, description, category, date, receipt)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                tx.owner,
                tx.kind.as_str(),
                tx.amount.to_string(),
                tx.description,
                tx.category,
                tx.date.format("%Y-%m-%d").to_string(),
                tx.receipt
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, owner = %tx.owner, kind = %tx.kind, amount = %tx.amount, "recorded transaction");
        Ok(tx.clone().into_transaction(id))
    }
}

impl CategoryStore for SqliteStore<'_> {
    fn fetch(&self, owner: &str, kind: TxKind) -> Result<Vec<Category>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories WHERE owner=?1 AND kind=?2 ORDER BY id")?;
        let rows = stmt.query_map(params![owner, kind.as_str()], |r| {
            Ok(Category {
                id: r.get::<_, i64>(0)?.to_string(),
                name: r.get(1)?,
            })
        })?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }

    fn add(&self, owner: &str, kind: TxKind, name: &str) -> Result<Category, StoreError> {
        self.conn.execute(
            "INSERT INTO categories(owner, kind, name) VALUES (?1, ?2, ?3)",
            params![owner, kind.as_str(), name],
        )?;
        Ok(Category {
            id: self.conn.last_insert_rowid().to_string(),
            name: name.to_string(),
        })
    }

    fn remove(&self, owner: &str, kind: TxKind, name: &str) -> Result<bool, StoreError> {
        let n = self.conn.execute(
            "DELETE FROM categories WHERE owner=?1 AND kind=?2 AND name=?3",
            params![owner, kind.as_str(), name],
        )?;
        Ok(n > 0)
    }
}

impl BlobStore for SqliteStore<'_> {
    fn upload(&self, bytes: &[u8], content_type: &str) -> Result<String, StoreError> {
        self.conn.execute(
            "INSERT INTO receipts(content_type, bytes) VALUES (?1, ?2)",
            params![content_type, bytes],
        )?;
        let reference = format!("{}{}", RECEIPT_SCHEME, self.conn.last_insert_rowid());
        info!(%reference, size = bytes.len(), "stored receipt");
        Ok(reference)
    }
}
