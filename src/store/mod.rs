// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence seams. Every query is scoped by an explicit owner.

pub mod http;
pub mod sqlite;

pub use http::HttpBlobStore;
pub use sqlite::SqliteStore;

use crate::models::{Category, NewTransaction, Transaction, TxKind};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote store responded {status}: {body}")]
    Remote { status: u16, body: String },

    /// A stored row could not be decoded into a well-formed record.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait TransactionStore {
    /// All transactions of `owner`, newest date first.
    fn fetch(&self, owner: &str) -> Result<Vec<Transaction>, StoreError>;

    fn insert(&self, tx: &NewTransaction) -> Result<Transaction, StoreError>;
}

pub trait CategoryStore {
    /// An empty list means the owner has not defined any categories of this kind.
    fn fetch(&self, owner: &str, kind: TxKind) -> Result<Vec<Category>, StoreError>;

    fn add(&self, owner: &str, kind: TxKind, name: &str) -> Result<Category, StoreError>;

    /// Returns whether a category was removed.
    fn remove(&self, owner: &str, kind: TxKind, name: &str) -> Result<bool, StoreError>;
}

pub trait BlobStore {
    /// Stores `bytes` and returns a reference that resolves to them.
    fn upload(&self, bytes: &[u8], content_type: &str) -> Result<String, StoreError>;
}
