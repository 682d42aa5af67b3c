// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneydash::commands::categories::{categories_or_defaults, DEFAULT_EXPENSE_CATEGORIES};
use moneydash::commands::entries::{query_rows, submit_local};
use moneydash::commands::expenses::submit_expense;
use moneydash::commands::incomes::submit_income;
use moneydash::models::{Category, Receipt, TxKind};
use moneydash::store::{BlobStore, CategoryStore, SqliteStore, StoreError, TransactionStore};
use moneydash::validation::{EntryForm, ValidationError};
use moneydash::{cli, commands, config::Settings, db};
use rust_decimal_macros::dec;
use std::cell::Cell;

struct DownBlobStore {
    calls: Cell<usize>,
}

impl BlobStore for DownBlobStore {
    fn upload(&self, _bytes: &[u8], _content_type: &str) -> Result<String, StoreError> {
        self.calls.set(self.calls.get() + 1);
        Err(StoreError::Remote {
            status: 503,
            body: "unavailable".into(),
        })
    }
}

struct DownCategoryStore;

impl CategoryStore for DownCategoryStore {
    fn fetch(&self, _owner: &str, _kind: TxKind) -> Result<Vec<Category>, StoreError> {
        Err(StoreError::Remote {
            status: 401,
            body: "unauthorized".into(),
        })
    }

    fn add(&self, _owner: &str, _kind: TxKind, _name: &str) -> Result<Category, StoreError> {
        unreachable!()
    }

    fn remove(&self, _owner: &str, _kind: TxKind, _name: &str) -> Result<bool, StoreError> {
        unreachable!()
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 10).unwrap()
}

fn expense_form(receipt: Option<Receipt>) -> EntryForm {
    EntryForm {
        amount: "45,90".into(),
        description: "Pharmacy".into(),
        category: "🏥 Saúde".into(),
        date: None,
        receipt,
    }
}

fn png() -> Receipt {
    Receipt {
        bytes: vec![0x89, b'P', b'N', b'G'],
        content_type: "image/png".into(),
    }
}

#[test]
fn expense_with_receipt_stores_reference() {
    let conn = db::open_in_memory().unwrap();
    let store = SqliteStore::new(&conn);
    let tx = submit_expense(&store, &store, "ana", &expense_form(Some(png())), today()).unwrap();

    assert_eq!(tx.amount, dec!(45.90));
    assert_eq!(tx.category, "Saúde");
    assert_eq!(tx.date, today());
    let reference = tx.receipt.clone().unwrap();
    assert_eq!(store.load_receipt(&reference).unwrap().unwrap(), png());

    let stored = TransactionStore::fetch(&store, "ana").unwrap();
    assert_eq!(stored, vec![tx]);
}

#[test]
fn failed_upload_records_nothing() {
    let conn = db::open_in_memory().unwrap();
    let store = SqliteStore::new(&conn);
    let blobs = DownBlobStore { calls: Cell::new(0) };
    let err = submit_expense(&store, &blobs, "ana", &expense_form(Some(png())), today()).unwrap_err();
    assert!(err.to_string().contains("upload the receipt"));
    assert_eq!(blobs.calls.get(), 1);
    assert!(TransactionStore::fetch(&store, "ana").unwrap().is_empty());
}

#[test]
fn invalid_form_touches_no_store() {
    let conn = db::open_in_memory().unwrap();
    let store = SqliteStore::new(&conn);
    let blobs = DownBlobStore { calls: Cell::new(0) };
    let mut form = expense_form(Some(png()));
    form.amount = "0".into();
    let err = submit_expense(&store, &blobs, "ana", &form, today()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::InvalidAmount("0".into()))
    );
    assert_eq!(blobs.calls.get(), 0);
    assert!(TransactionStore::fetch(&store, "ana").unwrap().is_empty());
}

#[test]
fn income_is_recorded_without_receipt() {
    let conn = db::open_in_memory().unwrap();
    let store = SqliteStore::new(&conn);
    let form = EntryForm {
        amount: "5000".into(),
        description: "August".into(),
        category: "💰 Salário".into(),
        date: NaiveDate::from_ymd_opt(2025, 8, 5),
        receipt: None,
    };
    let tx = submit_income(&store, &store, "ana", &form, today()).unwrap();
    assert_eq!(tx.kind, TxKind::Income);
    assert_eq!(tx.category, "Salário");
    assert!(tx.receipt.is_none());

    let with_receipt = EntryForm {
        receipt: Some(png()),
        ..form
    };
    let err = submit_income(&store, &store, "ana", &with_receipt, today()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ValidationError>(),
        Some(&ValidationError::ReceiptOnIncome)
    );
}

#[test]
fn categories_fall_back_to_defaults() {
    let conn = db::open_in_memory().unwrap();
    let store = SqliteStore::new(&conn);

    let cats = categories_or_defaults(&store, "ana", TxKind::Expense);
    let names: Vec<&str> = cats.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, DEFAULT_EXPENSE_CATEGORIES);
    assert_eq!(cats[0].id, cats[0].name);

    let cats = categories_or_defaults(&DownCategoryStore, "ana", TxKind::Income);
    assert_eq!(cats.len(), 8);
    assert_eq!(cats[0].name, "💰 Salário");

    store.add("ana", TxKind::Expense, "🐶 Pets").unwrap();
    let cats = categories_or_defaults(&store, "ana", TxKind::Expense);
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0].name, "🐶 Pets");
}

#[test]
fn list_filters_kind_and_respects_limit() {
    let conn = db::open_in_memory().unwrap();
    let store = SqliteStore::new(&conn);
    for day in 1..=3 {
        let form = EntryForm {
            date: NaiveDate::from_ymd_opt(2025, 8, day),
            ..expense_form(None)
        };
        submit_expense(&store, &store, "ana", &form, today()).unwrap();
    }
    let income = EntryForm {
        amount: "10".into(),
        description: "refund".into(),
        category: "🔄 Reembolso".into(),
        date: NaiveDate::from_ymd_opt(2025, 8, 9),
        receipt: None,
    };
    submit_income(&store, &store, "ana", &income, today()).unwrap();

    let matches = cli::build_cli().get_matches_from(["moneydash", "expense", "list", "--limit", "2"]);
    let Some(("expense", exp_m)) = matches.subcommand() else {
        panic!("no expense subcommand");
    };
    let Some(("list", list_m)) = exp_m.subcommand() else {
        panic!("no list subcommand");
    };
    let limit = list_m.get_one::<usize>("limit").copied();
    let rows = query_rows(&store, "ana", TxKind::Expense, limit).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-08-03");
    assert_eq!(rows[0].amount, "45.90");

    let settings = Settings {
        owner: "ana".into(),
        ..Settings::default()
    };
    commands::expenses::handle(&conn, &settings, exp_m).unwrap();
}

#[test]
fn add_via_cli_uses_owner_from_settings() {
    let conn = db::open_in_memory().unwrap();
    let settings = Settings {
        owner: "bob".into(),
        ..Settings::default()
    };
    let matches = cli::build_cli().get_matches_from([
        "moneydash",
        "income",
        "add",
        "--amount",
        "150",
        "--description",
        "Logo job",
        "--source",
        "💼 Freelance",
        "--date",
        "2025-07-01",
    ]);
    let Some(("income", inc_m)) = matches.subcommand() else {
        panic!("no income subcommand");
    };
    commands::incomes::handle(&conn, &settings, inc_m).unwrap();

    let store = SqliteStore::new(&conn);
    let rows = TransactionStore::fetch(&store, "bob").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Freelance");
    assert_eq!(rows[0].amount, dec!(150));
}

#[test]
fn failed_insert_leaves_no_orphan_receipt() {
    let conn = db::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER block_tx BEFORE INSERT ON transactions
         BEGIN SELECT RAISE(ABORT, 'blocked'); END;",
    )
    .unwrap();

    let err = submit_local(&conn, "ana", TxKind::Expense, &expense_form(Some(png())), today())
        .unwrap_err();
    assert!(err.to_string().contains("Could not record the expense"));
    let receipts: i64 = conn
        .query_row("SELECT COUNT(*) FROM receipts", [], |r| r.get(0))
        .unwrap();
    assert_eq!(receipts, 0);

    conn.execute_batch("DROP TRIGGER block_tx;").unwrap();
    let tx = submit_local(&conn, "ana", TxKind::Expense, &expense_form(Some(png())), today())
        .unwrap();
    let store = SqliteStore::new(&conn);
    assert_eq!(
        store.load_receipt(tx.receipt.as_deref().unwrap()).unwrap(),
        Some(png())
    );
}

#[test]
fn entry_groups_require_a_subcommand() {
    for group in ["expense", "income", "category", "export", "config"] {
        let err = cli::build_cli()
            .try_get_matches_from(["moneydash", group])
            .unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand,
            "{group}"
        );
    }
    assert!(cli::build_cli()
        .try_get_matches_from(["moneydash", "expense", "bogus"])
        .is_err());
}
