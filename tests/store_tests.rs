// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneydash::db;
use moneydash::models::{NewTransaction, TxKind};
use moneydash::store::{
    BlobStore, CategoryStore, HttpBlobStore, SqliteStore, StoreError, TransactionStore,
};
use rusqlite::Connection;
use rust_decimal_macros::dec;

fn setup() -> Connection {
    db::open_in_memory().unwrap()
}

fn new_tx(owner: &str, kind: TxKind, date: &str) -> NewTransaction {
    NewTransaction {
        owner: owner.into(),
        kind,
        amount: dec!(12.34),
        description: "Corner shop".into(),
        category: "Alimentação".into(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        receipt: None,
    }
}

#[test]
fn fetch_is_scoped_and_newest_first() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    store.insert(&new_tx("ana", TxKind::Expense, "2025-01-02")).unwrap();
    store.insert(&new_tx("ana", TxKind::Income, "2025-03-01")).unwrap();
    store.insert(&new_tx("bob", TxKind::Income, "2025-04-01")).unwrap();
    let same_day = store.insert(&new_tx("ana", TxKind::Expense, "2025-03-01")).unwrap();

    let rows = TransactionStore::fetch(&store, "ana").unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].id, same_day.id);
    assert_eq!(rows[1].kind, TxKind::Income);
    assert_eq!(rows[2].date.to_string(), "2025-01-02");
    assert!(rows.iter().all(|t| t.owner == "ana"));
    assert_eq!(rows[0].amount, dec!(12.34));

    assert!(TransactionStore::fetch(&store, "nobody").unwrap().is_empty());
}

#[test]
fn corrupt_rows_fail_fast() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(owner,kind,amount,description,category,date) VALUES ('ana','expense','lots','x','y','2025-01-01')",
        [],
    )
    .unwrap();
    let store = SqliteStore::new(&conn);
    match TransactionStore::fetch(&store, "ana") {
        Err(StoreError::Corrupt(msg)) => assert!(msg.contains("invalid amount 'lots'")),
        other => panic!("expected corrupt error, got {:?}", other),
    }

    conn.execute("DELETE FROM transactions", []).unwrap();
    conn.execute(
        "INSERT INTO transactions(owner,kind,amount,description,category,date) VALUES ('ana','expense','1','x','y','01/02/2025')",
        [],
    )
    .unwrap();
    assert!(matches!(TransactionStore::fetch(&store, "ana"), Err(StoreError::Corrupt(_))));
}

#[test]
fn categories_are_per_owner_and_kind() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    store.add("ana", TxKind::Expense, "🐶 Pets").unwrap();
    store.add("ana", TxKind::Income, "💼 Freelance").unwrap();
    store.add("bob", TxKind::Expense, "🎮 Lazer").unwrap();

    let cats = CategoryStore::fetch(&store, "ana", TxKind::Expense).unwrap();
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0].name, "🐶 Pets");

    assert!(store.add("ana", TxKind::Expense, "🐶 Pets").is_err());
    assert!(store.remove("ana", TxKind::Expense, "🐶 Pets").unwrap());
    assert!(!store.remove("ana", TxKind::Expense, "🐶 Pets").unwrap());
    assert!(CategoryStore::fetch(&store, "ana", TxKind::Expense)
        .unwrap()
        .is_empty());
}

#[test]
fn receipts_round_trip_through_reference() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let reference = store.upload(&[0xFF, 0xD8, 0xFF], "image/jpeg").unwrap();
    assert!(reference.starts_with("receipt://"));

    let receipt = store.load_receipt(&reference).unwrap().unwrap();
    assert_eq!(receipt.bytes, vec![0xFF, 0xD8, 0xFF]);
    assert_eq!(receipt.content_type, "image/jpeg");

    assert!(store.load_receipt("receipt://999").unwrap().is_none());
    assert!(store.load_receipt("https://example.com/x.png").unwrap().is_none());
}

#[test]
fn http_blob_store_urls() {
    let store = HttpBlobStore::new("https://project.example.co/", "/receipts/", None).unwrap();
    let object = HttpBlobStore::object_name("image/png");
    assert!(object.starts_with("receipts/"));
    assert!(object.ends_with(".png"));
    assert_ne!(object, HttpBlobStore::object_name("image/png"));
    assert_eq!(
        store.upload_url("receipts/a.png"),
        "https://project.example.co/storage/v1/object/receipts/receipts/a.png"
    );
    assert_eq!(
        store.public_url("receipts/a.png"),
        "https://project.example.co/storage/v1/object/public/receipts/receipts/a.png"
    );
}

#[test]
fn oversized_stored_amount_is_corrupt() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(owner,kind,amount,description,category,date) VALUES ('ana','expense','1000000000000000','x','y','2025-01-01')",
        [],
    )
    .unwrap();
    let store = SqliteStore::new(&conn);
    match TransactionStore::fetch(&store, "ana") {
        Err(StoreError::Corrupt(msg)) => assert!(msg.contains("1000000000000000")),
        other => panic!("expected corrupt row, got {:?}", other.map(|v| v.len())),
    }
}
