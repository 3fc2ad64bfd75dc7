// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use financer::commands::goals::GoalInput;
use financer::db::SqliteStore;
use financer::models::EntryType;
use financer::store::{
    ALL_KEYS, CURRENCY_KEY, GOALS_KEY, INVENTORY_KEY, KeyValueStore, MemoryStore, NOTES_KEY,
    RECURRING_KEY, THEME_KEY, TRANSACTIONS_KEY,
};
use financer::utils::FixedClock;
use financer::{Book, LedgerError};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn d(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn clock() -> Box<FixedClock> {
    Box::new(FixedClock::new(1_700_000_000_000, today()))
}

fn populate<S: KeyValueStore>(book: &mut Book<S>) {
    book.record_transaction("Salary", d("1500"), EntryType::Income, Some(today()))
        .unwrap();
    let item = book.upsert_item("Widget", 10, d("5.00")).unwrap();
    book.sell(item.id, 3, d("2.00")).unwrap();
    book.create_goal(GoalInput::new("Trip", d("500"), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()))
        .unwrap();
    book.contribute(0, d("50")).unwrap();
    book.create_recurring("Rent", d("700"), EntryType::Expense, 1)
        .unwrap();
    book.set_currency("gbp").unwrap();
    book.set_notes("restock mugs on friday").unwrap();
}

#[test]
fn memory_store_round_trip_preserves_order_and_fields() {
    let mut book = Book::open_with_clock(MemoryStore::new(), clock()).unwrap();
    populate(&mut book);

    let transactions = book.transactions().clone();
    let inventory = book.inventory().clone();
    let goals = book.goals().clone();
    let recurring = book.recurring().clone();
    let settings = book.settings().clone();

    let reopened = Book::open_with_clock(book.into_store(), clock()).unwrap();
    assert_eq!(reopened.transactions(), &transactions);
    assert_eq!(reopened.inventory(), &inventory);
    assert_eq!(reopened.goals(), &goals);
    assert_eq!(reopened.recurring(), &recurring);
    assert_eq!(reopened.settings(), &settings);
    assert_eq!(reopened.currency(), "GBP");
    assert_eq!(reopened.sales_log()[0].quantity, Some(3));
}

#[test]
fn sqlite_store_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("financer.sqlite");

    let (transactions, inventory) = {
        let store = SqliteStore::open(&path).unwrap();
        let mut book = Book::open_with_clock(store, clock()).unwrap();
        populate(&mut book);
        (book.transactions().clone(), book.inventory().clone())
    };

    let store = SqliteStore::open(&path).unwrap();
    let reopened = Book::open_with_clock(store, clock()).unwrap();
    assert_eq!(reopened.transactions(), &transactions);
    assert_eq!(reopened.inventory(), &inventory);
    assert_eq!(reopened.notes(), "restock mugs on friday");
    assert_eq!(reopened.summary().balance, d("1459.00"));
}

#[test]
fn every_mutation_rewrites_the_collections() {
    let mut book = Book::open_with_clock(MemoryStore::new(), clock()).unwrap();
    assert!(book.store().is_empty());

    book.record_transaction("Coffee", d("3.50"), EntryType::Expense, Some(today()))
        .unwrap();
    for key in [TRANSACTIONS_KEY, INVENTORY_KEY, GOALS_KEY, RECURRING_KEY, CURRENCY_KEY] {
        assert!(book.store().get(key).unwrap().is_some(), "missing {}", key);
    }
    assert_eq!(book.store().get(INVENTORY_KEY).unwrap().unwrap(), "[]");
    assert_eq!(book.store().get(CURRENCY_KEY).unwrap().unwrap(), "USD");

    let raw = book.store().get(TRANSACTIONS_KEY).unwrap().unwrap();
    assert!(raw.contains("\"type\":\"expense\""));
    assert!(raw.contains("\"date\":\"2025-06-15\""));
    assert!(!raw.contains("isSale"));
}

#[test]
fn sale_rows_are_tagged_in_the_blob() {
    let mut book = Book::open_with_clock(MemoryStore::new(), clock()).unwrap();
    let item = book.upsert_item("Widget", 10, d("5.00")).unwrap();
    book.sell(item.id, 1, d("2.00")).unwrap();

    let raw = book.store().get(TRANSACTIONS_KEY).unwrap().unwrap();
    assert!(raw.contains("\"isSale\":true"));
    assert!(raw.contains("\"quantity\":1"));
    let inv = book.store().get(INVENTORY_KEY).unwrap().unwrap();
    assert!(inv.contains("\"addedDate\":\"2025-06-15\""));
}

#[test]
fn loads_blobs_written_with_numeric_amounts() {
    let mut store = MemoryStore::new();
    store
        .set(
            TRANSACTIONS_KEY,
            r#"[
                {"id":9000000000001,"description":"COGS: Mug (2 units)","amount":6,"type":"expense","date":"2024-01-01","isSale":true},
                {"id":9000000000000,"description":"Sale: Mug (2 units)","amount":16.5,"type":"income","date":"2024-01-01","isSale":true},
                {"id":1700000000000,"description":"Coffee","amount":3.5,"type":"expense","date":"2023-12-31"}
            ]"#,
        )
        .unwrap();
    store
        .set(
            GOALS_KEY,
            r#"[{"id":5,"name":"Bike","target":100,"current":90,"date":"2025-01-01","created":"2024-01-01"}]"#,
        )
        .unwrap();
    store.set(THEME_KEY, "dark").unwrap();

    let mut book = Book::open_with_clock(store, clock()).unwrap();
    assert_eq!(book.transactions().len(), 3);
    assert_eq!(book.transactions().entries()[2].amount, d("3.5"));
    assert!(!book.transactions().entries()[2].is_sale);

    let log = book.sales_log();
    assert_eq!(log[0].quantity, Some(2));
    assert_eq!(log[0].profit, d("10.5"));
    assert_eq!(book.goals().get(0).unwrap().current, d("90"));

    // new ids continue above everything already stored
    let txn = book
        .record_transaction("Tea", d("2"), EntryType::Expense, Some(today()))
        .unwrap();
    assert_eq!(txn.id, 9_000_000_000_002);
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let book = Book::open_with_clock(MemoryStore::new(), clock()).unwrap();
    assert!(book.transactions().is_empty());
    assert!(book.inventory().is_empty());
    assert!(book.goals().is_empty());
    assert!(book.recurring().is_empty());
    assert_eq!(book.currency(), "USD");
    assert_eq!(book.notes(), "");
}

#[test]
fn corrupt_blob_is_reported() {
    let mut store = MemoryStore::new();
    store.set(INVENTORY_KEY, "{not json").unwrap();
    assert!(matches!(
        Book::open_with_clock(store, clock()),
        Err(LedgerError::Serialization(_))
    ));
}

#[test]
fn reset_clears_store_and_memory() {
    let mut book = Book::open_with_clock(MemoryStore::new(), clock()).unwrap();
    populate(&mut book);
    book.reset().unwrap();

    for key in ALL_KEYS {
        assert!(book.store().get(key).unwrap().is_none(), "{} survived", key);
    }
    assert!(book.transactions().is_empty());
    assert!(book.inventory().is_empty());
    assert_eq!(book.currency(), "USD");
    assert_eq!(book.store().get(NOTES_KEY).unwrap(), None);
}

#[test]
fn sqlite_reset_empties_table() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut book = Book::open_with_clock(store, clock()).unwrap();
    populate(&mut book);
    book.reset().unwrap();

    let count: i64 = book
        .store()
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_store", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}
