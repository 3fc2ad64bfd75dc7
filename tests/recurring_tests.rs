// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use financer::models::EntryType;
use financer::store::{KeyValueStore, MemoryStore, RECURRING_KEY};
use financer::utils::FixedClock;
use financer::{Book, LedgerError};
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn setup() -> Book<MemoryStore> {
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    Book::open_with_clock(MemoryStore::new(), Box::new(FixedClock::new(1_000, today))).unwrap()
}

#[test]
fn day_must_be_between_1_and_28() {
    let mut book = setup();
    for bad in [0u8, 29, 31] {
        assert!(matches!(
            book.create_recurring("Rent", d("700"), EntryType::Expense, bad),
            Err(LedgerError::Validation(_))
        ));
    }
    let first = book
        .create_recurring("Rent", d("700"), EntryType::Expense, 1)
        .unwrap();
    let last = book
        .create_recurring("Salary", d("2500"), EntryType::Income, 28)
        .unwrap();
    assert_eq!(first.day, 1);
    assert_eq!(last.day, 28);
    assert_eq!(book.recurring().len(), 2);
}

#[test]
fn amount_and_description_are_required() {
    let mut book = setup();
    assert!(matches!(
        book.create_recurring("Gym", d("0"), EntryType::Expense, 5),
        Err(LedgerError::Validation(_))
    ));
    assert!(matches!(
        book.create_recurring("", d("30"), EntryType::Expense, 5),
        Err(LedgerError::Validation(_))
    ));
    assert!(book.recurring().is_empty());
}

#[test]
fn entries_are_inert() {
    let mut book = setup();
    let entry = book
        .create_recurring("Gym", d("30"), EntryType::Expense, 5)
        .unwrap();
    assert_eq!(entry.last_applied, None);
    // defining a recurring entry books nothing
    assert!(book.transactions().is_empty());

    let raw = book.store().get(RECURRING_KEY).unwrap().unwrap();
    assert!(raw.contains("\"lastApplied\":null"));
    assert!(raw.contains("\"type\":\"expense\""));
}

#[test]
fn delete_by_position() {
    let mut book = setup();
    book.create_recurring("Gym", d("30"), EntryType::Expense, 5)
        .unwrap();
    assert_eq!(book.delete_recurring(0).unwrap().description, "Gym");
    assert!(matches!(book.delete_recurring(0), Err(LedgerError::NotFound(_))));
}
