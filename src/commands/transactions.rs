// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{LedgerError, Result};
use crate::models::{EntryType, Transaction};
use crate::utils::{Stamper, require_date, require_positive, require_text};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Fields a caller supplies when recording or editing a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub description: String,
    pub amount: Decimal,
    pub kind: EntryType,
    pub date: Option<NaiveDate>,
}

impl TransactionInput {
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        kind: EntryType,
        date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
            date: Some(date),
        }
    }

    fn validate(&self) -> Result<(String, NaiveDate)> {
        let description = require_text(&self.description, "Description")?;
        require_positive(self.amount, "Amount")?;
        let date = require_date(self.date, "Date")?;
        Ok((description, date))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub series: Vec<BalancePoint>,
}

/// The transaction log, newest insertion first.
///
/// Positional arguments (`edit`, `delete`, `get`) always index this
/// insertion order, never the date-sorted view returned by
/// [`TransactionLedger::by_date_desc`]. Use [`TransactionLedger::position_of`]
/// to translate a displayed row's id into an insertion index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionLedger {
    entries: Vec<Transaction>,
}

impl TransactionLedger {
    pub fn from_entries(entries: Vec<Transaction>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.entries.get(index)
    }

    pub fn position_of(&self, id: i64) -> Option<usize> {
        self.entries.iter().position(|t| t.id == id)
    }

    pub fn record(&mut self, stamper: &mut Stamper, input: TransactionInput) -> Result<Transaction> {
        let (description, date) = input.validate()?;
        let txn = Transaction {
            id: stamper.next_id(),
            description,
            amount: input.amount,
            kind: input.kind,
            date,
            is_sale: false,
            quantity: None,
        };
        info!(id = txn.id, kind = %txn.kind, amount = %txn.amount, "recorded transaction");
        self.entries.insert(0, txn.clone());
        Ok(txn)
    }

    /// Pushes already-built rows to the front, keeping their relative order.
    pub(crate) fn prepend(&mut self, rows: Vec<Transaction>) {
        self.entries.splice(0..0, rows);
    }

    pub fn edit(&mut self, index: usize, input: TransactionInput) -> Result<Transaction> {
        let (description, date) = input.validate()?;
        let txn = self
            .entries
            .get_mut(index)
            .ok_or_else(|| missing_index(index))?;
        txn.description = description;
        txn.amount = input.amount;
        txn.kind = input.kind;
        txn.date = date;
        info!(id = txn.id, index, "edited transaction");
        Ok(txn.clone())
    }

    pub fn edit_by_id(&mut self, id: i64, input: TransactionInput) -> Result<Transaction> {
        let index = self.position_of(id).ok_or_else(|| missing_id(id))?;
        self.edit(index, input)
    }

    pub fn delete(&mut self, index: usize) -> Result<Transaction> {
        if index >= self.entries.len() {
            return Err(missing_index(index));
        }
        let removed = self.entries.remove(index);
        info!(id = removed.id, index, "deleted transaction");
        Ok(removed)
    }

    pub fn delete_by_id(&mut self, id: i64) -> Result<Transaction> {
        let index = self.position_of(id).ok_or_else(|| missing_id(id))?;
        self.delete(index)
    }

    pub fn total(&self, kind: EntryType) -> Decimal {
        self.entries
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    }

    pub fn summarize(&self) -> Summary {
        let total_income = self.total(EntryType::Income);
        let total_expense = self.total(EntryType::Expense);

        // BTreeMap keys iterate ascending; NaiveDate order matches ISO string order
        let mut buckets: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for t in &self.entries {
            *buckets.entry(t.date).or_insert(Decimal::ZERO) += t.signed_amount();
        }

        let mut running = Decimal::ZERO;
        let series = buckets
            .into_iter()
            .map(|(date, delta)| {
                running += delta;
                BalancePoint {
                    date,
                    balance: running,
                }
            })
            .collect();

        debug!(count = self.entries.len(), "summarized ledger");
        Summary {
            total_income,
            total_expense,
            balance: total_income - total_expense,
            series,
        }
    }

    /// Date-descending view; ties keep insertion order.
    pub fn by_date_desc(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    pub fn list_recent(&self, n: usize) -> Vec<&Transaction> {
        let mut sorted = self.by_date_desc();
        sorted.truncate(n);
        sorted
    }
}

fn missing_index(index: usize) -> LedgerError {
    LedgerError::not_found(format!("No transaction at position {}", index))
}

fn missing_id(id: i64) -> LedgerError {
    LedgerError::not_found(format!("No transaction with id {}", id))
}
