// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Sales against inventory.
//!
//! A sale deducts stock and writes two ledger rows: the revenue (income)
//! and its cost of goods sold (expense). The pair is linked by convention
//! only: the COGS row's id is the revenue id + 1 and both share a date.
//! [`reconstruct_sales_log`] relies on exactly that convention.

use crate::commands::inventory::InventoryStore;
use crate::commands::transactions::TransactionLedger;
use crate::errors::{LedgerError, Result};
use crate::models::{EntryType, Transaction};
use crate::utils::{Stamper, require_positive};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

pub const SALE_PREFIX: &str = "Sale:";
pub const COGS_PREFIX: &str = "COGS:";

static UNITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+) units\)").expect("units pattern is valid"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleReceipt {
    pub revenue: Transaction,
    pub cogs: Transaction,
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesLogEntry {
    pub revenue_id: i64,
    pub date: NaiveDate,
    pub item_label: String,
    /// `None` when the quantity could not be recovered (shown as `?`).
    pub quantity: Option<u64>,
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub profit: Decimal,
}

/// Sells `quantity` units of an item at its current price.
///
/// All checks run before anything is touched, so a rejected sale leaves
/// both the inventory and the ledger exactly as they were.
pub fn sell(
    inventory: &mut InventoryStore,
    ledger: &mut TransactionLedger,
    stamper: &mut Stamper,
    item_id: i64,
    quantity: u64,
    unit_cost: Decimal,
) -> Result<SaleReceipt> {
    if quantity == 0 {
        return Err(LedgerError::validation("Quantity must be greater than zero"));
    }
    require_positive(unit_cost, "Unit cost")?;

    let item = inventory.find_by_id(item_id).ok_or_else(|| {
        LedgerError::not_found(format!(
            "Selected item {} not found in inventory",
            item_id
        ))
    })?;
    if quantity > item.stock {
        return Err(LedgerError::InsufficientStock {
            item: item.name.clone(),
            available: item.stock,
            requested: quantity,
        });
    }

    let units = Decimal::from(quantity);
    let too_large = || LedgerError::validation("Sale amount is too large");
    let revenue = units.checked_mul(item.price).ok_or_else(too_large)?;
    let cogs = units.checked_mul(unit_cost).ok_or_else(too_large)?;
    let profit = revenue - cogs;
    let name = item.name.clone();

    // nothing below can fail
    let (revenue_id, cogs_id) = stamper.next_id_pair();
    let date = stamper.today();
    if let Some(item) = inventory.find_by_id_mut(item_id) {
        item.stock -= quantity;
    }

    let revenue_txn = Transaction {
        id: revenue_id,
        description: format!("{} {} ({} units)", SALE_PREFIX, name, quantity),
        amount: revenue,
        kind: EntryType::Income,
        date,
        is_sale: true,
        quantity: Some(quantity),
    };
    let cogs_txn = Transaction {
        id: cogs_id,
        description: format!("{} {} ({} units)", COGS_PREFIX, name, quantity),
        amount: cogs,
        kind: EntryType::Expense,
        date,
        is_sale: true,
        quantity: Some(quantity),
    };
    ledger.prepend(vec![revenue_txn.clone(), cogs_txn.clone()]);

    info!(
        item_id,
        item = %name,
        quantity,
        revenue = %revenue,
        cogs = %cogs,
        profit = %profit,
        "sale recorded"
    );
    Ok(SaleReceipt {
        revenue: revenue_txn,
        cogs: cogs_txn,
        profit,
    })
}

/// Rebuilds the sales log from the ledger alone, newest first.
///
/// A revenue row whose COGS partner is missing (deleted, or never written)
/// reports zero cost, so its profit equals its revenue.
pub fn reconstruct_sales_log(ledger: &TransactionLedger) -> Vec<SalesLogEntry> {
    let entries = ledger.entries();
    let mut sales: Vec<&Transaction> = entries
        .iter()
        .filter(|t| t.is_sale && t.kind == EntryType::Income)
        .collect();
    sales.sort_by(|a, b| b.date.cmp(&a.date));

    sales
        .into_iter()
        .map(|sale| {
            let cogs = entries
                .iter()
                .find(|t| {
                    t.description.starts_with(COGS_PREFIX)
                        && t.date == sale.date
                        && t.id == sale.id + 1
                })
                .map(|t| t.amount)
                .unwrap_or(Decimal::ZERO);
            SalesLogEntry {
                revenue_id: sale.id,
                date: sale.date,
                item_label: item_label(&sale.description),
                quantity: sale.quantity.or_else(|| units_in(&sale.description)),
                revenue: sale.amount,
                cogs,
                profit: sale.amount - cogs,
            }
        })
        .collect()
}

/// Unit count written into a sale description, e.g. `Sale: Mug (3 units)`.
/// Rows saved before quantity became a field only carry it here.
pub fn units_in(description: &str) -> Option<u64> {
    UNITS_RE
        .captures(description)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().trim().parse().ok())
}

/// Text between the first `:` and the following `(`.
pub fn item_label(description: &str) -> String {
    description
        .split(':')
        .nth(1)
        .and_then(|rest| rest.split('(').next())
        .map(str::trim)
        .unwrap_or("")
        .to_string()
}
