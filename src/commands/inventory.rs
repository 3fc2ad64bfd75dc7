// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{LedgerError, Result};
use crate::models::InventoryItem;
use crate::utils::{Stamper, require_positive, require_text};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

/// One line of a bulk stock submission.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow {
    pub name: String,
    pub stock: i64,
    pub price: Decimal,
}

impl InventoryRow {
    pub fn new(name: impl Into<String>, stock: i64, price: Decimal) -> Self {
        Self {
            name: name.into(),
            stock,
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RowOutcome {
    Accepted {
        row: usize,
        item: InventoryItem,
        created: bool,
    },
    Rejected {
        row: usize,
        reason: String,
    },
}

impl RowOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RowOutcome::Accepted { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulkUpsertReport {
    pub outcomes: Vec<RowOutcome>,
}

impl BulkUpsertReport {
    /// Rows actually applied to the store.
    pub fn processed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_accepted()).count()
    }

    pub fn rejected(&self) -> impl Iterator<Item = (usize, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            RowOutcome::Rejected { row, reason } => Some((*row, reason.as_str())),
            RowOutcome::Accepted { .. } => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryStore {
    items: Vec<InventoryItem>,
}

impl InventoryStore {
    pub fn from_items(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_by_id(&self, id: i64) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub(crate) fn find_by_id_mut(&mut self, id: i64) -> Option<&mut InventoryItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&InventoryItem> {
        let needle = name.trim().to_lowercase();
        self.items.iter().find(|i| i.name.to_lowercase() == needle)
    }

    pub fn total_value(&self) -> Decimal {
        self.items.iter().map(InventoryItem::total_value).sum()
    }

    /// Adds stock under a name, merging case-insensitively with an
    /// existing item. A merge adds to stock and overwrites the price.
    pub fn upsert(
        &mut self,
        stamper: &mut Stamper,
        name: &str,
        stock: i64,
        price: Decimal,
    ) -> Result<InventoryItem> {
        self.apply(stamper, name, stock, price).map(|(item, _)| item)
    }

    pub fn upsert_many(&mut self, stamper: &mut Stamper, rows: &[InventoryRow]) -> BulkUpsertReport {
        let mut report = BulkUpsertReport::default();
        for (row, r) in rows.iter().enumerate() {
            let outcome = match self.apply(stamper, &r.name, r.stock, r.price) {
                Ok((item, created)) => RowOutcome::Accepted { row, item, created },
                Err(e) => {
                    warn!(row, error = %e, "skipped inventory row");
                    RowOutcome::Rejected {
                        row,
                        reason: e.to_string(),
                    }
                }
            };
            report.outcomes.push(outcome);
        }
        info!(
            rows = rows.len(),
            processed = report.processed(),
            "bulk inventory update"
        );
        report
    }

    fn apply(
        &mut self,
        stamper: &mut Stamper,
        name: &str,
        stock: i64,
        price: Decimal,
    ) -> Result<(InventoryItem, bool)> {
        let name = require_text(name, "Item name")?;
        let stock = u64::try_from(stock).map_err(|_| {
            LedgerError::validation(format!("Stock for '{}' cannot be negative", name))
        })?;
        require_positive(price, "Unit price")?;

        let needle = name.to_lowercase();
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.name.to_lowercase() == needle)
        {
            existing.stock = existing.stock.checked_add(stock).ok_or_else(|| {
                LedgerError::validation(format!("Stock for '{}' is too large", existing.name))
            })?;
            existing.price = price;
            info!(id = existing.id, stock = existing.stock, "restocked item");
            return Ok((existing.clone(), false));
        }

        let item = InventoryItem {
            id: stamper.next_id(),
            name,
            stock,
            price,
            added_date: stamper.today(),
        };
        info!(id = item.id, name = %item.name, "added inventory item");
        self.items.push(item.clone());
        Ok((item, true))
    }

    pub fn delete(&mut self, index: usize) -> Result<InventoryItem> {
        if index >= self.items.len() {
            return Err(LedgerError::not_found(format!(
                "No inventory item at position {}",
                index
            )));
        }
        let removed = self.items.remove(index);
        info!(id = removed.id, name = %removed.name, "deleted inventory item");
        Ok(removed)
    }
}
