// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{LedgerError, Result};
use crate::models::{EntryType, RecurringEntry};
use crate::utils::{Stamper, require_positive, require_text};
use rust_decimal::Decimal;
use tracing::info;

pub const MIN_DAY: u8 = 1;
pub const MAX_DAY: u8 = 28;

// Entries are informational: nothing applies them to the ledger and
// `last_applied` is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecurringRegistry {
    entries: Vec<RecurringEntry>,
}

impl RecurringRegistry {
    pub fn from_entries(entries: Vec<RecurringEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RecurringEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn create(
        &mut self,
        stamper: &mut Stamper,
        description: &str,
        amount: Decimal,
        kind: EntryType,
        day: u8,
    ) -> Result<RecurringEntry> {
        let description = require_text(description, "Description")?;
        require_positive(amount, "Amount")?;
        if !(MIN_DAY..=MAX_DAY).contains(&day) {
            return Err(LedgerError::validation(format!(
                "Day must be a number between {} and {} (got {})",
                MIN_DAY, MAX_DAY, day
            )));
        }
        let entry = RecurringEntry {
            id: stamper.next_id(),
            description,
            amount,
            kind,
            day,
            last_applied: None,
        };
        info!(id = entry.id, day, kind = %kind, "created recurring entry");
        self.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn delete(&mut self, index: usize) -> Result<RecurringEntry> {
        if index >= self.entries.len() {
            return Err(LedgerError::not_found(format!(
                "No recurring entry at position {}",
                index
            )));
        }
        let removed = self.entries.remove(index);
        info!(id = removed.id, "deleted recurring entry");
        Ok(removed)
    }
}
