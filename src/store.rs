// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key-value persistence seam.
//!
//! Every collection is stored as one JSON array under a fixed key and is
//! rewritten wholesale on each mutation. Scalars (currency, theme, notes)
//! are stored as plain strings.

use crate::errors::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

pub const TRANSACTIONS_KEY: &str = "transactions";
pub const INVENTORY_KEY: &str = "inventory";
pub const GOALS_KEY: &str = "savingGoals";
pub const RECURRING_KEY: &str = "recurringEntries";
pub const CURRENCY_KEY: &str = "currency";
pub const THEME_KEY: &str = "theme";
pub const NOTES_KEY: &str = "appNotes";

pub const ALL_KEYS: [&str; 7] = [
    TRANSACTIONS_KEY,
    INVENTORY_KEY,
    GOALS_KEY,
    RECURRING_KEY,
    CURRENCY_KEY,
    THEME_KEY,
    NOTES_KEY,
];

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Writes several keys in one go. Backends that can group writes
    /// override this.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        for key in ALL_KEYS {
            self.remove(key)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Missing key reads as an empty list.
pub fn load_list<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Vec<T>> {
    match store.get(key)? {
        Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
        _ => Ok(Vec::new()),
    }
}

pub fn encode_list<T: Serialize>(items: &[T]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}
