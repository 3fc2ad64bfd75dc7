// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The book owns every collection plus the backing store.
//!
//! Each mutating method applies its change in memory and then rewrites the
//! collections to the store before returning (write-through, no batching).
//! If that write fails the error is returned and memory is not rolled back.
//! The book is driven through `&mut self`; hosts that share it across
//! threads put it behind a single `Mutex`.

use crate::commands::calculator::{SavingsHorizon, time_to_goal};
use crate::commands::goals::{Contribution, GoalInput, SavingsGoalTracker};
use crate::commands::inventory::{BulkUpsertReport, InventoryRow, InventoryStore};
use crate::commands::recurring::RecurringRegistry;
use crate::commands::sales::{SaleReceipt, SalesLogEntry, reconstruct_sales_log, sell};
use crate::commands::settings::{Settings, normalize_currency};
use crate::commands::transactions::{Summary, TransactionInput, TransactionLedger};
use crate::db::SqliteStore;
use crate::errors::Result;
use crate::models::{EntryType, InventoryItem, RecurringEntry, SavingsGoal, Theme, Transaction};
use crate::store::{
    CURRENCY_KEY, GOALS_KEY, INVENTORY_KEY, KeyValueStore, NOTES_KEY, RECURRING_KEY, THEME_KEY,
    TRANSACTIONS_KEY, encode_list, load_list,
};
use crate::utils::{Clock, Stamper, SystemClock};
use rust_decimal::Decimal;
use tracing::{debug, info};

pub struct Book<S: KeyValueStore> {
    store: S,
    stamper: Stamper,
    transactions: TransactionLedger,
    inventory: InventoryStore,
    goals: SavingsGoalTracker,
    recurring: RecurringRegistry,
    settings: Settings,
}

impl Book<SqliteStore> {
    /// Opens the book in the platform data directory (or `FINANCER_DB`).
    pub fn open_default() -> anyhow::Result<Self> {
        let store = SqliteStore::open_default()?;
        Ok(Book::open(store)?)
    }
}

impl<S: KeyValueStore> Book<S> {
    pub fn open(store: S) -> Result<Self> {
        Self::open_with_clock(store, Box::new(SystemClock))
    }

    pub fn open_with_clock(store: S, clock: Box<dyn Clock>) -> Result<Self> {
        let transactions: Vec<Transaction> = load_list(&store, TRANSACTIONS_KEY)?;
        let inventory: Vec<InventoryItem> = load_list(&store, INVENTORY_KEY)?;
        let goals: Vec<SavingsGoal> = load_list(&store, GOALS_KEY)?;
        let recurring: Vec<RecurringEntry> = load_list(&store, RECURRING_KEY)?;

        let mut settings = Settings::default();
        if let Some(code) = store.get(CURRENCY_KEY)? {
            if !code.trim().is_empty() {
                settings.currency = code;
            }
        }
        if let Some(theme) = store.get(THEME_KEY)? {
            settings.theme = Theme::from_stored(&theme);
        }
        if let Some(notes) = store.get(NOTES_KEY)? {
            settings.notes = notes;
        }

        let mut stamper = Stamper::new(clock);
        transactions
            .iter()
            .map(|t| t.id)
            .chain(inventory.iter().map(|i| i.id))
            .chain(goals.iter().map(|g| g.id))
            .chain(recurring.iter().map(|r| r.id))
            .for_each(|id| stamper.observe(id));

        info!(
            transactions = transactions.len(),
            inventory = inventory.len(),
            goals = goals.len(),
            recurring = recurring.len(),
            "loaded book"
        );
        Ok(Self {
            store,
            stamper,
            transactions: TransactionLedger::from_entries(transactions),
            inventory: InventoryStore::from_items(inventory),
            goals: SavingsGoalTracker::from_goals(goals),
            recurring: RecurringRegistry::from_entries(recurring),
            settings,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn flush(&mut self) -> Result<()> {
        let entries = [
            (TRANSACTIONS_KEY, encode_list(self.transactions.entries())?),
            (INVENTORY_KEY, encode_list(self.inventory.items())?),
            (GOALS_KEY, encode_list(self.goals.goals())?),
            (RECURRING_KEY, encode_list(self.recurring.entries())?),
            (CURRENCY_KEY, self.settings.currency.clone()),
        ];
        self.store.set_many(&entries)?;
        debug!("flushed book");
        Ok(())
    }

    // ---- transactions ----

    pub fn transactions(&self) -> &TransactionLedger {
        &self.transactions
    }

    pub fn record_transaction(
        &mut self,
        description: &str,
        amount: Decimal,
        kind: EntryType,
        date: Option<chrono::NaiveDate>,
    ) -> Result<Transaction> {
        let input = TransactionInput {
            description: description.to_string(),
            amount,
            kind,
            date,
        };
        let txn = self.transactions.record(&mut self.stamper, input)?;
        self.flush()?;
        Ok(txn)
    }

    /// `index` is a position in insertion order, not in `recent_transactions`.
    pub fn edit_transaction(&mut self, index: usize, input: TransactionInput) -> Result<Transaction> {
        let txn = self.transactions.edit(index, input)?;
        self.flush()?;
        Ok(txn)
    }

    pub fn edit_transaction_by_id(&mut self, id: i64, input: TransactionInput) -> Result<Transaction> {
        let txn = self.transactions.edit_by_id(id, input)?;
        self.flush()?;
        Ok(txn)
    }

    pub fn delete_transaction(&mut self, index: usize) -> Result<Transaction> {
        let txn = self.transactions.delete(index)?;
        self.flush()?;
        Ok(txn)
    }

    pub fn delete_transaction_by_id(&mut self, id: i64) -> Result<Transaction> {
        let txn = self.transactions.delete_by_id(id)?;
        self.flush()?;
        Ok(txn)
    }

    pub fn summary(&self) -> Summary {
        self.transactions.summarize()
    }

    pub fn recent_transactions(&self, n: usize) -> Vec<&Transaction> {
        self.transactions.list_recent(n)
    }

    // ---- inventory & sales ----

    pub fn inventory(&self) -> &InventoryStore {
        &self.inventory
    }

    pub fn upsert_item(&mut self, name: &str, stock: i64, price: Decimal) -> Result<InventoryItem> {
        let item = self.inventory.upsert(&mut self.stamper, name, stock, price)?;
        self.flush()?;
        Ok(item)
    }

    pub fn upsert_items(&mut self, rows: &[InventoryRow]) -> Result<BulkUpsertReport> {
        let report = self.inventory.upsert_many(&mut self.stamper, rows);
        self.flush()?;
        Ok(report)
    }

    pub fn delete_item(&mut self, index: usize) -> Result<InventoryItem> {
        let item = self.inventory.delete(index)?;
        self.flush()?;
        Ok(item)
    }

    pub fn find_item(&self, id: i64) -> Option<&InventoryItem> {
        self.inventory.find_by_id(id)
    }

    pub fn sell(&mut self, item_id: i64, quantity: u64, unit_cost: Decimal) -> Result<SaleReceipt> {
        let receipt = sell(
            &mut self.inventory,
            &mut self.transactions,
            &mut self.stamper,
            item_id,
            quantity,
            unit_cost,
        )?;
        self.flush()?;
        Ok(receipt)
    }

    pub fn sales_log(&self) -> Vec<SalesLogEntry> {
        reconstruct_sales_log(&self.transactions)
    }

    /// The `n` newest sales log rows (the sales screen shows ten).
    pub fn recent_sales(&self, n: usize) -> Vec<SalesLogEntry> {
        let mut log = self.sales_log();
        log.truncate(n);
        log
    }

    // ---- savings goals ----

    pub fn goals(&self) -> &SavingsGoalTracker {
        &self.goals
    }

    pub fn create_goal(&mut self, input: GoalInput) -> Result<SavingsGoal> {
        let goal = self.goals.create(&mut self.stamper, input)?;
        self.flush()?;
        Ok(goal)
    }

    pub fn contribute(&mut self, index: usize, amount: Decimal) -> Result<Contribution> {
        let c = self
            .goals
            .contribute(
                &mut self.transactions,
                &mut self.stamper,
                &self.settings.currency,
                index,
                amount,
            )?;
        self.flush()?;
        Ok(c)
    }

    pub fn contribute_text(&mut self, index: usize, amount: &str) -> Result<Contribution> {
        let c = self
            .goals
            .contribute_text(
                &mut self.transactions,
                &mut self.stamper,
                &self.settings.currency,
                index,
                amount,
            )?;
        self.flush()?;
        Ok(c)
    }

    pub fn delete_goal(&mut self, index: usize) -> Result<SavingsGoal> {
        let goal = self.goals.delete(index)?;
        self.flush()?;
        Ok(goal)
    }

    pub fn time_to_goal(&self, goal: Decimal, monthly: Decimal) -> Result<SavingsHorizon> {
        time_to_goal(goal, monthly)
    }

    // ---- recurring ----

    pub fn recurring(&self) -> &RecurringRegistry {
        &self.recurring
    }

    pub fn create_recurring(
        &mut self,
        description: &str,
        amount: Decimal,
        kind: EntryType,
        day: u8,
    ) -> Result<RecurringEntry> {
        let entry = self
            .recurring
            .create(&mut self.stamper, description, amount, kind, day)?;
        self.flush()?;
        Ok(entry)
    }

    pub fn delete_recurring(&mut self, index: usize) -> Result<RecurringEntry> {
        let entry = self.recurring.delete(index)?;
        self.flush()?;
        Ok(entry)
    }

    // ---- settings ----

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency
    }

    pub fn set_currency(&mut self, code: &str) -> Result<()> {
        self.settings.currency = normalize_currency(code)?;
        self.store.set(CURRENCY_KEY, &self.settings.currency)?;
        info!(currency = %self.settings.currency, "switched currency");
        Ok(())
    }

    pub fn format(&self, value: Decimal) -> String {
        self.settings.format(value)
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.settings.theme = theme;
        self.store.set(THEME_KEY, theme.as_str())?;
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let next = self.settings.theme.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    pub fn notes(&self) -> &str {
        &self.settings.notes
    }

    pub fn set_notes(&mut self, notes: &str) -> Result<()> {
        self.settings.notes = notes.to_string();
        self.store.set(NOTES_KEY, notes)?;
        Ok(())
    }

    /// Wipes every persisted key and all in-memory state.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()?;
        self.transactions = TransactionLedger::default();
        self.inventory = InventoryStore::default();
        self.goals = SavingsGoalTracker::default();
        self.recurring = RecurringRegistry::default();
        self.settings = Settings::default();
        info!("reset book");
        Ok(())
    }
}
