// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::TransactionLedger;
use crate::errors::{LedgerError, Result};
use crate::models::{EntryType, SavingsGoal, Transaction};
use crate::utils::{Stamper, parse_decimal, require_date, require_positive, require_text};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

pub const CONTRIBUTION_PREFIX: &str = "Goal Contribution:";

#[derive(Debug, Clone, PartialEq)]
pub struct GoalInput {
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    pub date: Option<NaiveDate>,
}

impl GoalInput {
    pub fn new(name: impl Into<String>, target: Decimal, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            target,
            current: Decimal::ZERO,
            date: Some(date),
        }
    }

    pub fn with_current(mut self, current: Decimal) -> Self {
        self.current = current;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub goal: SavingsGoal,
    pub transaction: Transaction,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavingsGoalTracker {
    goals: Vec<SavingsGoal>,
}

impl SavingsGoalTracker {
    pub fn from_goals(goals: Vec<SavingsGoal>) -> Self {
        Self { goals }
    }

    pub fn goals(&self) -> &[SavingsGoal] {
        &self.goals
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SavingsGoal> {
        self.goals.get(index)
    }

    pub fn create(&mut self, stamper: &mut Stamper, input: GoalInput) -> Result<SavingsGoal> {
        let name = require_text(&input.name, "Goal name")?;
        require_positive(input.target, "Target amount")?;
        if input.current < Decimal::ZERO {
            return Err(LedgerError::validation("Current savings cannot be negative"));
        }
        if input.current > input.target {
            return Err(LedgerError::validation(
                "Current savings cannot exceed the target amount",
            ));
        }
        let date = require_date(input.date, "Target date")?;

        let goal = SavingsGoal {
            id: stamper.next_id(),
            name,
            target: input.target,
            current: input.current,
            date,
            created: stamper.today(),
        };
        info!(id = goal.id, name = %goal.name, target = %goal.target, "created savings goal");
        self.goals.push(goal.clone());
        Ok(goal)
    }

    /// Moves money into a goal and books it as an expense.
    ///
    /// A contribution that would take the goal past its target is refused
    /// outright; nothing is clamped or partially applied. `currency` only
    /// shapes the refusal message.
    pub fn contribute(
        &mut self,
        ledger: &mut TransactionLedger,
        stamper: &mut Stamper,
        currency: &str,
        index: usize,
        amount: Decimal,
    ) -> Result<Contribution> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::validation(
                "Please enter a valid amount to contribute",
            ));
        }
        let goal = self
            .goals
            .get_mut(index)
            .ok_or_else(|| missing_index(index))?;
        let new_current = goal
            .current
            .checked_add(amount)
            .filter(|v| *v <= goal.target)
            .ok_or_else(|| LedgerError::ExceedsTarget {
                goal: goal.name.clone(),
                target: goal.target,
                remaining: goal.remaining(),
                currency: currency.to_string(),
            })?;
        goal.current = new_current;

        let transaction = Transaction {
            id: stamper.next_id(),
            description: format!("{} {}", CONTRIBUTION_PREFIX, goal.name),
            amount,
            kind: EntryType::Expense,
            date: stamper.today(),
            is_sale: false,
            quantity: None,
        };
        ledger.prepend(vec![transaction.clone()]);

        info!(goal_id = goal.id, amount = %amount, current = %goal.current, "goal contribution");
        Ok(Contribution {
            goal: goal.clone(),
            transaction,
        })
    }

    /// Same as [`SavingsGoalTracker::contribute`] for raw form text.
    pub fn contribute_text(
        &mut self,
        ledger: &mut TransactionLedger,
        stamper: &mut Stamper,
        currency: &str,
        index: usize,
        amount: &str,
    ) -> Result<Contribution> {
        let amount = parse_decimal(amount)
            .map_err(|_| LedgerError::validation("Please enter a valid amount to contribute"))?;
        self.contribute(ledger, stamper, currency, index, amount)
    }

    pub fn delete(&mut self, index: usize) -> Result<SavingsGoal> {
        if index >= self.goals.len() {
            return Err(missing_index(index));
        }
        let removed = self.goals.remove(index);
        info!(id = removed.id, name = %removed.name, "deleted savings goal");
        Ok(removed)
    }
}

fn missing_index(index: usize) -> LedgerError {
    LedgerError::not_found(format!("No savings goal at position {}", index))
}
