// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::format_amount;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Every rejected ledger operation maps to one of these. None of them leave
/// partial state behind; `Storage` is the only kind raised after a mutation.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Insufficient stock. Only {available} units of {item} available (requested {requested}).")]
    InsufficientStock {
        item: String,
        available: u64,
        requested: u64,
    },

    #[error(
        "This contribution exceeds the goal target of {} for '{goal}'. Please enter {} or less.",
        money(.target, .currency),
        allowance(.remaining, .currency)
    )]
    ExceedsTarget {
        goal: String,
        target: Decimal,
        remaining: Decimal,
        currency: String,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LedgerError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        LedgerError::NotFound(msg.into())
    }
}

fn money(value: &Decimal, currency: &str) -> String {
    format_amount(*value, currency)
}

// rounded down so the suggested amount never overshoots the target
fn allowance(value: &Decimal, currency: &str) -> String {
    format_amount(value.round_dp_with_strategy(2, RoundingStrategy::ToZero), currency)
}

pub type Result<T> = std::result::Result<T, LedgerError>;
