// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{LedgerError, Result};
use crate::models::Theme;
use crate::utils::{DEFAULT_CURRENCY, format_amount};
use rust_decimal::Decimal;

/// Display preferences and the free-text notes pad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub currency: String,
    pub theme: Theme,
    pub notes: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            theme: Theme::Light,
            notes: String::new(),
        }
    }
}

impl Settings {
    pub fn format(&self, value: Decimal) -> String {
        format_amount(value, &self.currency)
    }
}

// Codes outside the symbol table are kept as given and render with `$`.
pub fn normalize_currency(code: &str) -> Result<String> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(LedgerError::validation("Currency code cannot be empty"));
    }
    Ok(code)
}
