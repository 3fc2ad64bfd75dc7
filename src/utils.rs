// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{LedgerError, Result};
use chrono::{NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_CURRENCY: &str = "USD";

const CURRENCY_SYMBOLS: [(&str, &str); 4] = [("USD", "$"), ("EUR", "€"), ("GBP", "£"), ("NGN", "₦")];

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
    })
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_| LedgerError::validation(format!("Invalid amount '{}'", s)))
}

/// Symbol for a currency code; unknown codes fall back to `$`.
pub fn currency_symbol(code: &str) -> &'static str {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, sym)| *sym)
        .unwrap_or("$")
}

/// Two decimals, half away from zero (`2.999` reads as `3.00`).
pub fn format_amount(value: Decimal, code: &str) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{:.2}", currency_symbol(code), rounded)
}

pub trait Clock {
    fn now_millis(&self) -> i64;
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub millis: i64,
    pub today: NaiveDate,
}

impl FixedClock {
    pub fn new(millis: i64, today: NaiveDate) -> Self {
        Self { millis, today }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Hands out entity ids and "today" dates.
///
/// Ids are creation timestamps in milliseconds, bumped past the last id
/// issued so that two entities created within the same millisecond (or
/// under a frozen clock) never share an identity.
pub struct Stamper {
    clock: Box<dyn Clock>,
    last_id: i64,
}

impl Stamper {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self { clock, last_id: 0 }
    }

    /// Records an id that already exists so later ids stay above it.
    pub fn observe(&mut self, id: i64) {
        self.last_id = self.last_id.max(id);
    }

    pub fn next_id(&mut self) -> i64 {
        let id = self.clock.now_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    /// Two consecutive ids; a sale's COGS row is always revenue id + 1.
    pub fn next_id_pair(&mut self) -> (i64, i64) {
        let first = self.next_id();
        let second = first + 1;
        self.last_id = second;
        (first, second)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

impl std::fmt::Debug for Stamper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stamper")
            .field("last_id", &self.last_id)
            .finish_non_exhaustive()
    }
}

pub(crate) fn require_text(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation(format!("{} cannot be empty", what)));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn require_positive(value: Decimal, what: &str) -> Result<Decimal> {
    if value <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "{} must be greater than zero (got {})",
            what, value
        )));
    }
    Ok(value)
}

pub(crate) fn require_date(date: Option<NaiveDate>, what: &str) -> Result<NaiveDate> {
    date.ok_or_else(|| LedgerError::validation(format!("{} is required", what)))
}
