// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{LedgerError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SavingsHorizon {
    pub years: u64,
    pub months: u64,
}

/// How long saving `monthly` each month takes to reach `goal`.
///
/// Months are the rounded remainder after whole years, so a remainder of
/// 11.5 or more reads as "12 months".
pub fn time_to_goal(goal: Decimal, monthly: Decimal) -> Result<SavingsHorizon> {
    if goal <= Decimal::ZERO || monthly <= Decimal::ZERO {
        return Err(LedgerError::validation(
            "Please enter valid positive values for both fields",
        ));
    }
    let twelve = Decimal::from(12);
    let total_months = goal
        .checked_div(monthly)
        .ok_or_else(|| LedgerError::validation("Savings horizon is too large"))?;
    let years = (total_months / twelve).floor();
    let months = (total_months % twelve)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Ok(SavingsHorizon {
        years: years
            .to_u64()
            .ok_or_else(|| LedgerError::validation("Savings horizon is too large"))?,
        months: months.to_u64().unwrap_or(0),
    })
}
