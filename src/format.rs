// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Display formatting for amounts and percentages.
//!
//! Money is written in the Spanish convention the ledger was designed
//! around: `.` groups thousands, `,` separates cents, currency suffix last
//! (`10.000.000,00 US$`).

use crate::amount::round_amount;
use rust_decimal::{Decimal, RoundingStrategy};

const CURRENCY_SUFFIX: &str = "US$";

/// Formats an amount for display, e.g. `1234,50 US$` or `12.345,00 US$`.
pub fn format_money(amount: Decimal) -> String {
    let mut magnitude = round_amount(amount.abs());
    magnitude.rescale(2);
    let text = magnitude.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let sign = if amount.is_sign_negative() && !magnitude.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{},{frac_part} {CURRENCY_SUFFIX}",
        group_thousands(int_part)
    )
}

/// Formats the available balance with an explicit sign: `+50,00 US$`.
pub fn format_balance(available: Decimal) -> String {
    let sign = if available >= Decimal::ZERO { '+' } else { '-' };
    format!("{sign}{}", format_money(available.abs()))
}

/// Formats a percentage rounded to a whole number: `50%`.
pub fn format_percent(percentage: Decimal) -> String {
    let whole = percentage
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("{whole}%")
}

/// Canonical text for an amount input field: two places, dot separator.
pub fn format_input(amount: Decimal) -> String {
    let mut value = round_amount(amount);
    value.rescale(2);
    value.to_string()
}

// Four-digit integers stay ungrouped (`1234`), five and up are grouped.
fn group_thousands(digits: &str) -> String {
    if digits.len() < 5 {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
