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

//! Free-form amount parsing.
//!
//! Users type amounts the way their locale writes them: `1200.50`,
//! `1200,50`, `1.200,50`, `$ 1,200.50`. [`parse_amount`] normalizes all of
//! these to a [`Decimal`] with two fractional digits.
//!
//! # Rules
//!
//! Applied in order to the trimmed input:
//!
//! 1. `1.234,56` style (thousands dots, decimal comma): drop the dots, the
//!    comma becomes the decimal point.
//! 2. Otherwise a comma with no dot anywhere is a decimal comma. Only the
//!    first comma is converted.
//! 3. Everything that is not an ASCII digit, `.` or `-` is removed.
//! 4. The longest leading `-?digits[.digits]` prefix is the number; the
//!    rest is ignored (`1.2.3` reads as `1.2`).
//! 5. The result is rounded to two places, ties away from zero.
//!
//! # Example
//!
//! ```
//! use budget_ledger::parse_amount;
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(parse_amount("1.234,56"), Ok(dec!(1234.56)));
//! assert_eq!(parse_amount("1234,56"), Ok(dec!(1234.56)));
//! assert!(parse_amount("abc").is_err());
//! ```

use crate::error::ParseError;
use crate::format::format_input;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::str::FromStr;
use std::sync::LazyLock;

/// Largest amount a single entry may carry (inclusive).
pub const MAX_AMOUNT: Decimal = dec!(10_000_000);

/// Fractional digits kept on every amount.
pub const AMOUNT_SCALE: u32 = 2;

static THOUSANDS_DOT_DECIMAL_COMMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,3}(\.[0-9]{3})+,[0-9]+$").expect("static pattern compiles")
});

/// Parses user-typed amount text.
///
/// Sign is preserved; rejecting non-positive values is the validator's job.
///
/// # Errors
///
/// - [`ParseError::NotANumber`] - no digits survive normalization.
/// - [`ParseError::OutOfRange`] - the integer part overflows [`Decimal`];
///   `negative` keeps the sign of the overflowing value.
pub fn parse_amount(raw: &str) -> Result<Decimal, ParseError> {
    let trimmed = raw.trim();

    let normalized = if THOUSANDS_DOT_DECIMAL_COMMA.is_match(trimmed) {
        trimmed.replace('.', "").replacen(',', ".", 1)
    } else if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };

    let cleaned: String = normalized
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let value = leading_number(&cleaned)?;
    Ok(round_amount(value))
}

/// Rounds to [`AMOUNT_SCALE`] places, ties away from zero.
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Re-formats what the user typed into the canonical `1234.50` form.
///
/// Returns `None` when the text does not parse, in which case the field
/// should be left as typed.
pub fn normalize_amount_input(raw: &str) -> Option<String> {
    parse_amount(raw).ok().map(format_input)
}

/// Reads the leading `-?digits[.digits]` of already-cleaned text.
fn leading_number(text: &str) -> Result<Decimal, ParseError> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let (int_part, after) = rest.split_at(int_len);
    let frac_part = after
        .strip_prefix('.')
        .map(|frac| &frac[..frac.bytes().take_while(u8::is_ascii_digit).count()])
        .unwrap_or("");

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(ParseError::NotANumber);
    }

    // Half-away-from-zero at two places only looks at the third digit.
    let frac_part = &frac_part[..frac_part.len().min(AMOUNT_SCALE as usize + 1)];
    let int_part = int_part.trim_start_matches('0');

    let literal = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part },
    );
    Decimal::from_str(&literal).map_err(|_| ParseError::OutOfRange { negative })
}
