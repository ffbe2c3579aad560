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

//! Business rules for a submitted entry.

use crate::amount::{MAX_AMOUNT, parse_amount};
use crate::error::{ParseError, ValidationError};
use crate::format::format_money;
use rust_decimal::Decimal;

/// Minimum description length, in characters, after trimming.
pub const MIN_DESCRIPTION_LEN: usize = 3;

/// Maximum description length, in characters, after trimming.
pub const MAX_DESCRIPTION_LEN: usize = 120;

/// Checks a description and a raw amount, returning the normalized amount.
///
/// Checks run in a fixed order and the first failure wins:
///
/// | Check | Error |
/// |-------|-------|
/// | trimmed description empty | [`ValidationError::DescriptionRequired`] |
/// | fewer than 3 characters | [`ValidationError::DescriptionTooShort`] |
/// | more than 120 characters | [`ValidationError::DescriptionTooLong`] |
/// | amount does not parse | [`ValidationError::InvalidAmount`] |
/// | amount `<= 0` | [`ValidationError::NotPositive`] |
/// | amount `> MAX_AMOUNT` | [`ValidationError::ExceedsMaximum`] |
///
/// Numbers too wide for [`Decimal`] still count as numbers and fail the
/// range checks by sign.
///
/// # Example
///
/// ```
/// use budget_ledger::validate;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(validate("  Rent ", "1.200,00"), Ok(dec!(1200.00)));
/// assert!(validate("ab", "10").is_err());
/// ```
pub fn validate(description: &str, raw_amount: &str) -> Result<Decimal, ValidationError> {
    check_description(description)?;

    let amount = match parse_amount(raw_amount) {
        Ok(amount) => amount,
        // Finite but too wide for Decimal: far past either bound.
        Err(ParseError::OutOfRange { negative: true }) => {
            return Err(ValidationError::NotPositive);
        }
        Err(ParseError::OutOfRange { negative: false }) => {
            return Err(ValidationError::ExceedsMaximum {
                ceiling: format_money(MAX_AMOUNT),
            });
        }
        Err(e) => return Err(ValidationError::InvalidAmount(e)),
    };
    check_amount(amount)?;

    Ok(amount)
}

/// Length checks; returns the trimmed description.
pub(crate) fn check_description(description: &str) -> Result<&str, ValidationError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }

    let len = description.chars().count();
    if len < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooShort {
            min: MIN_DESCRIPTION_LEN,
        });
    }
    if len > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong {
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(description)
}

/// Range checks shared by form input and stored records.
pub(crate) fn check_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NotPositive);
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::ExceedsMaximum {
            ceiling: format_money(MAX_AMOUNT),
        });
    }
    Ok(())
}
