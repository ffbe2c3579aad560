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

//! Ledger entries.
//!
//! A [`Transaction`] is immutable: edits replace it wholesale. The only ways
//! to build one are [`Transaction::parse`] (form input) and
//! [`Transaction::from_stored`] (a persisted record), both of which enforce
//! the same description and amount rules.

use crate::amount::{MAX_AMOUNT, round_amount};
use crate::error::ValidationError;
use crate::format::format_money;
use crate::validation::{check_amount, check_description, validate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::ser::{Serialize, SerializeStruct, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    description: String,
    amount: Decimal,
}

impl Transaction {
    /// Validates form input and builds an entry with the trimmed
    /// description and normalized amount.
    ///
    /// # Errors
    ///
    /// Any [`ValidationError`] raised by [`validate`](crate::validate).
    pub fn parse(description: &str, raw_amount: &str) -> Result<Self, ValidationError> {
        let amount = validate(description, raw_amount)?;
        Ok(Self {
            description: description.trim().to_string(),
            amount,
        })
    }

    /// Rebuilds an entry from a persisted `{description, amount}` record.
    ///
    /// Stored amounts are JSON numbers; they are rounded back to two places
    /// before the range checks.
    pub fn from_stored(description: &str, amount: f64) -> Result<Self, ValidationError> {
        let description = check_description(description)?;

        let amount = match Decimal::try_from(amount) {
            Ok(value) => round_amount(value),
            // Outside the Decimal range: huge magnitudes or NaN.
            Err(_) if amount > 1.0 => {
                return Err(ValidationError::ExceedsMaximum {
                    ceiling: format_money(MAX_AMOUNT),
                });
            }
            Err(_) => return Err(ValidationError::NotPositive),
        };
        check_amount(amount)?;

        Ok(Self {
            description: description.to_string(),
            amount,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Serialize for Transaction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let amount = self
            .amount
            .to_f64()
            .ok_or_else(|| serde::ser::Error::custom("amount not representable as f64"))?;
        let mut state = serializer.serialize_struct("Transaction", 2)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("amount", &amount)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_trims_description() {
        let tx = Transaction::parse("  Groceries \n", "45,90").unwrap();
        assert_eq!(tx.description(), "Groceries");
        assert_eq!(tx.amount(), dec!(45.90));
    }

    #[test]
    fn parse_rejects_invalid_input() {
        assert_eq!(
            Transaction::parse("Rent", "0"),
            Err(ValidationError::NotPositive)
        );
    }

    #[test]
    fn from_stored_rounds_float_noise() {
        let tx = Transaction::from_stored("Salary", 1234.56).unwrap();
        assert_eq!(tx.amount(), dec!(1234.56));

        let tx = Transaction::from_stored("Salary", 0.1 + 0.2).unwrap();
        assert_eq!(tx.amount(), dec!(0.30));
    }

    #[test]
    fn from_stored_enforces_invariants() {
        assert_eq!(
            Transaction::from_stored("ok", 10.0),
            Err(ValidationError::DescriptionTooShort { min: 3 })
        );
        assert_eq!(
            Transaction::from_stored("Refund", -10.0),
            Err(ValidationError::NotPositive)
        );
        assert!(matches!(
            Transaction::from_stored("Jackpot", 1e12),
            Err(ValidationError::ExceedsMaximum { .. })
        ));
        assert!(matches!(
            Transaction::from_stored("Overflow", 1e40),
            Err(ValidationError::ExceedsMaximum { .. })
        ));
        assert_eq!(
            Transaction::from_stored("Underflow", -1e40),
            Err(ValidationError::NotPositive)
        );
    }

    #[test]
    fn serializes_amount_as_json_number() {
        let tx = Transaction::parse("Coffee", "3,50").unwrap();
        let json = serde_json::to_string(&tx).unwrap();
        assert_eq!(json, r#"{"description":"Coffee","amount":3.5}"#);
    }
}
