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

//! Error types for amount parsing, validation, ledger addressing and storage.

use crate::base::EntryKind;
use thiserror::Error;

/// Amount text could not be turned into a number.
///
/// Never surfaced on its own. The validator folds `NotANumber` into
/// [`ValidationError::InvalidAmount`] and `OutOfRange` into the matching
/// range error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No digits left after normalization
    #[error("not a number")]
    NotANumber,

    /// Digits present but the value does not fit the decimal range
    #[error("number out of range")]
    OutOfRange { negative: bool },
}

/// Business-rule violations for a submitted entry.
///
/// The `Display` output is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("description is required")]
    DescriptionRequired,

    #[error("description must be at least {min} characters")]
    DescriptionTooShort { min: usize },

    #[error("description is too long (max {max} characters)")]
    DescriptionTooLong { max: usize },

    #[error("invalid amount, use numbers such as 1200.50")]
    InvalidAmount(#[source] ParseError),

    #[error("amount must be greater than 0")]
    NotPositive,

    /// Carries the ceiling already formatted for display.
    #[error("amount too large, max {ceiling}")]
    ExceedsMaximum { ceiling: String },
}

/// Positional addressing failures on the ledger.
///
/// Usually means the caller held on to an index that went stale.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("entry not found")]
    EntryNotFound { kind: EntryKind, index: usize },
}

/// Durable store failures. Always recovered by the persistence layer.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Outcome of a rejected form submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The edit session pointed at an entry that no longer exists.
    #[error(transparent)]
    EntryNotFound(#[from] LedgerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            ValidationError::DescriptionRequired.to_string(),
            "description is required"
        );
        assert_eq!(
            ValidationError::DescriptionTooShort { min: 3 }.to_string(),
            "description must be at least 3 characters"
        );
        assert_eq!(
            ValidationError::DescriptionTooLong { max: 120 }.to_string(),
            "description is too long (max 120 characters)"
        );
        assert_eq!(
            ValidationError::InvalidAmount(ParseError::NotANumber).to_string(),
            "invalid amount, use numbers such as 1200.50"
        );
        assert_eq!(
            ValidationError::NotPositive.to_string(),
            "amount must be greater than 0"
        );
        assert_eq!(
            ValidationError::ExceedsMaximum {
                ceiling: "10.000.000,00 US$".into()
            }
            .to_string(),
            "amount too large, max 10.000.000,00 US$"
        );
        assert_eq!(
            LedgerError::EntryNotFound {
                kind: EntryKind::Income,
                index: 4
            }
            .to_string(),
            "entry not found"
        );
    }

    #[test]
    fn submit_error_is_transparent() {
        let err = SubmitError::from(ValidationError::NotPositive);
        assert_eq!(err.to_string(), "amount must be greater than 0");

        let err = SubmitError::from(LedgerError::EntryNotFound {
            kind: EntryKind::Expense,
            index: 0,
        });
        assert_eq!(err.to_string(), "entry not found");
    }

    #[test]
    fn invalid_amount_keeps_parse_error_as_source() {
        use std::error::Error as _;

        let err = ValidationError::InvalidAmount(ParseError::OutOfRange { negative: false });
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("number out of range"));
    }
}
