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

//! Property-based tests for the budget ledger.
//!
//! These tests verify invariants that should hold for any input the form
//! can produce and any sequence of ledger edits.

use budget_ledger::{
    EntryKind, Ledger, MAX_AMOUNT, MemoryStore, Persistence, Summary, Transaction, UndoBuffer,
    parse_amount, validate,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Arbitrary Strategies
// =============================================================================

/// A valid amount in cents, 0.01 to MAX_AMOUNT.
fn arb_cents() -> impl Strategy<Value = i64> {
    1i64..=1_000_000_000i64
}

/// A description that survives trimming with at least three characters.
fn arb_description() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{1,30}[A-Za-z]"
}

fn arb_kind() -> impl Strategy<Value = EntryKind> {
    prop_oneof![Just(EntryKind::Income), Just(EntryKind::Expense)]
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (arb_description(), arb_cents()).prop_map(|(description, cents)| {
        Transaction::parse(&description, &Decimal::new(cents, 2).to_string())
            .expect("generated transaction is valid")
    })
}

fn arb_ledger() -> impl Strategy<Value = Ledger> {
    (
        prop::collection::vec(arb_transaction(), 0..8),
        prop::collection::vec(arb_transaction(), 0..8),
    )
        .prop_map(|(incomes, expenses)| Ledger::from_parts(incomes, expenses))
}

/// Writes cents the way a Spanish-locale user would: `1.234.567,89`.
fn grouped(cents: i64) -> String {
    let digits = (cents / 100).to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    format!("{out},{:02}", cents % 100)
}

// =============================================================================
// Parsing and Validation
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Whatever the input, an accepted amount is in range with two decimals.
    #[test]
    fn validate_never_accepts_out_of_range(
        description in ".{0,130}",
        raw in "[-0-9.,a-z $]{0,16}",
    ) {
        if let Ok(amount) = validate(&description, &raw) {
            prop_assert!(amount > Decimal::ZERO);
            prop_assert!(amount <= MAX_AMOUNT);
            prop_assert!(amount.scale() <= 2);
            let trimmed = description.trim().chars().count();
            prop_assert!((3..=120).contains(&trimmed));
        }
    }

    /// Plain decimal input parses to itself.
    #[test]
    fn plain_decimals_parse_exactly(cents in arb_cents()) {
        let amount = Decimal::new(cents, 2);
        prop_assert_eq!(parse_amount(&amount.to_string()), Ok(amount));
    }

    /// Thousands-grouped input with a decimal comma parses to the same value.
    #[test]
    fn grouped_input_parses(cents in 100_000i64..=1_000_000_000i64) {
        prop_assert_eq!(parse_amount(&grouped(cents)), Ok(Decimal::new(cents, 2)));
    }

    /// A bare decimal comma is accepted too.
    #[test]
    fn decimal_comma_parses(cents in 1i64..100_000i64) {
        let raw = format!("{},{:02}", cents / 100, cents % 100);
        prop_assert_eq!(parse_amount(&raw), Ok(Decimal::new(cents, 2)));
    }
}

// =============================================================================
// Ledger Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// available = income - expense; no income means 0% spent.
    #[test]
    fn summary_is_consistent(ledger in arb_ledger()) {
        let summary = Summary::compute(&ledger);
        prop_assert_eq!(summary.available, summary.total_income - summary.total_expense);
        if summary.total_income.is_zero() {
            prop_assert_eq!(summary.spend_percentage, Decimal::ZERO);
        } else {
            prop_assert!(summary.spend_percentage >= Decimal::ZERO);
        }
    }

    /// Saving then loading gives back an equal ledger.
    #[test]
    fn persistence_round_trip(ledger in arb_ledger()) {
        let persistence = Persistence::new(MemoryStore::new());
        prop_assert!(persistence.save(&ledger));
        prop_assert_eq!(persistence.load(), ledger);
    }

    /// Removing any entry and restoring it yields the original sequence.
    #[test]
    fn delete_then_restore_is_identity(
        ledger in arb_ledger(),
        kind in arb_kind(),
        pick in any::<prop::sample::Index>(),
    ) {
        let len = ledger.list(kind).len();
        prop_assume!(len > 0);
        let index = pick.index(len);

        let mut edited = ledger.clone();
        let removed = edited.remove(kind, index).expect("index in bounds");
        let mut undo = UndoBuffer::new();
        undo.capture(kind, removed, index);

        let restored = undo.restore(&mut edited).expect("buffer is full");
        prop_assert_eq!(restored.index, index);
        prop_assert_eq!(edited, ledger);
        prop_assert!(undo.is_empty());
    }

    /// Only the most recent removal can be undone.
    #[test]
    fn undo_keeps_only_last_removal(
        ledger in arb_ledger(),
        kind in arb_kind(),
    ) {
        prop_assume!(ledger.list(kind).len() >= 2);

        let mut edited = ledger.clone();
        let mut undo = UndoBuffer::new();
        let first = edited.remove(kind, 0).expect("first entry");
        undo.capture(kind, first, 0);
        let second = edited.remove(kind, 0).expect("second entry");
        undo.capture(kind, second.clone(), 0);

        let restored = undo.restore(&mut edited).expect("buffer is full");
        prop_assert_eq!(restored.transaction, second);
        prop_assert!(undo.restore(&mut edited).is_none());
        prop_assert_eq!(edited.list(kind).len(), ledger.list(kind).len() - 1);
    }
}
