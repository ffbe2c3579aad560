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

//! The two ordered transaction sequences.
//!
//! Entries are addressed by `(kind, index)`. Position is identity: there
//! are no stable IDs, so every removal shifts the entries after it down by
//! one and an undo has to re-insert at the exact original position.
//!
//! # Example
//!
//! ```
//! use budget_ledger::{EntryKind, Ledger, Transaction};
//!
//! let mut ledger = Ledger::new();
//! ledger.add(EntryKind::Income, Transaction::parse("Salary", "1500").unwrap());
//! ledger.add(EntryKind::Expense, Transaction::parse("Rent", "700").unwrap());
//!
//! let removed = ledger.remove(EntryKind::Expense, 0).unwrap();
//! assert_eq!(removed.description(), "Rent");
//! assert!(ledger.list(EntryKind::Expense).is_empty());
//! ```

use crate::base::EntryKind;
use crate::error::LedgerError;
use crate::transaction::Transaction;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ledger {
    incomes: Vec<Transaction>,
    expenses: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from already-validated sequences.
    pub fn from_parts(incomes: Vec<Transaction>, expenses: Vec<Transaction>) -> Self {
        Self { incomes, expenses }
    }

    /// Appends to the end of the named sequence.
    pub fn add(&mut self, kind: EntryKind, transaction: Transaction) {
        self.entries_mut(kind).push(transaction);
    }

    /// Replaces the entry at `index`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::EntryNotFound`] if `index` is out of bounds.
    pub fn update(
        &mut self,
        kind: EntryKind,
        index: usize,
        transaction: Transaction,
    ) -> Result<(), LedgerError> {
        let slot = self
            .entries_mut(kind)
            .get_mut(index)
            .ok_or(LedgerError::EntryNotFound { kind, index })?;
        *slot = transaction;
        Ok(())
    }

    /// Moves an edited entry to the other sequence.
    ///
    /// The old entry is removed from `from_kind` and `transaction` is
    /// appended to `to_kind`; it does not keep its old position.
    ///
    /// # Errors
    ///
    /// [`LedgerError::EntryNotFound`] if `from_index` is out of bounds, in
    /// which case nothing changes.
    pub fn move_entry(
        &mut self,
        from_kind: EntryKind,
        from_index: usize,
        to_kind: EntryKind,
        transaction: Transaction,
    ) -> Result<(), LedgerError> {
        self.remove(from_kind, from_index)?;
        self.add(to_kind, transaction);
        Ok(())
    }

    /// Removes and returns the entry at `index`; later entries shift down.
    ///
    /// # Errors
    ///
    /// [`LedgerError::EntryNotFound`] if `index` is out of bounds.
    pub fn remove(&mut self, kind: EntryKind, index: usize) -> Result<Transaction, LedgerError> {
        let entries = self.entries_mut(kind);
        if index >= entries.len() {
            return Err(LedgerError::EntryNotFound { kind, index });
        }
        Ok(entries.remove(index))
    }

    /// Inserts at `index`, shifting later entries up. An index past the end
    /// appends. Returns the position actually used.
    pub fn insert(&mut self, kind: EntryKind, index: usize, transaction: Transaction) -> usize {
        let entries = self.entries_mut(kind);
        let position = index.min(entries.len());
        entries.insert(position, transaction);
        position
    }

    pub fn get(&self, kind: EntryKind, index: usize) -> Option<&Transaction> {
        self.list(kind).get(index)
    }

    /// Read-only view of the named sequence, in insertion order.
    pub fn list(&self, kind: EntryKind) -> &[Transaction] {
        match kind {
            EntryKind::Income => &self.incomes,
            EntryKind::Expense => &self.expenses,
        }
    }

    pub fn incomes(&self) -> &[Transaction] {
        &self.incomes
    }

    pub fn expenses(&self) -> &[Transaction] {
        &self.expenses
    }

    /// Total number of entries across both sequences.
    pub fn len(&self) -> usize {
        self.incomes.len() + self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty()
    }

    fn entries_mut(&mut self, kind: EntryKind) -> &mut Vec<Transaction> {
        match kind {
            EntryKind::Income => &mut self.incomes,
            EntryKind::Expense => &mut self.expenses,
        }
    }
}
