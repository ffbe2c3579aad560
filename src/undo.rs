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

//! Single-slot undo for deletions.
//!
//! Only the most recent deletion can be undone. Capturing a second one
//! before restoring the first drops the first for good.

use crate::base::EntryKind;
use crate::ledger::Ledger;
use crate::transaction::Transaction;
use tracing::warn;

/// A deleted entry and where it used to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedEntry {
    pub kind: EntryKind,
    pub transaction: Transaction,
    pub index: usize,
}

/// Result of a successful restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    pub kind: EntryKind,
    pub transaction: Transaction,
    /// Position the entry was re-inserted at.
    pub index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct UndoBuffer {
    slot: Option<DeletedEntry>,
}

impl UndoBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers a deletion, overwriting whatever was buffered.
    pub fn capture(&mut self, kind: EntryKind, transaction: Transaction, index: usize) {
        self.slot = Some(DeletedEntry {
            kind,
            transaction,
            index,
        });
    }

    /// Re-inserts the buffered entry at its original position and clears
    /// the buffer. Does nothing and returns `None` when empty.
    ///
    /// If the sequence has shrunk below the original position since the
    /// deletion, the entry is appended instead.
    pub fn restore(&mut self, ledger: &mut Ledger) -> Option<Restored> {
        let DeletedEntry {
            kind,
            transaction,
            index,
        } = self.slot.take()?;

        let position = ledger.insert(kind, index, transaction.clone());
        if position != index {
            warn!(%kind, index, position, "undo position past end, appended instead");
        }

        Some(Restored {
            kind,
            transaction,
            index: position,
        })
    }

    /// Clears the buffer without restoring.
    pub fn discard(&mut self) {
        self.slot = None;
    }

    pub fn peek(&self) -> Option<&DeletedEntry> {
        self.slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(description: &str, amount: &str) -> Transaction {
        Transaction::parse(description, amount).unwrap()
    }

    fn sample() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add(EntryKind::Expense, tx("Rent", "700"));
        ledger.add(EntryKind::Expense, tx("Food", "200"));
        ledger.add(EntryKind::Expense, tx("Bus", "30"));
        ledger
    }

    #[test]
    fn restore_reinserts_at_original_position() {
        let mut ledger = sample();
        let before = ledger.clone();
        let mut undo = UndoBuffer::new();

        let removed = ledger.remove(EntryKind::Expense, 1).unwrap();
        undo.capture(EntryKind::Expense, removed, 1);

        let restored = undo.restore(&mut ledger).unwrap();
        assert_eq!(restored.index, 1);
        assert_eq!(restored.transaction.description(), "Food");
        assert_eq!(ledger, before);
        assert!(undo.is_empty());
    }

    #[test]
    fn restore_on_empty_buffer_is_a_no_op() {
        let mut ledger = sample();
        let before = ledger.clone();
        let mut undo = UndoBuffer::new();

        assert_eq!(undo.restore(&mut ledger), None);
        assert_eq!(ledger, before);
    }

    #[test]
    fn second_capture_overwrites_first() {
        let mut ledger = sample();
        let mut undo = UndoBuffer::new();

        let first = ledger.remove(EntryKind::Expense, 0).unwrap();
        undo.capture(EntryKind::Expense, first, 0);
        let second = ledger.remove(EntryKind::Expense, 0).unwrap();
        undo.capture(EntryKind::Expense, second, 0);

        let restored = undo.restore(&mut ledger).unwrap();
        assert_eq!(restored.transaction.description(), "Food");
        assert_eq!(undo.restore(&mut ledger), None);

        let left: Vec<_> = ledger
            .expenses()
            .iter()
            .map(Transaction::description)
            .collect();
        assert_eq!(left, ["Food", "Bus"]);
    }

    #[test]
    fn discard_clears_without_restoring() {
        let mut ledger = sample();
        let mut undo = UndoBuffer::new();

        let removed = ledger.remove(EntryKind::Expense, 2).unwrap();
        undo.capture(EntryKind::Expense, removed, 2);
        undo.discard();

        assert!(undo.is_empty());
        assert_eq!(undo.restore(&mut ledger), None);
        assert_eq!(ledger.expenses().len(), 2);
    }

    #[test]
    fn stale_position_appends() {
        let mut ledger = sample();
        let mut undo = UndoBuffer::new();

        let removed = ledger.remove(EntryKind::Expense, 2).unwrap();
        undo.capture(EntryKind::Expense, removed, 2);
        ledger.remove(EntryKind::Expense, 0).unwrap();

        let restored = undo.restore(&mut ledger).unwrap();
        assert_eq!(restored.index, 1);
        assert_eq!(ledger.get(EntryKind::Expense, 1).unwrap().description(), "Bus");
    }

    #[test]
    fn peek_shows_buffered_entry() {
        let mut undo = UndoBuffer::new();
        assert!(undo.peek().is_none());
        undo.capture(EntryKind::Income, tx("Salary", "10"), 4);
        let entry = undo.peek().unwrap();
        assert_eq!(entry.kind, EntryKind::Income);
        assert_eq!(entry.index, 4);
    }
}
