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

//! # Budget Ledger
//!
//! This library provides a personal budget ledger: income and expense
//! entries, running totals, and add/edit/delete with a one-level undo.
//!
//! ## Core Components
//!
//! - [`parse_amount`] / [`validate`]: turn free-form form input into a
//!   checked, two-decimal amount
//! - [`Ledger`]: the ordered income and expense sequences, addressed by position
//! - [`EditSession`] and [`UndoBuffer`]: edit and undo state
//! - [`Summary`] / [`LedgerView`]: totals, spend percentage, render view model
//! - [`Persistence`]: JSON document in a [`KeyValueStore`]
//! - [`Engine`]: wires all of the above behind the user actions
//!
//! ## Example
//!
//! ```
//! use budget_ledger::{Decision, Deletion, Engine, EntryForm, EntryKind, MemoryStore};
//! use rust_decimal_macros::dec;
//!
//! let mut engine = Engine::open(MemoryStore::new(), ());
//!
//! engine.submit(&EntryForm::new(EntryKind::Income, "Salary", "100")).unwrap();
//! engine.submit(&EntryForm::new(EntryKind::Expense, "Groceries", "30")).unwrap();
//! engine.submit(&EntryForm::new(EntryKind::Expense, "Bus pass", "20,00")).unwrap();
//!
//! let summary = engine.summary();
//! assert_eq!(summary.available, dec!(50));
//! assert_eq!(summary.spend_percentage, dec!(50));
//!
//! // Confirm the delete, then take the undo offer.
//! let mut always_yes = |_: &budget_ledger::Prompt| Decision::Accepted;
//! let outcome = engine.delete(EntryKind::Expense, 0, &mut always_yes).unwrap();
//! assert!(matches!(outcome, Deletion::Restored(_)));
//! assert_eq!(engine.ledger().expenses().len(), 2);
//! ```

mod amount;
mod base;
pub mod config;
mod confirm;
mod engine;
pub mod error;
mod format;
mod ledger;
pub mod logging;
mod session;
mod storage;
mod summary;
mod transaction;
mod undo;
mod validation;

pub use amount::{AMOUNT_SCALE, MAX_AMOUNT, normalize_amount_input, parse_amount, round_amount};
pub use base::{EntryKind, UnknownKind};
pub use confirm::{Confirm, Decision, Prompt, UNDO_OFFER_TIMEOUT};
pub use engine::{Deletion, Engine, EntryForm, Submitted};
pub use error::{LedgerError, ParseError, StorageError, SubmitError, ValidationError};
pub use format::{format_balance, format_input, format_money, format_percent};
pub use ledger::Ledger;
pub use session::EditSession;
pub use storage::{FileStore, KeyValueStore, MemoryStore, Persistence, STORAGE_KEY};
pub use summary::{EntryRow, LedgerView, Render, Summary};
pub use transaction::Transaction;
pub use undo::{DeletedEntry, Restored, UndoBuffer};
pub use validation::{MAX_DESCRIPTION_LEN, MIN_DESCRIPTION_LEN, validate};
