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

//! Ledger orchestration.
//!
//! The [`Engine`] owns the ledger together with the edit session, the undo
//! buffer, persistence and the renderer, and runs every user action
//! through them in a fixed order:
//!
//! - **Submit**: validate → add, update or move → save → render.
//! - **Delete**: confirm → remove + capture for undo → save → render →
//!   offer undo → restore (save → render again) or discard.
//!
//! # Single writer
//!
//! Every mutating method takes `&mut self` and runs to completion. The only
//! place the engine waits is inside the [`Confirm`] collaborator, and the
//! ledger is not touched while it does.

use crate::base::EntryKind;
use crate::confirm::{Confirm, Prompt, UNDO_OFFER_TIMEOUT};
use crate::error::{LedgerError, SubmitError};
use crate::format::format_input;
use crate::ledger::Ledger;
use crate::session::EditSession;
use crate::storage::{KeyValueStore, Persistence};
use crate::summary::{LedgerView, Render, Summary};
use crate::transaction::Transaction;
use crate::undo::{Restored, UndoBuffer};
use tracing::{debug, warn};

/// What the input form submits. The amount is raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    pub kind: EntryKind,
    pub description: String,
    pub amount: String,
}

impl EntryForm {
    pub fn new(kind: EntryKind, description: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            amount: amount.into(),
        }
    }
}

/// Where a successful submit put the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Added { kind: EntryKind, index: usize },
    Updated { kind: EntryKind, index: usize },
    /// The edit changed the kind; the entry is now last in `to`.
    Moved {
        from: EntryKind,
        to: EntryKind,
        index: usize,
    },
}

/// How a delete request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    /// The confirmation was declined; nothing changed.
    Cancelled,
    /// Removed and the undo offer was not taken.
    Deleted(Transaction),
    /// Removed, then put back at its original position.
    Restored(Transaction),
}

pub struct Engine<S, R> {
    ledger: Ledger,
    session: EditSession,
    undo: UndoBuffer,
    persistence: Persistence<S>,
    renderer: R,
}

impl<S, R> Engine<S, R>
where
    S: KeyValueStore,
    R: Render,
{
    /// Hydrates the ledger from `store` and renders it once.
    pub fn open(store: S, renderer: R) -> Self {
        Self::with_persistence(Persistence::new(store), renderer)
    }

    pub fn with_persistence(persistence: Persistence<S>, renderer: R) -> Self {
        let ledger = persistence.load();
        let mut engine = Engine {
            ledger,
            session: EditSession::Idle,
            undo: UndoBuffer::new(),
            persistence,
            renderer,
        };
        engine.render();
        engine
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn session(&self) -> EditSession {
        self.session
    }

    pub fn undo_buffer(&self) -> &UndoBuffer {
        &self.undo
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(&self.ledger)
    }

    pub fn view(&self) -> LedgerView {
        LedgerView::build(&self.ledger)
    }

    /// Applies a submitted form.
    ///
    /// While idle the entry is appended to its kind. While editing, the
    /// edited entry is replaced in place when the kind is unchanged, or
    /// moved to the end of the other sequence when it changed.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Invalid`] - the form broke a rule. An active edit
    ///   session stays open so the form can be corrected.
    /// - [`SubmitError::EntryNotFound`] - the edit session went stale. The
    ///   session is closed and the ledger is unchanged.
    pub fn submit(&mut self, form: &EntryForm) -> Result<Submitted, SubmitError> {
        let transaction = Transaction::parse(&form.description, &form.amount)?;

        let outcome = match self.session.finish() {
            None => {
                self.ledger.add(form.kind, transaction);
                Submitted::Added {
                    kind: form.kind,
                    index: self.ledger.list(form.kind).len() - 1,
                }
            }
            Some((kind, index)) if kind == form.kind => {
                self.ledger
                    .update(kind, index, transaction)
                    .inspect_err(|e| warn!(%kind, index, error = %e, "edit session went stale"))?;
                Submitted::Updated { kind, index }
            }
            Some((from, index)) => {
                self.ledger
                    .move_entry(from, index, form.kind, transaction)
                    .inspect_err(|e| warn!(kind = %from, index, error = %e, "edit session went stale"))?;
                Submitted::Moved {
                    from,
                    to: form.kind,
                    index: self.ledger.list(form.kind).len() - 1,
                }
            }
        };

        debug!(?outcome, "entry submitted");
        self.commit();
        Ok(outcome)
    }

    /// Starts editing the entry at `index` of `kind` and returns the form
    /// pre-filled with its current values.
    ///
    /// # Errors
    ///
    /// [`LedgerError::EntryNotFound`] if there is no such entry; the session
    /// is left as it was.
    pub fn begin_edit(&mut self, kind: EntryKind, index: usize) -> Result<EntryForm, LedgerError> {
        let transaction = self
            .ledger
            .get(kind, index)
            .ok_or(LedgerError::EntryNotFound { kind, index })?;
        let form = EntryForm::new(
            kind,
            transaction.description(),
            format_input(transaction.amount()),
        );
        self.session.begin(kind, index);
        debug!(%kind, index, "edit started");
        Ok(form)
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel();
    }

    /// Full delete flow: confirm, remove, offer undo.
    ///
    /// A declined or dismissed confirmation aborts before anything changes.
    /// Once removed, only an accepted undo offer brings the entry back; any
    /// other answer discards the undo buffer.
    ///
    /// # Errors
    ///
    /// [`LedgerError::EntryNotFound`] if there is no such entry. Nothing is
    /// asked in that case.
    pub fn delete<C>(
        &mut self,
        kind: EntryKind,
        index: usize,
        confirm: &mut C,
    ) -> Result<Deletion, LedgerError>
    where
        C: Confirm + ?Sized,
    {
        let target = self
            .ledger
            .get(kind, index)
            .ok_or(LedgerError::EntryNotFound { kind, index })?;

        let prompt = Prompt::DeleteEntry {
            kind,
            description: target.description().to_string(),
            amount: target.amount(),
        };
        if !confirm.confirm(&prompt).is_accepted() {
            debug!(%kind, index, "delete cancelled");
            return Ok(Deletion::Cancelled);
        }

        let removed = self.remove(kind, index)?;

        let offer = Prompt::OfferUndo {
            description: removed.description().to_string(),
            timeout: UNDO_OFFER_TIMEOUT,
        };
        if confirm.confirm(&offer).is_accepted() {
            if let Some(restored) = self.undo() {
                return Ok(Deletion::Restored(restored.transaction));
            }
        } else {
            self.undo.discard();
        }
        Ok(Deletion::Deleted(removed))
    }

    /// Removes an entry without asking, keeping it in the undo buffer.
    ///
    /// # Errors
    ///
    /// [`LedgerError::EntryNotFound`] if `index` is out of bounds.
    pub fn remove(&mut self, kind: EntryKind, index: usize) -> Result<Transaction, LedgerError> {
        let removed = self.ledger.remove(kind, index)?;
        self.undo.capture(kind, removed.clone(), index);
        debug!(%kind, index, "entry removed");
        self.commit();
        Ok(removed)
    }

    /// Puts the last removed entry back. `None` when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> Option<Restored> {
        let restored = self.undo.restore(&mut self.ledger)?;
        debug!(kind = %restored.kind, index = restored.index, "entry restored");
        self.commit();
        Some(restored)
    }

    /// Forgets the last removed entry.
    pub fn dismiss_undo(&mut self) {
        self.undo.discard();
    }

    fn commit(&mut self) {
        self.persistence.save(&self.ledger);
        self.render();
    }

    fn render(&mut self) {
        let view = LedgerView::build(&self.ledger);
        self.renderer.render(&view);
    }
}
