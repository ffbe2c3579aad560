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

//! Edit-session state machine.
//!
//! ```text
//!  Idle ──begin(kind, index)──► Editing { kind, index }
//!   ▲                                 │
//!   └──────── submit ok / cancel ─────┘
//! ```
//!
//! The index is captured when editing starts. If the ledger changes by some
//! other path while editing, it may point at a different entry or past the
//! end; the engine checks bounds again on submit.

use crate::base::EntryKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing { kind: EntryKind, index: usize },
}

impl EditSession {
    /// Enters editing for the entry at `index` of `kind`, replacing any
    /// session already in progress.
    pub fn begin(&mut self, kind: EntryKind, index: usize) {
        *self = Self::Editing { kind, index };
    }

    /// Leaves editing without applying anything.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Returns the edit target and resets to `Idle`.
    pub fn finish(&mut self) -> Option<(EntryKind, usize)> {
        let target = self.target();
        *self = Self::Idle;
        target
    }

    pub fn target(&self) -> Option<(EntryKind, usize)> {
        match *self {
            Self::Idle => None,
            Self::Editing { kind, index } => Some((kind, index)),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }
}
