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

//! Confirmation collaborator.
//!
//! The engine asks before deleting and offers an undo right after. Both are
//! blocking calls; nothing else touches the ledger until they return.
//! A prompt that is closed or times out counts as "no".

use crate::base::EntryKind;
use rust_decimal::Decimal;
use std::time::Duration;

/// How long an undo offer stays up before it is dismissed.
pub const UNDO_OFFER_TIMEOUT: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Asked before an entry is removed.
    DeleteEntry {
        kind: EntryKind,
        description: String,
        amount: Decimal,
    },
    /// Offered once an entry has been removed.
    OfferUndo {
        description: String,
        timeout: Duration,
    },
}

/// The user's answer to a [`Prompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Declined,
    /// Closed or timed out without an answer.
    Dismissed,
}

impl Decision {
    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}

impl From<bool> for Decision {
    fn from(accepted: bool) -> Self {
        if accepted {
            Self::Accepted
        } else {
            Self::Declined
        }
    }
}

pub trait Confirm {
    fn confirm(&mut self, prompt: &Prompt) -> Decision;
}

impl<F> Confirm for F
where
    F: FnMut(&Prompt) -> Decision,
{
    fn confirm(&mut self, prompt: &Prompt) -> Decision {
        self(prompt)
    }
}
