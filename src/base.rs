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

//! Entry kind, the first half of every ledger address.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the two ledger sequences an entry lives in.
///
/// The wire names are the ones the input form submits (`Ingreso` /
/// `Egreso`); English aliases are accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum EntryKind {
    #[serde(rename = "Ingreso", alias = "income")]
    Income,
    #[serde(rename = "Egreso", alias = "expense")]
    Expense,
}

impl EntryKind {
    pub const ALL: [EntryKind; 2] = [EntryKind::Income, EntryKind::Expense];

    /// Name used by the input surface.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Ingreso",
            Self::Expense => "Egreso",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entry kind `{0}` (expected Ingreso or Egreso)")]
pub struct UnknownKind(pub String);

impl FromStr for EntryKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ingreso" | "income" => Ok(Self::Income),
            "egreso" | "expense" => Ok(Self::Expense),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}
