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

//! Where the ledger lives on disk.
//!
//! Resolution order for the data directory:
//!
//! 1. an explicit path (the `--data-dir` flag),
//! 2. the `BUDGET_LEDGER_HOME` environment variable,
//! 3. the platform data directory (`~/.local/share/budget-ledger` on Linux),
//! 4. `./.budget-ledger` when the platform has none.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

pub const HOME_ENV: &str = "BUDGET_LEDGER_HOME";

const APP_DIR_NAME: &str = "budget-ledger";
const FALLBACK_DIR_NAME: &str = ".budget-ledger";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Answer "yes" to delete confirmations and "no" to undo offers
    /// without asking.
    pub assume_yes: bool,
}

impl Config {
    /// Resolves the configuration from an optional explicit directory and
    /// the process environment.
    pub fn resolve(data_dir: Option<PathBuf>, assume_yes: bool) -> Self {
        Self {
            data_dir: resolve_data_dir(data_dir, env::var_os(HOME_ENV)),
            assume_yes,
        }
    }
}

fn resolve_data_dir(explicit: Option<PathBuf>, from_env: Option<OsString>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    if let Some(dir) = from_env.filter(|value| !value.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|base| base.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR_NAME))
}
