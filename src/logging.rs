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

//! Tracing setup.

use std::sync::Once;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "budget_ledger=info";

static INIT_TRACING: Once = Once::new();

/// Installs the global subscriber once. Logs go to stderr; `RUST_LOG`
/// overrides the default `budget_ledger=info` filter.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        install(filter);
    });
}

/// Returns `false` when another global subscriber (tests, an embedding
/// application) is already in place; that one is kept.
fn install(filter: EnvFilter) -> bool {
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            debug!(error = %e, "tracing subscriber already installed, keeping it");
            false
        }
    }
}
