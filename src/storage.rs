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

//! Ledger persistence over a key-value store.
//!
//! The ledger is stored as one JSON document under [`STORAGE_KEY`]:
//!
//! ```json
//! {"incomes":[{"description":"Salary","amount":1500.0}],"expenses":[]}
//! ```
//!
//! Storage problems never reach the user. A failed save is logged and the
//! in-memory ledger stays authoritative; a missing or unreadable document
//! loads as an empty ledger.

use crate::base::EntryKind;
use crate::error::StorageError;
use crate::ledger::Ledger;
use crate::transaction::Transaction;
use parking_lot::Mutex;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Key the ledger document lives under.
pub const STORAGE_KEY: &str = "presupuesto_data_v1";

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Minimal durable string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
///
/// Writes go to a temporary file that is then renamed over the target, so
/// a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) the store directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.{FILE_EXTENSION}"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension(TMP_SUFFIX);
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Stored form of the ledger. Both sequences must be present.
#[derive(Debug, Deserialize)]
struct StoredLedger {
    incomes: Vec<StoredEntry>,
    expenses: Vec<StoredEntry>,
}

#[derive(Debug, Deserialize)]
struct StoredEntry {
    description: String,
    amount: f64,
}

/// Saves and loads the ledger through a [`KeyValueStore`].
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes the ledger. Failures are logged and reported as `false`.
    pub fn save(&self, ledger: &Ledger) -> bool {
        match self.try_save(ledger) {
            Ok(()) => {
                debug!(key = %self.key, entries = ledger.len(), "ledger saved");
                true
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not save ledger");
                false
            }
        }
    }

    /// Reads the ledger, falling back to an empty one on any problem.
    pub fn load(&self) -> Ledger {
        match self.try_load() {
            Ok(Some(ledger)) => {
                info!(
                    key = %self.key,
                    incomes = ledger.incomes().len(),
                    expenses = ledger.expenses().len(),
                    "ledger loaded"
                );
                ledger
            }
            Ok(None) => {
                debug!(key = %self.key, "no stored ledger, starting empty");
                Ledger::new()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read stored ledger, starting empty");
                Ledger::new()
            }
        }
    }

    fn try_save(&self, ledger: &Ledger) -> Result<(), StorageError> {
        let json = serde_json::to_string(ledger)?;
        self.store.set(&self.key, &json)
    }

    fn try_load(&self) -> Result<Option<Ledger>, StorageError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let stored: StoredLedger = serde_json::from_str(&raw)?;
        Ok(Some(Ledger::from_parts(
            hydrate(EntryKind::Income, stored.incomes),
            hydrate(EntryKind::Expense, stored.expenses),
        )))
    }
}

/// Rebuilds validated entries, skipping records that break the rules.
fn hydrate(kind: EntryKind, records: Vec<StoredEntry>) -> Vec<Transaction> {
    records
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, record)| match Transaction::from_stored(&record.description, record.amount) {
                Ok(tx) => Some(tx),
                Err(e) => {
                    warn!(%kind, index, error = %e, "skipping invalid stored entry");
                    None
                }
            },
        )
        .collect()
}
