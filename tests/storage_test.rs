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

//! File-backed persistence tests.

use budget_ledger::{
    Engine, EntryForm, EntryKind, FileStore, KeyValueStore, Persistence, STORAGE_KEY,
};
use rust_decimal_macros::dec;
use std::fs;
use tempfile::TempDir;

fn store() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path().join("ledger")).unwrap();
    (dir, store)
}

#[test]
fn open_creates_directory() {
    let (dir, store) = store();
    assert!(store.root().is_dir());
    assert!(store.root().starts_with(dir.path()));
}

#[test]
fn missing_key_reads_as_none() {
    let (_dir, store) = store();
    assert!(store.get(STORAGE_KEY).unwrap().is_none());
}

#[test]
fn set_overwrites_and_leaves_no_temp_file() {
    let (_dir, store) = store();
    store.set("k", "first").unwrap();
    store.set("k", "second").unwrap();

    assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    let names: Vec<_> = fs::read_dir(store.root())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, ["k.json"]);
}

#[test]
fn ledger_survives_restart() {
    let (_dir, store) = store();
    let root = store.root().to_path_buf();

    let mut engine = Engine::open(store, ());
    engine
        .submit(&EntryForm::new(EntryKind::Income, "Sueldo", "1.500,00"))
        .unwrap();
    engine
        .submit(&EntryForm::new(EntryKind::Expense, "Alquiler", "700,5"))
        .unwrap();
    let saved = engine.ledger().clone();
    drop(engine);

    let reopened = Engine::open(FileStore::open(&root).unwrap(), ());
    assert_eq!(reopened.ledger(), &saved);
    assert_eq!(reopened.summary().available, dec!(799.50));
}

#[test]
fn stored_document_uses_numeric_amounts() {
    let (_dir, store) = store();
    let path = store.path_for(STORAGE_KEY);

    let mut engine = Engine::open(store, ());
    engine
        .submit(&EntryForm::new(EntryKind::Expense, "Alquiler", "700.5"))
        .unwrap();

    let raw = fs::read_to_string(path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["incomes"], serde_json::json!([]));
    assert_eq!(json["expenses"][0]["description"], "Alquiler");
    assert_eq!(json["expenses"][0]["amount"], 700.5);
}

#[test]
fn corrupt_file_loads_empty() {
    let (_dir, store) = store();
    fs::write(store.path_for(STORAGE_KEY), "{not json").unwrap();

    let persistence = Persistence::new(store);
    assert!(persistence.load().is_empty());
}

#[test]
fn invalid_records_are_skipped() {
    let (_dir, store) = store();
    fs::write(
        store.path_for(STORAGE_KEY),
        r#"{"incomes":[{"description":"ok","amount":5},{"description":"Bonus","amount":50}],
            "expenses":[{"description":"Huge","amount":20000000},{"description":"Food","amount":12.346}]}"#,
    )
    .unwrap();

    let ledger = Persistence::new(store).load();
    assert_eq!(ledger.incomes().len(), 1);
    assert_eq!(ledger.incomes()[0].description(), "Bonus");
    assert_eq!(ledger.expenses().len(), 1);
    assert_eq!(ledger.expenses()[0].amount(), dec!(12.35));
}
