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

//! Aggregates and the render view model.
//!
//! Everything here is a pure function of the [`Ledger`]. Percentages are
//! zero whenever there is no income, so nothing divides by zero.

use crate::base::EntryKind;
use crate::ledger::Ledger;
use crate::transaction::Transaction;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Totals derived from the current ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// `total_income - total_expense`; negative when overspent.
    pub available: Decimal,
    /// Share of income already spent, `0..` (may exceed 100).
    pub spend_percentage: Decimal,
}

impl Summary {
    pub fn compute(ledger: &Ledger) -> Self {
        let total_income = sum(ledger.incomes());
        let total_expense = sum(ledger.expenses());
        Self {
            total_income,
            total_expense,
            available: total_income - total_expense,
            spend_percentage: share_of(total_expense, total_income),
        }
    }

    /// Share of income taken by a single expense amount.
    pub fn share_of_income(&self, amount: Decimal) -> Decimal {
        share_of(amount, self.total_income)
    }
}

fn sum(entries: &[Transaction]) -> Decimal {
    entries.iter().map(Transaction::amount).sum()
}

fn share_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        part / whole * dec!(100)
    } else {
        Decimal::ZERO
    }
}

/// One row of a rendered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRow {
    pub kind: EntryKind,
    /// Position in its sequence; what edit/delete address.
    pub index: usize,
    pub description: String,
    pub amount: Decimal,
    /// Share of total income, expenses only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
}

/// Everything a renderer needs, as plain values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    pub available: Decimal,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub spend_percentage: Decimal,
    pub income_entries: Vec<EntryRow>,
    pub expense_entries: Vec<EntryRow>,
}

impl LedgerView {
    pub fn build(ledger: &Ledger) -> Self {
        let summary = Summary::compute(ledger);

        let income_entries = ledger
            .incomes()
            .iter()
            .enumerate()
            .map(|(index, tx)| EntryRow {
                kind: EntryKind::Income,
                index,
                description: tx.description().to_string(),
                amount: tx.amount(),
                percentage: None,
            })
            .collect();

        let expense_entries = ledger
            .expenses()
            .iter()
            .enumerate()
            .map(|(index, tx)| EntryRow {
                kind: EntryKind::Expense,
                index,
                description: tx.description().to_string(),
                amount: tx.amount(),
                percentage: Some(summary.share_of_income(tx.amount())),
            })
            .collect();

        Self {
            available: summary.available,
            total_income: summary.total_income,
            total_expense: summary.total_expense,
            spend_percentage: summary.spend_percentage,
            income_entries,
            expense_entries,
        }
    }
}

/// Render collaborator, notified with a fresh view after every change.
pub trait Render {
    fn render(&mut self, view: &LedgerView);
}

/// Headless use: nothing to draw.
impl Render for () {
    fn render(&mut self, _view: &LedgerView) {}
}

impl<F> Render for F
where
    F: FnMut(&LedgerView),
{
    fn render(&mut self, view: &LedgerView) {
        self(view)
    }
}
