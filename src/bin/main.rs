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

use budget_ledger::config::Config;
use budget_ledger::logging::init_tracing;
use budget_ledger::{
    Confirm, Decision, Deletion, Engine, EntryForm, EntryKind, FileStore, KeyValueStore,
    LedgerView, Prompt, Render, Submitted, UnknownKind, format_balance, format_money,
    format_percent, normalize_amount_input,
};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use thiserror::Error;
use tracing::warn;

/// Budget Ledger - track income and expenses from the terminal
///
/// Reads one command per line from stdin. Type `help` for the list.
/// The ledger is saved after every change.
#[derive(Parser, Debug)]
#[command(name = "budget-ledger")]
#[command(about = "An interactive personal budget ledger", long_about = None)]
struct Args {
    /// Directory holding the ledger file
    ///
    /// Defaults to $BUDGET_LEDGER_HOME, then the platform data directory.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Confirm deletions without asking and skip the undo offer
    #[arg(short, long)]
    yes: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing();
    let config = Config::resolve(args.data_dir, args.yes);

    let store = match FileStore::open(&config.data_dir) {
        Ok(store) => store,
        Err(e) => {
            eprintln!(
                "Error opening data directory '{}': {}",
                config.data_dir.display(),
                e
            );
            process::exit(1);
        }
    };

    let mut engine = Engine::open(store, TerminalRenderer::new(io::stdout()));
    let stdin = io::stdin();
    if let Err(e) = run_session(&mut engine, stdin.lock(), &mut io::stdout(), config.assume_yes) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

const HELP: &str = "\
commands:
  add <Ingreso|Egreso> <description...> <amount>   add an entry (or save the edit in progress)
  edit <Ingreso|Egreso> <n>                        load entry #n for editing
  cancel                                           leave edit mode
  delete <Ingreso|Egreso> <n>                      delete entry #n (asks first, offers undo)
  list                                             show totals and entries
  normalize <amount>                               show how an amount will be read
  help                                             this text
  quit                                             leave";

/// Prints the view model as plain text.
struct TerminalRenderer<W> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    fn new(out: W) -> Self {
        Self { out }
    }

    fn write_view(&mut self, view: &LedgerView) -> io::Result<()> {
        writeln!(self.out, "Available: {}", format_balance(view.available))?;
        writeln!(self.out, "Income:    +{}", format_money(view.total_income))?;
        writeln!(
            self.out,
            "Expenses:  -{} ({})",
            format_money(view.total_expense),
            format_percent(view.spend_percentage)
        )?;

        writeln!(self.out, "{}:", EntryKind::Income)?;
        for row in &view.income_entries {
            writeln!(
                self.out,
                "  #{} {}  +{}",
                row.index + 1,
                row.description,
                format_money(row.amount)
            )?;
        }

        writeln!(self.out, "{}:", EntryKind::Expense)?;
        for row in &view.expense_entries {
            let share = row.percentage.map(format_percent).unwrap_or_default();
            writeln!(
                self.out,
                "  #{} {}  -{}  {}",
                row.index + 1,
                row.description,
                format_money(row.amount),
                share
            )?;
        }
        self.out.flush()
    }
}

impl<W: Write> Render for TerminalRenderer<W> {
    fn render(&mut self, view: &LedgerView) {
        if let Err(e) = self.write_view(view) {
            warn!(error = %e, "could not render ledger");
        }
    }
}

/// Answers prompts from the next input line.
///
/// `y`/`yes`/`s`/`si` accept, `n`/`no` decline; end of input or anything
/// else dismisses.
struct LineConfirm<'a, L, O> {
    lines: &'a mut L,
    out: &'a mut O,
    assume_yes: bool,
}

impl<L, O> Confirm for LineConfirm<'_, L, O>
where
    L: Iterator<Item = io::Result<String>>,
    O: Write,
{
    fn confirm(&mut self, prompt: &Prompt) -> Decision {
        if self.assume_yes {
            return match prompt {
                Prompt::DeleteEntry { .. } => Decision::Accepted,
                Prompt::OfferUndo { .. } => Decision::Dismissed,
            };
        }

        let question = match prompt {
            Prompt::DeleteEntry {
                kind,
                description,
                amount,
            } => format!(
                "Delete {} \"{}\" {}? [y/n] ",
                kind,
                description,
                format_money(*amount)
            ),
            Prompt::OfferUndo {
                description,
                timeout,
            } => format!(
                "Deleted \"{}\". Undo? [y/n] (offer lasts {}s) ",
                description,
                timeout.as_secs()
            ),
        };
        if write!(self.out, "{question}")
            .and_then(|()| self.out.flush())
            .is_err()
        {
            return Decision::Dismissed;
        }

        match self.lines.next() {
            Some(Ok(answer)) => match answer.trim().to_lowercase().as_str() {
                "y" | "yes" | "s" | "si" | "sí" => Decision::Accepted,
                "n" | "no" => Decision::Declined,
                _ => Decision::Dismissed,
            },
            _ => Decision::Dismissed,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Kind(#[from] UnknownKind),

    #[error("entries are numbered from 1")]
    BadPosition,

    #[error("could not read line: {0}")]
    Split(String),
}

#[derive(Debug, PartialEq)]
enum Command {
    Add(EntryForm),
    Edit(EntryKind, usize),
    Cancel,
    Delete(EntryKind, usize),
    List,
    Normalize(String),
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let words = shell_words::split(line).map_err(|e| CommandError::Split(e.to_string()))?;
    let Some((name, rest)) = words.split_first() else {
        return Ok(None);
    };

    let command = match name.to_lowercase().as_str() {
        "add" => {
            let [kind, middle @ .., amount] = rest else {
                return Err(CommandError::Usage("add <Ingreso|Egreso> <description> <amount>"));
            };
            Command::Add(EntryForm::new(kind.parse()?, middle.join(" "), amount.as_str()))
        }
        "edit" => {
            let [kind, position] = rest else {
                return Err(CommandError::Usage("edit <Ingreso|Egreso> <n>"));
            };
            Command::Edit(kind.parse()?, parse_position(position)?)
        }
        "delete" => {
            let [kind, position] = rest else {
                return Err(CommandError::Usage("delete <Ingreso|Egreso> <n>"));
            };
            Command::Delete(kind.parse()?, parse_position(position)?)
        }
        "normalize" => Command::Normalize(rest.join(" ")),
        "cancel" => Command::Cancel,
        "list" => Command::List,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Turns a 1-based position into an index.
fn parse_position(text: &str) -> Result<usize, CommandError> {
    match text.trim_start_matches('#').parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::BadPosition),
    }
}

/// Runs commands from `input` until `quit` or end of input.
///
/// Problems with a single command are reported on `out` and the session
/// continues; only I/O errors end it.
fn run_session<S, Rn, I, O>(
    engine: &mut Engine<S, Rn>,
    input: I,
    out: &mut O,
    assume_yes: bool,
) -> io::Result<()>
where
    S: KeyValueStore,
    Rn: Render,
    I: BufRead,
    O: Write,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match command {
            Command::Add(form) => match engine.submit(&form) {
                Ok(Submitted::Added { kind, index }) => {
                    writeln!(out, "{} #{} added", kind, index + 1)?
                }
                Ok(Submitted::Updated { kind, index }) => {
                    writeln!(out, "{} #{} updated", kind, index + 1)?
                }
                Ok(Submitted::Moved { to, index, .. }) => {
                    writeln!(out, "moved to {} #{}", to, index + 1)?
                }
                Err(e) => writeln!(out, "Invalid entry: {}", e)?,
            },
            Command::Edit(kind, index) => match engine.begin_edit(kind, index) {
                Ok(form) => writeln!(
                    out,
                    "editing {} #{}: \"{}\" {} (submit with `add`, or `cancel`)",
                    form.kind,
                    index + 1,
                    form.description,
                    form.amount
                )?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Cancel => {
                engine.cancel_edit();
                writeln!(out, "edit cancelled")?;
            }
            Command::Delete(kind, index) => {
                let mut confirm = LineConfirm {
                    lines: &mut lines,
                    out: &mut *out,
                    assume_yes,
                };
                match engine.delete(kind, index, &mut confirm) {
                    Ok(Deletion::Cancelled) => writeln!(out, "nothing deleted")?,
                    Ok(Deletion::Deleted(tx)) => writeln!(out, "deleted \"{}\"", tx.description())?,
                    Ok(Deletion::Restored(tx)) => {
                        writeln!(out, "restored \"{}\"", tx.description())?
                    }
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            Command::List => {
                let view = engine.view();
                engine.renderer_mut().render(&view);
            }
            Command::Normalize(raw) => match normalize_amount_input(&raw) {
                Some(amount) => writeln!(out, "{}", amount)?,
                None => writeln!(out, "not an amount")?,
            },
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break,
        }
    }

    out.flush()
}
