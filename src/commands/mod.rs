// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::book::Book;
use crate::history::ValueHistory;
use crate::models::{Account, CommodityId};

pub mod accounts;
pub mod exporter;
pub mod reports;
pub mod transactions;

pub(crate) fn load_book(sub: &ArgMatches) -> Result<Book> {
    let path = sub.get_one::<PathBuf>("file").unwrap();
    let base = sub.get_one::<String>("base").unwrap().to_uppercase();
    Book::load_with_base(path, CommodityId::currency(&base))
        .with_context(|| format!("Load ledger {}", path.display()))
}

pub(crate) fn history_of_kind(
    book: &Book,
    account: &Account,
    kind: &str,
) -> Result<ValueHistory> {
    let history = match kind {
        "quantity" => account.quantity_history(book),
        "balance" => account.balance_history(book)?,
        "total" => account.total_balance_history(book)?,
        _ => anyhow::bail!("Unknown history kind '{}' (use quantity|balance|total)", kind),
    };
    Ok(history)
}
