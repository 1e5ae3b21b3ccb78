// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::commands::load_book;
use crate::utils::{maybe_print_json, parse_date, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(sub)?,
        Some(("show", sub)) => show(sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct TransactionRow {
    date: String,
    description: String,
    positions: usize,
    id: String,
}

fn list(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let from = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s))
        .transpose()?;
    let to = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s))
        .transpose()?;

    let book = load_book(sub)?;
    let data: Vec<TransactionRow> = book
        .transactions_between(from, to)
        .into_iter()
        .map(|transaction| TransactionRow {
            date: transaction.date.to_string(),
            description: transaction.description.clone(),
            positions: transaction.positions().len(),
            id: transaction.id.to_string(),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.date, r.description, r.positions.to_string(), r.id])
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Positions", "Id"], rows)
        );
    }
    Ok(())
}

fn show(sub: &clap::ArgMatches) -> Result<()> {
    let raw_id = sub.get_one::<String>("id").unwrap();
    let id = Uuid::parse_str(raw_id.trim())
        .with_context(|| format!("Invalid transaction id '{}'", raw_id))?;

    let book = load_book(sub)?;
    let transaction = book
        .transactions()
        .iter()
        .find(|transaction| transaction.id == id)
        .with_context(|| format!("No transaction with id {}", id))?;

    println!("{}", transaction.statement(&book)?);
    Ok(())
}
