// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::commands::{history_of_kind, load_book};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(sub)?,
        Some(("history", sub)) => history(sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct AccountRow {
    name: String,
    r#type: String,
    commodity: String,
    parent: String,
}

fn list(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let book = load_book(sub)?;

    let data: Vec<AccountRow> = book
        .accounts()
        .into_iter()
        .map(|account| AccountRow {
            name: account.name.clone(),
            r#type: account.kind.as_str().to_string(),
            commodity: account.commodity_id.to_string(),
            parent: account
                .parent(&book)
                .map(|parent| parent.name.clone())
                .unwrap_or_default(),
        })
        .collect();

    if !maybe_print_json(json_flag, false, &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.name, r.r#type, r.commodity, r.parent])
            .collect();
        println!(
            "{}",
            pretty_table(&["Account", "Type", "Commodity", "Parent"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct HistoryRow {
    date: String,
    value: String,
}

fn history(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let name = sub.get_one::<String>("name").unwrap();
    let kind = sub.get_one::<String>("kind").unwrap();

    let book = load_book(sub)?;
    let account = book.account_by_name(name)?;
    let history = history_of_kind(&book, account, kind)?;

    let data: Vec<HistoryRow> = history
        .iter()
        .map(|(date, value)| HistoryRow {
            date: date.to_string(),
            value: value.to_string(),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data.into_iter().map(|r| vec![r.date, r.value]).collect();
        println!("{}", pretty_table(&["Date", "Value"], rows));
    }
    Ok(())
}
