// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::commands::load_book;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balances", sub)) => balances(sub)?,
        Some(("equity", sub)) => equity(sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct BalanceRow {
    account: String,
    r#type: String,
    balance: String,
}

fn balances(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let as_of = sub
        .get_one::<String>("date")
        .map(|s| parse_date(s))
        .transpose()?;

    let book = load_book(sub)?;
    let mut data = Vec::new();
    for root in book.root_accounts() {
        for account in root.children(&book) {
            let history = account.total_balance_history(&book)?;
            let balance = match as_of {
                Some(date) => history.value_at(date).ok(),
                None => history.last_value(),
            };
            data.push(BalanceRow {
                account: account.name.clone(),
                r#type: account.kind.as_str().to_string(),
                balance: balance
                    .map(|b| fmt_money(&b))
                    .unwrap_or_else(|| "-".to_string()),
            });
        }
    }

    if !maybe_print_json(json_flag, false, &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.account, r.r#type, r.balance])
            .collect();
        println!("{}", pretty_table(&["Account", "Type", "Balance"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct EquityRow {
    date: String,
    value: String,
}

fn equity(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let book = load_book(sub)?;
    let data: Vec<EquityRow> = book
        .equity_history()?
        .iter()
        .map(|(date, value)| EquityRow {
            date: date.to_string(),
            value: value.to_string(),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data.into_iter().map(|r| vec![r.date, r.value]).collect();
        println!("{}", pretty_table(&["Date", "Equity"], rows));
    }
    Ok(())
}
