// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use crate::commands::{history_of_kind, load_book};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("history", sub)) => export_history(sub),
        _ => Ok(()),
    }
}

fn export_history(sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind = sub.get_one::<String>("kind").unwrap();
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let book = load_book(sub)?;
    let account = book.account_by_name(name)?;
    let history = history_of_kind(&book, account, kind)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "value"])?;
            for (date, value) in history.iter() {
                wtr.write_record([date.to_string(), value.to_string()])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = history
                .iter()
                .map(|(date, value)| {
                    json!({ "date": date.to_string(), "value": value.to_string() })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported {} history for '{}' to {}", kind, name, out);
    Ok(())
}
