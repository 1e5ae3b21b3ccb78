// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

fn file_arg() -> Arg {
    Arg::new("file")
        .long("file")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Path to the gzip-compressed GnuCash ledger")
}

fn base_arg() -> Arg {
    Arg::new("base")
        .long("base")
        .default_value("EUR")
        .help("Reporting currency code")
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print a JSON array")
}

fn jsonl_flag() -> Arg {
    Arg::new("jsonl")
        .long("jsonl")
        .action(ArgAction::SetTrue)
        .help("Print one JSON object per line")
}

fn kind_arg() -> Arg {
    Arg::new("kind")
        .long("kind")
        .value_parser(["quantity", "balance", "total"])
        .default_value("balance")
        .help("Which history to derive")
}

pub fn build_cli() -> Command {
    Command::new("cashbook")
        .about("GnuCash ledger reader: accounts, balance histories, reports")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(
            Command::new("account")
                .about("Inspect accounts")
                .subcommand(
                    Command::new("list")
                        .about("List all accounts")
                        .arg(file_arg())
                        .arg(base_arg())
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("history")
                        .about("Print an account's value history")
                        .arg(file_arg())
                        .arg(base_arg())
                        .arg(
                            Arg::new("name")
                                .long("name")
                                .required(true)
                                .help("Account name"),
                        )
                        .arg(kind_arg())
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("List and display transactions")
                .subcommand(
                    Command::new("list")
                        .about("List transactions, optionally filtered by date")
                        .arg(file_arg())
                        .arg(base_arg())
                        .arg(Arg::new("from").long("from").help("Earliest date (inclusive)"))
                        .arg(Arg::new("to").long("to").help("Latest date (inclusive)"))
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                )
                .subcommand(
                    Command::new("show")
                        .about("Render one transaction as a balanced statement")
                        .arg(file_arg())
                        .arg(base_arg())
                        .arg(Arg::new("id").long("id").required(true).help("Transaction id")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived reports")
                .subcommand(
                    Command::new("balances")
                        .about("Total balance per top-level account")
                        .arg(file_arg())
                        .arg(base_arg())
                        .arg(Arg::new("date").long("date").help("As-of date (default: latest)"))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("equity")
                        .about("Consolidated net-worth series over time")
                        .arg(file_arg())
                        .arg(base_arg())
                        .arg(json_flag())
                        .arg(jsonl_flag()),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export derived data")
                .subcommand(
                    Command::new("history")
                        .about("Write an account's history to a file")
                        .arg(file_arg())
                        .arg(base_arg())
                        .arg(
                            Arg::new("name")
                                .long("name")
                                .required(true)
                                .help("Account name"),
                        )
                        .arg(kind_arg())
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_parser(["csv", "json"])
                                .default_value("csv"),
                        )
                        .arg(Arg::new("out").long("out").required(true).help("Output path")),
                ),
        )
}
