// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use cashbook::{cli, commands};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("account", sub)) => commands::accounts::handle(sub)?,
        Some(("tx", sub)) => commands::transactions::handle(sub)?,
        Some(("report", sub)) => commands::reports::handle(sub)?,
        Some(("export", sub)) => commands::exporter::handle(sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
