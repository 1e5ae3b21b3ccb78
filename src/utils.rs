// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::errors::{LedgerError, LedgerResult};

/// Parse a GnuCash rational amount ("1234/100"; plain integers allowed) into
/// an exact decimal. Monetary fields never go through binary floats.
pub fn parse_fraction(s: &str) -> LedgerResult<Decimal> {
    let parse_part = |part: &str| {
        part.trim()
            .parse::<Decimal>()
            .map_err(|_| LedgerError::Malformed(format!("Invalid rational amount '{s}'")))
    };
    match s.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator = parse_part(numerator)?;
            let denominator = parse_part(denominator)?;
            if denominator.is_zero() {
                return Err(LedgerError::Malformed(format!(
                    "Zero denominator in rational amount '{s}'"
                )));
            }
            Ok(numerator / denominator)
        }
        None => parse_part(s),
    }
}

/// Date portion of an ISO 8601 timestamp ("2023-01-05 10:59:00 +0000").
/// Time of day and timezone are discarded.
pub fn parse_iso_date(s: &str) -> LedgerResult<NaiveDate> {
    let s = s.trim();
    let prefix = s
        .get(..10)
        .ok_or_else(|| LedgerError::Malformed(format!("Invalid date '{s}'")))?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .map_err(|_| LedgerError::Malformed(format!("Invalid date '{s}'")))
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rational_amounts_parse_exactly() {
        assert_eq!(parse_fraction("-5000/100").unwrap(), Decimal::new(-50, 0));
        assert_eq!(parse_fraction("1/8").unwrap(), Decimal::new(125, 3));
        assert_eq!(parse_fraction("42").unwrap(), Decimal::from(42));
        assert!(parse_fraction("10/0").is_err());
        assert!(parse_fraction("ten/100").is_err());
    }

    #[test]
    fn iso_timestamps_keep_only_the_date() {
        let parsed = parse_iso_date("2023-01-05 10:59:00 +0000").unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
        assert!(parse_iso_date("2023-01").is_err());
        assert!(parse_iso_date("not-a-date!").is_err());
    }
}
