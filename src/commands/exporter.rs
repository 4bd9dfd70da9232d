// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::arg_str;
use anyhow::{Result, bail};
use rusqlite::Connection;

// Input columns come first so an exported CSV can be imported again.
const SALES_HEADER: [&str; 11] = [
    "date",
    "customer",
    "bird_type",
    "quantity",
    "gross_weight",
    "discount_weight",
    "unit_price",
    "amount_paid",
    "net_weight",
    "amount_due",
    "balance",
];

const EXPENSES_HEADER: [&str; 5] = ["date", "calculation", "description", "category", "amount"];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("sales", sub)) => export_sales(conn, sub),
        Some(("expenses", sub)) => export_expenses(conn, sub),
        _ => Ok(()),
    }
}

fn export_format(sub: &clap::ArgMatches) -> Result<String> {
    let fmt = arg_str(sub, "format")?.to_lowercase();
    match fmt.as_str() {
        "csv" | "json" => Ok(fmt),
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
}

fn export_sales(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = export_format(sub)?;
    let out = arg_str(sub, "out")?;
    let mut sales = store::list_sales(conn)?;
    sales.sort_by_key(|s| s.date());

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record(SALES_HEADER)?;
        for s in &sales {
            wtr.write_record([
                s.date().to_string(),
                s.customer().to_string(),
                s.bird_type().as_str().to_string(),
                s.quantity().to_string(),
                s.gross_weight().to_string(),
                s.discount_weight().to_string(),
                s.unit_price().to_string(),
                s.amount_paid().to_string(),
                s.net_weight().to_string(),
                s.amount_due().to_string(),
                s.balance().to_string(),
            ])?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&sales)?)?;
    }
    println!("Exported {} sale(s) to {}", sales.len(), out);
    Ok(())
}

fn export_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = export_format(sub)?;
    let out = arg_str(sub, "out")?;
    let mut expenses = store::list_expenses(conn)?;
    expenses.sort_by_key(|e| e.date);

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record(EXPENSES_HEADER)?;
        for e in &expenses {
            wtr.write_record([
                e.date.to_string(),
                e.calculation.to_string(),
                e.description.clone(),
                e.category.as_str().to_string(),
                e.amount.to_string(),
            ])?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&expenses)?)?;
    }
    println!("Exported {} expense(s) to {}", expenses.len(), out);
    Ok(())
}
