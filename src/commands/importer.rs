// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! CSV import. A file is imported entirely or not at all.
//!
//! Sales columns: `date,customer,bird_type,quantity,gross_weight,discount_weight,unit_price,amount_paid`
//! Expense columns: `date,calculation,description,category,amount`
//!
//! Amount columns may carry display formatting (`$1,234.50`); it is
//! stripped here so only plain decimals reach the store.

use crate::models::{
    BirdType, ExpenseCategory, ExpenseRecord, SaleInput, SaleRecord, is_known_customer,
};
use crate::store;
use crate::utils::{arg_str, parse_date, parse_money};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("sales", sub)) => import_sales(conn, sub),
        Some(("expenses", sub)) => import_expenses(conn, sub),
        _ => Ok(()),
    }
}

fn field<'a>(rec: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str> {
    rec.get(idx)
        .map(str::trim)
        .with_context(|| format!("{} missing", name))
}

fn optional_money(rec: &StringRecord, idx: usize) -> Result<Decimal> {
    match rec.get(idx).map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_money(raw),
        None => Ok(Decimal::ZERO),
    }
}

fn import_sales(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = arg_str(sub, "path")?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut count = 0usize;
    for (i, result) in rdr.records().enumerate() {
        let line = i + 2;
        let rec = result?;
        let input = sale_from_record(&rec).with_context(|| format!("{} line {}", path, line))?;
        input
            .validate()
            .with_context(|| format!("{} line {}", path, line))?;
        if !is_known_customer(&input.customer) {
            tracing::warn!(customer = %input.customer, line, "customer is not on the roster");
        }
        store::insert_sale(&tx, &SaleRecord::new(input))?;
        count += 1;
    }
    tx.commit()?;
    tracing::info!(count, path, "sales imported");
    println!("Imported {} sale(s) from {}", count, path);
    Ok(())
}

fn sale_from_record(rec: &StringRecord) -> Result<SaleInput> {
    let date = parse_date(field(rec, 0, "date")?)?;
    let customer = field(rec, 1, "customer")?.to_string();
    let bird_type = field(rec, 2, "bird_type")?.parse::<BirdType>()?;
    let quantity_raw = field(rec, 3, "quantity")?;
    let quantity = quantity_raw
        .parse::<u32>()
        .with_context(|| format!("Invalid quantity '{}'", quantity_raw))?;
    Ok(SaleInput {
        date,
        customer,
        bird_type,
        quantity,
        gross_weight: parse_money(field(rec, 4, "gross_weight")?)?,
        discount_weight: optional_money(rec, 5)?,
        unit_price: parse_money(field(rec, 6, "unit_price")?)?,
        amount_paid: optional_money(rec, 7)?,
    })
}

fn import_expenses(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = arg_str(sub, "path")?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut count = 0usize;
    for (i, result) in rdr.records().enumerate() {
        let line = i + 2;
        let rec = result?;
        let expense =
            expense_from_record(&rec).with_context(|| format!("{} line {}", path, line))?;
        expense
            .validate()
            .with_context(|| format!("{} line {}", path, line))?;
        store::insert_expense(&tx, &expense)?;
        count += 1;
    }
    tx.commit()?;
    tracing::info!(count, path, "expenses imported");
    println!("Imported {} expense(s) from {}", count, path);
    Ok(())
}

fn expense_from_record(rec: &StringRecord) -> Result<ExpenseRecord> {
    let category = match rec.get(3).map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw.parse::<ExpenseCategory>()?,
        None => ExpenseCategory::Food,
    };
    Ok(ExpenseRecord {
        date: parse_date(field(rec, 0, "date")?)?,
        calculation: optional_money(rec, 1)?,
        description: rec.get(2).unwrap_or("").trim().to_string(),
        category,
        amount: parse_money(field(rec, 4, "amount")?)?,
    })
}
