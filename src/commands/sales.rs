// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::models::{BirdType, SaleInput, SaleRecord, is_known_customer};
use crate::store;
use crate::utils::{arg_str, date_or_today, fmt_money, maybe_print_json, parse_money, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("clear", sub)) => clear(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let input = sale_input_from_args(sub)?;
    input.validate()?;
    if !is_known_customer(&input.customer) {
        tracing::warn!(customer = %input.customer, "customer is not on the roster");
    }
    let sale = SaleRecord::new(input);
    store::insert_sale(conn, &sale)?;
    println!(
        "Recorded sale to '{}' on {}: due {}, paid {}, balance {}",
        sale.customer(),
        sale.date(),
        fmt_money(sale.amount_due()),
        fmt_money(sale.amount_paid()),
        fmt_money(sale.balance())
    );
    Ok(())
}

pub fn sale_input_from_args(sub: &clap::ArgMatches) -> Result<SaleInput> {
    let bird_type = arg_str(sub, "bird")?.parse::<BirdType>()?;
    let quantity = *sub.get_one::<u32>("quantity").context("Missing --quantity")?;
    Ok(SaleInput {
        date: date_or_today(sub)?,
        customer: arg_str(sub, "customer")?.to_string(),
        bird_type,
        quantity,
        gross_weight: parse_money(arg_str(sub, "gross")?)?,
        discount_weight: parse_money(arg_str(sub, "discount")?)?,
        unit_price: parse_money(arg_str(sub, "price")?)?,
        amount_paid: parse_money(arg_str(sub, "paid")?)?,
    })
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_sales(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No sales recorded yet.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|s| {
            vec![
                s.date().to_string(),
                s.customer().to_string(),
                s.bird_type().to_string(),
                s.quantity().to_string(),
                format!("{:.2}", s.gross_weight()),
                format!("{:.2}", s.discount_weight()),
                format!("{:.2}", s.net_weight()),
                fmt_money(s.unit_price()),
                fmt_money(s.amount_due()),
                fmt_money(s.amount_paid()),
                fmt_money(s.balance()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Date", "Customer", "Type", "Qty", "Lbs", "Discount", "Net Lbs", "Price", "Due",
                "Paid", "Balance",
            ],
            rows,
        )
    );
    let totals = SalesTotals::from_sales(&data);
    println!(
        "{}",
        pretty_table(
            &["Total Sales", "Payments Received", "Outstanding"],
            vec![vec![
                fmt_money(totals.amount_due),
                fmt_money(totals.amount_paid),
                fmt_money(totals.outstanding),
            ]],
        )
    );
    Ok(())
}

/// Stored sales after the `--customer` / `--limit` filters.
pub fn query_sales(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<SaleRecord>> {
    let mut data = store::list_sales(conn)?;
    if let Some(customer) = sub.get_one::<String>("customer") {
        let customer = customer.trim();
        data.retain(|s| s.customer() == customer);
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}

fn clear(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        return Err(LedgerError::ConfirmationRequired("sales").into());
    }
    let n = store::clear_sales(conn)?;
    println!("Deleted {} sale(s)", n);
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SalesTotals {
    pub amount_due: Decimal,
    pub amount_paid: Decimal,
    pub outstanding: Decimal,
}

impl SalesTotals {
    pub fn from_sales(sales: &[SaleRecord]) -> Self {
        sales.iter().fold(SalesTotals::default(), |acc, s| SalesTotals {
            amount_due: acc.amount_due + s.amount_due(),
            amount_paid: acc.amount_paid + s.amount_paid(),
            outstanding: acc.outstanding + s.balance(),
        })
    }
}
