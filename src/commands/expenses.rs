// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::models::{ExpenseCategory, ExpenseRecord};
use crate::store;
use crate::utils::{arg_str, date_or_today, fmt_money, maybe_print_json, parse_money, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

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
    let calculation = match sub.get_one::<String>("calculation") {
        Some(raw) => parse_money(raw)?,
        None => Decimal::ZERO,
    };
    let expense = ExpenseRecord {
        date: date_or_today(sub)?,
        calculation,
        description: sub
            .get_one::<String>("description")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        category: arg_str(sub, "category")?.parse::<ExpenseCategory>()?,
        amount: parse_money(arg_str(sub, "amount")?)?,
    };
    expense.validate()?;
    store::insert_expense(conn, &expense)?;
    println!(
        "Recorded {} expense of {} on {}",
        expense.category,
        fmt_money(expense.amount),
        expense.date
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_expenses(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }
    let total: Decimal = data.iter().map(|e| e.amount).sum();
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|e| {
            vec![
                e.date.to_string(),
                fmt_money(e.calculation),
                e.description.clone(),
                e.category.to_string(),
                fmt_money(e.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Date", "Calculation", "Description", "Category", "Amount"],
            rows
        )
    );
    println!("Total expenses: {}", fmt_money(total));
    Ok(())
}

pub fn query_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRecord>> {
    let mut data = store::list_expenses(conn)?;
    if let Some(raw) = sub.get_one::<String>("category") {
        let category = raw.parse::<ExpenseCategory>()?;
        data.retain(|e| e.category == category);
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}

fn clear(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        return Err(LedgerError::ConfirmationRequired("expenses").into());
    }
    let n = store::clear_expenses(conn)?;
    println!("Deleted {} expense(s)", n);
    Ok(())
}
