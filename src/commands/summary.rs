// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::sales::SalesTotals;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct Summary {
    pub sale_count: usize,
    pub sales: SalesTotals,
    pub expense_count: usize,
    pub expenses_total: Decimal,
    pub expenses_by_category: BTreeMap<String, Decimal>,
    /// Cash actually received minus everything spent.
    pub net_cash: Decimal,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let s = compute(conn)?;
    if maybe_print_json(json_flag, jsonl_flag, &s)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Sales recorded".into(), s.sale_count.to_string()],
        vec!["Total sales".into(), fmt_money(s.sales.amount_due)],
        vec!["Payments received".into(), fmt_money(s.sales.amount_paid)],
        vec!["Outstanding balance".into(), fmt_money(s.sales.outstanding)],
        vec!["Expenses recorded".into(), s.expense_count.to_string()],
        vec!["Total expenses".into(), fmt_money(s.expenses_total)],
        vec!["Net cash".into(), fmt_money(s.net_cash)],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    if !s.expenses_by_category.is_empty() {
        let rows = s
            .expenses_by_category
            .iter()
            .map(|(c, amt)| vec![c.clone(), fmt_money(*amt)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

pub fn compute(conn: &Connection) -> Result<Summary> {
    let sales = store::list_sales(conn)?;
    let expenses = store::list_expenses(conn)?;
    let totals = SalesTotals::from_sales(&sales);

    let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut expenses_total = Decimal::ZERO;
    for e in &expenses {
        *by_category
            .entry(e.category.as_str().to_string())
            .or_insert(Decimal::ZERO) += e.amount;
        expenses_total += e.amount;
    }

    Ok(Summary {
        sale_count: sales.len(),
        sales: totals,
        expense_count: expenses.len(),
        expenses_total,
        expenses_by_category: by_category,
        net_cash: totals.amount_paid - expenses_total,
    })
}
