// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::alerts::{Alert, analyze};
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let alerts = current_alerts(conn)?;
    if maybe_print_json(json_flag, jsonl_flag, &alerts)? {
        return Ok(());
    }
    if alerts.is_empty() {
        println!("No customer alerts. All balances are up to date.");
        return Ok(());
    }
    println!("{}", alert_table(&alerts));
    println!("Follow up with the customers above to settle their balances.");
    Ok(())
}

/// Analyze a fresh snapshot of every stored sale.
pub fn current_alerts(conn: &Connection) -> Result<Vec<Alert>> {
    let sales = store::list_sales(conn)?;
    let alerts = analyze(&sales);
    tracing::info!(sales = sales.len(), alerts = alerts.len(), "delinquency pass");
    Ok(alerts)
}

fn alert_table(alerts: &[Alert]) -> comfy_table::Table {
    let rows = alerts
        .iter()
        .map(|a| {
            vec![
                a.customer.clone(),
                fmt_money(a.total_outstanding_balance),
                a.last_sale_date.to_string(),
                a.reason_text(),
                a.priority.to_string(),
            ]
        })
        .collect();
    pretty_table(
        &["Customer", "Outstanding", "Last Sale", "Reason", "Priority"],
        rows,
    )
}
