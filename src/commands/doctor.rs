// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{self, BirdType, ExpenseCategory, is_known_customer};
use crate::utils::{parse_date, parse_money, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: &'static str,
    pub detail: String,
}

impl Issue {
    fn new(kind: &'static str, detail: String) -> Self {
        Issue { kind, detail }
    }
}

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = find_issues(conn)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.kind.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn find_issues(conn: &Connection) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();
    sale_issues(conn, &mut issues)?;
    expense_issues(conn, &mut issues)?;
    Ok(issues)
}

fn sale_issues(conn: &Connection, issues: &mut Vec<Issue>) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT id, date, customer, bird_type, gross_weight, discount_weight, net_weight,
                unit_price, amount_due, amount_paid, balance
         FROM sales ORDER BY id",
    )?;
    let mut cur = stmt.query([])?;
    let mut strangers = BTreeSet::new();
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let customer: String = r.get(2)?;
        let bird: String = r.get(3)?;

        if parse_date(&date).is_err() {
            issues.push(Issue::new("bad_date", format!("sale {}: '{}'", id, date)));
        }
        if bird.parse::<BirdType>().is_err() {
            issues.push(Issue::new("bad_bird_type", format!("sale {}: '{}'", id, bird)));
        }
        if !is_known_customer(&customer) {
            strangers.insert(customer);
        }

        let mut num = |idx: usize, column: &str| -> Result<Option<Decimal>> {
            let raw: String = r.get(idx)?;
            match raw.trim().parse::<Decimal>() {
                Ok(d) => Ok(Some(d)),
                Err(_) => {
                    issues.push(Issue::new(
                        amount_issue_kind(&raw),
                        format!("sale {} {}: '{}'", id, column, raw),
                    ));
                    Ok(parse_money(&raw).ok())
                }
            }
        };
        let gross = num(4, "gross_weight")?;
        let discount = num(5, "discount_weight")?;
        let net = num(6, "net_weight")?;
        let price = num(7, "unit_price")?;
        let due = num(8, "amount_due")?;
        let paid = num(9, "amount_paid")?;
        let bal = num(10, "balance")?;

        if let (Some(g), Some(d)) = (gross, discount) {
            if d > g {
                issues.push(Issue::new(
                    "discount_exceeds_gross",
                    format!("sale {}: {} > {}", id, d, g),
                ));
            }
        }
        if let (Some(g), Some(d), Some(p), Some(pd)) = (gross, discount, price, paid) {
            let want_net = models::net_weight(g, d);
            let want_due = models::amount_due(want_net, p);
            let want_bal = models::balance(want_due, pd);
            for (column, stored, want) in [
                ("net_weight", net, want_net),
                ("amount_due", due, want_due),
                ("balance", bal, want_bal),
            ] {
                if let Some(s) = stored.filter(|s| *s != want) {
                    issues.push(Issue::new(
                        "derived_mismatch",
                        format!("sale {} {}: stored {}, expected {}", id, column, s, want),
                    ));
                }
            }
        }
    }
    for c in strangers {
        issues.push(Issue::new("unknown_customer", c));
    }
    Ok(())
}

fn expense_issues(conn: &Connection, issues: &mut Vec<Issue>) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT id, date, calculation, category, amount FROM expenses ORDER BY id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let calculation: String = r.get(2)?;
        let category: String = r.get(3)?;
        let amount: String = r.get(4)?;
        if parse_date(&date).is_err() {
            issues.push(Issue::new("bad_date", format!("expense {}: '{}'", id, date)));
        }
        if category.parse::<ExpenseCategory>().is_err() {
            issues.push(Issue::new(
                "bad_category",
                format!("expense {}: '{}'", id, category),
            ));
        }
        for (column, raw) in [("calculation", &calculation), ("amount", &amount)] {
            if raw.trim().parse::<Decimal>().is_err() {
                issues.push(Issue::new(
                    amount_issue_kind(raw),
                    format!("expense {} {}: '{}'", id, column, raw),
                ));
            }
        }
    }
    Ok(())
}

/// Display-formatted text is still readable; anything else reads as zero.
fn amount_issue_kind(raw: &str) -> &'static str {
    if parse_money(raw).is_ok() {
        "formatted_amount"
    } else {
        "unparsable_amount"
    }
}
