// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Append-only record store for sales and expenses.
//!
//! Rows are only ever inserted or wiped wholesale. Derived sale amounts are
//! written next to their inputs for export and auditing, but reads always
//! rebuild them from the inputs.

use crate::models::{BirdType, ExpenseCategory, ExpenseRecord, SaleInput, SaleRecord};
use crate::utils::{parse_date, parse_money};
use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn insert_sale(conn: &Connection, sale: &SaleRecord) -> Result<i64> {
    conn.execute(
        "INSERT INTO sales(date, customer, bird_type, quantity, gross_weight, discount_weight,
                           net_weight, unit_price, amount_due, amount_paid, balance)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            sale.date().to_string(),
            sale.customer(),
            sale.bird_type().as_str(),
            sale.quantity(),
            sale.gross_weight().to_string(),
            sale.discount_weight().to_string(),
            sale.net_weight().to_string(),
            sale.unit_price().to_string(),
            sale.amount_due().to_string(),
            sale.amount_paid().to_string(),
            sale.balance().to_string(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, customer = sale.customer(), balance = %sale.balance(), "sale stored");
    Ok(id)
}

/// Every sale, newest date first, then by customer.
pub fn list_sales(conn: &Connection) -> Result<Vec<SaleRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, customer, bird_type, quantity, gross_weight, discount_weight,
                unit_price, amount_paid
         FROM sales
         ORDER BY date DESC, customer ASC, id DESC",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date_raw: String = r.get(1)?;
        let customer: String = r.get(2)?;
        let bird_raw: String = r.get(3)?;
        let quantity: i64 = r.get(4)?;

        let date =
            parse_date(&date_raw).with_context(|| format!("Sale {} has a bad date", id))?;
        let bird_type = bird_raw
            .parse::<BirdType>()
            .with_context(|| format!("Sale {} has a bad bird type", id))?;
        let quantity = u32::try_from(quantity)
            .with_context(|| format!("Sale {} has a bad quantity {}", id, quantity))?;

        let gross = stored_decimal(&r.get::<_, String>(5)?, "gross_weight", id);
        let discount = stored_decimal(&r.get::<_, String>(6)?, "discount_weight", id);
        let price = stored_decimal(&r.get::<_, String>(7)?, "unit_price", id);
        let paid = stored_decimal(&r.get::<_, String>(8)?, "amount_paid", id);
        let readable = gross.is_some() && discount.is_some() && price.is_some() && paid.is_some();

        let input = SaleInput {
            date,
            customer,
            bird_type,
            quantity,
            gross_weight: gross.unwrap_or_default(),
            discount_weight: discount.unwrap_or_default(),
            unit_price: price.unwrap_or_default(),
            amount_paid: paid.unwrap_or_default(),
        };
        data.push(if readable {
            SaleRecord::new(input)
        } else {
            SaleRecord::unreadable(input)
        });
    }
    Ok(data)
}

pub fn clear_sales(conn: &Connection) -> Result<usize> {
    let n = conn.execute("DELETE FROM sales", [])?;
    tracing::info!(rows = n, "sales cleared");
    Ok(n)
}

pub fn insert_expense(conn: &Connection, expense: &ExpenseRecord) -> Result<i64> {
    conn.execute(
        "INSERT INTO expenses(date, calculation, description, category, amount)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            expense.date.to_string(),
            expense.calculation.to_string(),
            expense.description,
            expense.category.as_str(),
            expense.amount.to_string(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, category = expense.category.as_str(), amount = %expense.amount, "expense stored");
    Ok(id)
}

pub fn list_expenses(conn: &Connection) -> Result<Vec<ExpenseRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, calculation, description, category, amount
         FROM expenses
         ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date_raw: String = r.get(1)?;
        let category_raw: String = r.get(4)?;
        let date =
            parse_date(&date_raw).with_context(|| format!("Expense {} has a bad date", id))?;
        let category = category_raw
            .parse::<ExpenseCategory>()
            .with_context(|| format!("Expense {} has a bad category", id))?;
        data.push(ExpenseRecord {
            date,
            calculation: stored_decimal(&r.get::<_, String>(2)?, "calculation", id)
                .unwrap_or_default(),
            description: r.get(3)?,
            category,
            amount: stored_decimal(&r.get::<_, String>(5)?, "amount", id).unwrap_or_default(),
        });
    }
    Ok(data)
}

pub fn clear_expenses(conn: &Connection) -> Result<usize> {
    let n = conn.execute("DELETE FROM expenses", [])?;
    tracing::info!(rows = n, "expenses cleared");
    Ok(n)
}

/// `None` for a stored numeric that no longer parses. Callers read it as 0;
/// a sale with any such input also has its balance zeroed.
fn stored_decimal(raw: &str, column: &'static str, id: i64) -> Option<Decimal> {
    match parse_money(raw) {
        Ok(d) => Some(d),
        Err(_) => {
            tracing::warn!(id, column, raw, "unparsable stored amount, treating as 0");
            None
        }
    }
}
