// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use avicola::alerts::Priority;
use avicola::{commands::alerts, db};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::str::FromStr;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn insert(conn: &Connection, date: &str, customer: &str, gross: &str, paid: &str) {
    conn.execute(
        "INSERT INTO sales(date, customer, bird_type, quantity, gross_weight, discount_weight,
                           net_weight, unit_price, amount_due, amount_paid, balance)
         VALUES (?1, ?2, 'pollo', 1, ?3, '0', ?3, '1', ?3, ?4, '0')",
        params![date, customer, gross, paid],
    )
    .unwrap();
}

#[test]
fn alerts_use_recomputed_balances_from_store() {
    let conn = setup();
    // stored balance column says 0, inputs say 12 owed
    insert(&conn, "2024-04-01", "D. Quinde", "12", "0");
    insert(&conn, "2024-04-01", "Senel", "5", "5");

    let alerts = alerts::current_alerts(&conn).unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].customer, "D. Quinde");
    assert_eq!(
        alerts[0].total_outstanding_balance,
        Decimal::from_str("12").unwrap()
    );
    assert_eq!(alerts[0].priority, Priority::Medium);
}

#[test]
fn unreadable_payments_never_flag_a_customer() {
    let conn = setup();
    insert(&conn, "2024-04-01", "Senel", "6", "oops");
    insert(&conn, "2024-04-02", "Senel", "6", "oops");

    assert!(alerts::current_alerts(&conn).unwrap().is_empty());
}

#[test]
fn unreadable_row_breaks_a_run_of_owed_days() {
    let conn = setup();
    insert(&conn, "2024-04-01", "Senel", "4", "0");
    insert(&conn, "2024-04-02", "Senel", "30", "oops");
    insert(&conn, "2024-04-03", "Senel", "4", "0");

    // only the readable rows count: $8 owed on 04-01 and 04-03
    assert!(alerts::current_alerts(&conn).unwrap().is_empty());

    insert(&conn, "2024-04-04", "Senel", "3", "0");
    let alerts = alerts::current_alerts(&conn).unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].priority, Priority::High);
    assert_eq!(
        alerts[0].reason_text(),
        "owes more than $10 ($11.00) | balance pending for 2 consecutive day(s)"
    );
}

#[test]
fn no_sales_means_no_alerts() {
    let conn = setup();
    assert!(alerts::current_alerts(&conn).unwrap().is_empty());
}
