// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use avicola::models::ExpenseCategory;
use avicola::{cli, commands::importer, db, store};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;
use tempfile::NamedTempFile;

fn base_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

fn import(conn: &mut Connection, what: &str, path: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(["avicola", "import", what, "--path", path]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m)
    } else {
        panic!("no import subcommand");
    }
}

#[test]
fn import_sales_normalizes_currency_text() {
    let mut conn = base_conn();
    let file = csv_file(
        "date,customer,bird_type,quantity,gross_weight,discount_weight,unit_price,amount_paid\n\
         2024-07-01,Lobo Mercado,pollo,10,\"1,020.00\",20,$1.10,\"$1,000.00\"\n\
         2024-07-02 09:15:00,Senel,Gallina,2,8.5,,1.00,\n",
    );
    let path = file.path().to_str().unwrap().to_string();
    import(&mut conn, "sales", &format!("  {}  ", path)).unwrap();

    let sales = store::list_sales(&conn).unwrap();
    assert_eq!(sales.len(), 2);
    let lobo = sales.iter().find(|s| s.customer() == "Lobo Mercado").unwrap();
    assert_eq!(lobo.net_weight(), Decimal::from(1000));
    assert_eq!(lobo.amount_due(), Decimal::from(1100));
    assert_eq!(lobo.balance(), Decimal::from(100));

    let senel = sales.iter().find(|s| s.customer() == "Senel").unwrap();
    assert_eq!(senel.date().to_string(), "2024-07-02");
    assert_eq!(senel.balance(), Decimal::from_str("8.50").unwrap());
}

#[test]
fn import_sales_is_all_or_nothing() {
    let mut conn = base_conn();
    let file = csv_file(
        "date,customer,bird_type,quantity,gross_weight,discount_weight,unit_price,amount_paid\n\
         2024-07-01,Senel,pollo,1,5,0,1,0\n\
         2024-07-02,Senel,pato,1,5,0,1,0\n",
    );
    let path = file.path().to_str().unwrap().to_string();
    let err = import(&mut conn, "sales", &path).unwrap_err();
    assert!(format!("{:#}", err).contains("line 3"));
    assert!(format!("{:#}", err).contains("Unknown bird type 'pato'"));
    assert!(store::list_sales(&conn).unwrap().is_empty());
}

#[test]
fn import_expenses_defaults_category_and_calculation() {
    let mut conn = base_conn();
    let file = csv_file(
        "date,calculation,description,category,amount\n\
         2024-07-03,,corn,,$45.00\n\
         2024-07-04,-2.5,truck fuel,transport,30\n",
    );
    let path = file.path().to_str().unwrap().to_string();
    import(&mut conn, "expenses", &path).unwrap();

    let expenses = store::list_expenses(&conn).unwrap();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].category, ExpenseCategory::Transport);
    assert_eq!(expenses[0].calculation, Decimal::from_str("-2.5").unwrap());
    assert_eq!(expenses[1].category, ExpenseCategory::Food);
    assert_eq!(expenses[1].calculation, Decimal::ZERO);
    assert_eq!(expenses[1].amount, Decimal::from(45));
}

#[test]
fn import_expenses_rejects_zero_amount() {
    let mut conn = base_conn();
    let file = csv_file("date,calculation,description,category,amount\n2024-07-03,,corn,food,0\n");
    let path = file.path().to_str().unwrap().to_string();
    let err = import(&mut conn, "expenses", &path).unwrap_err();
    assert!(format!("{:#}", err).contains("amount must be greater than 0"));
    assert!(store::list_expenses(&conn).unwrap().is_empty());
}
