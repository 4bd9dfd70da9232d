// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CUSTOMERS;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle() -> Result<()> {
    let data = CUSTOMERS.iter().map(|c| vec![c.to_string()]).collect();
    println!("{}", pretty_table(&["Customer"], data));
    Ok(())
}
