// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::utils::round2;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regular customers. Sales to anyone else are still accepted.
pub const CUSTOMERS: &[&str] = &[
    "D. Vicente",
    "D. Jorge",
    "D. Quinde",
    "Sra. Isabel",
    "Sra. Alba",
    "Sra Yolanda",
    "Sra Laura Mercado",
    "D. Segundo",
    "Legumbrero",
    "Peruana Posorja",
    "Sra. Sofia",
    "Sra. Jessica",
    "Sra Alado de Jessica",
    "Comedor Gordo Posorja",
    "Sra. Celeste",
    "Caro negro",
    "Tienda Isabel Posorja",
    "Carnicero Posorja",
    "Senel",
    "D. Jonny",
    "D. Sra Madelyn",
    "Lobo Mercado",
];

pub fn is_known_customer(name: &str) -> bool {
    CUSTOMERS.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BirdType {
    Pollo,
    Gallina,
}

impl BirdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BirdType::Pollo => "pollo",
            BirdType::Gallina => "gallina",
        }
    }
}

impl fmt::Display for BirdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BirdType::Pollo => f.write_str("Pollo"),
            BirdType::Gallina => f.write_str("Gallina"),
        }
    }
}

impl FromStr for BirdType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pollo" => Ok(BirdType::Pollo),
            "gallina" => Ok(BirdType::Gallina),
            _ => Err(LedgerError::UnknownBirdType(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Production,
    Health,
    Education,
    Labor,
    Loss,
    Miscellaneous,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 9] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Production,
        ExpenseCategory::Health,
        ExpenseCategory::Education,
        ExpenseCategory::Labor,
        ExpenseCategory::Loss,
        ExpenseCategory::Miscellaneous,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Production => "production",
            ExpenseCategory::Health => "health",
            ExpenseCategory::Education => "education",
            ExpenseCategory::Labor => "labor",
            ExpenseCategory::Loss => "loss",
            ExpenseCategory::Miscellaneous => "miscellaneous",
            ExpenseCategory::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ExpenseCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| LedgerError::UnknownCategory(s.trim().to_string()))
    }
}

pub fn net_weight(gross: Decimal, discount: Decimal) -> Decimal {
    round2(gross - discount)
}

pub fn amount_due(net_weight: Decimal, unit_price: Decimal) -> Decimal {
    round2(net_weight * unit_price)
}

pub fn balance(amount_due: Decimal, amount_paid: Decimal) -> Decimal {
    round2(amount_due - amount_paid)
}

/// The fields a clerk actually types in for one sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleInput {
    pub date: NaiveDate,
    pub customer: String,
    pub bird_type: BirdType,
    pub quantity: u32,
    pub gross_weight: Decimal,
    pub discount_weight: Decimal,
    pub unit_price: Decimal,
    pub amount_paid: Decimal,
}

impl SaleInput {
    /// Entry rules for new sales. Historical rows loaded from the store
    /// skip this and go straight to [`SaleRecord::new`].
    pub fn validate(&self) -> Result<(), LedgerError> {
        for (field, value) in [
            ("gross weight", self.gross_weight),
            ("discount", self.discount_weight),
            ("unit price", self.unit_price),
            ("amount paid", self.amount_paid),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(LedgerError::Negative { field, value });
            }
        }
        if self.quantity == 0 {
            return Err(LedgerError::NotPositive { field: "quantity" });
        }
        if self.gross_weight.is_zero() {
            return Err(LedgerError::NotPositive { field: "gross weight" });
        }
        if self.unit_price.is_zero() {
            return Err(LedgerError::NotPositive { field: "unit price" });
        }
        if self.discount_weight > self.gross_weight {
            return Err(LedgerError::DiscountExceedsGross {
                gross: self.gross_weight,
                discount: self.discount_weight,
            });
        }
        Ok(())
    }
}

/// A sale with its derived amounts. The derived fields are private and
/// only ever produced by [`SaleRecord::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    date: NaiveDate,
    customer: String,
    bird_type: BirdType,
    quantity: u32,
    gross_weight: Decimal,
    discount_weight: Decimal,
    net_weight: Decimal,
    unit_price: Decimal,
    amount_due: Decimal,
    amount_paid: Decimal,
    balance: Decimal,
}

impl SaleRecord {
    pub fn new(input: SaleInput) -> Self {
        let net = net_weight(input.gross_weight, input.discount_weight);
        let due = amount_due(net, input.unit_price);
        let bal = balance(due, input.amount_paid);
        SaleRecord {
            date: input.date,
            customer: input.customer,
            bird_type: input.bird_type,
            quantity: input.quantity,
            gross_weight: input.gross_weight,
            discount_weight: input.discount_weight,
            net_weight: net,
            unit_price: input.unit_price,
            amount_due: due,
            amount_paid: input.amount_paid,
            balance: bal,
        }
    }

    /// A stored row with an amount that could not be read back. Net weight
    /// and amount due still follow the inputs; the balance is pinned at 0 so
    /// the row neither adds to a customer's debt nor marks the day as owed.
    pub(crate) fn unreadable(input: SaleInput) -> Self {
        SaleRecord {
            balance: Decimal::ZERO,
            ..SaleRecord::new(input)
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn bird_type(&self) -> BirdType {
        self.bird_type
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn gross_weight(&self) -> Decimal {
        self.gross_weight
    }

    pub fn discount_weight(&self) -> Decimal {
        self.discount_weight
    }

    pub fn net_weight(&self) -> Decimal {
        self.net_weight
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn amount_due(&self) -> Decimal {
        self.amount_due
    }

    pub fn amount_paid(&self) -> Decimal {
        self.amount_paid
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub calculation: Decimal, // free-form annotation, not summed
    pub description: String,
    pub category: ExpenseCategory,
    pub amount: Decimal,
}

impl ExpenseRecord {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(LedgerError::Negative {
                field: "amount",
                value: self.amount,
            });
        }
        if self.amount.is_zero() {
            return Err(LedgerError::NotPositive { field: "amount" });
        }
        Ok(())
    }
}
