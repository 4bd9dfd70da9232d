// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Validation failures raised before anything reaches the store.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Unknown bird type '{0}' (use pollo|gallina)")]
    UnknownBirdType(String),

    #[error("Unknown expense category '{0}'")]
    UnknownCategory(String),

    #[error("{field} must be greater than 0")]
    NotPositive { field: &'static str },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: Decimal },

    #[error("Discount {discount} exceeds gross weight {gross}")]
    DiscountExceedsGross { gross: Decimal, discount: Decimal },

    #[error("Refusing to delete all {0} without --yes")]
    ConfirmationRequired(&'static str),
}
