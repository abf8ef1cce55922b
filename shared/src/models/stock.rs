//! Stock transactions and the quantity adjustment rule

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Kind of stock movement
///
/// Wire names are `in`, `out` and `adjustment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "stock_transaction_type"))]
pub enum TransactionType {
    /// Add the magnitude to the current quantity
    #[serde(rename = "in")]
    #[cfg_attr(feature = "db", sqlx(rename = "in"))]
    Increase,
    /// Remove the magnitude from the current quantity
    #[serde(rename = "out")]
    #[cfg_attr(feature = "db", sqlx(rename = "out"))]
    Decrease,
    /// Replace the current quantity with the magnitude
    #[serde(rename = "adjustment")]
    #[cfg_attr(feature = "db", sqlx(rename = "adjustment"))]
    SetAbsolute,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Increase => "in",
            TransactionType::Decrease => "out",
            TransactionType::SetAbsolute => "adjustment",
        }
    }

    /// Label shown in the transaction form and table
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Increase => "Stock In",
            TransactionType::Decrease => "Stock Out",
            TransactionType::SetAbsolute => "Adjustment",
        }
    }

    /// Smallest magnitude the type accepts
    pub fn min_magnitude(&self) -> i32 {
        match self {
            TransactionType::SetAbsolute => 0,
            TransactionType::Increase | TransactionType::Decrease => 1,
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(TransactionType::Increase),
            "out" => Ok(TransactionType::Decrease),
            "adjustment" => Ok(TransactionType::SetAbsolute),
            other => Err(StockError::UnknownType(other.to_string())),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a stock adjustment could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    #[error("Quantity must be at least {min}")]
    InvalidMagnitude { min: i32, magnitude: i32 },

    #[error("Insufficient stock. Available: {available}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Resulting quantity is too large")]
    Overflow,

    #[error("Unknown transaction type: {0}")]
    UnknownType(String),
}

/// Compute the quantity a product holds after a stock transaction.
///
/// `current` is the quantity before the transaction. A decrease larger than
/// the current quantity is rejected, so the result is never negative.
pub fn resolve_quantity(
    current: i32,
    transaction_type: TransactionType,
    magnitude: i32,
) -> Result<i32, StockError> {
    let min = transaction_type.min_magnitude();
    if magnitude < min {
        return Err(StockError::InvalidMagnitude { min, magnitude });
    }

    match transaction_type {
        TransactionType::Increase => current.checked_add(magnitude).ok_or(StockError::Overflow),
        TransactionType::Decrease => {
            if magnitude > current {
                return Err(StockError::InsufficientStock {
                    available: current,
                    requested: magnitude,
                });
            }
            Ok(current - magnitude)
        }
        TransactionType::SetAbsolute => Ok(magnitude),
    }
}

/// Immutable audit record of a stock movement
///
/// `quantity` is the requested magnitude, not the resulting stock level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StockTransaction {
    pub id: i64,
    pub product_id: i64,
    pub transaction_type: TransactionType,
    pub quantity: i32,
    pub user_id: i64,
    pub notes: Option<String>,
    pub transaction_date: DateTime<Utc>,
}

/// Input for recording a stock transaction
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStockTransactionInput {
    pub product_id: i64,
    pub transaction_type: TransactionType,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateStockTransactionInput {
    /// Resolve this request against a product's current quantity
    pub fn resolve(&self, current: i32) -> Result<i32, StockError> {
        resolve_quantity(current, self.transaction_type, self.quantity)
    }
}

/// Query string of the transaction list
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockTransactionFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_increase_adds(q in 0i32..1_000_000, m in 1i32..1_000_000) {
            prop_assert_eq!(resolve_quantity(q, TransactionType::Increase, m), Ok(q + m));
        }

        #[test]
        fn prop_decrease_within_stock(q in 1i32..1_000_000, frac in 0.0f64..=1.0) {
            let m = ((q as f64 * frac) as i32).clamp(1, q);
            prop_assert_eq!(resolve_quantity(q, TransactionType::Decrease, m), Ok(q - m));
        }

        #[test]
        fn prop_decrease_never_negative(q in 0i32..10_000, m in 1i32..20_000) {
            match resolve_quantity(q, TransactionType::Decrease, m) {
                Ok(new_quantity) => prop_assert!(new_quantity >= 0 && m <= q),
                Err(e) => {
                    let insufficient = matches!(e, StockError::InsufficientStock { .. });
                    prop_assert!(m > q && insufficient);
                }
            }
        }

        #[test]
        fn prop_set_absolute_is_exact(q in 0i32..1_000_000, m in 0i32..1_000_000) {
            prop_assert_eq!(resolve_quantity(q, TransactionType::SetAbsolute, m), Ok(m));
        }
    }
}
