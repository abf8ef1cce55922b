//! Product catalog models and the low-stock rule

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::validate_non_negative_decimal;

/// Reorder level applied when a product is created without one
pub const DEFAULT_REORDER_LEVEL: i32 = 10;

/// A product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Stock-keeping unit, unique and locked after creation
    pub sku: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Decimal,
    pub cost: Decimal,
    /// Units on hand, only changed through stock adjustments
    pub quantity: i32,
    pub reorder_level: i32,
    pub supplier_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product is at or below its reorder level
    pub fn is_low_stock(&self) -> bool {
        is_low_stock(self.quantity, self.reorder_level)
    }

    pub fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.quantity, self.reorder_level)
    }

    /// Value of the units on hand at cost
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.quantity) * self.cost
    }
}

/// Low stock holds exactly when `quantity <= reorder_level`.
pub fn is_low_stock(quantity: i32, reorder_level: i32) -> bool {
    quantity <= reorder_level
}

/// Stock badge shown next to a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    LowStock,
    InStock,
}

impl StockStatus {
    pub fn classify(quantity: i32, reorder_level: i32) -> Self {
        if is_low_stock(quantity, reorder_level) {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// CSS badge class used by the dashboard
    pub fn badge_class(&self) -> &'static str {
        match self {
            StockStatus::LowStock => "badge-warning",
            StockStatus::InStock => "badge-success",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::LowStock => write!(f, "Low Stock"),
            StockStatus::InStock => write!(f, "In Stock"),
        }
    }
}

/// Input for creating a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "SKU is required"))]
    pub sku: String,
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub price: Decimal,
    #[validate(custom = "validate_non_negative_decimal")]
    pub cost: Decimal,
    #[serde(default)]
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
    #[serde(default = "default_reorder_level")]
    #[validate(range(min = 0, message = "Reorder level cannot be negative"))]
    pub reorder_level: i32,
    pub supplier_id: Option<i64>,
}

fn default_reorder_level() -> i32 {
    DEFAULT_REORDER_LEVEL
}

/// Input for editing a product
///
/// SKU and quantity are absent: the SKU is locked after creation and the
/// quantity moves only through stock transactions. Absent fields keep their
/// stored value. A blank `description` or `category` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_non_negative_decimal")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_non_negative_decimal")]
    pub cost: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Reorder level cannot be negative"))]
    pub reorder_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
}

/// A single entry of the low-stock alert list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LowStockProduct {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub quantity: i32,
    pub reorder_level: i32,
}

/// Products at or below their reorder level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowStockAlerts {
    pub count: usize,
    pub products: Vec<LowStockProduct>,
}

impl From<Vec<LowStockProduct>> for LowStockAlerts {
    fn from(products: Vec<LowStockProduct>) -> Self {
        Self {
            count: products.len(),
            products,
        }
    }
}
