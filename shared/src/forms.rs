//! Dashboard form state and field parsing
//!
//! Form fields arrive as text. These types turn them into typed API inputs
//! and report which field was wrong.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    CreateOrderInput, CreateProductInput, CreateStockTransactionInput, OrderItemInput, Product,
    StockError, TransactionType, UpdateProductInput, DEFAULT_REORDER_LEVEL,
};

/// A form field that could not be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FormError {
    pub field: String,
    pub message: String,
}

impl FormError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Parse a whole-number field
pub fn parse_int_field(field: &str, raw: &str) -> Result<i32, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FormError::new(field, "is required"));
    }
    raw.parse::<i32>()
        .map_err(|_| FormError::new(field, "must be a whole number"))
}

/// Parse a whole-number field that must not be negative
pub fn parse_count_field(field: &str, raw: &str) -> Result<i32, FormError> {
    let value = parse_int_field(field, raw)?;
    if value < 0 {
        return Err(FormError::new(field, "cannot be negative"));
    }
    Ok(value)
}

/// Parse a money field
pub fn parse_decimal_field(field: &str, raw: &str) -> Result<Decimal, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FormError::new(field, "is required"));
    }
    let value = Decimal::from_str(raw).map_err(|_| FormError::new(field, "must be a number"))?;
    if value < Decimal::ZERO {
        return Err(FormError::new(field, "cannot be negative"));
    }
    Ok(value)
}

/// Parse a record reference from a select box; empty means none
pub fn parse_optional_id(field: &str, raw: &str) -> Result<Option<i64>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| FormError::new(field, "is not a valid selection"))
}

fn required_id(field: &str, raw: &str) -> Result<i64, FormError> {
    parse_optional_id(field, raw)?.ok_or_else(|| FormError::new(field, "is required"))
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Product create/edit form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub sku: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub cost: String,
    pub quantity: String,
    pub reorder_level: String,
    pub supplier_id: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            sku: String::new(),
            description: String::new(),
            category: String::new(),
            price: String::new(),
            cost: String::new(),
            quantity: "0".to_string(),
            reorder_level: DEFAULT_REORDER_LEVEL.to_string(),
            supplier_id: String::new(),
        }
    }
}

impl ProductForm {
    /// Prefill the edit form from a stored product
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            sku: product.sku.clone(),
            description: product.description.clone().unwrap_or_default(),
            category: product.category.clone().unwrap_or_default(),
            price: product.price.to_string(),
            cost: product.cost.to_string(),
            quantity: product.quantity.to_string(),
            reorder_level: product.reorder_level.to_string(),
            supplier_id: product
                .supplier_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn to_create_input(&self) -> Result<CreateProductInput, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::new("name", "is required"));
        }
        crate::validation::validate_sku(&self.sku).map_err(|e| FormError::new("sku", e))?;

        Ok(CreateProductInput {
            name: name.to_string(),
            sku: self.sku.trim().to_string(),
            description: optional_text(&self.description),
            category: optional_text(&self.category),
            price: parse_decimal_field("price", &self.price)?,
            cost: parse_decimal_field("cost", &self.cost)?,
            quantity: parse_count_field("quantity", &self.quantity)?,
            reorder_level: parse_count_field("reorder_level", &self.reorder_level)?,
            supplier_id: parse_optional_id("supplier_id", &self.supplier_id)?,
        })
    }

    /// Build an update; the SKU and quantity fields are read-only when editing
    ///
    /// Description and category are always sent, so emptying them clears the
    /// stored value.
    pub fn to_update_input(&self) -> Result<UpdateProductInput, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::new("name", "is required"));
        }

        Ok(UpdateProductInput {
            name: Some(name.to_string()),
            description: Some(self.description.trim().to_string()),
            category: Some(self.category.trim().to_string()),
            price: Some(parse_decimal_field("price", &self.price)?),
            cost: Some(parse_decimal_field("cost", &self.cost)?),
            reorder_level: Some(parse_count_field("reorder_level", &self.reorder_level)?),
            supplier_id: parse_optional_id("supplier_id", &self.supplier_id)?,
        })
    }
}

/// Stock transaction form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockTransactionForm {
    pub product_id: String,
    pub transaction_type: String,
    pub quantity: String,
    pub notes: String,
}

impl Default for StockTransactionForm {
    fn default() -> Self {
        Self {
            product_id: String::new(),
            transaction_type: TransactionType::Increase.as_str().to_string(),
            quantity: String::new(),
            notes: String::new(),
        }
    }
}

impl StockTransactionForm {
    pub fn to_input(&self) -> Result<CreateStockTransactionInput, FormError> {
        let product_id = required_id("product_id", &self.product_id)?;
        let transaction_type = self
            .transaction_type
            .parse::<TransactionType>()
            .map_err(|e| FormError::new("transaction_type", e.to_string()))?;
        let quantity = parse_int_field("quantity", &self.quantity)?;
        let min = transaction_type.min_magnitude();
        if quantity < min {
            return Err(FormError::new(
                "quantity",
                format!("must be at least {}", min),
            ));
        }

        Ok(CreateStockTransactionInput {
            product_id,
            transaction_type,
            quantity,
            notes: optional_text(&self.notes),
        })
    }

    /// Quantity the product would hold if this form were submitted
    pub fn preview(&self, current_quantity: i32) -> Result<i32, StockPreviewError> {
        let input = self.to_input()?;
        Ok(input.resolve(current_quantity)?)
    }
}

/// Why a stock preview could not be computed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockPreviewError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Stock(#[from] StockError),
}

/// One line of the order builder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftLine {
    pub product_id: String,
    pub quantity: String,
}

/// Multi-item order being assembled in the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub lines: Vec<DraftLine>,
    pub notes: String,
}

impl Default for OrderDraft {
    /// A fresh draft starts with a single empty line
    fn default() -> Self {
        Self {
            lines: vec![DraftLine::default()],
            notes: String::new(),
        }
    }
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(&mut self) {
        self.lines.push(DraftLine::default());
    }

    /// Remove a line; out-of-range indexes are ignored
    pub fn remove_line(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    pub fn set_line(&mut self, index: usize, product_id: &str, quantity: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            line.product_id = product_id.to_string();
            line.quantity = quantity.to_string();
        }
    }

    /// Parse every line into an order request
    pub fn to_input(&self) -> Result<CreateOrderInput, FormError> {
        if self.lines.is_empty() {
            return Err(FormError::new("items", "add at least one item"));
        }

        let items = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let product_id = required_id(&format!("items[{}].product_id", i), &line.product_id)?;
                let field = format!("items[{}].quantity", i);
                let quantity = parse_int_field(&field, &line.quantity)?;
                if quantity < 1 {
                    return Err(FormError::new(&field, "must be at least 1"));
                }
                Ok(OrderItemInput {
                    product_id,
                    quantity,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CreateOrderInput {
            items,
            notes: optional_text(&self.notes),
        })
    }

    /// Running total of the lines that are complete and priced
    pub fn preview_total<F>(&self, price_of: F) -> Decimal
    where
        F: Fn(i64) -> Option<Decimal>,
    {
        self.lines
            .iter()
            .filter_map(|line| {
                let product_id = line.product_id.trim().parse::<i64>().ok()?;
                let quantity = line.quantity.trim().parse::<i32>().ok().filter(|q| *q > 0)?;
                Some((price_of(product_id)?, quantity))
            })
            .map(|(price, quantity)| crate::models::line_subtotal(price, quantity))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_int_field() {
        assert_eq!(parse_int_field("quantity", " 12 "), Ok(12));
        assert_eq!(
            parse_int_field("quantity", ""),
            Err(FormError::new("quantity", "is required"))
        );
        assert!(parse_int_field("quantity", "12.5").is_err());
        assert!(parse_count_field("quantity", "-1").is_err());
    }

    #[test]
    fn test_parse_decimal_field() {
        assert_eq!(parse_decimal_field("price", "19.99"), Ok(dec("19.99")));
        assert!(parse_decimal_field("price", "abc").is_err());
        assert!(parse_decimal_field("price", "-0.5").is_err());
    }

    #[test]
    fn test_parse_optional_id() {
        assert_eq!(parse_optional_id("supplier_id", ""), Ok(None));
        assert_eq!(parse_optional_id("supplier_id", "7"), Ok(Some(7)));
        assert!(parse_optional_id("supplier_id", "x").is_err());
    }

    #[test]
    fn test_product_form_to_create_input() {
        let form = ProductForm {
            name: "Canned Tuna".to_string(),
            sku: "TUNA-180".to_string(),
            price: "45.50".to_string(),
            cost: "32".to_string(),
            quantity: "120".to_string(),
            supplier_id: "3".to_string(),
            ..Default::default()
        };
        let input = form.to_create_input().unwrap();
        assert_eq!(input.price, dec("45.50"));
        assert_eq!(input.quantity, 120);
        assert_eq!(input.reorder_level, DEFAULT_REORDER_LEVEL);
        assert_eq!(input.supplier_id, Some(3));
        assert_eq!(input.description, None);
    }

    #[test]
    fn test_product_form_reports_bad_field() {
        let form = ProductForm {
            name: "Canned Tuna".to_string(),
            sku: "TUNA-180".to_string(),
            price: "lots".to_string(),
            cost: "32".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_create_input().unwrap_err().field, "price");
    }

    #[test]
    fn test_product_form_edit_sends_cleared_text() {
        let form = ProductForm {
            name: "Canned Tuna".to_string(),
            sku: "TUNA-180".to_string(),
            description: "  ".to_string(),
            category: "Food & Beverage".to_string(),
            price: "45.50".to_string(),
            cost: "32".to_string(),
            reorder_level: "10".to_string(),
            ..Default::default()
        };
        let input = form.to_update_input().unwrap();
        assert_eq!(input.description.as_deref(), Some(""));
        assert_eq!(input.category.as_deref(), Some("Food & Beverage"));
        assert_eq!(input.supplier_id, None);
    }

    #[test]
    fn test_stock_form_minimums() {
        let mut form = StockTransactionForm {
            product_id: "1".to_string(),
            transaction_type: "adjustment".to_string(),
            quantity: "0".to_string(),
            notes: String::new(),
        };
        assert_eq!(form.to_input().unwrap().quantity, 0);

        form.transaction_type = "out".to_string();
        assert_eq!(form.to_input().unwrap_err().field, "quantity");
    }

    #[test]
    fn test_stock_form_preview() {
        let form = StockTransactionForm {
            product_id: "1".to_string(),
            transaction_type: "out".to_string(),
            quantity: "12".to_string(),
            notes: "Shelf restock".to_string(),
        };
        assert_eq!(form.preview(50), Ok(38));
        assert!(matches!(
            form.preview(10),
            Err(StockPreviewError::Stock(StockError::InsufficientStock { .. }))
        ));
    }

    #[test]
    fn test_order_draft_lines() {
        let mut draft = OrderDraft::new();
        assert_eq!(draft.lines.len(), 1);
        draft.set_line(0, "1", "2");
        draft.add_line();
        draft.set_line(1, "2", "3");
        draft.add_line();
        draft.remove_line(2);
        draft.remove_line(10);

        let input = draft.to_input().unwrap();
        assert_eq!(
            input.items,
            vec![
                OrderItemInput {
                    product_id: 1,
                    quantity: 2
                },
                OrderItemInput {
                    product_id: 2,
                    quantity: 3
                },
            ]
        );
    }

    #[test]
    fn test_order_draft_rejects_incomplete_lines() {
        let mut draft = OrderDraft::new();
        assert_eq!(draft.to_input().unwrap_err().field, "items[0].product_id");

        draft.set_line(0, "1", "0");
        assert_eq!(draft.to_input().unwrap_err().field, "items[0].quantity");

        draft.remove_line(0);
        assert_eq!(draft.to_input().unwrap_err().field, "items");
    }

    #[test]
    fn test_order_draft_preview_total() {
        let mut draft = OrderDraft::new();
        draft.set_line(0, "1", "2");
        draft.add_line();
        draft.set_line(1, "2", "1");
        draft.add_line(); // incomplete, ignored

        let total = draft.preview_total(|id| match id {
            1 => Some(dec("10.25")),
            2 => Some(dec("3.50")),
            _ => None,
        });
        assert_eq!(total, dec("24.00"));
    }
}
