//! Stock adjustment and low-stock tests
//!
//! Tests for stock tracking including:
//! - Quantity resolution for in, out and adjustment transactions
//! - Low-stock flagging against the reorder level
//! - Inventory valuation at cost

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    inventory_value, is_low_stock, resolve_quantity, CreateStockTransactionInput, Product,
    StockError, StockStatus, StockTransactionForm, TransactionType,
};
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn product(quantity: i32, reorder_level: i32, cost: &str) -> Product {
    Product {
        id: 1,
        name: "Canned Sardines 155g".to_string(),
        sku: "CAN-0155".to_string(),
        description: None,
        category: Some("Food & Beverage".to_string()),
        price: dec("24.50"),
        cost: dec(cost),
        quantity,
        reorder_level,
        supplier_id: None,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Sale followed by a physical count
    #[test]
    fn test_sale_then_count() {
        let mut item = product(50, 10, "18.00");

        item.quantity = resolve_quantity(item.quantity, TransactionType::Decrease, 12).unwrap();
        assert_eq!(item.quantity, 38);
        assert_eq!(item.stock_status(), StockStatus::InStock);
        assert_eq!(item.stock_status().to_string(), "In Stock");

        item.quantity = resolve_quantity(item.quantity, TransactionType::SetAbsolute, 5).unwrap();
        assert_eq!(item.quantity, 5);
        assert_eq!(item.stock_status(), StockStatus::LowStock);
        assert_eq!(item.stock_status().to_string(), "Low Stock");
    }

    /// Equal to the reorder level counts as low
    #[test]
    fn test_reorder_level_boundary() {
        assert!(is_low_stock(10, 10));
        assert!(is_low_stock(0, 0));
        assert!(!is_low_stock(11, 10));
        assert!(product(10, 10, "1.00").is_low_stock());
    }

    /// Selling more than is on hand fails and reports what is available
    #[test]
    fn test_oversell_rejected() {
        let err = resolve_quantity(3, TransactionType::Decrease, 5).unwrap_err();
        assert_eq!(
            err,
            StockError::InsufficientStock {
                available: 3,
                requested: 5
            }
        );
        assert_eq!(err.to_string(), "Insufficient stock. Available: 3");
    }

    /// A count of zero is a valid adjustment
    #[test]
    fn test_adjust_to_zero() {
        assert_eq!(resolve_quantity(17, TransactionType::SetAbsolute, 0), Ok(0));
    }

    /// Request body uses the wire names
    #[test]
    fn test_transaction_request_body() {
        let input: CreateStockTransactionInput = serde_json::from_str(
            r#"{"product_id": 9, "transaction_type": "out", "quantity": 4, "notes": "Damaged"}"#,
        )
        .unwrap();

        assert_eq!(input.transaction_type, TransactionType::Decrease);
        assert_eq!(input.resolve(10), Ok(6));
        assert_eq!(input.notes.as_deref(), Some("Damaged"));
    }

    /// Form preview matches what the server will compute
    #[test]
    fn test_form_preview() {
        let form = StockTransactionForm {
            product_id: "9".to_string(),
            transaction_type: "adjustment".to_string(),
            quantity: "25".to_string(),
            notes: String::new(),
        };
        assert_eq!(form.preview(3), Ok(25));

        let oversell = StockTransactionForm {
            transaction_type: "out".to_string(),
            quantity: "4".to_string(),
            ..form
        };
        assert!(oversell.preview(3).is_err());
    }

    /// Inventory value uses cost, not price
    #[test]
    fn test_inventory_value_at_cost() {
        let products = vec![product(38, 10, "18.00"), product(3, 10, "2.333")];
        assert_eq!(inventory_value(&products), dec("690.999").round_dp(2));
        assert_eq!(inventory_value(&products), dec("691.00"));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn transaction_type_strategy() -> impl Strategy<Value = TransactionType> {
        prop_oneof![
            Just(TransactionType::Increase),
            Just(TransactionType::Decrease),
            Just(TransactionType::SetAbsolute),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Increase always adds the magnitude
        #[test]
        fn prop_increase(q in 0i32..1_000_000, m in 1i32..1_000_000) {
            prop_assert_eq!(resolve_quantity(q, TransactionType::Increase, m), Ok(q + m));
        }

        /// Decrease within stock subtracts the magnitude
        #[test]
        fn prop_decrease(q in 1i32..1_000_000, m_seed in 1i32..1_000_000) {
            let m = (m_seed % q) + 1;
            prop_assert_eq!(resolve_quantity(q, TransactionType::Decrease, m), Ok(q - m));
        }

        /// Set-absolute ignores the prior quantity
        #[test]
        fn prop_set_absolute(q in 0i32..1_000_000, m in 0i32..1_000_000) {
            prop_assert_eq!(resolve_quantity(q, TransactionType::SetAbsolute, m), Ok(m));
        }

        /// No accepted transaction leaves stock negative
        #[test]
        fn prop_never_negative(
            q in 0i32..100_000,
            t in transaction_type_strategy(),
            m in -10i32..200_000,
        ) {
            if let Ok(new_quantity) = resolve_quantity(q, t, m) {
                prop_assert!(new_quantity >= 0);
            }
        }

        /// Low stock is exactly quantity <= reorder level
        #[test]
        fn prop_low_stock_flag(q in 0i32..10_000, r in 0i32..10_000) {
            prop_assert_eq!(is_low_stock(q, r), q <= r);
            let expected = if q <= r { StockStatus::LowStock } else { StockStatus::InStock };
            prop_assert_eq!(StockStatus::classify(q, r), expected);
        }

        /// Inventory value is rounded to cents
        #[test]
        fn prop_inventory_value_scale(
            quantities in prop::collection::vec(0i32..1_000, 0..20),
            cents in 0i64..100_000,
        ) {
            let cost = Decimal::new(cents, 3);
            let products: Vec<Product> = quantities
                .iter()
                .map(|q| Product { cost, ..product(*q, 10, "0") })
                .collect();
            let value = inventory_value(&products);
            prop_assert!(value.scale() <= 2);
            prop_assert!(value >= Decimal::ZERO);
        }
    }
}
