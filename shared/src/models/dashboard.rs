//! Dashboard statistics

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderSummary, Product};

/// Recent orders shown on the dashboard
pub const RECENT_ORDER_LIMIT: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: i64,
    pub low_stock_count: i64,
    pub total_orders: i64,
    pub pending_orders: i64,
    /// Sum of `quantity * cost`, rounded to cents
    pub inventory_value: Decimal,
    pub recent_orders: Vec<OrderSummary>,
}

/// Value of all stock on hand at cost, rounded to two decimal places
pub fn inventory_value<'a, I>(products: I) -> Decimal
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .map(Product::stock_value)
        .sum::<Decimal>()
        .round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    fn product(quantity: i32, cost: &str) -> Product {
        Product {
            id: 1,
            name: "Item".to_string(),
            sku: format!("SKU-{}", quantity),
            description: None,
            category: None,
            price: Decimal::from(1),
            cost: Decimal::from_str(cost).unwrap(),
            quantity,
            reorder_level: 10,
            supplier_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_inventory_value_rounds_to_cents() {
        let products = vec![product(3, "1.333"), product(2, "10.50")];
        // 3.999 + 21.00 = 24.999
        assert_eq!(inventory_value(&products), Decimal::from_str("25.00").unwrap());
    }

    #[test]
    fn test_inventory_value_empty() {
        assert_eq!(inventory_value(&Vec::<Product>::new()), Decimal::ZERO);
    }
}
