//! Dashboard statistics service

use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::ProductService;
use shared::{inventory_value, DashboardStats, OrderSummary, RECENT_ORDER_LIMIT};

#[derive(Clone)]
pub struct DashboardService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct CountsRow {
    total_products: i64,
    low_stock_count: i64,
    total_orders: i64,
    pending_orders: i64,
}

impl DashboardService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let counts = sqlx::query_as::<_, CountsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM products) AS total_products,
                (SELECT COUNT(*) FROM products WHERE quantity <= reorder_level) AS low_stock_count,
                (SELECT COUNT(*) FROM orders) AS total_orders,
                (SELECT COUNT(*) FROM orders WHERE status = 'pending') AS pending_orders
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let recent_orders = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT id, order_date, status, total_amount
            FROM orders
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(RECENT_ORDER_LIMIT)
        .fetch_all(&self.db)
        .await?;

        let products = ProductService::new(self.db.clone()).list().await?;

        Ok(DashboardStats {
            total_products: counts.total_products,
            low_stock_count: counts.low_stock_count,
            total_orders: counts.total_orders,
            pending_orders: counts.pending_orders,
            inventory_value: inventory_value(&products),
            recent_orders,
        })
    }
}
