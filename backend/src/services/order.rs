//! Order placement and fulfillment service

use std::collections::HashMap;

use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::stock::{lock_products, record_adjustment, resolve_order_line};
use shared::{order_total, CreateOrderInput, Order, OrderItem, OrderStatus, TransactionType};

/// Note attached to the stock transactions an order creates
const ORDER_STOCK_NOTE: &str = "Order created";

#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

/// Order row without its lines
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    order_date: chrono::DateTime<chrono::Utc>,
    status: OrderStatus,
    total_amount: rust_decimal::Decimal,
    created_by: i64,
    notes: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl OrderRow {
    fn with_items(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: self.id,
            order_date: self.order_date,
            status: self.status,
            total_amount: self.total_amount,
            created_by: self.created_by,
            notes: self.notes,
            items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const ORDER_COLUMNS: &str =
    "id, order_date, status, total_amount, created_by, notes, created_at, updated_at";

impl OrderService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Place an order, taking its lines out of stock
    ///
    /// Prices are snapshotted per line. Any failing line rolls back the whole
    /// order, including earlier stock movements.
    pub async fn create(&self, input: CreateOrderInput, user_id: i64) -> AppResult<Order> {
        input.validate()?;
        input.check()?;

        let mut tx = self.db.begin().await?;

        let order = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            INSERT INTO orders (created_by, notes, status, total_amount)
            VALUES ($1, $2, 'pending', 0)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        let mut products =
            lock_products(&mut tx, input.items.iter().map(|line| line.product_id)).await?;

        let mut items = Vec::with_capacity(input.items.len());
        for line in &input.items {
            let product = products
                .get_mut(&line.product_id)
                .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
            let new_quantity = resolve_order_line(product, line.quantity)?;

            let item = sqlx::query_as::<_, OrderItem>(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, price)
                VALUES ($1, $2, $3, $4)
                RETURNING id, order_id, product_id, quantity, price
                "#,
            )
            .bind(order.id)
            .bind(product.id)
            .bind(line.quantity)
            .bind(product.price)
            .fetch_one(&mut *tx)
            .await?;

            record_adjustment(
                &mut tx,
                product.id,
                TransactionType::Decrease,
                line.quantity,
                new_quantity,
                user_id,
                Some(ORDER_STOCK_NOTE),
            )
            .await?;

            // Later lines for the same product see this line's decrease
            product.quantity = new_quantity;
            items.push(item);
        }

        let total = order_total(items.iter().map(|item| (item.price, item.quantity)));

        let order = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET total_amount = $2 WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order.id)
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            order_id = order.id,
            lines = items.len(),
            total = %total,
            "Order created"
        );

        Ok(order.with_items(items))
    }

    /// All orders, newest first
    pub async fn list(&self) -> AppResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, quantity, price
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY order_id, id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.db)
        .await?;

        let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id).or_default().push(item);
        }

        let orders = rows
            .into_iter()
            .map(|row| {
                let own = by_order.remove(&row.id).unwrap_or_default();
                row.with_items(own)
            })
            .collect();

        Ok(orders)
    }

    pub async fn get(&self, id: i64) -> AppResult<Order> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        let items = self.items_of(id).await?;

        Ok(row.with_items(items))
    }

    /// Move a pending order to completed or cancelled
    pub async fn update_status(&self, id: i64, next: OrderStatus) -> AppResult<Order> {
        let mut tx = self.db.begin().await?;

        let current = sqlx::query_scalar::<_, OrderStatus>(
            "SELECT status FROM orders WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        let next = current.transition_to(next)?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(next)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(order_id = id, from = %current, to = %next, "Order status updated");

        let items = self.items_of(id).await?;

        Ok(row.with_items(items))
    }

    async fn items_of(&self, order_id: i64) -> AppResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, product_id, quantity, price FROM order_items WHERE order_id = $1 ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }
}
