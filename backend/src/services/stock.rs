//! Stock transaction service
//!
//! Every quantity change goes through [`resolve_quantity`] and is written
//! together with its audit record inside one database transaction.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, PgPool};
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::{
    resolve_quantity, CreateStockTransactionInput, StockTransaction, StockTransactionFilter,
    TransactionType,
};

/// Largest page the transaction list returns
const MAX_LIST_LIMIT: i64 = 500;

#[derive(Clone)]
pub struct StockService {
    db: PgPool,
}

/// Product row locked for an adjustment
#[derive(Debug, FromRow)]
pub(crate) struct LockedProduct {
    pub id: i64,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
}

/// Lock a product row until the surrounding transaction ends
pub(crate) async fn lock_product(conn: &mut PgConnection, id: i64) -> AppResult<LockedProduct> {
    sqlx::query_as::<_, LockedProduct>(
        "SELECT id, name, quantity, price FROM products WHERE id = $1 FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| AppError::NotFound("Product".to_string()))
}

/// Distinct product ids in the order their rows get locked
pub(crate) fn lock_order(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut ids: Vec<i64> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Lock several product rows in ascending id order
///
/// Concurrent callers always acquire row locks in the same order, so two
/// multi-product transactions cannot wait on each other.
pub(crate) async fn lock_products(
    conn: &mut PgConnection,
    ids: impl IntoIterator<Item = i64>,
) -> AppResult<HashMap<i64, LockedProduct>> {
    let ids = lock_order(ids);

    let rows = sqlx::query_as::<_, LockedProduct>(
        "SELECT id, name, quantity, price FROM products WHERE id = ANY($1) ORDER BY id FOR UPDATE",
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;

    if rows.len() != ids.len() {
        return Err(AppError::NotFound("Product".to_string()));
    }

    Ok(rows.into_iter().map(|row| (row.id, row)).collect())
}

/// Store a resolved quantity and append the audit record
///
/// `magnitude` is the requested amount, recorded as-is.
pub(crate) async fn record_adjustment(
    conn: &mut PgConnection,
    product_id: i64,
    transaction_type: TransactionType,
    magnitude: i32,
    new_quantity: i32,
    user_id: i64,
    notes: Option<&str>,
) -> AppResult<StockTransaction> {
    sqlx::query("UPDATE products SET quantity = $2, updated_at = NOW() WHERE id = $1")
        .bind(product_id)
        .bind(new_quantity)
        .execute(&mut *conn)
        .await?;

    let transaction = sqlx::query_as::<_, StockTransaction>(
        r#"
        INSERT INTO stock_transactions (product_id, transaction_type, quantity, user_id, notes)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, product_id, transaction_type, quantity, user_id, notes, transaction_date
        "#,
    )
    .bind(product_id)
    .bind(transaction_type)
    .bind(magnitude)
    .bind(user_id)
    .bind(notes)
    .fetch_one(&mut *conn)
    .await?;

    Ok(transaction)
}

impl StockService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a stock transaction and apply it to the product
    pub async fn create(
        &self,
        input: CreateStockTransactionInput,
        user_id: i64,
    ) -> AppResult<StockTransaction> {
        input.validate()?;

        let mut tx = self.db.begin().await?;

        let product = lock_product(&mut tx, input.product_id).await?;
        let new_quantity = input.resolve(product.quantity)?;

        let transaction = record_adjustment(
            &mut tx,
            product.id,
            input.transaction_type,
            input.quantity,
            new_quantity,
            user_id,
            input.notes.as_deref(),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            product_id = product.id,
            transaction_type = %input.transaction_type,
            quantity = input.quantity,
            from = product.quantity,
            to = new_quantity,
            "Stock adjusted"
        );

        Ok(transaction)
    }

    /// Newest first, optionally for one product
    pub async fn list(&self, filter: &StockTransactionFilter) -> AppResult<Vec<StockTransaction>> {
        let limit = filter.limit.unwrap_or(MAX_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);

        let transactions = sqlx::query_as::<_, StockTransaction>(
            r#"
            SELECT id, product_id, transaction_type, quantity, user_id, notes, transaction_date
            FROM stock_transactions
            WHERE ($1::BIGINT IS NULL OR product_id = $1)
            ORDER BY transaction_date DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(filter.product_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(transactions)
    }

    /// Most recent transactions of one product
    pub async fn recent_for_product(
        &self,
        product_id: i64,
        limit: i64,
    ) -> AppResult<Vec<StockTransaction>> {
        self.list(&StockTransactionFilter {
            product_id: Some(product_id),
            limit: Some(limit),
        })
        .await
    }
}

/// Resolve an order line against a locked product
///
/// The message names the product so the dashboard can point at the line.
pub(crate) fn resolve_order_line(product: &LockedProduct, quantity: i32) -> AppResult<i32> {
    resolve_quantity(product.quantity, TransactionType::Decrease, quantity).map_err(|err| {
        match err {
            shared::StockError::InsufficientStock { available, .. } => {
                AppError::InsufficientStock(format!(
                    "Insufficient stock for {}. Available: {}",
                    product.name, available
                ))
            }
            other => other.into(),
        }
    })
}
