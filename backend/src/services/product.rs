//! Product catalog service

use sqlx::PgPool;
use validator::Validate;

use crate::error::{map_unique_violation, AppError, AppResult};
use shared::{CreateProductInput, LowStockAlerts, LowStockProduct, Product, UpdateProductInput};

const PRODUCT_COLUMNS: &str = "id, name, sku, description, category, price, cost, quantity, \
                               reorder_level, supplier_id, created_at, updated_at";

/// Product service for catalog CRUD and low-stock queries
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

impl ProductService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product, rejecting duplicate SKUs
    pub async fn create(&self, input: CreateProductInput) -> AppResult<Product> {
        input.validate()?;

        let sku_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE sku = $1)")
                .bind(&input.sku)
                .fetch_one(&self.db)
                .await?;

        if sku_taken {
            return Err(AppError::DuplicateEntry("SKU already exists".to_string()));
        }

        if let Some(supplier_id) = input.supplier_id {
            self.ensure_supplier_exists(supplier_id).await?;
        }

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, sku, description, category, price, cost, quantity, reorder_level, supplier_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.sku)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.price)
        .bind(input.cost)
        .bind(input.quantity)
        .bind(input.reorder_level)
        .bind(input.supplier_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_unique_violation(e, "SKU already exists"))?;

        tracing::info!(product_id = product.id, sku = %product.sku, "Product created");

        Ok(product)
    }

    pub async fn list(&self) -> AppResult<Vec<Product>> {
        let products =
            sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"))
                .fetch_all(&self.db)
                .await?;

        Ok(products)
    }

    pub async fn get(&self, id: i64) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(&format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    /// Apply the provided fields, leaving the rest untouched
    pub async fn update(&self, id: i64, input: UpdateProductInput) -> AppResult<Product> {
        input.validate()?;

        if let Some(supplier_id) = input.supplier_id {
            self.ensure_supplier_exists(supplier_id).await?;
        }

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                description = CASE WHEN $3::TEXT IS NULL THEN description ELSE NULLIF(TRIM($3), '') END,
                category = CASE WHEN $4::TEXT IS NULL THEN category ELSE NULLIF(TRIM($4), '') END,
                price = COALESCE($5, price),
                cost = COALESCE($6, cost),
                reorder_level = COALESCE($7, reorder_level),
                supplier_id = COALESCE($8, supplier_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.price)
        .bind(input.cost)
        .bind(input.reorder_level)
        .bind(input.supplier_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        tracing::info!(product_id = id, "Product updated");

        Ok(product)
    }

    /// Delete a product that has no stock history or order lines
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let referenced = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM stock_transactions WHERE product_id = $1)
                OR EXISTS(SELECT 1 FROM order_items WHERE product_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        if referenced {
            return Err(AppError::Conflict {
                resource: "product".to_string(),
                message: "Product has stock transactions or orders and cannot be deleted"
                    .to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        tracing::info!(product_id = id, "Product deleted");

        Ok(())
    }

    /// Products at or below their reorder level
    pub async fn low_stock_alerts(&self) -> AppResult<LowStockAlerts> {
        let products = sqlx::query_as::<_, LowStockProduct>(
            r#"
            SELECT id, name, sku, quantity, reorder_level
            FROM products
            WHERE quantity <= reorder_level
            ORDER BY quantity - reorder_level, id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(LowStockAlerts::from(products))
    }

    /// Full rows of low-stock products, most urgent first
    pub async fn low_stock_products(&self, limit: i64) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE quantity <= reorder_level
            ORDER BY quantity - reorder_level, id
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    async fn ensure_supplier_exists(&self, supplier_id: i64) -> AppResult<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                .bind(supplier_id)
                .fetch_one(&self.db)
                .await?;

        if exists {
            Ok(())
        } else {
            Err(AppError::Validation {
                field: "supplier_id".to_string(),
                message: "Supplier not found".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{seed_product, seed_supplier};
    use rust_decimal::Decimal;

    #[sqlx::test]
    async fn test_update_clears_blank_text_and_keeps_absent_fields(db: PgPool) {
        let supplier = seed_supplier(&db, "Luzon Grains").await;
        let rice = seed_product(&db, "RICE-5", 5, Decimal::new(32500, 2), Some(supplier)).await;
        sqlx::query("UPDATE products SET description = 'Jasmine', category = 'Food & Beverage' WHERE id = $1")
            .bind(rice)
            .execute(&db)
            .await
            .unwrap();
        let service = ProductService::new(db.clone());

        let updated = service
            .update(
                rice,
                UpdateProductInput {
                    description: Some(String::new()),
                    price: Some(Decimal::new(33000, 2)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description, None);
        assert_eq!(updated.category.as_deref(), Some("Food & Beverage"));
        assert_eq!(updated.price, Decimal::new(33000, 2));
        assert_eq!(updated.name, "RICE-5");
        assert_eq!(updated.supplier_id, Some(supplier));
    }

    #[sqlx::test]
    async fn test_update_unknown_product(db: PgPool) {
        let service = ProductService::new(db.clone());
        let err = service
            .update(7, UpdateProductInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
