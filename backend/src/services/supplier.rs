//! Supplier directory service

use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::{CreateSupplierInput, Supplier};

#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

impl SupplierService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        let input = input.normalized();
        input.validate()?;

        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, contact_person, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, contact_person, email, phone, address, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.contact_person)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(supplier_id = supplier.id, "Supplier created");

        Ok(supplier)
    }

    pub async fn list(&self) -> AppResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, contact_person, email, phone, address, created_at FROM suppliers ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(suppliers)
    }

    pub async fn get(&self, id: i64) -> AppResult<Supplier> {
        sqlx::query_as::<_, Supplier>(
            "SELECT id, name, contact_person, email, phone, address, created_at FROM suppliers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))
    }

    /// Delete a supplier; its products keep existing with no supplier
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let detached = sqlx::query("UPDATE products SET supplier_id = NULL, updated_at = NOW() WHERE supplier_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        tx.commit().await?;

        tracing::info!(supplier_id = id, detached_products = detached, "Supplier deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{count, seed_product, seed_supplier};
    use rust_decimal::Decimal;

    async fn supplier_of(db: &PgPool, product_id: i64) -> Option<i64> {
        sqlx::query_scalar("SELECT supplier_id FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_one(db)
            .await
            .unwrap()
    }

    #[sqlx::test]
    async fn test_delete_keeps_products_without_supplier(db: PgPool) {
        let supplier = seed_supplier(&db, "Luzon Grains").await;
        let other = seed_supplier(&db, "Visayas Soap").await;
        let rice = seed_product(&db, "RICE-5", 5, Decimal::ONE, Some(supplier)).await;
        let soap = seed_product(&db, "SOAP-1", 5, Decimal::ONE, Some(other)).await;
        let service = SupplierService::new(db.clone());

        service.delete(supplier).await.unwrap();

        assert_eq!(supplier_of(&db, rice).await, None);
        assert_eq!(supplier_of(&db, soap).await, Some(other));
        assert_eq!(count(&db, "products").await, 2);
        assert!(matches!(service.get(supplier).await, Err(AppError::NotFound(_))));
    }

    #[sqlx::test]
    async fn test_delete_unknown_supplier(db: PgPool) {
        let service = SupplierService::new(db.clone());
        assert!(matches!(service.delete(42).await, Err(AppError::NotFound(_))));
    }
}
