//! Database fixtures for service tests

use rust_decimal::Decimal;
use sqlx::PgPool;

pub async fn seed_user(db: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash, role) VALUES ($1, $2, 'x', 'staff') RETURNING id",
    )
    .bind(username)
    .bind(format!("{}@store.ph", username))
    .fetch_one(db)
    .await
    .unwrap()
}

pub async fn seed_supplier(db: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO suppliers (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(db)
        .await
        .unwrap()
}

pub async fn seed_product(
    db: &PgPool,
    sku: &str,
    quantity: i32,
    price: Decimal,
    supplier_id: Option<i64>,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO products (name, sku, price, cost, quantity, supplier_id)
        VALUES ($1, $1, $2, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(sku)
    .bind(price)
    .bind(quantity)
    .bind(supplier_id)
    .fetch_one(db)
    .await
    .unwrap()
}

pub async fn quantity_of(db: &PgPool, product_id: i64) -> i32 {
    sqlx::query_scalar("SELECT quantity FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_one(db)
        .await
        .unwrap()
}

pub async fn count(db: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(db)
        .await
        .unwrap()
}
