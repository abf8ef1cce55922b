//! HTTP handlers for the product catalog

use axum::{extract::State, Json};

use super::extract::{AppJson, AppPath};
use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::ProductService;
use crate::AppState;
use shared::{CreateProductInput, LowStockAlerts, MessageResponse, Product, UpdateProductInput};

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    AppJson(input): AppJson<CreateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.create(input).await?;
    Ok(Json(product))
}

/// List all products
pub async fn list_products(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db);
    Ok(Json(service.list().await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    AppPath(product_id): AppPath<i64>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    Ok(Json(service.get(product_id).await?))
}

/// Update a product's editable fields
pub async fn update_product(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    AppPath(product_id): AppPath<i64>,
    AppJson(input): AppJson<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.update(product_id, input).await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    AppPath(product_id): AppPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    let service = ProductService::new(state.db);
    service.delete(product_id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

/// Products at or below their reorder level
pub async fn low_stock_alerts(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<LowStockAlerts>> {
    let service = ProductService::new(state.db);
    Ok(Json(service.low_stock_alerts().await?))
}
