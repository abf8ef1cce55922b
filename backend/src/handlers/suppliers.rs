//! HTTP handlers for suppliers

use axum::{extract::State, Json};

use super::extract::{AppJson, AppPath};
use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::SupplierService;
use crate::AppState;
use shared::{CreateSupplierInput, MessageResponse, Supplier};

pub async fn create_supplier(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    AppJson(input): AppJson<CreateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    Ok(Json(service.create(input).await?))
}

pub async fn list_suppliers(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.db);
    Ok(Json(service.list().await?))
}

pub async fn get_supplier(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    AppPath(supplier_id): AppPath<i64>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    Ok(Json(service.get(supplier_id).await?))
}

/// Delete a supplier, detaching its products
pub async fn delete_supplier(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    AppPath(supplier_id): AppPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    let service = SupplierService::new(state.db);
    service.delete(supplier_id).await?;
    Ok(Json(MessageResponse::new("Supplier deleted successfully")))
}
