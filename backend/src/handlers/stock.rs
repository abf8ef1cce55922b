//! HTTP handlers for stock transactions

use axum::{extract::State, Json};

use super::extract::{AppJson, AppQuery};
use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::StockService;
use crate::AppState;
use shared::{CreateStockTransactionInput, StockTransaction, StockTransactionFilter};

/// Record a stock transaction as the current user
pub async fn create_stock_transaction(
    State(state): State<AppState>,
    current_user: CurrentUser,
    AppJson(input): AppJson<CreateStockTransactionInput>,
) -> AppResult<Json<StockTransaction>> {
    let service = StockService::new(state.db);
    let transaction = service.create(input, current_user.0.user_id).await?;
    Ok(Json(transaction))
}

pub async fn list_stock_transactions(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    AppQuery(filter): AppQuery<StockTransactionFilter>,
) -> AppResult<Json<Vec<StockTransaction>>> {
    let service = StockService::new(state.db);
    Ok(Json(service.list(&filter).await?))
}
