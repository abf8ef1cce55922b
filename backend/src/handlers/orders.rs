//! HTTP handlers for orders

use axum::{extract::State, Json};

use super::extract::{AppJson, AppPath, AppQuery};
use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::OrderService;
use crate::AppState;
use shared::{CreateOrderInput, Order, OrderStatusQuery, OrderStatusUpdated};

/// Place an order on behalf of the current user
pub async fn create_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    AppJson(input): AppJson<CreateOrderInput>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.db);
    let order = service.create(input, current_user.0.user_id).await?;
    Ok(Json(order))
}

pub async fn list_orders(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let service = OrderService::new(state.db);
    Ok(Json(service.list().await?))
}

pub async fn get_order(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    AppPath(order_id): AppPath<i64>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.db);
    Ok(Json(service.get(order_id).await?))
}

/// `PUT /orders/:id/status?status=completed`
pub async fn update_order_status(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    AppPath(order_id): AppPath<i64>,
    AppQuery(query): AppQuery<OrderStatusQuery>,
) -> AppResult<Json<OrderStatusUpdated>> {
    let service = OrderService::new(state.db);
    let order = service.update_status(order_id, query.status).await?;

    Ok(Json(OrderStatusUpdated {
        message: "Order status updated".to_string(),
        order,
    }))
}
