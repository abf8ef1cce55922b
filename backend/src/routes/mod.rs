//! Route definitions for the inventory API

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
///
/// Everything except the root, health and login/registration requires a
/// bearer token.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Public routes
        .route("/", get(handlers::api_info))
        .route("/health", get(handlers::health_check))
        .nest("/auth", auth_routes(state.clone()))
        // Protected routes
        .nest("/products", product_routes(state.clone()))
        .nest("/suppliers", supplier_routes(state.clone()))
        .nest("/orders", order_routes(state.clone()))
        .nest("/stock", stock_routes(state.clone()))
        .nest("/ai", ai_routes(state.clone()))
        .nest("/dashboard", dashboard_routes(state))
}

/// Authentication routes, registration and login are public
fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/users", get(handlers::list_users))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .merge(protected)
}

/// Product catalog routes (protected)
fn product_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/low-stock/alerts", get(handlers::low_stock_alerts))
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Supplier routes (protected)
fn supplier_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            "/:supplier_id",
            get(handlers::get_supplier).delete(handlers::delete_supplier),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Order routes (protected)
fn order_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders).post(handlers::create_order))
        .route("/:order_id", get(handlers::get_order))
        .route("/:order_id/status", put(handlers::update_order_status))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Stock transaction routes (protected)
fn stock_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/transactions",
            get(handlers::list_stock_transactions).post(handlers::create_stock_transaction),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// AI routes (protected)
fn ai_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/forecast", post(handlers::forecast))
        .route("/reorder-suggestions", post(handlers::reorder_suggestions))
        .route("/categorize", post(handlers::categorize))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Dashboard routes (protected)
fn dashboard_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::dashboard_stats))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
