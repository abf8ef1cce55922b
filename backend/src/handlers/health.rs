//! Health check and API info handlers

use axum::{extract::State, Json};
use shared::{ApiInfo, HealthResponse, API_FEATURES};

use crate::AppState;

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Check database connectivity
    let db_status = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "connected".to_string(),
        Err(e) => {
            tracing::warn!("Health check database error: {}", e);
            "disconnected".to_string()
        }
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    })
}

/// API root with name, version and feature list
pub async fn api_info() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Inventory Management API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: API_FEATURES.iter().map(|f| f.to_string()).collect(),
    })
}
