//! Dashboard handler

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::DashboardService;
use crate::AppState;
use shared::DashboardStats;

pub async fn dashboard_stats(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<DashboardStats>> {
    let service = DashboardService::new(state.db);
    Ok(Json(service.stats().await?))
}
