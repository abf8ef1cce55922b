//! HTTP handlers for AI-assisted features

use axum::{extract::State, Json};

use super::extract::AppJson;
use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::AiService;
use crate::AppState;
use shared::{
    CategorizeRequest, CategorizeResponse, ForecastRequest, ForecastResponse, ReorderRequest,
    ReorderSuggestionsResponse,
};

pub async fn forecast(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    AppJson(request): AppJson<ForecastRequest>,
) -> AppResult<Json<ForecastResponse>> {
    let service = AiService::new(state.db, state.llm);
    Ok(Json(service.forecast(request).await?))
}

/// The threshold is accepted for compatibility; products are picked by reorder level
pub async fn reorder_suggestions(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    AppJson(_request): AppJson<ReorderRequest>,
) -> AppResult<Json<ReorderSuggestionsResponse>> {
    let service = AiService::new(state.db, state.llm);
    Ok(Json(service.reorder_suggestions().await?))
}

pub async fn categorize(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    AppJson(request): AppJson<CategorizeRequest>,
) -> AppResult<Json<CategorizeResponse>> {
    let service = AiService::new(state.db, state.llm);
    Ok(Json(service.categorize(request).await?))
}
