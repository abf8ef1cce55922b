//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};

use super::extract::AppJson;
use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::AuthService;
use crate::AppState;
use shared::{LoginInput, LoginResponse, RegisterInput, User};

/// Register endpoint handler
pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterInput>,
) -> AppResult<(StatusCode, Json<User>)> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let user = auth_service.register(body).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginInput>,
) -> AppResult<Json<LoginResponse>> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let response = auth_service.login(&body).await?;

    Ok(Json(response))
}

/// User directory, admins and managers only
pub async fn list_users(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    current_user.0.require_user_manager()?;

    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let users = auth_service.list_users().await?;

    Ok(Json(users))
}
