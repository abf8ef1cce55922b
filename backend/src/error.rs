//! Error handling for the inventory server
//!
//! Every error renders as `{"detail", "code", "field"?}` so dashboards can show
//! `detail` directly in a notification.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{ErrorBody, OrderError, StockError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Conflict: {message}")]
    Conflict { resource: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    // External service errors
    #[error("AI service error: {0}")]
    AiServiceError(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Status code and body for this error
    pub fn to_parts(&self) -> (StatusCode, ErrorBody) {
        let body = |code: &str, detail: String, field: Option<String>| ErrorBody {
            detail,
            code: code.to_string(),
            field,
        };

        match self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                body("INVALID_CREDENTIALS", "Invalid credentials".to_string(), None),
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                body("TOKEN_EXPIRED", "Token has expired".to_string(), None),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                body("INVALID_TOKEN", "Invalid token".to_string(), None),
            ),
            AppError::InsufficientPermissions => (
                StatusCode::FORBIDDEN,
                body(
                    "INSUFFICIENT_PERMISSIONS",
                    "You do not have permission to perform this action".to_string(),
                    None,
                ),
            ),
            AppError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                body("UNAUTHORIZED", message.clone(), None),
            ),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                body("VALIDATION_ERROR", message.clone(), Some(field.clone())),
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                body("VALIDATION_ERROR", msg.clone(), None),
            ),
            AppError::DuplicateEntry(message) => (
                StatusCode::CONFLICT,
                body("DUPLICATE_ENTRY", message.clone(), None),
            ),
            AppError::Conflict { resource, message } => (
                StatusCode::CONFLICT,
                body("CONFLICT", message.clone(), Some(resource.clone())),
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                body("NOT_FOUND", format!("{} not found", resource), None),
            ),
            AppError::InvalidStateTransition(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                body("INVALID_STATE_TRANSITION", msg.clone(), None),
            ),
            AppError::InsufficientStock(msg) => (
                StatusCode::BAD_REQUEST,
                body("INSUFFICIENT_STOCK", msg.clone(), Some("quantity".to_string())),
            ),
            AppError::AiServiceError(msg) => (
                StatusCode::BAD_GATEWAY,
                body("AI_SERVICE_ERROR", msg.clone(), None),
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                body("DATABASE_ERROR", "A database error occurred".to_string(), None),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                body("INTERNAL_ERROR", msg.clone(), None),
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                body(
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                ),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_parts();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {:?}", self);
        }

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the first failing field only
        let first = errors
            .field_errors()
            .into_iter()
            .min_by_key(|(field, _)| *field)
            .and_then(|(field, errs)| {
                errs.first().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field));
                    (field.to_string(), message)
                })
            });

        match first {
            Some((field, message)) => AppError::Validation { field, message },
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::InsufficientStock { .. } => AppError::InsufficientStock(err.to_string()),
            StockError::UnknownType(_) => AppError::Validation {
                field: "transaction_type".to_string(),
                message: err.to_string(),
            },
            StockError::InvalidMagnitude { .. } | StockError::Overflow => AppError::Validation {
                field: "quantity".to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Empty => AppError::Validation {
                field: "items".to_string(),
                message: err.to_string(),
            },
            OrderError::InvalidQuantity => AppError::Validation {
                field: "quantity".to_string(),
                message: err.to_string(),
            },
            OrderError::InvalidTransition { .. } => AppError::InvalidStateTransition(err.to_string()),
            OrderError::UnknownStatus(_) => AppError::Validation {
                field: "status".to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

/// Map a unique-constraint violation to a duplicate entry error
pub fn map_unique_violation(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::DuplicateEntry(message.to_string())
        }
        _ => AppError::DatabaseError(err),
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{OrderStatus, StockError};
    use validator::Validate;

    #[test]
    fn test_insufficient_stock_maps_to_bad_request() {
        let err: AppError = StockError::InsufficientStock {
            available: 3,
            requested: 4,
        }
        .into();
        let (status, body) = err.to_parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INSUFFICIENT_STOCK");
        assert_eq!(body.detail, "Insufficient stock. Available: 3");
    }

    #[test]
    fn test_invalid_transition_maps_to_unprocessable() {
        let err: AppError = OrderError::InvalidTransition {
            from: OrderStatus::Completed,
            to: OrderStatus::Pending,
        }
        .into();
        let (status, body) = err.to_parts();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.code, "INVALID_STATE_TRANSITION");
    }

    #[test]
    fn test_validation_errors_report_field() {
        let input = shared::CreateSupplierInput::default();
        let err: AppError = input.validate().unwrap_err().into();
        let (status, body) = err.to_parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.field.as_deref(), Some("name"));
        assert_eq!(body.detail, "Supplier name is required");
    }

    #[test]
    fn test_not_found_detail() {
        let (status, body) = AppError::NotFound("Product".to_string()).to_parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.detail, "Product not found");
        assert!(body.field.is_none());
    }
}
