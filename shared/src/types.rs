//! Common types shared by the backend and its clients

use serde::{Deserialize, Serialize};

/// JSON body of every error response
///
/// `detail` carries the human-readable message shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Plain acknowledgement, e.g. after a delete
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response of the health endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Response of the API root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    pub message: String,
    pub version: String,
    pub features: Vec<String>,
}

/// Feature list advertised by the API root
pub const API_FEATURES: &[&str] = &[
    "User Authentication (Role-based)",
    "Product Management",
    "Order Processing",
    "Stock Tracking",
    "Supplier Management",
    "AI Forecasting",
    "AI Reorder Suggestions",
    "AI Product Categorization",
];
