//! Request and response models for AI-assisted features

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Categories the categorization prompt may choose from
pub const PRODUCT_CATEGORIES: &[&str] = &[
    "Electronics",
    "Food & Beverage",
    "Household",
    "Personal Care",
    "Clothing",
    "Other",
];

/// Products sent to the model per reorder-suggestion request
pub const MAX_REORDER_SUGGESTIONS: usize = 5;

/// Transactions included in a forecast prompt
pub const FORECAST_HISTORY_LIMIT: i64 = 30;

fn default_forecast_days() -> i32 {
    30
}

/// Demand forecast request for one product
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForecastRequest {
    pub product_id: i64,
    #[serde(default = "default_forecast_days")]
    #[validate(range(min = 1, max = 365, message = "Days must be between 1 and 365"))]
    pub days: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub product_id: i64,
    pub product_name: String,
    pub current_stock: i32,
    /// Raw model answer, expected to be JSON text
    pub forecast: String,
}

fn default_reorder_threshold() -> Option<f64> {
    Some(0.8)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReorderRequest {
    #[serde(default = "default_reorder_threshold")]
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReorderSuggestion {
    pub product_id: i64,
    pub product_name: String,
    pub sku: String,
    pub current_stock: i32,
    pub reorder_level: i32,
    pub suggested_quantity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderSuggestionsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub suggestions: Vec<ReorderSuggestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategorizeRequest {
    #[validate(length(min = 1, max = 200, message = "Product name is required"))]
    pub product_name: String,
    #[serde(default)]
    pub product_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizeResponse {
    pub product_name: String,
    pub ai_response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_days_default_and_range() {
        let request: ForecastRequest = serde_json::from_str(r#"{"product_id":4}"#).unwrap();
        assert_eq!(request.days, 30);
        assert!(request.validate().is_ok());

        let too_long = ForecastRequest {
            product_id: 4,
            days: 366,
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_reorder_threshold_default() {
        let request: ReorderRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.threshold, Some(0.8));
    }

    #[test]
    fn test_suggestions_message_omitted_when_absent() {
        let response = ReorderSuggestionsResponse {
            message: None,
            suggestions: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("message").is_none());
    }
}
