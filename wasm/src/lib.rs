//! WebAssembly module for the inventory dashboard
//!
//! Provides client-side computation for:
//! - Stock status badges and the quantity preview of a stock transaction
//! - Order status badges and available actions
//! - Parsing product, stock and order forms into API request bodies
//! - Offline field validation

use std::collections::HashMap;

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::forms::*;
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("inventory-wasm ready"));
}

fn to_js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

/// "Low Stock" or "In Stock"
#[wasm_bindgen]
pub fn stock_status_label(quantity: i32, reorder_level: i32) -> String {
    StockStatus::classify(quantity, reorder_level).to_string()
}

#[wasm_bindgen]
pub fn stock_status_badge(quantity: i32, reorder_level: i32) -> String {
    StockStatus::classify(quantity, reorder_level)
        .badge_class()
        .to_string()
}

/// Badge class for any order status string, unknown ones included
#[wasm_bindgen]
pub fn order_status_badge(status: &str) -> String {
    StatusBadge::for_status(status).css_class().to_string()
}

/// Whether complete/cancel buttons should be shown
#[wasm_bindgen]
pub fn order_status_actions(status: &str) -> bool {
    status_actions_available(status)
}

#[wasm_bindgen]
pub fn transaction_type_label(transaction_type: &str) -> Result<String, JsValue> {
    transaction_type
        .parse::<TransactionType>()
        .map(|t| t.label().to_string())
        .map_err(to_js_error)
}

fn preview_quantity(current: i32, transaction_type: &str, quantity: i32) -> Result<i32, String> {
    let transaction_type = transaction_type
        .parse::<TransactionType>()
        .map_err(|e| e.to_string())?;
    resolve_quantity(current, transaction_type, quantity).map_err(|e| e.to_string())
}

/// Quantity a product would hold after the given transaction
#[wasm_bindgen]
pub fn preview_stock_quantity(
    current: i32,
    transaction_type: &str,
    quantity: i32,
) -> Result<i32, JsValue> {
    preview_quantity(current, transaction_type, quantity).map_err(to_js_error)
}

fn product_form_body(form_json: &str, editing: bool) -> Result<String, String> {
    let form: ProductForm =
        serde_json::from_str(form_json).map_err(|e| format!("Invalid form JSON: {}", e))?;

    let body = if editing {
        serde_json::to_string(&form.to_update_input().map_err(|e| e.to_string())?)
    } else {
        serde_json::to_string(&form.to_create_input().map_err(|e| e.to_string())?)
    };
    body.map_err(|e| e.to_string())
}

/// Turn the product form into a create or update request body
#[wasm_bindgen]
pub fn parse_product_form(form_json: &str, editing: bool) -> Result<String, JsValue> {
    product_form_body(form_json, editing).map_err(to_js_error)
}

fn stock_form_body(form_json: &str) -> Result<String, String> {
    let form: StockTransactionForm =
        serde_json::from_str(form_json).map_err(|e| format!("Invalid form JSON: {}", e))?;
    let input = form.to_input().map_err(|e| e.to_string())?;
    serde_json::to_string(&input).map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn parse_stock_form(form_json: &str) -> Result<String, JsValue> {
    stock_form_body(form_json).map_err(to_js_error)
}

fn order_draft_body(draft_json: &str) -> Result<String, String> {
    let draft: OrderDraft =
        serde_json::from_str(draft_json).map_err(|e| format!("Invalid draft JSON: {}", e))?;
    let input = draft.to_input().map_err(|e| e.to_string())?;
    serde_json::to_string(&input).map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn parse_order_draft(draft_json: &str) -> Result<String, JsValue> {
    order_draft_body(draft_json).map_err(to_js_error)
}

fn order_total_preview(draft_json: &str, prices_json: &str) -> Result<String, String> {
    let draft: OrderDraft =
        serde_json::from_str(draft_json).map_err(|e| format!("Invalid draft JSON: {}", e))?;
    let prices: HashMap<i64, f64> =
        serde_json::from_str(prices_json).map_err(|e| format!("Invalid prices JSON: {}", e))?;

    let total = draft.preview_total(|product_id| {
        prices
            .get(&product_id)
            .and_then(|price| Decimal::try_from(*price).ok())
            .map(|price| price.round_dp(2))
    });
    Ok(format!("{:.2}", total))
}

/// Running order total from a `{product_id: price}` map
#[wasm_bindgen]
pub fn preview_order_total(draft_json: &str, prices_json: &str) -> Result<String, JsValue> {
    order_total_preview(draft_json, prices_json).map_err(to_js_error)
}

/// Error message for an email field, or nothing when it is valid
#[wasm_bindgen]
pub fn check_email(email: &str) -> Option<String> {
    validate_email(email).err().map(str::to_string)
}

#[wasm_bindgen]
pub fn check_password(password: &str) -> Option<String> {
    validate_password(password).err().map(str::to_string)
}

#[wasm_bindgen]
pub fn check_sku(sku: &str) -> Option<String> {
    validate_sku(sku).err().map(str::to_string)
}
