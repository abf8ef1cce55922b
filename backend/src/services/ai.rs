//! AI-assisted forecasting, reorder suggestions and categorization

use serde::Serialize;
use sqlx::PgPool;
use validator::Validate;

use crate::error::AppResult;
use crate::external::LlmClient;
use crate::services::{ProductService, StockService};
use shared::{
    CategorizeRequest, CategorizeResponse, ForecastRequest, ForecastResponse, Product,
    ReorderSuggestion, ReorderSuggestionsResponse, StockTransaction, FORECAST_HISTORY_LIMIT,
    MAX_REORDER_SUGGESTIONS, PRODUCT_CATEGORIES,
};

#[derive(Clone)]
pub struct AiService {
    products: ProductService,
    stock: StockService,
    llm: LlmClient,
}

/// Transaction as summarized for the model
#[derive(Debug, Serialize)]
struct HistoryEntry<'a> {
    date: String,
    #[serde(rename = "type")]
    kind: &'a str,
    quantity: i32,
}

pub fn forecast_prompt(product: &Product, days: i32, history: &[StockTransaction]) -> String {
    let entries: Vec<HistoryEntry> = history
        .iter()
        .map(|t| HistoryEntry {
            date: t.transaction_date.to_rfc3339(),
            kind: t.transaction_type.as_str(),
            quantity: t.quantity,
        })
        .collect();
    let history_json = serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string());

    format!(
        "Analyze this product's inventory data and provide a forecast for the next {days} days:\n\n\
         Product: {name} (SKU: {sku})\n\
         Current Stock: {quantity}\n\
         Reorder Level: {reorder}\n\
         Recent Transactions: {history_json}\n\n\
         Provide:\n\
         1. Predicted demand for next {days} days\n\
         2. Recommended reorder date\n\
         3. Suggested order quantity\n\
         4. Risk assessment (low/medium/high)\n\n\
         Format as JSON with keys: predicted_demand, reorder_date, order_quantity, risk_level, analysis",
        name = product.name,
        sku = product.sku,
        quantity = product.quantity,
        reorder = product.reorder_level,
    )
}

pub fn reorder_prompt(product: &Product) -> String {
    format!(
        "Product needs reordering:\n\
         Name: {}\n\
         Current Stock: {}\n\
         Reorder Level: {}\n\
         Price: {}\n\
         Cost: {}\n\n\
         Suggest optimal order quantity considering:\n\
         - Stock level\n\
         - Typical turnover\n\
         - Cost efficiency\n\n\
         Return only a number representing the suggested quantity.",
        product.name, product.quantity, product.reorder_level, product.price, product.cost
    )
}

pub fn categorize_prompt(request: &CategorizeRequest) -> String {
    let description = request
        .product_description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or("Not provided");

    format!(
        "Categorize this product and generate a professional description:\n\n\
         Product Name: {}\n\
         Description: {}\n\n\
         Return JSON with:\n\
         1. category (single category from: {})\n\
         2. enhanced_description (professional, 2-3 sentences)\n\
         3. tags (array of 3-5 relevant tags)",
        request.product_name,
        description,
        PRODUCT_CATEGORIES.join(", ")
    )
}

impl AiService {
    pub fn new(db: PgPool, llm: LlmClient) -> Self {
        Self {
            products: ProductService::new(db.clone()),
            stock: StockService::new(db),
            llm,
        }
    }

    /// Demand forecast for one product from its recent history
    pub async fn forecast(&self, request: ForecastRequest) -> AppResult<ForecastResponse> {
        request.validate()?;

        let product = self.products.get(request.product_id).await?;
        let history = self
            .stock
            .recent_for_product(product.id, FORECAST_HISTORY_LIMIT)
            .await?;

        let prompt = forecast_prompt(&product, request.days, &history);
        let forecast = self.llm.complete(&prompt).await.map_err(|e| {
            tracing::error!(product_id = product.id, "AI forecast error: {}", e);
            e
        })?;

        Ok(ForecastResponse {
            product_id: product.id,
            product_name: product.name,
            current_stock: product.quantity,
            forecast,
        })
    }

    /// Suggested order quantities for the most urgent low-stock products
    ///
    /// A product whose suggestion fails is logged and left out.
    pub async fn reorder_suggestions(&self) -> AppResult<ReorderSuggestionsResponse> {
        let products = self
            .products
            .low_stock_products(MAX_REORDER_SUGGESTIONS as i64)
            .await?;

        if products.is_empty() {
            return Ok(ReorderSuggestionsResponse {
                message: Some("No products need reordering".to_string()),
                suggestions: Vec::new(),
            });
        }

        let mut suggestions = Vec::with_capacity(products.len());
        for product in products {
            match self.llm.complete(&reorder_prompt(&product)).await {
                Ok(answer) => suggestions.push(ReorderSuggestion {
                    product_id: product.id,
                    product_name: product.name,
                    sku: product.sku,
                    current_stock: product.quantity,
                    reorder_level: product.reorder_level,
                    suggested_quantity: answer.trim().to_string(),
                }),
                Err(e) => {
                    tracing::error!(product_id = product.id, "AI suggestion error: {}", e);
                }
            }
        }

        Ok(ReorderSuggestionsResponse {
            message: None,
            suggestions,
        })
    }

    pub async fn categorize(&self, request: CategorizeRequest) -> AppResult<CategorizeResponse> {
        request.validate()?;

        let ai_response = self
            .llm
            .complete(&categorize_prompt(&request))
            .await
            .map_err(|e| {
                tracing::error!("AI categorization error: {}", e);
                e
            })?;

        Ok(CategorizeResponse {
            product_name: request.product_name,
            ai_response,
        })
    }
}
