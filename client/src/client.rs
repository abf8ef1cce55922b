//! Typed HTTP client for the inventory API

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    ApiInfo, CategorizeRequest, CategorizeResponse, CreateOrderInput, CreateProductInput,
    CreateStockTransactionInput, CreateSupplierInput, DashboardStats, ErrorBody, ForecastRequest,
    ForecastResponse, HealthResponse, LoginInput, LoginResponse, LowStockAlerts,
    MessageResponse, Order, OrderStatus, OrderStatusUpdated, Product, RegisterInput,
    ReorderRequest, ReorderSuggestionsResponse, SessionUser, StockTransaction,
    StockTransactionFilter, Supplier, UpdateProductInput, User,
};

use crate::error::{ClientError, ClientResult};

/// Logged-in user and the bearer token sent with every protected call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

/// Client for every `/api` endpoint
///
/// One request per call. Nothing is retried and no timeout is set beyond
/// the transport defaults.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    /// Create a client for a backend, e.g. `http://localhost:8001`
    pub fn new(backend_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: format!("{}/api", backend_url.trim_end_matches('/')),
            session: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Restore a session kept from an earlier login
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!("Logged out {}", session.user.username);
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let session = self.session.as_ref().ok_or(ClientError::NotLoggedIn)?;
        tracing::debug!("{} {}", method, path);
        Ok(self
            .http
            .request(method, self.url(path))
            .bearer_auth(&session.token))
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        decode(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::GET, path)?;
        self.execute(request).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, path)?.json(body);
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.request(Method::DELETE, path)?;
        self.execute(request).await
    }

    // ========================================================================
    // Public endpoints
    // ========================================================================

    pub async fn api_info(&self) -> ClientResult<ApiInfo> {
        let response = self.http.get(&self.base_url).send().await?;
        decode(response).await
    }

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        let response = self.http.get(self.url("/health")).send().await?;
        decode(response).await
    }

    pub async fn register(&self, input: &RegisterInput) -> ClientResult<User> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(input)
            .send()
            .await?;
        decode(response).await
    }

    /// Log in and keep the returned session
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let credentials = LoginInput {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&credentials)
            .send()
            .await?;
        let login: LoginResponse = decode(response).await?;

        self.session = Some(Session {
            token: login.access_token.clone(),
            user: login.user.clone(),
        });
        tracing::info!("Logged in as {} ({})", login.user.username, login.user.role);
        Ok(login)
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.get("/auth/users").await
    }

    // ========================================================================
    // Products
    // ========================================================================

    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.get("/products").await
    }

    pub async fn get_product(&self, id: i64) -> ClientResult<Product> {
        self.get(&format!("/products/{}", id)).await
    }

    pub async fn create_product(&self, input: &CreateProductInput) -> ClientResult<Product> {
        self.send_json(Method::POST, "/products", input).await
    }

    pub async fn update_product(
        &self,
        id: i64,
        input: &UpdateProductInput,
    ) -> ClientResult<Product> {
        self.send_json(Method::PUT, &format!("/products/{}", id), input)
            .await
    }

    pub async fn delete_product(&self, id: i64) -> ClientResult<MessageResponse> {
        self.delete(&format!("/products/{}", id)).await
    }

    pub async fn low_stock_alerts(&self) -> ClientResult<LowStockAlerts> {
        self.get("/products/low-stock/alerts").await
    }

    // ========================================================================
    // Suppliers
    // ========================================================================

    pub async fn list_suppliers(&self) -> ClientResult<Vec<Supplier>> {
        self.get("/suppliers").await
    }

    pub async fn get_supplier(&self, id: i64) -> ClientResult<Supplier> {
        self.get(&format!("/suppliers/{}", id)).await
    }

    pub async fn create_supplier(&self, input: &CreateSupplierInput) -> ClientResult<Supplier> {
        self.send_json(Method::POST, "/suppliers", input).await
    }

    pub async fn delete_supplier(&self, id: i64) -> ClientResult<MessageResponse> {
        self.delete(&format!("/suppliers/{}", id)).await
    }

    // ========================================================================
    // Orders
    // ========================================================================

    pub async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        self.get("/orders").await
    }

    pub async fn get_order(&self, id: i64) -> ClientResult<Order> {
        self.get(&format!("/orders/{}", id)).await
    }

    pub async fn create_order(&self, input: &CreateOrderInput) -> ClientResult<Order> {
        self.send_json(Method::POST, "/orders", input).await
    }

    /// Status travels in the query string: `PUT /orders/{id}/status?status=...`
    pub async fn update_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> ClientResult<OrderStatusUpdated> {
        let request = self
            .request(Method::PUT, &format!("/orders/{}/status", id))?
            .query(&[("status", status.as_str())]);
        self.execute(request).await
    }

    // ========================================================================
    // Stock
    // ========================================================================

    pub async fn list_stock_transactions(
        &self,
        filter: &StockTransactionFilter,
    ) -> ClientResult<Vec<StockTransaction>> {
        let request = self
            .request(Method::GET, "/stock/transactions")?
            .query(filter);
        self.execute(request).await
    }

    pub async fn create_stock_transaction(
        &self,
        input: &CreateStockTransactionInput,
    ) -> ClientResult<StockTransaction> {
        self.send_json(Method::POST, "/stock/transactions", input)
            .await
    }

    // ========================================================================
    // AI
    // ========================================================================

    pub async fn forecast(&self, request: &ForecastRequest) -> ClientResult<ForecastResponse> {
        self.send_json(Method::POST, "/ai/forecast", request).await
    }

    pub async fn reorder_suggestions(
        &self,
        request: &ReorderRequest,
    ) -> ClientResult<ReorderSuggestionsResponse> {
        self.send_json(Method::POST, "/ai/reorder-suggestions", request)
            .await
    }

    pub async fn categorize(&self, request: &CategorizeRequest) -> ClientResult<CategorizeResponse> {
        self.send_json(Method::POST, "/ai/categorize", request).await
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    pub async fn dashboard_stats(&self) -> ClientResult<DashboardStats> {
        self.get("/dashboard/stats").await
    }
}

/// Read a JSON body, or turn a non-2xx answer into `ClientError::Api`
async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let (detail, code) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.detail, Some(body.code)),
            Err(_) if !text.trim().is_empty() => (text, None),
            Err(_) => (
                status.canonical_reason().unwrap_or_default().to_string(),
                None,
            ),
        };
        tracing::warn!("API error {}: {}", status.as_u16(), detail);
        return Err(ClientError::Api {
            status: status.as_u16(),
            detail,
            code,
        });
    }

    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::UserRole;

    #[test]
    fn test_base_url() {
        assert_eq!(
            ApiClient::new("http://localhost:8001/").base_url(),
            "http://localhost:8001/api"
        );
        assert_eq!(
            ApiClient::new("http://localhost:8001").url("/products/3"),
            "http://localhost:8001/api/products/3"
        );
    }

    #[test]
    fn test_protected_call_needs_session() {
        let client = ApiClient::new("http://localhost:8001");
        assert!(matches!(
            client.request(Method::GET, "/products"),
            Err(ClientError::NotLoggedIn)
        ));
    }

    #[test]
    fn test_session_lifecycle() {
        let mut client = ApiClient::new("http://localhost:8001");
        client.set_session(Session {
            token: "abc".to_string(),
            user: SessionUser {
                id: 1,
                username: "admin".to_string(),
                email: "admin@store.ph".to_string(),
                role: UserRole::Admin,
            },
        });
        assert!(client.is_authenticated());
        assert!(client.request(Method::GET, "/products").is_ok());

        client.logout();
        assert!(client.session().is_none());
    }
}
