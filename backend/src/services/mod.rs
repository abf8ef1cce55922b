//! Business logic services for the inventory platform

pub mod ai;
pub mod auth;
pub mod dashboard;
pub mod order;
pub mod product;
pub mod stock;
pub mod supplier;

#[cfg(test)]
pub(crate) mod test_support;

pub use ai::AiService;
pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use order::OrderService;
pub use product::ProductService;
pub use stock::StockService;
pub use supplier::SupplierService;
