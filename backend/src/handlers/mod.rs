//! HTTP request handlers

pub mod ai;
pub mod auth;
pub mod dashboard;
pub mod extract;
pub mod health;
pub mod orders;
pub mod products;
pub mod stock;
pub mod suppliers;

pub use ai::*;
pub use auth::*;
pub use dashboard::*;
pub use health::*;
pub use orders::*;
pub use products::*;
pub use stock::*;
pub use suppliers::*;
