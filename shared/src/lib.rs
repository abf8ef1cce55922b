//! Shared types and rules for the inventory platform
//!
//! This crate contains the domain models and the pure business rules used by
//! the backend, the API client and the browser dashboard (via WASM).

pub mod forms;
pub mod models;
pub mod types;
pub mod validation;

pub use forms::*;
pub use models::*;
pub use types::*;
pub use validation::*;
