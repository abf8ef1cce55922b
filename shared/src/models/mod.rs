//! Domain models for the inventory platform

mod ai;
mod dashboard;
mod order;
mod product;
mod stock;
mod supplier;
mod user;

pub use ai::*;
pub use dashboard::*;
pub use order::*;
pub use product::*;
pub use stock::*;
pub use supplier::*;
pub use user::*;
