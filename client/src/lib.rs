//! HTTP client for the inventory API
//!
//! Wraps every `/api` endpoint in a typed method, keeps the login session,
//! and turns failed calls into notification text for the dashboard.

pub mod client;
pub mod error;

pub use client::{ApiClient, Session};
pub use error::{ClientError, ClientResult};
