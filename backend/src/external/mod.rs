//! External API integrations

pub mod llm;

pub use llm::LlmClient;
