//! Client error type

use thiserror::Error;

/// Failure of an API call
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got a response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("API error ({status}): {detail}")]
    Api {
        status: u16,
        detail: String,
        code: Option<String>,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Not logged in")]
    NotLoggedIn,
}

impl ClientError {
    /// Text of the user-facing notification for this failure
    ///
    /// The server's `detail` is shown when there is one, otherwise `fallback`.
    pub fn notification(&self, fallback: &str) -> String {
        match self {
            ClientError::Api { detail, .. } if !detail.trim().is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The session is missing or no longer accepted
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::NotLoggedIn) || self.status() == Some(401)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
