//! API gateway
//!
//! Everything the page exchanges with the backend: request values, response
//! interpretation and the fetch-based transport.

pub mod client;
pub mod request;
pub mod response;

pub use request::{ApiEndpoints, ApiRequest, BookFields, Method, NewBook};
pub use response::ApiResponse;

use thiserror::Error;

/// Message shown when the server could not be reached at all
pub const NETWORK_FAILURE_MESSAGE: &str = "Could not reach the server. Please try again.";

/// Failure of an API call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request never completed or the response could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-2xx status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    /// Text to show the user: the server's message verbatim, or a generic one
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => NETWORK_FAILURE_MESSAGE.to_string(),
            Self::Server { message, .. } => message.clone(),
        }
    }
}
